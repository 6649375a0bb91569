//! Layered error types for the normalization engine
//!
//! Initialization failures (lexicon or rule data) are fatal; everything
//! that can go wrong during normalization itself is absorbed by the
//! unknown-token and rule-skip policies and never surfaces as an error.

use thiserror::Error;

/// Core engine errors
#[derive(Error, Debug)]
pub enum CoreError {
    /// Dictionary data missing or unparseable at initialization
    #[error("lexicon load failed for {path}: {reason}")]
    LexiconLoad {
        /// The dictionary file (or embedded asset name) that failed
        path: String,
        /// What was wrong with it
        reason: String,
    },

    /// A mandatory rule category ended up with no usable rules
    #[error("rule set has no usable rules in mandatory category '{category}'")]
    RuleSetEmpty {
        /// The category name (e.g. "number")
        category: String,
    },

    /// A single rule definition failed to parse or compile
    ///
    /// Carried by the loader for reporting; a rule-level failure is a
    /// skip, not an abort, unless it empties a mandatory category.
    #[error("rule compile failed at {file}:{line}: {reason}")]
    RuleCompile {
        /// Rule file the definition came from
        file: String,
        /// 1-based line number
        line: usize,
        /// Parse or regex compile error text
        reason: String,
    },

    /// External data directory missing or not a directory
    #[error("data directory not found: {path}")]
    DataDir {
        /// The path that was given
        path: String,
    },

    /// I/O error while reading data assets
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_load_display() {
        let err = CoreError::LexiconLoad {
            path: "numbers.dict".to_string(),
            reason: "missing digit 7".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "lexicon load failed for numbers.dict: missing digit 7"
        );
    }

    #[test]
    fn test_rule_compile_display() {
        let err = CoreError::RuleCompile {
            file: "date.rules".to_string(),
            line: 12,
            reason: "unclosed group".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "rule compile failed at date.rules:12: unclosed group"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
