//! Rule-based Vietnamese text normalization for speech synthesis
//!
//! Rewrites numbers, dates, times, currency amounts, abbreviations,
//! acronyms, web addresses and symbols into their spoken Vietnamese
//! form, then reassembles the text as delimiter-joined sentences ready
//! for a TTS front end.
//!
//! ```
//! use vinorm_core::{NormalizeOptions, Normalizer};
//!
//! let normalizer = Normalizer::new().unwrap();
//! let out = normalizer.normalize_to_string("Ngày 25/12/2023.", &NormalizeOptions::default());
//! assert_eq!(
//!     out,
//!     "ngày ngày hai mươi lăm tháng mười hai năm hai nghìn không trăm hai mươi ba"
//! );
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod lexicon;
pub mod rules;
pub mod segmenter;

// Re-export key types
pub use config::{NormalizeOptions, NormalizeOptionsBuilder};
pub use engine::{NormalizedSentence, RuleFire};
pub use error::{CoreError, Result};
pub use formatter::SENTENCE_DELIMITER;
pub use lexicon::Lexicon;
pub use rules::{RuleCategory, RuleSet};

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Sentence count below which one call stays on the calling thread
#[cfg(feature = "parallel")]
const PARALLEL_SENTENCE_THRESHOLD: usize = 8;

/// Main entry point for text normalization
///
/// Owns the immutable lexicon and rule set, loaded once at construction.
/// A `Normalizer` is `Send + Sync`; concurrent calls share the loaded
/// data read-only.
#[derive(Debug, Clone)]
pub struct Normalizer {
    lexicon: Arc<Lexicon>,
    rules: Arc<RuleSet>,
}

impl Normalizer {
    /// Create a normalizer from the embedded default data
    pub fn new() -> Result<Self> {
        Ok(Self {
            lexicon: Arc::new(Lexicon::embedded()?),
            rules: Arc::new(RuleSet::embedded()?),
        })
    }

    /// Create a normalizer from an external data directory
    ///
    /// The directory holds the dictionary files at its root and the rule
    /// files either alongside them or in a `rules/` subdirectory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        Ok(Self {
            lexicon: Arc::new(Lexicon::from_dir(dir)?),
            rules: Arc::new(RuleSet::from_dir(dir)?),
        })
    }

    /// Create a builder
    pub fn builder() -> NormalizerBuilder {
        NormalizerBuilder::default()
    }

    /// The loaded lexicon
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// The loaded rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Normalize one text blob into per-sentence results
    ///
    /// Never fails: malformed spans fall through the unknown-token
    /// policy and are carried into the output.
    pub fn normalize(&self, text: &str, options: &NormalizeOptions) -> NormalizedText {
        let sentences: Vec<segmenter::Sentence<'_>> = segmenter::segment(text).collect();

        #[cfg(feature = "parallel")]
        if sentences.len() >= PARALLEL_SENTENCE_THRESHOLD && num_cpus::get() > 1 {
            use rayon::prelude::*;
            let normalized = sentences
                .par_iter()
                .map(|s| engine::normalize_sentence(s.text, &self.rules, &self.lexicon, options))
                .collect();
            return NormalizedText {
                sentences: normalized,
            };
        }

        let normalized = sentences
            .iter()
            .map(|s| engine::normalize_sentence(s.text, &self.rules, &self.lexicon, options))
            .collect();
        NormalizedText {
            sentences: normalized,
        }
    }

    /// Normalize and assemble the delimiter-joined output blob
    pub fn normalize_to_string(&self, text: &str, options: &NormalizeOptions) -> String {
        self.normalize(text, options).join(options)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new().expect("embedded data should always load")
    }
}

/// Builder for [`Normalizer`]
#[derive(Debug, Default)]
pub struct NormalizerBuilder {
    data_dir: Option<PathBuf>,
}

impl NormalizerBuilder {
    /// Load dictionaries and rules from an external directory instead of
    /// the embedded defaults
    pub fn data_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Build the normalizer
    pub fn build(self) -> Result<Normalizer> {
        match self.data_dir {
            Some(dir) => Normalizer::from_dir(dir),
            None => Normalizer::new(),
        }
    }
}

/// Per-sentence results of one normalization call
#[derive(Debug, Clone)]
pub struct NormalizedText {
    /// Normalized sentences in original order
    pub sentences: Vec<NormalizedSentence>,
}

impl NormalizedText {
    /// Assemble the delimiter-joined output blob
    pub fn join(&self, options: &NormalizeOptions) -> String {
        formatter::format(&self.sentences, options)
    }

    /// Unknown tokens across all sentences, in order of appearance
    pub fn unknown_tokens(&self) -> impl Iterator<Item = &str> {
        self.sentences
            .iter()
            .flat_map(|s| s.unknown.iter().map(String::as_str))
    }

    /// Fired rules across all sentences, in application order
    pub fn trace(&self) -> impl Iterator<Item = &RuleFire> {
        self.sentences.iter().flat_map(|s| s.trace.iter())
    }
}

/// Normalize text with the embedded data and default options
pub fn normalize_text(text: &str) -> Result<String> {
    let normalizer = Normalizer::new()?;
    Ok(normalizer.normalize_to_string(text, &NormalizeOptions::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convenience_function() {
        let out = normalize_text("Giá 50%").unwrap();
        assert_eq!(out, "giá năm mươi phần trăm");
    }

    #[test]
    fn test_sentences_joined_in_order() {
        let normalizer = Normalizer::new().unwrap();
        let out = normalizer.normalize_to_string(
            "Một. Hai. Ba.",
            &NormalizeOptions::default(),
        );
        assert_eq!(out, "một#line#hai#line#ba");
    }

    #[test]
    fn test_empty_input() {
        let out = normalize_text("").unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_unknown_tokens_surface() {
        let normalizer = Normalizer::new().unwrap();
        let result = normalizer.normalize("gặp xyz123abc nhé", &NormalizeOptions::default());
        let unknown: Vec<&str> = result.unknown_tokens().collect();
        assert_eq!(unknown, vec!["xyz123abc"]);
    }

    #[test]
    fn test_normalizer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Normalizer>();
    }
}
