//! Per-invocation normalization options
//!
//! Options are fixed for the duration of one `normalize` call and never
//! mutate shared state; the same engine instance can serve concurrent
//! calls with different option sets.

use serde::{Deserialize, Serialize};

/// Options controlling one normalization call
///
/// Mirrors the legacy invocation flags (`-punc`, `-unknown`, `-lower`,
/// `-rule`) as a typed record instead of a dynamically built argument
/// string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Keep punctuation tokens in the output instead of stripping them
    pub keep_punctuation: bool,
    /// Record word-like tokens that matched neither a rule nor the lexicon
    pub mark_unknown_tokens: bool,
    /// Lowercase the final output string
    pub lowercase_output: bool,
    /// Record which rules fired, in application order
    pub emit_rule_trace: bool,
    /// Append a terminal period after the last sentence when joining
    ///
    /// The legacy wrapper appended ". " after every segment including the
    /// final one; whether that was intentional is unknowable from the data,
    /// so it is configurable here and off by default.
    pub trailing_terminator: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            keep_punctuation: false,
            mark_unknown_tokens: true,
            lowercase_output: true,
            emit_rule_trace: false,
            trailing_terminator: false,
        }
    }
}

impl NormalizeOptions {
    /// Create a builder
    pub fn builder() -> NormalizeOptionsBuilder {
        NormalizeOptionsBuilder::default()
    }

    /// Options that leave casing and punctuation untouched
    ///
    /// Useful when the output is fed to a consumer that does its own
    /// post-processing.
    pub fn verbatim() -> Self {
        Self {
            keep_punctuation: true,
            mark_unknown_tokens: false,
            lowercase_output: false,
            emit_rule_trace: false,
            trailing_terminator: false,
        }
    }
}

/// Builder for [`NormalizeOptions`]
#[derive(Debug, Default)]
pub struct NormalizeOptionsBuilder {
    options: NormalizeOptions,
}

impl NormalizeOptionsBuilder {
    /// Keep punctuation in the output
    pub fn keep_punctuation(mut self, keep: bool) -> Self {
        self.options.keep_punctuation = keep;
        self
    }

    /// Track unknown tokens
    pub fn mark_unknown_tokens(mut self, mark: bool) -> Self {
        self.options.mark_unknown_tokens = mark;
        self
    }

    /// Lowercase the output
    pub fn lowercase_output(mut self, lower: bool) -> Self {
        self.options.lowercase_output = lower;
        self
    }

    /// Record fired rules
    pub fn emit_rule_trace(mut self, emit: bool) -> Self {
        self.options.emit_rule_trace = emit;
        self
    }

    /// Append a terminal period after the final sentence
    pub fn trailing_terminator(mut self, trailing: bool) -> Self {
        self.options.trailing_terminator = trailing;
        self
    }

    /// Build the options
    pub fn build(self) -> NormalizeOptions {
        self.options
    }
}
