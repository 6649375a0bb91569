//! The rule engine: matching and rewriting over one sentence
//!
//! A single deterministic left-to-right pass. At each token start every
//! candidate rule is tried in precedence order; the first applicable
//! match is rewritten and the cursor jumps past the original span, so a
//! rewrite is never rescanned. Tokens no rule claims fall back to the
//! lexicon, then to the unknown-token policy.

use crate::config::NormalizeOptions;
use crate::lexicon::Lexicon;
use crate::rules::{Rule, RuleCategory, RuleSet};
use crate::segmenter::{tokenize, TokenClass};
use serde::Serialize;

/// Symbols that are dropped rather than spoken when they stand alone
const SILENT_SYMBOLS: [char; 9] = ['-', '_', '/', '\\', '|', '~', '^', '<', '>'];

/// Record of one rule application, collected when tracing is enabled
#[derive(Debug, Clone, Serialize)]
pub struct RuleFire {
    /// Category of the fired rule
    pub category: RuleCategory,
    /// Priority of the fired rule
    pub priority: i32,
    /// Pattern source of the fired rule
    pub pattern: String,
    /// The original text the rule consumed
    pub matched: String,
    /// The rewrite that replaced it
    pub rewrite: String,
}

/// Kind of one output piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    /// Spoken text: rule rewrites, expansions, carried-through words
    Text,
    /// A punctuation token carried from the input
    Punctuation,
}

/// One span of the rewritten sentence
#[derive(Debug, Clone)]
pub struct OutputPiece {
    /// The piece text
    pub text: String,
    /// Whether the formatter may strip it as punctuation
    pub kind: PieceKind,
}

/// The rewritten output for one input sentence
#[derive(Debug, Clone, Default)]
pub struct NormalizedSentence {
    pieces: Vec<OutputPiece>,
    /// Word-like tokens that matched neither a rule nor the lexicon
    /// (populated only when `mark_unknown_tokens` is set)
    pub unknown: Vec<String>,
    /// Rules that fired, in application order
    /// (populated only when `emit_rule_trace` is set)
    pub trace: Vec<RuleFire>,
}

impl NormalizedSentence {
    /// Assemble the sentence text, honoring the punctuation policy
    ///
    /// Text pieces are space-separated; punctuation attaches directly to
    /// the preceding piece, or is dropped entirely when
    /// `keep_punctuation` is off.
    pub fn render(&self, keep_punctuation: bool) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece.kind {
                PieceKind::Text => {
                    if piece.text.is_empty() {
                        continue;
                    }
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(&piece.text);
                }
                PieceKind::Punctuation => {
                    if keep_punctuation {
                        out.push_str(&piece.text);
                    }
                }
            }
        }
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Whether nothing was emitted for this sentence
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    fn push_text(&mut self, text: impl Into<String>) {
        self.pieces.push(OutputPiece {
            text: text.into(),
            kind: PieceKind::Text,
        });
    }

    fn push_punctuation(&mut self, text: &str) {
        self.pieces.push(OutputPiece {
            text: text.to_string(),
            kind: PieceKind::Punctuation,
        });
    }
}

/// Normalize one sentence
pub fn normalize_sentence(
    sentence: &str,
    rules: &RuleSet,
    lexicon: &Lexicon,
    options: &NormalizeOptions,
) -> NormalizedSentence {
    let tokens = tokenize(sentence);
    // Sorted span ends; a rule match must stop on one of these so a
    // pattern never consumes half a token.
    let ends: Vec<usize> = tokens.iter().map(|t| t.end).collect();
    let mut out = NormalizedSentence::default();

    let mut idx = 0;
    while idx < tokens.len() {
        let tok = tokens[idx];
        if tok.class == TokenClass::Whitespace {
            idx += 1;
            continue;
        }

        if let Some((rule, end, rewrite)) = match_at(sentence, tok.start, &ends, rules, lexicon) {
            if options.emit_rule_trace {
                out.trace.push(RuleFire {
                    category: rule.category,
                    priority: rule.priority,
                    pattern: rule.pattern().to_string(),
                    matched: sentence[tok.start..end].to_string(),
                    rewrite: rewrite.clone(),
                });
            }
            out.push_text(rewrite);
            while idx < tokens.len() && tokens[idx].start < end {
                idx += 1;
            }
            continue;
        }

        match tok.class {
            TokenClass::Word => {
                if let Some(expansion) = lexicon.lookup(tok.text) {
                    out.push_text(expansion);
                } else if lexicon.is_speakable(tok.text) {
                    out.push_text(tok.text);
                } else {
                    // Unknown tokens are passed through, never dropped.
                    out.push_text(tok.text);
                    if options.mark_unknown_tokens {
                        out.unknown.push(tok.text.to_string());
                    }
                }
            }
            TokenClass::Number => {
                out.push_text(lexicon.expand_number_text(tok.text));
            }
            TokenClass::Punctuation => {
                out.push_punctuation(tok.text);
            }
            TokenClass::Symbol => {
                let c = tok.text.chars().next().unwrap_or(' ');
                if !SILENT_SYMBOLS.contains(&c) {
                    if let Some(name) = lexicon.symbol_name(c) {
                        out.push_text(name);
                    } else if options.mark_unknown_tokens {
                        out.unknown.push(tok.text.to_string());
                    }
                }
            }
            TokenClass::Whitespace => unreachable!("whitespace handled above"),
        }
        idx += 1;
    }

    out
}

/// Find the first applicable rule at the cursor position
///
/// Rules are tried in precedence order; a rule applies iff its match
/// begins exactly at `start` and ends on a token boundary.
fn match_at<'r>(
    sentence: &str,
    start: usize,
    ends: &[usize],
    rules: &'r RuleSet,
    lexicon: &Lexicon,
) -> Option<(&'r Rule, usize, String)> {
    for rule in rules.iter_precedence() {
        let Some(caps) = rule.regex.captures_at(sentence, start) else {
            continue;
        };
        let m = caps.get(0).expect("group 0 always present");
        if m.start() != start || m.end() == m.start() {
            continue;
        }
        if ends.binary_search(&m.end()).is_err() {
            continue;
        }
        let rewrite = rule.template.render(&caps, lexicon);
        return Some((rule, m.end(), rewrite));
    }
    None
}
