//! Lexicon store: dictionaries and the number mapping table
//!
//! All data is loaded once at engine initialization, either from the
//! embedded defaults or from an external data directory, and is read-only
//! afterwards. Lookups never touch the filesystem.

mod number;

pub use number::NumberTable;

use crate::error::{CoreError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Lowercase letters of the Vietnamese alphabet, tone marks included.
/// Note f, j, w and z are absent: a word containing them is not speakable
/// as plain Vietnamese and goes through the unknown-token policy.
const VIETNAMESE_LETTERS: &str = "aàáảãạăằắẳẵặâầấẩẫậbcdđeèéẻẽẹêềếểễệghiìíỉĩịklmnoòóỏõọôồốổỗộơờớởỡợpqrstuùúủũụưừứửữựvxyỳýỷỹỵ";

/// Immutable dictionary store shared by all normalization calls
#[derive(Debug, Clone)]
pub struct Lexicon {
    abbreviations: HashMap<String, String>,
    abbreviations_lower: HashMap<String, String>,
    letters: HashMap<char, String>,
    symbols: HashMap<char, String>,
    numbers: NumberTable,
}

impl Lexicon {
    /// Build the lexicon from the embedded default dictionaries
    pub fn embedded() -> Result<Self> {
        Self::from_sources([
            ("abbreviations.dict", include_str!("../../data/abbreviations.dict")),
            ("letters.dict", include_str!("../../data/letters.dict")),
            ("symbols.dict", include_str!("../../data/symbols.dict")),
            ("numbers.dict", include_str!("../../data/numbers.dict")),
        ])
    }

    /// Build the lexicon from dictionary files in an external directory
    ///
    /// The directory must contain `abbreviations.dict`, `letters.dict`,
    /// `symbols.dict` and `numbers.dict` in the same line-oriented format
    /// as the embedded defaults.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(CoreError::DataDir {
                path: dir.display().to_string(),
            });
        }
        let mut sources = Vec::with_capacity(4);
        for name in ["abbreviations.dict", "letters.dict", "symbols.dict", "numbers.dict"] {
            let path = dir.join(name);
            let content = fs::read_to_string(&path).map_err(|e| CoreError::LexiconLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            sources.push((name, content));
        }
        Self::from_sources([
            (sources[0].0, sources[0].1.as_str()),
            (sources[1].0, sources[1].1.as_str()),
            (sources[2].0, sources[2].1.as_str()),
            (sources[3].0, sources[3].1.as_str()),
        ])
    }

    fn from_sources(sources: [(&str, &str); 4]) -> Result<Self> {
        let [abbrev, letters, symbols, numbers] = sources;

        let abbreviations = parse_dict(abbrev.1, abbrev.0)?;
        let abbreviations_lower = abbreviations
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.clone()))
            .collect();
        let letters = parse_char_dict(letters.1, letters.0)?;
        let symbols = parse_char_dict(symbols.1, symbols.0)?;
        let number_entries = parse_dict(numbers.1, numbers.0)?;
        let numbers = NumberTable::from_entries(&number_entries, numbers.0)?;

        Ok(Self {
            abbreviations,
            abbreviations_lower,
            letters,
            symbols,
            numbers,
        })
    }

    /// Look up an abbreviation expansion
    ///
    /// Case-sensitive first, then a lowercase fallback so "Tp" still finds
    /// "TP" when the output is lowercased anyway.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.abbreviations
            .get(word)
            .or_else(|| self.abbreviations_lower.get(&word.to_lowercase()))
            .map(String::as_str)
    }

    /// Spoken name of a symbol character, if it has one
    pub fn symbol_name(&self, ch: char) -> Option<&str> {
        self.symbols.get(&ch).map(String::as_str)
    }

    /// The number mapping table
    pub fn numbers(&self) -> &NumberTable {
        &self.numbers
    }

    /// Expand a numeric surface form into words
    ///
    /// Accepts plain digit runs, grouped thousands with either separator
    /// (1,000,000 / 1.000.000), and single-separator decimals. Multi-digit
    /// runs with a leading zero are read digit by digit.
    pub fn expand_number_text(&self, raw: &str) -> String {
        let raw = raw.trim();
        if raw.bytes().all(|b| b.is_ascii_digit()) && !raw.is_empty() {
            if raw.len() > 1 && raw.starts_with('0') {
                return self.numbers.read_digits(raw);
            }
            return self.numbers.expand_integer(raw);
        }
        if is_grouped(raw) {
            let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
            return self.numbers.expand_integer(&digits);
        }
        if raw.chars().filter(|c| *c == '.' || *c == ',').count() == 1 {
            if let Some((int_part, frac_part)) = raw.split_once(['.', ',']) {
                if !int_part.is_empty()
                    && !frac_part.is_empty()
                    && int_part.bytes().all(|b| b.is_ascii_digit())
                    && frac_part.bytes().all(|b| b.is_ascii_digit())
                {
                    return self.numbers.expand_decimal(int_part, frac_part);
                }
            }
        }
        self.numbers.read_digits(raw)
    }

    /// Spell a span character by character: letter names, digit words,
    /// symbol names. Characters with no spoken form are skipped.
    pub fn spell_chars(&self, text: &str) -> String {
        let mut words: Vec<&str> = Vec::new();
        for c in text.chars() {
            let lower = c.to_lowercase().next().unwrap_or(c);
            if let Some(name) = self.letters.get(&lower) {
                words.push(name);
            } else if let Some(d) = lower.to_digit(10) {
                words.push(self.numbers.digit(d as u8));
            } else if let Some(name) = self.symbols.get(&lower) {
                words.push(name);
            }
        }
        words.join(" ")
    }

    /// Whether a word is pronounceable as plain Vietnamese
    pub fn is_speakable(&self, word: &str) -> bool {
        !word.is_empty()
            && word.chars().all(|c| {
                let lower = c.to_lowercase().next().unwrap_or(c);
                VIETNAMESE_LETTERS.contains(lower)
            })
    }
}

/// Parse a `key|value` dictionary file
///
/// Blank lines and `#` comments are skipped; a malformed or duplicate
/// entry is fatal, per the lexicon contract.
fn parse_dict(content: &str, source: &str) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once('|').ok_or_else(|| CoreError::LexiconLoad {
            path: source.to_string(),
            reason: format!("line {}: missing '|' separator", lineno + 1),
        })?;
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return Err(CoreError::LexiconLoad {
                path: source.to_string(),
                reason: format!("line {}: empty field", lineno + 1),
            });
        }
        if map.insert(key.to_string(), value.to_string()).is_some() {
            return Err(CoreError::LexiconLoad {
                path: source.to_string(),
                reason: format!("line {}: duplicate key '{key}'", lineno + 1),
            });
        }
    }
    Ok(map)
}

/// Parse a dictionary whose keys must be single characters
fn parse_char_dict(content: &str, source: &str) -> Result<HashMap<char, String>> {
    let entries = parse_dict(content, source)?;
    let mut map = HashMap::with_capacity(entries.len());
    for (key, value) in entries {
        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(CoreError::LexiconLoad {
                path: source.to_string(),
                reason: format!("key '{key}' is not a single character"),
            });
        };
        map.insert(c, value);
    }
    Ok(map)
}

/// Digit run with `.` or `,` thousands grouping, e.g. 1,000,000
fn is_grouped(raw: &str) -> bool {
    let mut parts = raw.split(['.', ',']);
    let Some(first) = parts.next() else {
        return false;
    };
    if first.is_empty() || first.len() > 3 || !first.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let mut any = false;
    for part in parts {
        if part.len() != 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        any = true;
    }
    any
}
