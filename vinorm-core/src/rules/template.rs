//! Rewrite templates
//!
//! A template is literal text interleaved with `{N:mode}` placeholders,
//! where `N` is a capture-group index of the owning rule's pattern and the
//! mode picks the lexicon expansion: `num` (number words), `digits`
//! (digit by digit), `spell` (dictionary first, then letter names),
//! `chars` (letter and symbol names), `frac` (fraction digits after a
//! decimal point), `keep` (verbatim).

use crate::lexicon::Lexicon;
use smallvec::SmallVec;

/// Expansion mode of one placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Number-to-words expansion, grouping separators stripped
    Num,
    /// Digit-by-digit reading
    Digits,
    /// Abbreviation dictionary first, letter spelling on miss
    Spell,
    /// Per-character letter/digit/symbol names
    Chars,
    /// Fraction digits after a decimal point
    Frac,
    /// Verbatim matched text
    Keep,
}

impl Mode {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "num" => Some(Mode::Num),
            "digits" => Some(Mode::Digits),
            "spell" => Some(Mode::Spell),
            "chars" => Some(Mode::Chars),
            "frac" => Some(Mode::Frac),
            "keep" => Some(Mode::Keep),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Piece {
    Literal(String),
    Group { index: usize, mode: Mode },
}

/// A compiled rewrite template
#[derive(Debug, Clone)]
pub struct Template {
    pieces: SmallVec<[Piece; 8]>,
    raw: String,
}

impl Template {
    /// Parse template source; the error is a human-readable reason
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut pieces: SmallVec<[Piece; 8]> = SmallVec::new();
        let mut literal = String::new();
        let mut rest = raw;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| format!("unclosed placeholder in '{raw}'"))?;
            let body = &after[..close];
            let (index, mode) = body
                .split_once(':')
                .ok_or_else(|| format!("placeholder '{{{body}}}' missing ':mode'"))?;
            let index: usize = index
                .parse()
                .map_err(|_| format!("bad group index in '{{{body}}}'"))?;
            let mode = Mode::parse(mode)
                .ok_or_else(|| format!("unknown mode in '{{{body}}}'"))?;
            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(Piece::Group { index, mode });
            rest = &after[close + 1..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        if pieces.is_empty() {
            return Err("empty template".to_string());
        }

        Ok(Self {
            pieces,
            raw: raw.to_string(),
        })
    }

    /// Highest capture-group index referenced by any placeholder
    pub fn max_group(&self) -> usize {
        self.pieces
            .iter()
            .filter_map(|p| match p {
                Piece::Group { index, .. } => Some(*index),
                Piece::Literal(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// The original template source
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Render the template against one regex match
    pub fn render(&self, caps: &regex::Captures<'_>, lexicon: &Lexicon) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Group { index, mode } => {
                    let Some(m) = caps.get(*index) else { continue };
                    let text = m.as_str();
                    let expanded = match mode {
                        Mode::Num => lexicon.expand_number_text(text),
                        Mode::Digits => lexicon.numbers().read_digits(text),
                        Mode::Spell => match lexicon.lookup(text) {
                            Some(expansion) => expansion.to_string(),
                            None => lexicon.spell_chars(text),
                        },
                        Mode::Chars => lexicon.spell_chars(text),
                        Mode::Frac => lexicon.numbers().expand_fraction(text),
                        Mode::Keep => text.to_string(),
                    };
                    out.push_str(&expanded);
                }
            }
        }
        // Placeholders may expand to empty; normalize the spacing.
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn render(pattern: &str, template: &str, input: &str) -> String {
        let lex = Lexicon::embedded().unwrap();
        let re = Regex::new(pattern).unwrap();
        let tpl = Template::parse(template).unwrap();
        let caps = re.captures(input).unwrap();
        tpl.render(&caps, &lex)
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Template::parse("ngày {1:num").is_err());
        assert!(Template::parse("{1}").is_err());
        assert!(Template::parse("{x:num}").is_err());
        assert!(Template::parse("{1:bogus}").is_err());
        assert!(Template::parse("").is_err());
    }

    #[test]
    fn test_max_group() {
        let tpl = Template::parse("ngày {1:num} tháng {2:num} năm {3:num}").unwrap();
        assert_eq!(tpl.max_group(), 3);
    }

    #[test]
    fn test_render_date() {
        let out = render(
            r"(\d{1,2})/(\d{1,2})/(\d{4})",
            "ngày {1:num} tháng {2:num} năm {3:num}",
            "25/12/2023",
        );
        assert_eq!(
            out,
            "ngày hai mươi lăm tháng mười hai năm hai nghìn không trăm hai mươi ba"
        );
    }

    #[test]
    fn test_render_spell_prefers_dictionary() {
        let out = render(r"([A-Z]{2,})", "{1:spell}", "WTO");
        assert_eq!(out, "vê kép tê ô");
        let out = render(r"([A-Z]{2,})", "{1:spell}", "UBND");
        assert_eq!(out, "ủy ban nhân dân");
    }

    #[test]
    fn test_render_keep_and_digits() {
        let out = render(r"(\d+)", "{1:keep}", "042");
        assert_eq!(out, "042");
        let out = render(r"(\d+)", "{1:digits}", "042");
        assert_eq!(out, "không bốn hai");
    }
}
