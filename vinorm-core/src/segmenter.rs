//! Sentence segmentation and tokenization
//!
//! Segmentation yields borrowed slices of the input, lazily; each
//! sentence can be normalized independently and in any order. The
//! tokenizer preserves the exact original text of every span so that
//! anything no rule touches survives the rewrite verbatim.

/// Classification of a token span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Alphabetic or mixed alphanumeric run
    Word,
    /// Pure ASCII digit run
    Number,
    /// Single punctuation character
    Punctuation,
    /// Single non-alphanumeric, non-punctuation character
    Symbol,
    /// Whitespace run
    Whitespace,
}

/// A contiguous span of one sentence
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    /// The exact original text of the span
    pub text: &'a str,
    /// Byte offset of the span start within the sentence
    pub start: usize,
    /// Byte offset one past the span end
    pub end: usize,
    /// Span classification
    pub class: TokenClass,
}

/// One sentence of the input text
#[derive(Debug, Clone, Copy)]
pub struct Sentence<'a> {
    /// Trimmed sentence text, terminal punctuation included
    pub text: &'a str,
    /// Byte offset of `text` within the original input
    pub start: usize,
}

/// Characters that end a sentence
const TERMINALS: [char; 3] = ['.', '!', '?'];

/// Characters tokenized as punctuation
const PUNCTUATION: [char; 16] = [
    '.', ',', ';', ':', '!', '?', '…', '"', '\'', '(', ')', '[', ']', '“', '”', '’',
];

/// Split text into sentences
///
/// The returned iterator is lazy and restartable: calling `segment`
/// again on the same text yields the same sentences.
pub fn segment(text: &str) -> Sentences<'_> {
    Sentences { text, pos: 0 }
}

/// Lazy sentence iterator returned by [`segment`]
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = Sentence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let start = self.pos;
            let end = match find_boundary(self.text, start) {
                Some(end) => end,
                None => self.text.len(),
            };
            self.pos = end;
            if let Some(sentence) = trim_span(self.text, start, end) {
                return Some(sentence);
            }
        }
        None
    }
}

/// Find the end (exclusive) of the sentence starting at `start`
fn find_boundary(text: &str, start: usize) -> Option<usize> {
    for (i, c) in text[start..].char_indices() {
        let at = start + i;
        if TERMINALS.contains(&c) && is_boundary(text, at, c) {
            return Some(at + c.len_utf8());
        }
    }
    None
}

/// Decide whether the terminal character at `at` really ends a sentence
fn is_boundary(text: &str, at: usize, c: char) -> bool {
    let after = &text[at + c.len_utf8()..];
    let next = after.chars().next();

    if c == '.' {
        let prev = text[..at].chars().next_back();
        // Decimal point or dotted number grouping.
        if let (Some(p), Some(n)) = (prev, next) {
            if p.is_ascii_digit() && n.is_ascii_digit() {
                return false;
            }
        }
        // Intra-word dot, e.g. domain names.
        if next.is_some_and(|n| n.is_alphanumeric()) {
            return false;
        }
        // Dot attached to a short all-uppercase run reads as an
        // abbreviation ("TP. Hồ Chí Minh"), not a boundary.
        if is_abbreviation_before(text, at) {
            return false;
        }
    }

    // Inside a terminal run ("...", "?!") only the last character ends
    // the sentence.
    if next.is_some_and(|n| TERMINALS.contains(&n)) {
        return false;
    }

    // A lowercase continuation means the terminator did not end the
    // sentence.
    let next_word = after.chars().find(|ch| !ch.is_whitespace());
    !next_word.is_some_and(|ch| ch.is_lowercase())
}

/// Whether the characters directly before `at` form a short all-uppercase
/// abbreviation
fn is_abbreviation_before(text: &str, at: usize) -> bool {
    let run: Vec<char> = text[..at]
        .chars()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .collect();
    !run.is_empty() && run.len() <= 4 && run.iter().all(|c| c.is_uppercase())
}

/// Trim a raw span to a non-empty sentence
fn trim_span(text: &str, start: usize, end: usize) -> Option<Sentence<'_>> {
    let raw = &text[start..end];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let offset = raw.len() - raw.trim_start().len();
    Some(Sentence {
        text: trimmed,
        start: start + offset,
    })
}

/// Split a sentence into classified tokens
///
/// Whitespace runs and alphanumeric runs are maximal; punctuation and
/// symbols are single-character tokens. Offsets are relative to the
/// sentence text.
pub fn tokenize(sentence: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut iter = sentence.char_indices().peekable();

    while let Some(&(start, c)) = iter.peek() {
        if c.is_whitespace() {
            let end = consume_while(&mut iter, char::is_whitespace);
            tokens.push(Token {
                text: &sentence[start..end],
                start,
                end,
                class: TokenClass::Whitespace,
            });
        } else if c.is_alphanumeric() {
            let end = consume_while(&mut iter, char::is_alphanumeric);
            let text = &sentence[start..end];
            let class = if text.bytes().all(|b| b.is_ascii_digit()) {
                TokenClass::Number
            } else {
                TokenClass::Word
            };
            tokens.push(Token { text, start, end, class });
        } else {
            iter.next();
            let end = start + c.len_utf8();
            let class = if PUNCTUATION.contains(&c) {
                TokenClass::Punctuation
            } else {
                TokenClass::Symbol
            };
            tokens.push(Token {
                text: &sentence[start..end],
                start,
                end,
                class,
            });
        }
    }
    tokens
}

fn consume_while(
    iter: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    pred: fn(char) -> bool,
) -> usize {
    let mut end = 0;
    while let Some(&(i, c)) = iter.peek() {
        if !pred(c) {
            return i;
        }
        end = i + c.len_utf8();
        iter.next();
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<&str> {
        segment(input).map(|s| s.text).collect()
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(texts("").is_empty());
        assert!(texts("   \n  ").is_empty());
    }

    #[test]
    fn test_basic_split() {
        let got = texts("Trời mưa. Tôi ở nhà!");
        assert_eq!(got, vec!["Trời mưa.", "Tôi ở nhà!"]);
    }

    #[test]
    fn test_no_terminal_yields_one_sentence() {
        assert_eq!(texts("không có dấu chấm"), vec!["không có dấu chấm"]);
    }

    #[test]
    fn test_decimal_not_split() {
        assert_eq!(texts("Giá 3.5 triệu đồng."), vec!["Giá 3.5 triệu đồng."]);
    }

    #[test]
    fn test_domain_not_split() {
        assert_eq!(
            texts("Xem tại www.example.com nhé."),
            vec!["Xem tại www.example.com nhé."]
        );
    }

    #[test]
    fn test_abbreviation_dot_not_split() {
        assert_eq!(
            texts("TP. Hồ Chí Minh rất lớn."),
            vec!["TP. Hồ Chí Minh rất lớn."]
        );
    }

    #[test]
    fn test_lowercase_continuation_not_split() {
        // "..." mid-thought followed by lowercase keeps the sentence open.
        assert_eq!(texts("Chờ đã... rồi đi tiếp."), vec!["Chờ đã... rồi đi tiếp."]);
    }

    #[test]
    fn test_ellipsis_then_uppercase_splits_once() {
        let got = texts("Thôi... Về nhà đi.");
        assert_eq!(got, vec!["Thôi...", "Về nhà đi."]);
    }

    #[test]
    fn test_restartable() {
        let input = "Một. Hai. Ba.";
        let first: Vec<_> = segment(input).map(|s| s.text).collect();
        let second: Vec<_> = segment(input).map(|s| s.text).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_sentence_offsets() {
        let input = "  Một. Hai.";
        let sentences: Vec<_> = segment(input).collect();
        assert_eq!(sentences[0].start, 2);
        assert_eq!(&input[sentences[0].start..sentences[0].start + sentences[0].text.len()], "Một.");
    }

    #[test]
    fn test_tokenize_classes() {
        let tokens = tokenize("Ngày 25/12, giá 5$ tại TP.");
        let classes: Vec<(&str, TokenClass)> = tokens
            .iter()
            .filter(|t| t.class != TokenClass::Whitespace)
            .map(|t| (t.text, t.class))
            .collect();
        assert_eq!(
            classes,
            vec![
                ("Ngày", TokenClass::Word),
                ("25", TokenClass::Number),
                ("/", TokenClass::Symbol),
                ("12", TokenClass::Number),
                (",", TokenClass::Punctuation),
                ("giá", TokenClass::Word),
                ("5", TokenClass::Number),
                ("$", TokenClass::Symbol),
                ("tại", TokenClass::Word),
                ("TP", TokenClass::Word),
                (".", TokenClass::Punctuation),
            ]
        );
    }

    #[test]
    fn test_tokenize_mixed_alnum_is_word() {
        let tokens = tokenize("xyz123abc");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].class, TokenClass::Word);
        assert_eq!(tokens[0].text, "xyz123abc");
    }

    #[test]
    fn test_tokenize_preserves_offsets() {
        let sentence = "ab  12";
        let tokens = tokenize(sentence);
        for t in &tokens {
            assert_eq!(&sentence[t.start..t.end], t.text);
        }
    }
}
