//! Output assembly: punctuation policy, casing, sentence joining

use crate::config::NormalizeOptions;
use crate::engine::NormalizedSentence;

/// Marker separating normalized sentences in the engine's output blob
///
/// Legacy wire format; downstream consumers split on it and re-join with
/// their own separator. No delimiter follows the final sentence.
pub const SENTENCE_DELIMITER: &str = "#line#";

/// Assemble the final output blob from per-sentence results
///
/// Applies, in order: punctuation stripping (unless `keep_punctuation`),
/// lowercasing (if `lowercase_output`), delimiter joining, and the
/// optional trailing terminator.
pub fn format(sentences: &[NormalizedSentence], options: &NormalizeOptions) -> String {
    let rendered: Vec<String> = sentences
        .iter()
        .map(|s| s.render(options.keep_punctuation))
        .filter(|text| !text.is_empty())
        .collect();

    let mut out = rendered.join(SENTENCE_DELIMITER);
    if options.lowercase_output {
        out = out.to_lowercase();
    }
    if options.trailing_terminator && !out.is_empty() && !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::rules::RuleSet;

    fn normalized(texts: &[&str], options: &NormalizeOptions) -> Vec<NormalizedSentence> {
        let rules = RuleSet::embedded().unwrap();
        let lexicon = Lexicon::embedded().unwrap();
        texts
            .iter()
            .map(|t| crate::engine::normalize_sentence(t, &rules, &lexicon, options))
            .collect()
    }

    #[test]
    fn test_join_with_delimiter_no_trailing() {
        let options = NormalizeOptions::default();
        let sentences = normalized(&["một hai.", "ba bốn."], &options);
        let out = format(&sentences, &options);
        assert_eq!(out, "một hai#line#ba bốn");
        assert!(!out.ends_with(SENTENCE_DELIMITER));
    }

    #[test]
    fn test_lowercase_applied() {
        let options = NormalizeOptions::default();
        let sentences = normalized(&["Xin Chào."], &options);
        assert_eq!(format(&sentences, &options), "xin chào");
    }

    #[test]
    fn test_casing_preserved_when_disabled() {
        let options = NormalizeOptions::builder().lowercase_output(false).build();
        let sentences = normalized(&["Xin Chào."], &options);
        assert_eq!(format(&sentences, &options), "Xin Chào");
    }

    #[test]
    fn test_trailing_terminator_opt_in() {
        let options = NormalizeOptions::builder().trailing_terminator(true).build();
        let sentences = normalized(&["xin chào"], &options);
        assert_eq!(format(&sentences, &options), "xin chào.");
    }

    #[test]
    fn test_trailing_terminator_not_doubled() {
        let options = NormalizeOptions::builder()
            .keep_punctuation(true)
            .trailing_terminator(true)
            .build();
        let sentences = normalized(&["xin chào."], &options);
        assert_eq!(format(&sentences, &options), "xin chào.");
    }

    #[test]
    fn test_empty_input_empty_output() {
        let options = NormalizeOptions::default();
        let out = format(&[], &options);
        assert_eq!(out, "");
    }
}
