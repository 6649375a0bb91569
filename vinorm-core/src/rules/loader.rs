//! Line-oriented rule file parsing
//!
//! One file per category, tab-delimited fields per rule:
//! `priority \t pattern \t template`. Blank lines and `#` comments are
//! skipped. A malformed definition is skipped and logged, never fatal by
//! itself.

use super::template::Template;
use super::{Rule, RuleCategory};
use crate::error::CoreError;
use regex::Regex;

/// Parse one category's rule file content
///
/// Returns the usable rules in matching order (descending priority,
/// file order on ties) plus the per-rule failures that were skipped.
pub(crate) fn load_category(
    category: RuleCategory,
    content: &str,
) -> (Vec<Rule>, Vec<CoreError>) {
    let mut rules = Vec::new();
    let mut skipped = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_line(category, trimmed) {
            Ok(rule) => rules.push(rule),
            Err(reason) => {
                let err = CoreError::RuleCompile {
                    file: category.file_name().to_string(),
                    line: lineno + 1,
                    reason,
                };
                log::warn!("skipping rule: {err}");
                skipped.push(err);
            }
        }
    }

    rules.sort_by_key(|r| std::cmp::Reverse(r.priority));
    (rules, skipped)
}

fn parse_line(category: RuleCategory, line: &str) -> Result<Rule, String> {
    let mut fields = line.splitn(3, '\t');
    let (Some(priority), Some(pattern), Some(template)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Err("expected 3 tab-separated fields".to_string());
    };

    let priority: i32 = priority
        .trim()
        .parse()
        .map_err(|_| format!("bad priority '{}'", priority.trim()))?;
    let regex = Regex::new(pattern.trim()).map_err(|e| e.to_string())?;
    let template = Template::parse(template.trim())?;

    if template.max_group() >= regex.captures_len() {
        return Err(format!(
            "template references group {} but pattern has {}",
            template.max_group(),
            regex.captures_len() - 1
        ));
    }

    Ok(Rule {
        regex,
        template,
        category,
        priority,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_valid_line() {
        let (rules, skipped) =
            load_category(RuleCategory::Number, "10\t(\\d+)\t{1:num}\n");
        assert_eq!(rules.len(), 1);
        assert!(skipped.is_empty());
        assert_eq!(rules[0].priority, 10);
        assert_eq!(rules[0].pattern(), r"(\d+)");
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let content = "# header\n\n10\t(\\d+)\t{1:num}\n";
        let (rules, skipped) = load_category(RuleCategory::Number, content);
        assert_eq!(rules.len(), 1);
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_sorts_by_descending_priority() {
        let content = "10\t(\\d+)\t{1:num}\n40\t(0\\d{8,10})\t{1:digits}\n";
        let (rules, _) = load_category(RuleCategory::Number, content);
        assert_eq!(rules[0].priority, 40);
        assert_eq!(rules[1].priority, 10);
    }

    #[test]
    fn test_bad_regex_skipped() {
        let (rules, skipped) =
            load_category(RuleCategory::Number, "10\t(\\d+\t{1:num}\n");
        assert!(rules.is_empty());
        assert_eq!(skipped.len(), 1);
    }

    #[test]
    fn test_group_out_of_range_skipped() {
        let (rules, skipped) =
            load_category(RuleCategory::Number, "10\t(\\d+)\t{2:num}\n");
        assert!(rules.is_empty());
        assert_eq!(skipped.len(), 1);
    }

    #[test]
    fn test_missing_field_skipped() {
        let (rules, skipped) = load_category(RuleCategory::Number, "10\t(\\d+)\n");
        assert!(rules.is_empty());
        assert_eq!(skipped.len(), 1);
    }
}
