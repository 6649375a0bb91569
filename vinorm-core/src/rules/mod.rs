//! Pattern rules: categories, precedence, and the loaded rule set
//!
//! Rules are loaded once, compiled once, and read-only afterwards.
//! Precedence is explicit: categories are tried in a fixed order and
//! rules within a category by descending priority (file order breaks
//! ties), so overlapping patterns resolve deterministically instead of
//! depending on load order.

mod loader;
mod template;

pub use template::{Mode, Template};

use crate::error::{CoreError, Result};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Pattern categories, one rule file each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Calendar dates (dd/mm/yyyy, mm/yyyy, dd/mm)
    Date,
    /// Times of day (hh:mm:ss, 3h30)
    Time,
    /// Money amounts with a currency marker
    Currency,
    /// Numeric ranges (5-10)
    Range,
    /// Plain numbers, fractions, decimals, percentages, phone digits
    Number,
    /// Uppercase acronym spelling
    Acronym,
    /// URLs and email addresses
    Uri,
}

impl RuleCategory {
    /// Fixed matching precedence, highest first
    ///
    /// Structured formats come before generic numbers so `12/2020` is a
    /// date, not a fraction; that tie-break is designed, not incidental.
    pub const PRECEDENCE: [RuleCategory; 7] = [
        RuleCategory::Date,
        RuleCategory::Time,
        RuleCategory::Currency,
        RuleCategory::Range,
        RuleCategory::Number,
        RuleCategory::Acronym,
        RuleCategory::Uri,
    ];

    /// Categories that must end up non-empty after loading
    pub const MANDATORY: [RuleCategory; 1] = [RuleCategory::Number];

    /// Short name used in traces and errors
    pub fn name(self) -> &'static str {
        match self {
            RuleCategory::Date => "date",
            RuleCategory::Time => "time",
            RuleCategory::Currency => "currency",
            RuleCategory::Range => "range",
            RuleCategory::Number => "number",
            RuleCategory::Acronym => "acronym",
            RuleCategory::Uri => "uri",
        }
    }

    /// Rule file carrying this category's definitions
    pub fn file_name(self) -> &'static str {
        match self {
            RuleCategory::Date => "date.rules",
            RuleCategory::Time => "time.rules",
            RuleCategory::Currency => "currency.rules",
            RuleCategory::Range => "range.rules",
            RuleCategory::Number => "number.rules",
            RuleCategory::Acronym => "acronym.rules",
            RuleCategory::Uri => "uri.rules",
        }
    }

    fn index(self) -> usize {
        Self::PRECEDENCE.iter().position(|c| *c == self).expect("category in table")
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One compiled rewrite rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) regex: Regex,
    pub(crate) template: Template,
    /// Category the rule belongs to
    pub category: RuleCategory,
    /// Priority within the category, higher first
    pub priority: i32,
}

impl Rule {
    /// The rule's pattern source
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// The rule's rewrite template source
    pub fn template(&self) -> &str {
        self.template.raw()
    }
}

/// Category-partitioned, priority-ordered rule collection
#[derive(Debug)]
pub struct RuleSet {
    categories: Vec<Vec<Rule>>,
    skipped: Vec<CoreError>,
}

impl RuleSet {
    /// Load the embedded default rule files
    pub fn embedded() -> Result<Self> {
        let sources = RuleCategory::PRECEDENCE.map(|category| {
            let content = match category {
                RuleCategory::Date => include_str!("../../data/rules/date.rules"),
                RuleCategory::Time => include_str!("../../data/rules/time.rules"),
                RuleCategory::Currency => include_str!("../../data/rules/currency.rules"),
                RuleCategory::Range => include_str!("../../data/rules/range.rules"),
                RuleCategory::Number => include_str!("../../data/rules/number.rules"),
                RuleCategory::Acronym => include_str!("../../data/rules/acronym.rules"),
                RuleCategory::Uri => include_str!("../../data/rules/uri.rules"),
            };
            (category, content.to_string())
        });
        Self::from_sources(sources)
    }

    /// Load rule files from an external directory
    ///
    /// A missing category file leaves that category empty (logged); only
    /// an empty mandatory category is fatal.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let rules_dir = dir.join("rules");
        let base = if rules_dir.is_dir() { rules_dir } else { dir.to_path_buf() };
        if !base.is_dir() {
            return Err(CoreError::DataDir {
                path: base.display().to_string(),
            });
        }
        let sources = RuleCategory::PRECEDENCE.map(|category| {
            let path = base.join(category.file_name());
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("rule file {} unreadable: {e}", path.display());
                    String::new()
                }
            };
            (category, content)
        });
        Self::from_sources(sources)
    }

    fn from_sources(sources: [(RuleCategory, String); 7]) -> Result<Self> {
        let mut categories = Vec::with_capacity(sources.len());
        let mut skipped = Vec::new();
        for (category, content) in &sources {
            let (rules, errors) = loader::load_category(*category, content);
            skipped.extend(errors);
            categories.push(rules);
        }

        for category in RuleCategory::MANDATORY {
            if categories[category.index()].is_empty() {
                return Err(CoreError::RuleSetEmpty {
                    category: category.name().to_string(),
                });
            }
        }

        Ok(Self { categories, skipped })
    }

    /// Rules of one category, priority order
    pub fn rules(&self, category: RuleCategory) -> &[Rule] {
        &self.categories[category.index()]
    }

    /// All rules in matching precedence order
    pub fn iter_precedence(&self) -> impl Iterator<Item = &Rule> {
        self.categories.iter().flatten()
    }

    /// Rule definitions that failed to parse or compile and were skipped
    pub fn skipped(&self) -> &[CoreError] {
        &self.skipped
    }

    /// Total number of usable rules
    pub fn len(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Whether no rules loaded at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
