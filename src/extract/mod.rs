//! Action-item extraction engine.
//!
//! Turns free-form note text into a list of action items and a set of
//! `#tags`. Two rule sets are available:
//!
//! - [`LinePatternExtractor`]: list-aware. Bullets, checkboxes and numbered
//!   items always qualify; unmarked lines qualify through the fallback
//!   heuristic (trailing `!`, keyword cue, leading imperative verb). Results
//!   are deduplicated case-insensitively.
//! - [`KeywordExtractor`]: literal. A line qualifies only when it ends with
//!   `!` or starts with `todo:`. No deduplication. Also scans tags.
//!
//! Both are pure: no I/O, no shared mutable state, and every input (empty,
//! whitespace-only, malformed markup) yields a well-formed result.

mod keywords;
mod lines;
mod rules;
mod tags;


use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use keywords::KeywordExtractor;
pub use lines::LinePatternExtractor;
pub use rules::{ExtractionRules, RuleOverrides};
pub use tags::extract_tags;

/// Result of running an extractor over a block of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub action_items: Vec<String>,
    pub tags: BTreeSet<String>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.action_items.is_empty() && self.tags.is_empty()
    }
}

/// Which rule set to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractMode {
    /// List markers plus the imperative/keyword fallback, deduplicated.
    #[default]
    Lines,
    /// Trailing `!` or `todo:` prefix only, duplicates kept.
    Keywords,
}

impl fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractMode::Lines => write!(f, "lines"),
            ExtractMode::Keywords => write!(f, "keywords"),
        }
    }
}

impl FromStr for ExtractMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lines" => Ok(ExtractMode::Lines),
            "keywords" => Ok(ExtractMode::Keywords),
            _ => Err(format!(
                "Unknown extract mode: {} (expected 'lines' or 'keywords')",
                s
            )),
        }
    }
}

/// Both extractors behind one handle, built from a single set of rules.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    lines: LinePatternExtractor,
    keywords: KeywordExtractor,
}

impl Extractor {
    pub fn new(rules: ExtractionRules) -> Self {
        Self {
            lines: LinePatternExtractor::new(rules),
            keywords: KeywordExtractor,
        }
    }

    pub fn rules(&self) -> &ExtractionRules {
        self.lines.rules()
    }

    /// Action items only, using the list-aware rule set.
    pub fn action_items(&self, text: &str) -> Vec<String> {
        self.lines.extract(text)
    }

    /// Action items and tags using the literal keyword rule set.
    pub fn keywords(&self, text: &str) -> Extraction {
        self.keywords.extract(text)
    }

    /// Run the selected rule set. Tags are always scanned.
    pub fn extract(&self, text: &str, mode: ExtractMode) -> Extraction {
        match mode {
            ExtractMode::Lines => Extraction {
                action_items: self.lines.extract(text),
                tags: extract_tags(text),
            },
            ExtractMode::Keywords => self.keywords.extract(text),
        }
    }
}

/// Normalize `\r\n` and lone `\r` line endings to `\n`.
pub(crate) fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("lines".parse::<ExtractMode>(), Ok(ExtractMode::Lines));
        assert_eq!("KEYWORDS".parse::<ExtractMode>(), Ok(ExtractMode::Keywords));
        assert!("llm".parse::<ExtractMode>().is_err());
    }

    #[test]
    fn mode_display_round_trips_through_from_str() {
        for mode in [ExtractMode::Lines, ExtractMode::Keywords] {
            assert_eq!(mode.to_string().parse::<ExtractMode>(), Ok(mode));
        }
    }

    #[test]
    fn normalize_newlines_handles_all_conventions() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn extractor_lines_mode_also_reports_tags() {
        let extractor = Extractor::default();
        let result = extractor.extract("- Ship release #launch\nchat about lunch", ExtractMode::Lines);
        assert_eq!(result.action_items, vec!["Ship release #launch"]);
        assert!(result.tags.contains("launch"));
    }

    #[test]
    fn extractor_is_deterministic() {
        let extractor = Extractor::default();
        let text = "- [ ] Set up database\nFix the bug!\n#ops";
        for mode in [ExtractMode::Lines, ExtractMode::Keywords] {
            assert_eq!(extractor.extract(text, mode), extractor.extract(text, mode));
        }
    }

    #[test]
    fn empty_text_gives_empty_result_in_both_modes() {
        let extractor = Extractor::default();
        assert!(extractor.extract("", ExtractMode::Lines).is_empty());
        assert!(extractor.extract("", ExtractMode::Keywords).is_empty());
        assert!(extractor.extract(" \n\t\n ", ExtractMode::Lines).is_empty());
    }

    #[test]
    fn extraction_serializes_with_expected_keys() {
        let extractor = Extractor::default();
        let json = serde_json::to_value(extractor.keywords("Ship it!\n#release")).unwrap();
        assert_eq!(json["action_items"], serde_json::json!(["Ship it!"]));
        assert_eq!(json["tags"], serde_json::json!(["release"]));
    }
}
