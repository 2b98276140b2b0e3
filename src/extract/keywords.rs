use super::tags::extract_tags;
use super::{Extraction, normalize_newlines};

const TODO_PREFIX: &str = "todo:";

/// Literal extractor: `!`-terminated or `todo:`-prefixed lines, plus tags.
///
/// Lines only have `-` and space characters stripped from both ends; the
/// rule is not list-aware and keeps duplicates in their original order.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor;

impl KeywordExtractor {
    pub fn extract(&self, text: &str) -> Extraction {
        let normalized = normalize_newlines(text);

        let action_items = normalized
            .lines()
            .map(|line| line.trim_matches(|c: char| c == '-' || c == ' '))
            .filter(|line| !line.is_empty())
            .filter(|line| line.ends_with('!') || line.to_lowercase().starts_with(TODO_PREFIX))
            .map(str::to_string)
            .collect();

        Extraction {
            action_items,
            tags: extract_tags(text),
        }
    }
}
