use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::normalize_newlines;
use super::rules::ExtractionRules;

/// `-`/`*` bullet or `1.` ordinal, either one optionally followed by a
/// `[ ]`/`[x]` checkbox. Capture 1 (after a checkbox) or 2 is the item text.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-*]|\d+\.)(?:\s*\[[ xX]\](?:\s*(.*))?|(?:\s+(.*))?)$").unwrap()
});

/// List-aware extractor with an imperative/keyword fallback for unmarked lines.
#[derive(Debug, Clone, Default)]
pub struct LinePatternExtractor {
    rules: ExtractionRules,
}

impl LinePatternExtractor {
    pub fn new(rules: ExtractionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ExtractionRules {
        &self.rules
    }

    /// Ordered, case-insensitively deduplicated action items found in `text`.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let normalized = normalize_newlines(text);
        let mut items = Vec::new();

        for line in normalized.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match strip_list_marker(line) {
                Some("") => {}
                Some(rest) => items.push(rest.to_string()),
                None => self.classify_unmarked(line, &mut items),
            }
        }

        dedup_case_insensitive(items)
    }

    fn classify_unmarked(&self, line: &str, items: &mut Vec<String>) {
        if line.ends_with('!') || self.rules.starts_with_cue(line) {
            let body = self.rules.strip_cue(line).unwrap_or(line);
            if body.chars().any(char::is_alphanumeric) {
                items.push(line.to_string());
            }
            return;
        }

        for sentence in split_sentences(line) {
            let leads_with_verb = sentence
                .split_whitespace()
                .next()
                .is_some_and(|word| self.rules.is_imperative(word));
            if leads_with_verb {
                items.push(sentence.to_string());
            }
        }
    }
}

/// Item text after a list marker (possibly empty), or `None` for unmarked lines.
fn strip_list_marker(line: &str) -> Option<&str> {
    LIST_MARKER
        .captures(line)
        .map(|cap| {
            cap.get(1)
                .or_else(|| cap.get(2))
                .map_or("", |m| m.as_str().trim())
        })
}

/// Split on `.`, `!` or `?` followed by whitespace, keeping the terminator.
fn split_sentences(line: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|(_, next)| next.is_whitespace());
        if at_boundary {
            let end = idx + c.len_utf8();
            sentences.push(line[start..end].trim());
            start = end;
        }
    }
    sentences.push(line[start..].trim());
    sentences.retain(|s| !s.is_empty());
    sentences
}

fn dedup_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
