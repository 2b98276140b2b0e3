//! Classification rules for the fallback heuristic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DEFAULT_IMPERATIVE_VERBS: &[&str] = &[
    "add",
    "book",
    "buy",
    "call",
    "check",
    "clean",
    "create",
    "deploy",
    "draft",
    "email",
    "finish",
    "fix",
    "implement",
    "merge",
    "plan",
    "prepare",
    "refactor",
    "remove",
    "review",
    "schedule",
    "send",
    "set",
    "submit",
    "test",
    "update",
    "write",
];

const DEFAULT_KEYWORD_CUES: &[&str] = &["todo:", "action:", "next:"];

/// Allow-list of imperative verbs (word -> enabled) and keyword cues.
///
/// Verbs and cues are stored lowercase; matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRules {
    pub imperative_verbs: BTreeMap<String, bool>,
    pub keyword_cues: Vec<String>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            imperative_verbs: DEFAULT_IMPERATIVE_VERBS
                .iter()
                .map(|verb| (verb.to_string(), true))
                .collect(),
            keyword_cues: DEFAULT_KEYWORD_CUES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Partial rules read from a config file, layered over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleOverrides {
    /// Entries are merged into the default allow-list; `false` disables a verb.
    pub imperative_verbs: BTreeMap<String, bool>,
    /// Replaces the default cues when present.
    pub keyword_cues: Option<Vec<String>>,
}

impl ExtractionRules {
    pub fn with_verb(mut self, verb: &str, enabled: bool) -> Self {
        self.imperative_verbs
            .insert(verb.trim().to_lowercase(), enabled);
        self
    }

    pub fn with_keyword_cues<I, S>(mut self, cues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keyword_cues = cues
            .into_iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        self
    }

    pub fn apply(mut self, overrides: RuleOverrides) -> Self {
        for (verb, enabled) in overrides.imperative_verbs {
            self = self.with_verb(&verb, enabled);
        }
        if let Some(cues) = overrides.keyword_cues {
            self = self.with_keyword_cues(cues);
        }
        self
    }

    /// True when `word` (ignoring surrounding punctuation) is an enabled verb.
    pub fn is_imperative(&self, word: &str) -> bool {
        let word = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        self.imperative_verbs.get(&word).copied().unwrap_or(false)
    }

    pub fn starts_with_cue(&self, line: &str) -> bool {
        self.strip_cue(line).is_some()
    }

    /// Text after the first matching keyword cue, if the line starts with one.
    pub fn strip_cue<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.keyword_cues.iter().find_map(|cue| {
            let head = line.get(..cue.len())?;
            (head.to_lowercase() == *cue).then(|| &line[cue.len()..])
        })
    }

    pub fn enabled_verbs(&self) -> impl Iterator<Item = &str> {
        self.imperative_verbs
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(verb, _)| verb.as_str())
    }
}
