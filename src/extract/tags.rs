use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w+)").unwrap());

/// Collect every `#word` token in `text`, without the `#`.
pub fn extract_tags(text: &str) -> BTreeSet<String> {
    TAG_PATTERN
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
