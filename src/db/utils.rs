//! Database utility functions.

use chrono::Utc;

/// Current UTC time in the `YYYY-MM-DD HH:MM:SS` format stored in SQLite.
pub fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Escape `%`, `_` and `\` and wrap the term for a `LIKE ... ESCAPE '\'` match.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
