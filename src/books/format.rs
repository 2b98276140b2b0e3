//! Plain-text rendering of catalog responses.

use serde::Deserialize;

pub const NO_RESULTS: &str = "No books found for that query.";

const SUBJECTS_MAX_CHARS: usize = 200;

/// One hit from `/search.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchDoc {
    pub title: Option<String>,
    pub author_name: Option<Vec<String>>,
    pub first_publish_year: Option<i64>,
    /// Catalog key such as `/works/OL27448W`.
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// Work or edition record from `/works/{id}.json` or `/isbn/{id}.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookDetails {
    pub title: Option<String>,
    pub description: Option<Description>,
    pub subjects: Option<Vec<String>>,
}

/// Open Library stores descriptions either as a bare string or as a typed
/// `{ "type": "/type/text", "value": "..." }` object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Typed { value: Option<String> },
}

impl Description {
    fn text(&self) -> Option<&str> {
        match self {
            Description::Text(s) => Some(s),
            Description::Typed { value } => value.as_deref(),
        }
    }
}

impl SearchDoc {
    /// `- {title} by {authors} ({year}) [Work ID: {id}]`
    pub fn line(&self) -> String {
        let title = self.title.as_deref().unwrap_or("Unknown Title");
        let authors = match &self.author_name {
            Some(names) => names.join(", "),
            None => "Unknown Author".to_string(),
        };
        let year = self
            .first_publish_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown Year".to_string());
        let work_id = self
            .key
            .as_deref()
            .and_then(|k| k.rsplit('/').next())
            .unwrap_or("");

        format!("- {title} by {authors} ({year}) [Work ID: {work_id}]")
    }
}

/// Render at most `limit` hits, one per line.
pub fn format_search(docs: &[SearchDoc], limit: usize) -> String {
    if docs.is_empty() {
        return NO_RESULTS.to_string();
    }
    docs.iter()
        .take(limit)
        .map(SearchDoc::line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render title, description and subjects as blank-line separated blocks.
pub fn format_details(details: &BookDetails) -> String {
    let title = details.title.as_deref().unwrap_or("Unknown Title");
    let description = details
        .description
        .as_ref()
        .and_then(Description::text)
        .unwrap_or("No description available.");

    let subjects = match &details.subjects {
        Some(list) => list.join(", "),
        None => "None listed".to_string(),
    };
    let mut subjects: String = subjects.chars().take(SUBJECTS_MAX_CHARS).collect();
    if subjects.chars().count() >= SUBJECTS_MAX_CHARS {
        subjects.push_str("...");
    }

    [
        format!("Title: {title}"),
        format!("Description: {description}"),
        format!("Subjects: {subjects}"),
    ]
    .join("\n\n")
}
