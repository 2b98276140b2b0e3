//! Domain models for the jot database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use serde::{Deserialize, Serialize};

use crate::validation::{Validate, ValidationError, min_length, min_length_if_present};

/// Row identifier. SQLite assigns these on insert.
pub type Id = i64;

// =============================================================================
// Notes
// =============================================================================

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Id,
    pub title: String,
    pub content: String,
    /// Tags collected from applied extractions, sorted and unique.
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags: Vec::new(),
        }
    }
}

impl Validate for NewNote {
    fn validate(&self) -> Result<(), ValidationError> {
        min_length("title", &self.title, 1)?;
        min_length("content", &self.content, 1)
    }
}

/// Partial update for a note. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }

    pub(crate) fn merge_into(self, target: &mut Note) {
        if let Some(title) = self.title {
            target.title = title;
        }
        if let Some(content) = self.content {
            target.content = content;
        }
        if let Some(tags) = self.tags {
            target.tags = normalize_tags(tags);
        }
    }
}

impl Validate for NoteUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        min_length_if_present("title", self.title.as_deref(), 1)?;
        min_length_if_present("content", self.content.as_deref(), 1)
    }
}

/// Sort and deduplicate a tag list.
pub fn normalize_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut tags: Vec<String> = tags.into_iter().filter(|t| !t.is_empty()).collect();
    tags.sort();
    tags.dedup();
    tags
}

// =============================================================================
// Action items
// =============================================================================

/// A stored action item, optionally linked to the note it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: Id,
    /// Originating note. Cleared when that note is deleted.
    pub note_id: Option<Id>,
    pub description: String,
    pub completed: bool,
    pub created_at: String,
    pub completed_at: Option<String>,
}

/// Input for creating an action item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActionItem {
    #[serde(default)]
    pub note_id: Option<Id>,
    pub description: String,
}

impl NewActionItem {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            note_id: None,
            description: description.into(),
        }
    }

    pub fn for_note(note_id: Id, description: impl Into<String>) -> Self {
        Self {
            note_id: Some(note_id),
            description: description.into(),
        }
    }
}

impl Validate for NewActionItem {
    fn validate(&self) -> Result<(), ValidationError> {
        min_length("description", &self.description, 1)
    }
}

/// Partial update for an action item.
///
/// `note_id` distinguishes "leave alone" (`None`) from "unlink"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionItemUpdate {
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub note_id: Option<Option<Id>>,
}

impl ActionItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.completed.is_none() && self.note_id.is_none()
    }
}

impl Validate for ActionItemUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        min_length_if_present("description", self.description.as_deref(), 1)
    }
}

/// Filters for listing action items. All filters are ANDed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionItemQuery {
    pub note_id: Option<Id>,
    pub completed: Option<bool>,
}
