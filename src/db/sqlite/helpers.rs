//! Shared row mapping for SQLite repositories.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::db::{ActionItem, DbError, DbResult, Note};

pub(super) const NOTE_COLUMNS: &str = "id, title, content, tags, created_at, updated_at";

pub(super) const ACTION_ITEM_COLUMNS: &str =
    "id, note_id, description, completed, created_at, completed_at";

/// Serialize a tag list for the JSON `tags` column.
pub(super) fn tags_to_json(tags: &[String]) -> DbResult<String> {
    serde_json::to_string(tags).map_err(|e| DbError::InvalidData {
        message: format!("Failed to serialize tags: {}", e),
    })
}

/// Parse the JSON `tags` column. NULL or blank reads as no tags.
pub(super) fn tags_from_json(raw: Option<&str>) -> DbResult<Vec<String>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json).map_err(|e| DbError::InvalidData {
            message: format!("Failed to parse tags JSON: {}", e),
        }),
    }
}

pub(super) fn note_from_row(row: &SqliteRow) -> DbResult<Note> {
    let tags: Option<String> = row.try_get("tags")?;
    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        tags: tags_from_json(tags.as_deref())?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(super) fn action_item_from_row(row: &SqliteRow) -> DbResult<ActionItem> {
    Ok(ActionItem {
        id: row.try_get("id")?,
        note_id: row.try_get("note_id")?,
        description: row.try_get("description")?,
        completed: row.try_get("completed")?,
        created_at: row.try_get("created_at")?,
        completed_at: row.try_get("completed_at")?,
    })
}
