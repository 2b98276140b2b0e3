//! MCP tool implementations
//!
//! Each module adds one `#[tool_router]` impl block to [`McpServer`] with its
//! own named router; `McpServer::new` sums them.
//!
//! [`McpServer`]: super::McpServer

mod action_items;
mod books;
mod extract;
mod notes;


pub use action_items::{CompleteActionItemParams, ListActionItemsParams};
pub use books::{BookDetailsParams, SearchBooksParams};
pub use extract::ExtractParams;
pub use notes::{
    CreateNoteParams, DeleteNoteParams, GetNoteParams, ListNotesParams, SearchNotesParams,
    UpdateNoteParams,
};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use serde_json::json;

use crate::db::DbError;
use crate::validation::ValidationError;

/// Map a storage error onto the matching MCP error code.
pub(crate) fn map_db_error(e: DbError) -> McpError {
    match e {
        DbError::NotFound { entity_type, id } => McpError::resource_not_found(
            format!("{} '{}' not found", entity_type, id),
            Some(json!({ "entity_type": entity_type, "id": id })),
        ),
        DbError::Validation { message } => McpError::invalid_params(message, None),
        other => McpError::internal_error(
            "database_error",
            Some(json!({ "error": other.to_string() })),
        ),
    }
}

pub(crate) fn map_validation_error(e: ValidationError) -> McpError {
    McpError::invalid_params(e.to_string(), Some(json!({ "field": e.field })))
}

/// Pretty-printed JSON as a single text content block.
pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let content = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(
            "serialization_error",
            Some(json!({ "error": e.to_string() })),
        )
    })?;
    Ok(CallToolResult::success(vec![Content::text(content)]))
}
