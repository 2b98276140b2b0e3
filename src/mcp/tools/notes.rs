//! Note tools.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::Deserialize;
use tracing::info;

use super::{json_result, map_db_error, map_validation_error};
use crate::db::{Database, Id, NewNote, NoteRepository, NoteUpdate};
use crate::mcp::McpServer;
use crate::validation::Validate;

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListNotesParams {
    #[schemars(description = "Maximum number of notes to return, newest first")]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetNoteParams {
    #[schemars(description = "Note ID")]
    pub note_id: Id,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateNoteParams {
    #[schemars(description = "Note title (required, non-empty)")]
    pub title: String,
    #[schemars(description = "Note body (required, non-empty)")]
    pub content: String,
    #[schemars(description = "Optional tags")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateNoteParams {
    #[schemars(description = "Note ID")]
    pub note_id: Id,
    #[schemars(description = "New title")]
    pub title: Option<String>,
    #[schemars(description = "New body")]
    pub content: Option<String>,
    #[schemars(description = "Replacement tag list")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteNoteParams {
    #[schemars(description = "Note ID")]
    pub note_id: Id,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchNotesParams {
    #[schemars(description = "Case-insensitive text to look for in titles and bodies")]
    pub query: String,
    #[schemars(description = "Maximum number of notes to return")]
    pub limit: Option<usize>,
}

#[tool_router(router = note_router, vis = "pub(crate)")]
impl<D: Database + 'static> McpServer<D> {
    #[tool(description = "List notes, newest first")]
    pub async fn list_notes(
        &self,
        Parameters(params): Parameters<ListNotesParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut notes = self.db.notes().list().await.map_err(map_db_error)?;
        if let Some(limit) = params.limit {
            notes.truncate(limit);
        }
        json_result(&notes)
    }

    #[tool(description = "Get a note by ID")]
    pub async fn get_note(
        &self,
        Parameters(params): Parameters<GetNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let note = self
            .db
            .notes()
            .get(params.note_id)
            .await
            .map_err(map_db_error)?;
        json_result(&note)
    }

    #[tool(description = "Create a note")]
    pub async fn create_note(
        &self,
        Parameters(params): Parameters<CreateNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let new_note = NewNote {
            title: params.title,
            content: params.content,
            tags: params.tags.unwrap_or_default(),
        };
        new_note.validate().map_err(map_validation_error)?;

        let note = self
            .db
            .notes()
            .create(&new_note)
            .await
            .map_err(map_db_error)?;
        info!("Created note {} via MCP", note.id);
        json_result(&note)
    }

    #[tool(description = "Update a note's title, content or tags. Omitted fields are unchanged")]
    pub async fn update_note(
        &self,
        Parameters(params): Parameters<UpdateNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let update = NoteUpdate {
            title: params.title,
            content: params.content,
            tags: params.tags,
        };
        update.validate().map_err(map_validation_error)?;

        let note = self
            .db
            .notes()
            .update(params.note_id, &update)
            .await
            .map_err(map_db_error)?;
        json_result(&note)
    }

    #[tool(description = "Delete a note. Its action items are kept but unlinked")]
    pub async fn delete_note(
        &self,
        Parameters(params): Parameters<DeleteNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        self.db
            .notes()
            .delete(params.note_id)
            .await
            .map_err(map_db_error)?;
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Deleted note {}",
            params.note_id
        ))]))
    }

    #[tool(description = "Search notes by title or content (case-insensitive substring)")]
    pub async fn search_notes(
        &self,
        Parameters(params): Parameters<SearchNotesParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut notes = self
            .db
            .notes()
            .search(&params.query)
            .await
            .map_err(map_db_error)?;
        if let Some(limit) = params.limit {
            notes.truncate(limit);
        }
        json_result(&notes)
    }
}
