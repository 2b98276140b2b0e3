//! Action item tools.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::Deserialize;

use super::{json_result, map_db_error};
use crate::db::{ActionItemQuery, ActionItemRepository, Database, Id};
use crate::mcp::McpServer;

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListActionItemsParams {
    #[schemars(description = "Only items extracted from this note")]
    pub note_id: Option<Id>,
    #[schemars(description = "Only open (false) or done (true) items")]
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CompleteActionItemParams {
    #[schemars(description = "Action item ID")]
    pub action_item_id: Id,
}

#[tool_router(router = action_item_router, vis = "pub(crate)")]
impl<D: Database + 'static> McpServer<D> {
    #[tool(description = "List action items, newest first, optionally filtered by note or completion")]
    pub async fn list_action_items(
        &self,
        Parameters(params): Parameters<ListActionItemsParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = ActionItemQuery {
            note_id: params.note_id,
            completed: params.completed,
        };
        let items = self
            .db
            .action_items()
            .list(&query)
            .await
            .map_err(map_db_error)?;
        json_result(&items)
    }

    #[tool(description = "Mark an action item as done")]
    pub async fn complete_action_item(
        &self,
        Parameters(params): Parameters<CompleteActionItemParams>,
    ) -> Result<CallToolResult, McpError> {
        let item = self
            .db
            .action_items()
            .set_completed(params.action_item_id, true)
            .await
            .map_err(map_db_error)?;
        json_result(&item)
    }
}
