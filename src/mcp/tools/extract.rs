//! Stateless extraction tool.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::{Deserialize, Serialize};

use super::json_result;
use crate::db::Database;
use crate::extract::ExtractMode;
use crate::mcp::McpServer;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExtractParams {
    #[schemars(description = "Free text to scan for action items")]
    pub text: String,
    #[schemars(description = "Rule set: 'lines' (default, list-aware, deduplicated) or 'keywords' ('!' or 'todo:' lines, with #tags)")]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExtractOutput {
    action_items: Vec<String>,
    tags: Vec<String>,
}

#[tool_router(router = extract_router, vis = "pub(crate)")]
impl<D: Database + 'static> McpServer<D> {
    #[tool(description = "Extract action items and #tags from text without storing anything")]
    pub async fn extract_action_items(
        &self,
        Parameters(params): Parameters<ExtractParams>,
    ) -> Result<CallToolResult, McpError> {
        let mode = match params.mode.as_deref() {
            None => ExtractMode::default(),
            Some(raw) => raw
                .parse::<ExtractMode>()
                .map_err(|message| McpError::invalid_params(message, None))?,
        };

        let extraction = self.extractor.extract(&params.text, mode);
        json_result(&ExtractOutput {
            action_items: extraction.action_items,
            tags: extraction.tags.into_iter().collect(),
        })
    }
}
