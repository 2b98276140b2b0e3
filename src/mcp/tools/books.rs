//! Open Library lookups.
//!
//! Catalog failures are reported as successful text starting with `Error: `
//! so an agent can read them instead of aborting the call.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::Deserialize;

use crate::books::{DEFAULT_SEARCH_LIMIT, IdType};
use crate::db::Database;
use crate::mcp::McpServer;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchBooksParams {
    #[schemars(description = "Title, author or free-text query")]
    pub query: String,
    #[schemars(description = "Maximum number of results (default 5)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BookDetailsParams {
    #[schemars(description = "Open Library work ID (e.g. OL45883W) or ISBN")]
    pub identifier: String,
    #[schemars(description = "'work' (default) or 'isbn'")]
    #[serde(default)]
    pub id_type: IdType,
}

#[tool_router(router = book_router, vis = "pub(crate)")]
impl<D: Database + 'static> McpServer<D> {
    #[tool(description = "Search Open Library for books")]
    pub async fn search_books(
        &self,
        Parameters(params): Parameters<SearchBooksParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).max(1);
        let text = self.books.search_text(&params.query, limit).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Get title, description and subjects for an Open Library work or ISBN")]
    pub async fn get_book_details(
        &self,
        Parameters(params): Parameters<BookDetailsParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = self
            .books
            .details_text(&params.identifier, params.id_type)
            .await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
