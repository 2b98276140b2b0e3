//! MCP server implementation
//!
//! One server type carries every tool. Each tool group lives in its own
//! module under `tools/` with a named router; the routers are combined here.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::books::OpenLibraryClient;
use crate::db::Database;
use crate::extract::Extractor;

/// MCP server coordinator.
///
/// Generic over `D: Database` for zero-cost abstraction (no dynamic dispatch).
/// The database and extractor are shared with the REST handlers.
pub struct McpServer<D: Database> {
    pub(crate) db: Arc<D>,
    pub(crate) extractor: Arc<Extractor>,
    pub(crate) books: OpenLibraryClient,
    tool_router: ToolRouter<Self>,
}

impl<D: Database + 'static> McpServer<D> {
    pub fn new(db: Arc<D>, extractor: Arc<Extractor>, books: OpenLibraryClient) -> Self {
        Self {
            db,
            extractor,
            books,
            tool_router: Self::note_router()
                + Self::action_item_router()
                + Self::extract_router()
                + Self::book_router(),
        }
    }

    /// Names of every registered tool, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }
}

#[tool_handler]
impl<D: Database + 'static> ServerHandler for McpServer<D> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(
            "jot MCP server: manage notes, extract and complete action items, look up books on Open Library"
                .to_string(),
        );
        info
    }
}
