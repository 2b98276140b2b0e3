//! MCP transports: Streamable HTTP for the API server, stdio for `jot mcp`.

use std::sync::Arc;

use rmcp::ServiceExt;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::books::OpenLibraryClient;
use crate::db::Database;
use crate::extract::Extractor;

use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// The returned service can be nested into an Axum router:
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use jot::books::OpenLibraryClient;
/// # use jot::config::BooksConfig;
/// # use jot::db::SqliteDatabase;
/// # use jot::extract::Extractor;
/// # use jot::mcp::create_mcp_service;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let db = SqliteDatabase::in_memory().await?;
/// let books = OpenLibraryClient::new(&BooksConfig::default())?;
/// let service = create_mcp_service(
///     Arc::new(db),
///     Arc::new(Extractor::default()),
///     books,
///     CancellationToken::new(),
/// );
///
/// let app: Router = Router::new().nest_service("/mcp", service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<D: Database + 'static>(
    db: Arc<D>,
    extractor: Arc<Extractor>,
    books: OpenLibraryClient,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<D>, LocalSessionManager> {
    // One McpServer per session; rmcp expects an io::Error from the factory
    let service_factory = move || -> Result<McpServer<D>, std::io::Error> {
        Ok(McpServer::new(
            Arc::clone(&db),
            Arc::clone(&extractor),
            books.clone(),
        ))
    };

    let mut config = StreamableHttpServerConfig::default();
    config.sse_keep_alive = None;
    config.sse_retry = None;
    config.stateful_mode = true;
    config.cancellation_token = cancellation_token;

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn serve_stdio<D: Database + 'static>(
    db: D,
    extractor: Extractor,
    books: OpenLibraryClient,
) -> Result<(), std::io::Error> {
    let server = McpServer::new(Arc::new(db), Arc::new(extractor), books);
    info!("MCP server listening on stdio");

    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(std::io::Error::other)?;
    running.waiting().await.map_err(std::io::Error::other)?;

    info!("MCP client disconnected");
    Ok(())
}
