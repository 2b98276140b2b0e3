//! HTTP server: REST API, MCP endpoint and embedded frontend.

mod handlers;
mod routes;
mod state;
mod static_assets;
pub mod v1;


pub use routes::{ApiDoc, create_router};
pub use state::AppState;

use miette::Diagnostic;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::books::{BookError, OpenLibraryClient};
use crate::config::AppConfig;
use crate::db::Database;
use crate::extract::Extractor;
use crate::mcp::create_mcp_service;

/// Errors that stop the server.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(jot::api::bind),
        help("Is another process already listening on this port? Try --port")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(jot::api::serve))]
    Serve(#[source] std::io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Books(#[from] BookError),
}

/// Run the API server until ctrl-c.
///
/// The MCP streamable HTTP endpoint is nested at `/mcp` and shares the
/// database handle and extraction rules with the REST handlers.
pub async fn run<D: Database + 'static>(config: &AppConfig, db: D) -> Result<(), ApiError> {
    let extractor = Extractor::new(config.rules.clone());
    let books = OpenLibraryClient::new(&config.books)?;

    let state = AppState::new(db, extractor);
    let ct = CancellationToken::new();
    let mcp_service = create_mcp_service(
        state.db_arc(),
        state.extractor_arc(),
        books,
        ct.child_token(),
    );

    let app = create_router(state, config.enable_docs)
        .nest_service("/mcp", mcp_service)
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("API server listening on http://{}", addr);
    if config.enable_docs {
        info!("API docs available at http://{}/docs", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(ct))
        .await
        .map_err(ApiError::Serve)?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal(ct: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
    ct.cancel();
}
