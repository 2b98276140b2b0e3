use miette::{IntoDiagnostic, WrapErr};

use crate::books::OpenLibraryClient;
use crate::config::AppConfig;
use crate::extract::Extractor;
use crate::logging::{self, LogTarget};
use crate::mcp::serve_stdio;

use super::open_database;

/// `jot mcp`: MCP over stdio. Stdout carries the protocol, so logs go to stderr.
pub async fn mcp(config: AppConfig) -> miette::Result<()> {
    logging::init(config.verbosity, LogTarget::Stderr);

    let db = open_database(&config.db_path).await?;
    let books = OpenLibraryClient::new(&config.books)?;
    serve_stdio(db, Extractor::new(config.rules), books)
        .await
        .into_diagnostic()
        .wrap_err("MCP server error")?;
    Ok(())
}
