use crate::api;
use crate::config::AppConfig;
use crate::logging::{self, LogTarget};

use super::open_database;

/// `jot serve`: REST API, MCP endpoint and frontend on one listener.
pub async fn serve(config: AppConfig) -> miette::Result<()> {
    logging::init(config.verbosity, LogTarget::Stdout);

    let db = open_database(&config.db_path).await?;
    api::run(&config, db).await?;
    Ok(())
}
