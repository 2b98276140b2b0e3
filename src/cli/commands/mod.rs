pub mod extract;
pub mod item;
pub mod mcp;
pub mod note;
pub mod serve;

use std::path::Path;

use tracing::info;

use crate::db::{Database, DbResult, SqliteDatabase};

/// Open the database file and bring its schema up to date.
pub(crate) async fn open_database(path: &Path) -> DbResult<SqliteDatabase> {
    info!("Opening database at {}", path.display());
    let db = SqliteDatabase::open(path).await?;
    db.migrate().await?;
    info!("Database migrations complete");
    Ok(db)
}

#[cfg(test)]
#[path = "note_test.rs"]
mod note_test;
