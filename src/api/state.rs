//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;
use crate::extract::Extractor;

/// Shared application state.
///
/// Generic over `D: Database` so any storage backend can be plugged in.
/// The extractor is immutable and shared by every request.
pub struct AppState<D: Database> {
    db: Arc<D>,
    extractor: Arc<Extractor>,
}

// Manual Clone impl - only the Arcs are cloned, D need not be Clone
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            extractor: Arc::clone(&self.extractor),
        }
    }
}

impl<D: Database> AppState<D> {
    pub fn new(db: D, extractor: Extractor) -> Self {
        Self::from_arc(Arc::new(db), extractor)
    }

    /// Build from a database handle that is already shared elsewhere.
    pub fn from_arc(db: Arc<D>, extractor: Extractor) -> Self {
        Self {
            db,
            extractor: Arc::new(extractor),
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Get a cloned Arc to the database.
    pub fn db_arc(&self) -> Arc<D> {
        Arc::clone(&self.db)
    }

    /// Get a reference to the extraction engine.
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Get a cloned Arc to the extraction engine.
    pub fn extractor_arc(&self) -> Arc<Extractor> {
        Arc::clone(&self.extractor)
    }
}
