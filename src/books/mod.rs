//! Open Library book catalog lookups.
//!
//! Used by the `search_books` and `get_book_details` MCP tools. Catalog
//! failures are rendered as text instead of surfacing as tool errors.

mod client;
mod error;
pub mod format;

#[cfg(test)]
mod client_test;

pub use client::{DEFAULT_SEARCH_LIMIT, IdType, OpenLibraryClient};
pub use error::BookError;

/// Install the ring rustls provider for reqwest. Safe to call repeatedly.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}
