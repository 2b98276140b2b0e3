//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx-backed implementation of the repository
//! traits defined in the parent module.

mod action_item;
mod connection;
mod helpers;
mod note;

#[cfg(test)]
mod action_item_test;

pub use action_item::SqliteActionItemRepository;
pub use connection::SqliteDatabase;
pub use note::SqliteNoteRepository;
