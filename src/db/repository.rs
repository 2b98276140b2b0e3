//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic. Every
//! returned future is `Send` so handlers stay usable from axum and rmcp.

use std::collections::BTreeSet;
use std::future::Future;

use crate::db::{
    DbResult,
    models::{
        ActionItem, ActionItemQuery, ActionItemUpdate, Id, NewActionItem, NewNote, Note,
        NoteUpdate,
    },
};

/// Repository for Note operations.
pub trait NoteRepository {
    /// Create a new note and return it with its assigned ID.
    fn create(&self, note: &NewNote) -> impl Future<Output = DbResult<Note>> + Send;

    /// Get a note by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<Note>> + Send;

    /// Get all notes, newest first.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Note>>> + Send;

    /// Case-insensitive substring match on title or content, newest first.
    /// A blank query returns every note.
    fn search(&self, query: &str) -> impl Future<Output = DbResult<Vec<Note>>> + Send;

    /// Apply a partial update and return the stored result.
    fn update(&self, id: Id, update: &NoteUpdate) -> impl Future<Output = DbResult<Note>> + Send;

    /// Delete a note by ID. Linked action items keep existing, unlinked.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Repository for ActionItem operations.
pub trait ActionItemRepository {
    /// Create a single action item.
    fn create(&self, item: &NewActionItem) -> impl Future<Output = DbResult<ActionItem>> + Send;

    /// Create one item per description, in order, inside one transaction.
    fn create_many(
        &self,
        note_id: Option<Id>,
        descriptions: &[String],
    ) -> impl Future<Output = DbResult<Vec<ActionItem>>> + Send;

    /// Insert `note` and one linked item per description, all or nothing.
    fn create_with_note(
        &self,
        note: &NewNote,
        descriptions: &[String],
    ) -> impl Future<Output = DbResult<(Note, Vec<ActionItem>)>> + Send;

    /// Link one new item per description to an existing note and union
    /// `tags` into it, all or nothing.
    fn apply_to_note(
        &self,
        note_id: Id,
        descriptions: &[String],
        tags: &BTreeSet<String>,
    ) -> impl Future<Output = DbResult<(Note, Vec<ActionItem>)>> + Send;

    /// Get an action item by ID.
    fn get(&self, id: Id) -> impl Future<Output = DbResult<ActionItem>> + Send;

    /// List action items matching the query, newest first.
    fn list(
        &self,
        query: &ActionItemQuery,
    ) -> impl Future<Output = DbResult<Vec<ActionItem>>> + Send;

    /// Apply a partial update and return the stored result.
    fn update(
        &self,
        id: Id,
        update: &ActionItemUpdate,
    ) -> impl Future<Output = DbResult<ActionItem>> + Send;

    /// Mark complete (stamping `completed_at`) or reopen (clearing it).
    fn set_completed(
        &self,
        id: Id,
        completed: bool,
    ) -> impl Future<Output = DbResult<ActionItem>> + Send;

    /// Delete an action item by ID.
    fn delete(&self, id: Id) -> impl Future<Output = DbResult<()>> + Send;
}

/// Database abstraction providing access to repositories.
///
/// Uses associated types to avoid dynamic dispatch.
pub trait Database: Send + Sync {
    type Notes<'a>: NoteRepository + Send + Sync
    where
        Self: 'a;
    type ActionItems<'a>: ActionItemRepository + Send + Sync
    where
        Self: 'a;

    /// Run pending schema migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the note repository.
    fn notes(&self) -> Self::Notes<'_>;

    /// Get the action item repository.
    fn action_items(&self) -> Self::ActionItems<'_>;
}
