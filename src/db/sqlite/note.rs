//! SQLite NoteRepository implementation.

use std::collections::BTreeSet;

use sqlx::{SqliteConnection, SqlitePool};

use super::helpers::{NOTE_COLUMNS, note_from_row, tags_to_json};
use crate::db::utils::{current_timestamp, like_pattern};
use crate::db::{DbError, DbResult, Id, NewNote, Note, NoteRepository, NoteUpdate, normalize_tags};
use crate::validation::Validate;

/// SQLx-backed note repository.
pub struct SqliteNoteRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

/// Insert a validated note on `conn` and return it with its new ID.
pub(super) async fn insert_note(conn: &mut SqliteConnection, note: &NewNote) -> DbResult<Note> {
    let tags = normalize_tags(note.tags.iter().cloned());
    let tags_json = tags_to_json(&tags)?;
    let now = current_timestamp();

    let id: Id = sqlx::query_scalar(
        r#"
        INSERT INTO note (title, content, tags, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&note.title)
    .bind(&note.content)
    .bind(tags_json)
    .bind(&now)
    .bind(&now)
    .fetch_one(&mut *conn)
    .await?;

    Ok(Note {
        id,
        title: note.title.clone(),
        content: note.content.clone(),
        tags,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub(super) async fn fetch_note(conn: &mut SqliteConnection, id: Id) -> DbResult<Note> {
    let sql = format!("SELECT {} FROM note WHERE id = ?", NOTE_COLUMNS);
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => note_from_row(&row),
        None => Err(DbError::not_found("Note", id)),
    }
}

async fn write_note(conn: &mut SqliteConnection, note: &Note) -> DbResult<()> {
    let tags_json = tags_to_json(&note.tags)?;

    let result = sqlx::query(
        r#"
        UPDATE note
        SET title = ?, content = ?, tags = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&note.title)
    .bind(&note.content)
    .bind(tags_json)
    .bind(&note.updated_at)
    .bind(note.id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Note", note.id));
    }
    Ok(())
}

/// Union `tags` into the stored note on `conn`. Writes only when the set grows.
pub(super) async fn merge_note_tags(
    conn: &mut SqliteConnection,
    id: Id,
    tags: &BTreeSet<String>,
) -> DbResult<Note> {
    let mut note = fetch_note(conn, id).await?;

    let merged = normalize_tags(note.tags.iter().cloned().chain(tags.iter().cloned()));
    if merged == note.tags {
        return Ok(note);
    }

    note.tags = merged;
    note.updated_at = current_timestamp();
    write_note(conn, &note).await?;
    Ok(note)
}

impl NoteRepository for SqliteNoteRepository<'_> {
    async fn create(&self, note: &NewNote) -> DbResult<Note> {
        note.validate()?;

        let mut conn = self.pool.acquire().await?;
        insert_note(&mut conn, note).await
    }

    async fn get(&self, id: Id) -> DbResult<Note> {
        let mut conn = self.pool.acquire().await?;
        fetch_note(&mut conn, id).await
    }

    async fn list(&self) -> DbResult<Vec<Note>> {
        let sql = format!(
            "SELECT {} FROM note ORDER BY created_at DESC, id DESC",
            NOTE_COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(self.pool).await?;
        rows.iter().map(note_from_row).collect()
    }

    async fn search(&self, query: &str) -> DbResult<Vec<Note>> {
        let term = query.trim();
        if term.is_empty() {
            return self.list().await;
        }

        // LIKE is case-insensitive for ASCII; lower() on both sides keeps the
        // comparison symmetric for the rest.
        let sql = format!(
            r#"
            SELECT {} FROM note
            WHERE lower(title) LIKE lower(?1) ESCAPE '\'
               OR lower(content) LIKE lower(?1) ESCAPE '\'
            ORDER BY created_at DESC, id DESC
            "#,
            NOTE_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(like_pattern(term))
            .fetch_all(self.pool)
            .await?;
        rows.iter().map(note_from_row).collect()
    }

    async fn update(&self, id: Id, update: &NoteUpdate) -> DbResult<Note> {
        update.validate()?;

        let mut note = self.get(id).await?;
        if update.is_empty() {
            return Ok(note);
        }

        update.clone().merge_into(&mut note);
        note.updated_at = current_timestamp();

        let mut conn = self.pool.acquire().await?;
        write_note(&mut conn, &note).await?;
        Ok(note)
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM note WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Note", id));
        }
        Ok(())
    }
}
