//! SQLite ActionItemRepository implementation.

use std::collections::BTreeSet;

use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use super::helpers::{ACTION_ITEM_COLUMNS, action_item_from_row};
use super::note::{fetch_note, insert_note, merge_note_tags};
use crate::db::utils::current_timestamp;
use crate::db::{
    ActionItem, ActionItemQuery, ActionItemRepository, ActionItemUpdate, DbError, DbResult, Id,
    NewActionItem, NewNote, Note,
};
use crate::validation::Validate;

/// SQLx-backed action item repository.
pub struct SqliteActionItemRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

const INSERT_SQL: &str = r#"
    INSERT INTO action_item (note_id, description, completed, created_at)
    VALUES (?, ?, 0, ?)
    RETURNING id
"#;

fn validate_descriptions(note_id: Option<Id>, descriptions: &[String]) -> DbResult<()> {
    for description in descriptions {
        NewActionItem {
            note_id,
            description: description.clone(),
        }
        .validate()?;
    }
    Ok(())
}

/// Insert one open item per description on `conn`, in order.
async fn insert_items(
    conn: &mut SqliteConnection,
    note_id: Option<Id>,
    descriptions: &[String],
) -> DbResult<Vec<ActionItem>> {
    let now = current_timestamp();
    let mut created = Vec::with_capacity(descriptions.len());

    for description in descriptions {
        let id: Id = sqlx::query_scalar(INSERT_SQL)
            .bind(note_id)
            .bind(description)
            .bind(&now)
            .fetch_one(&mut *conn)
            .await?;

        created.push(ActionItem {
            id,
            note_id,
            description: description.clone(),
            completed: false,
            created_at: now.clone(),
            completed_at: None,
        });
    }

    Ok(created)
}

impl ActionItemRepository for SqliteActionItemRepository<'_> {
    async fn create(&self, item: &NewActionItem) -> DbResult<ActionItem> {
        item.validate()?;

        let now = current_timestamp();
        let id: Id = sqlx::query_scalar(INSERT_SQL)
            .bind(item.note_id)
            .bind(&item.description)
            .bind(&now)
            .fetch_one(self.pool)
            .await?;

        Ok(ActionItem {
            id,
            note_id: item.note_id,
            description: item.description.clone(),
            completed: false,
            created_at: now,
            completed_at: None,
        })
    }

    async fn create_many(
        &self,
        note_id: Option<Id>,
        descriptions: &[String],
    ) -> DbResult<Vec<ActionItem>> {
        validate_descriptions(note_id, descriptions)?;

        let mut tx = self.pool.begin().await?;
        let created = insert_items(&mut *tx, note_id, descriptions).await?;
        tx.commit().await?;
        Ok(created)
    }

    async fn create_with_note(
        &self,
        note: &NewNote,
        descriptions: &[String],
    ) -> DbResult<(Note, Vec<ActionItem>)> {
        note.validate()?;
        validate_descriptions(None, descriptions)?;

        let mut tx = self.pool.begin().await?;
        let note = insert_note(&mut *tx, note).await?;
        let created = insert_items(&mut *tx, Some(note.id), descriptions).await?;
        tx.commit().await?;
        Ok((note, created))
    }

    async fn apply_to_note(
        &self,
        note_id: Id,
        descriptions: &[String],
        tags: &BTreeSet<String>,
    ) -> DbResult<(Note, Vec<ActionItem>)> {
        validate_descriptions(Some(note_id), descriptions)?;

        let mut tx = self.pool.begin().await?;
        // NotFound before anything is inserted
        fetch_note(&mut *tx, note_id).await?;
        let created = insert_items(&mut *tx, Some(note_id), descriptions).await?;
        let note = merge_note_tags(&mut *tx, note_id, tags).await?;
        tx.commit().await?;
        Ok((note, created))
    }

    async fn get(&self, id: Id) -> DbResult<ActionItem> {
        let sql = format!("SELECT {} FROM action_item WHERE id = ?", ACTION_ITEM_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => action_item_from_row(&row),
            None => Err(DbError::not_found("ActionItem", id)),
        }
    }

    async fn list(&self, query: &ActionItemQuery) -> DbResult<Vec<ActionItem>> {
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM action_item WHERE 1 = 1",
            ACTION_ITEM_COLUMNS
        ));

        if let Some(note_id) = query.note_id {
            builder.push(" AND note_id = ").push_bind(note_id);
        }
        if let Some(completed) = query.completed {
            builder.push(" AND completed = ").push_bind(completed);
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        let rows = builder.build().fetch_all(self.pool).await?;
        rows.iter().map(action_item_from_row).collect()
    }

    async fn update(&self, id: Id, update: &ActionItemUpdate) -> DbResult<ActionItem> {
        update.validate()?;

        let mut item = self.get(id).await?;
        if update.is_empty() {
            return Ok(item);
        }

        if let Some(description) = &update.description {
            item.description = description.clone();
        }
        if let Some(note_id) = update.note_id {
            item.note_id = note_id;
        }
        if let Some(completed) = update.completed
            && completed != item.completed
        {
            item.completed = completed;
            item.completed_at = completed.then(current_timestamp);
        }

        sqlx::query(
            r#"
            UPDATE action_item
            SET note_id = ?, description = ?, completed = ?, completed_at = ?
            WHERE id = ?
            "#,
        )
        .bind(item.note_id)
        .bind(&item.description)
        .bind(item.completed)
        .bind(&item.completed_at)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(item)
    }

    async fn set_completed(&self, id: Id, completed: bool) -> DbResult<ActionItem> {
        let update = ActionItemUpdate {
            completed: Some(completed),
            ..Default::default()
        };
        self.update(id, &update).await
    }

    async fn delete(&self, id: Id) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM action_item WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ActionItem", id));
        }
        Ok(())
    }
}
