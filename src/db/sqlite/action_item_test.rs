//! Tests for SqliteActionItemRepository.

use std::collections::BTreeSet;

use crate::db::{
    ActionItemQuery, ActionItemRepository, ActionItemUpdate, Database, DbError, NewActionItem,
    NewNote, NoteRepository, SqliteDatabase,
};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Make every statement of `kind` (e.g. `INSERT ON action_item`) abort.
async fn reject(db: &SqliteDatabase, kind: &str) {
    let sql = format!(
        "CREATE TRIGGER reject_writes BEFORE {} BEGIN SELECT RAISE(ABORT, 'rejected'); END",
        kind
    );
    sqlx::query(&sql).execute(db.pool()).await.unwrap();
}

async fn all_items(db: &SqliteDatabase) -> Vec<crate::db::ActionItem> {
    db.action_items()
        .list(&ActionItemQuery::default())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn action_item_create_and_get() {
    let db = setup_db().await;
    let items = db.action_items();

    let created = items
        .create(&NewActionItem::new("Write tests"))
        .await
        .expect("Create should succeed");
    assert!(created.id > 0);
    assert_eq!(created.note_id, None);
    assert!(!created.completed);
    assert_eq!(created.completed_at, None);

    let retrieved = items.get(created.id).await.expect("Get should succeed");
    assert_eq!(retrieved, created);
}

#[tokio::test(flavor = "multi_thread")]
async fn action_item_create_rejects_empty_description() {
    let db = setup_db().await;
    let result = db.action_items().create(&NewActionItem::new("")).await;
    assert!(matches!(result, Err(DbError::Validation { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn action_item_get_nonexistent_returns_not_found() {
    let db = setup_db().await;
    let err = db.action_items().get(7).await.unwrap_err();
    assert_eq!(err.to_string(), "Entity not found: ActionItem with id '7'");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_many_preserves_order_and_link() {
    let db = setup_db().await;
    let note = db
        .notes()
        .create(&NewNote::new("Standup", "body"))
        .await
        .unwrap();

    let created = db
        .action_items()
        .create_many(Some(note.id), &strings(&["Set up database", "Write tests"]))
        .await
        .expect("Bulk create should succeed");

    assert_eq!(created.len(), 2);
    assert_eq!(created[0].description, "Set up database");
    assert_eq!(created[1].description, "Write tests");
    assert!(created.iter().all(|i| i.note_id == Some(note.id)));
    assert!(created[0].id < created[1].id);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_many_with_empty_input_creates_nothing() {
    let db = setup_db().await;
    let created = db.action_items().create_many(None, &[]).await.unwrap();
    assert!(created.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_many_is_all_or_nothing() {
    let db = setup_db().await;

    let result = db
        .action_items()
        .create_many(None, &strings(&["ok", ""]))
        .await;
    assert!(matches!(result, Err(DbError::Validation { .. })));

    // A dangling note id fails inside the transaction.
    let result = db
        .action_items()
        .create_many(Some(12345), &strings(&["first", "second"]))
        .await;
    assert!(result.is_err());

    let all = db
        .action_items()
        .list(&ActionItemQuery::default())
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_note_and_completion() {
    let db = setup_db().await;
    let note = db.notes().create(&NewNote::new("n", "c")).await.unwrap();
    let items = db.action_items();

    let linked = items
        .create_many(Some(note.id), &strings(&["a", "b"]))
        .await
        .unwrap();
    let loose = items.create(&NewActionItem::new("c")).await.unwrap();
    items.set_completed(linked[0].id, true).await.unwrap();

    let all = items.list(&ActionItemQuery::default()).await.unwrap();
    let ids: Vec<_> = all.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![loose.id, linked[1].id, linked[0].id]);

    let for_note = items
        .list(&ActionItemQuery {
            note_id: Some(note.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(for_note.len(), 2);

    let open_for_note = items
        .list(&ActionItemQuery {
            note_id: Some(note.id),
            completed: Some(false),
        })
        .await
        .unwrap();
    assert_eq!(open_for_note.len(), 1);
    assert_eq!(open_for_note[0].description, "b");

    let done = items
        .list(&ActionItemQuery {
            completed: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, linked[0].id);
}

#[tokio::test(flavor = "multi_thread")]
async fn set_completed_stamps_and_clears_completed_at() {
    let db = setup_db().await;
    let items = db.action_items();
    let item = items.create(&NewActionItem::new("Ship")).await.unwrap();

    let done = items.set_completed(item.id, true).await.unwrap();
    assert!(done.completed);
    assert!(done.completed_at.is_some());
    assert_eq!(items.get(item.id).await.unwrap(), done);

    let again = items.set_completed(item.id, true).await.unwrap();
    assert_eq!(again.completed_at, done.completed_at);

    let reopened = items.set_completed(item.id, false).await.unwrap();
    assert!(!reopened.completed);
    assert_eq!(reopened.completed_at, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_description_and_unlink() {
    let db = setup_db().await;
    let note = db.notes().create(&NewNote::new("n", "c")).await.unwrap();
    let items = db.action_items();
    let item = items
        .create(&NewActionItem::for_note(note.id, "Draft"))
        .await
        .unwrap();

    let updated = items
        .update(
            item.id,
            &ActionItemUpdate {
                description: Some("Draft the proposal".to_string()),
                note_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.description, "Draft the proposal");
    assert_eq!(updated.note_id, None);
    assert_eq!(items.get(item.id).await.unwrap(), updated);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_blank_description() {
    let db = setup_db().await;
    let items = db.action_items();
    let item = items.create(&NewActionItem::new("x")).await.unwrap();

    let result = items
        .update(
            item.id,
            &ActionItemUpdate {
                description: Some(String::new()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(DbError::Validation { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn action_item_delete() {
    let db = setup_db().await;
    let items = db.action_items();
    let item = items.create(&NewActionItem::new("Gone")).await.unwrap();

    items.delete(item.id).await.expect("Delete should succeed");
    assert!(matches!(
        items.get(item.id).await,
        Err(DbError::NotFound { .. })
    ));
    assert!(matches!(
        items.delete(item.id).await,
        Err(DbError::NotFound { .. })
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_note_links_items_to_new_note() {
    let db = setup_db().await;

    let (note, items) = db
        .action_items()
        .create_with_note(
            &NewNote::new("Kickoff", "- Book room\n- Send invites"),
            &strings(&["Book room", "Send invites"]),
        )
        .await
        .unwrap();

    assert_eq!(note.title, "Kickoff");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.note_id == Some(note.id)));
    assert_eq!(db.notes().get(note.id).await.unwrap(), note);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_with_note_leaves_nothing_when_items_fail() {
    let db = setup_db().await;
    reject(&db, "INSERT ON action_item").await;

    let result = db
        .action_items()
        .create_with_note(&NewNote::new("Kickoff", "body"), &strings(&["Book room"]))
        .await;
    assert!(matches!(result, Err(DbError::Database { .. })));

    assert!(db.notes().list().await.unwrap().is_empty());
    assert!(all_items(&db).await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn apply_to_note_adds_items_and_merges_tags() {
    let db = setup_db().await;
    let note = db
        .notes()
        .create(&NewNote {
            title: "Tagged".to_string(),
            content: "Ship it!".to_string(),
            tags: vec!["ops".to_string()],
        })
        .await
        .unwrap();

    let tags: BTreeSet<String> = ["release", "ops"].iter().map(|s| s.to_string()).collect();
    let (updated, items) = db
        .action_items()
        .apply_to_note(note.id, &strings(&["Ship it!"]), &tags)
        .await
        .unwrap();

    assert_eq!(updated.tags, vec!["ops", "release"]);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].note_id, Some(note.id));
    assert_eq!(db.notes().get(note.id).await.unwrap().tags, vec!["ops", "release"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn apply_to_note_leaves_nothing_when_tag_write_fails() {
    let db = setup_db().await;
    let note = db
        .notes()
        .create(&NewNote::new("Release", "Ship it!\n#release"))
        .await
        .unwrap();
    reject(&db, "UPDATE ON note").await;

    let tags: BTreeSet<String> = ["release".to_string()].into_iter().collect();
    let result = db
        .action_items()
        .apply_to_note(note.id, &strings(&["Ship it!"]), &tags)
        .await;
    assert!(matches!(result, Err(DbError::Database { .. })));

    assert!(all_items(&db).await.is_empty());
    assert!(db.notes().get(note.id).await.unwrap().tags.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn apply_to_missing_note_is_not_found() {
    let db = setup_db().await;

    let result = db
        .action_items()
        .apply_to_note(404, &strings(&["Ship it!"]), &BTreeSet::new())
        .await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
    assert!(all_items(&db).await.is_empty());
}
