//! Unit tests for the SQLite bookmark store.
//!
//! These tests exercise row-level CRUD through the `BookmarkStore` trait,
//! using an in-memory SQLite database.

use smartmarks::database::Database;
use smartmarks::managers::bookmark_store::{BookmarkStore, SqliteBookmarkStore};
use smartmarks::types::bookmark::{BookmarkPatch, NewBookmark};
use smartmarks::types::errors::StoreError;
use smartmarks::types::folder::Category;

fn setup() -> Database {
    Database::open_in_memory().expect("Failed to open in-memory database")
}

fn record(owner: &str, title: &str, url: &str) -> NewBookmark {
    NewBookmark {
        user_id: owner.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        category: None,
        favorite: false,
        pinned: false,
        click_count: 0,
    }
}

#[test]
fn test_insert_and_list_roundtrip() {
    let db = setup();
    let mut store = SqliteBookmarkStore::new(db.connection());

    let id = store.insert(&record("u1", "Example", "https://example.com")).unwrap();

    let rows = store.list_bookmarks("u1").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].title, "Example");
    assert_eq!(rows[0].url, "https://example.com");
    assert_eq!(rows[0].category, None);
    assert!(rows[0].created_at > 0);
}

/// Listing is scoped to the owner.
#[test]
fn test_list_is_scoped_to_owner() {
    let db = setup();
    let mut store = SqliteBookmarkStore::new(db.connection());

    store.insert(&record("u1", "Mine", "https://mine.example")).unwrap();
    store.insert(&record("u2", "Theirs", "https://theirs.example")).unwrap();

    let rows = store.list_bookmarks("u1").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Mine");
}

/// Source ordering is newest first; same-second inserts keep reverse
/// insertion order.
#[test]
fn test_list_orders_newest_first() {
    let db = setup();
    let mut store = SqliteBookmarkStore::new(db.connection());

    store.insert(&record("u1", "First", "https://a.example")).unwrap();
    store.insert(&record("u1", "Second", "https://b.example")).unwrap();
    store.insert(&record("u1", "Third", "https://c.example")).unwrap();

    let titles: Vec<String> = store
        .list_bookmarks("u1")
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
}

#[test]
fn test_update_fields_writes_only_the_patch() {
    let db = setup();
    let mut store = SqliteBookmarkStore::new(db.connection());

    let mut rec = record("u1", "Old", "https://old.example");
    rec.click_count = 9;
    let id = store.insert(&rec).unwrap();

    store
        .update_fields(
            &id,
            &BookmarkPatch::details("New", "https://new.example", Some(Category::ReadingList)),
        )
        .unwrap();

    let row = store.list_bookmarks("u1").unwrap().remove(0);
    assert_eq!(row.title, "New");
    assert_eq!(row.url, "https://new.example");
    assert_eq!(row.category, Some(Category::ReadingList));
    // Untouched by the detail patch
    assert_eq!(row.click_count, 9);
}

#[test]
fn test_update_click_count_only() {
    let db = setup();
    let mut store = SqliteBookmarkStore::new(db.connection());
    let id = store.insert(&record("u1", "Example", "https://example.com")).unwrap();

    store.update_fields(&id, &BookmarkPatch::click_count(6)).unwrap();

    let row = store.list_bookmarks("u1").unwrap().remove(0);
    assert_eq!(row.click_count, 6);
    assert_eq!(row.title, "Example");
}

#[test]
fn test_update_unknown_id_reports_not_found() {
    let db = setup();
    let mut store = SqliteBookmarkStore::new(db.connection());

    let err = store
        .update_fields("missing", &BookmarkPatch::click_count(1))
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound("missing".to_string()));
}

#[test]
fn test_delete_by_id() {
    let db = setup();
    let mut store = SqliteBookmarkStore::new(db.connection());
    let id = store.insert(&record("u1", "Example", "https://example.com")).unwrap();

    store.delete_by_id(&id).unwrap();
    assert!(store.list_bookmarks("u1").unwrap().is_empty());

    let err = store.delete_by_id(&id).unwrap_err();
    assert_eq!(err, StoreError::NotFound(id));
}

/// Category labels outside the fixed set read back as "no category".
#[test]
fn test_unknown_category_label_reads_as_none() {
    let db = setup();
    let mut store = SqliteBookmarkStore::new(db.connection());
    let id = store.insert(&record("u1", "Example", "https://example.com")).unwrap();

    db.connection()
        .execute(
            "UPDATE bookmarks SET category = 'Archived' WHERE id = ?1",
            rusqlite::params![id],
        )
        .unwrap();

    let row = store.list_bookmarks("u1").unwrap().remove(0);
    assert_eq!(row.category, None);
    assert_eq!(row.effective_category(), Category::General);
}
