//! Bookmark store for Smartmarks.
//!
//! Defines the [`BookmarkStore`] trait the view engine writes through, and
//! [`SqliteBookmarkStore`] backing it with SQLite via `rusqlite`. Tests
//! inject fake implementations to exercise the engine without a database.

use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::types::bookmark::{Bookmark, BookmarkPatch, NewBookmark};
use crate::types::errors::StoreError;
use crate::types::folder::Category;

/// Trait defining the row-level bookmark operations the view engine needs.
pub trait BookmarkStore {
    /// Lists all bookmarks belonging to the owner, ordered by creation time
    /// descending at the source.
    fn list_bookmarks(&self, owner_id: &str) -> Result<Vec<Bookmark>, StoreError>;
    /// Inserts a new record. Returns the store-assigned ID.
    fn insert(&mut self, record: &NewBookmark) -> Result<String, StoreError>;
    /// Writes only the fields present in the patch.
    fn update_fields(&mut self, id: &str, patch: &BookmarkPatch) -> Result<(), StoreError>;
    fn delete_by_id(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Bookmark store backed by a SQLite connection.
pub struct SqliteBookmarkStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteBookmarkStore<'a> {
    /// Creates a new `SqliteBookmarkStore` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Reads a single `Bookmark` row into a struct.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        let category: Option<String> = row.get(4)?;
        Ok(Bookmark {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            url: row.get(3)?,
            // Labels outside the fixed set behave like "no category"
            category: category.and_then(|c| Category::from_str(&c).ok()),
            favorite: row.get(5)?,
            pinned: row.get(6)?,
            click_count: row.get(7)?,
            created_at: row.get(8)?,
        })
    }
}

impl<'a> BookmarkStore for SqliteBookmarkStore<'a> {
    fn list_bookmarks(&self, owner_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, user_id, title, url, category, favorite, pinned, click_count, created_at \
                 FROM bookmarks WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
            )
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        let rows = stmt
            .query_map(params![owner_id], Self::row_to_bookmark)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| StoreError::DatabaseError(e.to_string()))?);
        }
        Ok(results)
    }

    fn insert(&mut self, record: &NewBookmark) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = Self::now();

        self.conn
            .execute(
                "INSERT INTO bookmarks (id, user_id, title, url, category, favorite, pinned, click_count, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    id,
                    record.user_id,
                    record.title,
                    record.url,
                    record.category.map(|c| c.as_str()),
                    record.favorite,
                    record.pinned,
                    record.click_count,
                    now,
                ],
            )
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        Ok(id)
    }

    fn update_fields(&mut self, id: &str, patch: &BookmarkPatch) -> Result<(), StoreError> {
        if patch.is_empty() {
            // Nothing to write — still verify the bookmark exists
            let count: i64 = self
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM bookmarks WHERE id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
            if count == 0 {
                return Err(StoreError::NotFound(id.to_string()));
            }
            return Ok(());
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<SqlValue> = Vec::new();

        if let Some(title) = &patch.title {
            assignments.push("title = ?");
            values.push(SqlValue::from(title.clone()));
        }
        if let Some(url) = &patch.url {
            assignments.push("url = ?");
            values.push(SqlValue::from(url.clone()));
        }
        if let Some(category) = &patch.category {
            assignments.push("category = ?");
            values.push(match category {
                Some(c) => SqlValue::from(c.as_str().to_string()),
                None => SqlValue::Null,
            });
        }
        if let Some(count) = patch.click_count {
            assignments.push("click_count = ?");
            values.push(SqlValue::from(count));
        }

        let sql = format!(
            "UPDATE bookmarks SET {} WHERE id = ?",
            assignments.join(", ")
        );
        values.push(SqlValue::from(id.to_string()));

        let affected = self
            .conn
            .execute(&sql, params_from_iter(values))
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn delete_by_id(&mut self, id: &str) -> Result<(), StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?1", params![id])
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
