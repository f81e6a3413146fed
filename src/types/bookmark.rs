use serde::{Deserialize, Serialize};

use super::folder::Category;

/// A saved bookmark as held in the store and the in-memory collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    /// `None` means "no category recorded"; comparisons always go through
    /// [`Bookmark::effective_category`].
    pub category: Option<Category>,
    /// Written false at creation; no toggle path exists.
    pub favorite: bool,
    pub pinned: bool,
    pub click_count: i64,
    /// Unix seconds, store-assigned. `0` means "missing" and sorts earliest.
    pub created_at: i64,
}

impl Bookmark {
    /// Category used for filtering: a missing category counts as `General`.
    pub fn effective_category(&self) -> Category {
        self.category.unwrap_or_default()
    }
}

/// Fields supplied by the user when creating a bookmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkDraft {
    pub title: String,
    pub url: String,
    pub category: Option<Category>,
}

/// Fields supplied when editing an existing bookmark.
///
/// Only these three fields are ever written by an edit — `click_count`,
/// `pinned`, and `favorite` stay untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkEdit {
    pub title: String,
    pub url: String,
    pub category: Option<Category>,
}

/// A fully-defaulted record ready for insertion. The store assigns the
/// `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub category: Option<Category>,
    pub favorite: bool,
    pub pinned: bool,
    pub click_count: i64,
}

/// Partial update written through the store's `update_fields`.
///
/// `None` fields are left unchanged in the store.
#[derive(Debug, Clone, Default)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub category: Option<Option<Category>>,
    pub click_count: Option<i64>,
}

impl BookmarkPatch {
    /// Patch shape used by the edit path: title, url, and category only.
    pub fn details(title: &str, url: &str, category: Option<Category>) -> Self {
        Self {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            category: Some(category),
            click_count: None,
        }
    }

    /// Patch shape used by click registration.
    pub fn click_count(count: i64) -> Self {
        Self {
            click_count: Some(count),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.category.is_none()
            && self.click_count.is_none()
    }
}

/// Ensures a URL is stored with an explicit scheme.
///
/// Inputs already starting with `http://` or `https://` pass through
/// unchanged; everything else is prefixed with `https://`.
pub fn normalize_url(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}
