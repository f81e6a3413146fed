use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;
use super::folder::FolderFilter;

/// Active ordering within each pinned/non-pinned group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Alphabet,
    Newest,
    Oldest,
}

/// The render inputs the projection is derived from.
///
/// An explicit immutable value object threaded through [`reduce`] — the
/// projection itself holds no state of its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub search: String,
    pub sort: SortMode,
    pub selected_folder: FolderFilter,
}

/// User actions that change the view inputs.
#[derive(Debug, Clone)]
pub enum ViewAction {
    SetSearch(String),
    SetSort(SortMode),
    SelectFolder(FolderFilter),
}

/// Unidirectional view-state update: `(state, action) -> state`.
pub fn reduce(state: ViewState, action: ViewAction) -> ViewState {
    match action {
        ViewAction::SetSearch(search) => ViewState { search, ..state },
        ViewAction::SetSort(sort) => ViewState { sort, ..state },
        ViewAction::SelectFolder(selected_folder) => ViewState { selected_folder, ..state },
    }
}

/// One flattened spreadsheet row covering every loaded bookmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Pinned")]
    pub pinned: String,
    #[serde(rename = "Favorite")]
    pub favorite: String,
    #[serde(rename = "Clicks")]
    pub clicks: i64,
    #[serde(rename = "Created")]
    pub created: i64,
}

impl ExportRow {
    fn yes_no(flag: bool) -> String {
        if flag { "Yes" } else { "No" }.to_string()
    }
}

impl From<&Bookmark> for ExportRow {
    fn from(b: &Bookmark) -> Self {
        Self {
            title: b.title.clone(),
            url: b.url.clone(),
            category: b.effective_category().as_str().to_string(),
            pinned: Self::yes_no(b.pinned),
            favorite: Self::yes_no(b.favorite),
            clicks: b.click_count,
            created: b.created_at,
        }
    }
}
