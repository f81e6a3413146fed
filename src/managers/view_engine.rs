//! Bookmark View Engine for Smartmarks.
//!
//! Holds the authoritative in-memory bookmark collection for the signed-in
//! owner, performs write-then-reload mutations through an injected
//! [`BookmarkStore`], and derives the filtered/sorted projection as a pure
//! function of the current [`ViewState`].

use std::cmp::Ordering;

use crate::managers::bookmark_store::BookmarkStore;
use crate::types::bookmark::{
    normalize_url, Bookmark, BookmarkDraft, BookmarkEdit, BookmarkPatch, NewBookmark,
};
use crate::types::errors::StoreError;
use crate::types::session::User;
use crate::types::view::{ExportRow, SortMode, ViewState};

/// Why a mutation was refused before any write was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyTitle,
    EmptyUrl,
    /// No owner identity has been adopted yet.
    NoOwner,
}

/// Typed result of a mutation command. The engine applies the reload policy
/// itself; the caller only needs this to decide what to show.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// The write was issued and the collection reloaded.
    Applied,
    /// Validation refused the operation: no write, no reload.
    Rejected(RejectReason),
    /// The write reported an error.
    Failed(StoreError),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

/// The in-memory bookmark collection plus its mutation commands.
///
/// Single-writer-by-convention: only the engine replaces the collection.
/// Stores are injected per call so tests can run against a fake.
pub struct ViewEngine {
    owner_id: Option<String>,
    bookmarks: Vec<Bookmark>,
}

impl ViewEngine {
    pub fn new() -> Self {
        Self {
            owner_id: None,
            bookmarks: Vec::new(),
        }
    }

    /// Adopts the signed-in identity. New records are owned by this user.
    pub fn set_owner(&mut self, user: &User) {
        self.owner_id = Some(user.id.clone());
    }

    /// Drops the identity and the collection, e.g. on logout.
    pub fn clear(&mut self) {
        self.owner_id = None;
        self.bookmarks.clear();
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    /// The authoritative collection, in source order (newest first).
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn get(&self, id: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// Replaces the whole collection from the store.
    ///
    /// A fetch failure degrades to an empty collection for this cycle — no
    /// retry, no error surfaced to the caller.
    pub fn load<S: BookmarkStore>(&mut self, store: &S) {
        let owner = match &self.owner_id {
            Some(id) => id.clone(),
            None => {
                self.bookmarks.clear();
                return;
            }
        };
        self.bookmarks = store.list_bookmarks(&owner).unwrap_or_default();
    }

    /// Creates a bookmark from the draft.
    ///
    /// Requires both title and URL to be non-empty; rejects (no write, no
    /// reload) otherwise. The URL is normalized to carry a scheme. New
    /// records start with `favorite=false`, `pinned=false`, `click_count=0`.
    /// The reload happens even when the insert fails.
    pub fn create<S: BookmarkStore>(&mut self, store: &mut S, draft: &BookmarkDraft) -> MutationOutcome {
        let owner = match &self.owner_id {
            Some(id) => id.clone(),
            None => return MutationOutcome::Rejected(RejectReason::NoOwner),
        };
        if draft.title.is_empty() {
            return MutationOutcome::Rejected(RejectReason::EmptyTitle);
        }
        if draft.url.is_empty() {
            return MutationOutcome::Rejected(RejectReason::EmptyUrl);
        }

        let record = NewBookmark {
            user_id: owner,
            title: draft.title.clone(),
            url: normalize_url(&draft.url),
            category: draft.category,
            favorite: false,
            pinned: false,
            click_count: 0,
        };

        let result = store.insert(&record);
        self.load(store);
        match result {
            Ok(_) => MutationOutcome::Applied,
            Err(e) => MutationOutcome::Failed(e),
        }
    }

    /// Edits title, URL, and category of an existing bookmark.
    ///
    /// Applies the same URL normalization as create and writes only those
    /// three fields. The reload happens even when the write fails.
    pub fn update<S: BookmarkStore>(
        &mut self,
        store: &mut S,
        id: &str,
        edit: &BookmarkEdit,
    ) -> MutationOutcome {
        if edit.title.is_empty() {
            return MutationOutcome::Rejected(RejectReason::EmptyTitle);
        }
        if edit.url.is_empty() {
            return MutationOutcome::Rejected(RejectReason::EmptyUrl);
        }

        let patch = BookmarkPatch::details(&edit.title, &normalize_url(&edit.url), edit.category);
        let result = store.update_fields(id, &patch);
        self.load(store);
        match result {
            Ok(()) => MutationOutcome::Applied,
            Err(e) => MutationOutcome::Failed(e),
        }
    }

    /// Removes the record by identifier, then reloads unconditionally.
    pub fn delete<S: BookmarkStore>(&mut self, store: &mut S, id: &str) -> MutationOutcome {
        let result = store.delete_by_id(id);
        self.load(store);
        match result {
            Ok(()) => MutationOutcome::Applied,
            Err(e) => MutationOutcome::Failed(e),
        }
    }

    /// Writes `click_count = current_count + 1`, treating a missing
    /// (negative) count as 0.
    ///
    /// The only increment path. The value is a client-supplied snapshot, not
    /// an atomic server-side increment, so concurrent activations can
    /// under-count. On a failed write the reload is skipped and local state
    /// stays untouched.
    pub fn register_click<S: BookmarkStore>(
        &mut self,
        store: &mut S,
        id: &str,
        current_count: i64,
    ) -> MutationOutcome {
        let next = current_count.max(0) + 1;
        match store.update_fields(id, &BookmarkPatch::click_count(next)) {
            Ok(()) => {
                self.load(store);
                MutationOutcome::Applied
            }
            Err(e) => MutationOutcome::Failed(e),
        }
    }

    /// Activates a bookmark: registers the click and returns the URL for the
    /// navigation collaborator to open in a new browsing context.
    ///
    /// The click write is fire-and-forget — the returned URL does not depend
    /// on it succeeding.
    pub fn activate<S: BookmarkStore>(&mut self, store: &mut S, id: &str) -> Option<String> {
        let (url, count) = match self.get(id) {
            Some(b) => (b.url.clone(), b.click_count),
            None => return None,
        };
        let _ = self.register_click(store, id, count);
        Some(url)
    }

    /// Flattens every loaded record (not the projection) into export rows.
    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.bookmarks.iter().map(ExportRow::from).collect()
    }
}

impl Default for ViewEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives the filtered and sorted projection for the given view inputs.
///
/// Pure and stateless: recomputed from scratch on every render input change,
/// mutates nothing. Filtering keeps a record iff its title contains the
/// search text case-insensitively and the folder selection matches its
/// effective category. Ordering is a stable two-level comparator: pinned
/// records precede non-pinned records, then the active sort mode applies
/// within each group.
pub fn project<'a>(bookmarks: &'a [Bookmark], view: &ViewState) -> Vec<&'a Bookmark> {
    let needle = view.search.to_lowercase();
    let mut out: Vec<&Bookmark> = bookmarks
        .iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&needle) && view.selected_folder.matches(b)
        })
        .collect();

    out.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| compare_in_group(a, b, view.sort))
    });
    out
}

fn compare_in_group(a: &Bookmark, b: &Bookmark, sort: SortMode) -> Ordering {
    match sort {
        SortMode::Alphabet => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortMode::Newest => b.created_at.cmp(&a.created_at),
        SortMode::Oldest => a.created_at.cmp(&b.created_at),
    }
}
