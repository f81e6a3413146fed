//! Property-based tests for the bookmark view projection.
//!
//! These tests verify that for arbitrary collections and view inputs, the
//! projection only ever filters and reorders: pinned items always lead,
//! every surviving item matches the search and folder, and the underlying
//! collection is never mutated.

use proptest::prelude::*;

use smartmarks::managers::view_engine::project;
use smartmarks::types::bookmark::Bookmark;
use smartmarks::types::folder::{Category, FolderFilter};
use smartmarks::types::view::{SortMode, ViewState};

/// Strategy for generating a bookmark with arbitrary projection-relevant
/// fields.
fn arb_bookmark() -> impl Strategy<Value = Bookmark> {
    (
        "[a-z0-9]{8}",
        "[a-zA-Z ]{0,12}",
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(prop_oneof![
            Just(Category::General),
            Just(Category::ReadingList),
            Just(Category::Work),
            Just(Category::Personal),
        ]),
        0i64..2_000_000_000,
        0i64..1000,
    )
        .prop_map(|(id, title, pinned, favorite, category, created_at, clicks)| Bookmark {
            id,
            user_id: "u1".to_string(),
            title,
            url: "https://example.com".to_string(),
            category,
            favorite,
            pinned,
            click_count: clicks,
            created_at,
        })
}

fn arb_sort() -> impl Strategy<Value = SortMode> {
    prop_oneof![
        Just(SortMode::Alphabet),
        Just(SortMode::Newest),
        Just(SortMode::Oldest),
    ]
}

fn arb_folder() -> impl Strategy<Value = FolderFilter> {
    prop_oneof![
        Just(FolderFilter::All),
        Just(FolderFilter::Category(Category::General)),
        Just(FolderFilter::Category(Category::ReadingList)),
        Just(FolderFilter::Category(Category::Work)),
        Just(FolderFilter::Category(Category::Personal)),
    ]
}

fn arb_view() -> impl Strategy<Value = ViewState> {
    ("[a-zA-Z]{0,4}", arb_sort(), arb_folder()).prop_map(|(search, sort, selected_folder)| {
        ViewState {
            search,
            sort,
            selected_folder,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Pinned bookmarks always come before unpinned ones, regardless of the
    // sort mode or filters in effect.
    #[test]
    fn pinned_bookmarks_always_lead(
        bookmarks in proptest::collection::vec(arb_bookmark(), 0..20),
        view in arb_view(),
    ) {
        let projected = project(&bookmarks, &view);
        let first_unpinned = projected.iter().position(|b| !b.pinned);
        if let Some(boundary) = first_unpinned {
            prop_assert!(
                projected[boundary..].iter().all(|b| !b.pinned),
                "A pinned bookmark appeared after an unpinned one"
            );
        }
    }

    // Every projected bookmark matches the search needle and the selected
    // folder; nothing matching both is dropped.
    #[test]
    fn projection_is_exactly_the_matching_subset(
        bookmarks in proptest::collection::vec(arb_bookmark(), 0..20),
        view in arb_view(),
    ) {
        let projected = project(&bookmarks, &view);
        let needle = view.search.to_lowercase();

        for b in &projected {
            prop_assert!(b.title.to_lowercase().contains(&needle));
            prop_assert!(view.selected_folder.matches(b));
        }

        let matching = bookmarks
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle) && view.selected_folder.matches(b)
            })
            .count();
        prop_assert_eq!(projected.len(), matching);
    }

    // An empty search with the All folder keeps the whole collection.
    #[test]
    fn empty_filters_keep_everything(
        bookmarks in proptest::collection::vec(arb_bookmark(), 0..20),
        sort in arb_sort(),
    ) {
        let view = ViewState {
            search: String::new(),
            sort,
            selected_folder: FolderFilter::All,
        };
        let projected = project(&bookmarks, &view);
        prop_assert_eq!(projected.len(), bookmarks.len());
    }

    // Projection borrows; the input collection is untouched.
    #[test]
    fn projection_never_mutates_the_collection(
        bookmarks in proptest::collection::vec(arb_bookmark(), 0..20),
        view in arb_view(),
    ) {
        let before = bookmarks.clone();
        let _ = project(&bookmarks, &view);
        prop_assert_eq!(bookmarks, before);
    }

    // Within the unpinned group under Newest, timestamps never increase.
    #[test]
    fn newest_sort_is_monotonic_within_groups(
        bookmarks in proptest::collection::vec(arb_bookmark(), 0..20),
    ) {
        let view = ViewState {
            search: String::new(),
            sort: SortMode::Newest,
            selected_folder: FolderFilter::All,
        };
        let projected = project(&bookmarks, &view);
        for pair in projected.windows(2) {
            if pair[0].pinned == pair[1].pinned {
                prop_assert!(pair[0].created_at >= pair[1].created_at);
            }
        }
    }
}
