//! Smartmarks — a single-user smart bookmark manager.
//!
//! Entry point: runs an interactive console walkthrough of the core —
//! session reconciliation, bookmark CRUD, projection, and export — against
//! an in-memory database.

use smartmarks::app::App;
use smartmarks::database::Database;
use smartmarks::managers::bookmark_store::SqliteBookmarkStore;
use smartmarks::managers::session_reconciler::{
    has_oauth_fragment, ReconcileDecision, SessionReconciler,
};
use smartmarks::managers::view_engine::{project, ViewEngine};
use smartmarks::services::export_service::CsvExporter;
use smartmarks::services::favicon;
use smartmarks::services::navigation::{Navigator, Route};
use smartmarks::types::bookmark::BookmarkDraft;
use smartmarks::types::folder::{Category, FolderFilter, FOLDERS};
use smartmarks::types::session::{AuthEvent, AuthEventKind, AuthSession, User};
use smartmarks::types::view::{SortMode, ViewState};

/// Navigator that prints where the UI would go.
struct ConsoleNav;

impl Navigator for ConsoleNav {
    fn navigate_to(&mut self, route: Route) {
        println!("  → navigate to {}", route.path());
    }

    fn open_in_new_tab(&mut self, url: &str) {
        println!("  → open in new tab: {}", url);
    }
}

fn main() {
    println!();
    println!("Smartmarks v{} — Demo Mode", env!("CARGO_PKG_VERSION"));
    println!("Single-user smart bookmark manager");
    println!();

    demo_session_reconciler();
    demo_bookmarks();
    demo_projection();
    demo_favicon();
    demo_app();

    println!();
    println!("All components demonstrated successfully.");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────");
}

fn demo_user() -> User {
    User {
        id: "user-1".to_string(),
        display_name: "Demo User".to_string(),
        avatar_url: None,
    }
}

fn demo_session() -> AuthSession {
    AuthSession {
        user: demo_user(),
        access_token: "demo-access-token".to_string(),
        expires_at: 0,
    }
}

fn demo_session_reconciler() {
    section("Session Reconciler");

    let mut reconciler = SessionReconciler::new();

    // A "no session" snapshot taken mid-OAuth-redirect must not bounce us
    let fragment = "#access_token=abc&token_type=bearer";
    let event = AuthEvent {
        kind: AuthEventKind::InitialSession,
        session: None,
    };
    let decision = reconciler.on_event(&event, has_oauth_fragment(fragment));
    println!("  no-session event with pending fragment → {:?}", decision);
    assert_eq!(decision, ReconcileDecision::AwaitOAuthExchange);

    // The session materializes
    let event = AuthEvent {
        kind: AuthEventKind::SignedIn,
        session: Some(demo_session()),
    };
    let decision = reconciler.on_event(&event, false);
    println!("  signed-in event → {:?}", decision);
    assert_eq!(decision, ReconcileDecision::AdoptSession);

    println!("  ✓ Session Reconciler OK");
    println!();
}

fn demo_bookmarks() {
    section("Bookmark View Engine");

    let db = Database::open_in_memory().expect("Failed to open database");
    let mut store = SqliteBookmarkStore::new(db.connection());
    let mut engine = ViewEngine::new();
    engine.set_owner(&demo_user());

    for (title, url, category) in [
        ("Rust Book", "doc.rust-lang.org/book", Some(Category::ReadingList)),
        ("GitHub", "https://github.com", Some(Category::Work)),
        ("Hacker News", "news.ycombinator.com", None),
    ] {
        let outcome = engine.create(
            &mut store,
            &BookmarkDraft {
                title: title.to_string(),
                url: url.to_string(),
                category,
            },
        );
        println!("  create {:<12} → {:?}", title, outcome);
    }

    println!("  {} bookmarks loaded, newest first:", engine.bookmarks().len());
    for b in engine.bookmarks() {
        println!("    {} [{}] {}", b.title, b.effective_category(), b.url);
    }

    let id = engine.bookmarks()[0].id.clone();
    let count = engine.bookmarks()[0].click_count;
    engine.register_click(&mut store, &id, count);
    println!(
        "  registered click → count {}",
        engine.get(&id).map(|b| b.click_count).unwrap_or(0)
    );

    let rows = engine.export_rows();
    let csv = CsvExporter::new().render(&rows);
    println!("  export renders {} lines of CSV", csv.lines().count());

    println!("  ✓ View Engine OK");
    println!();
}

fn demo_projection() {
    section("Projection");

    let db = Database::open_in_memory().expect("Failed to open database");
    let mut store = SqliteBookmarkStore::new(db.connection());
    let mut engine = ViewEngine::new();
    engine.set_owner(&demo_user());

    for (title, url) in [("Banana", "banana.example"), ("apple", "apple.example")] {
        engine.create(
            &mut store,
            &BookmarkDraft {
                title: title.to_string(),
                url: url.to_string(),
                category: None,
            },
        );
    }

    let view = ViewState {
        search: String::new(),
        sort: SortMode::Alphabet,
        selected_folder: FolderFilter::All,
    };
    let titles: Vec<&str> = project(engine.bookmarks(), &view)
        .iter()
        .map(|b| b.title.as_str())
        .collect();
    println!(
        "  alphabet sort in folder '{}': {:?}",
        view.selected_folder.as_str(),
        titles
    );
    assert_eq!(titles, vec!["apple", "Banana"]);

    println!("  {} sidebar folders ({} is the view-only sentinel)", FOLDERS.len(), FOLDERS[0].id);
    println!("  ✓ Projection OK");
    println!();
}

fn demo_favicon() {
    section("Favicon / Initials");

    for url in ["https://www.example.com/page", "github.com", "::not a url::"] {
        let domain = favicon::display_domain(url);
        println!("  {:<30} → {} ({})", url, domain, favicon::initials(&domain));
    }
    println!("  ✓ Favicon helpers OK");
    println!();
}

fn demo_app() {
    section("App Core");

    let mut app = App::new(":memory:").expect("Failed to initialize app");
    let mut nav = ConsoleNav;

    let event = AuthEvent {
        kind: AuthEventKind::SignedIn,
        session: Some(demo_session()),
    };
    app.handle_auth_event(&event, "", &mut nav);
    println!("  adopted session for {}", demo_user().display_name);

    let outcome = app.add_bookmark(&BookmarkDraft {
        title: "Example".to_string(),
        url: "example.com".to_string(),
        category: None,
    });
    assert!(outcome.is_applied());
    println!("  {} bookmark(s) after add", app.engine.bookmarks().len());

    app.logout(&mut nav);
    println!("  {} bookmark(s) after logout", app.engine.bookmarks().len());

    println!("  ✓ App Core OK");
    println!();
}
