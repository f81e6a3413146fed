//! App Core for Smartmarks.
//!
//! Central struct wiring the database, auth provider, session reconciler,
//! and view engine together, and driving the dashboard lifecycle: identity
//! adoption, initial fetch, mutations, export, and logout.

use std::sync::Arc;

use crate::database::connection::Database;
use crate::managers::bookmark_store::SqliteBookmarkStore;
use crate::managers::session_reconciler::{has_oauth_fragment, ReconcileDecision, SessionReconciler};
use crate::managers::view_engine::{project, MutationOutcome, ViewEngine};
use crate::services::auth_provider::{AuthEventBus, AuthProviderTrait, LocalAuthProvider};
use crate::services::export_service::{CsvExporter, SpreadsheetWriter};
use crate::services::navigation::{Navigator, Route};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::bookmark::{Bookmark, BookmarkDraft, BookmarkEdit};
use crate::types::errors::{AuthError, ExportError};
use crate::types::session::{AuthEvent, AuthSession};
use crate::types::view::{reduce, ViewAction, ViewState};

/// Central application struct.
///
/// The bookmark store is created on demand via `db.connection()` because it
/// borrows the connection with a lifetime parameter.
pub struct App {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub auth: LocalAuthProvider,
    pub auth_events: AuthEventBus,
    pub reconciler: SessionReconciler,
    pub engine: ViewEngine,
    pub view: ViewState,
}

impl App {
    /// Creates a new App, loading settings and opening the database.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(None);
        let settings = settings_engine.load().unwrap_or_default();

        let db = Arc::new(Database::open(db_path)?);
        let auth = LocalAuthProvider::new(db.clone(), &settings.backend_url)
            .map_err(|e| format!("Auth provider init failed: {}", e))?;

        Ok(Self {
            db,
            settings_engine,
            auth,
            auth_events: AuthEventBus::new(),
            reconciler: SessionReconciler::new(),
            engine: ViewEngine::new(),
            view: ViewState::default(),
        })
    }

    /// Startup identity check: an existing session goes straight to the
    /// dashboard; without one the user is sent to the login screen.
    pub fn startup<N: Navigator>(&mut self, nav: &mut N) {
        match self.auth.get_current_session() {
            Ok(Some(session)) => {
                let _ = self.reconciler.confirm_session(Some(&session));
                self.adopt(&session, nav);
            }
            _ => {
                let _ = self.reconciler.confirm_session(None);
                nav.navigate_to(Route::Login);
            }
        }
    }

    fn adopt<N: Navigator>(&mut self, session: &AuthSession, nav: &mut N) {
        let _ = self.auth.adopt_session(session);
        self.engine.set_owner(&session.user);
        self.reload();
        nav.navigate_to(Route::Dashboard);
    }

    /// Feeds one auth-state change event through the reconciler, fanning it
    /// out to any bus subscribers first.
    ///
    /// `fragment` is the current location fragment; an unconsumed OAuth
    /// token in it suppresses the redirect-to-login race.
    pub fn handle_auth_event<N: Navigator>(
        &mut self,
        event: &AuthEvent,
        fragment: &str,
        nav: &mut N,
    ) -> ReconcileDecision {
        self.auth_events.emit(event);
        let decision = self.reconciler.on_event(event, has_oauth_fragment(fragment));
        match decision {
            ReconcileDecision::AdoptSession => {
                if let Some(session) = &event.session {
                    self.adopt(session, nav);
                }
                decision
            }
            ReconcileDecision::RecheckSession => {
                let current = self.auth.get_current_session().ok().flatten();
                let confirmed = self.reconciler.confirm_session(current.as_ref());
                match (&confirmed, current) {
                    (ReconcileDecision::AdoptSession, Some(session)) => {
                        self.adopt(&session, nav);
                    }
                    _ => nav.navigate_to(Route::Login),
                }
                confirmed
            }
            ReconcileDecision::AwaitOAuthExchange | ReconcileDecision::RedirectToLogin => decision,
        }
    }

    /// Builds the authorize URL for the configured OAuth provider.
    pub fn login_url(&self) -> Result<String, AuthError> {
        let settings = self.settings_engine.get_settings();
        self.auth
            .sign_in_with_provider(&settings.oauth_provider, &settings.redirect_to)
    }

    /// Invalidates the backend session, tears down local state, and returns
    /// to the login screen — unconditionally.
    pub fn logout<N: Navigator>(&mut self, nav: &mut N) {
        let _ = self.auth.sign_out();
        let _ = self.reconciler.logout();
        self.engine.clear();
        self.view = ViewState::default();
        nav.navigate_to(Route::Login);
    }

    /// Replaces the in-memory collection from the store.
    pub fn reload(&mut self) {
        let store = SqliteBookmarkStore::new(self.db.connection());
        self.engine.load(&store);
    }

    pub fn add_bookmark(&mut self, draft: &BookmarkDraft) -> MutationOutcome {
        let mut store = SqliteBookmarkStore::new(self.db.connection());
        self.engine.create(&mut store, draft)
    }

    pub fn update_bookmark(&mut self, id: &str, edit: &BookmarkEdit) -> MutationOutcome {
        let mut store = SqliteBookmarkStore::new(self.db.connection());
        self.engine.update(&mut store, id, edit)
    }

    pub fn delete_bookmark(&mut self, id: &str) -> MutationOutcome {
        let mut store = SqliteBookmarkStore::new(self.db.connection());
        self.engine.delete(&mut store, id)
    }

    pub fn register_click(&mut self, id: &str, current_count: i64) -> MutationOutcome {
        let mut store = SqliteBookmarkStore::new(self.db.connection());
        self.engine.register_click(&mut store, id, current_count)
    }

    /// Opens a bookmark: click registration is fire-and-forget relative to
    /// the navigation.
    pub fn activate<N: Navigator>(&mut self, id: &str, nav: &mut N) -> bool {
        let mut store = SqliteBookmarkStore::new(self.db.connection());
        match self.engine.activate(&mut store, id) {
            Some(url) => {
                nav.open_in_new_tab(&url);
                true
            }
            None => false,
        }
    }

    /// Applies a view action to the current view state.
    pub fn dispatch(&mut self, action: ViewAction) {
        self.view = reduce(self.view.clone(), action);
    }

    /// The filtered and sorted projection for the current view inputs.
    pub fn projection(&self) -> Vec<&Bookmark> {
        project(self.engine.bookmarks(), &self.view)
    }

    /// Exports every loaded bookmark (not just the projection) to a CSV file.
    pub fn export_to(&self, path: &str) -> Result<usize, ExportError> {
        let rows = self.engine.export_rows();
        CsvExporter::new().write_rows(&rows, path)?;
        Ok(rows.len())
    }
}
