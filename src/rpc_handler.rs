//! RPC method handler for the Smartmarks JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! The `handle_method` function dispatches JSON-RPC method calls to the
//! reconciler, view engine, and services via the `App` struct. Navigation
//! decisions are returned as data — the front end owns the actual location.

use std::str::FromStr;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::session_reconciler::ReconcileDecision;
use crate::managers::view_engine::{MutationOutcome, RejectReason};
use crate::services::auth_provider::AuthProviderTrait;
use crate::services::favicon;
use crate::services::navigation::{Navigator, Route};
use crate::types::bookmark::{BookmarkDraft, BookmarkEdit};
use crate::types::folder::{Category, FolderFilter, FOLDERS};
use crate::types::session::{AuthEvent, AuthEventKind, AuthSession};
use crate::types::view::{SortMode, ViewAction};

/// Navigator that records decisions for the response payload instead of
/// touching a real location.
#[derive(Default)]
struct CollectingNav {
    navigate: Option<&'static str>,
    opened: Option<String>,
}

impl Navigator for CollectingNav {
    fn navigate_to(&mut self, route: Route) {
        self.navigate = Some(route.path());
    }

    fn open_in_new_tab(&mut self, url: &str) {
        self.opened = Some(url.to_string());
    }
}

fn outcome_to_json(outcome: &MutationOutcome) -> Value {
    match outcome {
        MutationOutcome::Applied => json!({"ok": true}),
        MutationOutcome::Rejected(reason) => {
            let reason = match reason {
                RejectReason::EmptyTitle => "empty title",
                RejectReason::EmptyUrl => "empty url",
                RejectReason::NoOwner => "no owner",
            };
            json!({"ok": false, "rejected": reason})
        }
        MutationOutcome::Failed(e) => json!({"ok": false, "error": e.to_string()}),
    }
}

fn decision_str(decision: ReconcileDecision) -> &'static str {
    match decision {
        ReconcileDecision::AdoptSession => "adopt_session",
        ReconcileDecision::AwaitOAuthExchange => "await_oauth_exchange",
        ReconcileDecision::RecheckSession => "recheck_session",
        ReconcileDecision::RedirectToLogin => "redirect_to_login",
    }
}

fn parse_category(params: &Value) -> Option<Category> {
    params
        .get("category")
        .and_then(|v| v.as_str())
        .and_then(|s| Category::from_str(s).ok())
}

fn parse_event(value: &Value) -> Result<AuthEvent, String> {
    let kind = value
        .get("kind")
        .cloned()
        .ok_or("missing event kind")
        .and_then(|k| {
            serde_json::from_value::<AuthEventKind>(k).map_err(|_| "invalid event kind")
        })?;
    let session = match value.get("session") {
        Some(Value::Null) | None => None,
        Some(s) => Some(
            serde_json::from_value::<AuthSession>(s.clone())
                .map_err(|e| format!("invalid session: {}", e))?,
        ),
    };
    Ok(AuthEvent { kind, session })
}

fn bookmark_json(b: &crate::types::bookmark::Bookmark) -> Value {
    json!({
        "id": b.id,
        "title": b.title,
        "url": b.url,
        "category": b.category.map(|c| c.as_str()),
        "favorite": b.favorite,
        "pinned": b.pinned,
        "click_count": b.click_count,
        "created_at": b.created_at,
        "domain": favicon::display_domain(&b.url),
    })
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        // ─── Auth ───
        "auth.login" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let url = a.login_url().map_err(|e| e.to_string())?;
            Ok(json!({"authorize_url": url}))
        }
        "auth.check" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let mut nav = CollectingNav::default();
            a.startup(&mut nav);
            let user = a.auth.get_current_user().map_err(|e| e.to_string())?;
            Ok(json!({"user": user, "navigate": nav.navigate}))
        }
        "auth.event" => {
            let event = parse_event(params.get("event").unwrap_or(&Value::Null))?;
            let fragment = params.get("fragment").and_then(|v| v.as_str()).unwrap_or("");
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let mut nav = CollectingNav::default();
            let decision = a.handle_auth_event(&event, fragment, &mut nav);
            Ok(json!({"decision": decision_str(decision), "navigate": nav.navigate}))
        }
        "auth.session" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let user = a.auth.get_current_user().map_err(|e| e.to_string())?;
            Ok(json!({"user": user}))
        }
        "auth.logout" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let mut nav = CollectingNav::default();
            a.logout(&mut nav);
            Ok(json!({"ok": true, "navigate": nav.navigate}))
        }

        // ─── Bookmarks ───
        "bookmark.add" => {
            let title = params.get("title").and_then(|v| v.as_str()).ok_or("missing title")?;
            let url = params.get("url").and_then(|v| v.as_str()).ok_or("missing url")?;
            let draft = BookmarkDraft {
                title: title.to_string(),
                url: url.to_string(),
                category: parse_category(params),
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a.add_bookmark(&draft);
            Ok(outcome_to_json(&outcome))
        }
        "bookmark.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let arr: Vec<Value> = a.engine.bookmarks().iter().map(bookmark_json).collect();
            Ok(json!(arr))
        }
        "bookmark.view" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            if let Some(search) = params.get("search").and_then(|v| v.as_str()) {
                a.dispatch(ViewAction::SetSearch(search.to_string()));
            }
            if let Some(sort) = params.get("sort").and_then(|v| v.as_str()) {
                let mode = serde_json::from_value::<SortMode>(json!(sort))
                    .map_err(|_| format!("invalid sort mode: {}", sort))?;
                a.dispatch(ViewAction::SetSort(mode));
            }
            if let Some(folder) = params.get("folder").and_then(|v| v.as_str()) {
                a.dispatch(ViewAction::SelectFolder(FolderFilter::parse(folder)));
            }
            let arr: Vec<Value> = a.projection().into_iter().map(bookmark_json).collect();
            Ok(json!(arr))
        }
        "bookmark.update" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let title = params.get("title").and_then(|v| v.as_str()).ok_or("missing title")?;
            let url = params.get("url").and_then(|v| v.as_str()).ok_or("missing url")?;
            let edit = BookmarkEdit {
                title: title.to_string(),
                url: url.to_string(),
                category: parse_category(params),
            };
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a.update_bookmark(id, &edit);
            Ok(outcome_to_json(&outcome))
        }
        "bookmark.delete" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a.delete_bookmark(id);
            Ok(outcome_to_json(&outcome))
        }
        "bookmark.click" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let count = params.get("click_count").and_then(|v| v.as_i64()).unwrap_or(0);
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let outcome = a.register_click(id, count);
            Ok(outcome_to_json(&outcome))
        }
        "bookmark.activate" => {
            let id = params.get("id").and_then(|v| v.as_str()).ok_or("missing id")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let mut nav = CollectingNav::default();
            if a.activate(id, &mut nav) {
                Ok(json!({"ok": true, "open": nav.opened}))
            } else {
                Err(format!("bookmark not found: {}", id))
            }
        }
        "bookmark.export" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let path = params.get("path").and_then(|v| v.as_str()).ok_or("missing path")?;
            let rows = a.export_to(path).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "rows": rows, "path": path}))
        }

        // ─── Folders ───
        "folders.list" => {
            let arr: Vec<Value> = FOLDERS
                .iter()
                .map(|f| json!({"id": f.id, "label": f.label, "icon": f.icon}))
                .collect();
            Ok(json!(arr))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
