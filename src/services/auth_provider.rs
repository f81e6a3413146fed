//! Auth/session provider for Smartmarks.
//!
//! Wraps the hosted OAuth backend: builds the provider authorize URL for
//! sign-in, caches the adopted session in SQLite with the access token
//! sealed by [`TokenVault`], and fans auth-state change events out to
//! subscribers. Subscriptions are RAII guards — dropping one releases the
//! listener, so nothing dangles across navigations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;

use crate::database::connection::Database;
use crate::services::token_vault::{TokenVault, TokenVaultTrait};
use crate::types::errors::AuthError;
use crate::types::session::{AuthEvent, AuthSession, SealedToken, User};

/// The single-row key used for the cached session.
const SESSION_ROW_ID: &str = "current";

/// Trait defining the auth/session provider operations the dashboard needs.
pub trait AuthProviderTrait {
    fn get_current_user(&self) -> Result<Option<User>, AuthError>;
    fn get_current_session(&self) -> Result<Option<AuthSession>, AuthError>;
    /// Returns the authorize URL the navigation layer should open.
    fn sign_in_with_provider(&self, provider: &str, redirect_to: &str) -> Result<String, AuthError>;
    /// Invalidates the cached session at the backend.
    fn sign_out(&mut self) -> Result<(), AuthError>;
}

/// Auth provider backed by SQLite + TokenVault.
pub struct LocalAuthProvider {
    db: Arc<Database>,
    vault: TokenVault,
    backend_url: String,
}

impl LocalAuthProvider {
    pub fn new(db: Arc<Database>, backend_url: &str) -> Result<Self, AuthError> {
        let vault = TokenVault::new().map_err(|e| AuthError::CryptoError(e.to_string()))?;
        Ok(Self {
            db,
            vault,
            backend_url: backend_url.trim_end_matches('/').to_string(),
        })
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Caches a session delivered by the backend, sealing its access token.
    pub fn adopt_session(&self, session: &AuthSession) -> Result<(), AuthError> {
        let sealed = self
            .vault
            .seal(&session.access_token)
            .map_err(|e| AuthError::CryptoError(e.to_string()))?;

        self.db
            .connection()
            .execute(
                "INSERT OR REPLACE INTO auth_sessions \
                 (id, user_id, display_name, avatar_url, encrypted_token, iv, auth_tag, expires_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    SESSION_ROW_ID,
                    session.user.id,
                    session.user.display_name,
                    session.user.avatar_url,
                    sealed.ciphertext,
                    sealed.iv,
                    sealed.auth_tag,
                    session.expires_at,
                    Self::now(),
                ],
            )
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

impl AuthProviderTrait for LocalAuthProvider {
    fn get_current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.get_current_session()?.map(|s| s.user))
    }

    fn get_current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        let conn = self.db.connection();
        let result = conn.query_row(
            "SELECT user_id, display_name, avatar_url, encrypted_token, iv, auth_tag, expires_at \
             FROM auth_sessions WHERE id = ?1",
            params![SESSION_ROW_ID],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    SealedToken {
                        ciphertext: row.get(3)?,
                        iv: row.get(4)?,
                        auth_tag: row.get(5)?,
                    },
                    row.get::<_, i64>(6)?,
                ))
            },
        );

        match result {
            Ok((user_id, display_name, avatar_url, sealed, expires_at)) => {
                let access_token = self
                    .vault
                    .open(&sealed)
                    .map_err(|e| AuthError::CryptoError(e.to_string()))?;
                Ok(Some(AuthSession {
                    user: User {
                        id: user_id,
                        display_name,
                        avatar_url,
                    },
                    access_token,
                    expires_at,
                }))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AuthError::DatabaseError(e.to_string())),
        }
    }

    fn sign_in_with_provider(&self, provider: &str, redirect_to: &str) -> Result<String, AuthError> {
        Ok(format!(
            "{}/auth/v1/authorize?provider={}&redirect_to={}",
            self.backend_url, provider, redirect_to
        ))
    }

    fn sign_out(&mut self) -> Result<(), AuthError> {
        self.db
            .connection()
            .execute("DELETE FROM auth_sessions", [])
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

type Handler = Box<dyn Fn(&AuthEvent) + Send>;
type HandlerMap = Arc<Mutex<HashMap<u64, Handler>>>;

/// Fan-out for auth-state change notifications.
#[derive(Clone, Default)]
pub struct AuthEventBus {
    handlers: HandlerMap,
    next_id: Arc<Mutex<u64>>,
}

impl AuthEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler. The returned guard unsubscribes on drop.
    pub fn subscribe<F>(&self, handler: F) -> AuthSubscription
    where
        F: Fn(&AuthEvent) + Send + 'static,
    {
        let id = {
            let mut next = self.next_id.lock().expect("auth bus poisoned");
            *next += 1;
            *next
        };
        self.handlers
            .lock()
            .expect("auth bus poisoned")
            .insert(id, Box::new(handler));
        AuthSubscription {
            id,
            handlers: Arc::clone(&self.handlers),
        }
    }

    /// Delivers an event to every live subscriber.
    pub fn emit(&self, event: &AuthEvent) {
        let handlers = self.handlers.lock().expect("auth bus poisoned");
        for handler in handlers.values() {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().expect("auth bus poisoned").len()
    }
}

/// RAII subscription guard: removes the handler from the bus on drop.
pub struct AuthSubscription {
    id: u64,
    handlers: HandlerMap,
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.remove(&self.id);
        }
    }
}
