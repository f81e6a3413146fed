use serde::{Deserialize, Serialize};

/// The authenticated user's identity, used for rendering and as the owner
/// written into new bookmark records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// A transient authentication session delivered by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
    /// Unix seconds; `0` means no recorded expiry.
    pub expires_at: i64,
}

/// Kinds of auth-state change notifications emitted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEventKind {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// An auth-state change event: a kind plus an optional session.
///
/// The reconciler keys its decisions on the presence of the session, not
/// the kind — a `SIGNED_OUT` carrying a session would still be adopted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub session: Option<AuthSession>,
}

/// A session access token sealed with AES-256-GCM for at-rest storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedToken {
    pub ciphertext: Vec<u8>,
    pub iv: Vec<u8>,
    pub auth_tag: Vec<u8>,
}
