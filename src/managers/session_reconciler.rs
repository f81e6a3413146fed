//! Session Reconciler for Smartmarks.
//!
//! Maps auth-state change events to navigation decisions. The machine is
//! pure: the ambient URL fragment is passed in as a flag, so the
//! race-avoidance rule around in-flight OAuth redirects is unit-testable
//! without a browser location.

use crate::types::session::{AuthEvent, AuthSession};

/// Current authentication knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// Nothing established yet.
    Unknown,
    Authenticated,
    /// Confirmed no session exists.
    Unauthenticated,
}

/// What the caller should do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileDecision {
    /// Adopt the event's session as the current identity and trigger the
    /// initial fetch.
    AdoptSession,
    /// A token fragment is still being exchanged; do nothing — a session is
    /// expected to materialize imminently.
    AwaitOAuthExchange,
    /// Re-confirm by requesting the current session, then feed the answer to
    /// [`SessionReconciler::confirm_session`].
    RecheckSession,
    /// Navigate to the login screen.
    RedirectToLogin,
}

/// Returns true when the URL fragment carries an unconsumed OAuth token.
pub fn has_oauth_fragment(fragment: &str) -> bool {
    fragment.contains("access_token=") || fragment.contains("refresh_token=")
}

/// The auth-event state machine.
pub struct SessionReconciler {
    state: AuthState,
}

impl SessionReconciler {
    pub fn new() -> Self {
        Self {
            state: AuthState::Unknown,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Handles one auth event.
    ///
    /// An event delivering a session is adopted regardless of its kind. A
    /// "no session" event is treated as transient while an OAuth token
    /// fragment is pending — without that rule, a snapshot taken
    /// mid-redirect would bounce the user back to the login page even
    /// though they are about to be authenticated.
    pub fn on_event(&mut self, event: &AuthEvent, pending_oauth_fragment: bool) -> ReconcileDecision {
        match &event.session {
            Some(_) => {
                self.state = AuthState::Authenticated;
                ReconcileDecision::AdoptSession
            }
            None if pending_oauth_fragment => ReconcileDecision::AwaitOAuthExchange,
            None => ReconcileDecision::RecheckSession,
        }
    }

    /// Resolves a `RecheckSession` with the provider's answer.
    pub fn confirm_session(&mut self, current: Option<&AuthSession>) -> ReconcileDecision {
        match current {
            Some(_) => {
                self.state = AuthState::Authenticated;
                ReconcileDecision::AdoptSession
            }
            None => {
                self.state = AuthState::Unauthenticated;
                ReconcileDecision::RedirectToLogin
            }
        }
    }

    /// Explicit user sign-out: unconditionally back to the login screen.
    /// The backend session is invalidated by the caller before this.
    pub fn logout(&mut self) -> ReconcileDecision {
        self.state = AuthState::Unauthenticated;
        ReconcileDecision::RedirectToLogin
    }
}

impl Default for SessionReconciler {
    fn default() -> Self {
        Self::new()
    }
}
