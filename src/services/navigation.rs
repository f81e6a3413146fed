//! Navigation collaborator for Smartmarks.
//!
//! The core never touches a real browser location; it asks a [`Navigator`]
//! to move between the login and dashboard screens or to open a bookmark in
//! a new browsing context.

/// Application screens the reconciler can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Dashboard => "/dashboard",
        }
    }
}

/// Trait for the navigation collaborator.
pub trait Navigator {
    fn navigate_to(&mut self, route: Route);
    /// Opens a bookmark URL in a new browsing context. Not gated on any
    /// pending write.
    fn open_in_new_tab(&mut self, url: &str);
}
