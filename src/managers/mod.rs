// Smartmarks state managers
// Managers handle the stateful cores: the bookmark store, the in-memory
// view engine, and the auth-event reconciliation machine.

pub mod bookmark_store;
pub mod session_reconciler;
pub mod view_engine;
