//! Smartmarks — a single-user smart bookmark manager with OAuth sessions
//! and fixed-folder organization.
//!
//! This library crate exposes all modules for use by the binaries and
//! integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod rpc_handler;
pub mod services;
pub mod types;
