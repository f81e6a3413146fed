// Smartmarks collaborator services
// Services wrap the surfaces around the core: auth/session provider, token
// sealing, settings, spreadsheet export, favicon derivation, and navigation.

pub mod auth_provider;
pub mod export_service;
pub mod favicon;
pub mod navigation;
pub mod settings_engine;
pub mod token_vault;
