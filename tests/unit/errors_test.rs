//! Unit tests for error types: Display formatting and trait-object use.

use std::error::Error;

use smartmarks::types::errors::{
    AuthError, CryptoError, ExportError, SettingsError, StoreError,
};

#[test]
fn test_store_error_display() {
    assert_eq!(
        StoreError::NotFound("abc-123".to_string()).to_string(),
        "Bookmark not found: abc-123"
    );
    assert_eq!(
        StoreError::DatabaseError("disk full".to_string()).to_string(),
        "Bookmark store error: disk full"
    );
}

#[test]
fn test_store_error_equality() {
    assert_eq!(
        StoreError::NotFound("x".to_string()),
        StoreError::NotFound("x".to_string())
    );
    assert_ne!(
        StoreError::NotFound("x".to_string()),
        StoreError::DatabaseError("x".to_string())
    );
}

#[test]
fn test_auth_error_display() {
    assert_eq!(AuthError::NotAuthenticated.to_string(), "Not authenticated");
    assert_eq!(
        AuthError::DatabaseError("locked".to_string()).to_string(),
        "Auth database error: locked"
    );
    assert_eq!(
        AuthError::CryptoError("bad tag".to_string()).to_string(),
        "Auth crypto error: bad tag"
    );
}

#[test]
fn test_crypto_error_display() {
    assert_eq!(
        CryptoError::KeyDerivation("pbkdf2".to_string()).to_string(),
        "Key derivation failed: pbkdf2"
    );
    assert_eq!(
        CryptoError::Encryption("seal".to_string()).to_string(),
        "Encryption failed: seal"
    );
    assert_eq!(
        CryptoError::Decryption("open".to_string()).to_string(),
        "Decryption failed: open"
    );
    assert_eq!(
        CryptoError::RandomGeneration("rng".to_string()).to_string(),
        "Random generation failed: rng"
    );
}

#[test]
fn test_export_and_settings_error_display() {
    assert_eq!(
        ExportError::IoError("permission denied".to_string()).to_string(),
        "Export I/O error: permission denied"
    );
    assert_eq!(
        SettingsError::IoError("missing dir".to_string()).to_string(),
        "Settings I/O error: missing dir"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
}

/// All error types can be boxed behind `dyn Error`.
#[test]
fn test_errors_as_trait_objects() {
    let errors: Vec<Box<dyn Error>> = vec![
        Box::new(StoreError::NotFound("id".to_string())),
        Box::new(AuthError::NotAuthenticated),
        Box::new(CryptoError::Encryption("e".to_string())),
        Box::new(ExportError::IoError("io".to_string())),
        Box::new(SettingsError::IoError("io".to_string())),
    ];
    for err in &errors {
        assert!(!err.to_string().is_empty());
    }
}
