use std::fmt;

// === StoreError ===

/// Errors related to bookmark store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Bookmark with the given ID was not found.
    NotFound(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Bookmark not found: {}", id),
            StoreError::DatabaseError(msg) => write!(f, "Bookmark store error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// === AuthError ===

/// Errors related to the auth/session provider.
#[derive(Debug)]
pub enum AuthError {
    /// No session is currently stored.
    NotAuthenticated,
    /// Database operation failed.
    DatabaseError(String),
    /// Sealing or unsealing a session token failed.
    CryptoError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::DatabaseError(msg) => write!(f, "Auth database error: {}", msg),
            AuthError::CryptoError(msg) => write!(f, "Auth crypto error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

// === CryptoError ===

/// Errors related to token sealing operations.
#[derive(Debug)]
pub enum CryptoError {
    /// Failed to derive the sealing key.
    KeyDerivation(String),
    /// Encryption operation failed.
    Encryption(String),
    /// Decryption operation failed.
    Decryption(String),
    /// Failed to generate random bytes.
    RandomGeneration(String),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::KeyDerivation(msg) => write!(f, "Key derivation failed: {}", msg),
            CryptoError::Encryption(msg) => write!(f, "Encryption failed: {}", msg),
            CryptoError::Decryption(msg) => write!(f, "Decryption failed: {}", msg),
            CryptoError::RandomGeneration(msg) => {
                write!(f, "Random generation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for CryptoError {}

// === ExportError ===

/// Errors related to spreadsheet export.
#[derive(Debug)]
pub enum ExportError {
    /// An I/O error occurred while writing the export file.
    IoError(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::IoError(msg) => write!(f, "Export I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
