//! Token vault for Smartmarks.
//!
//! Seals session access tokens with AES-256-GCM before they are cached in
//! SQLite, using a key derived with PBKDF2. One-shot encrypt/decrypt per
//! token; the derived key is zeroized when the vault is dropped.

use ring::aead::{self, Aad, BoundKey, Nonce, NonceSequence, UnboundKey, AES_256_GCM};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;
use zeroize::Zeroize;

use crate::types::errors::CryptoError;
use crate::types::session::SealedToken;

/// PBKDF2 iteration count for key derivation.
const PBKDF2_ITERATIONS: u32 = 100_000;

/// AES-256-GCM key length in bytes.
const KEY_LENGTH: usize = 32;

/// AES-256-GCM nonce/IV length in bytes.
const NONCE_LENGTH: usize = 12;

/// AES-256-GCM authentication tag length in bytes.
const TAG_LENGTH: usize = 16;

/// Vault key passphrase and salt. In production this would use a
/// machine-specific identifier; for now a fixed pair.
const VAULT_PASSPHRASE: &str = "smartmarks-session-key-v1";
const VAULT_SALT: &[u8] = b"smartmarks-sess";

/// Trait defining token sealing operations.
pub trait TokenVaultTrait {
    /// Seals a plaintext access token for at-rest storage.
    fn seal(&self, token: &str) -> Result<SealedToken, CryptoError>;
    /// Recovers the plaintext token from its sealed form.
    fn open(&self, sealed: &SealedToken) -> Result<String, CryptoError>;
}

/// A nonce sequence that uses a single nonce value.
/// Used for one-shot encryption/decryption operations.
struct SingleNonce {
    nonce: Option<[u8; NONCE_LENGTH]>,
}

impl SingleNonce {
    fn new(nonce_bytes: [u8; NONCE_LENGTH]) -> Self {
        Self {
            nonce: Some(nonce_bytes),
        }
    }
}

impl NonceSequence for SingleNonce {
    fn advance(&mut self) -> Result<Nonce, ring::error::Unspecified> {
        self.nonce
            .take()
            .map(Nonce::assume_unique_for_key)
            .ok_or(ring::error::Unspecified)
    }
}

/// Token vault implementation using the `ring` crate.
pub struct TokenVault {
    rng: SystemRandom,
    key: Vec<u8>,
}

impl TokenVault {
    /// Creates a vault with the key derived from the built-in passphrase.
    pub fn new() -> Result<Self, CryptoError> {
        let iterations = NonZeroU32::new(PBKDF2_ITERATIONS)
            .ok_or_else(|| CryptoError::KeyDerivation("Invalid iteration count".to_string()))?;

        let mut key = vec![0u8; KEY_LENGTH];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations,
            VAULT_SALT,
            VAULT_PASSPHRASE.as_bytes(),
            &mut key,
        );

        Ok(Self {
            rng: SystemRandom::new(),
            key,
        })
    }
}

impl Drop for TokenVault {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl TokenVaultTrait for TokenVault {
    fn seal(&self, token: &str) -> Result<SealedToken, CryptoError> {
        // Random nonce/IV for this token
        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| CryptoError::RandomGeneration("Failed to generate nonce".to_string()))?;

        let unbound_key = UnboundKey::new(&AES_256_GCM, &self.key)
            .map_err(|_| CryptoError::Encryption("Failed to create encryption key".to_string()))?;

        let nonce_sequence = SingleNonce::new(nonce_bytes);
        let mut sealing_key = aead::SealingKey::new(unbound_key, nonce_sequence);

        let mut in_out = token.as_bytes().to_vec();
        sealing_key
            .seal_in_place_append_tag(Aad::empty(), &mut in_out)
            .map_err(|_| CryptoError::Encryption("Encryption operation failed".to_string()))?;

        // ring appends the auth tag to the ciphertext; split them.
        let tag_start = in_out.len() - TAG_LENGTH;
        let auth_tag = in_out[tag_start..].to_vec();
        let ciphertext = in_out[..tag_start].to_vec();

        Ok(SealedToken {
            ciphertext,
            iv: nonce_bytes.to_vec(),
            auth_tag,
        })
    }

    fn open(&self, sealed: &SealedToken) -> Result<String, CryptoError> {
        if sealed.iv.len() != NONCE_LENGTH {
            return Err(CryptoError::Decryption(format!(
                "IV must be {} bytes, got {}",
                NONCE_LENGTH,
                sealed.iv.len()
            )));
        }
        if sealed.auth_tag.len() != TAG_LENGTH {
            return Err(CryptoError::Decryption(format!(
                "Auth tag must be {} bytes, got {}",
                TAG_LENGTH,
                sealed.auth_tag.len()
            )));
        }

        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        nonce_bytes.copy_from_slice(&sealed.iv);

        let unbound_key = UnboundKey::new(&AES_256_GCM, &self.key)
            .map_err(|_| CryptoError::Decryption("Failed to create decryption key".to_string()))?;

        let nonce_sequence = SingleNonce::new(nonce_bytes);
        let mut opening_key = aead::OpeningKey::new(unbound_key, nonce_sequence);

        // ring expects ciphertext + auth tag concatenated
        let mut in_out = Vec::with_capacity(sealed.ciphertext.len() + sealed.auth_tag.len());
        in_out.extend_from_slice(&sealed.ciphertext);
        in_out.extend_from_slice(&sealed.auth_tag);

        let plaintext = opening_key
            .open_in_place(Aad::empty(), &mut in_out)
            .map_err(|_| {
                CryptoError::Decryption(
                    "Decryption failed: invalid key or corrupted data".to_string(),
                )
            })?;

        String::from_utf8(plaintext.to_vec())
            .map_err(|e| CryptoError::Decryption(format!("Token is not valid UTF-8: {}", e)))
    }
}
