//! Cryptographic primitives for SubVault.
//!
//! This module provides:
//! - AES-256-GCM sealing and unsealing (`sealing`)
//! - PBKDF2-HMAC-SHA256 passphrase-based key derivation (`kdf`)
//! - The zeroize-on-drop master key wrapper (`keys`)

pub mod kdf;
pub mod keys;
pub mod sealing;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, unseal, derive_key, ...};
pub use kdf::{derive_key, derive_key_with_params, generate_salt, KdfParams, SALT_LEN};
pub use keys::MasterKey;
pub use sealing::{seal, unseal, NONCE_LEN, TAG_LEN};
