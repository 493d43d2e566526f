//! AES-256-GCM authenticated sealing of the vault payload.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce and
//! returns it alongside the ciphertext, since the persisted blob
//! stores the nonce as its own field.  `unseal` verifies the auth tag
//! and decrypts; a wrong key, a tampered ciphertext, and a malformed
//! payload all surface as the same opaque `AuthenticationFailed` so
//! callers cannot tell which check tripped.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use crate::errors::{Result, SubVaultError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag appended to the ciphertext.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the fresh nonce and the ciphertext (with the 16-byte auth
/// tag attached) separately.
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<([u8; NONCE_LEN], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| SubVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Fresh random nonce per call — reuse under the same key is the one
    // forbidden case for GCM.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| SubVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut iv = [0u8; NONCE_LEN];
    iv.copy_from_slice(&nonce);
    Ok((iv, ciphertext))
}

/// Decrypt data that was produced by `seal`.
///
/// Fails with `AuthenticationFailed` if the tag check fails, the key is
/// wrong, or the payload is malformed — deliberately indistinguishable.
pub fn unseal(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN || ciphertext.len() < TAG_LEN {
        return Err(SubVaultError::AuthenticationFailed);
    }

    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|_| SubVaultError::AuthenticationFailed)?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| SubVaultError::AuthenticationFailed)
}
