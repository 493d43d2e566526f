//! Passphrase-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! PBKDF2 stretches a low-entropy passphrase into a 256-bit key.  The
//! iteration count is deliberately high so brute-forcing the passphrase
//! stays expensive; it is configurable via `KdfParams` (loaded from
//! `.subvault.toml` or sensible defaults) but never below a safety floor.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use crate::errors::{Result, SubVaultError};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
const KEY_LEN: usize = 32;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Minimum safe iteration count.  Anything lower makes offline
/// brute-force attacks against the passphrase too cheap.
const MIN_ITERATIONS: u32 = 10_000;

/// Configurable PBKDF2 parameters.
///
/// Maps 1:1 to the `kdf_iterations` field in `Settings` so the CLI can
/// pass whatever the user configured in `.subvault.toml`.
#[derive(Debug, Clone, Copy)]
pub struct KdfParams {
    /// Number of PBKDF2 iterations (default: 100 000).
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Derive a 32-byte master key from a passphrase and salt.
///
/// Uses the default iteration count (100 000).  Prefer
/// `derive_key_with_params` when you have a `Settings`.
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    derive_key_with_params(passphrase, salt, &KdfParams::default())
}

/// Derive a 32-byte master key with explicit PBKDF2 parameters.
///
/// The same passphrase + salt + iterations always produce the same key.
/// Enforces a minimum iteration count to prevent dangerously weak KDF
/// settings.
pub fn derive_key_with_params(
    passphrase: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<[u8; KEY_LEN]> {
    if params.iterations < MIN_ITERATIONS {
        return Err(SubVaultError::KeyDerivationFailed(format!(
            "kdf_iterations must be at least {MIN_ITERATIONS} (got {})",
            params.iterations
        )));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase, salt, params.iterations, &mut key);
    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
