//! Persisted vault blob.
//!
//! The only thing ever written to durable storage is this record:
//!
//! ```text
//! { "salt": <base64, 16 bytes>, "iv": <base64, 12 bytes>, "data": <base64, ciphertext+tag> }
//! ```
//!
//! The plaintext vault exists only in memory while unlocked.  The three
//! fields serialize as base64 strings rather than raw byte arrays.

use serde::{Deserialize, Serialize};

use crate::crypto::{NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::errors::{Result, SubVaultError};

/// The sealed vault as it is persisted: salt, nonce and ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBlob {
    /// Salt fed into key derivation (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub salt: Vec<u8>,

    /// AES-GCM nonce used for this ciphertext (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub iv: Vec<u8>,

    /// Ciphertext with the 16-byte auth tag attached (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub data: Vec<u8>,
}

impl EncryptedBlob {
    /// Check the structural shape of a blob: exact salt and nonce
    /// lengths, and a ciphertext at least one auth tag long.
    ///
    /// This catches malformed files at the storage boundary; a blob
    /// that is well-formed but fails the tag check later surfaces as
    /// `AuthenticationFailed` instead.
    pub fn validate(&self) -> Result<()> {
        if self.salt.len() != SALT_LEN {
            return Err(SubVaultError::InvalidBlobFormat(format!(
                "salt must be {SALT_LEN} bytes (got {})",
                self.salt.len()
            )));
        }
        if self.iv.len() != NONCE_LEN {
            return Err(SubVaultError::InvalidBlobFormat(format!(
                "iv must be {NONCE_LEN} bytes (got {})",
                self.iv.len()
            )));
        }
        if self.data.len() < TAG_LEN {
            return Err(SubVaultError::InvalidBlobFormat(
                "ciphertext shorter than the auth tag".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded Vec<u8> fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
