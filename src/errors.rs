use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in SubVault.
#[derive(Debug, Error)]
pub enum SubVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication failed — wrong passphrase or corrupted vault")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("No vault found — run `subvault init` first")]
    VaultNotFound,

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Invalid vault blob: {0}")]
    InvalidBlobFormat(String),

    #[error("Vault is locked — unlock it first")]
    VaultLocked,

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Credential '{0}' not found")]
    CredentialNotFound(String),

    #[error("Subscription '{0}' not found")]
    SubscriptionNotFound(String),

    // --- Storage errors ---
    #[error("Could not save vault: {0} — changes were not persisted")]
    PersistenceFailed(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for SubVault results.
pub type Result<T> = std::result::Result<T, SubVaultError>;
