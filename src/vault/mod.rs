//! Vault module — data model, billing schedule, and lifecycle control.
//!
//! This module provides:
//! - `Credential`, `Subscription` and `VaultData` record types (`model`)
//! - Pure billing-cycle computations (`schedule`)
//! - The persisted `EncryptedBlob` encoding (`blob`)
//! - The `VaultSession` lifecycle controller (`session`)

pub mod blob;
pub mod model;
pub mod schedule;
pub mod session;

// Re-export the most commonly used items.
pub use blob::EncryptedBlob;
pub use model::{
    Credential, CredentialDraft, FrequencyUnit, Subscription, SubscriptionDraft, VaultData,
};
pub use schedule::{cycle_progress, days_remaining, next_renewal, DaysRemaining};
pub use session::VaultSession;
