//! Vault lifecycle controller.
//!
//! `VaultSession` is the sole owner of the in-memory vault and the
//! derived key.  It moves between two states: LOCKED (initial, nothing
//! in memory) and UNLOCKED (plaintext vault + master key held).  Every
//! mutation validates its input, builds a new vault snapshot, seals and
//! persists that snapshot, and only then commits it to memory — if the
//! storage write fails, memory stays at the prior snapshot and the
//! error is surfaced as retryable.
//!
//! All calls are expected to be serialized by the caller; the session
//! itself holds no locks.

use chrono::Utc;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::crypto::{
    derive_key_with_params, generate_salt, seal, unseal, KdfParams, MasterKey, SALT_LEN,
};
use crate::errors::{Result, SubVaultError};
use crate::storage::BlobStore;

use super::blob::EncryptedBlob;
use super::model::{
    Credential, CredentialDraft, Subscription, SubscriptionDraft, VaultData,
};
use super::schedule::next_renewal;

/// State held only while the vault is unlocked.
struct Unlocked {
    key: MasterKey,
    /// Salt from vault creation — reused across re-encryptions so the
    /// passphrase keeps mapping to the same key.
    salt: [u8; SALT_LEN],
    data: VaultData,
}

/// The lifecycle controller: unlock, mutate, persist, lock.
pub struct VaultSession<S: BlobStore> {
    store: S,
    kdf: KdfParams,
    state: Option<Unlocked>,
}

impl<S: BlobStore> VaultSession<S> {
    /// Create a locked session over a storage collaborator, using the
    /// default KDF parameters.
    pub fn new(store: S) -> Self {
        Self::with_kdf_params(store, KdfParams::default())
    }

    /// Create a locked session with explicit KDF parameters.
    ///
    /// The iteration count is not recorded in the blob, so the same
    /// parameters must be supplied every time the vault is opened.
    pub fn with_kdf_params(store: S, kdf: KdfParams) -> Self {
        Self {
            store,
            kdf,
            state: None,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Unlock the vault with a passphrase.
    ///
    /// If no blob is stored yet this is vault creation: a fresh salt is
    /// generated and an empty vault is sealed and persisted before the
    /// session transitions to UNLOCKED.  If a blob exists, the key is
    /// derived with its stored salt and the payload unsealed; a wrong
    /// passphrase and a tampered blob are indistinguishable, both
    /// surfacing as `AuthenticationFailed` with the session staying
    /// LOCKED.  Unlocking while already unlocked re-authenticates
    /// against the stored blob.
    pub fn unlock(&mut self, passphrase: &[u8]) -> Result<&VaultData> {
        match self.store.load()? {
            None => self.create(passphrase)?,
            Some(blob) => self.open(passphrase, &blob)?,
        }
        self.data()
    }

    /// Discard the in-memory vault and the derived key.
    ///
    /// The key is zeroized on drop.  Idempotent: locking a locked
    /// session is a no-op.  No persistence side effect — the last
    /// mutation's blob is already durable.
    pub fn lock(&mut self) {
        self.state = None;
    }

    /// Whether the session currently holds an unlocked vault.
    pub fn is_unlocked(&self) -> bool {
        self.state.is_some()
    }

    /// The current vault snapshot, or `VaultLocked`.
    pub fn data(&self) -> Result<&VaultData> {
        self.state
            .as_ref()
            .map(|u| &u.data)
            .ok_or(SubVaultError::VaultLocked)
    }

    // ------------------------------------------------------------------
    // Credential mutations
    // ------------------------------------------------------------------

    /// Add a credential and persist the new snapshot.
    pub fn add_credential(&mut self, draft: CredentialDraft) -> Result<Credential> {
        draft.validate()?;

        let mut next = self.data()?.clone();
        let credential = Credential {
            id: Uuid::new_v4(),
            label: draft.label,
            username: draft.username,
            password: draft.password,
            notes: draft.notes,
            created_at: Utc::now().timestamp_millis(),
        };
        next.credentials.push(credential.clone());

        self.persist(next)?;
        Ok(credential)
    }

    /// Delete a credential and persist the new snapshot.
    ///
    /// Subscriptions referencing it get their `credential_id` cleared —
    /// the reference is a relation, not ownership, so nothing cascades.
    pub fn delete_credential(&mut self, id: Uuid) -> Result<()> {
        let data = self.data()?;
        if data.credential(id).is_none() {
            return Err(SubVaultError::CredentialNotFound(id.to_string()));
        }

        let mut next = data.clone();
        next.credentials.retain(|c| c.id != id);
        for sub in &mut next.subscriptions {
            if sub.credential_id == Some(id) {
                sub.credential_id = None;
            }
        }

        self.persist(next)
    }

    // ------------------------------------------------------------------
    // Subscription mutations
    // ------------------------------------------------------------------

    /// Add a subscription and persist the new snapshot.
    ///
    /// The renewal date is computed here from the start date and the
    /// frequency — never taken from the caller.
    pub fn add_subscription(&mut self, draft: SubscriptionDraft) -> Result<Subscription> {
        draft.validate()?;
        self.check_credential_ref(draft.credential_id)?;

        let mut next = self.data()?.clone();
        let subscription = Subscription {
            id: Uuid::new_v4(),
            name: draft.name,
            cost: draft.cost,
            currency: draft.currency,
            frequency_amount: draft.frequency_amount,
            frequency_unit: draft.frequency_unit,
            start_date: draft.start_date,
            renewal_date: next_renewal(draft.start_date, draft.frequency_amount, draft.frequency_unit),
            category: draft.category,
            credential_id: draft.credential_id,
            website: draft.website,
            active: draft.active,
        };
        next.subscriptions.push(subscription.clone());

        self.persist(next)?;
        Ok(subscription)
    }

    /// Replace a subscription's fields and persist the new snapshot.
    ///
    /// Identity and the renewal-date recomputation rule are preserved:
    /// the stored id stays, and the renewal date is derived from the
    /// updated start date and frequency.
    pub fn update_subscription(
        &mut self,
        id: Uuid,
        draft: SubscriptionDraft,
    ) -> Result<Subscription> {
        draft.validate()?;
        self.check_credential_ref(draft.credential_id)?;

        let data = self.data()?;
        if data.subscription(id).is_none() {
            return Err(SubVaultError::SubscriptionNotFound(id.to_string()));
        }

        let updated = Subscription {
            id,
            name: draft.name,
            cost: draft.cost,
            currency: draft.currency,
            frequency_amount: draft.frequency_amount,
            frequency_unit: draft.frequency_unit,
            start_date: draft.start_date,
            renewal_date: next_renewal(draft.start_date, draft.frequency_amount, draft.frequency_unit),
            category: draft.category,
            credential_id: draft.credential_id,
            website: draft.website,
            active: draft.active,
        };

        let mut next = data.clone();
        for sub in &mut next.subscriptions {
            if sub.id == id {
                *sub = updated.clone();
            }
        }

        self.persist(next)?;
        Ok(updated)
    }

    /// Delete a subscription and persist the new snapshot.
    pub fn delete_subscription(&mut self, id: Uuid) -> Result<()> {
        let data = self.data()?;
        if data.subscription(id).is_none() {
            return Err(SubVaultError::SubscriptionNotFound(id.to_string()));
        }

        let mut next = data.clone();
        next.subscriptions.retain(|s| s.id != id);

        self.persist(next)
    }

    // ------------------------------------------------------------------
    // Blob pass-through
    // ------------------------------------------------------------------

    /// The currently persisted blob, for export.  Works while locked —
    /// only ciphertext leaves the session.
    pub fn export_blob(&self) -> Result<EncryptedBlob> {
        self.store.load()?.ok_or(SubVaultError::VaultNotFound)
    }

    /// Replace the persisted blob with an imported one.
    ///
    /// The blob's shape is validated, but its passphrase may differ
    /// from the current one, so the session locks and the caller must
    /// unlock again.
    pub fn import_blob(&mut self, blob: EncryptedBlob) -> Result<()> {
        blob.validate()?;
        self.store.save(&blob)?;
        self.lock();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// First unlock with no stored blob: set up an empty vault.
    fn create(&mut self, passphrase: &[u8]) -> Result<()> {
        let salt = generate_salt();
        let mut key_bytes = derive_key_with_params(passphrase, &salt, &self.kdf)?;
        let key = MasterKey::new(key_bytes);
        key_bytes.zeroize();

        self.state = Some(Unlocked {
            key,
            salt,
            data: VaultData::default(),
        });

        // Persist the empty vault so the blob exists from the start.
        // If the write fails, undo the transition — creation is atomic.
        if let Err(e) = self.persist(VaultData::default()) {
            self.state = None;
            return Err(e);
        }
        Ok(())
    }

    /// Unlock against an existing blob.
    fn open(&mut self, passphrase: &[u8], blob: &EncryptedBlob) -> Result<()> {
        blob.validate()?;

        let mut key_bytes = derive_key_with_params(passphrase, &blob.salt, &self.kdf)?;
        let key = MasterKey::new(key_bytes);
        key_bytes.zeroize();

        let mut plaintext = unseal(key.as_bytes(), &blob.iv, &blob.data)?;
        let data: VaultData = serde_json::from_slice(&plaintext)
            .map_err(|e| SubVaultError::InvalidBlobFormat(format!("vault payload: {e}")))?;
        plaintext.zeroize();

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&blob.salt);

        self.state = Some(Unlocked { key, salt, data });
        Ok(())
    }

    /// Reject a dangling credential reference on a subscription draft.
    fn check_credential_ref(&self, credential_id: Option<Uuid>) -> Result<()> {
        if let Some(id) = credential_id {
            if self.data()?.credential(id).is_none() {
                return Err(SubVaultError::ValidationFailed(format!(
                    "credential '{id}' does not exist"
                )));
            }
        }
        Ok(())
    }

    /// Seal `next` and write it to storage, committing to memory only
    /// after the write is acknowledged.
    fn persist(&mut self, mut next: VaultData) -> Result<()> {
        let unlocked = self
            .state
            .as_mut()
            .ok_or(SubVaultError::VaultLocked)?;

        next.last_updated = Utc::now().timestamp_millis();

        let mut plaintext = serde_json::to_vec(&next)
            .map_err(|e| SubVaultError::SerializationError(format!("vault payload: {e}")))?;
        let sealed = seal(unlocked.key.as_bytes(), &plaintext);
        plaintext.zeroize();
        let (iv, data) = sealed?;

        let blob = EncryptedBlob {
            salt: unlocked.salt.to_vec(),
            iv: iv.to_vec(),
            data,
        };
        self.store.save(&blob)?;

        unlocked.data = next;
        Ok(())
    }
}
