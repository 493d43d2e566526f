//! `subvault init` — create a new empty vault.

use std::fs;

use crate::cli::output;
use crate::cli::{prompt_new_passphrase, vault_location, Cli};
use crate::errors::{Result, SubVaultError};
use crate::storage::FileStore;
use crate::vault::VaultSession;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (settings, vault_path) = vault_location(cli)?;

    // 1. Create the vault directory if it doesn't exist.
    if let Some(dir) = vault_path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            output::info(&format!("Created vault directory: {}", dir.display()));
        }
    }

    // 2. Check whether a vault already exists here.
    if vault_path.exists() {
        output::tip("Use `subvault credential add` or `subvault subscription add` to add records.");
        return Err(SubVaultError::VaultAlreadyExists(vault_path));
    }

    // 3. Prompt for a new passphrase (with confirmation).
    let passphrase = prompt_new_passphrase()?;

    // 4. First unlock on empty storage creates, seals and persists the
    //    empty vault.
    let store = FileStore::new(&vault_path);
    let mut session = VaultSession::with_kdf_params(store, settings.kdf_params());
    session.unlock(passphrase.as_bytes())?;

    output::success(&format!("Vault created at {}", vault_path.display()));

    // 5. Show helpful tips.
    output::tip("Run `subvault credential add <LABEL> <USERNAME>` to store a login.");
    output::tip("Run `subvault subscription add <NAME> --cost <COST>` to track a subscription.");
    output::tip("Run `subvault export -o backup.json` to back up the encrypted vault.");

    Ok(())
}
