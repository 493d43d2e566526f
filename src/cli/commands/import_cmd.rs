//! `subvault import` — restore a previously exported vault blob.
//!
//! The file replaces the persisted blob wholesale after a shape check.
//! Its passphrase is whatever the export was created under.

use std::fs;

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{vault_location, Cli};
use crate::errors::{Result, SubVaultError};
use crate::storage::FileStore;
use crate::vault::{EncryptedBlob, VaultSession};

/// Execute the `import` command.
pub fn execute(cli: &Cli, file: &str, force: bool) -> Result<()> {
    let (_, vault_path) = vault_location(cli)?;

    let contents = fs::read_to_string(file)?;
    let blob: EncryptedBlob = serde_json::from_str(&contents)
        .map_err(|e| SubVaultError::InvalidBlobFormat(format!("import file: {e}")))?;

    let store = FileStore::new(&vault_path);
    if store.exists() && !force {
        let confirmed = Confirm::new()
            .with_prompt("A vault already exists here — replace it with the imported one?")
            .default(false)
            .interact()
            .map_err(|e| SubVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut session = VaultSession::new(store);
    session.import_blob(blob)?;

    output::success(&format!("Imported vault blob into {}", vault_path.display()));
    output::tip("Unlock it with the passphrase the export was created under.");
    Ok(())
}
