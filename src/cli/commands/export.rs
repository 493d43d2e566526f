//! `subvault export` — write the encrypted vault blob to a file or stdout.
//!
//! Pure pass-through: only ciphertext leaves the vault, so no
//! passphrase is needed.

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{vault_location, Cli};
use crate::errors::{Result, SubVaultError};
use crate::storage::FileStore;
use crate::vault::VaultSession;

/// Execute the `export` command.
pub fn execute(cli: &Cli, output_path: Option<&str>) -> Result<()> {
    let (_, vault_path) = vault_location(cli)?;

    let session = VaultSession::new(FileStore::new(&vault_path));
    let blob = session.export_blob()?;

    let content = serde_json::to_string_pretty(&blob)
        .map_err(|e| SubVaultError::SerializationError(format!("blob JSON: {e}")))?;

    match output_path {
        Some(dest) => {
            let dest_path = Path::new(dest);

            // Safety: refuse to clobber the live vault file.
            if same_file(dest_path, &vault_path) {
                return Err(SubVaultError::CommandFailed(
                    "refusing to export over the vault file itself".into(),
                ));
            }

            fs::write(dest_path, &content).map_err(|e| {
                SubVaultError::CommandFailed(format!("failed to write export file: {e}"))
            })?;

            output::success(&format!("Exported encrypted vault to {dest}"));
            output::tip("The export is still sealed — restore it with `subvault import`.");
        }
        None => {
            // Write to stdout (no success message, just raw output).
            println!("{content}");
        }
    }

    Ok(())
}

/// Best-effort identity check between two paths.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
