//! `subvault credential delete` — remove a credential from the vault.
//!
//! Subscriptions that point at the credential are kept; only their
//! reference is cleared.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{resolve_credential_id, unlock_session, Cli};
use crate::errors::{Result, SubVaultError};

/// Execute the `credential delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete credential '{id}'?"))
            .default(false)
            .interact()
            .map_err(|e| SubVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut session = unlock_session(cli)?;

    let data = session.data()?;
    let credential_id = resolve_credential_id(data, id)?;
    let linked = data
        .subscriptions
        .iter()
        .filter(|s| s.credential_id == Some(credential_id))
        .count();

    session.delete_credential(credential_id)?;

    output::success(&format!("Deleted credential '{credential_id}'"));
    if linked > 0 {
        output::info(&format!(
            "Unlinked {linked} subscription(s) that referenced it."
        ));
    }

    Ok(())
}
