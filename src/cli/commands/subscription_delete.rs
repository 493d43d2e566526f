//! `subvault subscription delete` — remove a subscription from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{resolve_subscription_id, unlock_session, Cli};
use crate::errors::{Result, SubVaultError};

/// Execute the `subscription delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete subscription '{id}'?"))
            .default(false)
            .interact()
            .map_err(|e| SubVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut session = unlock_session(cli)?;

    let subscription_id = resolve_subscription_id(session.data()?, id)?;
    session.delete_subscription(subscription_id)?;

    output::success(&format!("Deleted subscription '{subscription_id}'"));
    Ok(())
}
