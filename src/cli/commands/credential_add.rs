//! `subvault credential add` — store a login credential.

use crate::cli::output;
use crate::cli::{unlock_session, Cli};
use crate::errors::{Result, SubVaultError};
use crate::vault::CredentialDraft;

/// Execute the `credential add` command.
pub fn execute(
    cli: &Cli,
    label: &str,
    username: &str,
    prompt_password: bool,
    notes: Option<&str>,
) -> Result<()> {
    // Collect the password before asking for the vault passphrase so
    // the two hidden prompts are not easily confused.
    let password = if prompt_password {
        let pw = dialoguer::Password::new()
            .with_prompt(format!("Password for {label}"))
            .interact()
            .map_err(|e| SubVaultError::CommandFailed(format!("password prompt: {e}")))?;
        Some(pw)
    } else {
        None
    };

    let mut session = unlock_session(cli)?;

    let credential = session.add_credential(CredentialDraft {
        label: label.to_string(),
        username: username.to_string(),
        password,
        notes: notes.map(str::to_string),
    })?;

    output::success(&format!(
        "Stored credential '{}' ({})",
        credential.label, credential.id
    ));
    Ok(())
}
