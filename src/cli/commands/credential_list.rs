//! `subvault credential list` — display all credentials in a table.

use crate::cli::output;
use crate::cli::{unlock_session, Cli};
use crate::errors::Result;

/// Execute the `credential list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let session = unlock_session(cli)?;
    let data = session.data()?;

    output::info(&format!("{} credential(s)", data.credentials.len()));
    output::print_credentials_table(&data.credentials);

    Ok(())
}
