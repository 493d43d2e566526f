//! `subvault subscription list` — display subscriptions in a table.

use crate::cli::output;
use crate::cli::{unlock_session, Cli};
use crate::errors::Result;

/// Execute the `subscription list` command.
pub fn execute(cli: &Cli, all: bool) -> Result<()> {
    let session = unlock_session(cli)?;
    let data = session.data()?;

    let subscriptions: Vec<_> = data
        .subscriptions
        .iter()
        .filter(|s| all || s.active)
        .collect();

    let hidden = data.subscriptions.len() - subscriptions.len();
    output::info(&format!("{} subscription(s)", subscriptions.len()));
    if hidden > 0 {
        output::tip(&format!("{hidden} inactive hidden — use --all to show them."));
    }

    output::print_subscriptions_table(data, &subscriptions);

    Ok(())
}
