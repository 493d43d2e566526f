//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, SubVaultError};
use crate::storage::FileStore;
use crate::vault::{VaultData, VaultSession};

/// Minimum passphrase length to prevent trivially weak passphrases.
const MIN_PASSPHRASE_LEN: usize = 8;

/// SubVault CLI: encrypted vault for credentials and subscriptions.
#[derive(Parser)]
#[command(
    name = "subvault",
    about = "Encrypted vault for credentials and subscriptions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: .subvault)
    #[arg(long, default_value = ".subvault", global = true)]
    pub vault_dir: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new empty vault
    Init,

    /// Manage stored login credentials
    Credential {
        #[command(subcommand)]
        action: CredentialAction,
    },

    /// Manage recurring subscriptions
    Subscription {
        #[command(subcommand)]
        action: SubscriptionAction,
    },

    /// Export the encrypted vault blob to a file or stdout
    Export {
        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Replace the vault with a previously exported blob
    Import {
        /// Path to the exported blob file
        file: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Credential subcommands.
#[derive(clap::Subcommand)]
pub enum CredentialAction {
    /// Add a credential
    Add {
        /// Display name (e.g. "GitHub")
        label: String,

        /// Login username or email address
        username: String,

        /// Prompt for a password to store alongside the login
        #[arg(long)]
        password: bool,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List all credentials
    List,

    /// Delete a credential (subscriptions linked to it are kept, unlinked)
    Delete {
        /// Credential id, or a unique prefix of it
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Subscription subcommands.
#[derive(clap::Subcommand)]
pub enum SubscriptionAction {
    /// Add a subscription
    Add {
        /// Service name (e.g. "Netflix")
        name: String,

        /// Cost per billing cycle
        #[arg(long)]
        cost: f64,

        /// Currency code (default from .subvault.toml, falls back to USD)
        #[arg(long)]
        currency: Option<String>,

        /// Billing cycle length (e.g. 3 for every 3 months)
        #[arg(long, default_value_t = 1)]
        every: u32,

        /// Billing unit: days, weeks, months, years or permanent
        #[arg(long, default_value = "months")]
        unit: String,

        /// Cycle anchor date, YYYY-MM-DD (default: today)
        #[arg(long)]
        start: Option<String>,

        /// Category or tag name
        #[arg(long)]
        category: Option<String>,

        /// Id (or unique prefix) of a stored credential to link
        #[arg(long)]
        credential: Option<String>,

        /// Service website
        #[arg(long)]
        website: Option<String>,
    },

    /// List subscriptions (active only, unless --all)
    List {
        /// Include inactive subscriptions
        #[arg(long)]
        all: bool,
    },

    /// Edit a subscription (renewal date is recomputed)
    Edit {
        /// Subscription id, or a unique prefix of it
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        cost: Option<f64>,

        #[arg(long)]
        currency: Option<String>,

        /// Billing cycle length
        #[arg(long)]
        every: Option<u32>,

        /// Billing unit: days, weeks, months, years or permanent
        #[arg(long)]
        unit: Option<String>,

        /// Cycle anchor date, YYYY-MM-DD
        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Id (or unique prefix) of a stored credential to link
        #[arg(long, conflicts_with = "no_credential")]
        credential: Option<String>,

        /// Unlink the credential
        #[arg(long)]
        no_credential: bool,

        #[arg(long)]
        website: Option<String>,

        /// Mark the subscription active or inactive
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a subscription
    Delete {
        /// Subscription id, or a unique prefix of it
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from the working directory and build the vault path.
pub fn vault_location(cli: &Cli) -> Result<(Settings, PathBuf)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    let path = settings.vault_path(&cwd, &cli.vault_dir);
    Ok((settings, path))
}

/// Unlock the vault for a command: resolve the path, require the blob
/// to exist, prompt for the passphrase, and return an unlocked session.
pub fn unlock_session(cli: &Cli) -> Result<VaultSession<FileStore>> {
    let (settings, path) = vault_location(cli)?;
    let store = FileStore::new(path);
    if !store.exists() {
        return Err(SubVaultError::VaultNotFound);
    }

    let passphrase = prompt_passphrase()?;
    let mut session = VaultSession::with_kdf_params(store, settings.kdf_params());
    session.unlock(passphrase.as_bytes())?;
    Ok(session)
}

/// Get the vault passphrase, trying in order:
/// 1. `SUBVAULT_PASSPHRASE` env var (scripting/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("SUBVAULT_PASSPHRASE") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault passphrase")
        .interact()
        .map_err(|e| SubVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation (used during `init`).
///
/// Also respects `SUBVAULT_PASSPHRASE` for scripted usage.
/// Enforces a minimum passphrase length.
pub fn prompt_new_passphrase() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("SUBVAULT_PASSPHRASE") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSPHRASE_LEN {
                return Err(SubVaultError::CommandFailed(format!(
                    "passphrase must be at least {MIN_PASSPHRASE_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let passphrase = dialoguer::Password::new()
            .with_prompt("Choose vault passphrase")
            .with_confirmation(
                "Confirm vault passphrase",
                "Passphrases do not match, try again",
            )
            .interact()
            .map_err(|e| SubVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;

        if passphrase.len() < MIN_PASSPHRASE_LEN {
            output::warning(&format!(
                "Passphrase must be at least {MIN_PASSPHRASE_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(passphrase));
    }
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        SubVaultError::ValidationFailed(format!("invalid date '{s}' — expected YYYY-MM-DD"))
    })
}

/// Resolve a credential by full id or unique id prefix.
pub fn resolve_credential_id(data: &VaultData, needle: &str) -> Result<Uuid> {
    resolve_id(
        data.credentials.iter().map(|c| c.id),
        needle,
        "credential",
    )
    .ok_or_else(|| SubVaultError::CredentialNotFound(needle.to_string()))?
}

/// Resolve a subscription by full id or unique id prefix.
pub fn resolve_subscription_id(data: &VaultData, needle: &str) -> Result<Uuid> {
    resolve_id(
        data.subscriptions.iter().map(|s| s.id),
        needle,
        "subscription",
    )
    .ok_or_else(|| SubVaultError::SubscriptionNotFound(needle.to_string()))?
}

/// Shared prefix-matching over a collection's ids.  Returns `None` for
/// "not found" so each caller can attach its own error, and `Some(Err)`
/// for an ambiguous prefix.
fn resolve_id(
    ids: impl Iterator<Item = Uuid>,
    needle: &str,
    kind: &str,
) -> Option<Result<Uuid>> {
    let needle_lower = needle.to_ascii_lowercase();
    let matches: Vec<Uuid> = ids
        .filter(|id| id.to_string().starts_with(&needle_lower))
        .collect();

    match matches.as_slice() {
        [] => None,
        [id] => Some(Ok(*id)),
        _ => Some(Err(SubVaultError::CommandFailed(format!(
            "{kind} id prefix '{needle}' is ambiguous — give more characters"
        )))),
    }
}
