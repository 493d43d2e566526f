use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SubVaultError};

/// Project-level configuration, loaded from `.subvault.toml`.
///
/// Every field has a sensible default so SubVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name of the vault blob inside the vault directory.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// PBKDF2 iteration count used when deriving the master key.
    /// Must match the value the vault was created with.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Currency code used when `subscription add` gives none.
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Category used when `subscription add` gives none.
    #[serde(default = "default_category")]
    pub default_category: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "vault.json".to_string()
}

fn default_kdf_iterations() -> u32 {
    crate::crypto::kdf::DEFAULT_ITERATIONS
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_category() -> String {
    "General".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            kdf_iterations: default_kdf_iterations(),
            default_currency: default_currency(),
            default_category: default_category(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".subvault.toml";

    /// Load settings from `<dir>/.subvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SubVaultError::CommandFailed(format!(
                "Failed to parse {}: {e}",
                config_path.display()
            ))
        })?;

        Ok(settings)
    }

    /// Build the full path to the vault blob file.
    ///
    /// Example: `dir/.subvault/vault.json`
    pub fn vault_path(&self, dir: &Path, vault_dir: &str) -> PathBuf {
        dir.join(vault_dir).join(&self.vault_file)
    }

    /// Convert the KDF settings into crypto-layer params.
    pub fn kdf_params(&self) -> crate::crypto::kdf::KdfParams {
        crate::crypto::kdf::KdfParams {
            iterations: self.kdf_iterations,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
