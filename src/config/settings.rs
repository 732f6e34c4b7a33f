use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::{Argon2Params, Scheme};
use crate::errors::{Result, SherlockError};

/// Vault format used when creating new vaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultFormat {
    /// Legacy unsalted AES-CFB blob, readable by older sherlock builds.
    #[default]
    V1,
    /// Argon2id + AES-256-GCM sealed blob.
    V2,
}

/// User-level configuration, loaded from `<root>/config.toml`.
///
/// Every field has a sensible default so Sherlock works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Format for vaults created from now on. Existing vaults keep
    /// whatever format they were written in.
    #[serde(default)]
    pub vault_format: VaultFormat,

    /// Argon2 memory cost in KiB (default: 64 MB). Only used by `v2`.
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3). Only used by `v2`.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4). Only used by `v2`.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Months after its last update before a password shows as expired.
    #[serde(default = "default_password_expiry_months")]
    pub password_expiry_months: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_password_expiry_months() -> u32 {
    6
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_format: VaultFormat::default(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            password_expiry_months: default_password_expiry_months(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the sherlock root.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<root>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SherlockError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.vault_format == VaultFormat::V2 {
            settings.argon2_params().validate()?;
        }

        Ok(settings)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// The cipher scheme for newly created vaults.
    pub fn scheme(&self) -> Scheme {
        match self.vault_format {
            VaultFormat::V1 => Scheme::Legacy,
            VaultFormat::V2 => Scheme::Sealed(self.argon2_params()),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
