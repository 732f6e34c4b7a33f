//! Passphrase-based key derivation for sealed (v2) vaults, using Argon2id.
//!
//! Parameters are stored in every sealed blob, so a vault always reopens
//! with the settings it was created with, whatever `config.toml` says now.

use argon2::{Algorithm, Argon2, Params, Version};
use zeroize::Zeroizing;

use crate::errors::{Result, SherlockError};

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Minimum safe memory cost in KiB (8 MB).
pub const MIN_MEMORY_KIB: u32 = 8_192;

/// Largest memory cost accepted, in KiB (4 GB).
pub const MAX_MEMORY_KIB: u32 = 4 * 1024 * 1024;

/// Largest iteration count accepted.
pub const MAX_ITERATIONS: u32 = 64;

/// Largest lane count accepted.
pub const MAX_PARALLELISM: u32 = 64;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl Argon2Params {
    /// Reject parameters too weak to be worth storing a vault under, or
    /// too costly to run. Sealed blobs carry their own params, so this is
    /// also what stops a damaged header from stalling the KDF.
    pub fn validate(&self) -> Result<()> {
        check_range("memory_kib", self.memory_kib, MIN_MEMORY_KIB, MAX_MEMORY_KIB)?;
        check_range("iterations", self.iterations, 1, MAX_ITERATIONS)?;
        check_range("parallelism", self.parallelism, 1, MAX_PARALLELISM)
    }
}

fn check_range(name: &str, value: u32, min: u32, max: u32) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(SherlockError::Crypto(format!(
            "Argon2 {name} must be between {min} and {max} (got {value})"
        )));
    }
    Ok(())
}

/// Derive a 32-byte key from a passphrase and salt using Argon2id.
///
/// The same passphrase + salt + params always produce the same key.
pub fn derive_key(
    passphrase: &str,
    salt: &[u8],
    argon2_params: &Argon2Params,
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    argon2_params.validate()?;

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| SherlockError::Crypto(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(passphrase.as_bytes(), salt, &mut key[..])
        .map_err(|e| SherlockError::Crypto(format!("Argon2id hashing failed: {e}")))?;

    Ok(key)
}
