//! Cryptographic primitives for Sherlock.
//!
//! This module provides:
//! - The legacy v1 vault cipher, SHA-256 key + AES-128-CFB (`legacy`)
//! - The sealed v2 vault cipher, Argon2id + AES-256-GCM (`sealed`, `kdf`)
//! - Password strength rating (`strength`)
//! - Random password generation (`generator`)
//!
//! `encrypt` and `decrypt` here are the only entry points the rest of the
//! crate uses for vault blobs; they pick the cipher from the `Scheme` on
//! the way in and from the blob prefix on the way out.

pub mod generator;
pub mod kdf;
pub mod legacy;
pub mod sealed;
pub mod strength;

use zeroize::Zeroizing;

use crate::errors::Result;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{password_strength, Strength, ...};
pub use generator::generate_password;
pub use kdf::Argon2Params;
pub use strength::{ensure_secure, password_strength, Strength};

/// How a vault blob is (or will be) encrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// `IV || AES-128-CFB(ciphertext)`, unsalted SHA-256 key, no integrity.
    #[default]
    Legacy,
    /// Versioned Argon2id + AES-256-GCM envelope.
    Sealed(Argon2Params),
}

/// Encrypt `plaintext` under `passphrase` with the given scheme.
pub fn encrypt(scheme: &Scheme, passphrase: &str, plaintext: &[u8]) -> Result<Vec<u8>> {
    match scheme {
        Scheme::Legacy => legacy::encrypt(passphrase, plaintext),
        Scheme::Sealed(params) => sealed::encrypt(passphrase, plaintext, params),
    }
}

/// Decrypt a vault blob, detecting its scheme from the prefix.
///
/// Returns the scheme alongside the plaintext so a re-save can keep the
/// vault in the format it was found in.
pub fn decrypt(passphrase: &str, blob: &[u8]) -> Result<(Zeroizing<Vec<u8>>, Scheme)> {
    if sealed::is_sealed(blob) {
        let (plaintext, params) = sealed::decrypt(passphrase, blob)?;
        return Ok((plaintext, Scheme::Sealed(params)));
    }
    Ok((legacy::decrypt(passphrase, blob)?, Scheme::Legacy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::MIN_MEMORY_KIB;

    #[test]
    fn dispatch_roundtrips_both_schemes() {
        let sealed = Scheme::Sealed(Argon2Params {
            memory_kib: MIN_MEMORY_KIB,
            iterations: 1,
            parallelism: 1,
        });

        for scheme in [Scheme::Legacy, sealed] {
            let blob = encrypt(&scheme, "pass", b"{\"id\":\"g\"}").unwrap();
            let (plain, found) = decrypt("pass", &blob).unwrap();
            assert_eq!(&plain[..], b"{\"id\":\"g\"}");
            assert_eq!(found, scheme);
        }
    }
}
