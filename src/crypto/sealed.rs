//! Sealed (v2) vault cipher: Argon2id + AES-256-GCM.
//!
//! Layout of the returned byte buffer:
//!
//! ```text
//! [SHLK: 4][version: 1][memory_kib: 4 LE][iterations: 4 LE][parallelism: 4 LE]
//! [salt: 16][nonce: 12][ciphertext + 16-byte tag]
//! ```
//!
//! Unlike the legacy scheme, a wrong passphrase or a modified blob fails
//! the GCM tag check, which is reported as `WrongKey`.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use super::kdf::{self, Argon2Params};
use crate::errors::{Result, SherlockError};

/// Magic bytes at the start of every sealed vault.
pub const MAGIC: &[u8; 4] = b"SHLK";

/// Format version written after the magic.
pub const VERSION: u8 = 2;

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;

/// magic + version + three u32 params.
const PARAMS_END: usize = 4 + 1 + 12;
const HEADER_LEN: usize = PARAMS_END + SALT_LEN + NONCE_LEN;

/// Returns `true` if `blob` carries the sealed-format prefix.
pub fn is_sealed(blob: &[u8]) -> bool {
    blob.len() > MAGIC.len() && &blob[..MAGIC.len()] == MAGIC && blob[MAGIC.len()] == VERSION
}

/// Encrypt `plaintext` with a key derived from `passphrase` and a fresh
/// random salt and nonce.
pub fn encrypt(passphrase: &str, plaintext: &[u8], params: &Argon2Params) -> Result<Vec<u8>> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .and_then(|()| OsRng.try_fill_bytes(&mut nonce))
        .map_err(|e| SherlockError::Crypto(format!("cannot source randomness: {e}")))?;

    let key = kdf::derive_key(passphrase, &salt, params)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| SherlockError::Crypto(format!("invalid key length: {e}")))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| SherlockError::Crypto(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    output.extend_from_slice(MAGIC);
    output.push(VERSION);
    output.extend_from_slice(&params.memory_kib.to_le_bytes());
    output.extend_from_slice(&params.iterations.to_le_bytes());
    output.extend_from_slice(&params.parallelism.to_le_bytes());
    output.extend_from_slice(&salt);
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt a sealed blob. Returns the plaintext and the params it was
/// sealed with, so the caller can re-seal under the same cost.
pub fn decrypt(passphrase: &str, blob: &[u8]) -> Result<(Zeroizing<Vec<u8>>, Argon2Params)> {
    if !is_sealed(blob) || blob.len() < HEADER_LEN {
        return Err(SherlockError::Crypto("truncated sealed vault".into()));
    }

    let params = Argon2Params {
        memory_kib: read_u32(blob, 5),
        iterations: read_u32(blob, 9),
        parallelism: read_u32(blob, 13),
    };
    // The header is not covered by the tag; bound its cost before use.
    params.validate()?;
    let salt = &blob[PARAMS_END..PARAMS_END + SALT_LEN];
    let nonce = &blob[PARAMS_END + SALT_LEN..HEADER_LEN];
    let ciphertext = &blob[HEADER_LEN..];

    let key = kdf::derive_key(passphrase, salt, &params)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..]).map_err(|_| SherlockError::WrongKey)?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| SherlockError::WrongKey)?;

    Ok((Zeroizing::new(plaintext), params))
}

fn read_u32(blob: &[u8], at: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&blob[at..at + 4]);
    u32::from_le_bytes(bytes)
}
