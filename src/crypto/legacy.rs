//! The legacy (v1) vault cipher: AES-128-CFB keyed by a bare SHA-256.
//!
//! Layout of the returned byte buffer:
//!   [ 16-byte IV | ciphertext ]
//!
//! The key is the first 16 bytes of the *lowercase hex* SHA-256 of the
//! passphrase. There is no salt, no slow KDF and no authentication tag:
//! decrypting with the wrong passphrase yields garbage rather than an
//! error, and only the JSON parse that follows can notice. Existing vaults
//! depend on this exact layout, so it is kept as-is; new vaults can opt
//! into the sealed (v2) scheme instead.

use aes::Aes128;
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::sealed;
use crate::errors::{Result, SherlockError};

type Aes128CfbEnc = cfb_mode::Encryptor<Aes128>;
type Aes128CfbDec = cfb_mode::Decryptor<Aes128>;

/// AES block size, which is also the IV length.
pub const IV_LEN: usize = 16;

/// AES-128 key length.
const KEY_LEN: usize = 16;

/// Derive the v1 key material from a passphrase.
///
/// Deterministic and unsalted: the same passphrase always maps to the
/// same key, for every vault.
pub fn derive_key(passphrase: &str) -> Zeroizing<[u8; KEY_LEN]> {
    let digest = Sha256::digest(passphrase.as_bytes());
    let hex = Zeroizing::new(format!("{digest:x}"));

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&hex.as_bytes()[..KEY_LEN]);
    key
}

/// Encrypt `plaintext` under `passphrase` with a fresh random IV.
pub fn encrypt(passphrase: &str, plaintext: &[u8]) -> Result<Vec<u8>> {
    let key = derive_key(passphrase);

    let iv = draw_iv(|buf| {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| SherlockError::Crypto(format!("cannot source IV randomness: {e}")))
    })?;

    let cipher = Aes128CfbEnc::new_from_slices(&key[..], &iv)
        .map_err(|e| SherlockError::Crypto(format!("invalid key length: {e}")))?;

    let mut output = Vec::with_capacity(IV_LEN + plaintext.len());
    output.extend_from_slice(&iv);
    output.extend_from_slice(plaintext);
    cipher.encrypt(&mut output[IV_LEN..]);

    Ok(output)
}

/// Draw an IV that cannot be mistaken for the sealed-format prefix.
fn draw_iv(mut fill: impl FnMut(&mut [u8]) -> Result<()>) -> Result<[u8; IV_LEN]> {
    let mut iv = [0u8; IV_LEN];
    loop {
        fill(&mut iv)?;
        if !sealed::is_sealed(&iv) {
            return Ok(iv);
        }
    }
}

/// Invert `encrypt`. Never fails on a wrong passphrase.
pub fn decrypt(passphrase: &str, blob: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if blob.len() < IV_LEN {
        return Err(SherlockError::Crypto(format!(
            "vault is {} bytes, shorter than the {IV_LEN}-byte IV",
            blob.len()
        )));
    }

    let (iv, ciphertext) = blob.split_at(IV_LEN);
    let key = derive_key(passphrase);

    let cipher = Aes128CfbDec::new_from_slices(&key[..], iv)
        .map_err(|e| SherlockError::Crypto(format!("invalid key length: {e}")))?;

    let mut plaintext = Zeroizing::new(ciphertext.to_vec());
    cipher.decrypt(&mut plaintext);

    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_uses_hex_prefix_of_sha256() {
        // sha256("password") = 5e884898da28047151d0e56f8dc62927...
        let key = derive_key("password");
        assert_eq!(&key[..], b"5e884898da280471");
    }

    #[test]
    fn roundtrip() {
        let blob = encrypt("passphrase", b"{\"id\":\"default\"}").unwrap();
        assert_eq!(blob.len(), IV_LEN + 16);

        let plain = decrypt("passphrase", &blob).unwrap();
        assert_eq!(&plain[..], b"{\"id\":\"default\"}");
    }

    #[test]
    fn fresh_iv_per_call() {
        let a = encrypt("k", b"same").unwrap();
        let b = encrypt("k", b"same").unwrap();
        assert_ne!(&a[..IV_LEN], &b[..IV_LEN]);
    }

    #[test]
    fn wrong_passphrase_returns_garbage_not_error() {
        let blob = encrypt("right", b"{\"accounts\":[]}").unwrap();
        let plain = decrypt("wrong", &blob).unwrap();
        assert_ne!(&plain[..], b"{\"accounts\":[]}");
    }

    #[test]
    fn iv_never_carries_the_sealed_prefix() {
        let mut draws = 0;
        let iv = draw_iv(|buf| {
            draws += 1;
            buf.fill(0xAB);
            if draws == 1 {
                buf[..4].copy_from_slice(sealed::MAGIC);
                buf[4] = sealed::VERSION;
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(draws, 2);
        assert!(!sealed::is_sealed(&iv));
        assert_eq!(iv, [0xAB; IV_LEN]);
    }

    #[test]
    fn short_blob_is_rejected() {
        assert!(decrypt("k", &[0u8; 8]).is_err());
    }
}
