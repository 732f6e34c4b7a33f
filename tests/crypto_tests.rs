//! Integration tests for the Sherlock crypto module.

use aes::cipher::{AsyncStreamCipher, KeyIvInit};
use sha2::{Digest, Sha256};

use sherlock::crypto::kdf::{Argon2Params, MIN_MEMORY_KIB};
use sherlock::crypto::{self, generate_password, password_strength, Scheme, Strength};
use sherlock::errors::SherlockError;
use sherlock::vault::Group;

fn fast_params() -> Argon2Params {
    Argon2Params {
        memory_kib: MIN_MEMORY_KIB,
        iterations: 1,
        parallelism: 1,
    }
}

// ---------------------------------------------------------------------------
// Legacy wire format
// ---------------------------------------------------------------------------

#[test]
fn legacy_blob_is_iv_then_cfb_ciphertext() {
    let plaintext = br#"{"id":"team","accounts":[]}"#;
    let blob = crypto::encrypt(&Scheme::Legacy, "hunter2", plaintext).unwrap();

    // No header, no tag: 16-byte IV followed by same-length ciphertext.
    assert_eq!(blob.len(), 16 + plaintext.len());

    // Key is the first 16 characters of the hex SHA-256 digest, as bytes.
    let hex: String = Sha256::digest(b"hunter2")
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();
    let key = &hex.as_bytes()[..16];

    let (iv, ciphertext) = blob.split_at(16);
    let mut buf = ciphertext.to_vec();
    cfb_mode::Decryptor::<aes::Aes128>::new_from_slices(key, iv)
        .unwrap()
        .decrypt(&mut buf);
    assert_eq!(buf, plaintext);
}

#[test]
fn legacy_blob_from_another_writer_decrypts() {
    let hex: String = Sha256::digest(b"shared-secret")
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();
    let iv = [7u8; 16];
    let mut body = br#"{"id":"x","accounts":[]}"#.to_vec();
    cfb_mode::Encryptor::<aes::Aes128>::new_from_slices(&hex.as_bytes()[..16], &iv)
        .unwrap()
        .encrypt(&mut body);

    let mut blob = iv.to_vec();
    blob.extend_from_slice(&body);

    let (plain, scheme) = crypto::decrypt("shared-secret", &blob).unwrap();
    assert_eq!(scheme, Scheme::Legacy);
    let group = Group::from_json(&plain).unwrap();
    assert_eq!(group.id(), "x");
}

// ---------------------------------------------------------------------------
// Wrong-key detection through the parse step
// ---------------------------------------------------------------------------

#[test]
fn wrong_key_never_yields_a_group() {
    let group = Group::new("team").unwrap();
    let json = group.to_json().unwrap();

    for scheme in [Scheme::Legacy, Scheme::Sealed(fast_params())] {
        let blob = crypto::encrypt(&scheme, "right-key", &json).unwrap();
        let outcome = crypto::decrypt("wrong-key", &blob).and_then(|(p, _)| Group::from_json(&p));
        assert!(matches!(outcome, Err(SherlockError::WrongKey)));
    }
}

#[test]
fn group_document_roundtrips_byte_for_byte() {
    let group = Group::new("team").unwrap();
    let json = group.to_json().unwrap();

    for scheme in [Scheme::Legacy, Scheme::Sealed(fast_params())] {
        let blob = crypto::encrypt(&scheme, "pass phrase", &json).unwrap();
        let (plain, _) = crypto::decrypt("pass phrase", &blob).unwrap();
        assert_eq!(&plain[..], &json[..]);
    }
}

// ---------------------------------------------------------------------------
// Strength and generator
// ---------------------------------------------------------------------------

#[test]
fn documented_strength_examples() {
    assert_eq!(password_strength("abcdefghij"), Strength::Low);
    assert_eq!(password_strength("$wsert-2w345_2@34#!0?"), Strength::High);
    assert!(password_strength("S3cr3t!9$") >= Strength::Satisfactory);
}

#[test]
fn generated_passwords_clear_the_bar() {
    for len in [16, 20, 64] {
        let pw = generate_password(len).unwrap();
        assert_eq!(pw.chars().count(), len);
        assert!(password_strength(&pw) >= Strength::Satisfactory);
    }
}
