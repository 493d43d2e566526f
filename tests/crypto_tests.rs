//! Integration tests for the SubVault crypto module.

use subvault::crypto::kdf::KdfParams;
use subvault::crypto::{
    derive_key, derive_key_with_params, generate_salt, seal, unseal, NONCE_LEN,
};
use subvault::errors::SubVaultError;

// ---------------------------------------------------------------------------
// Sealing round-trip
// ---------------------------------------------------------------------------

#[test]
fn seal_unseal_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = br#"{"credentials":[],"subscriptions":[],"lastUpdated":0}"#;

    let (iv, ciphertext) = seal(&key, plaintext).expect("seal should succeed");

    // Ciphertext carries a 16-byte tag on top of the plaintext.
    assert!(ciphertext.len() > plaintext.len());

    let recovered = unseal(&key, &iv, &ciphertext).expect("unseal should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn seal_produces_fresh_nonce_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"same payload";

    // Nonces must never repeat under one key; check a batch pairwise.
    let mut nonces: Vec<[u8; NONCE_LEN]> = Vec::new();
    for _ in 0..32 {
        let (iv, _) = seal(&key, plaintext).expect("seal");
        assert!(!nonces.contains(&iv), "nonce repeated across seal calls");
        nonces.push(iv);
    }
}

#[test]
fn seal_produces_different_ciphertext_each_time() {
    let key = [0xEFu8; 32];
    let plaintext = b"identical input";

    let (_, ct1) = seal(&key, plaintext).expect("seal 1");
    let (_, ct2) = seal(&key, plaintext).expect("seal 2");

    assert_ne!(
        ct1, ct2,
        "two seals of the same plaintext must differ"
    );
}

// ---------------------------------------------------------------------------
// Wrong-key and tamper rejection
// ---------------------------------------------------------------------------

#[test]
fn unseal_with_wrong_key_fails() {
    let key = [0x11u8; 32];
    let wrong_key = [0x22u8; 32];
    let plaintext = b"top secret";

    let (iv, ciphertext) = seal(&key, plaintext).expect("seal");
    let result = unseal(&wrong_key, &iv, &ciphertext);

    assert!(
        matches!(result, Err(SubVaultError::AuthenticationFailed)),
        "wrong key must fail the auth check"
    );
}

#[test]
fn unseal_detects_any_single_bit_flip() {
    let key = [0x33u8; 32];
    let plaintext = b"tamper target";

    let (iv, ciphertext) = seal(&key, plaintext).expect("seal");

    // Flip one bit at a time across the whole ciphertext (including
    // the tag bytes at the end) — every variant must be rejected.
    for byte_idx in 0..ciphertext.len() {
        for bit in 0..8 {
            let mut tampered = ciphertext.clone();
            tampered[byte_idx] ^= 1 << bit;

            let result = unseal(&key, &iv, &tampered);
            assert!(
                matches!(result, Err(SubVaultError::AuthenticationFailed)),
                "bit flip at byte {byte_idx} bit {bit} went undetected"
            );
        }
    }
}

#[test]
fn unseal_with_wrong_nonce_fails() {
    let key = [0x44u8; 32];
    let (iv, ciphertext) = seal(&key, b"payload").expect("seal");

    let mut wrong_iv = iv;
    wrong_iv[0] ^= 0x01;

    assert!(unseal(&key, &wrong_iv, &ciphertext).is_err());
}

#[test]
fn unseal_with_truncated_data_fails() {
    let key = [0x55u8; 32];
    let (iv, ciphertext) = seal(&key, b"payload").expect("seal");

    // Shorter than a tag.
    assert!(unseal(&key, &iv, &ciphertext[..8]).is_err());
    // Tag-sized but mangled.
    assert!(unseal(&key, &iv, &ciphertext[..16]).is_err());
    // Bad nonce length.
    assert!(unseal(&key, &iv[..6], &ciphertext).is_err());
}

// ---------------------------------------------------------------------------
// Key derivation (PBKDF2-HMAC-SHA256)
// ---------------------------------------------------------------------------

#[test]
fn derive_key_same_inputs_same_output() {
    let salt = generate_salt();
    let k1 = derive_key(b"correct-horse", &salt).expect("derive 1");
    let k2 = derive_key(b"correct-horse", &salt).expect("derive 2");
    assert_eq!(k1, k2);
}

#[test]
fn derive_key_different_passphrases_differ() {
    let salt = generate_salt();
    let k1 = derive_key(b"passphrase-one", &salt).expect("derive 1");
    let k2 = derive_key(b"passphrase-two", &salt).expect("derive 2");
    assert_ne!(k1, k2);
}

#[test]
fn derive_key_different_salts_differ() {
    let salt1 = [0x01u8; 16];
    let salt2 = [0x02u8; 16];
    let k1 = derive_key(b"same-passphrase", &salt1).expect("derive 1");
    let k2 = derive_key(b"same-passphrase", &salt2).expect("derive 2");
    assert_ne!(k1, k2);
}

#[test]
fn derive_key_rejects_weak_iteration_counts() {
    let salt = generate_salt();
    let result = derive_key_with_params(b"pw", &salt, &KdfParams { iterations: 1_000 });
    assert!(matches!(
        result,
        Err(SubVaultError::KeyDerivationFailed(_))
    ));
}

#[test]
fn generated_salts_are_unique() {
    let s1 = generate_salt();
    let s2 = generate_salt();
    assert_ne!(s1, s2);
    assert_eq!(s1.len(), 16);
}

// ---------------------------------------------------------------------------
// Full derive-then-seal round-trip
// ---------------------------------------------------------------------------

#[test]
fn sealed_under_derived_key_opens_only_with_same_passphrase() {
    let salt = generate_salt();
    let key = derive_key(b"correct-horse", &salt).expect("derive");
    let other = derive_key(b"wrong-pass", &salt).expect("derive other");

    let payload = br#"{"credentials":[],"subscriptions":[],"lastUpdated":42}"#;
    let (iv, ciphertext) = seal(&key, payload).expect("seal");

    assert_eq!(unseal(&key, &iv, &ciphertext).expect("unseal"), payload);
    assert!(matches!(
        unseal(&other, &iv, &ciphertext),
        Err(SubVaultError::AuthenticationFailed)
    ));
}
