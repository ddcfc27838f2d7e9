//! # Detached Signatures
//!
//! Ed25519 signing and verification over JSON values, in NaCl's
//! `sign.detached` style: the output is the 64-byte signature alone,
//! base64-encoded. The message is not included; the verifier rebuilds it
//! from the value it already holds.
//!
//! ## Canonical messages
//!
//! The signed message is the canonical JSON of the value (see
//! [`crate::canonical`]). Object key order never changes the bytes, so a
//! struct signed on one side verifies against a map with the same entries on
//! the other. Number formatting is whatever `serde_json` produces; a verifier
//! in another language has to emit sorted-key compact JSON with the same
//! number rendering or it will see `false`.
//!
//! ## Verify never errors
//!
//! Decryption returns `Result`, verification returns `bool`. A malformed
//! signature, a malformed public key, a value that will not serialize and an
//! honest mismatch all come back as `false`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{Signature, Signer, Verifier, VerifyingKey};
use serde::Serialize;
use thiserror::Error;

use crate::canonical::to_canonical_json;
use crate::config::{SIGNATURE_LENGTH, SIGN_PUBLIC_KEY_LENGTH};
use crate::keys::{KeyError, SigningKeypair};

/// Errors during signing. Verification has no error type.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("value could not be serialized for signing: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("invalid signing key: {0}")]
    InvalidSecretKey(#[from] KeyError),
}

/// Produce a detached Ed25519 signature over raw bytes.
///
/// `secret_key` is either the 64-byte NaCl secret key or a 32-byte seed.
pub fn sign_bytes(
    message: &[u8],
    secret_key: &[u8],
) -> Result<[u8; SIGNATURE_LENGTH], SignatureError> {
    let keypair = SigningKeypair::try_from_slice(secret_key)?;
    Ok(keypair.signing_key().sign(message).to_bytes())
}

/// Check a detached Ed25519 signature over raw bytes.
pub fn verify_bytes(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    let Ok(public_key) = <&[u8; SIGN_PUBLIC_KEY_LENGTH]>::try_from(public_key) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let Ok(signature) = <&[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
        return false;
    };
    verifying_key
        .verify(message, &Signature::from_bytes(signature))
        .is_ok()
}

/// Sign the canonical JSON of `value` and return the base64 signature.
///
/// # Example
///
/// ```
/// use nacl_envelope::{sign_data, verify_sig, SigningKeypair};
/// use serde_json::json;
///
/// let keypair = SigningKeypair::generate();
/// let order = json!({"item": "tea", "qty": 2});
///
/// let signature = sign_data(&order, &keypair.secret_key_bytes()).unwrap();
/// assert!(verify_sig(&order, &signature, &keypair.public_key_bytes()));
/// assert!(!verify_sig(&json!({"item": "tea", "qty": 3}), &signature, &keypair.public_key_bytes()));
/// ```
pub fn sign_data<T: Serialize + ?Sized>(
    value: &T,
    secret_key: &[u8],
) -> Result<String, SignatureError> {
    let message = to_canonical_json(value).map_err(SignatureError::Serialization)?;
    let signature = sign_bytes(&message, secret_key)?;
    tracing::trace!(message_len = message.len(), "signed canonical payload");
    Ok(STANDARD.encode(signature))
}

/// Verify a base64 signature produced by [`sign_data`] against `value`.
///
/// Returns `true` only if `signature` is a valid Ed25519 signature by
/// `public_key` over the canonical JSON of `value`.
pub fn verify_sig<T: Serialize + ?Sized>(value: &T, signature: &str, public_key: &[u8]) -> bool {
    let Ok(message) = to_canonical_json(value) else {
        tracing::debug!("value could not be serialized for verification");
        return false;
    };
    let Ok(signature) = STANDARD.decode(signature) else {
        tracing::debug!("signature is not valid base64");
        return false;
    };
    let valid = verify_bytes(&message, &signature, public_key);
    if !valid {
        tracing::debug!(message_len = message.len(), "signature rejected");
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_sign_and_verify() {
        let kp = SigningKeypair::generate();
        let sig = sign_data("hello, world", &kp.secret_key_bytes()).unwrap();
        assert!(verify_sig("hello, world", &sig, &kp.public_key_bytes()));
    }

    #[test]
    fn test_signature_is_base64_of_64_bytes() {
        let kp = SigningKeypair::generate();
        let sig = sign_data(&json!({"a": 1}), &kp.secret_key_bytes()).unwrap();
        assert_eq!(STANDARD.decode(&sig).unwrap().len(), SIGNATURE_LENGTH);
    }

    #[test]
    fn test_deterministic_signatures() {
        let kp = SigningKeypair::generate();
        let value = json!({"memo": "determinism is underrated"});
        let first = sign_data(&value, &kp.secret_key_bytes()).unwrap();
        let second = sign_data(&value, &kp.secret_key_bytes()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_and_full_key_sign_identically() {
        let kp = SigningKeypair::from_seed(&[5u8; 32]);
        let from_seed = sign_data(&42, &kp.seed_bytes()).unwrap();
        let from_full = sign_data(&42, &kp.secret_key_bytes()).unwrap();
        assert_eq!(from_seed, from_full);
    }

    #[test]
    fn test_wrong_key_fails() {
        let signer = SigningKeypair::generate();
        let other = SigningKeypair::generate();
        let sig = sign_data("message", &signer.secret_key_bytes()).unwrap();
        assert!(!verify_sig("message", &sig, &other.public_key_bytes()));
    }

    #[test]
    fn test_different_value_fails() {
        let kp = SigningKeypair::generate();
        let sig = sign_data(&json!({"amount": 100}), &kp.secret_key_bytes()).unwrap();
        assert!(!verify_sig(&json!({"amount": 101}), &sig, &kp.public_key_bytes()));
    }

    #[test]
    fn test_tampered_signature_fails() {
        let kp = SigningKeypair::generate();
        let sig = sign_data("message", &kp.secret_key_bytes()).unwrap();
        let mut raw = STANDARD.decode(&sig).unwrap();
        raw[10] ^= 0x01;
        let tampered = STANDARD.encode(raw);
        assert!(!verify_sig("message", &tampered, &kp.public_key_bytes()));
    }

    #[test]
    fn test_garbage_inputs_return_false() {
        let kp = SigningKeypair::generate();
        let sig = sign_data("message", &kp.secret_key_bytes()).unwrap();
        let public = kp.public_key_bytes();

        assert!(!verify_sig("message", "%%% not base64 %%%", &public));
        assert!(!verify_sig("message", &STANDARD.encode([0u8; 10]), &public));
        assert!(!verify_sig("message", &sig, &public[..16]));
        assert!(!verify_sig("message", &sig, &[0u8; 32]));
    }

    #[test]
    fn test_unserializable_value_returns_false() {
        let kp = SigningKeypair::generate();
        let sig = sign_data("message", &kp.secret_key_bytes()).unwrap();
        let mut map = std::collections::HashMap::new();
        map.insert((1u8, 2u8), 3u8);
        assert!(!verify_sig(&map, &sig, &kp.public_key_bytes()));
    }

    #[test]
    fn test_key_order_does_not_matter() {
        #[derive(Serialize)]
        struct Payment {
            to: &'static str,
            amount: u32,
        }

        let kp = SigningKeypair::generate();
        let sig = sign_data(
            &Payment {
                to: "alice",
                amount: 5,
            },
            &kp.secret_key_bytes(),
        )
        .unwrap();

        let mut as_map = BTreeMap::new();
        as_map.insert("amount", json!(5));
        as_map.insert("to", json!("alice"));
        assert!(verify_sig(&as_map, &sig, &kp.public_key_bytes()));
    }

    #[test]
    fn test_invalid_secret_key_length() {
        assert!(matches!(
            sign_data("x", &[0u8; 12]),
            Err(SignatureError::InvalidSecretKey(KeyError::InvalidLength { .. }))
        ));
    }

    #[test]
    fn test_raw_bytes_roundtrip() {
        let kp = SigningKeypair::generate();
        let sig = sign_bytes(b"", &kp.secret_key_bytes()).unwrap();
        assert!(verify_bytes(b"", &sig, &kp.public_key_bytes()));
        assert!(!verify_bytes(b"x", &sig, &kp.public_key_bytes()));
    }
}
