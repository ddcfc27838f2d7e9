//! # Symmetric Encryption (secretbox)
//!
//! XSalsa20-Poly1305 authenticated encryption, wire-compatible with NaCl's
//! `crypto_secretbox`. One 32-byte key, one fresh 24-byte random nonce per
//! message, output framed as an [`Envelope`].
//!
//! ## Nonce management
//!
//! Reusing a nonce under the same key leaks the XOR of the two plaintexts
//! and lets an attacker forge tags. Every encrypt call draws a new nonce from
//! the OS CSPRNG; there is no way to pass one in. With 192-bit nonces the
//! collision probability stays negligible for any realistic message count.
//!
//! ## Failure modes
//!
//! Decryption has two distinct failures and callers are expected to tell them
//! apart:
//!
//! - [`EncryptionError::Authentication`]: the envelope did not verify. Wrong
//!   key, flipped bit, truncation and bad base64 all look the same.
//! - [`EncryptionError::Deserialization`]: the envelope verified, but the
//!   plaintext is not the JSON the caller asked for. Only the JSON variants
//!   can return this.

use crypto_secretbox::{
    aead::{Aead, KeyInit, Nonce},
    XSalsa20Poly1305,
};
use rand::{rngs::OsRng, RngCore};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::canonical::{from_json_bytes, to_json_bytes};
use crate::config::{SECRETBOX_KEY_LENGTH, SECRETBOX_NONCE_LENGTH};
use crate::envelope::Envelope;

/// Errors from the encrypt/decrypt paths, symmetric and asymmetric alike.
#[derive(Debug, Error)]
pub enum EncryptionError {
    /// The envelope failed authentication. The message is identical for every
    /// cause so that it cannot be used as an oracle.
    #[error("Could not decrypt message")]
    Authentication,

    /// The envelope authenticated but its plaintext is not valid JSON for the
    /// requested type.
    #[error("decrypted payload is not valid JSON: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The value handed to a JSON encrypt call could not be serialized.
    #[error("payload could not be serialized to JSON: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("encryption failed")]
    EncryptFailed,
}

/// Encrypt raw bytes under a secretbox key.
///
/// Returns envelope text: base64 of the 24-byte nonce followed by the sealed
/// bytes (16-byte tag, then ciphertext).
///
/// # Errors
///
/// [`EncryptionError::InvalidKeyLength`] if `key` is not 32 bytes.
///
/// # Example
///
/// ```
/// use nacl_envelope::{random_key, sym_decrypt_buffer, sym_encrypt_buffer};
///
/// let key = random_key(None);
/// let envelope = sym_encrypt_buffer(b"attack at dawn", &key).unwrap();
/// assert_eq!(sym_decrypt_buffer(&envelope, &key).unwrap(), b"attack at dawn");
/// ```
pub fn sym_encrypt_buffer(plaintext: &[u8], key: &[u8]) -> Result<String, EncryptionError> {
    let envelope = seal(key, plaintext)?;
    tracing::trace!(plaintext_len = plaintext.len(), "secretbox sealed");
    Ok(envelope.encode())
}

/// Decrypt envelope text produced by [`sym_encrypt_buffer`].
///
/// # Errors
///
/// [`EncryptionError::Authentication`] for any envelope that does not verify
/// under `key`. No plaintext, partial or otherwise, is returned in that case.
/// [`EncryptionError::InvalidKeyLength`] if `key` is not 32 bytes.
pub fn sym_decrypt_buffer(envelope: &str, key: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    let envelope = Envelope::decode(envelope, SECRETBOX_NONCE_LENGTH)?;
    open(key, &envelope).map_err(|err| {
        tracing::debug!(%err, "secretbox envelope rejected");
        err
    })
}

/// Serialize `value` to JSON and encrypt it under a secretbox key.
pub fn sym_encrypt<T: Serialize + ?Sized>(value: &T, key: &[u8]) -> Result<String, EncryptionError> {
    let payload = to_json_bytes(value).map_err(EncryptionError::Serialization)?;
    sym_encrypt_buffer(&payload, key)
}

/// Decrypt envelope text produced by [`sym_encrypt`] and parse the JSON inside.
///
/// # Errors
///
/// [`EncryptionError::Authentication`] if the envelope does not verify,
/// [`EncryptionError::Deserialization`] if it verifies but the plaintext is
/// not valid JSON for `T`.
pub fn sym_decrypt<T: DeserializeOwned>(envelope: &str, key: &[u8]) -> Result<T, EncryptionError> {
    let payload = sym_decrypt_buffer(envelope, key)?;
    from_json_bytes(&payload).map_err(EncryptionError::Deserialization)
}

/// Seal `plaintext` under `key` with a fresh random nonce.
///
/// Shared with the asymmetric path: NaCl's `box` "after" variant is exactly
/// secretbox keyed by the precomputed shared key.
pub(crate) fn seal(key: &[u8], plaintext: &[u8]) -> Result<Envelope, EncryptionError> {
    let cipher = build_cipher(key)?;

    let mut nonce_bytes = [0u8; SECRETBOX_NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::<XSalsa20Poly1305>::from_slice(&nonce_bytes), plaintext)
        .map_err(|_| EncryptionError::EncryptFailed)?;

    Ok(Envelope::new(&nonce_bytes, ciphertext))
}

/// Verify and decrypt a parsed envelope under `key`.
pub(crate) fn open(key: &[u8], envelope: &Envelope) -> Result<Vec<u8>, EncryptionError> {
    let cipher = build_cipher(key)?;
    cipher
        .decrypt(
            Nonce::<XSalsa20Poly1305>::from_slice(envelope.nonce()),
            envelope.ciphertext(),
        )
        .map_err(|_| EncryptionError::Authentication)
}

fn build_cipher(key: &[u8]) -> Result<XSalsa20Poly1305, EncryptionError> {
    if key.len() != SECRETBOX_KEY_LENGTH {
        return Err(EncryptionError::InvalidKeyLength {
            expected: SECRETBOX_KEY_LENGTH,
            actual: key.len(),
        });
    }
    XSalsa20Poly1305::new_from_slice(key).map_err(|_| EncryptionError::InvalidKeyLength {
        expected: SECRETBOX_KEY_LENGTH,
        actual: key.len(),
    })
}
