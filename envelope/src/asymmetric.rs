//! # Asymmetric Encryption (box, "after" variant)
//!
//! NaCl's `box` splits into two steps: `before` runs X25519 between one
//! party's secret key and the other's public key and hashes the result with
//! HSalsa20 into a 32-byte shared key; `after` is secretbox under that shared
//! key. [`asym_encrypt`] and [`asym_decrypt`] are the `after` half. Callers
//! are expected to have a shared key already, either from [`shared_key`] or
//! from their own key agreement.
//!
//! Envelopes use the box nonce length and the same framing as the symmetric
//! path. Nothing in the envelope marks it as asymmetric.

use salsa20::{
    cipher::{consts::U10, generic_array::GenericArray},
    hsalsa,
};
use serde::{de::DeserializeOwned, Serialize};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};

use crate::canonical::{from_json_bytes, to_json_bytes};
use crate::config::{
    BOX_NONCE_LENGTH, BOX_PUBLIC_KEY_LENGTH, BOX_SECRET_KEY_LENGTH, BOX_SHARED_KEY_LENGTH,
};
use crate::encryption::{open, seal, EncryptionError};
use crate::envelope::Envelope;
use crate::keys::{KeyError, SymmetricKey};

/// Serialize `value` to JSON and encrypt it under a precomputed shared key.
///
/// # Errors
///
/// [`EncryptionError::Serialization`] if `value` has no JSON form,
/// [`EncryptionError::InvalidKeyLength`] if `shared_key` is not 32 bytes.
pub fn asym_encrypt<T: Serialize + ?Sized>(
    value: &T,
    shared_key: &[u8],
) -> Result<String, EncryptionError> {
    let payload = to_json_bytes(value).map_err(EncryptionError::Serialization)?;
    let envelope = seal(shared_key, &payload)?;
    tracing::trace!(payload_len = payload.len(), "box sealed");
    Ok(envelope.encode())
}

/// Decrypt envelope text produced by [`asym_encrypt`] and parse the JSON inside.
///
/// # Errors
///
/// [`EncryptionError::Authentication`] if the envelope does not verify under
/// `shared_key` (same message as the symmetric path),
/// [`EncryptionError::Deserialization`] if it verifies but does not hold
/// JSON for `T`.
pub fn asym_decrypt<T: DeserializeOwned>(
    envelope: &str,
    shared_key: &[u8],
) -> Result<T, EncryptionError> {
    let envelope = Envelope::decode(envelope, BOX_NONCE_LENGTH)?;
    let payload = open(shared_key, &envelope).map_err(|err| {
        tracing::debug!(%err, "box envelope rejected");
        err
    })?;
    from_json_bytes(&payload).map_err(EncryptionError::Deserialization)
}

/// Precompute the box shared key between `my_secret` and `their_public`
/// (NaCl `box.before`).
///
/// Both sides of a conversation get the same key: A's secret with B's public
/// equals B's secret with A's public.
///
/// # Errors
///
/// [`KeyError::InvalidPublicKey`] if `their_public` is a low-order point. The
/// X25519 output would then be all zeros regardless of `my_secret`, and so
/// would be known to anyone.
pub fn shared_key(
    their_public: &[u8; BOX_PUBLIC_KEY_LENGTH],
    my_secret: &[u8; BOX_SECRET_KEY_LENGTH],
) -> Result<SymmetricKey, KeyError> {
    let secret = StaticSecret::from(*my_secret);
    let point = secret.diffie_hellman(&X25519PublicKey::from(*their_public));
    if !point.was_contributory() {
        return Err(KeyError::InvalidPublicKey);
    }

    // HSalsa20 with an all-zero input block, as in crypto_box_beforenm.
    let derived = hsalsa::<U10>(
        GenericArray::from_slice(point.as_bytes()),
        &GenericArray::default(),
    );

    let mut key = [0u8; BOX_SHARED_KEY_LENGTH];
    key.copy_from_slice(&derived);
    Ok(SymmetricKey::from_bytes(key))
}
