//! # Key Material
//!
//! Random key generation plus typed wrappers for the three kinds of key the
//! crate consumes:
//!
//! - [`SymmetricKey`]: a 32-byte secretbox key, or a box shared key produced
//!   by [`shared_key`](crate::asymmetric::shared_key). Both feed the same
//!   cipher, so they share one type.
//! - [`BoxKeypair`]: an X25519 keypair for the asymmetric path.
//! - [`SigningKeypair`]: an Ed25519 keypair for detached signatures.
//!
//! The facade functions take plain byte slices, so none of these wrappers is
//! mandatory. They exist to zeroize on drop and to keep secrets out of
//! `Debug` output.
//!
//! Key bytes are never logged.

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::{rngs::OsRng, RngCore};
use std::fmt;
use thiserror::Error;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::{
    BOX_PUBLIC_KEY_LENGTH, BOX_SECRET_KEY_LENGTH, DEFAULT_KEY_LENGTH, SECRETBOX_KEY_LENGTH,
    SIGN_PUBLIC_KEY_LENGTH, SIGN_SECRET_KEY_LENGTH, SIGN_SEED_LENGTH,
};

/// Errors from constructing typed keys.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("keypair validation failed: public key does not match secret key")]
    KeypairMismatch,
}

/// Return `length` bytes from the OS CSPRNG, or [`DEFAULT_KEY_LENGTH`] bytes
/// when `length` is `None` or zero.
///
/// There is no error path. If the OS cannot supply randomness the process has
/// no business encrypting anything, and `OsRng` panics.
///
/// # Example
///
/// ```
/// use nacl_envelope::random_key;
///
/// assert_eq!(random_key(None).len(), 32);
/// assert_eq!(random_key(Some(64)).len(), 64);
/// ```
pub fn random_key(length: Option<usize>) -> Vec<u8> {
    let length = match length {
        Some(n) if n > 0 => n,
        _ => DEFAULT_KEY_LENGTH,
    };
    let mut key = vec![0u8; length];
    OsRng.fill_bytes(&mut key);
    key
}

// ---------------------------------------------------------------------------
// SymmetricKey
// ---------------------------------------------------------------------------

/// A 32-byte key for secretbox, or a precomputed box shared key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; SECRETBOX_KEY_LENGTH]);

impl SymmetricKey {
    pub fn generate() -> Self {
        let mut bytes = [0u8; SECRETBOX_KEY_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; SECRETBOX_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Copy a key out of an untrusted slice, checking its length.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; SECRETBOX_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidLength {
                expected: SECRETBOX_KEY_LENGTH,
                actual: slice.len(),
            })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SECRETBOX_KEY_LENGTH] {
        &self.0
    }
}

impl AsRef<[u8]> for SymmetricKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

// ---------------------------------------------------------------------------
// BoxKeypair
// ---------------------------------------------------------------------------

/// An X25519 keypair for box encryption.
///
/// Two parties each hold one of these and exchange public halves; each then
/// calls [`BoxKeypair::shared_key`] with the other's public key and both end
/// up with the same [`SymmetricKey`].
pub struct BoxKeypair {
    secret: StaticSecret,
    public: X25519PublicKey,
}

impl BoxKeypair {
    pub fn generate() -> Self {
        Self::from_secret(StaticSecret::random_from_rng(OsRng))
    }

    /// Rebuild a keypair from its 32-byte secret half.
    pub fn from_secret_bytes(bytes: [u8; BOX_SECRET_KEY_LENGTH]) -> Self {
        Self::from_secret(StaticSecret::from(bytes))
    }

    fn from_secret(secret: StaticSecret) -> Self {
        let public = X25519PublicKey::from(&secret);
        Self { secret, public }
    }

    pub fn public_key_bytes(&self) -> [u8; BOX_PUBLIC_KEY_LENGTH] {
        self.public.to_bytes()
    }

    /// Export the secret half. Handle with care.
    pub fn secret_key_bytes(&self) -> [u8; BOX_SECRET_KEY_LENGTH] {
        self.secret.to_bytes()
    }

    /// Precompute the shared key with a peer (NaCl `box.before`).
    pub fn shared_key(
        &self,
        their_public: &[u8; BOX_PUBLIC_KEY_LENGTH],
    ) -> Result<SymmetricKey, KeyError> {
        crate::asymmetric::shared_key(their_public, &self.secret_key_bytes())
    }
}

impl fmt::Debug for BoxKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoxKeypair(pub={})", hex::encode(self.public_key_bytes()))
    }
}

// ---------------------------------------------------------------------------
// SigningKeypair
// ---------------------------------------------------------------------------

/// An Ed25519 keypair for detached signatures.
///
/// The secret key exported by [`secret_key_bytes`](Self::secret_key_bytes)
/// uses NaCl's 64-byte layout (`seed || public_key`), so keys move freely
/// between this crate and any NaCl implementation.
pub struct SigningKeypair {
    signing_key: SigningKey,
}

impl SigningKeypair {
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministically build a keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; SIGN_SEED_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Load a NaCl-layout 64-byte secret key, checking that the public half
    /// matches the seed.
    pub fn from_keypair_bytes(bytes: &[u8; SIGN_SECRET_KEY_LENGTH]) -> Result<Self, KeyError> {
        let signing_key =
            SigningKey::from_keypair_bytes(bytes).map_err(|_| KeyError::KeypairMismatch)?;
        Ok(Self { signing_key })
    }

    /// Accept either a 32-byte seed or a 64-byte NaCl secret key.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        if let Ok(seed) = <&[u8; SIGN_SEED_LENGTH]>::try_from(slice) {
            return Ok(Self::from_seed(seed));
        }
        if let Ok(keypair) = <&[u8; SIGN_SECRET_KEY_LENGTH]>::try_from(slice) {
            return Self::from_keypair_bytes(keypair);
        }
        Err(KeyError::InvalidLength {
            expected: SIGN_SECRET_KEY_LENGTH,
            actual: slice.len(),
        })
    }

    pub fn public_key_bytes(&self) -> [u8; SIGN_PUBLIC_KEY_LENGTH] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Export the 64-byte NaCl secret key (`seed || public_key`).
    pub fn secret_key_bytes(&self) -> [u8; SIGN_SECRET_KEY_LENGTH] {
        self.signing_key.to_keypair_bytes()
    }

    pub fn seed_bytes(&self) -> [u8; SIGN_SEED_LENGTH] {
        self.signing_key.to_bytes()
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }
}

impl Clone for SigningKeypair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for SigningKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKeypair(pub={})", hex::encode(self.public_key_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_key_default_length() {
        assert_eq!(random_key(None).len(), DEFAULT_KEY_LENGTH);
    }

    #[test]
    fn test_random_key_zero_means_default() {
        assert_eq!(random_key(Some(0)).len(), DEFAULT_KEY_LENGTH);
    }

    #[test]
    fn test_random_key_exact_length() {
        for n in [1, 16, 24, 33, 64, 1024] {
            assert_eq!(random_key(Some(n)).len(), n);
        }
    }

    #[test]
    fn test_random_keys_differ() {
        assert_ne!(random_key(None), random_key(None));
    }

    #[test]
    fn test_symmetric_key_rejects_wrong_length() {
        assert!(matches!(
            SymmetricKey::try_from_slice(&[0u8; 31]),
            Err(KeyError::InvalidLength {
                expected: 32,
                actual: 31
            })
        ));
        assert!(SymmetricKey::try_from_slice(&[7u8; 32]).is_ok());
    }

    #[test]
    fn test_symmetric_key_debug_is_redacted() {
        let key = SymmetricKey::from_bytes([0xAA; 32]);
        let debug = format!("{key:?}");
        assert!(!debug.contains("aa") && !debug.contains("170"));
    }

    #[test]
    fn test_box_keypair_roundtrip() {
        let kp = BoxKeypair::generate();
        let restored = BoxKeypair::from_secret_bytes(kp.secret_key_bytes());
        assert_eq!(kp.public_key_bytes(), restored.public_key_bytes());
    }

    #[test]
    fn test_box_keypair_debug_shows_only_public() {
        let kp = BoxKeypair::generate();
        let debug = format!("{kp:?}");
        assert!(debug.contains(&hex::encode(kp.public_key_bytes())));
        assert!(!debug.contains(&hex::encode(kp.secret_key_bytes())));
    }

    #[test]
    fn test_signing_secret_key_layout() {
        let kp = SigningKeypair::generate();
        let secret = kp.secret_key_bytes();
        assert_eq!(&secret[..32], &kp.seed_bytes());
        assert_eq!(&secret[32..], &kp.public_key_bytes());
    }

    #[test]
    fn test_signing_keypair_from_either_length() {
        let kp = SigningKeypair::from_seed(&[42u8; 32]);
        let from_seed = SigningKeypair::try_from_slice(&kp.seed_bytes()).unwrap();
        let from_full = SigningKeypair::try_from_slice(&kp.secret_key_bytes()).unwrap();
        assert_eq!(from_seed.public_key_bytes(), kp.public_key_bytes());
        assert_eq!(from_full.public_key_bytes(), kp.public_key_bytes());
    }

    #[test]
    fn test_signing_keypair_rejects_mismatched_public_half() {
        let kp = SigningKeypair::generate();
        let mut secret = kp.secret_key_bytes();
        secret[40] ^= 0xFF;
        assert!(SigningKeypair::from_keypair_bytes(&secret).is_err());
    }

    #[test]
    fn test_signing_keypair_rejects_odd_length() {
        assert!(matches!(
            SigningKeypair::try_from_slice(&[0u8; 48]),
            Err(KeyError::InvalidLength { actual: 48, .. })
        ));
    }

    #[test]
    fn test_clone_preserves_identity() {
        let kp = SigningKeypair::generate();
        let cloned = kp.clone();
        assert_eq!(kp.secret_key_bytes(), cloned.secret_key_bytes());
    }
}
