//! # Primitive Lengths
//!
//! Every length constant in the crate lives here. The values are fixed by
//! the NaCl primitives we wrap; they are not tunables. Envelopes produced
//! with one set of lengths cannot be opened with another, so treat a change
//! here as a wire-format break.

// ---------------------------------------------------------------------------
// Symmetric (secretbox: XSalsa20-Poly1305)
// ---------------------------------------------------------------------------

/// Secretbox key length in bytes.
pub const SECRETBOX_KEY_LENGTH: usize = 32;

/// Secretbox nonce length. XSalsa20's extended 192-bit nonce is long enough
/// that random generation per message is safe.
pub const SECRETBOX_NONCE_LENGTH: usize = 24;

/// Poly1305 authenticator length. NaCl places it in front of the encrypted
/// bytes, so every ciphertext is at least this long.
pub const MAC_LENGTH: usize = 16;

/// Length `random_key(None)` falls back to.
pub const DEFAULT_KEY_LENGTH: usize = SECRETBOX_KEY_LENGTH;

// ---------------------------------------------------------------------------
// Asymmetric (box: X25519 + XSalsa20-Poly1305)
// ---------------------------------------------------------------------------

/// X25519 public key length.
pub const BOX_PUBLIC_KEY_LENGTH: usize = 32;

/// X25519 secret key length.
pub const BOX_SECRET_KEY_LENGTH: usize = 32;

/// Length of the precomputed shared key (`box.before` output).
pub const BOX_SHARED_KEY_LENGTH: usize = 32;

/// Box nonce length.
pub const BOX_NONCE_LENGTH: usize = 24;

// The "after" box variant is secretbox keyed by the shared key, so both
// schemes must agree on nonce and key sizes.
const _: () = assert!(BOX_NONCE_LENGTH == SECRETBOX_NONCE_LENGTH);
const _: () = assert!(BOX_SHARED_KEY_LENGTH == SECRETBOX_KEY_LENGTH);

// ---------------------------------------------------------------------------
// Signatures (sign: Ed25519)
// ---------------------------------------------------------------------------

/// Ed25519 public (verifying) key length.
pub const SIGN_PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 seed length. The seed alone is enough to rebuild a keypair.
pub const SIGN_SEED_LENGTH: usize = 32;

/// NaCl-layout Ed25519 secret key length: `seed || public_key`.
pub const SIGN_SECRET_KEY_LENGTH: usize = 64;

/// Detached Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;
