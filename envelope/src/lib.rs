// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # nacl-envelope
//!
//! Authenticated encryption and detached signatures with the NaCl primitive
//! set, packaged as base64 text that can be stored or sent anywhere a string
//! fits.
//!
//! Nothing in here is a new cryptographic construction. The crate generates
//! nonces, glues them to ciphertext, encodes the result, and undoes all of
//! that on the way back. The primitives come from audited crates:
//!
//! - **secretbox** (XSalsa20-Poly1305) via `crypto_secretbox`.
//! - **box** (X25519 + HSalsa20 + secretbox) via `x25519-dalek` and `salsa20`.
//! - **sign** (Ed25519, detached) via `ed25519-dalek`.
//!
//! ## Modules
//!
//! - **config** — Key, nonce, tag and signature lengths.
//! - **envelope** — `nonce || ciphertext` framing and base64 text.
//! - **canonical** — JSON payloads and the canonical form signatures use.
//! - **encryption** — Symmetric encrypt/decrypt, buffer and JSON flavours.
//! - **asymmetric** — Box encryption under a precomputed shared key.
//! - **keys** — Random keys and typed key wrappers.
//! - **signatures** — Detached signatures over JSON values.
//!
//! ## Quick tour
//!
//! ```
//! use nacl_envelope::{random_key, sym_decrypt, sym_encrypt};
//! use serde_json::{json, Value};
//!
//! let key = random_key(None);
//! let envelope = sym_encrypt(&json!({"a": 1}), &key).unwrap();
//! let back: Value = sym_decrypt(&envelope, &key).unwrap();
//! assert_eq!(back, json!({"a": 1}));
//! ```
//!
//! Every function is a pure transformation of its arguments plus the OS
//! CSPRNG. There is no global state, so everything is safe to call from any
//! number of threads at once.

pub mod asymmetric;
pub mod canonical;
pub mod config;
pub mod encryption;
pub mod envelope;
pub mod keys;
pub mod signatures;

pub use asymmetric::{asym_decrypt, asym_encrypt, shared_key};
pub use encryption::{
    sym_decrypt, sym_decrypt_buffer, sym_encrypt, sym_encrypt_buffer, EncryptionError,
};
pub use envelope::Envelope;
pub use keys::{random_key, BoxKeypair, KeyError, SigningKeypair, SymmetricKey};
pub use signatures::{sign_bytes, sign_data, verify_bytes, verify_sig, SignatureError};
