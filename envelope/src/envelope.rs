//! # Envelope Framing
//!
//! An envelope is `nonce || ciphertext`, base64-encoded (standard alphabet,
//! padded). It is the only representation this crate ever hands back from
//! an encrypt call.
//!
//! There is no version byte and no algorithm identifier. An envelope does not
//! say whether secretbox or box produced it; the caller has to remember which
//! function they used. The nonce length is therefore passed in explicitly
//! when parsing.
//!
//! The ciphertext half already contains the 16-byte Poly1305 tag, in the
//! position NaCl puts it (before the encrypted bytes).

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::encryption::EncryptionError;

/// A parsed envelope: the nonce and the authenticated ciphertext that follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    nonce: Vec<u8>,
    ciphertext: Vec<u8>,
}

impl Envelope {
    /// Wrap a freshly generated nonce and the ciphertext sealed under it.
    pub fn new(nonce: &[u8], ciphertext: Vec<u8>) -> Self {
        Self {
            nonce: nonce.to_vec(),
            ciphertext,
        }
    }

    /// Render as base64 text of `nonce || ciphertext`.
    pub fn encode(&self) -> String {
        let mut framed = Vec::with_capacity(self.nonce.len() + self.ciphertext.len());
        framed.extend_from_slice(&self.nonce);
        framed.extend_from_slice(&self.ciphertext);
        STANDARD.encode(framed)
    }

    /// Parse envelope text, taking the first `nonce_length` bytes as the nonce.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptionError::Authentication`] if the text is not valid
    /// base64 or is too short to hold a nonce. A mangled envelope gets the
    /// same error as a forged one; callers learn nothing about which part
    /// was wrong.
    pub fn decode(text: &str, nonce_length: usize) -> Result<Self, EncryptionError> {
        let mut framed = STANDARD.decode(text).map_err(|err| {
            tracing::trace!(%err, "envelope is not valid base64");
            EncryptionError::Authentication
        })?;

        if framed.len() < nonce_length {
            tracing::trace!(
                len = framed.len(),
                nonce_length,
                "envelope shorter than its nonce"
            );
            return Err(EncryptionError::Authentication);
        }

        let ciphertext = framed.split_off(nonce_length);
        Ok(Self {
            nonce: framed,
            ciphertext,
        })
    }

    pub fn nonce(&self) -> &[u8] {
        &self.nonce
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}
