//! Signature envelope carried by cheques and sign-over records.
//!
//! ed25519 has no public-key recovery, so the envelope carries the signer's
//! verifying key next to the signature bytes. Verifying the signature under
//! that key "recovers" the signer: a signature made by another key simply
//! yields another identity, which callers compare against the one they
//! expect.

use ed25519_dalek::{Signer, SigningKey};
use serde::{Deserialize, Serialize};

use crate::Identity;

/// An ed25519 signature together with the key that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEnvelope {
    /// The signer's verifying key.
    pub public_key: [u8; 32],
    /// Raw signature bytes (64 for a well-formed signature).
    pub signature: Vec<u8>,
}

impl SignatureEnvelope {
    /// Sign `message` with `key`.
    #[must_use]
    pub fn sign(key: &SigningKey, message: &[u8]) -> Self {
        Self {
            public_key: key.verifying_key().to_bytes(),
            signature: key.sign(message).to_bytes().to_vec(),
        }
    }

    /// The identity this envelope claims. Not authenticated until verified.
    #[must_use]
    pub fn claimed_signer(&self) -> Identity {
        Identity(self.public_key)
    }
}
