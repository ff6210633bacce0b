//! Signer recovery.
//!
//! The engine never trusts an identity field on its own: it asks an
//! [`IdentityVerifier`] which identity actually signed a message and compares
//! the answer with the identity the field claims.

use chequebank_types::{ChequeBankError, Identity, Result, SignatureEnvelope};
use ed25519_dalek::{Signature, VerifyingKey};

/// Recovers the identity that produced a signature over a message.
pub trait IdentityVerifier {
    /// Return the signer of `message`.
    ///
    /// # Errors
    /// Returns `InvalidSignature` if the signature cannot be decoded or does
    /// not verify. A valid signature by an unexpected key is *not* an error:
    /// it recovers that key's identity.
    fn recover(&self, message: &[u8], signature: &SignatureEnvelope) -> Result<Identity>;
}

/// ed25519 verification against the key embedded in the envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl IdentityVerifier for Ed25519Verifier {
    fn recover(&self, message: &[u8], signature: &SignatureEnvelope) -> Result<Identity> {
        let key = VerifyingKey::from_bytes(&signature.public_key)
            .map_err(|_| ChequeBankError::InvalidSignature)?;
        let sig = Signature::from_slice(&signature.signature)
            .map_err(|_| ChequeBankError::InvalidSignature)?;
        key.verify_strict(message, &sig)
            .map_err(|_| ChequeBankError::InvalidSignature)?;
        Ok(Identity::from_verifying_key(&key))
    }
}
