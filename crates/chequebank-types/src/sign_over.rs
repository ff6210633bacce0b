//! Sign-over records: signed transfers of a cheque's collection right.
//!
//! Record `n` of a chain is signed by its `from_holder` over
//!
//! ```text
//! SHA-256( 0xFFFFDEAD[4] || sequence_number[u8] || cheque_id[32]
//!          || from_holder[32] || to_holder[32] )
//! ```
//!
//! The marker keeps sign-over signatures disjoint from cheque signatures.

use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{ChequeId, Identity, SignatureEnvelope, constants::SIGN_OVER_MARKER};

/// One endorsement in a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOverRecord {
    /// Position in the chain, starting at 1.
    pub sequence_number: u8,
    pub cheque_id: ChequeId,
    /// Holder giving up the collection right; must be the signer.
    pub from_holder: Identity,
    /// Holder receiving the collection right.
    pub to_holder: Identity,
    pub signature: SignatureEnvelope,
}

impl SignOverRecord {
    /// Digest of the given sign-over fields.
    #[must_use]
    pub fn digest_of(
        sequence_number: u8,
        cheque_id: &ChequeId,
        from_holder: &Identity,
        to_holder: &Identity,
    ) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(SIGN_OVER_MARKER);
        hasher.update([sequence_number]);
        hasher.update(cheque_id.as_bytes());
        hasher.update(from_holder.as_bytes());
        hasher.update(to_holder.as_bytes());
        hasher.finalize().into()
    }

    /// Digest this record's signature must cover.
    #[must_use]
    pub fn digest(&self) -> [u8; 32] {
        Self::digest_of(
            self.sequence_number,
            &self.cheque_id,
            &self.from_holder,
            &self.to_holder,
        )
    }

    /// Sign over `cheque_id` from the holder of `key` to `to_holder`.
    #[must_use]
    pub fn sign(
        sequence_number: u8,
        cheque_id: ChequeId,
        to_holder: Identity,
        key: &SigningKey,
    ) -> Self {
        let from_holder = Identity::from_verifying_key(&key.verifying_key());
        let digest = Self::digest_of(sequence_number, &cheque_id, &from_holder, &to_holder);
        Self {
            sequence_number,
            cheque_id,
            from_holder,
            to_holder,
            signature: SignatureEnvelope::sign(key, &digest),
        }
    }
}

/// Ordered sign-over records rooted at the cheque's payee.
pub type EndorsementChain = Vec<SignOverRecord>;
