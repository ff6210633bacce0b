//! # Cheque: a signed, time-windowed payment order
//!
//! A payer signs a [`ChequeInfo`] over the canonical [`ChequeInfo::digest`],
//! which binds every field plus the engine's [`InstanceId`]. The resulting
//! [`SignedCheque`] is redeemable by the payee (or the final holder of an
//! endorsement chain) while `valid_from <= now <= valid_thru`.
//!
//! ## Digest layout
//!
//! ```text
//! SHA-256( cheque_id[32] || payer[32] || payee[32] || amount[u128 BE]
//!          || instance_id[32] || valid_from[u64 BE] || valid_thru[u64 BE] )
//! ```

use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Amount, ChequeBankError, ChequeId, Identity, InstanceId, LogicalTime, SignatureEnvelope};

/// The signed content of a cheque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeInfo {
    pub cheque_id: ChequeId,
    /// Issuer; the only identity whose balance a redemption debits.
    pub payer: Identity,
    /// Original beneficiary and root of any endorsement chain.
    pub payee: Identity,
    pub amount: Amount,
    /// First logical time at which the cheque is redeemable (inclusive).
    pub valid_from: LogicalTime,
    /// Last logical time at which the cheque is redeemable (inclusive).
    pub valid_thru: LogicalTime,
}

impl ChequeInfo {
    /// Canonical digest signed by the payer.
    #[must_use]
    pub fn digest(&self, instance_id: &InstanceId) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.cheque_id.as_bytes());
        hasher.update(self.payer.as_bytes());
        hasher.update(self.payee.as_bytes());
        hasher.update(self.amount.to_be_bytes());
        hasher.update(instance_id.as_bytes());
        hasher.update(self.valid_from.to_be_bytes());
        hasher.update(self.valid_thru.to_be_bytes());
        hasher.finalize().into()
    }

    /// Check the activation window at `now`.
    ///
    /// # Errors
    /// `NotYetActive` before `valid_from`, `Expired` after `valid_thru`.
    pub fn check_window(&self, now: LogicalTime) -> crate::Result<()> {
        if now < self.valid_from {
            return Err(ChequeBankError::NotYetActive {
                valid_from: self.valid_from,
                now,
            });
        }
        if now > self.valid_thru {
            return Err(ChequeBankError::Expired {
                valid_thru: self.valid_thru,
                now,
            });
        }
        Ok(())
    }
}

/// A cheque together with the payer's signature over its digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCheque {
    pub info: ChequeInfo,
    pub signature: SignatureEnvelope,
}

impl SignedCheque {
    /// Sign `info` for the engine identified by `instance_id`.
    ///
    /// The signature is produced by whoever holds `key`; nothing here checks
    /// that `key` belongs to `info.payer`. Redemption does.
    #[must_use]
    pub fn sign(info: ChequeInfo, instance_id: &InstanceId, key: &SigningKey) -> Self {
        let digest = info.digest(instance_id);
        Self {
            signature: SignatureEnvelope::sign(key, &digest),
            info,
        }
    }

    #[must_use]
    pub fn cheque_id(&self) -> ChequeId {
        self.info.cheque_id
    }
}
