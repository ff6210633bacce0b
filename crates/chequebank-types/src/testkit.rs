//! Deterministic parties and cheque builders for tests. **Never use in
//! production.**

use ed25519_dalek::SigningKey;

use crate::{Amount, ChequeId, ChequeInfo, Identity, InstanceId, LogicalTime, SignOverRecord, SignedCheque};

/// A participant with a signing key.
#[derive(Debug, Clone)]
pub struct Party {
    pub key: SigningKey,
    pub id: Identity,
}

impl Party {
    /// Party whose secret key is `[seed; 32]`.
    pub fn from_seed(seed: u8) -> Self {
        Self::from_key(SigningKey::from_bytes(&[seed; 32]))
    }

    pub fn random() -> Self {
        Self::from_key(SigningKey::from_bytes(&rand::random::<[u8; 32]>()))
    }

    fn from_key(key: SigningKey) -> Self {
        let id = Identity::from_verifying_key(&key.verifying_key());
        Self { key, id }
    }

    /// Issue a cheque with a random id, signed by this party as payer.
    pub fn issue(
        &self,
        instance_id: &InstanceId,
        payee: Identity,
        amount: Amount,
        valid_from: LogicalTime,
        valid_thru: LogicalTime,
    ) -> SignedCheque {
        let info = ChequeInfo {
            cheque_id: ChequeId::random(),
            payer: self.id,
            payee,
            amount,
            valid_from,
            valid_thru,
        };
        SignedCheque::sign(info, instance_id, &self.key)
    }

    /// Sign `cheque_id` over to `to` at position `sequence_number`.
    pub fn sign_over(&self, sequence_number: u8, cheque_id: ChequeId, to: Identity) -> SignOverRecord {
        SignOverRecord::sign(sequence_number, cheque_id, to, &self.key)
    }
}
