//! Endorsement chain verification.
//!
//! A chain is valid for a cheque when, for every record `i` (0-based):
//! - `record.cheque_id` is the cheque's id
//! - `record.sequence_number == i + 1`
//! - the recovered signer of `record.digest()` is `record.from_holder`
//! - `record.from_holder` is the payee for `i == 0`, else the previous
//!   record's `to_holder`
//!
//! and the chain holds at most [`MAX_SIGN_OVERS`] records. The verifier only
//! checks structure and signatures. Whether the caller is entitled to act on
//! the outcome is decided by the engine.

use chequebank_types::{
    ChequeBankError, ChequeInfo, Identity, Result, SignOverRecord, constants::MAX_SIGN_OVERS,
};

use crate::verifier::IdentityVerifier;

/// What a valid chain establishes about a cheque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutcome {
    /// Identity entitled to redeem: the final `to_holder`.
    pub holder: Identity,
    /// Identity entitled to revoke: the final `from_holder`.
    pub liable_party: Identity,
    /// Per-record digests, in chain order.
    pub record_digests: Vec<[u8; 32]>,
}

/// Validates sign-over chains using an [`IdentityVerifier`].
pub struct EndorsementChainVerifier<'a, V> {
    identity: &'a V,
}

impl<'a, V: IdentityVerifier> EndorsementChainVerifier<'a, V> {
    #[must_use]
    pub fn new(identity: &'a V) -> Self {
        Self { identity }
    }

    /// Validate `chain` against `info`.
    ///
    /// An empty chain leaves custody where the cheque put it: the payee holds
    /// and the payer is liable.
    ///
    /// # Errors
    /// The first structural or cryptographic defect found, in chain order.
    pub fn validate(&self, info: &ChequeInfo, chain: &[SignOverRecord]) -> Result<ChainOutcome> {
        if chain.len() > MAX_SIGN_OVERS {
            return Err(ChequeBankError::SignOverChainTooLong {
                len: chain.len(),
                max: MAX_SIGN_OVERS,
            });
        }

        let mut expected_from = info.payee;
        let mut liable_party = info.payer;
        let mut expected_seq: u8 = 1;
        let mut record_digests = Vec::with_capacity(chain.len());

        for (position, record) in chain.iter().enumerate() {
            if record.cheque_id != info.cheque_id {
                return Err(ChequeBankError::SignOverChequeMismatch { position });
            }
            if record.sequence_number != expected_seq {
                return Err(ChequeBankError::SignOverCounterInvalid {
                    expected: expected_seq,
                    actual: record.sequence_number,
                });
            }

            let digest = record.digest();
            let signer = self.identity.recover(&digest, &record.signature)?;
            if signer != record.from_holder {
                return Err(ChequeBankError::SignOverSignatureMismatch { position });
            }
            if record.from_holder != expected_from {
                return Err(ChequeBankError::SignOverChainBroken {
                    position,
                    expected: expected_from,
                    actual: record.from_holder,
                });
            }

            tracing::debug!(
                cheque = %info.cheque_id,
                seq = record.sequence_number,
                from = %record.from_holder,
                to = %record.to_holder,
                "Sign-over verified"
            );

            liable_party = record.from_holder;
            expected_from = record.to_holder;
            expected_seq += 1;
            record_digests.push(digest);
        }

        Ok(ChainOutcome {
            holder: expected_from,
            liable_party,
            record_digests,
        })
    }
}

#[cfg(test)]
mod tests {
    use chequebank_types::{ChequeId, InstanceId, testkit::Party};

    use super::*;
    use crate::verifier::Ed25519Verifier;

    struct Fixture {
        payer: Party,
        payee: Party,
        h2: Party,
        h3: Party,
        info: ChequeInfo,
    }

    fn fixture() -> Fixture {
        let payer = Party::from_seed(1);
        let payee = Party::from_seed(2);
        let cheque = payer.issue(&InstanceId::derive("test"), payee.id, 10, 0, 100);
        Fixture {
            payer,
            payee,
            h2: Party::from_seed(3),
            h3: Party::from_seed(4),
            info: cheque.info,
        }
    }

    fn validate(info: &ChequeInfo, chain: &[SignOverRecord]) -> Result<ChainOutcome> {
        EndorsementChainVerifier::new(&Ed25519Verifier).validate(info, chain)
    }

    #[test]
    fn empty_chain_keeps_original_parties() {
        let f = fixture();
        let out = validate(&f.info, &[]).unwrap();
        assert_eq!(out.holder, f.payee.id);
        assert_eq!(out.liable_party, f.payer.id);
        assert!(out.record_digests.is_empty());
    }

    #[test]
    fn two_step_chain_verifies() {
        let f = fixture();
        let id = f.info.cheque_id;
        let chain = vec![f.payee.sign_over(1, id, f.h2.id), f.h2.sign_over(2, id, f.h3.id)];
        let out = validate(&f.info, &chain).unwrap();
        assert_eq!(out.holder, f.h3.id);
        assert_eq!(out.liable_party, f.h2.id);
        assert_eq!(out.record_digests, vec![chain[0].digest(), chain[1].digest()]);
    }

    #[test]
    fn six_records_accepted() {
        let f = fixture();
        let id = f.info.cheque_id;
        let parties: Vec<Party> = (10..17).map(Party::from_seed).collect();
        let mut chain = vec![f.payee.sign_over(1, id, parties[0].id)];
        for seq in 2..=6u8 {
            let i = usize::from(seq) - 2;
            chain.push(parties[i].sign_over(seq, id, parties[i + 1].id));
        }
        let out = validate(&f.info, &chain).unwrap();
        assert_eq!(out.holder, parties[5].id);
        assert_eq!(out.liable_party, parties[4].id);
    }

    #[test]
    fn seven_records_rejected_regardless_of_content() {
        let f = fixture();
        let rec = f.payee.sign_over(1, f.info.cheque_id, f.h2.id);
        let chain = vec![rec; 7];
        assert_eq!(
            validate(&f.info, &chain),
            Err(ChequeBankError::SignOverChainTooLong { len: 7, max: 6 })
        );
    }

    #[test]
    fn sequence_must_start_at_one() {
        let f = fixture();
        let chain = vec![f.payee.sign_over(2, f.info.cheque_id, f.h2.id)];
        assert_eq!(
            validate(&f.info, &chain),
            Err(ChequeBankError::SignOverCounterInvalid { expected: 1, actual: 2 })
        );
    }

    #[test]
    fn duplicated_sequence_rejected() {
        let f = fixture();
        let id = f.info.cheque_id;
        let chain = vec![f.payee.sign_over(1, id, f.h2.id), f.h2.sign_over(1, id, f.h3.id)];
        assert_eq!(
            validate(&f.info, &chain),
            Err(ChequeBankError::SignOverCounterInvalid { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn first_record_must_come_from_payee() {
        let f = fixture();
        let chain = vec![f.h2.sign_over(1, f.info.cheque_id, f.h3.id)];
        assert!(matches!(
            validate(&f.info, &chain),
            Err(ChequeBankError::SignOverChainBroken { position: 0, .. })
        ));
    }

    #[test]
    fn broken_continuity_rejected() {
        let f = fixture();
        let id = f.info.cheque_id;
        // payee → h2, then h3 (not h2) signs the next hop.
        let chain = vec![f.payee.sign_over(1, id, f.h2.id), f.h3.sign_over(2, id, f.payer.id)];
        assert!(matches!(
            validate(&f.info, &chain),
            Err(ChequeBankError::SignOverChainBroken { position: 1, .. })
        ));
    }

    #[test]
    fn forged_from_holder_rejected_cryptographically() {
        let f = fixture();
        let id = f.info.cheque_id;
        // h2 signs a record claiming to come from the payee.
        let digest = SignOverRecord::digest_of(1, &id, &f.payee.id, &f.h2.id);
        let forged = SignOverRecord {
            sequence_number: 1,
            cheque_id: id,
            from_holder: f.payee.id,
            to_holder: f.h2.id,
            signature: chequebank_types::SignatureEnvelope::sign(&f.h2.key, &digest),
        };
        assert_eq!(
            validate(&f.info, &[forged]),
            Err(ChequeBankError::SignOverSignatureMismatch { position: 0 })
        );
    }

    #[test]
    fn tampered_to_holder_rejected() {
        let f = fixture();
        let mut rec = f.payee.sign_over(1, f.info.cheque_id, f.h2.id);
        rec.to_holder = f.h3.id;
        assert_eq!(validate(&f.info, &[rec]), Err(ChequeBankError::InvalidSignature));
    }

    #[test]
    fn other_cheque_record_rejected() {
        let f = fixture();
        let chain = vec![f.payee.sign_over(1, ChequeId::from_label("other"), f.h2.id)];
        assert_eq!(
            validate(&f.info, &chain),
            Err(ChequeBankError::SignOverChequeMismatch { position: 0 })
        );
    }
}
