//! The cheque authorization engine.
//!
//! [`ChequeBank`] owns the custodial ledger, the per-cheque state store, and
//! the receipt log. Every operation follows the same shape:
//!
//! 1. authenticate the cheque (signature recovers to the payer)
//! 2. run the operation's checks in a fixed order, first failure wins
//! 3. perform the single fallible ledger mutation, if any
//! 4. commit the state transition and append a receipt
//!
//! Nothing is written before step 3, so a rejected call leaves the ledger,
//! the cheque store, and the receipt log exactly as they were. Operations
//! take `&mut self`; an embedder sharing one engine between threads wraps it
//! in a `Mutex`, which then spans validate-then-mutate.

use chequebank_ledger::{InMemoryLedger, LedgerAdapter};
use chequebank_types::{
    Amount, ChainPolicy, ChequeBankError, ChequeId, ChequeInfo, ChequeReceipt, ChequeState,
    EngineConfig, Identity, InstanceId, LogicalTime, Payout, ReceiptType, Result, SignOverRecord,
    SignedCheque,
};
use chrono::Utc;

use crate::clock::{Clock, ManualClock};
use crate::endorsement::{ChainOutcome, EndorsementChainVerifier};
use crate::store::ChequeStore;
use crate::verifier::{Ed25519Verifier, IdentityVerifier};

/// Custodial cheque bank: deposits, withdrawals, redemption, sign-over, revocation.
pub struct ChequeBank<L = InMemoryLedger, V = Ed25519Verifier, C = ManualClock> {
    config: EngineConfig,
    ledger: L,
    verifier: V,
    clock: C,
    cheques: ChequeStore,
    /// Append-only audit trail of committed operations.
    receipts: Vec<ChequeReceipt>,
}

impl<C: Clock> ChequeBank<InMemoryLedger, Ed25519Verifier, C> {
    /// Engine backed by an in-memory ledger and ed25519 verification.
    #[must_use]
    pub fn in_memory(config: EngineConfig, clock: C) -> Self {
        Self::new(config, InMemoryLedger::new(), Ed25519Verifier, clock)
    }
}

impl<L: LedgerAdapter, V: IdentityVerifier, C: Clock> ChequeBank<L, V, C> {
    #[must_use]
    pub fn new(config: EngineConfig, ledger: L, verifier: V, clock: C) -> Self {
        tracing::info!(
            instance = %config.instance_id,
            chain_policy = ?config.chain_policy,
            "ChequeBank engine created"
        );
        Self {
            config,
            ledger,
            verifier,
            clock,
            cheques: ChequeStore::new(),
            receipts: Vec::new(),
        }
    }

    // =================================================================
    // Custody
    // =================================================================

    /// Credit `amount` to `caller`'s custodial balance.
    pub fn deposit(&mut self, caller: Identity, amount: Amount) -> Result<()> {
        self.ledger.credit(caller, amount)?;
        let now = self.clock.now();
        tracing::info!(account = %caller, amount, "Deposit");
        self.push_receipt(ReceiptType::Deposited, None, caller, None, amount, now);
        Ok(())
    }

    /// Withdraw `amount` from `caller`'s balance to `caller`.
    pub fn withdraw(&mut self, caller: Identity, amount: Amount) -> Result<Payout> {
        self.withdraw_to(caller, amount, caller)
    }

    /// Withdraw `amount` from `caller`'s balance to `recipient`.
    pub fn withdraw_to(
        &mut self,
        caller: Identity,
        amount: Amount,
        recipient: Identity,
    ) -> Result<Payout> {
        self.ledger.debit(caller, amount).inspect_err(|err| {
            tracing::warn!(account = %caller, amount, error = %err, "Withdrawal rejected");
        })?;
        let now = self.clock.now();
        tracing::info!(account = %caller, recipient = %recipient, amount, "Withdrawal");
        self.push_receipt(
            ReceiptType::Withdrawn,
            None,
            caller,
            Some(recipient),
            amount,
            now,
        );
        Ok(Payout { recipient, amount })
    }

    // =================================================================
    // Cheque operations
    // =================================================================

    /// Redeem a cheque that was never signed over. `caller` must be the payee.
    ///
    /// Checks, in order: signature, not revoked, not redeemed, activation,
    /// expiry, no recorded chain, caller is payee, payer balance.
    pub fn redeem(&mut self, cheque: &SignedCheque, caller: Identity) -> Result<Payout> {
        self.try_redeem(cheque, caller)
            .inspect_err(|err| log_rejection("redeem", cheque.cheque_id(), caller, err))
    }

    /// Record a sign-over chain ending at `caller`, moving custody and
    /// liability to the chain's last hop.
    pub fn notify_sign_over(
        &mut self,
        chain: &[SignOverRecord],
        cheque: &SignedCheque,
        caller: Identity,
    ) -> Result<()> {
        self.try_notify_sign_over(chain, cheque, caller)
            .inspect_err(|err| log_rejection("notify_sign_over", cheque.cheque_id(), caller, err))
    }

    /// Redeem a signed-over cheque. `chain` is verified afresh; whatever a
    /// previous notification recorded is not trusted. The original payer is
    /// debited.
    pub fn redeem_sign_over(
        &mut self,
        cheque: &SignedCheque,
        chain: &[SignOverRecord],
        caller: Identity,
    ) -> Result<Payout> {
        self.try_redeem_sign_over(cheque, chain, caller)
            .inspect_err(|err| log_rejection("redeem_sign_over", cheque.cheque_id(), caller, err))
    }

    /// Revoke a cheque. Allowed for the payer until a chain is recorded, and
    /// for the chain's current liable party afterwards. The activation window
    /// does not apply.
    pub fn revoke(&mut self, cheque: &SignedCheque, caller: Identity) -> Result<()> {
        self.try_revoke(cheque, caller)
            .inspect_err(|err| log_rejection("revoke", cheque.cheque_id(), caller, err))
    }

    fn try_redeem(&mut self, cheque: &SignedCheque, caller: Identity) -> Result<Payout> {
        let info = &cheque.info;
        let digest = self.authenticate(cheque)?;
        let now = self.clock.now();

        let state = self.cheques.get(&info.cheque_id);
        check_outstanding(info.cheque_id, state)?;
        info.check_window(now)?;
        if state.is_some_and(ChequeState::has_chain) {
            return Err(ChequeBankError::SignOverChainExists(info.cheque_id));
        }
        if caller != info.payee {
            return Err(ChequeBankError::NotPayee {
                payee: info.payee,
                caller,
            });
        }

        self.ledger.debit(info.payer, info.amount)?;
        self.cheques.get_or_insert(info, digest).mark_redeemed()?;

        tracing::info!(
            cheque = %info.cheque_id,
            payer = %info.payer,
            redeemer = %caller,
            amount = info.amount,
            "Cheque redeemed"
        );
        self.push_receipt(
            ReceiptType::Redeemed,
            Some(info.cheque_id),
            caller,
            Some(info.payer),
            info.amount,
            now,
        );
        Ok(Payout {
            recipient: caller,
            amount: info.amount,
        })
    }

    fn try_notify_sign_over(
        &mut self,
        chain: &[SignOverRecord],
        cheque: &SignedCheque,
        caller: Identity,
    ) -> Result<()> {
        let info = &cheque.info;
        let digest = self.authenticate(cheque)?;
        let outcome = self.verify_chain(info, chain, caller)?;
        self.check_chain_policy(info.cheque_id, self.cheques.get(&info.cheque_id), &outcome)?;

        let now = self.clock.now();
        let liable = outcome.liable_party;
        self.cheques.get_or_insert(info, digest).record_chain(
            outcome.holder,
            outcome.liable_party,
            outcome.record_digests,
        );

        tracing::info!(
            cheque = %info.cheque_id,
            holder = %caller,
            liable = %liable,
            hops = chain.len(),
            "Sign-over chain recorded"
        );
        self.push_receipt(
            ReceiptType::SignOverRecorded,
            Some(info.cheque_id),
            caller,
            Some(liable),
            info.amount,
            now,
        );
        Ok(())
    }

    fn try_redeem_sign_over(
        &mut self,
        cheque: &SignedCheque,
        chain: &[SignOverRecord],
        caller: Identity,
    ) -> Result<Payout> {
        let info = &cheque.info;
        let digest = self.authenticate(cheque)?;
        let now = self.clock.now();

        let state = self.cheques.get(&info.cheque_id);
        check_outstanding(info.cheque_id, state)?;
        info.check_window(now)?;
        let outcome = self.verify_chain(info, chain, caller)?;
        self.check_chain_policy(info.cheque_id, state, &outcome)?;

        // Liability always stays with the issuer, however long the chain.
        self.ledger.debit(info.payer, info.amount)?;
        let state = self.cheques.get_or_insert(info, digest);
        state.record_chain(outcome.holder, outcome.liable_party, outcome.record_digests);
        state.mark_redeemed()?;

        tracing::info!(
            cheque = %info.cheque_id,
            payer = %info.payer,
            redeemer = %caller,
            hops = chain.len(),
            amount = info.amount,
            "Signed-over cheque redeemed"
        );
        self.push_receipt(
            ReceiptType::Redeemed,
            Some(info.cheque_id),
            caller,
            Some(info.payer),
            info.amount,
            now,
        );
        Ok(Payout {
            recipient: caller,
            amount: info.amount,
        })
    }

    fn try_revoke(&mut self, cheque: &SignedCheque, caller: Identity) -> Result<()> {
        let info = &cheque.info;
        let digest = self.authenticate(cheque)?;

        let state = self.cheques.get(&info.cheque_id);
        match state.filter(|s| s.has_chain()) {
            Some(s) if caller != s.current_liable_party => {
                return Err(ChequeBankError::NotLiableParty(info.cheque_id));
            }
            None if caller != info.payer => {
                return Err(ChequeBankError::NotPayer(info.cheque_id));
            }
            _ => {}
        }
        check_outstanding(info.cheque_id, state)?;

        let now = self.clock.now();
        self.cheques.get_or_insert(info, digest).mark_revoked()?;

        tracing::info!(cheque = %info.cheque_id, revoker = %caller, "Cheque revoked");
        self.push_receipt(
            ReceiptType::Revoked,
            Some(info.cheque_id),
            caller,
            None,
            info.amount,
            now,
        );
        Ok(())
    }

    /// Verify the payer's signature and that the cheque id is not bound to a
    /// different cheque. Returns the cheque digest.
    fn authenticate(&self, cheque: &SignedCheque) -> Result<[u8; 32]> {
        let info = &cheque.info;
        let digest = info.digest(&self.config.instance_id);
        let signer = self.verifier.recover(&digest, &cheque.signature)?;
        if signer != info.payer {
            return Err(ChequeBankError::ChequeSignatureMismatch {
                payer: info.payer,
                signer,
            });
        }
        if self
            .cheques
            .get(&info.cheque_id)
            .is_some_and(|s| s.cheque_digest != digest)
        {
            return Err(ChequeBankError::ChequeIdConflict(info.cheque_id));
        }
        Ok(digest)
    }

    /// Validate a non-empty chain and require that it ends at `caller`.
    fn verify_chain(
        &self,
        info: &ChequeInfo,
        chain: &[SignOverRecord],
        caller: Identity,
    ) -> Result<ChainOutcome> {
        if chain.is_empty() {
            return Err(ChequeBankError::EmptySignOverChain);
        }
        let outcome = EndorsementChainVerifier::new(&self.verifier).validate(info, chain)?;
        if outcome.holder != caller {
            return Err(ChequeBankError::NotChainHolder {
                holder: outcome.holder,
                caller,
            });
        }
        Ok(outcome)
    }

    fn check_chain_policy(
        &self,
        cheque_id: ChequeId,
        state: Option<&ChequeState>,
        outcome: &ChainOutcome,
    ) -> Result<()> {
        match self.config.chain_policy {
            ChainPolicy::AcceptAny => Ok(()),
            ChainPolicy::MonotonicExtension => {
                if state.is_some_and(|s| !s.is_extended_by(&outcome.record_digests)) {
                    return Err(ChequeBankError::SignOverChainNotExtending(cheque_id));
                }
                Ok(())
            }
        }
    }

    fn push_receipt(
        &mut self,
        receipt_type: ReceiptType,
        cheque_id: Option<ChequeId>,
        actor: Identity,
        counterparty: Option<Identity>,
        amount: Amount,
        logical_time: LogicalTime,
    ) {
        self.receipts.push(ChequeReceipt {
            receipt_type,
            cheque_id,
            actor,
            counterparty,
            amount,
            logical_time,
            issued_at: Utc::now(),
        });
    }

    // =================================================================
    // Queries
    // =================================================================

    #[must_use]
    pub fn balance_of(&self, who: Identity) -> Amount {
        self.ledger.balance_of(who)
    }

    #[must_use]
    pub fn is_redeemed(&self, cheque_id: &ChequeId) -> bool {
        self.cheques.get(cheque_id).is_some_and(ChequeState::is_redeemed)
    }

    #[must_use]
    pub fn is_revoked(&self, cheque_id: &ChequeId) -> bool {
        self.cheques.get(cheque_id).is_some_and(ChequeState::is_revoked)
    }

    /// Identity entitled to redeem, or `None` for a cheque id never used.
    #[must_use]
    pub fn current_holder(&self, cheque_id: &ChequeId) -> Option<Identity> {
        self.cheques.get(cheque_id).map(|s| s.current_holder)
    }

    /// Identity entitled to revoke, or `None` for a cheque id never used.
    #[must_use]
    pub fn current_liable_party(&self, cheque_id: &ChequeId) -> Option<Identity> {
        self.cheques.get(cheque_id).map(|s| s.current_liable_party)
    }

    #[must_use]
    pub fn cheque_state(&self, cheque_id: &ChequeId) -> Option<&ChequeState> {
        self.cheques.get(cheque_id)
    }

    #[must_use]
    pub fn cheques(&self) -> &ChequeStore {
        &self.cheques
    }

    #[must_use]
    pub fn receipts(&self) -> &[ChequeReceipt] {
        &self.receipts
    }

    #[must_use]
    pub fn instance_id(&self) -> &InstanceId {
        &self.config.instance_id
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Terminal states are checked revoked-first.
fn check_outstanding(cheque_id: ChequeId, state: Option<&ChequeState>) -> Result<()> {
    match state {
        Some(s) if s.is_revoked() => Err(ChequeBankError::AlreadyRevoked(cheque_id)),
        Some(s) if s.is_redeemed() => Err(ChequeBankError::AlreadyRedeemed(cheque_id)),
        _ => Ok(()),
    }
}

fn log_rejection(op: &'static str, cheque_id: ChequeId, caller: Identity, err: &ChequeBankError) {
    tracing::warn!(
        op,
        cheque = %cheque_id,
        caller = %caller,
        kind = %err.kind(),
        error = %err,
        "Cheque operation rejected"
    );
}

#[cfg(test)]
mod tests {
    use chequebank_types::{SignatureEnvelope, testkit::Party};

    use super::*;

    /// Deterministic stand-in for signature recovery: the "signature" is the
    /// message itself and the envelope key is taken at its word.
    struct EchoVerifier;

    impl IdentityVerifier for EchoVerifier {
        fn recover(&self, message: &[u8], signature: &SignatureEnvelope) -> Result<Identity> {
            if signature.signature != message {
                return Err(ChequeBankError::InvalidSignature);
            }
            Ok(Identity(signature.public_key))
        }
    }

    fn echo_sign(who: Identity, message: &[u8; 32]) -> SignatureEnvelope {
        SignatureEnvelope {
            public_key: who.0,
            signature: message.to_vec(),
        }
    }

    fn echo_cheque(instance: &InstanceId, payer: Identity, payee: Identity) -> SignedCheque {
        let info = ChequeInfo {
            cheque_id: ChequeId::from_label("echo"),
            payer,
            payee,
            amount: 4,
            valid_from: 0,
            valid_thru: 10,
        };
        let digest = info.digest(instance);
        SignedCheque {
            signature: echo_sign(payer, &digest),
            info,
        }
    }

    #[test]
    fn engine_accepts_substitute_verifier() {
        let instance = InstanceId::derive("echo");
        let payer = Identity([1u8; 32]);
        let payee = Identity([2u8; 32]);
        let holder = Identity([3u8; 32]);
        let mut bank = ChequeBank::new(
            EngineConfig::new(instance),
            InMemoryLedger::new(),
            EchoVerifier,
            ManualClock::new(5),
        );
        bank.deposit(payer, 10).unwrap();

        let cheque = echo_cheque(&instance, payer, payee);
        let id = cheque.cheque_id();
        let digest = SignOverRecord::digest_of(1, &id, &payee, &holder);
        let record = SignOverRecord {
            sequence_number: 1,
            cheque_id: id,
            from_holder: payee,
            to_holder: holder,
            signature: echo_sign(payee, &digest),
        };

        let payout = bank.redeem_sign_over(&cheque, &[record], holder).unwrap();
        assert_eq!(payout, Payout { recipient: holder, amount: 4 });
        assert_eq!(bank.balance_of(payer), 6);
        assert_eq!(bank.current_liable_party(&id), Some(payee));
    }

    #[test]
    fn cheque_for_other_instance_rejected() {
        let payer = Party::from_seed(1);
        let payee = Party::from_seed(2);
        let mut bank = ChequeBank::in_memory(
            EngineConfig::new(InstanceId::derive("here")),
            ManualClock::new(5),
        );
        bank.deposit(payer.id, 10).unwrap();

        let foreign = payer.issue(&InstanceId::derive("elsewhere"), payee.id, 1, 0, 10);
        let err = bank.redeem(&foreign, payee.id).unwrap_err();
        assert_eq!(err, ChequeBankError::InvalidSignature);
        assert_eq!(bank.balance_of(payer.id), 10);
    }

    #[test]
    fn cheque_id_reuse_rejected() {
        let instance = InstanceId::derive("here");
        let payer = Party::from_seed(1);
        let payee = Party::from_seed(2);
        let mut bank = ChequeBank::in_memory(EngineConfig::new(instance), ManualClock::new(5));
        bank.deposit(payer.id, 10).unwrap();

        let first = payer.issue(&instance, payee.id, 1, 0, 10);
        bank.redeem(&first, payee.id).unwrap();

        let mut info = first.info.clone();
        info.amount = 2;
        let reused = SignedCheque::sign(info, &instance, &payer.key);
        assert_eq!(
            bank.redeem(&reused, payee.id),
            Err(ChequeBankError::ChequeIdConflict(first.cheque_id()))
        );
    }

    #[test]
    fn rejected_calls_append_no_receipts() {
        let instance = InstanceId::derive("here");
        let payer = Party::from_seed(1);
        let payee = Party::from_seed(2);
        let mut bank = ChequeBank::in_memory(EngineConfig::new(instance), ManualClock::new(5));
        let cheque = payer.issue(&instance, payee.id, 1, 0, 10);

        assert!(bank.redeem(&cheque, payee.id).is_err());
        assert!(bank.withdraw(payer.id, 1).is_err());
        assert!(bank.receipts().is_empty());
        assert_eq!(bank.cheques().count(), 0);
    }
}
