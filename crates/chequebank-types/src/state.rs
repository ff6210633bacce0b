//! # Per-cheque lifecycle state
//!
//! ## State Machine
//!
//! ```text
//!   ┌─────────────┐  redeem   ┌──────────┐
//!   │ OUTSTANDING ├──────────▶│ REDEEMED │
//!   └──────┬──────┘           └──────────┘
//!          │ revoke
//!          ▼
//!   ┌──────────┐
//!   │ REVOKED  │
//!   └──────────┘
//! ```
//!
//! Both terminal states are sticky and mutually exclusive. Custody
//! (`current_holder`, `current_liable_party`) may move while the cheque is
//! outstanding, each time a sign-over chain is recorded.

use serde::{Deserialize, Serialize};

use crate::{ChequeBankError, ChequeId, ChequeInfo, Identity, Result};

/// Lifecycle status of a cheque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChequeStatus {
    /// Neither redeemed nor revoked.
    Outstanding,
    /// Paid out. **Irreversible.**
    Redeemed,
    /// Cancelled by the liable party. **Irreversible.**
    Revoked,
}

impl ChequeStatus {
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Outstanding, Self::Redeemed | Self::Revoked)
        )
    }
}

impl std::fmt::Display for ChequeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outstanding => write!(f, "OUTSTANDING"),
            Self::Redeemed => write!(f, "REDEEMED"),
            Self::Revoked => write!(f, "REVOKED"),
        }
    }
}

/// Everything the engine remembers about one cheque id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeState {
    pub cheque_id: ChequeId,
    /// Digest of the cheque first bound to this id.
    pub cheque_digest: [u8; 32],
    pub status: ChequeStatus,
    /// Identity entitled to redeem.
    pub current_holder: Identity,
    /// Identity entitled to revoke.
    pub current_liable_party: Identity,
    /// Digests of the most recently recorded sign-over chain, in order.
    /// Empty while no chain has been recorded.
    pub chain_digests: Vec<[u8; 32]>,
}

impl ChequeState {
    /// Fresh state: payee holds, payer is liable.
    #[must_use]
    pub fn new(info: &ChequeInfo, cheque_digest: [u8; 32]) -> Self {
        Self {
            cheque_id: info.cheque_id,
            cheque_digest,
            status: ChequeStatus::Outstanding,
            current_holder: info.payee,
            current_liable_party: info.payer,
            chain_digests: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_redeemed(&self) -> bool {
        self.status == ChequeStatus::Redeemed
    }

    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.status == ChequeStatus::Revoked
    }

    /// Whether any sign-over chain has ever been recorded.
    #[must_use]
    pub fn has_chain(&self) -> bool {
        !self.chain_digests.is_empty()
    }

    /// Record a verified chain's outcome.
    pub fn record_chain(&mut self, holder: Identity, liable: Identity, digests: Vec<[u8; 32]>) {
        self.current_holder = holder;
        self.current_liable_party = liable;
        self.chain_digests = digests;
    }

    /// Whether `digests` starts with the recorded chain.
    #[must_use]
    pub fn is_extended_by(&self, digests: &[[u8; 32]]) -> bool {
        digests.len() >= self.chain_digests.len()
            && digests[..self.chain_digests.len()] == self.chain_digests[..]
    }

    /// # Errors
    /// Returns `InvalidTransition` unless the cheque is outstanding.
    pub fn mark_redeemed(&mut self) -> Result<()> {
        self.transition(ChequeStatus::Redeemed)
    }

    /// # Errors
    /// Returns `InvalidTransition` unless the cheque is outstanding.
    pub fn mark_revoked(&mut self) -> Result<()> {
        self.transition(ChequeStatus::Revoked)
    }

    fn transition(&mut self, target: ChequeStatus) -> Result<()> {
        if !self.status.can_transition_to(target) {
            return Err(ChequeBankError::InvalidTransition {
                reason: format!(
                    "Cannot transition {} from {} to {target}",
                    self.cheque_id, self.status
                ),
            });
        }
        self.status = target;
        Ok(())
    }
}
