//! Receipt types for the ChequeBank audit trail.
//!
//! Every committed mutation (deposit, withdrawal, redemption, sign-over
//! notification, revocation) appends one [`ChequeReceipt`]. Rejected calls
//! append nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Amount, ChequeId, Identity, LogicalTime};

/// The kind of action a receipt records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceiptType {
    Deposited,
    Withdrawn,
    /// A cheque was paid out, directly or through a sign-over chain.
    Redeemed,
    /// A sign-over chain was recorded and custody moved.
    SignOverRecorded,
    Revoked,
}

impl std::fmt::Display for ReceiptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposited => write!(f, "DEPOSITED"),
            Self::Withdrawn => write!(f, "WITHDRAWN"),
            Self::Redeemed => write!(f, "REDEEMED"),
            Self::SignOverRecorded => write!(f, "SIGN_OVER_RECORDED"),
            Self::Revoked => write!(f, "REVOKED"),
        }
    }
}

/// One entry of the append-only audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeReceipt {
    pub receipt_type: ReceiptType,
    /// The cheque involved, if any.
    pub cheque_id: Option<ChequeId>,
    /// The identity that invoked the operation.
    pub actor: Identity,
    /// Other party to the operation: the debited payer on redemption, the
    /// recipient on withdrawal, the liable party on sign-over.
    pub counterparty: Option<Identity>,
    pub amount: Amount,
    /// Logical time at which the operation committed.
    pub logical_time: LogicalTime,
    /// Wall-clock time, for operators only; never used for validity.
    pub issued_at: DateTime<Utc>,
}

/// An out-of-ledger transfer produced by a redemption or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub recipient: Identity,
    pub amount: Amount,
}
