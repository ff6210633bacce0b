//! Error types for ChequeBank.
//!
//! All errors use the `CB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by kind:
//! - 1xx: Validation errors (malformed chain, bad signature, digest mismatch)
//! - 2xx: Authorization errors (wrong redeemer or revoker)
//! - 3xx: State errors (terminal state reached, window closed, chain exists)
//! - 4xx: Resource errors (insufficient balance)
//! - 9xx: General errors

use thiserror::Error;

use crate::{Amount, ChequeId, Identity, LogicalTime};

/// Coarse classification of a [`ChequeBankError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Authorization,
    State,
    Resource,
    General,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::State => write!(f, "STATE"),
            Self::Resource => write!(f, "RESOURCE"),
            Self::General => write!(f, "GENERAL"),
        }
    }
}

/// Central error enum for all ChequeBank operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChequeBankError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// The signature could not be decoded or does not verify under its key.
    #[error("CB_ERR_100: Invalid signature encoding")]
    InvalidSignature,

    /// The cheque signature recovered to someone other than the payer.
    #[error("CB_ERR_101: Cheque signature unmatched: payer {payer}, signer {signer}")]
    ChequeSignatureMismatch { payer: Identity, signer: Identity },

    /// More sign-over records than the chain bound allows.
    #[error("CB_ERR_102: At most {max} sign-overs for a cheque, got {len}")]
    SignOverChainTooLong { len: usize, max: usize },

    /// A sign-over operation was given an empty chain.
    #[error("CB_ERR_103: Sign-over chain is empty")]
    EmptySignOverChain,

    /// Sequence numbers must run 1, 2, 3, ... without gaps.
    #[error("CB_ERR_104: Sign-over counter invalid: expected {expected}, got {actual}")]
    SignOverCounterInvalid { expected: u8, actual: u8 },

    /// A sign-over record names a different cheque.
    #[error("CB_ERR_105: Sign-over cheque id mismatch at position {position}")]
    SignOverChequeMismatch { position: usize },

    /// The recovered signer of a sign-over is not its `from_holder`.
    #[error("CB_ERR_106: Sign-over signature unmatched at position {position}")]
    SignOverSignatureMismatch { position: usize },

    /// A sign-over does not start from the current holder.
    #[error("CB_ERR_107: Sign-over chain broken at position {position}: expected holder {expected}, got {actual}")]
    SignOverChainBroken {
        position: usize,
        expected: Identity,
        actual: Identity,
    },

    /// The cheque id is already bound to a different cheque.
    #[error("CB_ERR_108: Cheque id already used by a different cheque: {0}")]
    ChequeIdConflict(ChequeId),

    /// Under monotonic chain policy, the chain does not extend the recorded one.
    #[error("CB_ERR_109: Sign-over chain does not extend the recorded chain for {0}")]
    SignOverChainNotExtending(ChequeId),

    // =================================================================
    // Authorization Errors (2xx)
    // =================================================================
    /// Only the payee may redeem a cheque that was never signed over.
    #[error("CB_ERR_200: Only the payee can redeem: payee {payee}, caller {caller}")]
    NotPayee { payee: Identity, caller: Identity },

    /// The caller is not the final holder of the sign-over chain.
    #[error("CB_ERR_201: Payee doesnt match: holder {holder}, caller {caller}")]
    NotChainHolder { holder: Identity, caller: Identity },

    /// Only the payer may revoke a cheque that was never signed over.
    #[error("CB_ERR_202: Only payer can revoke a cheque: {0}")]
    NotPayer(ChequeId),

    /// Only the current liable party may revoke a signed-over cheque.
    #[error("CB_ERR_203: Have no right to revoke this cheque: {0}")]
    NotLiableParty(ChequeId),

    // =================================================================
    // State Errors (3xx)
    // =================================================================
    #[error("CB_ERR_300: Cheque is redeemed: {0}")]
    AlreadyRedeemed(ChequeId),

    #[error("CB_ERR_301: Cheque is revoked: {0}")]
    AlreadyRevoked(ChequeId),

    /// A chain was recorded, so only the endorsed path may redeem.
    #[error("CB_ERR_302: Cheque {0} has been signed over, use the sign-over redemption")]
    SignOverChainExists(ChequeId),

    #[error("CB_ERR_303: Cheque is not activated yet: valid from {valid_from}, now {now}")]
    NotYetActive {
        valid_from: LogicalTime,
        now: LogicalTime,
    },

    #[error("CB_ERR_304: Cheque is expired: valid thru {valid_thru}, now {now}")]
    Expired {
        valid_thru: LogicalTime,
        now: LogicalTime,
    },

    /// A state transition that the lifecycle forbids.
    #[error("CB_ERR_305: Invalid cheque state transition: {reason}")]
    InvalidTransition { reason: String },

    // =================================================================
    // Resource Errors (4xx)
    // =================================================================
    #[error("CB_ERR_400: Balance is not enough: need {needed}, have {available}")]
    InsufficientFunds { needed: Amount, available: Amount },

    /// Crediting would overflow the balance representation.
    #[error("CB_ERR_401: Balance overflow for {0}")]
    BalanceOverflow(Identity),

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Configuration error (invalid config document, missing fields, etc.).
    #[error("CB_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// Custodial supply no longer matches credits minus debits.
    #[error("CB_ERR_901: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },
}

impl ChequeBankError {
    /// The error class, used to decide how callers should react.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidSignature
            | Self::ChequeSignatureMismatch { .. }
            | Self::SignOverChainTooLong { .. }
            | Self::EmptySignOverChain
            | Self::SignOverCounterInvalid { .. }
            | Self::SignOverChequeMismatch { .. }
            | Self::SignOverSignatureMismatch { .. }
            | Self::SignOverChainBroken { .. }
            | Self::ChequeIdConflict(_)
            | Self::SignOverChainNotExtending(_) => ErrorKind::Validation,
            Self::NotPayee { .. }
            | Self::NotChainHolder { .. }
            | Self::NotPayer(_)
            | Self::NotLiableParty(_) => ErrorKind::Authorization,
            Self::AlreadyRedeemed(_)
            | Self::AlreadyRevoked(_)
            | Self::SignOverChainExists(_)
            | Self::NotYetActive { .. }
            | Self::Expired { .. }
            | Self::InvalidTransition { .. } => ErrorKind::State,
            Self::InsufficientFunds { .. } | Self::BalanceOverflow(_) => ErrorKind::Resource,
            Self::Configuration(_) | Self::SupplyInvariantViolation { .. } => ErrorKind::General,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, ChequeBankError>;
