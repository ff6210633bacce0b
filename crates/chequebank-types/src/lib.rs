//! # chequebank-types
//!
//! Shared types, errors, and configuration for **ChequeBank**.
//!
//! This crate is the leaf dependency of the workspace. Every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Identity`], [`ChequeId`], [`InstanceId`], [`Amount`], [`LogicalTime`]
//! - **Cheque model**: [`ChequeInfo`], [`SignedCheque`]
//! - **Sign-over model**: [`SignOverRecord`], [`EndorsementChain`]
//! - **Signatures**: [`SignatureEnvelope`]
//! - **Lifecycle**: [`ChequeState`], [`ChequeStatus`]
//! - **Audit trail**: [`ChequeReceipt`], [`ReceiptType`], [`Payout`]
//! - **Configuration**: [`EngineConfig`], [`ChainPolicy`]
//! - **Errors**: [`ChequeBankError`] with `CB_ERR_` prefix codes
//! - **Constants**: system-wide limits

pub mod cheque;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod receipt;
pub mod sign_over;
pub mod signature;
pub mod state;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testkit;

pub use cheque::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use receipt::*;
pub use sign_over::*;
pub use signature::*;
pub use state::*;

// Constants are accessed via `chequebank_types::constants::FOO`.
