//! # chequebank-engine
//!
//! Cheque authorization engine for **ChequeBank**.
//!
//! - [`ChequeBank`]: custody, redemption (direct and signed-over), revocation
//! - [`EndorsementChainVerifier`]: structural and cryptographic chain checks
//! - [`IdentityVerifier`] / [`Ed25519Verifier`]: signer recovery
//! - [`Clock`] / [`ManualClock`]: logical time
//! - [`ChequeStore`]: per-cheque lifecycle state
//!
//! ## Cheque Flow
//!
//! ```text
//! payer signs cheque ──▶ payee ──redeem()──────────────────────▶ payout
//!                          │
//!                          └─ sign-over ─▶ holder … ─▶ holder N
//!                                         notify_sign_over() (optional)
//!                                         redeem_sign_over() ──▶ payout
//! ```
//!
//! The payer is debited in both cases. Revocation authority starts with the
//! payer and moves to the last signer of a recorded chain.

pub mod clock;
pub mod endorsement;
pub mod engine;
pub mod store;
pub mod verifier;

pub use clock::{Clock, ManualClock};
pub use endorsement::{ChainOutcome, EndorsementChainVerifier};
pub use engine::ChequeBank;
pub use store::ChequeStore;
pub use verifier::{Ed25519Verifier, IdentityVerifier};
