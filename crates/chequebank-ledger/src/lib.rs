//! # chequebank-ledger
//!
//! Custodial balance bookkeeping for ChequeBank.
//!
//! - [`LedgerAdapter`]: the credit/debit/balance capability the engine needs
//! - [`InMemoryLedger`]: per-identity balances owned by the engine
//! - [`SupplyConservation`]: `Σ(balances) == Σ(credits) - Σ(debits)`

pub mod ledger;
pub mod supply_conservation;

pub use ledger::{InMemoryLedger, LedgerAdapter};
pub use supply_conservation::SupplyConservation;
