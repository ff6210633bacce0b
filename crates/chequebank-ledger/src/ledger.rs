//! Custodial balance ledger.
//!
//! Tracks one balance per identity. All mutations are atomic: either the
//! full operation succeeds or the balance is unchanged.

use std::collections::HashMap;

use chequebank_types::{Amount, ChequeBankError, Identity, Result};

use crate::supply_conservation::SupplyConservation;

/// Balance bookkeeping the cheque engine relies on.
///
/// `debit` must check and mutate in one step so that a successful
/// authorization check and the debit it guards cannot be separated.
pub trait LedgerAdapter {
    /// Add `amount` to `who`'s balance.
    ///
    /// # Errors
    /// Returns `BalanceOverflow` if the balance cannot represent the result.
    fn credit(&mut self, who: Identity, amount: Amount) -> Result<()>;

    /// Remove `amount` from `who`'s balance.
    ///
    /// # Errors
    /// Returns `InsufficientFunds` if the balance is below `amount`.
    fn debit(&mut self, who: Identity, amount: Amount) -> Result<()>;

    /// Current balance of `who` (zero if never seen).
    fn balance_of(&self, who: Identity) -> Amount;
}

/// In-memory ledger with supply conservation tracking.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    /// Per-identity balances, created lazily on first credit.
    balances: HashMap<Identity, Amount>,
    supply: SupplyConservation,
}

impl InMemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all balances held in custody.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.balances.values().sum()
    }

    /// Check `Σ(balances) == Σ(credits) - Σ(debits)`.
    ///
    /// # Errors
    /// Returns `SupplyInvariantViolation` if the books do not balance.
    pub fn verify_supply(&self) -> Result<()> {
        self.supply.verify(self.total_supply())
    }

    /// Number of identities with a balance entry.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }
}

impl LedgerAdapter for InMemoryLedger {
    fn credit(&mut self, who: Identity, amount: Amount) -> Result<()> {
        let entry = self.balances.entry(who).or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or(ChequeBankError::BalanceOverflow(who))?;
        self.supply.record_credit(amount);
        tracing::debug!(account = %who, amount, balance = *entry, "Ledger credit");
        Ok(())
    }

    fn debit(&mut self, who: Identity, amount: Amount) -> Result<()> {
        let available = self.balance_of(who);
        if available < amount {
            return Err(ChequeBankError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        // Zero-amount debits of unknown accounts must not create entries.
        if let Some(entry) = self.balances.get_mut(&who) {
            *entry -= amount;
        }
        self.supply.record_debit(amount);
        tracing::debug!(account = %who, amount, "Ledger debit");
        Ok(())
    }

    fn balance_of(&self, who: Identity) -> Amount {
        self.balances.get(&who).copied().unwrap_or_default()
    }
}
