//! Supply conservation invariant checker.
//!
//! Invariant enforced by the in-memory ledger:
//! ```text
//! Σ(balances) == Σ(credits) - Σ(debits)
//! ```
//!
//! Redemptions and withdrawals are debits (funds leave custody); deposits are
//! credits. Custody never mints or burns anything else.

use chequebank_types::{Amount, ChequeBankError, Result};

/// Tracks totals flowing into and out of custody.
#[derive(Debug, Default)]
pub struct SupplyConservation {
    credited: Amount,
    debited: Amount,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record funds entering custody.
    pub fn record_credit(&mut self, amount: Amount) {
        self.credited = self.credited.saturating_add(amount);
    }

    /// Record funds leaving custody.
    pub fn record_debit(&mut self, amount: Amount) {
        self.debited = self.debited.saturating_add(amount);
    }

    /// Expected custodial supply: credits - debits.
    #[must_use]
    pub fn expected_supply(&self) -> Amount {
        self.credited.saturating_sub(self.debited)
    }

    /// Verify that the actual supply (sum of all balances) matches the
    /// expected supply.
    ///
    /// # Errors
    /// Returns [`ChequeBankError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_supply: Amount) -> Result<()> {
        let expected = self.expected_supply();
        if actual_supply != expected {
            return Err(ChequeBankError::SupplyInvariantViolation {
                reason: format!(
                    "supply {actual_supply} != expected {expected} \
                     (credited={}, debited={})",
                    self.credited, self.debited
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn total_credited(&self) -> Amount {
        self.credited
    }

    #[must_use]
    pub fn total_debited(&self) -> Amount {
        self.debited
    }
}
