//! Keyed store of per-cheque state.
//!
//! Entries are created the first time a mutation for a cheque id commits and
//! are never removed: the store doubles as the record of which ids have been
//! used.

use std::collections::HashMap;

use chequebank_types::{ChequeId, ChequeInfo, ChequeState, ChequeStatus};

#[derive(Debug, Default)]
pub struct ChequeStore {
    states: HashMap<ChequeId, ChequeState>,
}

impl ChequeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, cheque_id: &ChequeId) -> Option<&ChequeState> {
        self.states.get(cheque_id)
    }

    /// State for `info`, created with default custody if absent.
    pub fn get_or_insert(&mut self, info: &ChequeInfo, cheque_digest: [u8; 32]) -> &mut ChequeState {
        self.states
            .entry(info.cheque_id)
            .or_insert_with(|| ChequeState::new(info, cheque_digest))
    }

    /// Number of cheque ids tracked.
    #[must_use]
    pub fn count(&self) -> usize {
        self.states.len()
    }

    /// Number of cheques in `status`.
    #[must_use]
    pub fn count_with_status(&self, status: ChequeStatus) -> usize {
        self.states.values().filter(|s| s.status == status).count()
    }
}
