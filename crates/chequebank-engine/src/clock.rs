//! Logical time source.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use chequebank_types::LogicalTime;

/// Supplies the current logical time. Must be monotonically non-decreasing.
pub trait Clock {
    fn now(&self) -> LogicalTime;
}

/// A clock advanced explicitly by its owner (block height, sequencer tick,
/// test driver). Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: LogicalTime) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Move the clock forward by `ticks`. Returns the new time.
    pub fn advance(&self, ticks: LogicalTime) -> LogicalTime {
        self.now.fetch_add(ticks, Ordering::SeqCst) + ticks
    }

    /// Move the clock to `at`. Earlier times are ignored so the clock never
    /// runs backwards.
    pub fn set(&self, at: LogicalTime) {
        self.now.fetch_max(at, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> LogicalTime {
        self.now.load(Ordering::SeqCst)
    }
}
