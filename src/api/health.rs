//! Shared counters for the /health endpoint.
//! Updated by the route handlers, read by /health.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct HealthState {
    /// Successful classifications served, stateless and view alike.
    pub classifications: AtomicU64,
    /// Forecast bodies rejected at parse or precondition time.
    pub rejected_inputs: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_classifications(&self, n: u64) {
        self.classifications.fetch_add(n, Ordering::Relaxed);
    }

    pub fn inc_rejected_inputs(&self) {
        self.rejected_inputs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn classifications(&self) -> u64 {
        self.classifications.load(Ordering::Relaxed)
    }

    pub fn rejected_inputs(&self) -> u64 {
        self.rejected_inputs.load(Ordering::Relaxed)
    }
}
