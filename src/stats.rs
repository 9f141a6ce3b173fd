use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Default)]
pub struct RunStats {
    candidates: AtomicU64,
    excluded: AtomicU64,
    rejected: AtomicU64,
    validated: AtomicU64,
}

impl RunStats {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_candidates(&self, n: u64) {
        self.candidates.fetch_add(n, Ordering::Relaxed);
    }

    pub fn inc_excluded(&self) {
        self.excluded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_validated(&self) {
        self.validated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn validated(&self) -> u64 {
        self.validated.load(Ordering::Relaxed)
    }

    pub fn dump(&self) {
        let candidates = self.candidates.load(Ordering::Relaxed);
        let excluded = self.excluded.load(Ordering::Relaxed);
        let rejected = self.rejected.load(Ordering::Relaxed);
        let validated = self.validated.load(Ordering::Relaxed);

        info!(
            "STATS: Candidates: {}, Excluded: {}, Rejected by DNS: {} ({:.1}%), Validated: {}",
            candidates,
            excluded,
            rejected,
            if candidates > 0 {
                (rejected as f64 / candidates as f64) * 100.0
            } else {
                0.0
            },
            validated
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let stats = RunStats::new();
        stats.add_candidates(10);
        stats.inc_excluded();
        stats.inc_rejected();
        stats.inc_rejected();
        stats.inc_validated();
        assert_eq!(stats.validated(), 1);
        assert_eq!(stats.candidates.load(Ordering::Relaxed), 10);
        assert_eq!(stats.rejected.load(Ordering::Relaxed), 2);
    }
}
