//! Store statistics tracking

use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for a [`Store`](crate::Store)
///
/// Counters are atomic so lookups through `&Store` can record hits.
#[derive(Debug, Default)]
pub struct StoreStats {
    inserts: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
    rejected_duplicates: AtomicU64,
    rejected_ttls: AtomicU64,
}

impl StoreStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expirations(&self, count: u64) {
        self.expirations.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected_duplicate(&self) {
        self.rejected_duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected_ttl(&self) {
        self.rejected_ttls.fetch_add(1, Ordering::Relaxed);
    }

    /// Successful puts
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Lookups that found a live entry
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that found nothing
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Entries drained by advancing
    pub fn expirations(&self) -> u64 {
        self.expirations.load(Ordering::Relaxed)
    }

    /// Puts rejected for a duplicated key
    pub fn rejected_duplicates(&self) -> u64 {
        self.rejected_duplicates.load(Ordering::Relaxed)
    }

    /// Puts rejected for a TTL over the wheel's max tick
    pub fn rejected_ttls(&self) -> u64 {
        self.rejected_ttls.load(Ordering::Relaxed)
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Reset all statistics
    pub fn reset(&self) {
        self.inserts.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.expirations.store(0, Ordering::Relaxed);
        self.rejected_duplicates.store(0, Ordering::Relaxed);
        self.rejected_ttls.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let stats = StoreStats::new();

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_expirations(3);

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.expirations(), 3);
        assert_eq!(stats.hit_ratio(), 2.0 / 3.0);
    }

    #[test]
    fn test_stats_reset() {
        let stats = StoreStats::new();

        stats.record_insert();
        stats.record_rejected_duplicate();
        stats.record_rejected_ttl();
        stats.reset();

        assert_eq!(stats.inserts(), 0);
        assert_eq!(stats.rejected_duplicates(), 0);
        assert_eq!(stats.rejected_ttls(), 0);
        assert_eq!(stats.hit_ratio(), 0.0);
    }
}
