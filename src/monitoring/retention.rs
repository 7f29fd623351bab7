//! Retention cleanup for result and metrics histories

use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::info;

use super::system::HealthMonitor;

/// What one cleanup pass removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CleanupSummary {
    pub results_removed: usize,
    /// Checks whose history became empty and was dropped
    pub checks_emptied: usize,
    pub snapshots_removed: usize,
}

/// Computes the retention cutoff
#[derive(Debug, Clone, Copy)]
pub struct RetentionCleaner {
    retention: Duration,
}

impl RetentionCleaner {
    pub fn new(retention: Duration) -> Self {
        Self { retention }
    }

    /// Oldest timestamp that survives a cleanup at `now`
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let retention = chrono::Duration::from_std(self.retention).unwrap_or(chrono::Duration::MAX);
        now.checked_sub_signed(retention)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl HealthMonitor {
    /// Drop results and host snapshots older than the retention window
    pub fn run_cleanup(&self, now: DateTime<Utc>) -> CleanupSummary {
        let cutoff = self.cleaner.cutoff(now);

        let (results_removed, checks_emptied) = self.state.write().results.prune_older_than(cutoff);
        let snapshots_removed = self.metrics.prune_older_than(cutoff);

        let summary = CleanupSummary {
            results_removed,
            checks_emptied,
            snapshots_removed,
        };
        info!(
            results_removed,
            checks_emptied, snapshots_removed, "Cleaned up old health data"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_subtracts_retention() {
        let cleaner = RetentionCleaner::new(Duration::from_secs(24 * 3600));
        let now = Utc::now();
        assert_eq!(cleaner.cutoff(now), now - chrono::Duration::hours(24));
    }

    #[test]
    fn test_cutoff_saturates() {
        let cleaner = RetentionCleaner::new(Duration::from_secs(u64::MAX));
        assert_eq!(cleaner.cutoff(Utc::now()), DateTime::<Utc>::MIN_UTC);
    }
}
