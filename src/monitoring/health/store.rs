//! Result history and failure streak bookkeeping

use crate::monitoring::metrics::bounded::BoundedPush;
use crate::monitoring::types::{HealthCheckResult, HealthStatus};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Per-check bounded result histories, oldest first
#[derive(Debug, Default)]
pub struct ResultStore {
    histories: BTreeMap<String, VecDeque<HealthCheckResult>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result to the named check's history, keeping at most `capacity` entries
    pub fn append(&mut self, check_name: &str, result: HealthCheckResult, capacity: usize) {
        self.histories
            .entry(check_name.to_string())
            .or_default()
            .push_bounded(result, capacity);
    }

    /// Most recent result for a check
    pub fn latest(&self, check_name: &str) -> Option<&HealthCheckResult> {
        self.histories.get(check_name).and_then(|h| h.back())
    }

    /// Latest result of every check with history, in name order
    pub fn latest_all(&self) -> impl Iterator<Item = (&str, &HealthCheckResult)> {
        self.histories
            .iter()
            .filter_map(|(name, h)| h.back().map(|r| (name.as_str(), r)))
    }

    pub fn history(&self, check_name: &str) -> Vec<HealthCheckResult> {
        self.histories
            .get(check_name)
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn remove(&mut self, check_name: &str) -> bool {
        self.histories.remove(check_name).is_some()
    }

    /// Number of checks with history
    #[inline]
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// Total number of stored results
    pub fn total_results(&self) -> usize {
        self.histories.values().map(VecDeque::len).sum()
    }

    /// Drop results older than `cutoff` and forget checks left with no history.
    ///
    /// Returns the number of results removed and the number of checks emptied.
    pub fn prune_older_than(&mut self, cutoff: DateTime<Utc>) -> (usize, usize) {
        let mut removed = 0;
        for history in self.histories.values_mut() {
            let before = history.len();
            history.retain(|r| r.timestamp >= cutoff);
            removed += before - history.len();
        }

        let before = self.histories.len();
        self.histories.retain(|_, h| !h.is_empty());
        (removed, before - self.histories.len())
    }
}

/// Consecutive WARNING/CRITICAL counts per check
#[derive(Debug, Default)]
pub struct FailureTracker {
    counters: HashMap<String, u32>,
}

impl FailureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a new status into the streak and return the updated count.
    ///
    /// Failures extend the streak; HEALTHY and UNKNOWN reset it.
    pub fn record(&mut self, check_name: &str, status: HealthStatus) -> u32 {
        let counter = self.counters.entry(check_name.to_string()).or_insert(0);
        if status.is_failure() {
            *counter = counter.saturating_add(1);
        } else {
            *counter = 0;
        }
        *counter
    }

    pub fn get(&self, check_name: &str) -> u32 {
        self.counters.get(check_name).copied().unwrap_or(0)
    }

    pub fn remove(&mut self, check_name: &str) -> bool {
        self.counters.remove(check_name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counters.iter().map(|(name, count)| (name.as_str(), *count))
    }
}
