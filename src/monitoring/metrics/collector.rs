//! System metrics collector with a bounded history

use super::bounded::BoundedPush;
use super::system;
use crate::monitoring::types::SystemMetricsSnapshot;
use crate::utils::error::{HealthError, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, warn};

/// Source of host resource samples
pub trait MetricsSampler: Send + Sync {
    /// Take one sample. May block.
    fn sample(&self) -> Result<SystemMetricsSnapshot>;
}

/// Sampler backed by sysinfo
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoSampler;

impl MetricsSampler for SysinfoSampler {
    fn sample(&self) -> Result<SystemMetricsSnapshot> {
        Ok(system::snapshot())
    }
}

/// Collects periodic host snapshots into a history capped by retention
pub struct SystemMetricsCollector {
    sampler: Arc<dyn MetricsSampler>,
    pub(super) history: RwLock<VecDeque<SystemMetricsSnapshot>>,
    capacity: usize,
}

impl std::fmt::Debug for SystemMetricsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemMetricsCollector")
            .field("capacity", &self.capacity)
            .field("samples", &self.history.read().len())
            .finish()
    }
}

impl SystemMetricsCollector {
    /// Create a collector using the sysinfo sampler
    pub fn new(capacity: usize) -> Self {
        Self::with_sampler(capacity, Arc::new(SysinfoSampler))
    }

    pub fn with_sampler(capacity: usize, sampler: Arc<dyn MetricsSampler>) -> Self {
        Self {
            sampler,
            history: RwLock::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Take a sample and append it to the history.
    ///
    /// Sampling errors are logged and skipped.
    pub async fn collect(&self) -> Option<SystemMetricsSnapshot> {
        let sampler = self.sampler.clone();
        let sampled = tokio::task::spawn_blocking(move || sampler.sample())
            .await
            .map_err(|e| HealthError::internal(format!("Metrics sampler task failed: {}", e)))
            .and_then(|r| r);

        match sampled {
            Ok(snapshot) => {
                debug!(
                    cpu = snapshot.cpu_percent,
                    memory = snapshot.memory_percent,
                    disk = snapshot.disk_percent,
                    "Collected system metrics"
                );
                self.history
                    .write()
                    .push_bounded(snapshot.clone(), self.capacity);
                Some(snapshot)
            }
            Err(e) => {
                warn!("Failed to collect system metrics: {}", e);
                None
            }
        }
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Option<SystemMetricsSnapshot> {
        self.history.read().back().cloned()
    }

    /// All retained snapshots, oldest first
    pub fn history(&self) -> Vec<SystemMetricsSnapshot> {
        self.history.read().iter().cloned().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.history.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.history.read().is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop snapshots taken before `cutoff`, returning how many were removed
    pub fn prune_older_than(&self, cutoff: DateTime<Utc>) -> usize {
        let mut history = self.history.write();
        let before = history.len();
        history.retain(|s| s.timestamp >= cutoff);
        before - history.len()
    }
}
