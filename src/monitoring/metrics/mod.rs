//! Host resource metrics
//!
//! Periodic snapshots of CPU, memory, disk, network and process counts, kept in a
//! bounded history.

pub(crate) mod bounded;
mod collector;
pub mod system;


pub use collector::{MetricsSampler, SysinfoSampler, SystemMetricsCollector};
pub use system::ResourceUsage;
