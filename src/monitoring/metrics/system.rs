//! OS resource sampling using the sysinfo crate
//!
//! Real values are only produced when the `metrics` feature is enabled; without it
//! every reading is zero.

use crate::monitoring::types::{NetworkCounters, SystemMetricsSnapshot};
use crate::utils::error::{HealthError, Result};
use chrono::Utc;
#[cfg(feature = "metrics")]
use once_cell::sync::Lazy;
#[cfg(feature = "metrics")]
use sysinfo::{Disks, Networks, System};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

#[cfg(feature = "metrics")]
static SYSTEM: Lazy<parking_lot::Mutex<System>> =
    Lazy::new(|| parking_lot::Mutex::new(System::new_all()));

#[cfg(feature = "metrics")]
static NETWORKS: Lazy<parking_lot::Mutex<Networks>> =
    Lazy::new(|| parking_lot::Mutex::new(Networks::new_with_refreshed_list()));

#[cfg(feature = "metrics")]
static DISKS: Lazy<parking_lot::Mutex<Disks>> =
    Lazy::new(|| parking_lot::Mutex::new(Disks::new_with_refreshed_list()));

/// Usage of a bounded resource such as memory or disk
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResourceUsage {
    pub percent: f64,
    pub used_gb: f64,
    pub total_gb: f64,
}

impl ResourceUsage {
    fn from_bytes(used: u64, total: u64) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            used as f64 / total as f64 * 100.0
        };
        Self {
            percent,
            used_gb: used as f64 / BYTES_PER_GB,
            total_gb: total as f64 / BYTES_PER_GB,
        }
    }
}

/// CPU usage since the previous refresh
#[cfg(feature = "metrics")]
pub fn cpu_usage() -> f64 {
    let mut sys = SYSTEM.lock();
    sys.refresh_cpu_usage();
    sys.global_cpu_usage() as f64
}

#[cfg(not(feature = "metrics"))]
pub fn cpu_usage() -> f64 {
    0.0
}

/// Run a sampler on the blocking pool so lock waits never stall runtime workers
pub async fn run_blocking<T, F>(sample: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(sample)
        .await
        .map_err(|e| HealthError::internal(format!("Sampler task failed: {}", e)))
}

/// CPU usage measured over a short sampling window
pub async fn sample_cpu_usage() -> Result<f64> {
    // The first refresh only primes the counters
    run_blocking(cpu_usage).await?;
    #[cfg(feature = "metrics")]
    tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
    run_blocking(cpu_usage).await
}

#[cfg(feature = "metrics")]
pub fn memory_usage() -> ResourceUsage {
    let mut sys = SYSTEM.lock();
    sys.refresh_memory();
    ResourceUsage::from_bytes(sys.used_memory(), sys.total_memory())
}

#[cfg(not(feature = "metrics"))]
pub fn memory_usage() -> ResourceUsage {
    ResourceUsage::default()
}

/// Usage of the root filesystem, or of all disks summed when no root mount is listed
#[cfg(feature = "metrics")]
pub fn disk_usage() -> ResourceUsage {
    let mut disks = DISKS.lock();
    disks.refresh_list();

    let root = disks
        .iter()
        .find(|d| d.mount_point() == std::path::Path::new("/"));

    let (used, total) = match root {
        Some(disk) => (
            disk.total_space().saturating_sub(disk.available_space()),
            disk.total_space(),
        ),
        None => disks.iter().fold((0u64, 0u64), |(used, total), d| {
            (
                used + d.total_space().saturating_sub(d.available_space()),
                total + d.total_space(),
            )
        }),
    };

    ResourceUsage::from_bytes(used, total)
}

#[cfg(not(feature = "metrics"))]
pub fn disk_usage() -> ResourceUsage {
    ResourceUsage::default()
}

#[cfg(feature = "metrics")]
pub fn network_counters() -> NetworkCounters {
    let mut networks = NETWORKS.lock();
    networks.refresh();
    networks
        .values()
        .fold(NetworkCounters::default(), |acc, data| NetworkCounters {
            bytes_sent: acc.bytes_sent + data.total_transmitted(),
            bytes_recv: acc.bytes_recv + data.total_received(),
            packets_sent: acc.packets_sent + data.total_packets_transmitted(),
            packets_recv: acc.packets_recv + data.total_packets_received(),
        })
}

#[cfg(not(feature = "metrics"))]
pub fn network_counters() -> NetworkCounters {
    NetworkCounters::default()
}

#[cfg(feature = "metrics")]
fn host_readings() -> (f64, ResourceUsage, usize) {
    let mut sys = SYSTEM.lock();
    sys.refresh_all();
    let memory = ResourceUsage::from_bytes(sys.used_memory(), sys.total_memory());
    (sys.global_cpu_usage() as f64, memory, sys.processes().len())
}

#[cfg(not(feature = "metrics"))]
fn host_readings() -> (f64, ResourceUsage, usize) {
    (0.0, ResourceUsage::default(), 0)
}

#[cfg(feature = "metrics")]
fn load_and_uptime() -> ([f64; 3], u64) {
    let load = System::load_average();
    ([load.one, load.five, load.fifteen], System::uptime())
}

#[cfg(not(feature = "metrics"))]
fn load_and_uptime() -> ([f64; 3], u64) {
    ([0.0; 3], 0)
}

/// Take a full snapshot of host resource usage. Blocking.
pub fn snapshot() -> SystemMetricsSnapshot {
    let (cpu_percent, memory, process_count) = host_readings();
    let disk = disk_usage();
    let (load_average, uptime_seconds) = load_and_uptime();

    SystemMetricsSnapshot {
        timestamp: Utc::now(),
        cpu_percent,
        memory_percent: memory.percent,
        memory_used_gb: memory.used_gb,
        memory_total_gb: memory.total_gb,
        disk_percent: disk.percent,
        disk_used_gb: disk.used_gb,
        disk_total_gb: disk.total_gb,
        network: network_counters(),
        process_count,
        load_average,
        uptime_seconds,
    }
}
