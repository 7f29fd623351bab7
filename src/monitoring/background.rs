//! Background loops for HealthMonitor: scheduler, metrics sampling and retention cleanup

use crate::utils::error::Result;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::system::{BackgroundTasks, HealthMonitor};

impl HealthMonitor {
    /// Start the background loops. A no-op when monitoring is disabled or already running.
    pub async fn start(&self) -> Result<()> {
        if !self.config.enabled {
            info!("Health monitoring disabled, background tasks not started");
            return Ok(());
        }

        let mut tasks = self.tasks.lock();
        if tasks.is_some() {
            debug!("Health monitor already running");
            return Ok(());
        }

        info!(
            "Starting health monitor (tick every {:?})",
            self.config.tick_period()
        );

        let cancel = CancellationToken::new();
        let handles = vec![
            self.spawn_loop(cancel.clone(), "scheduler", Self::scheduler_loop),
            self.spawn_loop(cancel.clone(), "metrics", Self::metrics_loop),
            self.spawn_loop(cancel.clone(), "cleanup", Self::cleanup_loop),
        ];
        *tasks = Some(BackgroundTasks { cancel, handles });

        Ok(())
    }

    /// Cancel the background loops and wait for them to finish.
    ///
    /// In-flight checks are abandoned without committing a result.
    pub async fn stop(&self) -> Result<()> {
        let Some(tasks) = self.tasks.lock().take() else {
            return Ok(());
        };

        info!("Stopping health monitor");
        tasks.cancel.cancel();

        for handle in tasks.handles {
            if let Err(e) = handle.await {
                warn!("Background task ended abnormally: {}", e);
            }
        }

        info!("Health monitor stopped");
        Ok(())
    }

    /// Whether the background loops are running
    #[inline]
    pub fn is_active(&self) -> bool {
        self.tasks.lock().is_some()
    }

    fn spawn_loop<F, Fut>(&self, cancel: CancellationToken, name: &'static str, body: F) -> JoinHandle<()>
    where
        F: FnOnce(HealthMonitor, CancellationToken) -> Fut,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let fut = body(self.clone(), cancel);
        tokio::spawn(async move {
            fut.await;
            debug!("{} loop stopped", name);
        })
    }

    async fn scheduler_loop(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.config.tick_period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                executed = self.tick(Instant::now()) => {
                    if !executed.is_empty() {
                        debug!("Tick executed checks: {:?}", executed);
                    }
                }
            }
        }
    }

    async fn metrics_loop(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.config.metrics_collection_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.metrics.collect().await;
                }
            }
        }
    }

    async fn cleanup_loop(self, cancel: CancellationToken) {
        let period = self.config.cleanup_interval();
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.run_cleanup(chrono::Utc::now());
                }
            }
        }
    }
}
