//! End-to-end monitor tests through the public API

#[cfg(test)]
mod tests {
    use crate::common::{
        CheckFactory, FixedSampler, HealthReportAssertions, RecordingHandler, quiet_monitor,
        quiet_monitor_with,
    };
    use async_trait::async_trait;
    use healthmon_rs::config::HealthMonitorConfig;
    use healthmon_rs::monitoring::health::components::{SYSTEM_DISK, evaluate_disk};
    use healthmon_rs::monitoring::metrics::ResourceUsage;
    use healthmon_rs::monitoring::{
        AlertSeverity, CheckFunction, CheckOutcome, CheckType, HealthCheck, HealthCheckResult,
        HealthMonitor, HealthStatus, OverallStatus,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    /// A probe implemented as a type rather than a closure
    struct QueueProbe {
        depth: u32,
    }

    #[async_trait]
    impl CheckFunction for QueueProbe {
        async fn run(&self) -> healthmon_rs::Result<CheckOutcome> {
            let result = if self.depth > 100 {
                HealthCheckResult::warning("queue", format!("Queue backlog: {}", self.depth))
            } else {
                HealthCheckResult::healthy("queue", format!("Queue depth: {}", self.depth))
            };
            Ok(result.with_detail("depth", self.depth).into())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_loop_raises_single_alert() {
        let monitor = quiet_monitor();
        let handler = Arc::new(RecordingHandler::default());
        monitor.add_alert_handler(handler.clone()).await;

        let calls = Arc::new(AtomicU32::new(0));
        monitor
            .add_health_check(CheckFactory::failing("api", calls.clone()).critical(true))
            .unwrap();

        monitor.start().await.unwrap();
        tokio::time::sleep(Duration::from_secs(90)).await;
        monitor.stop().await.unwrap();

        // three attempts per execution, streak past the default threshold of 3
        assert!(calls.load(Ordering::SeqCst) >= 9);
        assert!(monitor.consecutive_failures("api") >= 3);

        let alerts = handler.alerts();
        assert_eq!(alerts.len(), 1, "cooldown allows one alert per 300s");
        assert_eq!(alerts[0].check_name, "api");
        assert_eq!(alerts[0].severity(), AlertSeverity::Critical);
        assert_eq!(
            alerts[0].message,
            "Check failed after 3 attempts: connection refused"
        );

        let report = monitor.get_health_report();
        report.assert_overall(OverallStatus::Critical);
        report.assert_check_status("api", HealthStatus::Critical);
        assert_eq!(monitor.alert_stats().total_alerts, 1);
    }

    #[tokio::test]
    async fn test_removed_check_leaves_no_trace() {
        let monitor = quiet_monitor();
        monitor.add_health_check(CheckFactory::healthy("cpu")).unwrap();
        monitor.add_health_check(CheckFactory::healthy("db")).unwrap();
        monitor.tick(Instant::now()).await;

        assert!(monitor.remove_health_check("cpu"));

        let report = monitor.get_health_report();
        report.assert_check_absent("cpu");
        report.assert_check_status("db", HealthStatus::Healthy);
        report.assert_overall(OverallStatus::Healthy);
        assert_eq!(report.overall_health.total_checks, 1);
    }

    #[tokio::test]
    async fn test_trait_object_check() {
        let monitor = quiet_monitor();
        monitor
            .add_health_check(
                HealthCheck::new("queue", CheckType::Service, QueueProbe { depth: 250 })
                    .with_interval(15),
            )
            .unwrap();

        monitor.tick(Instant::now()).await;

        let report = monitor.get_health_report();
        report.assert_overall(OverallStatus::Warning);
        assert_eq!(report.overall_health.warning_issues[0].check, "queue");
        assert_eq!(
            report.check_details["queue"].details.get("depth"),
            Some(&serde_json::json!(250))
        );
        assert_eq!(monitor.consecutive_failures("queue"), 1);
    }

    #[test]
    fn test_disk_usage_scenario() {
        let result = evaluate_disk(ResourceUsage {
            percent: 96.3,
            used_gb: 481.5,
            total_gb: 500.0,
        });
        assert_eq!(result.name, SYSTEM_DISK);
        assert_eq!(result.status, HealthStatus::Critical);
        assert!(result.message.contains("96.3%"));
        crate::assert_approx_eq!(
            result.details["disk_percent"].as_f64().unwrap(),
            96.3,
            1e-9
        );
    }

    #[tokio::test]
    async fn test_report_serializes_for_consumers() {
        let monitor = HealthMonitor::builder(HealthMonitorConfig::default())
            .without_default_checks()
            .with_metrics_sampler(Arc::new(FixedSampler { disk_percent: 96.3 }))
            .build()
            .unwrap();
        monitor
            .add_health_check(CheckFactory::scripted("api", vec![HealthStatus::Warning]))
            .unwrap();

        monitor.tick(Instant::now()).await;
        monitor.collect_system_metrics().await;

        let json = serde_json::to_value(monitor.get_health_report()).unwrap();
        assert_eq!(json["overall_health"]["status"], "warning");
        assert_eq!(json["overall_health"]["message"], "1 warnings detected");
        assert_eq!(
            json["overall_health"]["warning_issues"][0]["check"],
            "api"
        );
        assert_eq!(json["check_details"]["api"]["consecutive_failures"], 1);
        assert_eq!(json["system_summary"]["disk_percent"], 96.3);
        assert_eq!(json["system_metrics"]["process_count"], 12);
        assert_eq!(json["alerts_enabled"], true);
    }

    #[tokio::test]
    async fn test_concurrent_ticks_never_run_a_check_twice() {
        let config = HealthMonitorConfig {
            max_concurrent_checks: 4,
            ..Default::default()
        };
        let monitor = quiet_monitor_with(config);

        let running = Arc::new(AtomicU32::new(0));
        let overlaps = Arc::new(AtomicU32::new(0));
        let (r, o) = (running.clone(), overlaps.clone());
        monitor
            .add_health_check(HealthCheck::new("exclusive", CheckType::Custom, move || {
                let (running, overlaps) = (r.clone(), o.clone());
                async move {
                    if running.fetch_add(1, Ordering::SeqCst) > 0 {
                        overlaps.fetch_add(1, Ordering::SeqCst);
                    }
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, healthmon_rs::HealthError>(CheckOutcome::from(serde_json::json!(1)))
                }
            }))
            .unwrap();

        let now = Instant::now();
        let (a, b) = tokio::join!(monitor.tick(now), monitor.tick(now));

        assert_eq!(a.len() + b.len(), 1);
        assert_eq!(overlaps.load(Ordering::SeqCst), 0);
        assert_eq!(monitor.check_history("exclusive").len(), 1);
    }
}
