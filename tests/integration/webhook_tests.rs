//! Webhook alert handler tests against a mock HTTP server

#[cfg(test)]
mod tests {
    use crate::common::{CheckFactory, quiet_monitor};
    use healthmon_rs::monitoring::{
        AlertHandler, AlertSeverity, HealthStatus, WebhookAlertHandler,
    };
    use std::sync::Arc;
    use tokio::time::Instant;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn webhook_server(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hooks/health"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        server
    }

    fn handler(server: &MockServer, min_severity: AlertSeverity) -> WebhookAlertHandler {
        WebhookAlertHandler::new(
            format!("{}/hooks/health", server.uri()),
            Some("healthmon-test".to_string()),
            min_severity,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_alert_posted_as_slack_payload() {
        let server = webhook_server(200).await;
        let monitor = quiet_monitor();
        monitor
            .add_alert_handler(Arc::new(handler(&server, AlertSeverity::Warning)))
            .await;
        monitor
            .add_health_check(
                CheckFactory::scripted("payments", vec![HealthStatus::Critical])
                    .critical(true)
                    .with_alert_threshold(1),
            )
            .unwrap();

        monitor.tick(Instant::now()).await;

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);

        let body: serde_json::Value = requests[0].body_json().unwrap();
        assert_eq!(body["username"], "healthmon-test");
        assert_eq!(body["text"], "CRITICAL Health Alert: payments");
        assert_eq!(body["attachments"][0]["title"], "payments");
        assert_eq!(body["attachments"][0]["text"], "status critical");
        assert_eq!(monitor.alert_stats().failed_notifications, 0);
    }

    #[tokio::test]
    async fn test_server_error_counted_as_failed_notification() {
        let server = webhook_server(500).await;
        let monitor = quiet_monitor();
        monitor
            .add_alert_handler(Arc::new(handler(&server, AlertSeverity::Warning)))
            .await;
        monitor
            .add_health_check(
                CheckFactory::scripted("search", vec![HealthStatus::Warning])
                    .with_alert_threshold(1),
            )
            .unwrap();

        monitor.tick(Instant::now()).await;

        let stats = monitor.alert_stats();
        assert_eq!(stats.total_alerts, 1);
        assert_eq!(stats.failed_notifications, 1);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_direct_delivery_error_message() {
        let server = webhook_server(503).await;
        let webhook = handler(&server, AlertSeverity::Critical);

        let alert = healthmon_rs::monitoring::Alert {
            id: "a1".to_string(),
            check_name: "db".to_string(),
            status: HealthStatus::Critical,
            message: "down".to_string(),
            consecutive_failures: 3,
            is_critical_check: true,
            timestamp: chrono::Utc::now(),
            details: Default::default(),
        };

        let err = webhook.handle(&alert).await.unwrap_err();
        assert!(err.to_string().contains("503"));
        assert!(!webhook.supports_severity(AlertSeverity::Warning));
    }
}
