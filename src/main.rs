//! healthmon - scheduled health checks with rate-limited alerting
//!
//! Runs the monitor in the foreground and prints a JSON health report periodically.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use healthmon_rs::Config;
use healthmon_rs::monitoring::{
    AlertSeverity, ConsoleAlertHandler, HealthMonitor, LogAlertHandler, WebhookAlertHandler,
};
use healthmon_rs::utils::{LogFormat, LoggingUtils};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "healthmon", version, about)]
struct Cli {
    /// YAML configuration file; HEALTHMON_* environment variables are used when absent
    #[arg(short, long, env = "HEALTHMON_CONFIG")]
    config: Option<PathBuf>,

    /// Seconds between printed health reports
    #[arg(long, default_value_t = 60)]
    report_interval: u64,

    /// Slack-compatible webhook receiving alerts
    #[arg(long, env = "HEALTHMON_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Also print alerts to stdout
    #[arg(long)]
    console_alerts: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    if let Err(e) = LoggingUtils::init_logger(format, &cli.log_level) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env()?,
    };

    let monitor = HealthMonitor::new(config.monitor)?;
    monitor.add_alert_handler(Arc::new(LogAlertHandler)).await;
    if cli.console_alerts {
        monitor.add_alert_handler(Arc::new(ConsoleAlertHandler)).await;
    }
    if let Some(url) = cli.webhook_url {
        let webhook = WebhookAlertHandler::new(url, None, AlertSeverity::Warning)?;
        monitor.add_alert_handler(Arc::new(webhook)).await;
    }

    let build = healthmon_rs::build_info();
    info!(
        git_hash = build.git_hash,
        rustc = build.rust_version,
        "{} {} starting with {} checks",
        healthmon_rs::NAME,
        build.version,
        monitor.check_names().len()
    );
    monitor.start().await?;

    let mut reports = tokio::time::interval(Duration::from_secs(cli.report_interval.max(1)));
    // the first tick fires immediately, before any check has run
    reports.tick().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            _ = reports.tick() => {
                let report = monitor.get_health_report();
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
    }

    monitor.stop().await?;
    Ok(())
}
