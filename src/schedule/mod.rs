//! Periodic scan scheduling.
//!
//! Runs the scan on a fixed interval and pushes the alert bodies to the
//! configured webhook after each pass. A failed pass (or push) is logged
//! and the loop keeps its cadence. Ctrl-C cancels between entities: an
//! in-flight pass finishes its current query, skips the rest, and the loop
//! exits without pushing a partial report.

use std::time::Duration;

use anyhow::{bail, Result};
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::{notify, scan};

/// Runs scans forever on `config.interval_secs`, pushing alerts after each.
///
/// The first scan fires immediately. Returns only when Ctrl-C is received
/// while waiting for the next tick.
pub async fn run_scheduled(config: &Config) -> Result<()> {
    if config.interval_secs == 0 {
        bail!("scan interval must be at least 1 second");
    }

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Received Ctrl-C, stopping after current pass");
            shutdown.cancel();
        }
    });

    let mut ticker = interval(Duration::from_secs(config.interval_secs));
    // A pass longer than the interval should not cause a burst of catch-up runs
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = token.cancelled() => {
                log::info!("Scheduler stopped");
                return Ok(());
            }
        }

        if let Err(e) = run_pass(config, &token).await {
            log::error!("Scheduled scan failed: {:#}", e);
        }
    }
}

/// One scheduled pass: scan, then push both alert bodies.
async fn run_pass(config: &Config, cancel: &CancellationToken) -> Result<()> {
    let scan_report = scan::run_scan_cancellable(&config.file, cancel).await?;
    if cancel.is_cancelled() {
        log::info!("Skipping notification push for cancelled pass");
        return Ok(());
    }

    let Some(webhook) = &config.webhook else {
        log::debug!("No webhook configured, skipping notification push");
        return Ok(());
    };

    notify::push(webhook, "Domain Whois Report", &scan_report.whois_alerts()).await?;
    notify::push(
        webhook,
        "Domain SSL Report",
        &scan_report.certificate_alerts(),
    )
    .await?;
    Ok(())
}
