//! Scan orchestration.
//!
//! One pass over an input file: group hostnames into registrable domains,
//! resolve WHOIS once per domain, probe the certificate of every hostname,
//! then render both summary tables. Failures are recorded on the affected
//! entity and counted; they never abort the pass.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::error_handling::{ErrorType, ScanStats};
use crate::grouping::{self, Domain};
use crate::report;
use crate::{tls, whois};

/// Outcome of one scan pass.
#[derive(Debug)]
pub struct ScanReport {
    /// Scanned domains with per-entity results attached.
    pub domains: Vec<Domain>,
    /// Failure counters by category.
    pub stats: ScanStats,
    /// Wall-clock duration of the pass.
    pub elapsed_seconds: f64,
}

impl ScanReport {
    /// WHOIS alert body for notification push.
    pub fn whois_alerts(&self) -> String {
        report::whois_alerts(&self.domains)
    }

    /// Certificate alert body for notification push.
    pub fn certificate_alerts(&self) -> String {
        report::certificate_alerts(&self.domains)
    }
}

/// Runs a full scan over the hostnames listed in `file` and prints the
/// summary tables.
///
/// The file holds one hostname per line; blank lines and `#` comments are
/// skipped. Errors only when the file itself cannot be read — individual
/// WHOIS or probe failures land on the entity and in the counters.
pub async fn run_scan(file: &Path) -> Result<ScanReport> {
    run_scan_cancellable(file, &CancellationToken::new()).await
}

/// Like [`run_scan`], but stops between entities once `cancel` fires.
///
/// A cancelled pass still renders tables for the entities it completed; it
/// never interrupts a WHOIS query or certificate probe mid-flight.
pub async fn run_scan_cancellable(
    file: &Path,
    cancel: &CancellationToken,
) -> Result<ScanReport> {
    let started = Instant::now();

    let contents = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read input file {}", file.display()))?;
    let lines: Vec<&str> = contents.lines().collect();
    let mut domains = grouping::group(&lines);
    let hostname_count: usize = domains.iter().map(|d| d.children.len()).sum();
    log::info!(
        "Scanning {} domains ({} hostnames) from {}",
        domains.len(),
        hostname_count,
        file.display()
    );

    let stats = ScanStats::new();
    for (i, domain) in domains.iter_mut().enumerate() {
        if cancel.is_cancelled() {
            log::info!("Scan cancelled after {} domains", i);
            break;
        }
        scan_domain(domain, &stats).await;
    }

    let elapsed_seconds = started.elapsed().as_secs_f64();
    println!("{}", report::whois_table(&domains));
    println!("{}", report::certificate_table(&domains));
    stats.log_summary();
    log::info!(
        "Scan finished in {:.1}s, {} failures",
        elapsed_seconds,
        stats.total()
    );

    Ok(ScanReport {
        domains,
        stats,
        elapsed_seconds,
    })
}

/// Resolves WHOIS for one domain and probes every hostname under it.
async fn scan_domain(domain: &mut Domain, stats: &ScanStats) {
    match whois::query(&domain.name).await {
        Ok(rows) => match whois::parse(&rows) {
            Ok(record) => domain.whois = Some(record),
            Err(e) => {
                log::warn!("WHOIS parse failed for {}: {}", domain.name, e);
                stats.increment(ErrorType::from(&e));
                domain.error = Some(e.to_string());
            }
        },
        Err(e) => {
            log::warn!("WHOIS query failed for {}: {}", domain.name, e);
            stats.increment(ErrorType::from(&e));
            domain.error = Some(e.to_string());
        }
    }

    for child in &mut domain.children {
        match tls::probe(&child.name).await {
            Ok(cert) => child.certificate = Some(cert),
            Err(e) => {
                log::warn!("Certificate probe failed for {}: {}", child.name, e);
                stats.increment(ErrorType::from(&e));
                child.error = Some(e.to_string());
            }
        }
    }
}
