//! domain_health library: domain and certificate expiry monitoring
//!
//! This library checks the registration health of domains (via raw WHOIS
//! queries against each suffix's authoritative server) and the TLS
//! certificate health of hostnames, classifying both by time remaining
//! until expiry.
//!
//! # Example
//!
//! ```no_run
//! use domain_health::run_scan;
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = run_scan(Path::new("domains.txt")).await?;
//! println!(
//!     "Scanned {} domains in {:.1}s, {} failures",
//!     report.domains.len(),
//!     report.elapsed_seconds,
//!     report.stats.total()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call library functions within an async context.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod expiry;
pub mod grouping;
pub mod initialization;
mod notify;
mod report;
mod scan;
mod schedule;
pub mod suffix;
pub mod tls;
pub mod whois;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{ErrorType, InitializationError, ProbeError, ScanStats, WhoisError};
pub use scan::{run_scan, run_scan_cancellable, ScanReport};
pub use schedule::run_scheduled;
