//! Error handling and scan statistics.
//!
//! This module provides:
//! - Typed error definitions for WHOIS and certificate probing
//! - Failure categorization for scan-level summaries
//! - Per-pass failure counters
//!
//! Per-domain and per-host errors are captured into the owning entity and
//! reported inline; only structural errors (unreadable input, scheduler
//! misconfiguration) are fatal to a run.

mod stats;
mod types;

// Re-export public API
pub use stats::ScanStats;
pub use types::{ErrorType, InitializationError, ProbeError, WhoisError};
