//! Scan statistics tracking.
//!
//! Counts per-entity failures by category so a completed pass can log a
//! summary without any failure having aborted the scan.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Thread-safe failure counters for one scan pass.
///
/// All categories are initialized to zero on creation. The scan itself is
/// sequential, but the tracker is shared behind `Arc` with the scheduler and
/// uses atomic counters so a parallel scan would need no changes here.
#[derive(Debug)]
pub struct ScanStats {
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl ScanStats {
    /// Creates a tracker with every category counter at zero.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }
        ScanStats { errors }
    }

    /// Increment the counter for an error category.
    pub fn increment(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "No counter for {:?}; ScanStats was not fully initialized",
                error
            );
        }
    }

    /// Count for a single category.
    pub fn count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total failures across all categories.
    pub fn total(&self) -> usize {
        self.errors
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }

    /// Logs one line per non-zero category, or nothing on a clean pass.
    pub fn log_summary(&self) {
        if self.total() == 0 {
            log::info!("Scan completed with no failures");
            return;
        }
        for error in ErrorType::iter() {
            let count = self.count(error);
            if count > 0 {
                log::warn!("{}: {}", error.as_str(), count);
            }
        }
    }
}

impl Default for ScanStats {
    fn default() -> Self {
        Self::new()
    }
}
