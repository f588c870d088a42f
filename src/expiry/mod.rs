//! Expiry classification.
//!
//! One three-tier rule shared by WHOIS registry-expiry dates and certificate
//! not-after dates; both call sites go through [`classify`].

use chrono::{DateTime, Utc};

use crate::config::EXPIRING_THRESHOLD_DAYS;

/// Risk bucket derived from days-until-expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryLevel {
    /// More than the threshold remains.
    Ok,
    /// Less than the threshold remains.
    Expiring,
    /// Already past expiry.
    Expired,
}

/// Derived classification; recomputed from a timestamp and "now" on demand,
/// never persisted.
#[derive(Debug, Clone)]
pub struct ExpiryClassification {
    /// Whole days until expiry; negative once past.
    pub days_remaining: i64,
    /// Risk bucket.
    pub level: ExpiryLevel,
    /// Human-readable summary, e.g. `"Expiring: 3 Day"`.
    pub display: String,
}

/// Classifies `expiry` against the current time.
pub fn classify(expiry: DateTime<Utc>) -> ExpiryClassification {
    classify_at(expiry, Utc::now())
}

/// Classifies `expiry` against an explicit `now`.
///
/// Days remaining are computed as fractional hours divided by 24, cast
/// toward zero. An expiry 12 hours away therefore counts as 0 days and
/// classifies as Expiring, same as crossing a calendar day would.
pub fn classify_at(expiry: DateTime<Utc>, now: DateTime<Utc>) -> ExpiryClassification {
    let hours = (expiry - now).num_seconds() as f64 / 3600.0;
    let days_remaining = (hours / 24.0) as i64;

    let (level, display) = if days_remaining < 0 {
        (
            ExpiryLevel::Expired,
            format!("Expired: {} Day", days_remaining.abs()),
        )
    } else if days_remaining < EXPIRING_THRESHOLD_DAYS {
        (
            ExpiryLevel::Expiring,
            format!("Expiring: {} Day", days_remaining),
        )
    } else {
        (
            ExpiryLevel::Ok,
            format!("Remaining: {} Day", days_remaining),
        )
    };

    ExpiryClassification {
        days_remaining,
        level,
        display,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_classify_expired() {
        let now = Utc::now();
        let c = classify_at(now - Duration::days(10), now);
        assert_eq!(c.level, ExpiryLevel::Expired);
        assert!(c.days_remaining < 0);
        assert_eq!(c.display, "Expired: 10 Day");
    }

    #[test]
    fn test_classify_expiring() {
        let now = Utc::now();
        let c = classify_at(now + Duration::days(5), now);
        assert_eq!(c.level, ExpiryLevel::Expiring);
        assert_eq!(c.days_remaining, 5);
        assert_eq!(c.display, "Expiring: 5 Day");
    }

    #[test]
    fn test_classify_ok() {
        let now = Utc::now();
        let c = classify_at(now + Duration::days(100), now);
        assert_eq!(c.level, ExpiryLevel::Ok);
        assert_eq!(c.days_remaining, 100);
        assert_eq!(c.display, "Remaining: 100 Day");
    }

    #[test]
    fn test_classify_threshold_boundary() {
        let now = Utc::now();
        // Exactly 15 whole days is Ok; 14 is Expiring
        assert_eq!(
            classify_at(now + Duration::days(15), now).level,
            ExpiryLevel::Ok
        );
        assert_eq!(
            classify_at(now + Duration::days(14), now).level,
            ExpiryLevel::Expiring
        );
    }

    #[test]
    fn test_classify_fractional_day_truncates_toward_zero() {
        let now = Utc::now();
        // 12 hours out truncates to 0 days: still Expiring, not Expired
        let c = classify_at(now + Duration::hours(12), now);
        assert_eq!(c.days_remaining, 0);
        assert_eq!(c.level, ExpiryLevel::Expiring);

        // 12 hours past truncates to 0 as well, which is not negative,
        // so the entry reads as Expiring with 0 days left
        let c = classify_at(now - Duration::hours(12), now);
        assert_eq!(c.days_remaining, 0);
        assert_eq!(c.level, ExpiryLevel::Expiring);

        // A full day past goes negative
        let c = classify_at(now - Duration::hours(36), now);
        assert_eq!(c.days_remaining, -1);
        assert_eq!(c.level, ExpiryLevel::Expired);
    }
}
