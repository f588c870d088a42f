//! Configuration constants.
//!
//! Timeouts, retry policy, and classification thresholds used throughout
//! the application.

use std::time::Duration;

/// WHOIS protocol port (RFC 3912).
pub const WHOIS_PORT: u16 = 43;

/// Default TLS port when the input hostname carries no explicit port.
pub const TLS_DEFAULT_PORT: u16 = 443;

// Network operation timeouts
/// TCP connection timeout per attempt in seconds.
/// The retry loops alone do not bound total wall-clock time, so every
/// individual connect/read attempt gets its own deadline.
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;
/// TLS handshake timeout in seconds
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 10;
/// WHOIS response read timeout per attempt in seconds
pub const WHOIS_READ_TIMEOUT_SECS: u64 = 10;

// Retry strategy
/// Fixed delay between WHOIS connect/write retries.
/// Fixed-duration rather than exponential: acceptable for this scan cadence.
pub const WHOIS_RETRY_DELAY_MS: u64 = 250;
/// Extra attempts after the first failed WHOIS connect or write.
pub const WHOIS_RETRY_ATTEMPTS: usize = 2;
/// Extra attempts after a failed WHOIS response read.
pub const WHOIS_READ_RETRY_ATTEMPTS: usize = 9;
/// Delay before replaying a rate-limited WHOIS query.
pub const RATE_LIMIT_REPLAY_DELAY: Duration = Duration::from_millis(500);
/// Maximum full-query replays on a rate-limit response.
/// The registry signal carries no attempt counter of its own; without a cap
/// a persistently throttling server would spin the client forever.
pub const RATE_LIMIT_MAX_REPLAYS: usize = 5;

/// Registry footer marker: lines from here on are legal boilerplate.
pub const WHOIS_FOOTER_PREFIX: &str = ">>> ";
/// Server message prefix signalling the query interval was too short.
pub const RATE_LIMIT_MESSAGE_PREFIX: &str = "Queried interval is too short";

// Expiry classification
/// Entries with fewer remaining days than this are flagged as expiring.
pub const EXPIRING_THRESHOLD_DAYS: i64 = 15;

// Notification
/// Webhook request timeout in seconds
pub const NOTIFY_TIMEOUT_SECS: u64 = 10;
/// Maximum markdown lines per webhook request; longer bodies are chunked.
pub const NOTIFY_CHUNK_LINES: usize = 60;
/// Pause between chunked webhook requests.
pub const NOTIFY_CHUNK_PAUSE: Duration = Duration::from_secs(1);
