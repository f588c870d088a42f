//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors raised while resolving or querying WHOIS data for a domain.
#[derive(Error, Debug)]
pub enum WhoisError {
    /// No entry in the suffix table matches the hostname.
    #[error("domain not found: {0}")]
    SuffixNotFound(String),

    /// TCP dial or write to the WHOIS server failed after all retries.
    #[error("WHOIS connection to {server} failed: {source}")]
    Connection {
        /// The WHOIS server that refused the session.
        server: String,
        /// Underlying socket error from the final attempt.
        #[source]
        source: std::io::Error,
    },

    /// A connect, write, or read attempt exceeded its deadline.
    #[error("WHOIS query to {0} timed out")]
    Timeout(String),

    /// Empty or single-line response; the text is the server's own message.
    #[error("{0}")]
    Protocol(String),

    /// The server kept answering with its query-interval throttle message.
    #[error("rate limited by {server} after {replays} replays")]
    RateLimited {
        /// The throttling WHOIS server.
        server: String,
        /// Number of delayed replays attempted before giving up.
        replays: usize,
    },

    /// A recognized date field carried a value neither dialect could parse.
    #[error("invalid {field} value: {value}")]
    InvalidDate {
        /// The field prefix that matched, e.g. `"Creation Date:"`.
        field: &'static str,
        /// The unparseable text.
        value: String,
    },

    /// Response parsed but the mandatory domain name field never appeared.
    #[error("domain error")]
    Parse,
}

/// Errors raised while probing a host's TLS certificate.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The input could not be split into a usable host and port.
    #[error("invalid host: {0}")]
    InvalidHost(String),

    /// TCP connection to the target failed or timed out.
    #[error("failed to connect to {0}")]
    Connection(String),

    /// TLS handshake failed or timed out.
    #[error("TLS handshake failed for {host}: {reason}")]
    Handshake {
        /// Host the handshake was attempted against.
        host: String,
        /// Handshake failure detail.
        reason: String,
    },

    /// The session completed but the peer presented no certificate chain.
    #[error("domain not SSL")]
    NoCertificate,

    /// The leaf certificate could not be decoded.
    #[error("certificate parse error: {0}")]
    Certificate(String),
}

/// Failure categories tracked across a scan pass.
///
/// Per-entity errors never abort the scan; they are counted here and logged
/// as a summary when the pass completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
#[allow(missing_docs)]
pub enum ErrorType {
    // WHOIS errors
    SuffixNotFound,
    WhoisConnectionError,
    WhoisTimeout,
    WhoisProtocolError,
    WhoisRateLimited,
    WhoisParseError,
    // Certificate probe errors
    TlsInvalidHost,
    TlsConnectionError,
    TlsHandshakeError,
    TlsNoCertificate,
    TlsCertificateError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable category name used in the scan summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::SuffixNotFound => "Suffix not found",
            ErrorType::WhoisConnectionError => "WHOIS connection error",
            ErrorType::WhoisTimeout => "WHOIS timeout",
            ErrorType::WhoisProtocolError => "WHOIS protocol error",
            ErrorType::WhoisRateLimited => "WHOIS rate limited",
            ErrorType::WhoisParseError => "WHOIS parse error",
            ErrorType::TlsInvalidHost => "Invalid TLS host",
            ErrorType::TlsConnectionError => "TLS connection error",
            ErrorType::TlsHandshakeError => "TLS handshake error",
            ErrorType::TlsNoCertificate => "No peer certificate",
            ErrorType::TlsCertificateError => "Certificate parse error",
        }
    }
}

impl From<&WhoisError> for ErrorType {
    fn from(e: &WhoisError) -> Self {
        match e {
            WhoisError::SuffixNotFound(_) => ErrorType::SuffixNotFound,
            WhoisError::Connection { .. } => ErrorType::WhoisConnectionError,
            WhoisError::Timeout(_) => ErrorType::WhoisTimeout,
            WhoisError::Protocol(_) => ErrorType::WhoisProtocolError,
            WhoisError::RateLimited { .. } => ErrorType::WhoisRateLimited,
            WhoisError::InvalidDate { .. } => ErrorType::WhoisParseError,
            WhoisError::Parse => ErrorType::WhoisParseError,
        }
    }
}

impl From<&ProbeError> for ErrorType {
    fn from(e: &ProbeError) -> Self {
        match e {
            ProbeError::InvalidHost(_) => ErrorType::TlsInvalidHost,
            ProbeError::Connection(_) => ErrorType::TlsConnectionError,
            ProbeError::Handshake { .. } => ErrorType::TlsHandshakeError,
            ProbeError::NoCertificate => ErrorType::TlsNoCertificate,
            ProbeError::Certificate(_) => ErrorType::TlsCertificateError,
        }
    }
}
