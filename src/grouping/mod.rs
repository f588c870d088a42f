//! Domain grouping.
//!
//! Normalizes raw hostname lines and groups them under their registrable
//! parent domain, building the parent → children tree that one scan pass
//! walks. One `Domain` exists per unique registrable name; every input
//! hostname becomes a `DomainChild` owned by exactly one parent.

use anyhow::{anyhow, Result};

use crate::suffix;
use crate::tls::CertificateInfo;
use crate::whois::WhoisRecord;

/// A registrable domain and the hostnames scanned under it.
///
/// `whois` and `error` are mutually exclusive: a completed WHOIS resolution
/// fills exactly one of them. Lifetime is a single scan pass.
#[derive(Debug, Default)]
pub struct Domain {
    /// Registrable form, e.g. `"example.com"`.
    pub name: String,
    /// Original hostnames grouped under this domain, in first-seen order.
    pub children: Vec<DomainChild>,
    /// Parsed WHOIS record when resolution succeeded.
    pub whois: Option<WhoisRecord>,
    /// Failure text when resolution failed.
    pub error: Option<String>,
}

/// One input hostname, as given, with its certificate probe outcome.
#[derive(Debug, Default)]
pub struct DomainChild {
    /// Hostname exactly as it appeared in the input (lowercased).
    pub name: String,
    /// Leaf certificate when the probe succeeded.
    pub certificate: Option<CertificateInfo>,
    /// Failure text when the probe failed.
    pub error: Option<String>,
}

impl DomainChild {
    fn new(name: &str) -> Self {
        DomainChild {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

/// Groups raw input lines into registrable domains.
///
/// Each line is trimmed and lowercased; blank lines and `#` comments are
/// skipped. Hostnames whose suffix is not in the table are deliberately
/// excluded from the scan rather than failing it (logged at debug).
/// Domain and child ordering follows first-seen input order.
pub fn group(lines: &[&str]) -> Vec<Domain> {
    let mut domains: Vec<Domain> = Vec::new();

    for line in lines {
        let hostname = line.trim().to_lowercase();
        if hostname.is_empty() || hostname.starts_with('#') {
            continue;
        }

        if suffix::match_suffix(&hostname).is_none() {
            log::debug!("Skipping hostname with unrecognized suffix: {}", hostname);
            continue;
        }

        let base = suffix::registrable_form(&hostname);
        match domains.iter_mut().find(|d| d.name == base) {
            Some(domain) => domain.children.push(DomainChild::new(&hostname)),
            None => domains.push(Domain {
                name: base,
                children: vec![DomainChild::new(&hostname)],
                ..Default::default()
            }),
        }
    }

    domains
}

/// Parses a single hostname into its `Domain`.
///
/// Used by the one-shot `whois` subcommand. Errors when the line is a
/// comment, blank, or carries an unrecognized suffix.
pub fn parse_one(hostname: &str) -> Result<Domain> {
    group(&[hostname])
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("domain error"))
}
