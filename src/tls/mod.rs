//! TLS certificate probing.
//!
//! Connects to a host, completes a TLS handshake with the standard trust
//! roots, and extracts the leaf (end-entity) certificate from the peer
//! chain. Only `not_before`/`not_after` participate in classification; the
//! remaining fields are carried for display.
//!
//! Uses `tokio-rustls` for the connection and `x509-parser` for certificate
//! parsing.

mod extract;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use colored::*;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use crate::config::{TCP_CONNECT_TIMEOUT_SECS, TLS_DEFAULT_PORT, TLS_HANDSHAKE_TIMEOUT_SECS};
use crate::error_handling::ProbeError;

use extract::{extract_sans, key_algorithm, signature_algorithm};

/// Leaf-certificate fields extracted from a TLS session.
#[derive(Debug, Clone)]
pub struct CertificateInfo {
    /// Certificate subject distinguished name.
    pub subject: String,
    /// Issuer distinguished name.
    pub issuer: String,
    /// Serial number, colon-separated hex.
    pub serial: String,
    /// Validity start.
    pub not_before: DateTime<Utc>,
    /// Validity end; drives classification.
    pub not_after: DateTime<Utc>,
    /// DNS names from the Subject Alternative Name extension.
    pub subject_alternative_names: Vec<String>,
    /// Public key algorithm name.
    pub key_algorithm: String,
    /// Signature algorithm name.
    pub signature_algorithm: String,
}

impl CertificateInfo {
    /// Prints the certificate to the console, color-coding the expiry date
    /// by its classification. Used by the one-shot `ssl` subcommand.
    pub fn print(&self) {
        println!("{}", format!("Subject: {}", self.subject).bold());
        println!("{}", format!("Issuer: {}", self.issuer).bold());
        println!("Serial Number: {}", self.serial);
        println!(
            "{}",
            format!("Not Before: {}", self.not_before.format("%Y-%m-%d %H:%M:%S")).blue()
        );

        let classification = crate::expiry::classify(self.not_after);
        let line = format!(
            "Not After: {} ( {} )",
            self.not_after.format("%Y-%m-%d %H:%M:%S"),
            classification.display
        );
        let colored_line = match classification.level {
            crate::expiry::ExpiryLevel::Expired => line.red(),
            crate::expiry::ExpiryLevel::Expiring => line.yellow(),
            crate::expiry::ExpiryLevel::Ok => line.green(),
        };
        println!("{}", colored_line);

        println!("Signature Algorithm: {}", self.signature_algorithm);
        println!("Public Key Algorithm: {}", self.key_algorithm);
        println!("Subject Alternative Names:");
        for san in &self.subject_alternative_names {
            println!(" - {}", san);
        }
    }
}

/// Retrieves the leaf certificate presented by `host`.
///
/// `host` may carry an explicit port (`"example.com:8443"`); port 443 is
/// assumed otherwise. The connection is dropped after extraction whether or
/// not it succeeds.
///
/// # Errors
///
/// - `InvalidHost` when the input cannot be split into host and port
/// - `Connection` on TCP dial failure or timeout
/// - `Handshake` on TLS negotiation failure or timeout
/// - `NoCertificate` ("domain not SSL") when the peer presents no chain
pub async fn probe(host: &str) -> Result<CertificateInfo, ProbeError> {
    let (hostname, port) = split_host_port(host)?;
    log::debug!("Probing certificate for {}:{}", hostname, port);

    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let server_name = ServerName::try_from(hostname.clone())
        .map_err(|_| ProbeError::InvalidHost(host.to_string()))?;

    let sock = match timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((hostname.as_str(), port)),
    )
    .await
    {
        Ok(Ok(sock)) => sock,
        Ok(Err(e)) => {
            log::warn!("Failed to connect to {}:{} - {}", hostname, port, e);
            return Err(ProbeError::Connection(format!("{}:{}", hostname, port)));
        }
        Err(_) => {
            return Err(ProbeError::Connection(format!(
                "{}:{} (timed out)",
                hostname, port
            )))
        }
    };

    let connector = TlsConnector::from(Arc::new(config));
    let tls_stream = match timeout(
        Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, sock),
    )
    .await
    {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            return Err(ProbeError::Handshake {
                host: hostname,
                reason: e.to_string(),
            })
        }
        Err(_) => {
            return Err(ProbeError::Handshake {
                host: hostname,
                reason: "handshake timed out".to_string(),
            })
        }
    };

    let (_, session) = tls_stream.get_ref();
    let certs = session
        .peer_certificates()
        .filter(|chain| !chain.is_empty())
        .ok_or(ProbeError::NoCertificate)?;

    // First chain entry is the end-entity certificate
    let (_, cert) = x509_parser::parse_x509_certificate(certs[0].as_ref())
        .map_err(|e| ProbeError::Certificate(e.to_string()))?;
    let tbs_cert = &cert.tbs_certificate;

    let not_before = asn1_to_utc(&tbs_cert.validity.not_before)?;
    let not_after = asn1_to_utc(&tbs_cert.validity.not_after)?;

    let info = CertificateInfo {
        subject: tbs_cert.subject.to_string(),
        issuer: tbs_cert.issuer.to_string(),
        serial: cert.raw_serial_as_string(),
        not_before,
        not_after,
        subject_alternative_names: extract_sans(&cert),
        key_algorithm: key_algorithm(&cert),
        signature_algorithm: signature_algorithm(&cert),
    };

    log::debug!(
        "Certificate for {} expires {}",
        hostname,
        info.not_after.format("%Y-%m-%d")
    );
    Ok(info)
}

/// Splits `"host"` or `"host:port"` into its parts, defaulting to 443.
fn split_host_port(host: &str) -> Result<(String, u16), ProbeError> {
    let parsed = url::Url::parse(&format!("probe://{}", host))
        .map_err(|_| ProbeError::InvalidHost(host.to_string()))?;
    let hostname = parsed
        .host_str()
        .ok_or_else(|| ProbeError::InvalidHost(host.to_string()))?
        .to_string();
    Ok((hostname, parsed.port().unwrap_or(TLS_DEFAULT_PORT)))
}

fn asn1_to_utc(time: &x509_parser::time::ASN1Time) -> Result<DateTime<Utc>, ProbeError> {
    let rfc2822 = time
        .to_rfc2822()
        .map_err(|e| ProbeError::Certificate(format!("validity conversion error: {}", e)))?;
    let naive = NaiveDateTime::parse_from_str(&rfc2822, "%a, %d %b %Y %H:%M:%S %z")
        .map_err(|_| ProbeError::Certificate("failed to parse validity date".to_string()))?;
    Ok(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_host_port_default() {
        let (host, port) = split_host_port("example.com").unwrap();
        assert_eq!(host, "example.com");
        assert_eq!(port, 443);
    }

    #[test]
    fn test_split_host_port_explicit() {
        let (host, port) = split_host_port("example.com:8443").unwrap();
        assert_eq!(host, "example.com");
        assert_eq!(port, 8443);
    }

    #[test]
    fn test_split_host_port_invalid() {
        assert!(split_host_port("").is_err());
        assert!(split_host_port("host:notaport").is_err());
    }
}
