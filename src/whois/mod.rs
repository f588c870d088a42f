//! Raw WHOIS protocol client (RFC 3912).
//!
//! Opens a TCP session to the suffix's authoritative server on port 43,
//! writes the domain query terminated by CRLF, and reads the newline-
//! delimited free-text response. Reading stops at the registry footer
//! marker (a line starting with `">>> "`); anything after it is legal
//! boilerplate, discarded rather than treated as an error.
//!
//! Transient failures retry on a fixed interval. A response of at most one
//! line is the server's own error text; when it signals query-interval
//! throttling, the whole query is replayed after a delay, bounded so a
//! persistently throttling server cannot spin the client forever.

mod parse;
mod types;

use std::io;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::Retry;

use crate::config::{
    RATE_LIMIT_MAX_REPLAYS, RATE_LIMIT_MESSAGE_PREFIX, RATE_LIMIT_REPLAY_DELAY,
    TCP_CONNECT_TIMEOUT_SECS, WHOIS_FOOTER_PREFIX, WHOIS_PORT, WHOIS_READ_RETRY_ATTEMPTS,
    WHOIS_READ_TIMEOUT_SECS, WHOIS_RETRY_ATTEMPTS, WHOIS_RETRY_DELAY_MS,
};
use crate::error_handling::WhoisError;
use crate::suffix;

// Re-export public API
pub use parse::parse;
pub use types::WhoisRecord;

/// Queries the authoritative WHOIS server for a registrable domain.
///
/// Resolves the server through the suffix table, then runs the full
/// query/replay cycle against it. Returns the response lines up to (and
/// excluding) the registry footer.
pub async fn query(domain: &str) -> Result<Vec<String>, WhoisError> {
    let server = suffix::whois_server(domain)?;
    query_server(server, WHOIS_PORT, domain).await
}

/// Runs the query/replay cycle against an explicit server and port.
///
/// A result of at most one line is a textual error from the server. The
/// known throttle message triggers a delayed replay of the entire query,
/// capped at [`RATE_LIMIT_MAX_REPLAYS`]; any other message surfaces as a
/// protocol error.
pub async fn query_server(
    server: &str,
    port: u16,
    domain: &str,
) -> Result<Vec<String>, WhoisError> {
    for _replay in 0..=RATE_LIMIT_MAX_REPLAYS {
        let rows = query_once(server, port, domain).await?;
        if rows.len() > 1 {
            return Ok(rows);
        }

        let message = rows.into_iter().next().unwrap_or_default();
        if message.starts_with(RATE_LIMIT_MESSAGE_PREFIX) {
            log::warn!(
                "WHOIS server {} throttled query for {}, replaying after {:?}",
                server,
                domain,
                RATE_LIMIT_REPLAY_DELAY
            );
            tokio::time::sleep(RATE_LIMIT_REPLAY_DELAY).await;
            continue;
        }
        return Err(WhoisError::Protocol(message));
    }

    Err(WhoisError::RateLimited {
        server: server.to_string(),
        replays: RATE_LIMIT_MAX_REPLAYS,
    })
}

/// One complete query: connect, send, read to footer or EOF.
async fn query_once(server: &str, port: u16, domain: &str) -> Result<Vec<String>, WhoisError> {
    let addr = format!("{}:{}", server, port);
    let connect_timeout = Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS);
    let read_timeout = Duration::from_secs(WHOIS_READ_TIMEOUT_SECS);

    let retry_strategy = FixedInterval::from_millis(WHOIS_RETRY_DELAY_MS).take(WHOIS_RETRY_ATTEMPTS);
    let mut stream = Retry::spawn(retry_strategy, || async {
        match timeout(connect_timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "connect attempt timed out",
            )),
        }
    })
    .await
    .map_err(|source| WhoisError::Connection {
        server: server.to_string(),
        source,
    })?;

    // ASCII domain name terminated by CRLF
    let payload = format!("{}\r\n", domain);
    let mut write_attempts = 0;
    loop {
        match timeout(connect_timeout, stream.write_all(payload.as_bytes())).await {
            Ok(Ok(())) => break,
            Ok(Err(e)) => {
                if write_attempts >= WHOIS_RETRY_ATTEMPTS {
                    return Err(WhoisError::Connection {
                        server: server.to_string(),
                        source: e,
                    });
                }
                write_attempts += 1;
                tokio::time::sleep(Duration::from_millis(WHOIS_RETRY_DELAY_MS)).await;
            }
            Err(_) => return Err(WhoisError::Timeout(server.to_string())),
        }
    }

    let mut reader = BufReader::new(stream);
    let mut rows: Vec<String> = Vec::new();
    for attempt in 0..=WHOIS_READ_RETRY_ATTEMPTS {
        match timeout(read_timeout, read_response(&mut reader, &mut rows)).await {
            Ok(Ok(())) => break,
            Ok(Err(e)) => {
                if attempt >= WHOIS_READ_RETRY_ATTEMPTS {
                    return Err(WhoisError::Connection {
                        server: server.to_string(),
                        source: e,
                    });
                }
                log::debug!("WHOIS read from {} failed ({}), retrying", server, e);
                tokio::time::sleep(Duration::from_millis(WHOIS_RETRY_DELAY_MS)).await;
            }
            Err(_) => {
                // Partial data at the deadline is still usable
                if !rows.is_empty() {
                    break;
                }
                return Err(WhoisError::Timeout(server.to_string()));
            }
        }
    }

    Ok(rows)
}

/// Appends response lines to `rows` until EOF or the registry footer.
///
/// Lines at and after the footer marker are discarded.
async fn read_response<R>(reader: &mut R, rows: &mut Vec<String>) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            return Ok(());
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.starts_with(WHOIS_FOOTER_PREFIX) {
            return Ok(());
        }
        rows.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_response_collects_lines() {
        let data = b"Domain Name: EXAMPLE.COM\r\nRegistrar: IANA\r\n" as &[u8];
        let mut reader = data;
        let mut rows = Vec::new();
        read_response(&mut reader, &mut rows).await.unwrap();
        assert_eq!(rows, vec!["Domain Name: EXAMPLE.COM", "Registrar: IANA"]);
    }

    #[tokio::test]
    async fn test_read_response_stops_at_footer() {
        let data = b"Domain Name: EXAMPLE.COM\r\n>>> Last update of whois database: 2024-01-01T00:00:00Z <<<\r\nName Server: SHOULD.NOT.APPEAR\r\n"
            as &[u8];
        let mut reader = data;
        let mut rows = Vec::new();
        read_response(&mut reader, &mut rows).await.unwrap();
        assert_eq!(rows, vec!["Domain Name: EXAMPLE.COM"]);
    }

    #[tokio::test]
    async fn test_read_response_keeps_blank_lines() {
        let data = b"Domain Name: EXAMPLE.COM\n\nRegistrar: IANA\n" as &[u8];
        let mut reader = data;
        let mut rows = Vec::new();
        read_response(&mut reader, &mut rows).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], "");
    }
}
