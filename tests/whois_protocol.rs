//! Integration tests for the WHOIS client against a mock server.
//!
//! These tests bind a local TCP listener and speak the WHOIS wire protocol
//! back to the client. No real registry is contacted, so they are fast and
//! deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use domain_health::whois;

const FULL_RESPONSE: &str = "Domain Name: EXAMPLE.COM\r\n\
Registry Domain ID: 2336799_DOMAIN_COM-VRSN\r\n\
Creation Date: 1995-08-14T04:00:00Z\r\n\
Registry Expiry Date: 2027-08-13T04:00:00Z\r\n\
Registrar: RESERVED-Internet Assigned Numbers Authority\r\n\
Name Server: A.IANA-SERVERS.NET\r\n\
>>> Last update of whois database: 2024-01-01T00:00:00Z <<<\r\n\
For more information on Whois status codes, please visit https://icann.org/epp\r\n";

const THROTTLE_RESPONSE: &str = "Queried interval is too short.\r\n";

/// Serves canned WHOIS responses, one connection per element of `responses`
/// (the last element repeats). Returns the bound port and a counter of
/// queries received.
async fn spawn_mock_server(responses: Vec<&'static str>) -> (u16, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let port = listener.local_addr().expect("local addr").port();
    let queries = Arc::new(AtomicUsize::new(0));

    let counter = queries.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let n = counter.fetch_add(1, Ordering::SeqCst);
            let response = *responses.get(n).or(responses.last()).expect("responses");

            let mut reader = BufReader::new(stream);
            let mut query = String::new();
            reader.read_line(&mut query).await.expect("read query");
            assert!(query.ends_with("\r\n"), "query must be CRLF-terminated");

            let mut stream = reader.into_inner();
            stream
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            stream.shutdown().await.ok();
        }
    });

    (port, queries)
}

#[tokio::test]
async fn test_query_returns_rows_up_to_footer() {
    let (port, _) = spawn_mock_server(vec![FULL_RESPONSE]).await;

    let rows = whois::query_server("127.0.0.1", port, "example.com")
        .await
        .expect("query should succeed");

    assert_eq!(rows[0], "Domain Name: EXAMPLE.COM");
    // Footer line and the ICANN boilerplate after it are discarded
    assert!(!rows.iter().any(|r| r.starts_with(">>> ")));
    assert!(!rows.iter().any(|r| r.contains("icann.org")));
    assert_eq!(rows.last().expect("rows"), "Name Server: A.IANA-SERVERS.NET");
}

#[tokio::test]
async fn test_query_replays_after_throttle_message() {
    let (port, queries) = spawn_mock_server(vec![THROTTLE_RESPONSE, FULL_RESPONSE]).await;

    let rows = whois::query_server("127.0.0.1", port, "example.com")
        .await
        .expect("replay should succeed");

    assert_eq!(queries.load(Ordering::SeqCst), 2);
    assert_eq!(rows[0], "Domain Name: EXAMPLE.COM");
}

#[tokio::test]
async fn test_query_gives_up_on_persistent_throttle() {
    let (port, queries) = spawn_mock_server(vec![THROTTLE_RESPONSE]).await;

    let err = whois::query_server("127.0.0.1", port, "example.com")
        .await
        .expect_err("persistent throttling should fail");

    assert!(matches!(
        err,
        domain_health::WhoisError::RateLimited { replays: 5, .. }
    ));
    // Initial query plus five replays
    assert_eq!(queries.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_single_line_response_is_protocol_error() {
    let (port, _) = spawn_mock_server(vec!["No match for domain \"NOPE.EXAMPLE\".\r\n"]).await;

    let err = whois::query_server("127.0.0.1", port, "nope.example")
        .await
        .expect_err("single-line response should fail");

    match err {
        domain_health::WhoisError::Protocol(message) => {
            assert_eq!(message, "No match for domain \"NOPE.EXAMPLE\".");
        }
        other => panic!("expected protocol error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_query_response_parses_into_record() {
    let (port, _) = spawn_mock_server(vec![FULL_RESPONSE]).await;

    let rows = whois::query_server("127.0.0.1", port, "example.com")
        .await
        .expect("query should succeed");
    let record = whois::parse(&rows).expect("parse should succeed");

    assert_eq!(record.domain_name, "EXAMPLE.COM");
    assert_eq!(
        record
            .registry_expiry_date
            .expect("expiry date")
            .format("%Y-%m-%d")
            .to_string(),
        "2027-08-13"
    );
}
