//! Scan result rendering.
//!
//! Produces the two console tables (WHOIS summary, certificate summary) and
//! the markdown alert lines pushed to the notification channel. Expired
//! entries and query failures get a red marker, expiring entries a warning
//! marker, healthy entries a plain one.

use crate::expiry::{self, ExpiryLevel};
use crate::grouping::Domain;

/// Alert line severity, mapped to a markdown marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    /// Healthy entry, plain quote marker.
    Plain,
    /// Expiring soon.
    Warning,
    /// Expired or failed to query.
    Critical,
}

/// Wraps one alert line in its severity marker.
///
/// Markers follow the CP-WeChat markdown dialect the notification channel
/// renders: quoted lines with `<font>` color tags.
pub fn mark(line: &str, severity: AlertSeverity) -> String {
    match severity {
        AlertSeverity::Critical => format!("> <font color=\"red\">{}</font>\n", line),
        AlertSeverity::Warning => format!("> <font color=\"warning\">{}</font>\n", line),
        AlertSeverity::Plain => format!("> {}\n", line),
    }
}

fn severity_for(level: ExpiryLevel) -> AlertSeverity {
    match level {
        ExpiryLevel::Expired => AlertSeverity::Critical,
        ExpiryLevel::Expiring => AlertSeverity::Warning,
        ExpiryLevel::Ok => AlertSeverity::Plain,
    }
}

/// Builds the WHOIS alert body: one marked line per registrable domain.
pub fn whois_alerts(domains: &[Domain]) -> String {
    let mut body = String::new();
    for domain in domains {
        let (text, severity) = match (&domain.whois, &domain.error) {
            (Some(record), _) => match record.registry_expiry_date {
                Some(expiry) => {
                    let c = expiry::classify(expiry);
                    (c.display, severity_for(c.level))
                }
                None => ("Query failed: no expiry date".to_string(), AlertSeverity::Critical),
            },
            (None, Some(error)) => (
                format!("Query failed: {}", error),
                AlertSeverity::Critical,
            ),
            (None, None) => ("Query failed: not resolved".to_string(), AlertSeverity::Critical),
        };
        body.push_str(&mark(
            &format!("{} **Whois ( {} )**", domain.name, text),
            severity,
        ));
    }
    body
}

/// Builds the certificate alert body: one marked line per input hostname.
pub fn certificate_alerts(domains: &[Domain]) -> String {
    let mut body = String::new();
    for domain in domains {
        for child in &domain.children {
            let (text, severity) = match (&child.certificate, &child.error) {
                (Some(cert), _) => {
                    let c = expiry::classify(cert.not_after);
                    (c.display, severity_for(c.level))
                }
                (None, Some(error)) => (
                    format!("Query failed: {}", error),
                    AlertSeverity::Critical,
                ),
                (None, None) => ("Query failed: not probed".to_string(), AlertSeverity::Critical),
            };
            body.push_str(&mark(
                &format!("{} **SSL ( {} )**", child.name, text),
                severity,
            ));
        }
    }
    body
}

/// Renders the WHOIS summary table.
///
/// Columns: index, domain, creation date, expiry date, days remaining,
/// error message.
pub fn whois_table(domains: &[Domain]) -> String {
    let headers = [
        "#",
        "Domain",
        "Whois Created",
        "Whois Expires",
        "Days Left",
        "Error",
    ];
    let rows: Vec<Vec<String>> = domains
        .iter()
        .enumerate()
        .map(|(index, domain)| match &domain.whois {
            Some(record) => {
                let days = record
                    .registry_expiry_date
                    .map(|expiry| expiry::classify(expiry).days_remaining.to_string())
                    .unwrap_or_else(|| "0".to_string());
                vec![
                    (index + 1).to_string(),
                    domain.name.clone(),
                    format_date(record.creation_date),
                    format_date(record.registry_expiry_date),
                    days,
                    String::new(),
                ]
            }
            None => vec![
                (index + 1).to_string(),
                domain.name.clone(),
                String::new(),
                String::new(),
                "0".to_string(),
                domain.error.clone().unwrap_or_default(),
            ],
        })
        .collect();
    render_table(&headers, &rows)
}

/// Renders the certificate summary table.
///
/// Columns: index, hostname, not-before, not-after, days remaining, error
/// message. The index runs across all hostnames, not per domain.
pub fn certificate_table(domains: &[Domain]) -> String {
    let headers = [
        "#",
        "Hostname",
        "SSL Not Before",
        "SSL Not After",
        "Days Left",
        "Error",
    ];
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut index = 0;
    for domain in domains {
        for child in &domain.children {
            index += 1;
            match &child.certificate {
                Some(cert) => rows.push(vec![
                    index.to_string(),
                    child.name.clone(),
                    cert.not_before.format("%Y-%m-%d").to_string(),
                    cert.not_after.format("%Y-%m-%d").to_string(),
                    expiry::classify(cert.not_after).days_remaining.to_string(),
                    String::new(),
                ]),
                None => rows.push(vec![
                    index.to_string(),
                    child.name.clone(),
                    String::new(),
                    String::new(),
                    "0".to_string(),
                    child.error.clone().unwrap_or_default(),
                ]),
            }
        }
    }
    render_table(&headers, &rows)
}

fn format_date(date: Option<chrono::DateTime<chrono::Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Minimal fixed-width ASCII table renderer.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let separator = {
        let mut s = String::from("+");
        for width in &widths {
            s.push_str(&"-".repeat(width + 2));
            s.push('+');
        }
        s.push('\n');
        s
    };

    let render_row = |cells: &[String]| {
        let mut s = String::from("|");
        for (i, cell) in cells.iter().enumerate() {
            s.push_str(&format!(" {:<width$} |", cell, width = widths[i]));
        }
        s.push('\n');
        s
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = String::new();
    out.push_str(&separator);
    out.push_str(&render_row(&header_cells));
    out.push_str(&separator);
    for row in rows {
        out.push_str(&render_row(row));
    }
    out.push_str(&separator);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::DomainChild;
    use crate::whois::WhoisRecord;
    use chrono::{Duration, Utc};

    fn domain_with_expiry(name: &str, days: i64) -> Domain {
        Domain {
            name: name.to_string(),
            children: vec![DomainChild {
                name: format!("www.{}", name),
                ..Default::default()
            }],
            whois: Some(WhoisRecord {
                domain_name: name.to_string(),
                // One hour of slack so whole-day truncation is stable while
                // the test runs
                registry_expiry_date: Some(Utc::now() + Duration::days(days) + Duration::hours(1)),
                ..Default::default()
            }),
            error: None,
        }
    }

    fn domain_with_error(name: &str, error: &str) -> Domain {
        Domain {
            name: name.to_string(),
            children: vec![DomainChild {
                name: name.to_string(),
                error: Some(error.to_string()),
                ..Default::default()
            }],
            whois: None,
            error: Some(error.to_string()),
        }
    }

    #[test]
    fn test_mark_severities() {
        assert_eq!(
            mark("x", AlertSeverity::Critical),
            "> <font color=\"red\">x</font>\n"
        );
        assert_eq!(
            mark("x", AlertSeverity::Warning),
            "> <font color=\"warning\">x</font>\n"
        );
        assert_eq!(mark("x", AlertSeverity::Plain), "> x\n");
    }

    #[test]
    fn test_whois_alerts_levels() {
        let domains = vec![
            domain_with_expiry("healthy.com", 100),
            domain_with_expiry("closing.com", 5),
            domain_with_expiry("gone.com", -10),
            domain_with_error("broken.com", "domain not found: broken.com"),
        ];
        let body = whois_alerts(&domains);
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("> healthy.com"));
        assert!(lines[1].contains("color=\"warning\""));
        assert!(lines[1].contains("Expiring: 5 Day"));
        assert!(lines[2].contains("color=\"red\""));
        assert!(lines[3].contains("Query failed: domain not found"));
        assert!(lines[3].contains("color=\"red\""));
    }

    #[test]
    fn test_certificate_alerts_per_child() {
        let mut domain = domain_with_expiry("example.com", 100);
        domain.children.push(DomainChild {
            name: "mail.example.com".to_string(),
            error: Some("domain not SSL".to_string()),
            ..Default::default()
        });
        let body = certificate_alerts(&[domain]);
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("www.example.com **SSL ( Query failed: not probed )**"));
        assert!(lines[1].contains("mail.example.com **SSL ( Query failed: domain not SSL )**"));
    }

    #[test]
    fn test_whois_table_contains_error_column() {
        let domains = vec![domain_with_error("broken.com", "domain error")];
        let table = whois_table(&domains);
        assert!(table.contains("broken.com"));
        assert!(table.contains("domain error"));
        assert!(table.contains("Days Left"));
    }

    #[test]
    fn test_table_rows_align() {
        let domains = vec![
            domain_with_expiry("example.com", 30),
            domain_with_expiry("a-much-longer-domain-name.com", 30),
        ];
        let table = whois_table(&domains);
        let widths: Vec<usize> = table.lines().map(|l| l.len()).collect();
        // Every rendered line has the same width
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
