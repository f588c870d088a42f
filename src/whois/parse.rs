//! WHOIS free-text parsing.
//!
//! Line-oriented: each line is trimmed and dispatched through an ordered
//! table of `(prefix, field)` pairs. Prefixes are case-sensitive and exact;
//! a line matching no prefix is ignored. Repeatable fields append, all
//! others overwrite.
//!
//! Registries speak two date dialects. gTLD-style responses
//! (`Creation Date:`, `Registry Expiry Date:`) use RFC3339; some ccTLD
//! registries (`Registration Time:`, `Expiration Time:`) use a
//! space-separated local format. Both normalize to UTC before storage so
//! downstream day arithmetic is zone-consistent.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error_handling::WhoisError;

use super::types::WhoisRecord;

#[derive(Debug, Clone, Copy)]
enum DateDialect {
    /// `2024-01-15T10:30:45Z`
    Rfc3339,
    /// `2024-01-15 10:30:45`
    SpaceSeparated,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    DomainName,
    RegistryDomainId,
    RegistrarUrl,
    UpdatedDate(DateDialect),
    CreationDate(DateDialect),
    RegistryExpiryDate(DateDialect),
    Registrar,
    RegistrarIanaId,
    RegistrarAbuseEmail,
    RegistrarAbusePhone,
    DomainStatus,
    NameServer,
    Dnssec,
}

/// Recognized field prefixes, checked in order; first match wins.
const FIELD_TABLE: &[(&str, Field)] = &[
    ("Domain Name:", Field::DomainName),
    ("Registry Domain ID:", Field::RegistryDomainId),
    ("Registrar URL:", Field::RegistrarUrl),
    ("Updated Date:", Field::UpdatedDate(DateDialect::Rfc3339)),
    ("Creation Date:", Field::CreationDate(DateDialect::Rfc3339)),
    (
        "Registration Time:",
        Field::CreationDate(DateDialect::SpaceSeparated),
    ),
    (
        "Registry Expiry Date:",
        Field::RegistryExpiryDate(DateDialect::Rfc3339),
    ),
    (
        "Expiration Time:",
        Field::RegistryExpiryDate(DateDialect::SpaceSeparated),
    ),
    ("Registrar:", Field::Registrar),
    ("Registrar IANA ID:", Field::RegistrarIanaId),
    ("Registrar Abuse Contact Email:", Field::RegistrarAbuseEmail),
    ("Registrar Abuse Contact Phone:", Field::RegistrarAbusePhone),
    ("Domain Status:", Field::DomainStatus),
    ("Name Server:", Field::NameServer),
    ("DNSSEC:", Field::Dnssec),
];

/// Parses WHOIS response lines into a structured record.
///
/// Fails with `WhoisError::Parse` ("domain error") when the mandatory
/// `Domain Name:` field never appears; this is the sole structural validity
/// check. Parsing is idempotent: the same lines always yield an equal
/// record.
pub fn parse(lines: &[String]) -> Result<WhoisRecord, WhoisError> {
    let mut record = WhoisRecord::default();

    for line in lines {
        let line = line.trim();
        let Some((prefix, field)) = FIELD_TABLE
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix))
        else {
            continue;
        };
        let value = line[prefix.len()..].trim();

        match field {
            Field::DomainName => record.domain_name = value.to_string(),
            Field::RegistryDomainId => record.registry_domain_id = value.to_string(),
            Field::RegistrarUrl => record.registrar_url = value.to_string(),
            Field::UpdatedDate(dialect) => {
                record.updated_date = Some(parse_date(prefix, value, *dialect)?)
            }
            Field::CreationDate(dialect) => {
                record.creation_date = Some(parse_date(prefix, value, *dialect)?)
            }
            Field::RegistryExpiryDate(dialect) => {
                record.registry_expiry_date = Some(parse_date(prefix, value, *dialect)?)
            }
            Field::Registrar => record.registrar = value.to_string(),
            Field::RegistrarIanaId => record.registrar_iana_id = value.to_string(),
            Field::RegistrarAbuseEmail => record.registrar_abuse_email = value.to_string(),
            Field::RegistrarAbusePhone => record.registrar_abuse_phone = value.to_string(),
            Field::DomainStatus => record.domain_status.push(value.to_string()),
            Field::NameServer => record.name_servers.push(value.to_string()),
            Field::Dnssec => record.dnssec = value.to_string(),
        }
    }

    if record.domain_name.is_empty() {
        return Err(WhoisError::Parse);
    }
    Ok(record)
}

fn parse_date(
    field: &'static str,
    value: &str,
    dialect: DateDialect,
) -> Result<DateTime<Utc>, WhoisError> {
    let parsed = match dialect {
        DateDialect::Rfc3339 => DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .ok(),
        DateDialect::SpaceSeparated => NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.and_utc())
            .ok(),
    };
    parsed.ok_or_else(|| WhoisError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
