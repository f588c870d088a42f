//! WHOIS data structures.

use chrono::{DateTime, Utc};
use colored::*;

/// Structured WHOIS registration record.
///
/// All string fields default to empty; dates are `None` until parsed.
/// `domain_name` is the only field whose absence after parsing is a hard
/// failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhoisRecord {
    /// Registered domain name as reported by the registry.
    pub domain_name: String,
    /// Registry-assigned domain identifier.
    pub registry_domain_id: String,
    /// Registrar web address.
    pub registrar_url: String,
    /// Last record update.
    pub updated_date: Option<DateTime<Utc>>,
    /// Registration creation date.
    pub creation_date: Option<DateTime<Utc>>,
    /// Registration expiry date; drives classification.
    pub registry_expiry_date: Option<DateTime<Utc>>,
    /// Registrar name.
    pub registrar: String,
    /// Registrar IANA identifier.
    pub registrar_iana_id: String,
    /// Registrar abuse contact email.
    pub registrar_abuse_email: String,
    /// Registrar abuse contact phone.
    pub registrar_abuse_phone: String,
    /// EPP status codes, in response order.
    pub domain_status: Vec<String>,
    /// Delegated name servers, in response order.
    pub name_servers: Vec<String>,
    /// DNSSEC signing state.
    pub dnssec: String,
}

impl WhoisRecord {
    /// Prints the record to the console, color-coding the expiry date by
    /// its classification. Used by the one-shot `whois` subcommand.
    pub fn print(&self) {
        println!("{}", format!("DomainName: {}", self.domain_name).bold());
        println!("RegistryDomainID: {}", self.registry_domain_id);
        println!("RegistrarURL: {}", self.registrar_url);
        println!(
            "{}",
            format!("UpdatedDate: {}", format_date(self.updated_date)).blue()
        );
        println!(
            "{}",
            format!("CreationDate: {}", format_date(self.creation_date)).blue()
        );
        match self.registry_expiry_date {
            Some(expiry) => {
                let classification = crate::expiry::classify(expiry);
                let line = format!(
                    "RegistryExpiryDate: {} ( {} )",
                    expiry.format("%Y-%m-%d %H:%M"),
                    classification.display
                );
                let colored_line = match classification.level {
                    crate::expiry::ExpiryLevel::Expired => line.red(),
                    crate::expiry::ExpiryLevel::Expiring => line.yellow(),
                    crate::expiry::ExpiryLevel::Ok => line.green(),
                };
                println!("{}", colored_line);
            }
            None => println!("RegistryExpiryDate:"),
        }
        println!("Registrar: {}", self.registrar);
        println!("RegistrarIANAID: {}", self.registrar_iana_id);
        println!("RegistrarAbuseContactEmail: {}", self.registrar_abuse_email);
        println!("RegistrarAbuseContactPhone: {}", self.registrar_abuse_phone);
        println!("DomainStatus:");
        for status in &self.domain_status {
            println!("{}", format!(" - {}", status).blue());
        }
        println!("NameServer:");
        for ns in &self.name_servers {
            println!("{}", format!(" - {}", ns).blue());
        }
        println!("DNSSEC: {}", self.dnssec);
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
