//! Certificate field extraction utilities.

use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::{GeneralName, ParsedExtension};

/// Extracts DNS names from the Subject Alternative Name extension.
///
/// Only DNS names are collected; other general-name types (IP addresses,
/// email addresses) are ignored.
pub(crate) fn extract_sans(cert: &X509Certificate<'_>) -> Vec<String> {
    let mut sans = Vec::new();
    for ext in cert.extensions() {
        if let ParsedExtension::SubjectAlternativeName(ref san) = ext.parsed_extension() {
            for general_name in &san.general_names {
                if let GeneralName::DNSName(dns_name) = general_name {
                    sans.push(dns_name.to_string());
                }
            }
        }
    }
    sans
}

/// Maps the subject public key algorithm OID to a familiar name.
pub(crate) fn key_algorithm(cert: &X509Certificate<'_>) -> String {
    let oid = cert
        .tbs_certificate
        .subject_pki
        .algorithm
        .algorithm
        .to_string();
    match oid.as_str() {
        "1.2.840.113549.1.1.1" => "RSA".to_string(),
        "1.2.840.10045.2.1" => "ECDSA".to_string(),
        "1.3.101.112" => "Ed25519".to_string(),
        "1.3.101.113" => "Ed448".to_string(),
        // Return the OID if unknown
        _ => oid,
    }
}

/// Maps the certificate signature algorithm OID to a familiar name.
pub(crate) fn signature_algorithm(cert: &X509Certificate<'_>) -> String {
    let oid = cert.signature_algorithm.algorithm.to_string();
    match oid.as_str() {
        "1.2.840.113549.1.1.11" => "SHA256-RSA".to_string(),
        "1.2.840.113549.1.1.12" => "SHA384-RSA".to_string(),
        "1.2.840.113549.1.1.13" => "SHA512-RSA".to_string(),
        "1.2.840.10045.4.3.2" => "ECDSA-SHA256".to_string(),
        "1.2.840.10045.4.3.3" => "ECDSA-SHA384".to_string(),
        "1.3.101.112" => "Ed25519".to_string(),
        _ => oid,
    }
}
