//! Public-suffix resolution and WHOIS server lookup.
//!
//! A static table maps every recognized public suffix to the authoritative
//! WHOIS server for registrations under it. The table is immutable,
//! process-wide, read-only shared data; it is consulted through free
//! functions and needs no synchronization.
//!
//! Compound suffixes (`.gov.uk`, `.com.au`, `.uk.com`) overlap with their
//! plain-TLD counterparts, so every lookup walks the whole table and the
//! longest matching suffix wins. First-found matching would make grouping
//! ambiguous for any hostname under a compound suffix.

use crate::error_handling::WhoisError;

/// One row of the static suffix table.
#[derive(Debug, Clone, Copy)]
pub struct SuffixEntry {
    /// Public suffix including its leading dot, e.g. `".co"` or `".gov.uk"`.
    pub suffix: &'static str,
    /// Authoritative WHOIS server for the suffix.
    pub whois_server: &'static str,
}

macro_rules! entry {
    ($suffix:literal, $server:literal) => {
        SuffixEntry {
            suffix: $suffix,
            whois_server: $server,
        }
    };
}

/// Suffix to WHOIS server mapping, initialized once at process start.
static SUFFIX_TABLE: &[SuffixEntry] = &[
    entry!(".br.com", "whois.centralnic.com"),
    entry!(".cn.com", "whois.internic.net"),
    entry!(".de.com", "whois.cnnic.cn"),
    entry!(".eu.com", "whois.nic.top"),
    entry!(".gb.com", "whois.nic.org"),
    entry!(".gb.net", "whois.centralnic.com"),
    entry!(".hu.com", "whois.centralnic.com"),
    entry!(".no.com", "whois.centralnic.com"),
    entry!(".qc.com", "whois.centralnic.com"),
    entry!(".ru.com", "whois.centralnic.com"),
    entry!(".sa.com", "whois.centralnic.com"),
    entry!(".se.com", "whois.centralnic.com"),
    entry!(".se.net", "whois.centralnic.com"),
    entry!(".uk.com", "whois.centralnic.com"),
    entry!(".uk.net", "whois.centralnic.com"),
    entry!(".us.com", "whois.centralnic.com"),
    entry!(".uy.com", "whois.centralnic.com"),
    entry!(".za.com", "whois.centralnic.com"),
    entry!(".com.au", "whois.ausregistry.net.au"),
    entry!(".net.au", "whois.ausregistry.net.au"),
    entry!(".org.au", "whois.ausregistry.net.au"),
    entry!(".asn.au", "whois.ausregistry.net.au"),
    entry!(".id.au", "whois.ausregistry.net.au"),
    entry!(".ac.uk", "whois.ja.net"),
    entry!(".gov.uk", "whois.ja.net"),
    entry!(".museum", "whois.nic.museum"),
    entry!(".asia", "whois.internic.net"),
    entry!(".info", "whois.afilias.net"),
    entry!(".name", "whois.nic.name"),
    entry!(".aero", "whois.aero"),
    entry!(".coop", "whois.nic.coop"),
    entry!(".com", "whois.internic.net"),
    entry!(".net", "whois.internic.net"),
    entry!(".org", "whois.publicinterestregistry.net"),
    entry!(".edu", "whois.educause.net"),
    entry!(".gov", "whois.nic.gov"),
    entry!(".int", "whois.iana.org"),
    entry!(".mil", "whois.nic.mil"),
    entry!(".biz", "whois.neulevel.biz"),
    entry!(".as", "whois.nic.as"),
    entry!(".ac", "whois.nic.ac"),
    entry!(".al", "whois.ripe.net"),
    entry!(".am", "whois.amnic.net"),
    entry!(".at", "whois.nic.at"),
    entry!(".au", "whois.aunic.net"),
    entry!(".az", "whois.ripe.net"),
    entry!(".ba", "whois.ripe.net"),
    entry!(".be", "whois.dns.be"),
    entry!(".bg", "whois.ripe.net"),
    entry!(".br", "whois.nic.br"),
    entry!(".by", "whois.ripe.net"),
    entry!(".ca", "whois.cira.ca"),
    entry!(".cc", "whois.nic.cc"),
    entry!(".cd", "whois.nic.cd"),
    entry!(".ch", "whois.nic.ch"),
    entry!(".cl", "whois.nic.cl"),
    entry!(".cn", "whois.cnnic.cn"),
    entry!(".cx", "whois.nic.cx"),
    entry!(".cy", "whois.ripe.net"),
    entry!(".cz", "whois.ripe.net"),
    entry!(".de", "whois.denic.de"),
    entry!(".dk", "whois.dk-hostmaster.dk"),
    entry!(".dz", "whois.ripe.net"),
    entry!(".ee", "whois.eenet.ee"),
    entry!(".eg", "whois.ripe.net"),
    entry!(".es", "whois.ripe.net"),
    entry!(".eu", "whois.eu"),
    entry!(".fi", "whois.ripe.net"),
    entry!(".fo", "whois.ripe.net"),
    entry!(".fr", "whois.nic.fr"),
    entry!(".gb", "whois.ripe.net"),
    entry!(".ge", "whois.ripe.net"),
    entry!(".gr", "whois.ripe.net"),
    entry!(".gs", "whois.nic.gs"),
    entry!(".hk", "whois.hkirc.hk"),
    entry!(".hr", "whois.ripe.net"),
    entry!(".hu", "whois.ripe.net"),
    entry!(".ie", "whois.domainregistry.ie"),
    entry!(".il", "whois.isoc.org.il"),
    entry!(".in", "whois.inregistry.net"),
    entry!(".ir", "whois.nic.ir"),
    entry!(".is", "whois.ripe.net"),
    entry!(".it", "whois.nic.it"),
    entry!(".jp", "whois.jp"),
    entry!(".kh", "whois.nic.net.kh"),
    entry!(".kr", "whois.kr"),
    entry!(".li", "whois.nic.ch"),
    entry!(".lt", "whois.ripe.net"),
    entry!(".lu", "whois.dns.lu"),
    entry!(".lv", "whois.ripe.net"),
    entry!(".ma", "whois.ripe.net"),
    entry!(".md", "whois.ripe.net"),
    entry!(".mk", "whois.ripe.net"),
    entry!(".ms", "whois.nic.ms"),
    entry!(".mt", "whois.ripe.net"),
    entry!(".mx", "whois.nic.mx"),
    entry!(".nl", "whois.domain-registry.nl"),
    entry!(".no", "whois.norid.no"),
    entry!(".nu", "whois.nic.nu"),
    entry!(".nz", "whois.srs.net.nz"),
    entry!(".pl", "whois.dns.pl"),
    entry!(".pt", "whois.ripe.net"),
    entry!(".ro", "whois.ripe.net"),
    entry!(".ru", "whois.tcinet.ru"),
    entry!(".se", "whois.nic-se.se"),
    entry!(".sg", "whois.nic.net.sg"),
    entry!(".si", "whois.ripe.net"),
    entry!(".sh", "whois.nic.sh"),
    entry!(".sk", "whois.ripe.net"),
    entry!(".sm", "whois.ripe.net"),
    entry!(".su", "whois.ripn.net"),
    entry!(".tc", "whois.nic.tc"),
    entry!(".tf", "whois.nic.tf"),
    entry!(".th", "whois.thnic.net"),
    entry!(".tj", "whois.nic.tj"),
    entry!(".tn", "whois.ripe.net"),
    entry!(".to", "whois.tonic.to"),
    entry!(".tr", "whois.ripe.net"),
    entry!(".tv", "tvwhois.verisign-grs.com"),
    entry!(".tw", "whois.twnic.net"),
    entry!(".ua", "whois.ripe.net"),
    entry!(".uk", "whois.nic.uk"),
    entry!(".us", "whois.nic.us"),
    entry!(".va", "whois.ripe.net"),
    entry!(".vg", "whois.nic.vg"),
    entry!(".ws", "whois.website.ws"),
    entry!(".vip", "whois.nic.vip"),
    entry!(".co", "whois.nic.co"),
    entry!(".top", "whois.nic.top"),
];

/// Returns the longest suffix in the table matching `hostname`.
///
/// Matching is case-insensitive. Returns `None` when no entry matches;
/// callers decide whether that is a silent drop (grouping) or an error
/// (direct WHOIS lookup).
pub fn match_suffix(hostname: &str) -> Option<&'static str> {
    let hostname = hostname.to_ascii_lowercase();
    SUFFIX_TABLE
        .iter()
        .filter(|entry| hostname.ends_with(entry.suffix))
        .map(|entry| entry.suffix)
        .max_by_key(|suffix| suffix.len())
}

/// Returns the authoritative WHOIS server for `hostname`.
///
/// Uses the same longest-match rule as [`match_suffix`].
pub fn whois_server(hostname: &str) -> Result<&'static str, WhoisError> {
    let hostname_lower = hostname.to_ascii_lowercase();
    SUFFIX_TABLE
        .iter()
        .filter(|entry| hostname_lower.ends_with(entry.suffix))
        .max_by_key(|entry| entry.suffix.len())
        .map(|entry| entry.whois_server)
        .ok_or_else(|| WhoisError::SuffixNotFound(hostname.to_string()))
}

/// Reduces `hostname` to its registrable (eTLD+1) form.
///
/// Strips the matched suffix, splits the remainder on `.`, and reattaches
/// the suffix to the last remaining label: `"a.b.example.com"` becomes
/// `"example.com"`. When no suffix matches, falls back to the last two
/// dot-separated labels; single-label input is returned unchanged.
pub fn registrable_form(hostname: &str) -> String {
    if let Some(suffix) = match_suffix(hostname) {
        let prefix = &hostname[..hostname.len() - suffix.len()];
        let last_label = prefix.rsplit('.').next().unwrap_or(prefix);
        return format!("{}{}", last_label, suffix);
    }
    let labels: Vec<&str> = hostname.split('.').collect();
    if labels.len() < 2 {
        return hostname.to_string();
    }
    format!("{}.{}", labels[labels.len() - 2], labels[labels.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_suffix_simple() {
        assert_eq!(match_suffix("example.com"), Some(".com"));
        assert_eq!(match_suffix("a.b.example.org"), Some(".org"));
    }

    #[test]
    fn test_match_suffix_longest_wins() {
        // ".gov.uk" and ".uk" both match; the compound suffix must win
        assert_eq!(match_suffix("example.gov.uk"), Some(".gov.uk"));
        assert_eq!(match_suffix("example.uk"), Some(".uk"));
        // ".uk.com" overlaps ".com"
        assert_eq!(match_suffix("example.uk.com"), Some(".uk.com"));
        assert_eq!(match_suffix("example.com.au"), Some(".com.au"));
    }

    #[test]
    fn test_match_suffix_case_insensitive() {
        assert_eq!(match_suffix("Example.COM"), Some(".com"));
        assert_eq!(match_suffix("WWW.EXAMPLE.GOV.UK"), Some(".gov.uk"));
    }

    #[test]
    fn test_match_suffix_unrecognized() {
        assert_eq!(match_suffix("example.invalid"), None);
        assert_eq!(match_suffix("localhost"), None);
    }

    #[test]
    fn test_whois_server_lookup() {
        assert_eq!(whois_server("example.com").unwrap(), "whois.internic.net");
        assert_eq!(whois_server("example.gov.uk").unwrap(), "whois.ja.net");
        // compound suffix resolves to its own server, not the ".com" one
        assert_eq!(
            whois_server("example.uk.com").unwrap(),
            "whois.centralnic.com"
        );
    }

    #[test]
    fn test_whois_server_not_found() {
        let err = whois_server("example.invalid").unwrap_err();
        assert!(matches!(
            err,
            crate::error_handling::WhoisError::SuffixNotFound(_)
        ));
    }

    #[test]
    fn test_registrable_form_strips_subdomains() {
        assert_eq!(registrable_form("a.b.example.com"), "example.com");
        assert_eq!(registrable_form("www.example.org"), "example.org");
        assert_eq!(registrable_form("example.com"), "example.com");
    }

    #[test]
    fn test_registrable_form_compound_suffix() {
        assert_eq!(registrable_form("x.example.gov.uk"), "example.gov.uk");
        assert_eq!(registrable_form("deep.sub.example.com.au"), "example.com.au");
    }

    #[test]
    fn test_registrable_form_fallback() {
        // No table match: last two labels heuristic
        assert_eq!(registrable_form("www.example.invalid"), "example.invalid");
        assert_eq!(registrable_form("localhost"), "localhost");
    }
}
