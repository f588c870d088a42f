use super::*;

#[test]
fn test_group_basic() {
    let domains = group(&["a.example.com", "b.example.com", "other.org"]);
    assert_eq!(domains.len(), 2);
    assert_eq!(domains[0].name, "example.com");
    assert_eq!(domains[0].children.len(), 2);
    assert_eq!(domains[0].children[0].name, "a.example.com");
    assert_eq!(domains[0].children[1].name, "b.example.com");
    assert_eq!(domains[1].name, "other.org");
    assert_eq!(domains[1].children.len(), 1);
}

#[test]
fn test_group_skips_comments_and_blanks() {
    let domains = group(&["a.example.com", "#comment", "", "b.example.com", "other.org"]);
    assert_eq!(domains.len(), 2);
    assert_eq!(domains[0].name, "example.com");
    let children: Vec<&str> = domains[0]
        .children
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(children, vec!["a.example.com", "b.example.com"]);
    assert_eq!(domains[1].name, "other.org");
}

#[test]
fn test_group_normalizes_case_and_whitespace() {
    let domains = group(&["  WWW.Example.COM  "]);
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].name, "example.com");
    assert_eq!(domains[0].children[0].name, "www.example.com");
}

#[test]
fn test_group_drops_unrecognized_suffix() {
    // Unrecognized TLDs are excluded from the scan rather than failing it
    let domains = group(&["host.example.invalid", "example.com"]);
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].name, "example.com");
}

#[test]
fn test_group_no_duplicate_domains() {
    let domains = group(&["a.example.com", "example.com", "b.example.com"]);
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].children.len(), 3);
}

#[test]
fn test_group_compound_suffix_grouping() {
    // ".gov.uk" must not collapse into a ".uk" grouping
    let domains = group(&["a.example.gov.uk", "b.example.gov.uk", "c.other.uk"]);
    assert_eq!(domains.len(), 2);
    assert_eq!(domains[0].name, "example.gov.uk");
    assert_eq!(domains[0].children.len(), 2);
    assert_eq!(domains[1].name, "other.uk");
}

#[test]
fn test_group_children_nonempty_invariant() {
    let domains = group(&["x.example.com", "y.other.org", "z.example.com"]);
    for domain in &domains {
        assert!(!domain.children.is_empty());
        assert!(domain.whois.is_none());
        assert!(domain.error.is_none());
    }
}

#[test]
fn test_parse_one() {
    let domain = parse_one("www.example.com").unwrap();
    assert_eq!(domain.name, "example.com");
    assert_eq!(domain.children[0].name, "www.example.com");
}

#[test]
fn test_parse_one_rejects_unrecognized() {
    assert!(parse_one("nosuffix.invalid").is_err());
    assert!(parse_one("# just a comment").is_err());
}
