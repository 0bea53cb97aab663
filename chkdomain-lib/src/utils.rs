//! Utility functions for domain validation and input handling.

use crate::error::ChkDomainError;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::BufRead;

lazy_static! {
    /// One or more dot-terminated labels (1-63 chars, alphanumerics and
    /// hyphens, no leading/trailing hyphen) followed by an alphabetic TLD.
    static ref DOMAIN_RE: Regex = Regex::new(
        r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$"
    )
    .expect("domain pattern is valid");
}

/// Answer whether `domain` is syntactically acceptable for a WHOIS query.
///
/// This rejects anything that could be mistaken for an option (`-foo.com`)
/// as well as whitespace, empty labels and names without a TLD.
///
/// ```
/// use chkdomain_lib::is_valid_domain;
///
/// assert!(is_valid_domain("google.com"));
/// assert!(!is_valid_domain("-foo.com"));
/// assert!(!is_valid_domain("no-tld"));
/// ```
pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_RE.is_match(domain)
}

/// Validate a domain name, returning `InvalidDomain` when it is rejected.
pub fn validate_domain(domain: &str) -> crate::Result<()> {
    if is_valid_domain(domain) {
        Ok(())
    } else {
        Err(ChkDomainError::invalid_domain(domain))
    }
}

/// Read whitespace-delimited domain tokens until end-of-stream.
///
/// Tokens may be separated by any mix of spaces, tabs and newlines; a final
/// line without a trailing newline is kept. Tokens are not validated here,
/// invalid ones become per-domain failures later.
pub fn read_domain_tokens<R: BufRead>(reader: R) -> crate::Result<Vec<String>> {
    let mut domains = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| ChkDomainError::input("stdin", e))?;
        domains.extend(line.split_whitespace().map(str::to_string));
    }

    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_valid_domains() {
        assert!(is_valid_domain("google.com"));
        assert!(is_valid_domain("uqbar.io"));
        assert!(is_valid_domain("example.co.uk"));
        assert!(is_valid_domain("my-site.org"));
        assert!(is_valid_domain("a1.b2.de"));
        assert!(is_valid_domain("x.com"));
    }

    #[test]
    fn test_invalid_domains() {
        assert!(!is_valid_domain("-foo.com"));
        assert!(!is_valid_domain("foo-.com"));
        assert!(!is_valid_domain("no-tld"));
        assert!(!is_valid_domain("foo..com"));
        assert!(!is_valid_domain(".com"));
        assert!(!is_valid_domain("foo.com."));
        assert!(!is_valid_domain("foo .com"));
        assert!(!is_valid_domain(" foo.com"));
        assert!(!is_valid_domain("foo.com\n"));
        assert!(!is_valid_domain("foo.c"));
        assert!(!is_valid_domain("foo.c0m"));
        assert!(!is_valid_domain("--help"));
        assert!(!is_valid_domain(""));
    }

    #[test]
    fn test_label_length_limit() {
        let ok = format!("{}.com", "a".repeat(63));
        let too_long = format!("{}.com", "a".repeat(64));
        assert!(is_valid_domain(&ok));
        assert!(!is_valid_domain(&too_long));
    }

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("example.com").is_ok());
        assert_eq!(
            validate_domain("-foo.com"),
            Err(ChkDomainError::invalid_domain("-foo.com"))
        );
    }

    #[test]
    fn test_read_domain_tokens() {
        let input = Cursor::new("a.com\nb.com  c.com\n");
        assert_eq!(
            read_domain_tokens(input).unwrap(),
            vec!["a.com", "b.com", "c.com"]
        );
    }

    #[test]
    fn test_read_domain_tokens_without_trailing_newline() {
        let input = Cursor::new("\n\ta.com\t\n\n  b.com");
        assert_eq!(read_domain_tokens(input).unwrap(), vec!["a.com", "b.com"]);
        assert!(read_domain_tokens(Cursor::new("")).unwrap().is_empty());
    }

    #[test]
    fn test_read_domain_tokens_rejects_non_utf8() {
        let input = Cursor::new(vec![0x61, 0xff, 0xfe, b'\n']);
        let err = read_domain_tokens(input).unwrap_err();
        assert!(matches!(err, ChkDomainError::InputError { .. }));
    }
}
