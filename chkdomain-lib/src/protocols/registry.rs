//! WHOIS server resolution.
//!
//! Every TLD has a conventional alias under `whois-servers.net` that points
//! at the registry's WHOIS server, so no lookup table is needed.

use std::net::IpAddr;

/// Default WHOIS port (RFC 3912).
pub const WHOIS_PORT: u16 = 43;

/// Suffix of the conventional per-TLD WHOIS host names.
pub const WHOIS_SERVERS_SUFFIX: &str = "whois-servers.net";

/// Maps a domain to the `host:port` address that should answer for it.
pub trait ServerResolver: Send + Sync {
    fn resolve(&self, domain: &str) -> String;
}

/// Resolves through `{tld}.whois-servers.net:43`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhoisServersNet;

impl ServerResolver for WhoisServersNet {
    fn resolve(&self, domain: &str) -> String {
        resolve_server(domain)
    }
}

/// Sends every query to one fixed server.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedServer {
    address: String,
}

impl FixedServer {
    /// Accepts `host`, `host:port`, an IP literal or `[v6]:port`.
    pub fn new(server: &str) -> Self {
        Self {
            address: normalize_server_address(server),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl ServerResolver for FixedServer {
    fn resolve(&self, _domain: &str) -> String {
        self.address.clone()
    }
}

/// The suffix used to pick a WHOIS server for `domain`.
///
/// With more than two labels the last two are used (`example.co.uk` gives
/// `co.uk`). This also turns `www.example.com` into `example.com`; deeper
/// names are passed through as-is rather than guessed at.
pub fn effective_tld(domain: &str) -> String {
    let labels: Vec<&str> = domain.split('.').collect();
    let tld = labels[labels.len() - 1];

    if labels.len() > 2 {
        format!("{}.{}", labels[labels.len() - 2], tld)
    } else {
        tld.to_string()
    }
}

/// Get the WHOIS server (including port) for querying `domain`.
///
/// ```
/// use chkdomain_lib::resolve_server;
///
/// assert_eq!(resolve_server("google.com"), "com.whois-servers.net:43");
/// assert_eq!(resolve_server("example.co.uk"), "co.uk.whois-servers.net:43");
/// ```
pub fn resolve_server(domain: &str) -> String {
    format!(
        "{}.{}:{}",
        effective_tld(domain),
        WHOIS_SERVERS_SUFFIX,
        WHOIS_PORT
    )
}

fn normalize_server_address(server: &str) -> String {
    let server = server.trim();

    if let Ok(ip) = server.parse::<IpAddr>() {
        return match ip {
            IpAddr::V4(v4) => format!("{}:{}", v4, WHOIS_PORT),
            IpAddr::V6(v6) => format!("[{}]:{}", v6, WHOIS_PORT),
        };
    }

    match server.rsplit_once(':') {
        Some((_, port)) if port.parse::<u16>().is_ok() => server.to_string(),
        _ => format!("{}:{}", server, WHOIS_PORT),
    }
}
