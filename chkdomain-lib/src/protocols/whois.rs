//! WHOIS protocol implementation (RFC 3912).
//!
//! A query is one TCP exchange: connect to port 43, send the domain followed
//! by CRLF, then read until the server closes the connection. The response
//! is free text, so availability is decided by matching known phrasings.

use crate::error::ChkDomainError;
use crate::protocols::registry::{ServerResolver, WhoisServersNet};
use crate::utils::validate_domain;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

lazy_static! {
    /// Registrar phrasings that mean the domain is not registered.
    static ref AVAILABLE_RE: Regex =
        Regex::new(r"\b(is not registered|is available|no match for|not found)\b")
            .expect("availability pattern is valid");
}

/// Answer whether a WHOIS response says the domain is available.
///
/// Matching is case-insensitive and on whole words, so "notfound" or
/// "is availableness" do not count. Registrars using other wording are
/// reported as unavailable.
///
/// ```
/// use chkdomain_lib::is_available;
///
/// assert!(is_available("Domain Name: FOO.COM\nNo match for FOO.COM"));
/// assert!(!is_available("Domain Name: FOO.COM\nRegistrar: Example"));
/// ```
pub fn is_available(response: &str) -> bool {
    AVAILABLE_RE.is_match(&response.to_lowercase())
}

/// WHOIS client speaking plain TCP to the resolved server.
#[derive(Clone)]
pub struct WhoisClient {
    /// Picks the server address for each domain
    resolver: Arc<dyn ServerResolver>,
    /// Deadline for the whole connect/write/read exchange
    timeout: Option<Duration>,
}

impl WhoisClient {
    /// Create a client using `{tld}.whois-servers.net` and no timeout.
    pub fn new() -> Self {
        Self {
            resolver: Arc::new(WhoisServersNet),
            timeout: None,
        }
    }

    /// Create a client with a custom server resolver.
    pub fn with_resolver<R: ServerResolver + 'static>(resolver: R) -> Self {
        Self {
            resolver: Arc::new(resolver),
            timeout: None,
        }
    }

    /// Bound every query by `timeout` (or remove the bound with `None`).
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The address that would be queried for `domain`.
    pub fn server_for(&self, domain: &str) -> String {
        self.resolver.resolve(domain)
    }

    /// Run a WHOIS query for `domain` and return the full response text.
    ///
    /// # Errors
    ///
    /// - `InvalidDomain` if the name fails validation (no connection is made)
    /// - `ConnectionError` if the server cannot be reached
    /// - `WriteError` if the query cannot be sent
    /// - `IoError` if the response stream fails before end-of-stream
    /// - `Timeout` if a timeout is configured and expires
    pub async fn query(&self, domain: &str) -> crate::Result<String> {
        validate_domain(domain)?;
        let server = self.resolver.resolve(domain);

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, exchange(domain, &server))
                .await
                .map_err(|_| ChkDomainError::timeout(format!("WHOIS query to {}", server), limit))?,
            None => exchange(domain, &server).await,
        }
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

/// One request/response exchange. The stream is dropped, and so closed, on
/// every return path.
async fn exchange(domain: &str, server: &str) -> crate::Result<String> {
    tracing::debug!(domain, server, "connecting to WHOIS server");

    let mut stream = TcpStream::connect(server)
        .await
        .map_err(|e| ChkDomainError::connection(server, e))?;

    stream
        .write_all(format!("{}\r\n", domain).as_bytes())
        .await
        .map_err(|e| ChkDomainError::write(server, e))?;

    let mut response = Vec::with_capacity(4 * 1024);
    stream
        .read_to_end(&mut response)
        .await
        .map_err(|e| ChkDomainError::io(server, e))?;

    tracing::trace!(domain, server, bytes = response.len(), "WHOIS response received");

    Ok(String::from_utf8_lossy(&response).into_owned())
}
