//! Core data types for domain availability checking.
//!
//! This module defines the outcome of a single lookup and the configuration
//! shared by the checker and the scheduler.

use crate::error::ChkDomainError;
use std::time::Duration;

/// Default cap on concurrently running lookups.
pub const DEFAULT_CONCURRENCY: usize = 32;

/// Upper bound accepted for the concurrency cap.
pub const MAX_CONCURRENCY: usize = 100;

/// Outcome of one domain's lookup.
///
/// Exactly one of these is produced per input domain. A `Failure` is an
/// ordinary outcome: it is reported like any other result and never stops
/// the rest of the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainResult {
    /// The WHOIS exchange completed and the response was classified
    Success {
        /// The domain name that was checked (e.g., "example.com")
        domain: String,
        /// Whether the response matched a "not registered" phrasing
        available: bool,
        /// The full WHOIS response body
        raw_output: String,
        /// How long the lookup took
        check_duration: Duration,
    },

    /// The lookup failed before a response could be classified
    Failure {
        domain: String,
        error: ChkDomainError,
    },
}

impl DomainResult {
    /// The domain this result belongs to.
    pub fn domain(&self) -> &str {
        match self {
            Self::Success { domain, .. } | Self::Failure { domain, .. } => domain,
        }
    }

    /// `Some(available)` for a classified lookup, `None` for a failure.
    pub fn available(&self) -> Option<bool> {
        match self {
            Self::Success { available, .. } => Some(*available),
            Self::Failure { .. } => None,
        }
    }

    /// The error for a failed lookup.
    pub fn error(&self) -> Option<&ChkDomainError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// Configuration options for domain checking operations.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    /// Maximum number of concurrent lookups.
    /// Default: 32, Range: 1-100. The pool actually started is
    /// `min(concurrency, domain count)`.
    pub concurrency: usize,

    /// Deadline for each individual WHOIS query.
    /// Default: none, a query waits for the server to close the connection.
    pub timeout: Option<Duration>,

    /// Fixed WHOIS server (`host` or `host:port`) used instead of the
    /// conventional `{tld}.whois-servers.net` lookup.
    pub server: Option<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: None,
            server: None,
        }
    }
}

impl CheckConfig {
    /// Set the concurrency cap, clamped to 1..=100.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_CONCURRENCY);
        self
    }

    /// Set a per-query timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Query a fixed WHOIS server for every domain.
    pub fn with_server<S: Into<String>>(mut self, server: S) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Number of workers to start for `domain_count` domains.
    pub fn worker_count(&self, domain_count: usize) -> usize {
        self.concurrency.clamp(1, MAX_CONCURRENCY).min(domain_count)
    }
}
