//! Main domain checker implementation.
//!
//! `DomainChecker` runs the per-domain pipeline (validate, resolve, query,
//! classify) and hands batches to the concurrent scheduler.

use crate::concurrent::{ConcurrentProcessor, ResultStream};
use crate::protocols::{is_available, FixedServer, ServerResolver, WhoisClient, WhoisServersNet};
use crate::types::{CheckConfig, DomainResult};
use futures::StreamExt;
use std::time::Instant;

/// Main domain checker that coordinates availability checking operations.
///
/// # Example
///
/// ```rust,no_run
/// use chkdomain_lib::DomainChecker;
/// use futures::StreamExt;
///
/// #[tokio::main]
/// async fn main() {
///     let checker = DomainChecker::new();
///     let domains = vec!["uqbar.io".to_string(), "google.com".to_string()];
///
///     let mut results = checker.check_domains_stream(domains);
///     while let Some(result) = results.next().await {
///         println!("{}: {:?}", result.domain(), result.available());
///     }
/// }
/// ```
#[derive(Clone)]
pub struct DomainChecker {
    /// Configuration settings for this checker instance
    config: CheckConfig,
    /// WHOIS client shared by every lookup
    whois_client: WhoisClient,
}

impl DomainChecker {
    /// Create a new domain checker with default configuration.
    ///
    /// Default settings:
    /// - Concurrency: 32
    /// - Timeout: none
    /// - Server: `{tld}.whois-servers.net:43`
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a new domain checker with custom configuration.
    ///
    /// ```rust
    /// use chkdomain_lib::{CheckConfig, DomainChecker};
    /// use std::time::Duration;
    ///
    /// let config = CheckConfig::default()
    ///     .with_concurrency(16)
    ///     .with_timeout(Duration::from_secs(10));
    ///
    /// let checker = DomainChecker::with_config(config);
    /// assert_eq!(checker.config().concurrency, 16);
    /// ```
    pub fn with_config(config: CheckConfig) -> Self {
        let whois_client = match &config.server {
            Some(server) => WhoisClient::with_resolver(FixedServer::new(server)),
            None => WhoisClient::with_resolver(WhoisServersNet),
        }
        .timeout(config.timeout);

        Self {
            config,
            whois_client,
        }
    }

    /// Create a checker that resolves servers through `resolver`, ignoring
    /// `config.server`.
    pub fn with_resolver<R: ServerResolver + 'static>(config: CheckConfig, resolver: R) -> Self {
        let whois_client = WhoisClient::with_resolver(resolver).timeout(config.timeout);
        Self {
            config,
            whois_client,
        }
    }

    /// Check availability of a single domain.
    ///
    /// Never fails as a call: any error is returned as a
    /// `DomainResult::Failure` for this domain.
    pub async fn check_domain(&self, domain: &str) -> DomainResult {
        let start_time = Instant::now();

        match self.whois_client.query(domain).await {
            Ok(raw_output) => {
                let available = is_available(&raw_output);
                let check_duration = start_time.elapsed();
                tracing::debug!(
                    domain,
                    available,
                    duration_ms = check_duration.as_millis() as u64,
                    "domain check completed"
                );
                DomainResult::Success {
                    domain: domain.to_string(),
                    available,
                    raw_output,
                    check_duration,
                }
            }
            Err(error) => {
                tracing::debug!(domain, error = %error, "domain check failed");
                DomainResult::Failure {
                    domain: domain.to_string(),
                    error,
                }
            }
        }
    }

    /// Check domains concurrently, yielding results as they complete.
    ///
    /// The stream ends after exactly `domains.len()` results. Must be called
    /// from within a tokio runtime.
    pub fn check_domains_stream(&self, domains: Vec<String>) -> ResultStream {
        let checker = self.clone();
        ConcurrentProcessor::from_config(&self.config).run(domains, move |domain| {
            let checker = checker.clone();
            async move { checker.check_domain(&domain).await }
        })
    }

    /// Check domains concurrently and collect every result.
    ///
    /// Results are in completion order, not input order.
    pub async fn check_domains(&self, domains: &[String]) -> Vec<DomainResult> {
        self.check_domains_stream(domains.to_vec()).collect().await
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}

impl Default for DomainChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChkDomainError;

    #[test]
    fn test_invalid_domain_is_a_failure_result() {
        let checker = DomainChecker::with_config(CheckConfig::default().with_server("127.0.0.1:1"));
        let result = tokio_test::block_on(checker.check_domain("-foo.com"));

        assert_eq!(
            result,
            DomainResult::Failure {
                domain: "-foo.com".to_string(),
                error: ChkDomainError::invalid_domain("-foo.com"),
            }
        );
    }

    #[test]
    fn test_server_override_is_used() {
        let checker = DomainChecker::with_config(CheckConfig::default().with_server("localhost:4343"));
        assert_eq!(checker.whois_client.server_for("tlon.com"), "localhost:4343");

        let checker = DomainChecker::new();
        assert_eq!(checker.whois_client.server_for("tlon.com"), "com.whois-servers.net:43");
    }
}
