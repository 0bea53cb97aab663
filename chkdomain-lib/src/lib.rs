//! # chkdomain library
//!
//! Checks whether domain names are available by querying WHOIS servers over
//! TCP and classifying the free-text responses.
//!
//! The core is a fan-out/fan-in pipeline: one lookup job per domain, a
//! bounded pool of workers, and a completion-ordered stream that yields
//! exactly one `DomainResult` per input domain. A failing lookup (bad
//! syntax, unreachable server, broken read) becomes a `Failure` result for
//! that domain only.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chkdomain_lib::{CheckConfig, DomainChecker, DomainResult};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() {
//!     let checker = DomainChecker::with_config(CheckConfig::default().with_concurrency(16));
//!     let domains = vec!["tlon.com".to_string(), "uqbar.io".to_string()];
//!
//!     let mut results = checker.check_domains_stream(domains);
//!     while let Some(result) = results.next().await {
//!         match result {
//!             DomainResult::Success { domain, available: true, .. } => println!("{}", domain),
//!             DomainResult::Success { .. } => {}
//!             DomainResult::Failure { domain, error } => eprintln!("{}: {}", domain, error),
//!         }
//!     }
//! }
//! ```

pub use checker::DomainChecker;
pub use concurrent::{ConcurrentProcessor, ResultStream};
pub use config::{
    env_config_from, load_env_config, parse_timeout_string, ConfigManager, DefaultsConfig,
    EnvConfig, FileConfig,
};
pub use error::ChkDomainError;
pub use protocols::{
    effective_tld, is_available, resolve_server, FixedServer, ServerResolver, WhoisClient,
    WhoisServersNet,
};
pub use types::{CheckConfig, DomainResult, DEFAULT_CONCURRENCY, MAX_CONCURRENCY};
pub use utils::{is_valid_domain, read_domain_tokens, validate_domain};

// Internal modules - reached through the re-exports above
mod checker;
mod concurrent;
mod config;
mod error;
mod protocols;
mod types;
mod utils;

/// Type alias for convenience
pub type Result<T> = std::result::Result<T, ChkDomainError>;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
