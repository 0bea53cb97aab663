//! Error handling for domain checking operations.
//!
//! Every variant except `ConfigError` and `InputError` describes the failure
//! of a single domain's lookup. Those are carried inside a `DomainResult`
//! and never abort a batch.

use std::time::Duration;
use thiserror::Error;

/// Main error type for domain checking operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChkDomainError {
    /// The domain failed syntax validation and never reached the network
    #[error("invalid domain: {domain}")]
    InvalidDomain { domain: String },

    /// TCP dial to the WHOIS server failed (DNS, refused, unreachable)
    #[error("error connecting to {server}: {message}")]
    ConnectionError { server: String, message: String },

    /// The query could not be sent after connecting
    #[error("error writing query to {server}: {message}")]
    WriteError { server: String, message: String },

    /// The response could not be read to a clean end-of-stream
    #[error("error reading response from {server}: {message}")]
    IoError { server: String, message: String },

    /// A configured per-query deadline expired
    #[error("timeout after {duration:?} during {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Invalid configuration file or value
    #[error("configuration error: {message}")]
    ConfigError { message: String },

    /// Reading the domain list or a configuration file failed
    #[error("error reading {source_name}: {message}")]
    InputError {
        source_name: String,
        message: String,
    },

    /// A lookup task failed unexpectedly
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ChkDomainError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>>(domain: D) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
        }
    }

    /// Create a new connection error for `server`.
    pub fn connection<S: Into<String>, M: ToString>(server: S, cause: M) -> Self {
        Self::ConnectionError {
            server: server.into(),
            message: cause.to_string(),
        }
    }

    /// Create a new write error for `server`.
    pub fn write<S: Into<String>, M: ToString>(server: S, cause: M) -> Self {
        Self::WriteError {
            server: server.into(),
            message: cause.to_string(),
        }
    }

    /// Create a new read error for `server`.
    pub fn io<S: Into<String>, M: ToString>(server: S, cause: M) -> Self {
        Self::IoError {
            server: server.into(),
            message: cause.to_string(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new input error.
    pub fn input<S: Into<String>, M: ToString>(source_name: S, cause: M) -> Self {
        Self::InputError {
            source_name: source_name.into(),
            message: cause.to_string(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the failure happened on the wire rather than during validation.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError { .. }
                | Self::WriteError { .. }
                | Self::IoError { .. }
                | Self::Timeout { .. }
        )
    }

    /// Whether this error belongs to one domain's lookup (as opposed to the
    /// whole invocation).
    pub fn is_per_domain(&self) -> bool {
        !matches!(self, Self::ConfigError { .. } | Self::InputError { .. })
    }
}

impl From<toml::de::Error> for ChkDomainError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("failed to parse TOML configuration: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ChkDomainError::invalid_domain("-foo.com").to_string(),
            "invalid domain: -foo.com"
        );
        assert_eq!(
            ChkDomainError::connection("com.whois-servers.net:43", "connection refused")
                .to_string(),
            "error connecting to com.whois-servers.net:43: connection refused"
        );
        assert_eq!(
            ChkDomainError::timeout("WHOIS query", Duration::from_secs(5)).to_string(),
            "timeout after 5s during WHOIS query"
        );
    }

    #[test]
    fn test_classification_helpers() {
        assert!(!ChkDomainError::invalid_domain("x").is_network());
        assert!(ChkDomainError::io("s:43", "reset").is_network());
        assert!(ChkDomainError::write("s:43", "broken pipe").is_network());
        assert!(ChkDomainError::timeout("q", Duration::from_secs(1)).is_network());

        assert!(ChkDomainError::invalid_domain("x").is_per_domain());
        assert!(!ChkDomainError::config("bad").is_per_domain());
        assert!(!ChkDomainError::input("stdin", "closed").is_per_domain());
    }
}
