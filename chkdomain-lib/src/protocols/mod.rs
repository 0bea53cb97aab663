//! Protocol implementations for domain checking.
//!
//! This module contains the WHOIS client and the server resolution it
//! relies on.

/// WHOIS protocol implementation
pub mod whois;

/// WHOIS server resolution
pub mod registry;

pub use registry::{effective_tld, resolve_server, FixedServer, ServerResolver, WhoisServersNet};
pub use whois::{is_available, WhoisClient};
