//! # Probe Target Model
//!
//! Defines the normalized form of one input entry.
//!
//! Accepted inputs:
//! * A bare hostname or IP address (e.g., `example.com`, `10.0.0.1`).
//! * A `host:port` pair (e.g., `example.com:8443`, `[::1]:8080`).
//! * A full URL (e.g., `http://example.com/health`).
//!
//! Inputs without a scheme are treated exactly like the same input prefixed with `https://`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::{Host, Url};

const DEFAULT_SCHEME: &str = "https";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("empty target")]
    Empty,
    #[error("invalid target '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },
    #[error("target '{0}' has no host")]
    MissingHost(String),
}

/// One host to probe, with every identifier the checkers need derived up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTarget {
    raw: String,
    hostname: String,
    authority: String,
    url: Url,
}

impl HostTarget {
    pub fn parse(input: &str) -> Result<Self, TargetError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(TargetError::Empty);
        }

        let with_scheme: String = match explicit_scheme(raw) {
            Some(_) => raw.to_string(),
            None => format!("{DEFAULT_SCHEME}://{raw}"),
        };

        let url = Url::parse(&with_scheme).map_err(|e| TargetError::InvalidUrl {
            input: raw.to_string(),
            reason: e.to_string(),
        })?;

        let hostname: String = match url.host() {
            Some(Host::Domain(domain)) => domain.to_string(),
            Some(Host::Ipv4(addr)) => addr.to_string(),
            Some(Host::Ipv6(addr)) => addr.to_string(),
            None => return Err(TargetError::MissingHost(raw.to_string())),
        };

        let authority: String = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => hostname.clone(),
        };

        Ok(Self {
            raw: raw.to_string(),
            hostname,
            authority,
            url,
        })
    }

    /// The entry exactly as the user wrote it (trimmed).
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Bare host, without scheme, port, path or IPv6 brackets. Used for DNS and ping.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// `host[:port]` as it appears in the URL.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// URL used for the HTTP check, scheme defaulted to `https`.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl FromStr for HostTarget {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HostTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Returns the scheme if the input starts with `<scheme>://`.
///
/// `host:port` must not be mistaken for `scheme:path`, so only the `://` form counts.
fn explicit_scheme(s: &str) -> Option<&str> {
    let (scheme, _) = s.split_once("://")?;
    let mut chars = scheme.chars();
    let first_is_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_is_valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    (first_is_alpha && rest_is_valid).then_some(scheme)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
