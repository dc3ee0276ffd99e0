//! # Check Outcomes
//!
//! Every probe (DNS, HTTP, ping) collapses into a [`CheckResult`]. There are no
//! intermediate states: a check either succeeded, failed with a typed
//! [`CheckFailure`], or was never run.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// The three independent reachability signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Dns,
    Http,
    Ping,
}

impl CheckKind {
    pub const ALL: [CheckKind; 3] = [CheckKind::Dns, CheckKind::Http, CheckKind::Ping];
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckKind::Dns => "DNS",
            CheckKind::Http => "HTTP",
            CheckKind::Ping => "Ping",
        };
        f.write_str(name)
    }
}

/// Why a single check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    #[error("name resolution failed: {0}")]
    NameResolution(String),
    #[error("resolver returned no addresses")]
    NoAddress,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("timed out")]
    Timeout,
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
    #[error("more than {0} redirects")]
    TooManyRedirects(usize),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),
    #[error("{0}")]
    InvalidTarget(String),
    #[error("refusing to probe host '{0}'")]
    InvalidHost(String),
    #[error("no echo reply")]
    NoReply,
    #[error("could not launch ping: {0}")]
    ProcessLaunch(String),
    #[error("check aborted: {0}")]
    Aborted(String),
}

impl Serialize for CheckFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum CheckResult {
    Success,
    Failure(CheckFailure),
    /// The check was disabled, or not run because the name did not resolve.
    Skipped,
}

impl CheckResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckResult::Success)
    }

    pub fn failure(&self) -> Option<&CheckFailure> {
        match self {
            CheckResult::Failure(reason) => Some(reason),
            _ => None,
        }
    }

    /// Console label used in progress lines.
    pub fn label(&self) -> &'static str {
        match self {
            CheckResult::Success => "OK",
            CheckResult::Failure(_) => "FAILED",
            CheckResult::Skipped => "SKIPPED",
        }
    }
}

impl From<Result<(), CheckFailure>> for CheckResult {
    fn from(result: Result<(), CheckFailure>) -> Self {
        match result {
            Ok(()) => CheckResult::Success,
            Err(reason) => CheckResult::Failure(reason),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
