//! The central **abstraction** for reachability probes.
//!
//! Each signal (name resolution, HTTP response, ICMP echo) sits behind its own
//! trait so the [`orchestrator`](crate::orchestrator) never depends on a concrete
//! probe. The real implementations live in [`dns`], [`http`] and [`ping`]; tests
//! swap in stubs.
//!
//! Probes never return errors: every failure is folded into a
//! [`CheckResult::Failure`] and stays local to the host being checked.

use async_trait::async_trait;
use reachr_common::check::CheckResult;
use url::Url;

pub mod dns;
pub mod http;
pub mod ping;

pub use dns::DnsChecker;
pub use http::HttpChecker;
pub use ping::PingChecker;

/// Forward name resolution.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, hostname: &str) -> CheckResult;
}

/// Final HTTP status of a URL, redirects included.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    async fn check(&self, url: &Url) -> CheckResult;
}

/// ICMP echo reachability.
#[async_trait]
pub trait Pinger: Send + Sync {
    async fn ping(&self, hostname: &str) -> CheckResult;
}
