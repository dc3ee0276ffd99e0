use async_trait::async_trait;
use reachr_common::check::{CheckFailure, CheckResult};
use tokio::net::lookup_host;
use tracing::debug;

use super::Resolver;

/// Resolves names through the system resolver.
///
/// No timeout or retry of its own, the OS resolver configuration applies.
#[derive(Debug, Default, Clone, Copy)]
pub struct DnsChecker;

#[async_trait]
impl Resolver for DnsChecker {
    async fn resolve(&self, hostname: &str) -> CheckResult {
        match lookup_host((hostname, 0)).await {
            Ok(mut addrs) => match addrs.next() {
                Some(addr) => {
                    debug!(hostname, ip = %addr.ip(), "name resolved");
                    CheckResult::Success
                }
                None => CheckResult::Failure(CheckFailure::NoAddress),
            },
            Err(e) => {
                debug!(hostname, error = %e, "name resolution failed");
                CheckResult::Failure(CheckFailure::NameResolution(e.to_string()))
            }
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
