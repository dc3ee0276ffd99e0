use chrono::{DateTime, Local};
use serde::Serialize;

use crate::check::{CheckFailure, CheckKind, CheckResult};
use crate::input::RejectedEntry;
use crate::network::target::HostTarget;

/// Outcome of all checks against one input entry.
#[derive(Debug, Clone)]
pub struct HostReport {
    /// The entry as the user wrote it (trimmed).
    pub entry: String,
    /// `None` when the entry could not be parsed and nothing was probed.
    pub target: Option<HostTarget>,
    pub dns: CheckResult,
    pub http: CheckResult,
    pub ping: CheckResult,
    /// DNS and HTTP both succeeded. Ping is advisory and never affects this.
    pub overall: bool,
}

impl HostReport {
    pub fn new(target: HostTarget, dns: CheckResult, http: CheckResult, ping: CheckResult) -> Self {
        let overall = dns.is_ok() && http.is_ok();
        Self {
            entry: target.raw().to_string(),
            target: Some(target),
            dns,
            http,
            ping,
            overall,
        }
    }

    /// Report for a host whose checks never completed.
    pub fn aborted(target: HostTarget, reason: impl Into<String>) -> Self {
        let failure = CheckResult::Failure(CheckFailure::Aborted(reason.into()));
        Self::new(target, failure.clone(), failure.clone(), failure)
    }

    /// Report for an entry that could not be parsed. Every check fails with the parse error.
    pub fn rejected(rejected: RejectedEntry) -> Self {
        let failure = CheckResult::Failure(CheckFailure::InvalidTarget(rejected.error.to_string()));
        Self {
            entry: rejected.entry,
            target: None,
            dns: failure.clone(),
            http: failure.clone(),
            ping: failure,
            overall: false,
        }
    }

    pub fn result(&self, kind: CheckKind) -> &CheckResult {
        match kind {
            CheckKind::Dns => &self.dns,
            CheckKind::Http => &self.http,
            CheckKind::Ping => &self.ping,
        }
    }

    pub fn record(&self) -> ReportRecord<'_> {
        ReportRecord {
            host: &self.entry,
            url: self.target.as_ref().map(|target| target.url().as_str()),
            dns: &self.dns,
            http: &self.http,
            ping: &self.ping,
        }
    }
}

/// One line of the persisted error report.
#[derive(Debug, Serialize)]
pub struct ReportRecord<'a> {
    pub host: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    pub dns: &'a CheckResult,
    pub http: &'a CheckResult,
    pub ping: &'a CheckResult,
}

/// Everything a single invocation produced, in input order.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub reports: Vec<HostReport>,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl RunSummary {
    pub fn checked(&self) -> usize {
        self.reports.len()
    }

    pub fn unreachable(&self) -> usize {
        self.unreachable_hosts().count()
    }

    pub fn unreachable_hosts(&self) -> impl Iterator<Item = &HostReport> {
        self.reports.iter().filter(|report| !report.overall)
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
