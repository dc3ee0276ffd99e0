//! Runs the three probes against each host and aggregates the verdicts.
//!
//! Per host the checks run either in a fixed order (DNS, HTTP, ping) with a cosmetic
//! pause in between, or concurrently. Across hosts, a bounded pool of size `jobs`
//! is used and reports are handed out in input order no matter which host finishes
//! first.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use futures::stream::{self, StreamExt};
use reachr_common::check::{CheckKind, CheckResult};
use reachr_common::config::Config;
use reachr_common::input::{Entry, RejectedEntry};
use reachr_common::network::target::HostTarget;
use reachr_common::report::{HostReport, RunSummary};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error};

use crate::checker::{DnsChecker, HttpChecker, HttpProbe, PingChecker, Pinger, Resolver};

/// Progress notifications for live displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    HostStarted { index: usize, target: String },
    CheckFinished { index: usize, kind: CheckKind, ok: bool },
    HostFinished { index: usize, overall: bool },
}

#[derive(Debug, Clone, Copy)]
struct Pacing {
    pace: Duration,
    parallel_checks: bool,
    short_circuit: bool,
    jobs: usize,
}

#[derive(Clone)]
pub struct ConnectivityOrchestrator {
    resolver: Arc<dyn Resolver>,
    http: Arc<dyn HttpProbe>,
    /// `None` when ping is disabled.
    pinger: Option<Arc<dyn Pinger>>,
    pacing: Pacing,
    events: Option<UnboundedSender<ProbeEvent>>,
}

impl ConnectivityOrchestrator {
    /// Wires up the system resolver, the HTTP client and the ping utility.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let pinger: Option<Arc<dyn Pinger>> = match cfg.ping_enabled {
            true => Some(Arc::new(PingChecker::new(cfg))),
            false => None,
        };
        Ok(Self::new(
            Arc::new(DnsChecker),
            Arc::new(HttpChecker::new(cfg)?),
            pinger,
            cfg,
        ))
    }

    pub fn new(
        resolver: Arc<dyn Resolver>,
        http: Arc<dyn HttpProbe>,
        pinger: Option<Arc<dyn Pinger>>,
        cfg: &Config,
    ) -> Self {
        Self {
            resolver,
            http,
            pinger,
            pacing: Pacing {
                pace: cfg.pace,
                parallel_checks: cfg.parallel_checks,
                short_circuit: cfg.short_circuit,
                jobs: cfg.jobs.max(1),
            },
            events: None,
        }
    }

    pub fn with_events(mut self, events: UnboundedSender<ProbeEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Checks every entry and calls `on_report` for each one, in input order.
    ///
    /// Each host runs in its own task. A host whose task dies is reported as aborted
    /// and the run carries on. Rejected entries are reported without probing.
    pub async fn run<F>(&self, entries: Vec<Entry>, mut on_report: F) -> RunSummary
    where
        F: FnMut(&HostReport),
    {
        let started_at = Local::now();
        let mut reports: Vec<HostReport> = Vec::with_capacity(entries.len());

        let mut results = stream::iter(entries.into_iter().enumerate())
            .map(|(index, entry)| {
                let orchestrator = self.clone();
                async move {
                    match entry {
                        Ok(target) => orchestrator.check_isolated(index, target).await,
                        Err(rejected) => orchestrator.reject(index, rejected),
                    }
                }
            })
            .buffered(self.pacing.jobs);

        while let Some(report) = results.next().await {
            on_report(&report);
            reports.push(report);
        }

        RunSummary {
            reports,
            started_at,
            finished_at: Local::now(),
        }
    }

    async fn check_isolated(self, index: usize, target: HostTarget) -> HostReport {
        let task_target = target.clone();
        let handle = tokio::spawn(async move { self.check(index, &task_target).await });
        match handle.await {
            Ok(report) => report,
            Err(e) => {
                error!(host = %target, error = %e, "host check aborted");
                HostReport::aborted(target, e.to_string())
            }
        }
    }

    fn reject(&self, index: usize, rejected: RejectedEntry) -> HostReport {
        self.emit(ProbeEvent::HostStarted {
            index,
            target: rejected.entry.clone(),
        });
        let report = HostReport::rejected(rejected);
        self.emit(ProbeEvent::HostFinished { index, overall: false });
        report
    }

    /// Runs all checks for one host. `index` only tags progress events.
    pub async fn check(&self, index: usize, target: &HostTarget) -> HostReport {
        self.emit(ProbeEvent::HostStarted {
            index,
            target: target.raw().to_string(),
        });

        let (dns, http, ping) = match self.pacing.parallel_checks {
            true => self.check_concurrently(index, target).await,
            false => self.check_in_order(index, target).await,
        };

        let report = HostReport::new(target.clone(), dns, http, ping);
        debug!(host = %target, overall = report.overall, "host checked");
        self.emit(ProbeEvent::HostFinished {
            index,
            overall: report.overall,
        });
        report
    }

    async fn check_in_order(&self, index: usize, target: &HostTarget) -> (CheckResult, CheckResult, CheckResult) {
        let dns = self.run_dns(index, target).await;
        if self.should_skip_rest(&dns) {
            return (dns, CheckResult::Skipped, CheckResult::Skipped);
        }

        self.pause().await;
        let http = self.run_http(index, target).await;
        self.pause().await;
        let ping = self.run_ping(index, target).await;
        (dns, http, ping)
    }

    async fn check_concurrently(&self, index: usize, target: &HostTarget) -> (CheckResult, CheckResult, CheckResult) {
        if self.pacing.short_circuit {
            let dns = self.run_dns(index, target).await;
            if self.should_skip_rest(&dns) {
                return (dns, CheckResult::Skipped, CheckResult::Skipped);
            }
            let (http, ping) = tokio::join!(self.run_http(index, target), self.run_ping(index, target));
            return (dns, http, ping);
        }

        tokio::join!(
            self.run_dns(index, target),
            self.run_http(index, target),
            self.run_ping(index, target)
        )
    }

    async fn run_dns(&self, index: usize, target: &HostTarget) -> CheckResult {
        let result = self.resolver.resolve(target.hostname()).await;
        self.finished(index, CheckKind::Dns, &result);
        result
    }

    async fn run_http(&self, index: usize, target: &HostTarget) -> CheckResult {
        let result = self.http.check(target.url()).await;
        self.finished(index, CheckKind::Http, &result);
        result
    }

    async fn run_ping(&self, index: usize, target: &HostTarget) -> CheckResult {
        let result = match &self.pinger {
            Some(pinger) => pinger.ping(target.hostname()).await,
            None => CheckResult::Skipped,
        };
        self.finished(index, CheckKind::Ping, &result);
        result
    }

    /// An unresolvable name cannot be reached over HTTP or ICMP either.
    fn should_skip_rest(&self, dns: &CheckResult) -> bool {
        self.pacing.short_circuit && !dns.is_ok()
    }

    async fn pause(&self) {
        if !self.pacing.pace.is_zero() {
            tokio::time::sleep(self.pacing.pace).await;
        }
    }

    fn finished(&self, index: usize, kind: CheckKind, result: &CheckResult) {
        self.emit(ProbeEvent::CheckFinished {
            index,
            kind,
            ok: result.is_ok(),
        });
    }

    fn emit(&self, event: ProbeEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
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
