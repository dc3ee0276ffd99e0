use std::sync::Arc;
use std::time::Duration;

use reachr_common::check::{CheckFailure, CheckResult};
use reachr_common::config::Config;
use reachr_common::input::{parse_entry, Entry, InputSource};
use reachr_common::network::target::HostTarget;
use reachr_core::checker::{DnsChecker, HttpChecker, Pinger};
use reachr_core::orchestrator::ConnectivityOrchestrator;
use reachr_core::report::ReportWriter;

use crate::support::mock_server::{MockServer, Route};
use crate::support::stubs::Stub;

fn config() -> Config {
    Config {
        pace: Duration::ZERO,
        ..Config::default()
    }
}

fn targets(hosts: &[&str]) -> Vec<Entry> {
    hosts.iter().map(|host| parse_entry(host)).collect()
}

fn fail() -> CheckResult {
    CheckResult::Failure(CheckFailure::NoReply)
}

#[tokio::test]
async fn unresolvable_host_is_reported_without_other_probes() {
    let dns = Arc::new(Stub::new(CheckResult::Failure(CheckFailure::NameResolution(
        "no such host".into(),
    ))));
    let http = Arc::new(Stub::new(CheckResult::Success));
    let ping = Arc::new(Stub::new(CheckResult::Success));
    let orch = ConnectivityOrchestrator::new(dns.clone(), http.clone(), Some(ping.clone() as Arc<dyn Pinger>), &config());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("error.log");
    let mut writer = ReportWriter::create(&path).unwrap();

    let summary = orch
        .run(targets(&["example.com"]), |report| {
            writer.record(report).unwrap();
        })
        .await;
    assert_eq!(writer.finish().unwrap(), 1);

    let report = &summary.reports[0];
    assert!(matches!(report.dns, CheckResult::Failure(CheckFailure::NameResolution(_))));
    assert!(!report.overall);
    assert_eq!(http.calls(), 0);
    assert_eq!(ping.calls(), 0);
    assert_eq!(summary.unreachable(), 1);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["host"], "example.com");
    assert_eq!(lines[0]["dns"]["status"], "failure");
    assert_eq!(lines[0]["http"]["status"], "skipped");
    assert_eq!(lines[0]["ping"]["status"], "skipped");
}

#[tokio::test]
async fn unparseable_line_does_not_stop_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("servers.txt");
    std::fs::write(&list, "good.example\nexa mple.com\nother.example\n").unwrap();

    let dns = Arc::new(Stub::new(CheckResult::Success));
    let orch = ConnectivityOrchestrator::new(
        dns.clone(),
        Arc::new(Stub::new(CheckResult::Success)),
        None,
        &config(),
    );

    let path = dir.path().join("error.log");
    let mut writer = ReportWriter::create(&path).unwrap();
    let entries = InputSource::File(list).load().unwrap();
    let summary = orch
        .run(entries, |report| {
            writer.record(report).unwrap();
        })
        .await;
    assert_eq!(writer.finish().unwrap(), 1);

    assert_eq!(summary.checked(), 3);
    assert!(summary.reports[0].overall);
    assert!(!summary.reports[1].overall);
    assert!(summary.reports[2].overall);
    assert_eq!(dns.calls(), 2);

    let contents = std::fs::read_to_string(&path).unwrap();
    let line: serde_json::Value = serde_json::from_str(contents.trim_end()).unwrap();
    assert_eq!(line["host"], "exa mple.com");
    assert_eq!(line["dns"]["status"], "failure");
}

#[tokio::test]
async fn overall_ignores_ping() {
    let cfg = Config {
        short_circuit: false,
        ..config()
    };

    for dns_ok in [true, false] {
        for http_ok in [true, false] {
            for ping_ok in [true, false] {
                let pick = |ok: bool| if ok { CheckResult::Success } else { fail() };
                let orch = ConnectivityOrchestrator::new(
                    Arc::new(Stub::new(pick(dns_ok))),
                    Arc::new(Stub::new(pick(http_ok))),
                    Some(Arc::new(Stub::new(pick(ping_ok))) as Arc<dyn Pinger>),
                    &cfg,
                );
                let report = orch.check(0, &HostTarget::parse("example.com").unwrap()).await;
                assert_eq!(
                    report.overall,
                    dns_ok && http_ok,
                    "dns={dns_ok} http={http_ok} ping={ping_ok}"
                );
            }
        }
    }
}

#[tokio::test]
async fn reports_arrive_in_input_order() {
    let dns = Stub::new(CheckResult::Success)
        .delay("first.example", Duration::from_millis(120))
        .delay("second.example", Duration::from_millis(60));
    let cfg = Config {
        jobs: 4,
        parallel_checks: true,
        ..config()
    };
    let orch = ConnectivityOrchestrator::new(
        Arc::new(dns),
        Arc::new(Stub::new(CheckResult::Success)),
        None,
        &cfg,
    );

    let mut seen: Vec<String> = Vec::new();
    let summary = orch
        .run(
            targets(&["first.example", "second.example", "third.example"]),
            |report| seen.push(report.entry.clone()),
        )
        .await;

    assert_eq!(seen, vec!["first.example", "second.example", "third.example"]);
    assert_eq!(summary.checked(), 3);
    assert_eq!(summary.unreachable(), 0);
}

#[tokio::test]
async fn panicking_check_does_not_abort_the_run() {
    let http = Stub::new(CheckResult::Success).panic_for("boom.example");
    let orch = ConnectivityOrchestrator::new(
        Arc::new(Stub::new(CheckResult::Success)),
        Arc::new(http),
        None,
        &config(),
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("error.log");
    let mut writer = ReportWriter::create(&path).unwrap();

    let summary = orch
        .run(targets(&["ok.example", "boom.example", "after.example"]), |report| {
            writer.record(report).unwrap();
        })
        .await;

    assert_eq!(summary.checked(), 3);
    assert!(summary.reports[0].overall);
    assert!(matches!(
        summary.reports[1].http,
        CheckResult::Failure(CheckFailure::Aborted(_))
    ));
    assert!(summary.reports[2].overall);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("boom.example"));
}

#[tokio::test]
async fn real_checkers_against_local_server() {
    let server = MockServer::start().await;
    server
        .route("/up", Route::Status(200))
        .route("/down", Route::Status(500));

    let cfg = Config {
        ping_enabled: false,
        http_timeout: Duration::from_secs(2),
        ..config()
    };
    let orch = ConnectivityOrchestrator::new(
        Arc::new(DnsChecker),
        Arc::new(HttpChecker::new(&cfg).unwrap()),
        None,
        &cfg,
    );

    let up = format!("http://{}/up", server.authority());
    let down = format!("http://{}/down", server.authority());
    let summary = orch.run(targets(&[up.as_str(), down.as_str()]), |_| {}).await;

    assert!(summary.reports[0].overall);
    assert_eq!(summary.reports[0].ping, CheckResult::Skipped);
    assert_eq!(
        summary.reports[1].http,
        CheckResult::Failure(CheckFailure::HttpStatus(500))
    );
    assert_eq!(summary.unreachable(), 1);
}
