//! Console rendering of host reports and the run summary.

use std::path::Path;

use chrono::{DateTime, Local};
use colored::*;
use reachr_common::check::CheckResult;
use reachr_common::config::Config;
use reachr_common::report::{HostReport, RunSummary};

use crate::rprint;
use crate::terminal::{colors, print};

pub fn run_header(count: usize, started_at: DateTime<Local>, cfg: &Config) {
    print::header("connectivity check", cfg.quiet);
    if cfg.quiet > 0 {
        return;
    }

    let unit: &str = if count == 1 { "host" } else { "hosts" };
    rprint!(&format!("Checking connectivity for {} {unit}...", count.to_string().color(colors::ACCENT)));
    rprint!(&format!("Started at: {}", started_at.format("%Y-%m-%d %H:%M:%S")));
    if cfg.parallel_checks || cfg.jobs > 1 {
        print::aligned_line("Workers", 6, &cfg.jobs.to_string());
    }
    print::separator();
}

/// Prints one finished host.
pub fn host(report: &HostReport, cfg: &Config) {
    match cfg.quiet {
        0 => host_block(report),
        1 => host_line(report),
        _ => {}
    }
}

fn host_block(report: &HostReport) {
    rprint!(&format!("Checking {}:", report.entry.color(colors::PRIMARY)));
    match &report.target {
        Some(target) => {
            check_line("DNS lookup for", target.hostname(), &report.dns);
            check_line("HTTP check for", target.url().as_str(), &report.http);
            check_line("Ping check for", target.hostname(), &report.ping);
        }
        None => check_line("Parsing entry", &report.entry, &report.dns),
    }
    rprint!(&format!("Overall status: {}", verdict(report.overall)));
    print::separator();
}

fn host_line(report: &HostReport) {
    rprint!(&format!("{} {}", verdict(report.overall), report.entry));
}

fn check_line(label: &str, subject: &str, result: &CheckResult) {
    let line: String = match result.failure() {
        Some(reason) => format!(
            "{label} {subject}... {} {}",
            status(result),
            format!("({reason})").dimmed()
        ),
        None => format!("{label} {subject}... {}", status(result)),
    };
    rprint!(&line);
}

fn status(result: &CheckResult) -> ColoredString {
    let color = match result {
        CheckResult::Success => colors::OK,
        CheckResult::Failure(_) => colors::FAILED,
        CheckResult::Skipped => colors::SKIPPED,
    };
    result.label().color(color).bold()
}

fn verdict(overall: bool) -> ColoredString {
    match overall {
        true => "ONLINE".color(colors::OK).bold(),
        false => "OFFLINE".color(colors::FAILED).bold(),
    }
}

pub fn summary(summary: &RunSummary, report_path: &Path, written: usize, cfg: &Config) {
    let unreachable: ColoredString = match summary.unreachable() {
        0 => "0".color(colors::OK).bold(),
        n => n.to_string().color(colors::FAILED).bold(),
    };
    let elapsed = (summary.finished_at - summary.started_at).to_std().unwrap_or_default();
    let total_time: ColoredString = format!("{:.2}s", elapsed.as_secs_f64()).color(colors::ACCENT);

    if cfg.quiet == 0 {
        print::fat_separator();
    }
    print::centerln(&format!(
        "Summary: {unreachable} of {} hosts unreachable ({total_time}).",
        summary.checked()
    ));

    if written > 0 {
        rprint!(&format!("Detailed report written to {}", report_path.display()));
    } else {
        rprint!(&format!(
            "All hosts responded successfully. Nothing was written to {}.",
            report_path.display()
        ));
    }
}
