//! ICMP reachability through the platform `ping` utility.
//!
//! Shelling out avoids raw sockets, so no elevated privileges are needed. Argument
//! construction lives in [`ping_args`] and exit-status interpretation in
//! [`interpret`], everything platform-specific stays in those two places.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use reachr_common::check::{CheckFailure, CheckResult};
use reachr_common::config::Config;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::Pinger;

/// Extra time granted to the utility beyond its own reply wait.
const PROCESS_GRACE: Duration = Duration::from_secs(3);

/// Platform families whose `ping` utilities disagree on flags and units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// `-n <count> -w <milliseconds>`
    Windows,
    /// macOS and the BSDs: `-c <count> -W <milliseconds>`
    Bsd,
    /// Linux and the rest: `-c <count> -W <seconds>`
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(any(
            target_os = "macos",
            target_os = "ios",
            target_os = "freebsd",
            target_os = "netbsd",
            target_os = "openbsd",
            target_os = "dragonfly"
        )) {
            Platform::Bsd
        } else {
            Platform::Unix
        }
    }
}

pub struct PingChecker {
    program: String,
    wait: Duration,
    platform: Platform,
}

impl PingChecker {
    pub fn new(cfg: &Config) -> Self {
        Self {
            program: cfg.ping_program.clone(),
            wait: cfg.ping_wait,
            platform: Platform::current(),
        }
    }
}

#[async_trait]
impl Pinger for PingChecker {
    async fn ping(&self, hostname: &str) -> CheckResult {
        if hostname.starts_with('-') {
            return CheckResult::Failure(CheckFailure::InvalidHost(hostname.to_string()));
        }

        let child = Command::new(&self.program)
            .args(ping_args(self.platform, hostname, self.wait))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(e) => {
                debug!(program = %self.program, error = %e, "could not launch ping");
                return CheckResult::Failure(CheckFailure::ProcessLaunch(e.to_string()));
            }
        };

        match timeout(self.wait + PROCESS_GRACE, child.wait()).await {
            Ok(Ok(status)) => {
                debug!(hostname, %status, "ping exited");
                interpret(status)
            }
            Ok(Err(e)) => CheckResult::Failure(CheckFailure::ProcessLaunch(e.to_string())),
            Err(_elapsed) => CheckResult::Failure(CheckFailure::Timeout),
        }
    }
}

/// Builds the arguments for a single echo request with the given reply wait.
pub fn ping_args(platform: Platform, hostname: &str, wait: Duration) -> Vec<String> {
    let millis: u128 = wait.as_millis().max(1);
    let (count_flag, wait_flag, wait_value) = match platform {
        Platform::Windows => ("-n", "-w", millis),
        Platform::Bsd => ("-c", "-W", millis),
        Platform::Unix => ("-c", "-W", millis.div_ceil(1000)),
    };

    vec![
        count_flag.to_string(),
        "1".to_string(),
        wait_flag.to_string(),
        wait_value.to_string(),
        hostname.to_string(),
    ]
}

/// A zero exit status means at least one echo reply came back.
pub fn interpret(status: ExitStatus) -> CheckResult {
    if status.success() {
        CheckResult::Success
    } else {
        CheckResult::Failure(CheckFailure::NoReply)
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
