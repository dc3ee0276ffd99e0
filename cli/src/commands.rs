pub mod check;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use reachr_common::config::{Config, DEFAULT_REPORT_FILE, DEFAULT_USER_AGENT};
use reachr_common::input::InputSource;

#[derive(Parser)]
#[command(name = "reachr")]
#[command(version, about = "Checks hosts for DNS, HTTP and ICMP reachability.")]
pub struct CommandLine {
    /// Hosts, host:port pairs or URLs to check, or `.txt` list files
    pub targets: Vec<String>,

    /// Read targets from a list file (one per line, `#` starts a comment)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Where to write the report of unreachable hosts
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_REPORT_FILE)]
    pub output: PathBuf,

    /// Number of hosts checked at the same time
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Run the DNS, HTTP and ping checks of a host concurrently
    #[arg(long)]
    pub parallel_checks: bool,

    /// Run HTTP and ping even when the name does not resolve
    #[arg(long)]
    pub check_all: bool,

    /// Pause between the checks of a host, in milliseconds (console pacing only)
    #[arg(long, value_name = "MS", default_value_t = 200)]
    pub pace: u64,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub timeout: u64,

    /// Redirects followed before the HTTP check fails
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub max_redirects: usize,

    /// User-Agent header sent with HTTP requests
    #[arg(long, value_name = "UA", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Skip the ICMP check
    #[arg(long)]
    pub no_ping: bool,

    /// Ping utility to run
    #[arg(long, value_name = "PROGRAM", default_value = "ping")]
    pub ping_program: String,

    /// How long ping waits for the echo reply, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 2)]
    pub ping_wait: u64,

    /// Print less (-q one line per host, -qq summary only)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        Config {
            http_timeout: Duration::from_secs(self.timeout),
            max_redirects: self.max_redirects,
            user_agent: self.user_agent.clone(),
            ping_program: self.ping_program.clone(),
            ping_wait: Duration::from_secs(self.ping_wait),
            ping_enabled: !self.no_ping,
            pace: Duration::from_millis(self.pace),
            parallel_checks: self.parallel_checks,
            short_circuit: !self.check_all,
            jobs: usize::from(self.jobs),
            output: self.output.clone(),
            quiet: self.quiet,
        }
    }

    pub fn input_source(&self) -> InputSource {
        InputSource::select(self.targets.clone(), self.file.clone())
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
