use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LIST_FILE: &str = "servers.txt";
pub const DEFAULT_REPORT_FILE: &str = "error.log";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

pub struct Config {
    /// Per-attempt budget for a single HTTP(S) request.
    pub http_timeout: Duration,
    /// Maximum number of redirects followed before the check fails.
    pub max_redirects: usize,
    pub user_agent: String,
    /// Name or path of the ICMP echo utility.
    pub ping_program: String,
    /// How long the ping utility waits for a reply.
    pub ping_wait: Duration,
    pub ping_enabled: bool,
    /// Cosmetic pause between sequential checks of one host.
    ///
    /// Only affects console pacing, never treated as a timeout.
    pub pace: Duration,
    /// Runs the checks of one host concurrently instead of in order.
    pub parallel_checks: bool,
    /// Skips HTTP and ping for a host whose name does not resolve.
    pub short_circuit: bool,
    /// Number of hosts probed at the same time.
    pub jobs: usize,
    pub output: PathBuf,
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(5),
            max_redirects: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            ping_program: String::from("ping"),
            ping_wait: Duration::from_secs(2),
            ping_enabled: true,
            pace: Duration::from_millis(200),
            parallel_checks: false,
            short_circuit: true,
            jobs: 1,
            output: PathBuf::from(DEFAULT_REPORT_FILE),
            quiet: 0,
        }
    }
}
