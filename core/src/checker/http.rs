//! HTTP(S) reachability.
//!
//! A check is a chain of `HEAD` requests. Each hop tries HTTPS first and falls back
//! to plain HTTP on a transport failure. Redirects are followed iteratively with an
//! explicit depth counter, so a redirect loop always terminates.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reachr_common::check::{CheckFailure, CheckResult};
use reachr_common::config::Config;
use reqwest::{Client, Response, header::LOCATION, redirect::Policy};
use tracing::debug;
use url::Url;

use super::HttpProbe;

/// What to do with the response of one hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Done(CheckResult),
    Follow(String),
}

pub struct HttpChecker {
    client: Client,
    max_redirects: usize,
}

impl HttpChecker {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        Self::with_settings(cfg.http_timeout, &cfg.user_agent, cfg.max_redirects)
    }

    /// Reachability is the goal, so certificates are not validated, proxies from the
    /// environment are ignored and redirects are handled by [`HttpChecker::check`]
    /// instead of the client.
    pub fn with_settings(timeout: Duration, user_agent: &str, max_redirects: usize) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .danger_accept_invalid_certs(true)
            .redirect(Policy::none())
            .no_proxy()
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            client,
            max_redirects,
        })
    }

    /// Sends one `HEAD` for `url`, downgrading an `https` URL to `http` if the first
    /// attempt fails before a response arrives. Returns the URL that answered.
    async fn head(&self, url: &Url) -> Result<(Response, Url), CheckFailure> {
        match url.scheme() {
            "https" => match self.send(url).await {
                Ok(response) => Ok((response, url.clone())),
                Err(e) => {
                    debug!(url = %url, error = %describe(e), "https attempt failed, retrying over http");
                    let plain = downgrade(url)?;
                    let response = self.send(&plain).await.map_err(transport_failure)?;
                    Ok((response, plain))
                }
            },
            "http" => {
                let response = self.send(url).await.map_err(transport_failure)?;
                Ok((response, url.clone()))
            }
            other => Err(CheckFailure::UnsupportedScheme(other.to_string())),
        }
    }

    async fn send(&self, url: &Url) -> Result<Response, reqwest::Error> {
        self.client.head(url.clone()).send().await
    }
}

#[async_trait]
impl HttpProbe for HttpChecker {
    async fn check(&self, url: &Url) -> CheckResult {
        let mut current: Url = url.clone();
        let mut hops: usize = 0;

        loop {
            let (response, answered) = match self.head(&current).await {
                Ok(answer) => answer,
                Err(reason) => return CheckResult::Failure(reason),
            };

            let location = response.headers().get(LOCATION).and_then(|value| value.to_str().ok());

            match classify(response.status().as_u16(), location) {
                Step::Done(result) => return result,
                Step::Follow(location) => {
                    hops += 1;
                    if hops > self.max_redirects {
                        return CheckResult::Failure(CheckFailure::TooManyRedirects(self.max_redirects));
                    }

                    let next = match answered.join(&location) {
                        Ok(next) => next,
                        Err(e) => return CheckResult::Failure(CheckFailure::InvalidUrl(format!("{location}: {e}"))),
                    };

                    debug!(from = %answered, to = %next, hop = hops, "following redirect");
                    current = next;
                }
            }
        }
    }
}

/// Maps a status code (and its `Location` header) onto the next step of the chain.
pub fn classify(status: u16, location: Option<&str>) -> Step {
    match status {
        200..=299 => Step::Done(CheckResult::Success),
        300..=399 => match location {
            Some(location) if !location.trim().is_empty() => Step::Follow(location.trim().to_string()),
            _ => Step::Done(CheckResult::Success),
        },
        other => Step::Done(CheckResult::Failure(CheckFailure::HttpStatus(other))),
    }
}

fn downgrade(url: &Url) -> Result<Url, CheckFailure> {
    let mut plain = url.clone();
    plain
        .set_scheme("http")
        .map_err(|_| CheckFailure::InvalidUrl(url.to_string()))?;
    Ok(plain)
}

fn transport_failure(err: reqwest::Error) -> CheckFailure {
    if err.is_timeout() {
        CheckFailure::Timeout
    } else {
        CheckFailure::Transport(describe(err))
    }
}

/// The error and its sources on one line.
fn describe(err: reqwest::Error) -> String {
    format!("{:#}", anyhow::Error::new(err))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
