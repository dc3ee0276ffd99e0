use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reachr_common::check::CheckResult;
use reachr_core::checker::{HttpProbe, Pinger, Resolver};
use url::Url;

/// A checker that answers every probe with the same result.
///
/// Counts its invocations, can be slowed down or made to panic per host.
pub struct Stub {
    result: CheckResult,
    calls: AtomicUsize,
    delays: HashMap<String, Duration>,
    panic_for: Option<String>,
}

impl Stub {
    pub fn new(result: CheckResult) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            delays: HashMap::new(),
            panic_for: None,
        }
    }

    pub fn delay(mut self, host: &str, delay: Duration) -> Self {
        self.delays.insert(host.to_string(), delay);
        self
    }

    pub fn panic_for(mut self, host: &str) -> Self {
        self.panic_for = Some(host.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self, host: &str) -> CheckResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(host) {
            tokio::time::sleep(*delay).await;
        }
        if self.panic_for.as_deref() == Some(host) {
            panic!("stub asked to fail for {host}");
        }
        self.result.clone()
    }
}

#[async_trait]
impl Resolver for Stub {
    async fn resolve(&self, hostname: &str) -> CheckResult {
        self.answer(hostname).await
    }
}

#[async_trait]
impl HttpProbe for Stub {
    async fn check(&self, url: &Url) -> CheckResult {
        self.answer(url.host_str().unwrap_or_default()).await
    }
}

#[async_trait]
impl Pinger for Stub {
    async fn ping(&self, hostname: &str) -> CheckResult {
        self.answer(hostname).await
    }
}
