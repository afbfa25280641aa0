use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reckon_common::config::StatusCodes;
use reckon_common::error::ProbeError;
use reckon_common::models::ProbeOutcome;
use reckon_common::ports::{BatchLivenessProbe, LiveHost, Probe, StatusProbe};
use reckon_common::target::Target;

/// A probe with a fixed reply, an optional delay, and a call counter.
pub struct FakeProbe {
    name: &'static str,
    reply: Result<String, ProbeError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeProbe {
    pub fn replying(name: &'static str, raw: &str) -> Arc<Self> {
        Self::build(name, Ok(raw.to_string()), Duration::ZERO)
    }

    pub fn absent(name: &'static str) -> Arc<Self> {
        Self::build(name, Err(ProbeError::absent(name)), Duration::ZERO)
    }

    pub fn failing(name: &'static str, reason: &str) -> Arc<Self> {
        Self::build(name, Err(ProbeError::failure(name, reason)), Duration::ZERO)
    }

    pub fn slow(name: &'static str, raw: &str, delay: Duration) -> Arc<Self> {
        Self::build(name, Ok(raw.to_string()), delay)
    }

    fn build(name: &'static str, reply: Result<String, ProbeError>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            name,
            reply,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Probe for FakeProbe {
    fn name(&self) -> &str {
        self.name
    }

    async fn run(&self, _target: &Target, _timeout: Duration) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        ProbeOutcome::from_result(self.name, self.reply.clone(), self.delay)
    }
}

/// Batch liveness that reports a fixed list, or fails, after an optional delay.
pub struct FakeBatch {
    reply: Result<Vec<LiveHost>, ProbeError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeBatch {
    pub fn reporting(hosts: &[(&str, u16)]) -> Arc<Self> {
        Self::reporting_after(hosts, Duration::ZERO)
    }

    pub fn reporting_after(hosts: &[(&str, u16)], delay: Duration) -> Arc<Self> {
        let live = hosts
            .iter()
            .map(|(host, code)| LiveHost {
                host: host.to_string(),
                status: Some(*code),
            })
            .collect();
        Arc::new(Self {
            reply: Ok(live),
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn absent() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(ProbeError::absent("httpx")),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BatchLivenessProbe for FakeBatch {
    fn name(&self) -> &str {
        "httpx"
    }

    async fn probe_batch(
        &self,
        _candidates: &[String],
        _accepted: &StatusCodes,
        _timeout: Duration,
    ) -> Result<Vec<LiveHost>, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.reply.clone()
    }
}

/// Per-host status lookup from a table, each answer after an optional delay. Unknown
/// hosts fail.
pub struct FakeStatus {
    codes: HashMap<String, u16>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeStatus {
    pub fn with(codes: &[(&str, u16)]) -> Arc<Self> {
        Self::with_delay(codes, Duration::ZERO)
    }

    pub fn with_delay(codes: &[(&str, u16)], delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            codes: codes.iter().map(|(h, c)| (h.to_string(), *c)).collect(),
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusProbe for FakeStatus {
    fn name(&self) -> &str {
        "http-status"
    }

    async fn status(&self, host: &Target) -> Result<u16, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.codes
            .get(host.as_str())
            .copied()
            .ok_or_else(|| ProbeError::failure("http-status", "connection refused"))
    }
}
