//! # Outbound Ports
//!
//! The contracts external capabilities are plugged in through. The engine in
//! `reckon-core` depends only on these traits; `reckon-plugins` implements them for
//! concrete tools and `reckon-protocols` implements the normalizers.
//!
//! ## Rules
//! 1. Everything here is a trait or a plain data carrier.
//! 2. A probe never panics and never returns `Err` to the engine: failures are reported
//!    inside the [`ProbeOutcome`].
//! 3. A probe never blocks longer than the timeout it is given.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::StatusCodes;
use crate::error::ProbeError;
use crate::models::ProbeOutcome;
use crate::target::Target;
use crate::trace::DebugTrace;

/// One bounded invocation of an external capability against a target.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Source name recorded as provenance for everything this probe finds.
    fn name(&self) -> &str;

    /// Human readable description of what will be invoked, for the debug trace.
    fn describe(&self, target: &Target) -> String {
        format!("{} {}", self.name(), target)
    }

    async fn run(&self, target: &Target, timeout: Duration) -> ProbeOutcome;
}

/// Extracts canonical entities from one probe's raw output.
///
/// Lines that cannot be understood are recorded in `trace` and skipped.
pub trait Normalizer: Send + Sync {
    type Entity;

    fn parse(&self, raw: &str, target: &Target, trace: &mut DebugTrace) -> Vec<Self::Entity>;
}

/// A host reported alive by a liveness probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveHost {
    pub host: String,
    pub status: Option<u16>,
}

/// Probes a whole candidate list in one invocation.
#[async_trait]
pub trait BatchLivenessProbe: Send + Sync {
    fn name(&self) -> &str;

    /// Returns hosts in the order the tool reported them.
    async fn probe_batch(
        &self,
        candidates: &[String],
        accepted: &StatusCodes,
        timeout: Duration,
    ) -> Result<Vec<LiveHost>, ProbeError>;
}

/// Observes the HTTP status of a single host.
#[async_trait]
pub trait StatusProbe: Send + Sync {
    fn name(&self) -> &str;

    async fn status(&self, host: &Target) -> Result<u16, ProbeError>;
}
