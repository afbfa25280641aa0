//! # Fallback Chain
//!
//! An ordered list of `(probe, normalizer)` links serving one goal. Links run strictly
//! one after another; the chain stops at the first link whose probe succeeded **and**
//! whose normalizer produced at least one entity. Failures and empty results move on to
//! the next link.
//!
//! When every link comes back empty, an optional last resort may synthesize entities
//! from the target alone (see [`crate::indicators`]).

use std::sync::Arc;
use std::time::Duration;

use reckon_common::error::ProbeError;
use reckon_common::models::ProbeOutcome;
use reckon_common::ports::{Normalizer, Probe};
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::deadline::Deadline;

/// Synthesizes entities from the target when every link came back empty.
pub type LastResort<E> = fn(&Target) -> Vec<E>;

struct Link<E> {
    probe: Arc<dyn Probe>,
    normalizer: Arc<dyn Normalizer<Entity = E>>,
    timeout: Option<Duration>,
}

/// What one link attempt produced, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub source: String,
    pub elapsed: Duration,
    pub error: Option<ProbeError>,
    pub entities: usize,
}

/// The result of one chain run.
#[derive(Debug, Clone)]
pub struct ChainOutput<E> {
    pub label: String,
    /// The link that won, or `None` when the chain came back empty.
    pub source: Option<String>,
    pub entities: Vec<E>,
    pub trace: DebugTrace,
    pub attempts: Vec<Attempt>,
    pub elapsed: Duration,
}

impl<E> ChainOutput<E> {
    /// An empty output for a chain that never produced one of its own.
    pub fn abandoned(label: impl Into<String>, debug: bool, reason: &str, elapsed: Duration) -> Self {
        let label = label.into();
        let mut trace = DebugTrace::new(debug);
        trace.record_error(&label, reason);
        Self {
            label,
            source: None,
            entities: Vec::new(),
            trace,
            attempts: Vec::new(),
            elapsed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The attempt made by `source`, if that link ran.
    pub fn attempt(&self, source: &str) -> Option<&Attempt> {
        self.attempts.iter().find(|a| a.source == source)
    }
}

pub struct FallbackChain<E> {
    label: String,
    links: Vec<Link<E>>,
    last_resort: Option<(String, LastResort<E>)>,
}

impl<E> FallbackChain<E> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            links: Vec::new(),
            last_resort: None,
        }
    }

    /// Appends a link bounded only by the outer deadline.
    pub fn link(
        mut self,
        probe: Arc<dyn Probe>,
        normalizer: Arc<dyn Normalizer<Entity = E>>,
    ) -> Self {
        self.links.push(Link {
            probe,
            normalizer,
            timeout: None,
        });
        self
    }

    /// Appends a link with its own timeout, still clamped to the outer deadline.
    pub fn link_with_timeout(
        mut self,
        probe: Arc<dyn Probe>,
        normalizer: Arc<dyn Normalizer<Entity = E>>,
        timeout: Duration,
    ) -> Self {
        self.links.push(Link {
            probe,
            normalizer,
            timeout: Some(timeout),
        });
        self
    }

    pub fn with_last_resort(mut self, label: impl Into<String>, produce: LastResort<E>) -> Self {
        self.last_resort = Some((label.into(), produce));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Source names of the links, in order.
    pub fn sources(&self) -> Vec<&str> {
        self.links.iter().map(|l| l.probe.name()).collect()
    }

    /// What the primary link invokes against `target`.
    pub fn describe_primary(&self, target: &Target) -> Option<String> {
        self.links.first().map(|l| l.probe.describe(target))
    }

    pub async fn run(&self, target: &Target, deadline: Deadline, debug: bool) -> ChainOutput<E> {
        let started = Instant::now();
        let mut trace = DebugTrace::new(debug);
        let mut attempts = Vec::with_capacity(self.links.len());

        for link in &self.links {
            let name = link.probe.name().to_string();
            if deadline.is_expired() {
                warn!(chain = %self.label, probe = %name, "Deadline reached, skipping remaining links.");
                trace.record_error(&name, "skipped: deadline reached");
                break;
            }

            let budget = match link.timeout {
                Some(timeout) => deadline.clamp(timeout),
                None => deadline.remaining(),
            };
            debug!(chain = %self.label, probe = %name, budget = ?budget, "Trying probe.");
            trace.record_command(&name, &link.probe.describe(target));

            let outcome = run_bounded(link.probe.as_ref(), target, budget).await;
            if let Some(error) = outcome.error() {
                warn!(chain = %self.label, probe = %name, error = %error, "Probe failed, moving on.");
                trace.record_error(&name, error);
                attempts.push(Attempt {
                    source: name,
                    elapsed: outcome.elapsed(),
                    error: Some(error.clone()),
                    entities: 0,
                });
                continue;
            }

            trace.record_output(&name, outcome.raw());
            let entities = link.normalizer.parse(outcome.raw(), target, &mut trace);
            attempts.push(Attempt {
                source: name.clone(),
                elapsed: outcome.elapsed(),
                error: None,
                entities: entities.len(),
            });

            if entities.is_empty() {
                debug!(chain = %self.label, probe = %name, "Probe returned nothing usable.");
                continue;
            }

            info!(chain = %self.label, source = %name, count = entities.len(), "Chain resolved.");
            return ChainOutput {
                label: self.label.clone(),
                source: Some(name),
                entities,
                trace,
                attempts,
                elapsed: started.elapsed(),
            };
        }

        if let Some((label, produce)) = &self.last_resort {
            let entities = produce(target);
            if !entities.is_empty() {
                warn!(chain = %self.label, count = entities.len(), "Every source came back empty, using {label}.");
                return ChainOutput {
                    label: self.label.clone(),
                    source: Some(label.clone()),
                    entities,
                    trace,
                    attempts,
                    elapsed: started.elapsed(),
                };
            }
        }

        debug!(chain = %self.label, "Chain exhausted without results.");
        ChainOutput {
            label: self.label.clone(),
            source: None,
            entities: Vec::new(),
            trace,
            attempts,
            elapsed: started.elapsed(),
        }
    }
}

/// Runs `probe` and enforces `budget` even if the probe itself overruns it. Dropping the
/// probe future on expiry also drops, and so kills, any child it spawned.
async fn run_bounded(probe: &dyn Probe, target: &Target, budget: Duration) -> ProbeOutcome {
    match tokio::time::timeout(budget, probe.run(target, budget)).await {
        Ok(outcome) => outcome,
        Err(_elapsed) => ProbeOutcome::failure(
            probe.name(),
            ProbeError::timeout(probe.name(), budget),
            budget,
        ),
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
