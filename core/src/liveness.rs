//! # Liveness Filter Cascade
//!
//! Narrows a candidate host list to the hosts answering with an accepted HTTP status.
//!
//! 1. **Batch path**: the whole list goes to one [`BatchLivenessProbe`] call.
//! 2. **Slow path**: taken when the batch tool is missing or failed, or when it reported
//!    no survivors for a nonempty list. Candidates are checked one by one through a
//!    [`StatusProbe`], skipping any that do not pass target validation.
//!
//! Survivors are always candidate keys, never hosts the tool made up, and keep the order
//! in which the winning path reported them.

use std::collections::HashSet;
use std::sync::Arc;

use reckon_common::config::StatusCodes;
use reckon_common::error::ProbeError;
use reckon_common::ports::{BatchLivenessProbe, LiveHost, StatusProbe};
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;
use tracing::{debug, info, warn};

use crate::deadline::Deadline;

pub struct LivenessCascade {
    batch: Arc<dyn BatchLivenessProbe>,
    slow: Arc<dyn StatusProbe>,
}

impl LivenessCascade {
    pub fn new(batch: Arc<dyn BatchLivenessProbe>, slow: Arc<dyn StatusProbe>) -> Self {
        Self { batch, slow }
    }

    /// Returns the lower-cased keys of the candidates that answered with an accepted code.
    pub async fn filter(
        &self,
        candidates: &[String],
        accepted: &StatusCodes,
        deadline: Deadline,
        trace: &mut DebugTrace,
    ) -> Vec<String> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let known: HashSet<String> = candidates.iter().map(|c| c.to_ascii_lowercase()).collect();

        let budget = deadline.remaining();
        let batch = self.batch.probe_batch(candidates, accepted, budget);
        let reported = match tokio::time::timeout(budget, batch).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::timeout(self.batch.name(), budget)),
        };

        match reported {
            Ok(live) => {
                let survivors = select(&known, live, accepted);
                if !survivors.is_empty() {
                    info!(probe = self.batch.name(), alive = survivors.len(), "Batch liveness done.");
                    return survivors;
                }
                info!(probe = self.batch.name(), "Batch found no live hosts, checking one by one.");
            }
            Err(e) => {
                if e.is_absent() {
                    warn!("{} is not installed, checking hosts one by one.", self.batch.name());
                } else {
                    warn!(error = %e, "Batch liveness failed, checking hosts one by one.");
                }
                trace.record_error(self.batch.name(), &e);
            }
        }

        self.one_by_one(candidates, accepted, deadline, trace).await
    }

    async fn one_by_one(
        &self,
        candidates: &[String],
        accepted: &StatusCodes,
        deadline: Deadline,
        trace: &mut DebugTrace,
    ) -> Vec<String> {
        let name = self.slow.name().to_string();
        let mut seen = HashSet::new();
        let mut survivors = Vec::new();

        for candidate in candidates {
            if deadline.is_expired() {
                warn!(checked = seen.len(), "Deadline reached during liveness checks.");
                trace.record_error(&name, "stopped: deadline reached");
                break;
            }
            let host = match Target::parse(candidate) {
                Ok(host) => host,
                Err(e) => {
                    trace.record_error(&name, format!("skipping '{candidate}': {e}"));
                    continue;
                }
            };
            let key = host.key();
            if !seen.insert(key.clone()) {
                continue;
            }

            match tokio::time::timeout(deadline.remaining(), self.slow.status(&host)).await {
                Ok(Ok(code)) if accepted.contains(code) => {
                    debug!(host = %host, code, "Host is alive.");
                    survivors.push(key);
                }
                Ok(Ok(code)) => debug!(host = %host, code, "Status not accepted."),
                Ok(Err(e)) => trace.record_error(&name, format!("{host}: {e}")),
                Err(_) => trace.record_error(&name, format!("{host}: deadline reached")),
            }
        }
        survivors
    }
}

/// Candidate keys the batch reported with an accepted code, in reported order.
fn select(known: &HashSet<String>, live: Vec<LiveHost>, accepted: &StatusCodes) -> Vec<String> {
    let mut kept = HashSet::new();
    live.into_iter()
        .filter(|h| h.status.is_some_and(|code| accepted.contains(code)))
        .map(|h| h.host.to_ascii_lowercase())
        .filter(|key| known.contains(key) && kept.insert(key.clone()))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
