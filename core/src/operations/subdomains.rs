use std::sync::Arc;
use std::time::Duration;

use reckon_common::config::Config;
use reckon_common::models::Hostname;
use reckon_common::target::Target;
use reckon_plugins::{CrtSh, Harvester, HttpStatus, Httpx, ReconNg};
use reckon_protocols::{CrtShJson, HostnameLines};
use tracing::{info, info_span, Instrument};

use crate::aggregate::{AggregatedResult, Phase};
use crate::chain::FallbackChain;
use crate::deadline::Deadline;
use crate::liveness::LivenessCascade;
use crate::operations::gather;

/// Upper bound on the part of the outer deadline held back for liveness checks.
pub const LIVENESS_RESERVE_CAP: Duration = Duration::from_secs(60);

/// A quarter of the budget, at most [`LIVENESS_RESERVE_CAP`]. Sources that are still
/// running when the rest is used up are cut off, so candidates always get checked.
pub fn liveness_reserve(timeout: Duration) -> Duration {
    (timeout / 4).min(LIVENESS_RESERVE_CAP)
}

/// Subdomain enumeration from several independent sources, narrowed to live hosts.
pub struct SubdomainService {
    sources: Vec<Arc<FallbackChain<Hostname>>>,
    liveness: LivenessCascade,
}

impl SubdomainService {
    pub fn new(sources: Vec<FallbackChain<Hostname>>, liveness: LivenessCascade) -> Self {
        Self {
            sources: sources.into_iter().map(Arc::new).collect(),
            liveness,
        }
    }

    /// theHarvester, recon-ng and crt.sh in parallel, then httpx with a per-host fallback.
    pub fn from_config(config: &Config) -> Self {
        let lines = Arc::new(HostnameLines);
        let sources = vec![
            FallbackChain::new("theHarvester").link(Arc::new(Harvester::new(config.mode)), lines.clone()),
            FallbackChain::new("recon-ng").link(Arc::new(ReconNg::new(config.mode)), lines),
            FallbackChain::new("crt.sh").link(Arc::new(CrtSh::new()), Arc::new(CrtShJson)),
        ];
        let liveness = LivenessCascade::new(Arc::new(Httpx::new()), Arc::new(HttpStatus::new()));
        Self::new(sources, liveness)
    }

    pub async fn run(&self, target: &Target, config: &Config) -> AggregatedResult<Hostname> {
        let deadline = Deadline::after(config.timeout);
        let gathering = deadline.hold_back(liveness_reserve(config.timeout));

        let mut result = gather(&self.sources, target, config, gathering, "subdomains")
            .instrument(info_span!("gather", indicatif.pb_show = true))
            .await;
        info!(candidates = result.count(), "Sources joined and merged.");

        let candidates: Vec<String> = result.entities().iter().map(|h| h.name.clone()).collect();
        let survivors = self
            .liveness
            .filter(&candidates, &config.accepted_codes, deadline, result.trace_mut())
            .instrument(info_span!("liveness", indicatif.pb_show = true))
            .await;
        result.retain_ordered(&survivors);
        result.advance(Phase::Filtered);

        result.complete()
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
