//! Pre-engagement availability check.
//!
//! Three independent chains run in parallel: ICMP reachability (fping), firewall
//! behavior (hping3 sub-probes) and a capped port scan (nmap). The host counts as
//! available when either fping or nmap saw it.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reckon_common::config::Config;
use reckon_common::models::Observation;
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;
use reckon_plugins::{Fping, Hping, Nmap};
use reckon_protocols::{FpingSummary, HpingSections, NmapGrepable};
use serde::Serialize;
use tracing::{info_span, warn, Instrument};

use crate::aggregate::{AggregatedResult, Phase};
use crate::chain::{ChainOutput, FallbackChain};
use crate::deadline::Deadline;
use crate::fanout::fan_out;
use crate::merge::merge_outputs;

pub const FPING_TIMEOUT: Duration = Duration::from_secs(10);
pub const NMAP_TIMEOUT: Duration = Duration::from_secs(10);

pub const ROOT_WARNING: &str = "not running as root: hping3 and nmap results may be incomplete";

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityReport {
    pub target: Target,
    pub is_available: bool,
    pub response_time_ms: f64,
    pub firewall_rules: BTreeMap<String, String>,
    pub methods_used: Vec<String>,
    pub status: Phase,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugTrace>,
}

pub struct AvailabilityService {
    reachability: Arc<FallbackChain<Observation>>,
    firewall: Arc<FallbackChain<Observation>>,
    ports: Arc<FallbackChain<Observation>>,
    privileged: bool,
}

impl AvailabilityService {
    /// `privileged` says whether raw-socket tools can be expected to work.
    pub fn new(
        reachability: FallbackChain<Observation>,
        firewall: FallbackChain<Observation>,
        ports: FallbackChain<Observation>,
        privileged: bool,
    ) -> Self {
        Self {
            reachability: Arc::new(reachability),
            firewall: Arc::new(firewall),
            ports: Arc::new(ports),
            privileged,
        }
    }

    pub fn from_config(_config: &Config) -> Self {
        Self::new(
            FallbackChain::new("fping").link_with_timeout(
                Arc::new(Fping::new()),
                Arc::new(FpingSummary),
                FPING_TIMEOUT,
            ),
            FallbackChain::new("hping3").link(Arc::new(Hping::new()), Arc::new(HpingSections)),
            FallbackChain::new("nmap").link_with_timeout(
                Arc::new(Nmap::new()),
                Arc::new(NmapGrepable),
                NMAP_TIMEOUT,
            ),
            is_root::is_root(),
        )
    }

    pub async fn run(&self, target: &Target, config: &Config) -> AvailabilityReport {
        let mut warnings = Vec::new();
        if !self.privileged {
            warn!("{ROOT_WARNING}");
            warnings.push(ROOT_WARNING.to_string());
        }

        let deadline = Deadline::after(config.timeout);
        let chains = [
            Arc::clone(&self.reachability),
            Arc::clone(&self.firewall),
            Arc::clone(&self.ports),
        ];
        let outputs = fan_out(&chains, target, deadline, config.debug)
            .instrument(info_span!("availability", indicatif.pb_show = true))
            .await;

        let mut report = AvailabilityReport {
            target: target.clone(),
            is_available: false,
            response_time_ms: 0.0,
            firewall_rules: BTreeMap::new(),
            methods_used: Vec::new(),
            status: Phase::Running,
            timestamp: String::new(),
            warnings,
            debug: None,
        };
        if let [reach, firewall, ports] = outputs.as_slice() {
            apply_reachability(&mut report, reach);
            apply_firewall(&mut report, firewall);
            apply_ports(&mut report, ports);
        }

        let mut result = AggregatedResult::new(target.clone(), config.debug);
        merge_outputs(&mut result, outputs);
        let result = result.complete();

        report.status = result.phase();
        report.timestamp = result.timestamp_rfc3339();
        report.debug = result.trace().clone().finish();
        report
    }
}

fn apply_reachability(report: &mut AvailabilityReport, output: &ChainOutput<Observation>) {
    let Some(source) = &output.source else {
        return;
    };
    report.is_available = true;
    report.methods_used.push(source.clone());
    if let Some(attempt) = output.attempt(source) {
        report.response_time_ms = attempt.elapsed.as_secs_f64() * 1000.0;
    }
}

fn apply_firewall(report: &mut AvailabilityReport, output: &ChainOutput<Observation>) {
    let Some(source) = &output.source else {
        return;
    };
    for obs in &output.entities {
        report.firewall_rules.insert(obs.name.clone(), obs.value.clone());
    }
    report.methods_used.push(source.clone());
}

fn apply_ports(report: &mut AvailabilityReport, output: &ChainOutput<Observation>) {
    let Some(source) = &output.source else {
        return;
    };
    report.is_available = true;
    report.methods_used.push(source.clone());
    for obs in &output.entities {
        report.firewall_rules.insert(obs.name.clone(), obs.value.clone());
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
