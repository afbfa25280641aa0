//! Firewall behavior through four concurrent hping3 sub-probes.
//!
//! The sub-probes run under one `tokio::join!`, each with its own deadline, so a hung
//! sub-probe only ever costs its own slot. The combined outcome is always a success; a
//! sub-probe that could not run is written as an error section and classified
//! downstream.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reckon_common::models::ProbeOutcome;
use reckon_common::ports::Probe;
use reckon_common::target::Target;
use reckon_protocols::hping::section_header;
use tracing::debug;

use crate::process::{ExternalTool, Invocation};

pub const NAME: &str = "hping3";
pub const SUB_PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// Sub-probe names and their hping3 flags, in report order.
pub const SUB_PROBES: [(&str, &[&str]); 4] = [
    ("tcp_syn", &["-S", "-p", "80", "-c", "3"]),
    ("tcp_fin", &["-F", "-p", "80", "-c", "3"]),
    ("tcp_ack", &["-A", "-p", "80", "-c", "3"]),
    ("icmp_ping", &["-1", "-c", "3"]),
];

#[derive(Debug, Clone)]
pub struct Hping {
    tool: ExternalTool,
}

impl Hping {
    pub fn new() -> Self {
        Self {
            tool: ExternalTool::new(NAME),
        }
    }

    fn invocation(flags: &[&str], target: &Target) -> Invocation {
        Invocation::new(flags.iter().copied().chain([target.as_str()]))
    }

    async fn sub_probe(&self, name: &str, flags: &[&str], target: &Target, timeout: Duration) -> String {
        let result = match self.tool.execute(Self::invocation(flags, target), timeout).await {
            Ok(output) => output.require_success(NAME).map(|o| o.combined()),
            Err(e) => Err(e),
        };
        match result {
            Ok(body) => format!("{}\n{}", section_header(name, None), body.trim_end()),
            Err(e) => {
                debug!(sub_probe = name, error = %e, "hping3 sub-probe failed.");
                section_header(name, Some(e.to_string().as_str()))
            }
        }
    }
}

impl Default for Hping {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for Hping {
    fn name(&self) -> &str {
        NAME
    }

    fn describe(&self, target: &Target) -> String {
        SUB_PROBES
            .iter()
            .map(|(_, flags)| self.tool.command_line(&Self::invocation(flags, target)))
            .collect::<Vec<_>>()
            .join(" & ")
    }

    async fn run(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let each = timeout.min(SUB_PROBE_TIMEOUT);
        let [syn, fin, ack, icmp] = SUB_PROBES;

        let sections = tokio::join!(
            self.sub_probe(syn.0, syn.1, target, each),
            self.sub_probe(fin.0, fin.1, target, each),
            self.sub_probe(ack.0, ack.1, target, each),
            self.sub_probe(icmp.0, icmp.1, target, each),
        );

        let raw = [sections.0, sections.1, sections.2, sections.3].join("\n");
        ProbeOutcome::success(NAME, raw, started.elapsed())
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
