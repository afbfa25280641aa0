use std::time::{Duration, Instant};

use async_trait::async_trait;
use reckon_common::models::ProbeOutcome;
use reckon_common::ports::Probe;
use reckon_common::target::Target;

use crate::process::{ExternalTool, Invocation};

pub const NAME: &str = "nmap";
pub const PORTS: &str = "22,80,443";

/// Upper bound on the scan, whatever deadline the caller passes.
pub const SCAN_CAP: Duration = Duration::from_secs(10);

/// Aggressive-timing scan of the common service ports, grepable output on stdout.
#[derive(Debug, Clone)]
pub struct Nmap {
    tool: ExternalTool,
}

impl Nmap {
    pub fn new() -> Self {
        Self {
            tool: ExternalTool::new(NAME),
        }
    }

    fn invocation(target: &Target) -> Invocation {
        Invocation::new(["-p", PORTS, "-T5", "-oG", "-", target.as_str()])
    }
}

impl Default for Nmap {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for Nmap {
    fn name(&self) -> &str {
        NAME
    }

    fn describe(&self, target: &Target) -> String {
        self.tool.command_line(&Self::invocation(target))
    }

    async fn run(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let bounded = timeout.min(SCAN_CAP);
        let result = match self.tool.execute(Self::invocation(target), bounded).await {
            Ok(output) => output.require_success(NAME).map(|o| o.stdout),
            Err(e) => Err(e),
        };
        ProbeOutcome::from_result(NAME, result, started.elapsed())
    }
}
