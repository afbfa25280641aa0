use std::time::Duration;

use async_trait::async_trait;
use reckon_common::config::StatusCodes;
use reckon_common::error::ProbeError;
use reckon_common::ports::{BatchLivenessProbe, LiveHost};
use reckon_protocols::httpx;
use tracing::debug;

use crate::process::{ExternalTool, Invocation};

pub const NAME: &str = "httpx";

/// Seconds httpx waits for each host, and how often it retries one.
pub const PER_HOST_TIMEOUT_SECS: u64 = 3;
pub const RETRIES: u32 = 2;

/// ProjectDiscovery httpx, fed the whole candidate list on stdin.
#[derive(Debug, Clone)]
pub struct Httpx {
    tool: ExternalTool,
}

impl Httpx {
    pub fn new() -> Self {
        Self::with_program(NAME)
    }

    /// Some distributions ship a python `httpx` client under the same name; this lets the
    /// caller point at the ProjectDiscovery binary explicitly.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            tool: ExternalTool::new(program),
        }
    }

    pub fn arguments(accepted: &StatusCodes) -> Vec<String> {
        vec![
            "-sc".into(),
            "-nc".into(),
            "-silent".into(),
            "-mc".into(),
            accepted.to_string(),
            "-timeout".into(),
            PER_HOST_TIMEOUT_SECS.to_string(),
            "-retry".into(),
            RETRIES.to_string(),
        ]
    }
}

impl Default for Httpx {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BatchLivenessProbe for Httpx {
    fn name(&self) -> &str {
        NAME
    }

    async fn probe_batch(
        &self,
        candidates: &[String],
        accepted: &StatusCodes,
        timeout: Duration,
    ) -> Result<Vec<LiveHost>, ProbeError> {
        let mut input = candidates.join("\n");
        input.push('\n');
        let invocation = Invocation::new(Self::arguments(accepted)).stdin(input);

        let output = self.tool.execute(invocation, timeout).await?
            .require_success(NAME)?
            .require_full_input(NAME)?;
        let live = httpx::parse(&output.stdout);
        debug!(candidates = candidates.len(), alive = live.len(), "httpx batch finished.");
        Ok(live)
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
