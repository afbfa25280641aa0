use std::time::{Duration, Instant};

use async_trait::async_trait;
use reckon_common::error::ProbeError;
use reckon_common::models::ProbeOutcome;
use reckon_common::ports::Probe;
use reckon_common::target::Target;

use crate::process::{ExternalTool, Invocation};

pub const NAME: &str = "fping";
pub const ECHO_COUNT: &str = "3";

/// ICMP reachability via `fping -c 3 -q`.
#[derive(Debug, Clone)]
pub struct Fping {
    tool: ExternalTool,
}

impl Fping {
    pub fn new() -> Self {
        Self {
            tool: ExternalTool::new(NAME),
        }
    }

    fn invocation(target: &Target) -> Invocation {
        Invocation::new(["-c", ECHO_COUNT, "-q", target.as_str()])
    }
}

impl Default for Fping {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Probe for Fping {
    fn name(&self) -> &str {
        NAME
    }

    fn describe(&self, target: &Target) -> String {
        self.tool.command_line(&Self::invocation(target))
    }

    async fn run(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let result: Result<String, ProbeError> = match self.tool.execute(Self::invocation(target), timeout).await {
            // fping exits 1 when some echoes went unanswered and prints its `-q` summary
            // on stderr; only 2 and above mean the tool itself failed.
            Ok(output) if matches!(output.code, Some(0 | 1)) => Ok(output.combined()),
            Ok(output) => output.require_success(NAME).map(|o| o.combined()),
            Err(e) => Err(e),
        };
        ProbeOutcome::from_result(NAME, result, started.elapsed())
    }
}
