use std::time::{Duration, Instant};

use async_trait::async_trait;
use reckon_common::config::Mode;
use reckon_common::error::ProbeError;
use reckon_common::models::ProbeOutcome;
use reckon_common::ports::Probe;
use reckon_common::target::Target;

use crate::process::{ExternalTool, Invocation};
use crate::scratch::ScratchDir;

pub const NAME: &str = "theHarvester";

/// Search engines queried in passive mode; active mode asks for every source.
pub const PASSIVE_SOURCES: &str =
    "crtsh,bing,duckduckgo,yahoo,virustotal,shodan,netlas,hunter,dnsdumpster";

/// OSINT host harvesting through theHarvester.
#[derive(Debug, Clone)]
pub struct Harvester {
    tool: ExternalTool,
    mode: Mode,
}

impl Harvester {
    pub fn new(mode: Mode) -> Self {
        Self {
            tool: ExternalTool::new(NAME),
            mode,
        }
    }

    fn invocation(&self, target: &Target) -> Invocation {
        let sources = match self.mode {
            Mode::Passive => PASSIVE_SOURCES,
            Mode::Active => "all",
        };
        Invocation::new(["-d", target.as_str(), "-b", sources])
    }
}

#[async_trait]
impl Probe for Harvester {
    fn name(&self) -> &str {
        NAME
    }

    fn describe(&self, target: &Target) -> String {
        self.tool.command_line(&self.invocation(target))
    }

    async fn run(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let result: Result<String, ProbeError> = async {
            // theHarvester drops report files into its working directory.
            let scratch = ScratchDir::for_tool(NAME)?;
            let invocation = self.invocation(target).current_dir(scratch.path());
            let output = self.tool.execute(invocation, timeout).await?;
            Ok(output.require_success(NAME)?.combined())
        }
        .await;
        ProbeOutcome::from_result(NAME, result, started.elapsed())
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
