use std::fs;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reckon_common::config::Mode;
use reckon_common::error::ProbeError;
use reckon_common::models::ProbeOutcome;
use reckon_common::ports::Probe;
use reckon_common::target::Target;

use crate::process::{ExternalTool, Invocation};
use crate::scratch::ScratchDir;

pub const NAME: &str = "recon-ng";

const PASSIVE_MODULES: [&str; 3] = [
    "recon/domains-hosts/hackertarget",
    "recon/domains-hosts/crtsh",
    "recon/domains-hosts/virustotal",
];
const ACTIVE_MODULES: [&str; 1] = ["recon/domains-hosts/brute_hosts"];

/// Headless recon-ng driven by a resource script written to a scratch directory.
#[derive(Debug, Clone)]
pub struct ReconNg {
    tool: ExternalTool,
    mode: Mode,
}

impl ReconNg {
    pub fn new(mode: Mode) -> Self {
        Self {
            tool: ExternalTool::new(NAME),
            mode,
        }
    }

    pub fn script(&self, target: &Target) -> String {
        let mut script = format!("add domains {target}\n");
        let active: &[&str] = match self.mode {
            Mode::Passive => &[],
            Mode::Active => &ACTIVE_MODULES,
        };
        for module in PASSIVE_MODULES.iter().chain(active) {
            script.push_str(&format!("use {module}\nrun\n"));
        }
        script.push_str("show hosts\nexit\n");
        script
    }

    fn invocation(&self, target: &Target, script_path: &str) -> Invocation {
        let workspace = format!("reckon_{}", target.key().replace('.', "_"));
        Invocation::new(["-r", script_path, "-w", workspace.as_str()])
    }
}

#[async_trait]
impl Probe for ReconNg {
    fn name(&self) -> &str {
        NAME
    }

    fn describe(&self, target: &Target) -> String {
        self.tool.command_line(&self.invocation(target, "recon.script"))
    }

    async fn run(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let result: Result<String, ProbeError> = async {
            let scratch = ScratchDir::for_tool(NAME)?;
            let script_path = scratch.file("recon.script");
            fs::write(&script_path, self.script(target))
                .map_err(|e| ProbeError::failure(NAME, format!("writing script: {e}")))?;

            let invocation = self
                .invocation(target, &script_path.to_string_lossy())
                .current_dir(scratch.path());
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
