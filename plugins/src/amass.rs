use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reckon_common::config::Mode;
use reckon_common::error::ProbeError;
use reckon_common::models::ProbeOutcome;
use reckon_common::ports::Probe;
use reckon_common::target::Target;

use crate::process::{ExternalTool, Invocation};

pub const NAME: &str = "amass";

/// OWASP Amass subdomain enumeration.
#[derive(Debug, Clone)]
pub struct Amass {
    tool: ExternalTool,
    mode: Mode,
    wordlist: Option<PathBuf>,
    budget: Duration,
}

impl Amass {
    /// `budget` becomes amass's own `-timeout`; the deadline passed to `run` still bounds
    /// the process.
    pub fn new(mode: Mode, wordlist: Option<PathBuf>, budget: Duration) -> Self {
        Self {
            tool: ExternalTool::new(NAME),
            mode,
            wordlist,
            budget,
        }
    }

    /// Arguments passed to `amass`. Its `-timeout` is in whole minutes, rounded up.
    pub fn arguments(&self, target: &Target) -> Vec<String> {
        let mut args = vec!["enum".to_string(), "-d".to_string(), target.to_string()];
        match self.mode {
            Mode::Passive => args.push("-passive".into()),
            Mode::Active => {
                args.push("-active".into());
                args.push("-brute".into());
                if let Some(wordlist) = &self.wordlist {
                    args.push("-w".into());
                    args.push(wordlist.display().to_string());
                }
            }
        }
        let minutes = self.budget.as_secs().div_ceil(60).max(1);
        args.push("-timeout".into());
        args.push(minutes.to_string());
        args
    }
}

#[async_trait]
impl Probe for Amass {
    fn name(&self) -> &str {
        NAME
    }

    fn describe(&self, target: &Target) -> String {
        self.tool.command_line(&Invocation::new(self.arguments(target)))
    }

    async fn run(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let invocation = Invocation::new(self.arguments(target));
        let result: Result<String, ProbeError> = match self.tool.execute(invocation, timeout).await {
            Ok(output) => output.require_success(NAME).map(|o| o.stdout),
            Err(e) => Err(e),
        };
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
