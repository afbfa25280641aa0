use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reckon_common::error::ProbeError;
use reckon_common::models::ProbeOutcome;
use reckon_common::ports::Probe;
use reckon_common::target::Target;

use crate::process::{ExternalTool, Invocation};

pub const NAME: &str = "ffuf";
pub const MATCH_CODES: &str = "200,204,301,302,307,401,403";

/// Path brute force against `https://<target>/FUZZ`.
#[derive(Debug, Clone)]
pub struct Ffuf {
    tool: ExternalTool,
    wordlist: PathBuf,
}

impl Ffuf {
    pub fn new(wordlist: impl Into<PathBuf>) -> Self {
        Self {
            tool: ExternalTool::new(NAME),
            wordlist: wordlist.into(),
        }
    }

    pub fn wordlist(&self) -> &Path {
        &self.wordlist
    }

    fn invocation(target: &Target, wordlist: &Path) -> Invocation {
        let url = format!("https://{target}/FUZZ");
        let wordlist = wordlist.display().to_string();
        Invocation::new(["-u", url.as_str(), "-w", wordlist.as_str(), "-mc", MATCH_CODES, "-s"])
    }

    /// ffuf resolves the wordlist against its own working directory.
    fn absolute_wordlist(&self) -> Result<PathBuf, ProbeError> {
        if !self.wordlist.is_file() {
            return Err(ProbeError::failure(
                NAME,
                format!("wordlist {} does not exist", self.wordlist.display()),
            ));
        }
        std::path::absolute(&self.wordlist)
            .map_err(|e| ProbeError::failure(NAME, format!("wordlist path: {e}")))
    }
}

#[async_trait]
impl Probe for Ffuf {
    fn name(&self) -> &str {
        NAME
    }

    fn describe(&self, target: &Target) -> String {
        self.tool.command_line(&Self::invocation(target, &self.wordlist))
    }

    async fn run(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let result = match self.absolute_wordlist() {
            Ok(wordlist) => match self.tool.execute(Self::invocation(target, &wordlist), timeout).await {
                Ok(output) => output.require_success(NAME).map(|o| o.stdout),
                Err(e) => Err(e),
            },
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
