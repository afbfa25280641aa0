use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reckon_common::error::ProbeError;

/// A private temporary directory, removed with everything in it when dropped.
///
/// Probes that need files (scripts, tool output) create one per run, so concurrent runs
/// never share paths.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn create(label: &str) -> io::Result<Self> {
        let suffix: u64 = rand::random();
        let path = env::temp_dir().join(format!("reckon-{label}-{suffix:016x}"));
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    /// Same as [`create`](Self::create), reporting failure against `tool`.
    pub fn for_tool(tool: &str) -> Result<Self, ProbeError> {
        Self::create(tool).map_err(|e| ProbeError::failure(tool, format!("scratch dir: {e}")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
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
