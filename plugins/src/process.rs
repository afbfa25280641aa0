//! # External Tool Runner
//!
//! Every command-line capability goes through [`ExternalTool`]. It resolves the binary on
//! `PATH` before spawning, so a missing tool surfaces as
//! [`ProbeError::CapabilityAbsent`] instead of a spawn error, and it bounds the wait with
//! `tokio::time::timeout`. The child is spawned with `kill_on_drop`, so an elapsed
//! deadline drops the wait future and kills the process with it.

use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use reckon_common::error::ProbeError;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Arguments, optional stdin and working directory for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    args: Vec<String>,
    stdin: Option<String>,
    cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Captured output of a child that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    /// Set when the input could not be written in full, e.g. the child closed stdin early.
    pub stdin_error: Option<String>,
}

impl ToolOutput {
    pub fn succeeded(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&self.stderr);
        }
        text
    }

    /// Turns a nonzero exit into [`ProbeError::ProbeFailure`].
    pub fn require_success(self, tool: &str) -> Result<Self, ProbeError> {
        if self.succeeded() {
            return Ok(self);
        }
        let status = match self.code {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
        };
        let detail = match first_line(&self.stderr) {
            Some(line) => format!("{status}: {line}"),
            None => status,
        };
        Err(ProbeError::failure(tool, detail))
    }

    /// Turns a short stdin write into [`ProbeError::ProbeFailure`]. The child only saw
    /// part of its input, so an empty answer would be meaningless.
    pub fn require_full_input(self, tool: &str) -> Result<Self, ProbeError> {
        match &self.stdin_error {
            Some(e) => Err(ProbeError::failure(tool, format!("writing stdin failed: {e}"))),
            None => Ok(self),
        }
    }
}

/// A command-line tool invoked by name.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: String,
}

impl ExternalTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn locate(&self) -> Result<PathBuf, ProbeError> {
        find_in_path(&self.program).ok_or_else(|| ProbeError::absent(&self.program))
    }

    pub fn is_installed(&self) -> bool {
        self.locate().is_ok()
    }

    /// The invocation as a shell-like string, for the debug trace.
    pub fn command_line(&self, invocation: &Invocation) -> String {
        std::iter::once(self.program.as_str())
            .chain(invocation.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the tool and waits at most `timeout` for it to exit.
    ///
    /// A nonzero exit is still `Ok`; callers decide through
    /// [`ToolOutput::require_success`] whether it counts as a failure.
    pub async fn execute(
        &self,
        invocation: Invocation,
        timeout: Duration,
    ) -> Result<ToolOutput, ProbeError> {
        let binary = self.locate()?;
        debug!(tool = %self.program, command = %self.command_line(&invocation), "Launching tool.");

        let mut command = Command::new(&binary);
        command
            .args(&invocation.args)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &invocation.cwd {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => ProbeError::absent(&self.program),
            _ => ProbeError::failure(&self.program, format!("spawn failed: {e}")),
        })?;

        // Written from its own task so a child that fills its stdout before reading
        // stdin cannot deadlock the wait below.
        let writer = match (invocation.stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => Some(tokio::spawn(async move {
                pipe.write_all(input.as_bytes()).await
            })),
            _ => None,
        };

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Err(_elapsed) => {
                debug!(tool = %self.program, after = ?timeout, "Tool timed out and was killed.");
                Err(ProbeError::timeout(&self.program, timeout))
            }
            Ok(Err(e)) => Err(ProbeError::failure(&self.program, format!("wait failed: {e}"))),
            Ok(Ok(output)) => Ok(ToolOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                code: output.status.code(),
                stdin_error: self.finish_writer(writer).await,
            }),
        }
    }

    /// The child has exited, so the writer has either finished or hit a closed pipe.
    async fn finish_writer(&self, writer: Option<JoinHandle<std::io::Result<()>>>) -> Option<String> {
        let error = match writer?.await {
            Ok(Ok(())) => return None,
            Ok(Err(e)) => e.to_string(),
            Err(e) => format!("writer task failed: {e}"),
        };
        warn!(tool = %self.program, error = %error, "Could not write the full input to the tool.");
        Some(error)
    }
}

/// Resolves `program` the way a shell would: paths are checked directly, bare names
/// against every `PATH` entry.
pub fn find_in_path(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    if program.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(program);
        return is_executable(&path).then_some(path);
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|l| !l.is_empty())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
