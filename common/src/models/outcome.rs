use std::time::Duration;

use crate::error::ProbeError;

/// The immutable result of one probe invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    source: String,
    raw: String,
    elapsed: Duration,
    error: Option<ProbeError>,
}

impl ProbeOutcome {
    pub fn success(source: impl Into<String>, raw: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            source: source.into(),
            raw: raw.into(),
            elapsed,
            error: None,
        }
    }

    pub fn failure(source: impl Into<String>, error: ProbeError, elapsed: Duration) -> Self {
        Self {
            source: source.into(),
            raw: String::new(),
            elapsed,
            error: Some(error),
        }
    }

    /// Builds an outcome from a probe result, keeping whatever output was captured.
    pub fn from_result(
        source: impl Into<String>,
        result: Result<String, ProbeError>,
        elapsed: Duration,
    ) -> Self {
        match result {
            Ok(raw) => Self::success(source, raw, elapsed),
            Err(error) => Self::failure(source, error, elapsed),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn error(&self) -> Option<&ProbeError> {
        self.error.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The tool ran cleanly but printed nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.is_success() && self.raw.trim().is_empty()
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
