//! Probe failure taxonomy.
//!
//! A clean run that produced nothing usable is *not* an error; it is a successful
//! [`ProbeOutcome`](crate::models::ProbeOutcome) with empty output.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The capability is not installed or cannot be invoked on this host.
    #[error("{tool} is not installed or not invokable")]
    CapabilityAbsent { tool: String },

    /// The bounded wait elapsed and the invocation was aborted.
    #[error("{tool} timed out after {after:?}")]
    Timeout { tool: String, after: Duration },

    /// The tool ran and reported an error.
    #[error("{tool} failed: {detail}")]
    ProbeFailure { tool: String, detail: String },
}

impl ProbeError {
    pub fn absent(tool: impl Into<String>) -> Self {
        Self::CapabilityAbsent { tool: tool.into() }
    }

    pub fn timeout(tool: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            tool: tool.into(),
            after,
        }
    }

    pub fn failure(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ProbeFailure {
            tool: tool.into(),
            detail: detail.into(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::CapabilityAbsent { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// A single line or record that did not match any expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct ParseFailure {
    pub line: usize,
    pub reason: String,
}

impl ParseFailure {
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}
