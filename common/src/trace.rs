//! # Debug Trace Recorder
//!
//! An append-only record of raw probe output and error strings. A disabled trace ignores
//! every write, so callers never need to check the debug flag themselves.
//!
//! Each chain owns its own trace during the parallel phase; traces are combined with
//! [`DebugTrace::absorb`] after the join.

use std::fmt::Display;

use serde::Serialize;

use crate::error::ParseFailure;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DebugTrace {
    #[serde(skip)]
    enabled: bool,
    raw_output: Vec<String>,
    parse_errors: Vec<String>,
    total_lines: usize,
    parsed_lines: usize,
}

impl DebugTrace {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record_command(&mut self, source: &str, command: &str) {
        if self.enabled {
            self.raw_output.push(format!("{source} command: {command}"));
        }
    }

    pub fn record_output(&mut self, source: &str, raw: &str) {
        if !self.enabled {
            return;
        }
        self.total_lines += raw.lines().count();
        self.raw_output.push(format!("{source} output:\n{raw}"));
    }

    pub fn record_error(&mut self, source: &str, error: impl Display) {
        if self.enabled {
            self.parse_errors.push(format!("{source}: {error}"));
        }
    }

    pub fn record_parse_failure(&mut self, source: &str, failure: &ParseFailure) {
        self.record_error(source, failure);
    }

    pub fn mark_parsed(&mut self, lines: usize) {
        if self.enabled {
            self.parsed_lines += lines;
        }
    }

    /// Appends another trace's records after this one's.
    pub fn absorb(&mut self, other: DebugTrace) {
        if !self.enabled {
            return;
        }
        self.raw_output.extend(other.raw_output);
        self.parse_errors.extend(other.parse_errors);
        self.total_lines += other.total_lines;
        self.parsed_lines += other.parsed_lines;
    }

    /// Hands the trace out only when it was enabled.
    pub fn finish(self) -> Option<DebugTrace> {
        self.enabled.then_some(self)
    }

    pub fn raw_output(&self) -> &[String] {
        &self.raw_output
    }

    pub fn parse_errors(&self) -> &[String] {
        &self.parse_errors
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn parsed_lines(&self) -> usize {
        self.parsed_lines
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
