//! # Scan Target Model
//!
//! A target is a domain or host name. It is validated once, when it is parsed, so that
//! nothing downstream ever hands an unchecked string to an external tool.
//!
//! Accepted shape:
//! * non-empty and at most [`MAX_TARGET_LEN`] bytes,
//! * no whitespace anywhere,
//! * at least one dot and no empty label (`a..b.com`),
//! * no leading or trailing dot or hyphen.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub const MAX_TARGET_LEN: usize = 253;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("target is empty")]
    Empty,
    #[error("target is {0} bytes long, the limit is {MAX_TARGET_LEN}")]
    TooLong(usize),
    #[error("target contains whitespace")]
    Whitespace,
    #[error("target has no dot")]
    MissingDot,
    #[error("target contains an empty label")]
    EmptyLabel,
    #[error("target cannot start or end with '{0}'")]
    BadEdge(char),
}

/// A validated domain or host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn parse(s: &str) -> Result<Self, TargetError> {
        validate(s)?;
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased identity used for suffix matching and deduplication.
    pub fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn is_valid(s: &str) -> bool {
    validate(s).is_ok()
}

fn validate(s: &str) -> Result<(), TargetError> {
    if s.is_empty() {
        return Err(TargetError::Empty);
    }
    if s.len() > MAX_TARGET_LEN {
        return Err(TargetError::TooLong(s.len()));
    }
    if s.chars().any(char::is_whitespace) {
        return Err(TargetError::Whitespace);
    }
    if !s.contains('.') {
        return Err(TargetError::MissingDot);
    }
    for edge in ['.', '-'] {
        if s.starts_with(edge) || s.ends_with(edge) {
            return Err(TargetError::BadEdge(edge));
        }
    }
    if s.split('.').any(str::is_empty) {
        return Err(TargetError::EmptyLabel);
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
