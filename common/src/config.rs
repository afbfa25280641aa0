use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_CODES: &str = "200,301,302,403";

/// Passive recon only queries third parties; active recon may touch the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Passive,
    Active,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Passive => f.write_str("passive"),
            Mode::Active => f.write_str("active"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodesError {
    #[error("no status codes given")]
    Empty,
    #[error("'{0}' is not an HTTP status code")]
    Invalid(String),
}

/// The HTTP status codes a liveness probe accepts as "alive".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCodes(BTreeSet<u16>);

impl StatusCodes {
    pub fn contains(&self, code: u16) -> bool {
        self.0.contains(&code)
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }
}

impl Default for StatusCodes {
    fn default() -> Self {
        Self([200, 301, 302, 403].into_iter().collect())
    }
}

impl FromStr for StatusCodes {
    type Err = CodesError;

    /// Parses a comma-separated list such as `"200, 301,403"`. Blank entries are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut codes = BTreeSet::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let code: u16 = part
                .parse()
                .map_err(|_| CodesError::Invalid(part.to_string()))?;
            if !(100..=599).contains(&code) {
                return Err(CodesError::Invalid(part.to_string()));
            }
            codes.insert(code);
        }
        if codes.is_empty() {
            return Err(CodesError::Empty);
        }
        Ok(Self(codes))
    }
}

impl fmt::Display for StatusCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.0.iter().map(u16::to_string).collect();
        f.write_str(&joined.join(","))
    }
}

/// Explicit configuration for one invocation. Passed into every service call.
#[derive(Debug, Clone)]
pub struct Config {
    /// Attaches raw probe output and parse errors to the result.
    ///
    /// When off, nothing is recorded at all.
    pub debug: bool,
    pub mode: Mode,
    /// Outer deadline of the whole invocation. Every probe deadline is clamped to it.
    pub timeout: Duration,
    pub accepted_codes: StatusCodes,
    pub wordlist: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            mode: Mode::Passive,
            timeout: Duration::from_secs(300),
            accepted_codes: StatusCodes::default(),
            wordlist: None,
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_codes() {
        let codes: StatusCodes = "200, 301,,403".parse().unwrap();
        assert!(codes.contains(200));
        assert!(codes.contains(301));
        assert!(codes.contains(403));
        assert!(!codes.contains(302));
        assert_eq!(codes.to_string(), "200,301,403");
    }

    #[test]
    fn default_matches_documented_list() {
        let parsed: StatusCodes = DEFAULT_CODES.parse().unwrap();
        assert_eq!(parsed, StatusCodes::default());
    }

    #[test]
    fn rejects_garbage_codes() {
        assert_eq!("".parse::<StatusCodes>(), Err(CodesError::Empty));
        assert_eq!(" , ".parse::<StatusCodes>(), Err(CodesError::Empty));
        assert_eq!(
            "200,abc".parse::<StatusCodes>(),
            Err(CodesError::Invalid("abc".into()))
        );
        assert_eq!(
            "200,999".parse::<StatusCodes>(),
            Err(CodesError::Invalid("999".into()))
        );
    }
}
