use std::fmt;

use serde::Serialize;

/// A normalized unit of discovered information.
///
/// Two entities with the same [`key`](Entity::key) are the same logical entity, whichever
/// source reported them. Keys are compared by exact string equality.
pub trait Entity {
    fn key(&self) -> String;
}

/// A discovered host name under the target domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hostname {
    pub name: String,
}

impl Hostname {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Entity for Hostname {
    fn key(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A web path that answered a brute-force request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathHit {
    pub path: String,
}

impl PathHit {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Entity for PathHit {
    fn key(&self) -> String {
        self.path.clone()
    }
}

/// How a host reacted to one kind of firewall test packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallState {
    Open,
    Filtered,
    Blocked,
    Partial,
}

impl fmt::Display for FirewallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FirewallState::Open => "open",
            FirewallState::Filtered => "filtered",
            FirewallState::Blocked => "blocked",
            FirewallState::Partial => "partial",
        };
        f.write_str(s)
    }
}

/// A named fact about a host, e.g. `port_443 = open` or `tcp_syn = filtered`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub name: String,
    pub value: String,
}

impl Observation {
    pub fn new(name: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }
}

impl Entity for Observation {
    fn key(&self) -> String {
        self.name.clone()
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
