//! Certificate transparency JSON from `crt.sh`.
//!
//! The response is an array of certificate entries. `name_value` holds one or more
//! newline-separated names, possibly wildcards.

use std::collections::HashSet;

use reckon_common::error::ParseFailure;
use reckon_common::models::Hostname;
use reckon_common::ports::Normalizer;
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;
use serde::Deserialize;

use crate::hostnames;

#[derive(Debug, Deserialize)]
struct CertEntry {
    #[serde(default)]
    name_value: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CrtShJson;

impl Normalizer for CrtShJson {
    type Entity = Hostname;

    fn parse(&self, raw: &str, target: &Target, trace: &mut DebugTrace) -> Vec<Hostname> {
        if raw.trim().is_empty() {
            return Vec::new();
        }

        let entries: Vec<CertEntry> = match serde_json::from_str(raw) {
            Ok(entries) => entries,
            Err(e) => {
                let failure = ParseFailure::new(e.line(), format!("invalid crt.sh json: {e}"));
                trace.record_parse_failure("crt.sh", &failure);
                return Vec::new();
            }
        };
        trace.mark_parsed(entries.len());

        let mut seen: HashSet<String> = HashSet::new();
        entries
            .iter()
            .flat_map(|entry| entry.name_value.lines())
            .map(|name| name.trim().trim_start_matches("*."))
            .filter(|name| hostnames::is_subdomain_of(name, target) && Target::parse(name).is_ok())
            .filter(|name| seen.insert(name.to_ascii_lowercase()))
            .map(Hostname::new)
            .collect()
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
