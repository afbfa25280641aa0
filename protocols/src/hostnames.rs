//! Host name extraction from enumeration tool output.
//!
//! Two strategies are applied per line:
//! * **line-oriented**: a whole line that is a host name under the target,
//! * **token-oriented**: a host name embedded in log noise, found by splitting on
//!   whitespace and stripping bracket decoration from each token.

use std::collections::HashSet;

use reckon_common::error::ParseFailure;
use reckon_common::models::Hostname;
use reckon_common::ports::Normalizer;
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;

/// Printed by amass when it is done; never a host.
pub const ENUMERATION_FINISHED: &str = "The enumeration has finished";

const DECORATION: &[char] = &['[', ']', '(', ')', '{', '}', '<', '>'];

/// Line/token host name normalizer for theHarvester, recon-ng and amass output.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostnameLines;

impl Normalizer for HostnameLines {
    type Entity = Hostname;

    fn parse(&self, raw: &str, target: &Target, trace: &mut DebugTrace) -> Vec<Hostname> {
        extract(raw, target, trace)
    }
}

/// True when `candidate` is a strict subdomain of `target`.
///
/// Both sides are compared lower-cased; the candidate must end with `"." + target`.
pub fn is_subdomain_of(candidate: &str, target: &Target) -> bool {
    let candidate = candidate.to_ascii_lowercase();
    let suffix = format!(".{}", target.key());
    candidate.len() > suffix.len() && candidate.ends_with(&suffix)
}

pub fn extract(raw: &str, target: &Target, trace: &mut DebugTrace) -> Vec<Hostname> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut found: Vec<Hostname> = Vec::new();
    let mut parsed = 0;

    for (idx, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.contains(ENUMERATION_FINISHED) {
            continue;
        }
        parsed += 1;

        if !line.contains(char::is_whitespace) && is_subdomain_of(line, target) {
            push_candidate(line, idx + 1, &mut seen, &mut found, trace);
            continue;
        }

        for token in line.split_whitespace() {
            let token = token.trim_matches(DECORATION);
            if is_subdomain_of(token, target) {
                push_candidate(token, idx + 1, &mut seen, &mut found, trace);
            }
        }
    }

    trace.mark_parsed(parsed);
    found
}

fn push_candidate(
    candidate: &str,
    line: usize,
    seen: &mut HashSet<String>,
    found: &mut Vec<Hostname>,
    trace: &mut DebugTrace,
) {
    if let Err(e) = Target::parse(candidate) {
        let failure = ParseFailure::new(line, format!("rejected '{candidate}': {e}"));
        trace.record_parse_failure("hostnames", &failure);
        return;
    }
    if seen.insert(candidate.to_ascii_lowercase()) {
        found.push(Hostname::new(candidate));
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
