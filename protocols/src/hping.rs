//! Firewall behavior from a set of hping3 sub-probes.
//!
//! The hping3 probe concatenates one section per sub-probe:
//!
//! ```text
//! [tcp_syn] ok
//! --- example.com hping statistic ---
//! 3 packets transmitted, 3 packets received, 0% packet loss
//! [tcp_fin] error: exited with status 1
//! ```
//!
//! A sub-probe that could not be launched or exited with an error is `blocked`.

use reckon_common::models::{FirewallState, Observation};
use reckon_common::ports::Normalizer;
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;

pub const OK_MARKER: &str = "ok";
pub const ERROR_MARKER: &str = "error:";

#[derive(Debug, Clone, Copy, Default)]
pub struct HpingSections;

impl Normalizer for HpingSections {
    type Entity = Observation;

    fn parse(&self, raw: &str, _target: &Target, trace: &mut DebugTrace) -> Vec<Observation> {
        let sections = split_sections(raw);
        trace.mark_parsed(sections.len());
        sections
            .into_iter()
            .map(|section| {
                let state = if section.failed {
                    FirewallState::Blocked
                } else {
                    classify(&section.body)
                };
                Observation::new(section.name, state)
            })
            .collect()
    }
}

/// Classifies the output of a sub-probe that completed.
pub fn classify(output: &str) -> FirewallState {
    if output.contains("100% packet loss") {
        FirewallState::Filtered
    } else if output.contains(" 0% packet loss") || output.starts_with("0% packet loss") {
        FirewallState::Open
    } else {
        FirewallState::Partial
    }
}

/// Renders the header line the hping3 probe writes before each sub-probe's output.
pub fn section_header(name: &str, error: Option<&str>) -> String {
    match error {
        Some(e) => format!("[{name}] {ERROR_MARKER} {e}"),
        None => format!("[{name}] {OK_MARKER}"),
    }
}

struct Section {
    name: String,
    failed: bool,
    body: String,
}

fn split_sections(raw: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    for line in raw.lines() {
        if let Some((name, status)) = parse_header(line) {
            sections.push(Section {
                name: name.to_string(),
                failed: status.starts_with(ERROR_MARKER),
                body: String::new(),
            });
        } else if let Some(current) = sections.last_mut() {
            current.body.push_str(line);
            current.body.push('\n');
        }
    }
    sections
}

fn parse_header(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('[')?;
    let (name, status) = rest.split_once(']')?;
    let status = status.trim();
    let is_header = !name.is_empty()
        && !name.contains(char::is_whitespace)
        && (status == OK_MARKER || status.starts_with(ERROR_MARKER));
    is_header.then_some((name, status))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
