//! nmap grepable output (`-oG -`).
//!
//! ```text
//! Host: 93.184.216.34 (example.com)	Status: Up
//! Host: 93.184.216.34 (example.com)	Ports: 22/filtered/tcp//ssh///, 80/open/tcp//http///
//! ```
//!
//! Yields `host_state` and one `port_<n>` observation per reported port. A host that is
//! not up yields nothing, so the chain treats the scan as empty.

use reckon_common::error::ParseFailure;
use reckon_common::models::Observation;
use reckon_common::ports::Normalizer;
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;

#[derive(Debug, Clone, Copy, Default)]
pub struct NmapGrepable;

impl Normalizer for NmapGrepable {
    type Entity = Observation;

    fn parse(&self, raw: &str, _target: &Target, trace: &mut DebugTrace) -> Vec<Observation> {
        let mut host_up = false;
        let mut ports: Vec<Observation> = Vec::new();

        for (idx, line) in raw.lines().enumerate() {
            if !line.starts_with("Host:") {
                continue;
            }
            trace.mark_parsed(1);

            if let Some(status) = field(line, "Status:") {
                host_up |= status.eq_ignore_ascii_case("up");
            }
            if let Some(list) = field(line, "Ports:") {
                host_up = true;
                for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                    match parse_port(entry) {
                        Some(obs) => ports.push(obs),
                        None => {
                            let failure = ParseFailure::new(idx + 1, format!("bad port entry '{entry}'"));
                            trace.record_parse_failure("nmap", &failure);
                        }
                    }
                }
            }
        }

        if !host_up {
            return Vec::new();
        }
        let mut observations = vec![Observation::new("host_state", "up")];
        observations.extend(ports);
        observations
    }
}

/// Returns the tab-delimited section that starts with `label`.
fn field<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.split('\t')
        .find_map(|part| part.trim().strip_prefix(label))
        .map(str::trim)
}

fn parse_port(entry: &str) -> Option<Observation> {
    let mut parts = entry.split('/');
    let port: u16 = parts.next()?.trim().parse().ok()?;
    let state = parts.next().filter(|s| !s.is_empty())?;
    Some(Observation::new(format!("port_{port}"), state))
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

    fn target() -> Target {
        Target::parse("example.com").unwrap()
    }

    #[test]
    fn reads_host_state_and_ports() {
        let raw = "# Nmap 7.94 scan initiated\n\
                   Host: 93.184.216.34 (example.com)\tStatus: Up\n\
                   Host: 93.184.216.34 (example.com)\tPorts: 22/filtered/tcp//ssh///, 80/open/tcp//http///, 443/open/tcp//https///\tIgnored State: closed (997)\n\
                   # Nmap done";
        let obs = NmapGrepable.parse(raw, &target(), &mut DebugTrace::disabled());
        assert_eq!(
            obs,
            [
                Observation::new("host_state", "up"),
                Observation::new("port_22", "filtered"),
                Observation::new("port_80", "open"),
                Observation::new("port_443", "open"),
            ]
        );
    }

    #[test]
    fn down_host_is_empty() {
        let raw = "Host: 10.0.0.9 ()\tStatus: Down\n";
        assert!(NmapGrepable.parse(raw, &target(), &mut DebugTrace::disabled()).is_empty());
    }
}
