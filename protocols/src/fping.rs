use reckon_common::error::ParseFailure;
use reckon_common::models::Observation;
use reckon_common::ports::Normalizer;
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;

/// `fping -q -c N` summary, e.g. `example.com : xmt/rcv/%loss = 3/3/0%, min/avg/max = ...`.
///
/// A host that answered at least one echo yields `reachable = true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FpingSummary;

impl Normalizer for FpingSummary {
    type Entity = Observation;

    fn parse(&self, raw: &str, _target: &Target, trace: &mut DebugTrace) -> Vec<Observation> {
        for (idx, line) in raw.lines().enumerate() {
            let Some((_, stats)) = line.split_once("xmt/rcv/%loss =") else {
                continue;
            };
            trace.mark_parsed(1);
            let counts = stats.trim().split(',').next().unwrap_or_default();
            let mut parts = counts.split('/');
            let received = parts.nth(1).and_then(|r| r.trim().parse::<u32>().ok());

            match received {
                Some(0) => return Vec::new(),
                Some(_) => return vec![Observation::new("reachable", true)],
                None => {
                    let failure = ParseFailure::new(idx + 1, format!("unreadable summary '{line}'"));
                    trace.record_parse_failure("fping", &failure);
                }
            }
        }
        Vec::new()
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
