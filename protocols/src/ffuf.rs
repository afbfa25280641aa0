use std::collections::HashSet;

use reckon_common::models::PathHit;
use reckon_common::ports::Normalizer;
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;

/// ffuf silent/CSV output: the first column of every row is the matched word.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfufLines;

impl Normalizer for FfufLines {
    type Entity = PathHit;

    fn parse(&self, raw: &str, _target: &Target, trace: &mut DebugTrace) -> Vec<PathHit> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut hits = Vec::new();
        let mut parsed = 0;

        for line in raw.lines().map(str::trim) {
            if line.is_empty() || line.starts_with("input") || line.starts_with("FUZZ") {
                continue;
            }
            parsed += 1;
            let Some(word) = line.split(',').next().map(str::trim) else {
                continue;
            };
            if word.is_empty() || word.contains("error:") {
                continue;
            }
            if seen.insert(word) {
                hits.push(PathHit::new(word));
            }
        }

        trace.mark_parsed(parsed);
        hits
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
    fn keeps_first_column_and_skips_header() {
        let raw = "input,position,status_code\nadmin,1,301\nlogin,2,200\nadmin,3,301\nerror: timeout\n";
        let target = Target::parse("example.com").unwrap();
        let hits = FfufLines.parse(raw, &target, &mut DebugTrace::disabled());
        let paths: Vec<&str> = hits.iter().map(|h| h.path.as_str()).collect();
        assert_eq!(paths, ["admin", "login"]);
    }
}
