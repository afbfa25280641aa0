//! # Merge & Dedup
//!
//! Runs after the join barrier, on the caller's task, so it needs no synchronization.
//! Identity is exact equality on [`Entity::key`]; normalizers are responsible for
//! producing canonical keys.

use reckon_common::models::Entity;
use reckon_common::target::Target;
use tracing::debug;

use crate::aggregate::{AggregatedResult, Phase};
use crate::chain::ChainOutput;

/// Unions `(source, entities)` batches, in the order given, into a fresh merged result.
pub fn merge<E, I, S>(target: Target, batches: I) -> AggregatedResult<E>
where
    E: Entity,
    I: IntoIterator<Item = (S, Vec<E>)>,
    S: AsRef<str>,
{
    let mut result = AggregatedResult::new(target, false);
    result.advance(Phase::Joined);
    for (source, entities) in batches {
        result.absorb(source.as_ref(), entities);
    }
    result.advance(Phase::Merged);
    result
}

/// Folds the joined chain outputs into `result`: entities first-seen in launch order,
/// traces appended in the same order.
pub fn merge_outputs<E: Entity>(result: &mut AggregatedResult<E>, outputs: Vec<ChainOutput<E>>) {
    result.advance(Phase::Joined);
    for output in outputs {
        let ChainOutput {
            label,
            source,
            entities,
            trace,
            ..
        } = output;
        if let Some(source) = source {
            debug!(chain = %label, source = %source, count = entities.len(), "Merging chain output.");
            result.absorb(&source, entities);
        }
        result.absorb_trace(trace);
    }
    result.advance(Phase::Merged);
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
    use reckon_common::models::Hostname;

    fn target() -> Target {
        Target::parse("example.com").unwrap()
    }

    fn hosts(names: &[&str]) -> Vec<Hostname> {
        names.iter().map(|n| Hostname::new(*n)).collect()
    }

    fn names(result: &AggregatedResult<Hostname>) -> Vec<String> {
        result.entities().iter().map(|h| h.name.clone()).collect()
    }

    #[test]
    fn two_sources_sharing_a_host() {
        let merged = merge(
            target(),
            [
                ("A", hosts(&["api.example.com"])),
                ("B", hosts(&["www.example.com", "api.example.com"])),
            ],
        );

        assert_eq!(names(&merged), ["api.example.com", "www.example.com"]);
        assert_eq!(merged.sources_of("api.example.com"), ["A", "B"]);
        assert_eq!(merged.sources_of("www.example.com"), ["B"]);
        assert_eq!(merged.phase(), Phase::Merged);
    }

    #[test]
    fn merging_a_batch_twice_changes_nothing() {
        let once = merge(target(), [("A", hosts(&["a.example.com", "b.example.com"]))]);
        let twice = merge(
            target(),
            [
                ("A", hosts(&["a.example.com", "b.example.com"])),
                ("A", hosts(&["a.example.com", "b.example.com"])),
            ],
        );
        assert_eq!(names(&once), names(&twice));
        assert_eq!(once.provenance(), twice.provenance());
    }

    #[test]
    fn keys_are_case_insensitive_for_hostnames() {
        let merged = merge(
            target(),
            [("A", hosts(&["API.example.com"])), ("B", hosts(&["api.example.com"]))],
        );
        assert_eq!(names(&merged), ["API.example.com"]);
        assert_eq!(merged.sources_of("api.example.com"), ["A", "B"]);
    }

    #[test]
    fn empty_inputs_merge_to_nothing() {
        let merged = merge(target(), Vec::<(&str, Vec<Hostname>)>::new());
        assert_eq!(merged.count(), 0);
        assert!(merged.provenance().is_empty());

        let merged = merge(target(), [("A", Vec::<Hostname>::new())]);
        assert_eq!(merged.count(), 0);
    }

    #[test]
    fn provenance_covers_exactly_the_entities() {
        let merged = merge(
            target(),
            [
                ("A", hosts(&["a.example.com", "b.example.com"])),
                ("B", hosts(&["c.example.com"])),
            ],
        );
        let keys: Vec<&str> = merged.provenance().keys().collect();
        let entity_keys: Vec<String> = merged.entities().iter().map(Entity::key).collect();
        assert_eq!(keys.len(), entity_keys.len());
        assert!(keys.iter().all(|k| entity_keys.iter().any(|e| e == k)));
    }
}
