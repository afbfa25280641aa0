//! # Aggregated Result
//!
//! The single mutable value an operation builds. Only the merge step adds entities and
//! only the liveness filter removes them; everything else reads.
//!
//! The status moves strictly forward through [`Phase`]. An attempt to go back is ignored
//! and logged, so a result can never be re-opened once it has completed.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::{DateTime, SecondsFormat, Utc};
use reckon_common::models::Entity;
use reckon_common::target::Target;
use reckon_common::trace::DebugTrace;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Running,
    Joined,
    Merged,
    Filtered,
    Completed,
}

/// Entity key to the names of every source that reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    by_key: BTreeMap<String, BTreeSet<String>>,
}

impl Provenance {
    /// Records `source` for `key`. Returns whether the pair was new.
    pub fn add(&mut self, key: &str, source: &str) -> bool {
        self.by_key
            .entry(key.to_string())
            .or_default()
            .insert(source.to_string())
    }

    pub fn sources(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.by_key.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// How many entities each source contributed to.
    pub fn summary(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for source in self.by_key.values().flatten() {
            *counts.entry(source.clone()).or_insert(0) += 1;
        }
        counts
    }

    fn retain_keys(&mut self, keep: &HashSet<String>) {
        self.by_key.retain(|key, _| keep.contains(key));
    }
}

#[derive(Debug, Clone)]
pub struct AggregatedResult<E> {
    target: Target,
    collection: &'static str,
    entities: Vec<E>,
    index: HashMap<String, usize>,
    provenance: Provenance,
    phase: Phase,
    trace: DebugTrace,
    timestamp: DateTime<Utc>,
}

impl<E: Entity> AggregatedResult<E> {
    pub fn new(target: Target, debug: bool) -> Self {
        Self {
            target,
            collection: "entities",
            entities: Vec::new(),
            index: HashMap::new(),
            provenance: Provenance::default(),
            phase: Phase::Running,
            trace: DebugTrace::new(debug),
            timestamp: Utc::now(),
        }
    }

    /// Names the entity list in the serialized output, e.g. `subdomains`.
    pub fn with_collection(mut self, name: &'static str) -> Self {
        self.collection = name;
        self
    }

    /// Moves the status forward. Returns `false` and changes nothing if `next` is not
    /// strictly after the current phase.
    pub fn advance(&mut self, next: Phase) -> bool {
        if next <= self.phase {
            debug!(current = ?self.phase, requested = ?next, "Ignoring backwards phase change.");
            return false;
        }
        self.phase = next;
        true
    }

    /// Unions one source's entities into the result.
    ///
    /// An unseen key is appended and starts its provenance with `source`; a seen key only
    /// gains `source`. Order of first appearance is kept.
    pub fn absorb(&mut self, source: &str, entities: Vec<E>) {
        for entity in entities {
            let key = entity.key();
            if !self.index.contains_key(&key) {
                self.index.insert(key.clone(), self.entities.len());
                self.entities.push(entity);
            }
            self.provenance.add(&key, source);
        }
    }

    pub fn absorb_trace(&mut self, trace: DebugTrace) {
        self.trace.absorb(trace);
    }

    pub fn trace_mut(&mut self) -> &mut DebugTrace {
        &mut self.trace
    }

    /// Keeps only the entities whose key is in `survivors`, in `survivors` order, and
    /// prunes their provenance to match. Keys not present in the result are ignored.
    pub fn retain_ordered(&mut self, survivors: &[String]) {
        let mut slots: Vec<Option<E>> = std::mem::take(&mut self.entities)
            .into_iter()
            .map(Some)
            .collect();
        let index = std::mem::take(&mut self.index);

        for key in survivors {
            let Some(slot) = index.get(key).and_then(|&i| slots[i].take()) else {
                continue;
            };
            self.index.insert(key.clone(), self.entities.len());
            self.entities.push(slot);
        }

        let keep: HashSet<String> = self.index.keys().cloned().collect();
        self.provenance.retain_keys(&keep);
    }

    /// Final transition. Stamps the completion time.
    pub fn complete(mut self) -> Self {
        if self.advance(Phase::Completed) {
            self.timestamp = Utc::now();
        }
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    pub fn into_entities(self) -> Vec<E> {
        self.entities
    }

    pub fn count(&self) -> usize {
        self.entities.len()
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn sources_of(&self, key: &str) -> Vec<&str> {
        self.provenance
            .sources(key)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn trace(&self) -> &DebugTrace {
        &self.trace
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[derive(serde::Serialize)]
struct EntityView<'a, E> {
    #[serde(flatten)]
    entity: &'a E,
    sources: Vec<&'a str>,
}

impl<E: Entity + Serialize> Serialize for AggregatedResult<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let debug = self.trace.is_enabled();
        let mut state = serializer.serialize_struct("AggregatedResult", if debug { 7 } else { 6 })?;

        let entities: Vec<EntityView<'_, E>> = self
            .entities
            .iter()
            .map(|entity| EntityView {
                entity,
                sources: self.sources_of(&entity.key()),
            })
            .collect();

        state.serialize_field("target", &self.target)?;
        state.serialize_field(self.collection, &entities)?;
        state.serialize_field("count", &self.entities.len())?;
        state.serialize_field("sources", &self.provenance.summary())?;
        state.serialize_field("status", &self.phase)?;
        state.serialize_field("timestamp", &self.timestamp_rfc3339())?;
        if debug {
            state.serialize_field("debug", &self.trace)?;
        }
        state.end()
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
    use reckon_common::models::Hostname;

    fn hosts(names: &[&str]) -> Vec<Hostname> {
        names.iter().map(|n| Hostname::new(*n)).collect()
    }

    fn result() -> AggregatedResult<Hostname> {
        AggregatedResult::new(Target::parse("example.com").unwrap(), false)
    }

    #[test]
    fn phase_only_moves_forward() {
        let mut r = result();
        assert!(r.advance(Phase::Joined));
        assert!(r.advance(Phase::Merged));
        assert!(!r.advance(Phase::Joined));
        assert!(!r.advance(Phase::Merged));
        assert_eq!(r.phase(), Phase::Merged);

        let r = r.complete();
        assert_eq!(r.phase(), Phase::Completed);
    }

    #[test]
    fn retain_reorders_and_prunes_provenance() {
        let mut r = result();
        r.absorb("A", hosts(&["a.example.com", "b.example.com", "c.example.com"]));
        r.retain_ordered(&["c.example.com".into(), "zz.example.com".into(), "a.example.com".into()]);

        let names: Vec<&str> = r.entities().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["c.example.com", "a.example.com"]);
        let keys: Vec<&str> = r.provenance().keys().collect();
        assert_eq!(keys, ["a.example.com", "c.example.com"]);
    }

    #[test]
    fn retain_ignores_repeated_survivors() {
        let mut r = result();
        r.absorb("A", hosts(&["a.example.com"]));
        r.retain_ordered(&["a.example.com".into(), "a.example.com".into()]);
        assert_eq!(r.count(), 1);
    }

    #[test]
    fn serializes_entities_with_sources() {
        let mut r = result().with_collection("subdomains");
        r.absorb("A", hosts(&["api.example.com"]));
        r.absorb("B", hosts(&["api.example.com", "www.example.com"]));
        let r = r.complete();

        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["target"], "example.com");
        assert_eq!(json["count"], 2);
        assert_eq!(json["status"], "completed");
        assert_eq!(json["subdomains"][0]["name"], "api.example.com");
        assert_eq!(json["subdomains"][0]["sources"], serde_json::json!(["A", "B"]));
        assert_eq!(json["sources"]["B"], 2);
        assert!(json.get("debug").is_none());

        let stamp = json["timestamp"].as_str().unwrap();
        assert!(stamp.ends_with('Z'));
        assert_eq!(stamp.len(), "2025-03-01T00:00:00Z".len());
    }

    #[test]
    fn debug_section_only_when_enabled() {
        let mut r = AggregatedResult::<Hostname>::new(Target::parse("example.com").unwrap(), true);
        r.trace_mut().record_output("A", "api.example.com");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["debug"]["total_lines"], 1);
    }
}
