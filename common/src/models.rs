//! # Models
//!
//! * **[`outcome`]**: what one probe invocation produced.
//! * **[`entity`]**: normalized units of discovered information and their identity.
//! * **[`whois`]**: the structured WHOIS record.

pub mod entity;
pub mod outcome;
pub mod whois;

pub use entity::{Entity, FirewallState, Hostname, Observation, PathHit};
pub use outcome::ProbeOutcome;
pub use whois::WhoisRecord;
