//! # Reckon Core
//!
//! The source aggregation and fallback engine, and the operations built on it.
//!
//! Control flow of every operation:
//!
//! ```text
//! fan_out ──► chain ──► probe ──► normalizer ─┐
//!        ├──► chain ──► ...                  ├─► join ─► merge ─► [liveness] ─► complete
//!        └──► chain ──► ...                  ┘
//! ```
//!
//! * **[`chain`]**: ordered fallback over probes serving one goal.
//! * **[`fanout`]**: one task per chain, joined in launch order.
//! * **[`merge`]**: first-seen union with provenance.
//! * **[`liveness`]**: batch liveness with a per-host fallback.
//! * **[`operations`]**: the services behind each command.

pub mod aggregate;
pub mod chain;
pub mod deadline;
pub mod fanout;
pub mod indicators;
pub mod liveness;
pub mod merge;
pub mod operations;

pub use aggregate::{AggregatedResult, Phase, Provenance};
pub use chain::{ChainOutput, FallbackChain};
pub use deadline::Deadline;
pub use liveness::LivenessCascade;
