//! # Operations
//!
//! One service per user-facing command. Each service owns the chains it runs, built from
//! injected probes so the pipeline can be exercised without any external tool, plus a
//! `from_config` constructor that wires in the real plugins.
//!
//! Every service follows the same shape:
//! 1. start an outer [`Deadline`] from `Config::timeout`,
//! 2. run its chains (fan-out, or a single chain),
//! 3. merge after the join,
//! 4. optionally filter, then complete.

use std::sync::Arc;

use reckon_common::config::Config;
use reckon_common::models::Entity;
use reckon_common::target::Target;

use crate::aggregate::AggregatedResult;
use crate::chain::FallbackChain;
use crate::deadline::Deadline;
use crate::fanout::fan_out;
use crate::merge::merge_outputs;

pub mod amass;
pub mod availability;
pub mod paths;
pub mod subdomains;
pub mod whois;

pub use amass::{AmassReport, AmassService};
pub use availability::{AvailabilityReport, AvailabilityService};
pub use paths::PathsService;
pub use subdomains::SubdomainService;
pub use whois::{WhoisReport, WhoisService};

/// Runs `chains` concurrently and merges their outputs into a fresh result.
pub(crate) async fn gather<E>(
    chains: &[Arc<FallbackChain<E>>],
    target: &Target,
    config: &Config,
    deadline: Deadline,
    collection: &'static str,
) -> AggregatedResult<E>
where
    E: Entity + Send + 'static,
{
    let outputs = fan_out(chains, target, deadline, config.debug).await;
    let mut result = AggregatedResult::new(target.clone(), config.debug).with_collection(collection);
    merge_outputs(&mut result, outputs);
    result
}

/// Runs one chain under a fresh deadline and merges its output.
pub(crate) async fn single<E>(
    chain: &FallbackChain<E>,
    target: &Target,
    config: &Config,
    collection: &'static str,
) -> AggregatedResult<E>
where
    E: Entity,
{
    let deadline = Deadline::after(config.timeout);
    let output = chain.run(target, deadline, config.debug).await;
    let mut result = AggregatedResult::new(target.clone(), config.debug).with_collection(collection);
    merge_outputs(&mut result, vec![output]);
    result
}
