//! # Fan-Out Coordinator
//!
//! Launches independent chains as tokio tasks and joins all of them before anything is
//! merged. Tasks share nothing: each owns its entity vector and its debug trace, both
//! handed back through the join handle.
//!
//! Handles are awaited in launch order, so the outputs (and therefore the merge order)
//! are deterministic whatever order the tasks finish in. A task that panics or outlives
//! the outer deadline contributes an empty output instead of failing the operation.

use std::sync::Arc;

use reckon_common::target::Target;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::chain::{ChainOutput, FallbackChain};
use crate::deadline::Deadline;

pub async fn fan_out<E>(
    chains: &[Arc<FallbackChain<E>>],
    target: &Target,
    deadline: Deadline,
    debug: bool,
) -> Vec<ChainOutput<E>>
where
    E: Send + 'static,
{
    let started = Instant::now();
    let handles: Vec<(String, JoinHandle<_>)> = chains
        .iter()
        .map(|chain| {
            let chain = Arc::clone(chain);
            let target = target.clone();
            let label = chain.label().to_string();
            let handle = tokio::spawn(async move {
                tokio::time::timeout(deadline.remaining(), chain.run(&target, deadline, debug)).await
            });
            (label, handle)
        })
        .collect();
    debug!(tasks = handles.len(), "Fan-out launched.");

    let mut outputs = Vec::with_capacity(handles.len());
    for (label, handle) in handles {
        let output = match handle.await {
            Ok(Ok(output)) => output,
            Ok(Err(_elapsed)) => {
                warn!(chain = %label, "Chain outlived the deadline and was cancelled.");
                ChainOutput::abandoned(label, debug, "cancelled: deadline reached", started.elapsed())
            }
            Err(e) => {
                warn!(chain = %label, error = %e, "Chain task did not finish.");
                let reason = format!("task failed: {e}");
                ChainOutput::abandoned(label, debug, &reason, started.elapsed())
            }
        };
        outputs.push(output);
    }
    outputs
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
