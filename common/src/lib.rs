//! # Reckon Common
//!
//! Types shared by every layer of the workspace:
//!
//! * **[`target`]**: the validated scan target.
//! * **[`config`]**: explicit per-invocation configuration.
//! * **[`error`]**: the probe failure taxonomy.
//! * **[`models`]**: probe outcomes and normalized entities.
//! * **[`ports`]**: the traits external capabilities are plugged in through.
//! * **[`trace`]**: the optional debug trace.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod target;
pub mod trace;

/// Logs a positive outcome. Rendered with its own symbol by the CLI formatter.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "reckon::success", $($arg)*)
    };
}
