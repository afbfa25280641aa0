use std::time::Duration;

use tokio::time::Instant;

/// The outer deadline of one invocation.
///
/// Every inner budget is clamped to what is left of it, so no probe can outlive the
/// operation that launched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    pub fn clamp(&self, inner: Duration) -> Duration {
        inner.min(self.remaining())
    }

    /// An earlier deadline that leaves `reserve` of this one for a later stage.
    pub fn hold_back(&self, reserve: Duration) -> Self {
        let now = Instant::now();
        let at = self.at.checked_sub(reserve).map_or(now, |at| at.max(now));
        Self { at: at.min(self.at) }
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
