//! Advisory progress for long-running refinement.
//!
//! Checkpoints are published on a `tokio::sync::watch` channel. Regressions
//! are dropped, so subscribers only ever see progress move forward. There is
//! no cancellation path.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Refinement phase, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefinePhase {
    Pending,
    Validating,
    EdgeAttention,
    TriangleAttention,
    Combining,
    Complete,
}

/// One progress observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCheckpoint {
    pub phase: RefinePhase,
    /// 0..=100.
    pub percent: u8,
}

impl ProgressCheckpoint {
    fn is_ahead_of(&self, other: &Self) -> bool {
        (self.phase, self.percent) > (other.phase, other.percent)
    }
}

/// Publishes monotonically increasing checkpoints.
#[derive(Debug)]
pub struct ProgressReporter {
    tx: watch::Sender<ProgressCheckpoint>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ProgressCheckpoint {
            phase: RefinePhase::Pending,
            percent: 0,
        });
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgressCheckpoint> {
        self.tx.subscribe()
    }

    /// Latest published checkpoint.
    pub fn current(&self) -> ProgressCheckpoint {
        *self.tx.borrow()
    }

    /// Publish `phase` at `percent` (clamped to 100). Ignored unless it moves
    /// progress forward.
    pub fn report(&self, phase: RefinePhase, percent: u8) -> bool {
        let next = ProgressCheckpoint {
            phase,
            percent: percent.min(100),
        };
        self.tx.send_if_modified(|current| {
            if next.is_ahead_of(current) {
                *current = next;
                true
            } else {
                false
            }
        })
    }
}
