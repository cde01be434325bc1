//! Events the engine emits - rendering is an external subscriber.

use serde::{Deserialize, Serialize};

use crate::id::TaskId;
use crate::timer::TimerKey;

/// A notification from the timer engine.
///
/// The engine never touches a display; anything that wants to show remaining
/// time or celebrate a milestone subscribes to these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A running timer ticked and its countdown changed.
    RemainingChanged {
        /// Which timer ticked
        key: TimerKey,
        /// Seconds left after the tick
        remaining: u64,
    },

    /// A countdown reached zero and its timer paused itself.
    TimerExhausted {
        /// Which timer ran out
        key: TimerKey,
    },

    /// A task transitioned incomplete → complete.
    TaskCompleted {
        /// The completed task
        id: TaskId,
    },

    /// A 30-minute progress section completed for the first time.
    SectionCompleted(Celebration),
}

/// One-time milestone notification for a newly completed progress section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Celebration {
    /// Section index in `0..TOTAL_SECTIONS`
    pub section: usize,

    /// Cumulative-time label for the milestone, e.g. "30 min" or "1 h 30 min"
    pub label: String,

    /// Congratulatory message picked for this section
    pub message: String,
}
