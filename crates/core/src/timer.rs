//! Timer state vocabulary shared between the registry and its callers.

use serde::{Deserialize, Serialize};

use crate::id::{StepId, TaskId};

/// Key for a timer slot: either a task's own countdown or one of its steps'.
///
/// Keeping the two namespaces in one key type lets a single registry own every
/// live timer without task and step ids colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKey {
    /// A task-level countdown
    Task(TaskId),
    /// A step-level countdown
    Step(StepId),
}

impl std::fmt::Display for TimerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task(id) => write!(f, "task {id}"),
            Self::Step(id) => write!(f, "step {id}"),
        }
    }
}

/// State of one timer slot.
///
/// A timer with no slot at all is "absent": nothing has ever been registered
/// for that entity. Exhaustion (remaining = 0) is represented as `Paused`; an
/// exhausted timer cannot resume on its own, only via an explicit start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    /// Registered but not ticking.
    Paused,
    /// Receiving one tick per second.
    Running,
}
