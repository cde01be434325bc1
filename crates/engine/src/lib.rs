//! Focusboard timer engine.
//!
//! Owns the task store, the per-entity countdown timers, and the section-based
//! progress aggregation. All timer dispatch runs on one cooperative runtime;
//! every mutation writes through to storage before returning.

mod clock;
mod engine;
mod progress;
mod registry;
mod store;

pub use engine::{pause_timer, start_timer, Engine, SharedEngine, TickOutcome};
pub use progress::{ProgressAggregator, ProgressReport, SECTION_TIME, TOTAL_SECTIONS};
pub use registry::TimerRegistry;
pub use store::TaskStore;

use focusboard_core::{StepId, TaskId};
use focusboard_storage::StorageError;

/// Error type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by the engine's command surface.
///
/// Referential errors inside the tick path are never surfaced; stale ticks
/// self-cancel silently.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Name validation failed at the boundary
    #[error("name must not be empty")]
    EmptyName,

    /// Estimate validation failed at the boundary
    #[error("estimate must be a positive number of seconds")]
    InvalidEstimate,

    /// No task with the given id
    #[error("no task with id {0}")]
    UnknownTask(TaskId),

    /// No such step in the given task
    #[error("no step with id {step} in task {task}")]
    UnknownStep {
        /// Owning task
        task: TaskId,
        /// Missing step
        step: StepId,
    },

    /// The task already transitioned to complete
    #[error("task {0} is already complete")]
    AlreadyComplete(TaskId),

    /// Persistence gateway failure on a command path
    #[error(transparent)]
    Storage(#[from] StorageError),
}
