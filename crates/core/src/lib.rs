//! Focusboard core data models.
//!
//! This crate defines the records that the timer engine operates on: tasks,
//! their breakdown steps, timer state, and the events the engine emits.

#![warn(missing_docs)]

// Core identities
mod id;

// Task and breakdown records
mod task;

// Timer state machine vocabulary
mod timer;

// Engine notifications
mod event;

// Assistant transcript records
mod chat;

// Display helpers
mod format;

pub use id::{EntityId, IdGenerator, StepId, TaskId};
pub use task::{Step, Task, TaskStatus};
pub use timer::{TimerKey, TimerState};
pub use event::{Celebration, EngineEvent};
pub use chat::{ChatMessage, ChatRole};
pub use format::format_time;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
