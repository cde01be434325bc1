//! Task and step records - the units of work the timers count down.

use serde::{Deserialize, Serialize};

use crate::id::{StepId, TaskId};

/// A top-level trackable unit of work with an estimate and a countdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, creation-ordered
    pub id: TaskId,

    /// Task name (non-empty)
    pub name: String,

    /// Estimated duration in seconds, immutable after creation
    pub estimate: u64,

    /// Seconds left on the countdown, `0 ..= estimate`
    pub remaining: u64,

    /// Current status
    pub status: TaskStatus,

    /// Creation timestamp, epoch milliseconds
    pub start_time: i64,
}

impl Task {
    /// Create a fresh task with a full countdown.
    pub fn new(id: TaskId, name: impl Into<String>, estimate: u64) -> Self {
        Self {
            id,
            name: name.into(),
            estimate,
            remaining: estimate,
            status: TaskStatus::Incomplete,
            start_time: crate::now_millis(),
        }
    }

    /// Whether this task's timer is allowed to run.
    pub fn is_incomplete(&self) -> bool {
        self.status == TaskStatus::Incomplete
    }
}

/// Task lifecycle status. The only transition is incomplete → complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Still being worked on; the timer may run.
    // Early snapshots stored this status as "pending".
    #[serde(rename = "incomplete", alias = "pending")]
    Incomplete,

    /// Done; counts toward aggregate progress.
    #[serde(rename = "complete")]
    Complete,
}

/// A sub-unit of a task's breakdown, timed independently.
///
/// Steps have no status field: completing a step means deleting it from its
/// task's breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Unique identifier within the owning task, creation-ordered
    pub id: StepId,

    /// Step name (non-empty)
    pub name: String,

    /// Estimated duration in seconds
    pub estimate: u64,

    /// Seconds left on the countdown
    pub remaining: u64,
}

impl Step {
    /// Create a fresh step with a full countdown.
    pub fn new(id: StepId, name: impl Into<String>, estimate: u64) -> Self {
        Self {
            id,
            name: name.into(),
            estimate,
            remaining: estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_starts_with_full_countdown() {
        let task = Task::new(TaskId(1), "Write report", 600);
        assert_eq!(task.remaining, task.estimate);
        assert!(task.is_incomplete());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&TaskStatus::Incomplete).unwrap();
        assert_eq!(json, "\"incomplete\"");
        let json = serde_json::to_string(&TaskStatus::Complete).unwrap();
        assert_eq!(json, "\"complete\"");
    }

    #[test]
    fn legacy_pending_status_loads_as_incomplete() {
        let status: TaskStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, TaskStatus::Incomplete);
    }

    #[test]
    fn task_json_uses_camel_case_start_time() {
        let task = Task::new(TaskId(42), "demo", 60);
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("startTime").is_some());
        assert!(value.get("start_time").is_none());
    }
}
