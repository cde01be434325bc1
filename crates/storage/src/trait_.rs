//! Storage trait abstraction.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use focusboard_core::{ChatMessage, Step, Task, TaskId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction over the dashboard's persisted keys.
///
/// Each method corresponds to one logical storage key: `tasks`, `breakdowns`,
/// `completedSections`, `chatHistory`. A load with nothing stored yet returns
/// the empty default, never an error.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Task snapshot ===

    /// Persist the full ordered task list.
    async fn save_tasks(&mut self, tasks: &[Task]) -> Result<()>;

    /// Load the task list, or an empty one.
    async fn load_tasks(&self) -> Result<Vec<Task>>;

    // === Breakdown snapshot ===

    /// Persist every task's step list, keyed by task id.
    async fn save_breakdowns(&mut self, breakdowns: &BTreeMap<TaskId, Vec<Step>>) -> Result<()>;

    /// Load the breakdown map, or an empty one.
    async fn load_breakdowns(&self) -> Result<BTreeMap<TaskId, Vec<Step>>>;

    // === Section-completion record ===

    /// Persist the set of already-celebrated section indices.
    async fn save_completed_sections(&mut self, sections: &BTreeSet<usize>) -> Result<()>;

    /// Load the celebrated-section set, or an empty one.
    async fn load_completed_sections(&self) -> Result<BTreeSet<usize>>;

    // === Chat transcript ===

    /// Persist the assistant conversation.
    async fn save_chat_history(&mut self, history: &[ChatMessage]) -> Result<()>;

    /// Load the assistant conversation, or an empty one.
    async fn load_chat_history(&self) -> Result<Vec<ChatMessage>>;
}
