//! In-process storage backend.
//!
//! Keeps every key in memory behind a shared handle. Cloning yields another
//! handle onto the same data, which is how engine tests inspect what the
//! write-through path actually persisted. A write-failure switch simulates a
//! broken gateway.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use focusboard_core::{ChatMessage, Step, Task, TaskId};
use tokio::sync::Mutex;

use super::{Result, Storage, StorageError};

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    breakdowns: BTreeMap<TaskId, Vec<Step>>,
    completed_sections: BTreeSet<usize>,
    chat_history: Vec<ChatMessage>,
    fail_writes: bool,
}

/// Memory-backed storage, shared across clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail (or succeed again).
    pub async fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().await.fail_writes = fail;
    }

    async fn check_writable(&self) -> Result<()> {
        if self.inner.lock().await.fail_writes {
            Err(StorageError::Other("write failure injected".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn save_tasks(&mut self, tasks: &[Task]) -> Result<()> {
        self.check_writable().await?;
        self.inner.lock().await.tasks = tasks.to_vec();
        Ok(())
    }

    async fn load_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.inner.lock().await.tasks.clone())
    }

    async fn save_breakdowns(&mut self, breakdowns: &BTreeMap<TaskId, Vec<Step>>) -> Result<()> {
        self.check_writable().await?;
        self.inner.lock().await.breakdowns = breakdowns.clone();
        Ok(())
    }

    async fn load_breakdowns(&self) -> Result<BTreeMap<TaskId, Vec<Step>>> {
        Ok(self.inner.lock().await.breakdowns.clone())
    }

    async fn save_completed_sections(&mut self, sections: &BTreeSet<usize>) -> Result<()> {
        self.check_writable().await?;
        self.inner.lock().await.completed_sections = sections.clone();
        Ok(())
    }

    async fn load_completed_sections(&self) -> Result<BTreeSet<usize>> {
        Ok(self.inner.lock().await.completed_sections.clone())
    }

    async fn save_chat_history(&mut self, history: &[ChatMessage]) -> Result<()> {
        self.check_writable().await?;
        self.inner.lock().await.chat_history = history.to_vec();
        Ok(())
    }

    async fn load_chat_history(&self) -> Result<Vec<ChatMessage>> {
        Ok(self.inner.lock().await.chat_history.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_the_same_data() {
        let mut storage = MemoryStorage::new();
        let observer = storage.clone();

        storage
            .save_tasks(&[Task::new(TaskId(1), "demo", 60)])
            .await
            .unwrap();

        assert_eq!(observer.load_tasks().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn injected_failure_rejects_writes_but_keeps_reads() {
        let mut storage = MemoryStorage::new();
        storage
            .save_tasks(&[Task::new(TaskId(1), "demo", 60)])
            .await
            .unwrap();

        storage.set_fail_writes(true).await;
        assert!(storage.save_tasks(&[]).await.is_err());
        assert_eq!(storage.load_tasks().await.unwrap().len(), 1);
    }
}
