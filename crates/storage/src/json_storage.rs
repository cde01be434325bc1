//! JSON file storage implementation.
//!
//! Stores each logical key as one JSON file in a data directory - the native
//! analog of the browser's key/value local storage. Writes replace the whole
//! file; ticks are frequent but the payloads are small.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use focusboard_core::{ChatMessage, Step, Task, TaskId};
use tokio::fs;

use super::{Result, Storage};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    async fn write_key<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.key_path(key), json.as_bytes()).await?;
        Ok(())
    }

    async fn read_key<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match fs::read_to_string(self.key_path(key)).await {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_tasks(&mut self, tasks: &[Task]) -> Result<()> {
        self.write_key("tasks", &tasks).await
    }

    async fn load_tasks(&self) -> Result<Vec<Task>> {
        self.read_key("tasks").await
    }

    async fn save_breakdowns(&mut self, breakdowns: &BTreeMap<TaskId, Vec<Step>>) -> Result<()> {
        self.write_key("breakdowns", breakdowns).await
    }

    async fn load_breakdowns(&self) -> Result<BTreeMap<TaskId, Vec<Step>>> {
        self.read_key("breakdowns").await
    }

    async fn save_completed_sections(&mut self, sections: &BTreeSet<usize>) -> Result<()> {
        self.write_key("completedSections", sections).await
    }

    async fn load_completed_sections(&self) -> Result<BTreeSet<usize>> {
        self.read_key("completedSections").await
    }

    async fn save_chat_history(&mut self, history: &[ChatMessage]) -> Result<()> {
        self.write_key("chatHistory", &history).await
    }

    async fn load_chat_history(&self) -> Result<Vec<ChatMessage>> {
        self.read_key("chatHistory").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focusboard_core::TaskStatus;

    #[tokio::test]
    async fn missing_files_load_as_empty_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        assert!(storage.load_tasks().await.unwrap().is_empty());
        assert!(storage.load_breakdowns().await.unwrap().is_empty());
        assert!(storage.load_completed_sections().await.unwrap().is_empty());
        assert!(storage.load_chat_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tasks_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let mut task = Task::new(TaskId(1), "Write report", 600);
        task.remaining = 599;
        storage.save_tasks(&[task]).await.unwrap();

        let loaded = storage.load_tasks().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Write report");
        assert_eq!(loaded[0].remaining, 599);
        assert_eq!(loaded[0].status, TaskStatus::Incomplete);
    }

    #[tokio::test]
    async fn breakdowns_key_by_task_id_string() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        let mut breakdowns = BTreeMap::new();
        breakdowns.insert(
            TaskId(7),
            vec![Step::new(focusboard_core::StepId(8), "outline", 300)],
        );
        storage.save_breakdowns(&breakdowns).await.unwrap();

        // JSON object keys are strings, as the stored layout requires.
        let raw = tokio::fs::read_to_string(dir.path().join("breakdowns.json"))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("7").is_some());

        let loaded = storage.load_breakdowns().await.unwrap();
        assert_eq!(loaded[&TaskId(7)][0].name, "outline");
    }

    #[tokio::test]
    async fn legacy_pending_status_migrates_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        let raw = r#"[{"id": 3, "name": "old", "estimate": 60,
                       "remaining": 60, "status": "pending", "startTime": 0}]"#;
        tokio::fs::write(dir.path().join("tasks.json"), raw)
            .await
            .unwrap();

        let loaded = storage.load_tasks().await.unwrap();
        assert_eq!(loaded[0].status, TaskStatus::Incomplete);
    }
}
