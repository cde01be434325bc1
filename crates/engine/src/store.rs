//! The ordered task collection and its breakdowns.
//!
//! Pure data management: no I/O, no timers. The engine layers persistence and
//! timer reconciliation on top of these operations.

use std::collections::BTreeMap;

use focusboard_core::{IdGenerator, Step, StepId, Task, TaskId, TaskStatus};

use crate::{EngineError, Result};

/// Ordered collection of tasks, each owning zero-or-more breakdown steps.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    breakdowns: BTreeMap<TaskId, Vec<Step>>,
    ids: IdGenerator,
}

impl TaskStore {
    /// Build a store from a loaded snapshot.
    ///
    /// Reconciles the snapshot into a consistent state: remaining time is
    /// clamped to the estimate, and breakdowns whose owning task no longer
    /// exists are dropped. New ids continue after the highest loaded one.
    pub fn from_snapshot(mut tasks: Vec<Task>, mut breakdowns: BTreeMap<TaskId, Vec<Step>>) -> Self {
        for task in &mut tasks {
            task.remaining = task.remaining.min(task.estimate);
        }
        breakdowns.retain(|task_id, _| tasks.iter().any(|t| t.id == *task_id));
        for steps in breakdowns.values_mut() {
            for step in steps.iter_mut() {
                step.remaining = step.remaining.min(step.estimate);
            }
        }

        let floor = tasks
            .iter()
            .map(|t| t.id.0)
            .chain(breakdowns.values().flatten().map(|s| s.id.0))
            .max()
            .unwrap_or(0);

        Self {
            tasks,
            breakdowns,
            ids: IdGenerator::starting_after(floor),
        }
    }

    /// Create a task with a validated name and positive estimate (seconds).
    pub fn add_task(&mut self, name: &str, estimate: u64) -> Result<TaskId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::EmptyName);
        }
        if estimate == 0 {
            return Err(EngineError::InvalidEstimate);
        }

        let id = TaskId(self.ids.next_id());
        self.tasks.push(Task::new(id, name, estimate));
        Ok(id)
    }

    /// Add a step to an incomplete task's breakdown.
    pub fn add_step(&mut self, task_id: TaskId, name: &str, estimate: u64) -> Result<StepId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::EmptyName);
        }
        if estimate == 0 {
            return Err(EngineError::InvalidEstimate);
        }
        let task = self
            .task(task_id)
            .ok_or(EngineError::UnknownTask(task_id))?;
        if !task.is_incomplete() {
            return Err(EngineError::AlreadyComplete(task_id));
        }

        let id = StepId(self.ids.next_id());
        self.breakdowns
            .entry(task_id)
            .or_default()
            .push(Step::new(id, name, estimate));
        Ok(id)
    }

    /// Look up a task.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Look up a task mutably.
    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Look up a step anywhere in the store, along with its owning task id.
    pub fn step(&self, id: StepId) -> Option<(TaskId, &Step)> {
        self.breakdowns.iter().find_map(|(task_id, steps)| {
            steps.iter().find(|s| s.id == id).map(|s| (*task_id, s))
        })
    }

    /// Look up a step mutably, along with its owning task id.
    pub fn step_mut(&mut self, id: StepId) -> Option<(TaskId, &mut Step)> {
        self.breakdowns.iter_mut().find_map(|(task_id, steps)| {
            steps
                .iter_mut()
                .find(|s| s.id == id)
                .map(|s| (*task_id, s))
        })
    }

    /// Transition a task incomplete → complete.
    ///
    /// Returns the ids of the task's steps so the caller can reconcile their
    /// timers. The only valid source state is incomplete.
    pub fn complete_task(&mut self, id: TaskId) -> Result<Vec<StepId>> {
        let task = self
            .task_mut(id)
            .ok_or(EngineError::UnknownTask(id))?;
        if !task.is_incomplete() {
            return Err(EngineError::AlreadyComplete(id));
        }
        task.status = TaskStatus::Complete;

        Ok(self.step_ids(id))
    }

    /// Remove a task and its whole breakdown, returning the removed step ids.
    pub fn remove_task(&mut self, id: TaskId) -> Result<Vec<StepId>> {
        if self.task(id).is_none() {
            return Err(EngineError::UnknownTask(id));
        }
        self.tasks.retain(|t| t.id != id);
        let steps = self.breakdowns.remove(&id).unwrap_or_default();
        Ok(steps.into_iter().map(|s| s.id).collect())
    }

    /// Remove one step from a task's breakdown.
    pub fn remove_step(&mut self, task_id: TaskId, step_id: StepId) -> Result<()> {
        let steps = self
            .breakdowns
            .get_mut(&task_id)
            .ok_or(EngineError::UnknownTask(task_id))?;
        let before = steps.len();
        steps.retain(|s| s.id != step_id);
        if steps.len() == before {
            return Err(EngineError::UnknownStep {
                task: task_id,
                step: step_id,
            });
        }
        Ok(())
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.breakdowns.clear();
    }

    /// The ordered task list.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// A task's breakdown, empty if it has none.
    pub fn steps(&self, task_id: TaskId) -> &[Step] {
        self.breakdowns
            .get(&task_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Ids of a task's steps.
    pub fn step_ids(&self, task_id: TaskId) -> Vec<StepId> {
        self.steps(task_id).iter().map(|s| s.id).collect()
    }

    /// The full breakdown map, for persistence.
    pub fn breakdowns(&self) -> &BTreeMap<TaskId, Vec<Step>> {
        &self.breakdowns
    }

    /// Total estimated seconds across completed tasks.
    pub fn completed_seconds(&self) -> u64 {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Complete)
            .map(|t| t.estimate)
            .sum()
    }
}
