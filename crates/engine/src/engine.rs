//! The owned engine aggregate.
//!
//! One `Engine` owns the task store, the timer registry, the progress
//! aggregator, and the persistence gateway. It is created by `Engine::load`
//! and shared behind `Arc<Mutex<_>>`; the tick dispatchers hold only weak
//! handles. Registry slots are reconciled on every store mutation so they
//! never outlive the entity they refer to.

use std::sync::Arc;

use focusboard_core::{EngineEvent, Step, StepId, Task, TaskId, TimerKey, TimerState};
use focusboard_storage::Storage;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use crate::clock;
use crate::progress::{ProgressAggregator, ProgressReport};
use crate::registry::TimerRegistry;
use crate::store::TaskStore;
use crate::Result;

/// Shared handle to the engine.
pub type SharedEngine = Arc<Mutex<Engine>>;

/// What a tick dispatcher should do after delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking.
    Continue,
    /// The timer paused itself or its entity is gone; stop dispatching.
    Stop,
}

/// The task & step timer engine.
pub struct Engine {
    store: TaskStore,
    registry: TimerRegistry,
    aggregator: ProgressAggregator,
    storage: Box<dyn Storage>,
    events: mpsc::UnboundedSender<EngineEvent>,
}

impl Engine {
    /// Load persisted state and build the shared engine plus its event stream.
    ///
    /// Incomplete tasks and their steps get paused timer slots; completed
    /// tasks get none, so their countdowns can never be started.
    pub async fn load<S: Storage + 'static>(
        storage: S,
    ) -> Result<(SharedEngine, mpsc::UnboundedReceiver<EngineEvent>)> {
        let tasks = storage.load_tasks().await?;
        let breakdowns = storage.load_breakdowns().await?;
        let sections = storage.load_completed_sections().await?;

        let store = TaskStore::from_snapshot(tasks, breakdowns);
        let mut registry = TimerRegistry::default();
        for task in store.tasks() {
            if task.is_incomplete() {
                registry.register(TimerKey::Task(task.id));
                for step in store.steps(task.id) {
                    registry.register(TimerKey::Step(step.id));
                }
            }
        }

        let (events, receiver) = mpsc::unbounded_channel();
        let engine = Engine {
            store,
            registry,
            aggregator: ProgressAggregator::from_record(sections),
            storage: Box::new(storage),
            events,
        };
        Ok((Arc::new(Mutex::new(engine)), receiver))
    }

    // === Task commands ===

    /// Create a task. `estimate` is in seconds.
    pub async fn add_task(&mut self, name: &str, estimate: u64) -> Result<TaskId> {
        let id = self.store.add_task(name, estimate)?;
        self.registry.register(TimerKey::Task(id));
        self.persist_tasks().await?;
        Ok(id)
    }

    /// Transition a task incomplete → complete.
    ///
    /// Unregisters the task's timer and, since completion is terminal for the
    /// breakdown's countdowns too, each of its steps' timers. Triggers a
    /// progress recompute, which may fire celebrations.
    pub async fn complete_task(&mut self, id: TaskId) -> Result<ProgressReport> {
        let steps = self.store.complete_task(id)?;
        self.registry.unregister(TimerKey::Task(id));
        for step in steps {
            self.registry.unregister(TimerKey::Step(step));
        }
        self.persist_tasks().await?;
        let _ = self.events.send(EngineEvent::TaskCompleted { id });
        self.recompute().await
    }

    /// Delete a task, its steps, and every associated timer.
    pub async fn delete_task(&mut self, id: TaskId) -> Result<()> {
        let steps = self.store.remove_task(id)?;
        self.registry.unregister(TimerKey::Task(id));
        for step in steps {
            self.registry.unregister(TimerKey::Step(step));
        }
        self.persist_tasks().await?;
        self.persist_breakdowns().await?;
        Ok(())
    }

    /// Full reset: tasks, breakdowns, timers, and the celebration record.
    pub async fn clear_all(&mut self) -> Result<()> {
        self.registry.clear();
        self.store.clear();
        self.aggregator.clear();
        self.persist_tasks().await?;
        self.persist_breakdowns().await?;
        self.storage
            .save_completed_sections(self.aggregator.record())
            .await?;
        Ok(())
    }

    // === Step commands ===

    /// Add a step to an incomplete task's breakdown. `estimate` is in seconds.
    pub async fn add_step(&mut self, task_id: TaskId, name: &str, estimate: u64) -> Result<StepId> {
        let id = self.store.add_step(task_id, name, estimate)?;
        self.registry.register(TimerKey::Step(id));
        self.persist_breakdowns().await?;
        Ok(id)
    }

    /// Remove a step (step completion is deletion) and unregister its timer.
    pub async fn delete_step(&mut self, task_id: TaskId, step_id: StepId) -> Result<()> {
        self.store.remove_step(task_id, step_id)?;
        self.registry.unregister(TimerKey::Step(step_id));
        self.persist_breakdowns().await?;
        Ok(())
    }

    // === Timers ===

    /// Pause a running timer. Idempotent; absent or paused timers are left
    /// alone.
    pub fn pause(&mut self, key: TimerKey) {
        self.registry.pause(key);
    }

    /// Deliver one tick to a timer.
    ///
    /// Normally invoked once per second by the clock dispatcher, but callable
    /// directly to simulate time. Re-reads the entity from the store: a tick
    /// that lands after its entity was deleted or completed unregisters the
    /// slot and reports `Stop` instead of mutating anything.
    pub async fn tick(&mut self, key: TimerKey) -> TickOutcome {
        if !self.registry.is_running(key) {
            return TickOutcome::Stop;
        }

        enum Target {
            Gone,
            AlreadyExhausted,
            Ticked(u64),
        }

        let target = match key {
            TimerKey::Task(id) => match self.store.task_mut(id) {
                Some(task) if !task.is_incomplete() => Target::Gone,
                Some(task) if task.remaining == 0 => Target::AlreadyExhausted,
                Some(task) => {
                    task.remaining -= 1;
                    Target::Ticked(task.remaining)
                }
                None => Target::Gone,
            },
            TimerKey::Step(id) => {
                let owner_incomplete = match self.store.step(id) {
                    Some((task_id, _)) => self
                        .store
                        .task(task_id)
                        .is_some_and(Task::is_incomplete),
                    None => false,
                };
                if !owner_incomplete {
                    Target::Gone
                } else if let Some((_, step)) = self.store.step_mut(id) {
                    if step.remaining == 0 {
                        Target::AlreadyExhausted
                    } else {
                        step.remaining -= 1;
                        Target::Ticked(step.remaining)
                    }
                } else {
                    Target::Gone
                }
            }
        };

        match target {
            Target::Gone => {
                debug!(timer = %key, "stale tick; entity gone or complete");
                self.registry.unregister(key);
                TickOutcome::Stop
            }
            Target::AlreadyExhausted => {
                self.registry.finish(key);
                TickOutcome::Stop
            }
            Target::Ticked(remaining) => {
                // Per-tick ordering: mutate, persist, notify. A failed write
                // must not kill the loop; in-memory state carries forward to
                // the next successful write.
                let persisted = match key {
                    TimerKey::Task(_) => self.persist_tasks().await,
                    TimerKey::Step(_) => self.persist_breakdowns().await,
                };
                if let Err(e) = persisted {
                    warn!(timer = %key, error = %e, "tick persistence failed");
                }
                let _ = self
                    .events
                    .send(EngineEvent::RemainingChanged { key, remaining });

                if remaining == 0 {
                    self.registry.finish(key);
                    let _ = self.events.send(EngineEvent::TimerExhausted { key });
                    TickOutcome::Stop
                } else {
                    TickOutcome::Continue
                }
            }
        }
    }

    fn can_start(&self, key: TimerKey) -> bool {
        if self.registry.is_running(key) {
            return false;
        }
        match key {
            TimerKey::Task(id) => self.store.task(id).is_some_and(Task::is_incomplete),
            TimerKey::Step(id) => match self.store.step(id) {
                Some((task_id, _)) => self
                    .store
                    .task(task_id)
                    .is_some_and(Task::is_incomplete),
                None => false,
            },
        }
    }

    // === Progress ===

    /// Recompute aggregate progress from the store.
    ///
    /// Idempotent: sections that already celebrated never fire again. Newly
    /// completed sections are persisted to the record and emitted as
    /// celebration events.
    pub async fn recompute(&mut self) -> Result<ProgressReport> {
        let (report, celebrations) = self.aggregator.recompute(self.store.completed_seconds());
        if !celebrations.is_empty() {
            self.storage
                .save_completed_sections(self.aggregator.record())
                .await?;
            for celebration in celebrations {
                let _ = self.events.send(EngineEvent::SectionCompleted(celebration));
            }
        }
        Ok(report)
    }

    // === Queries ===

    /// The ordered task list.
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Look up one task.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.store.task(id)
    }

    /// A task's breakdown.
    pub fn steps(&self, task_id: TaskId) -> &[Step] {
        self.store.steps(task_id)
    }

    /// Timer state for a key; `None` means absent.
    pub fn timer_state(&self, key: TimerKey) -> Option<TimerState> {
        self.registry.state(key)
    }

    // === Teardown ===

    /// Persist every key. The load/save lifecycle bookend.
    pub async fn save_all(&mut self) -> Result<()> {
        self.persist_tasks().await?;
        self.persist_breakdowns().await?;
        self.storage
            .save_completed_sections(self.aggregator.record())
            .await?;
        Ok(())
    }

    async fn persist_tasks(&mut self) -> Result<()> {
        self.storage.save_tasks(self.store.tasks()).await?;
        Ok(())
    }

    async fn persist_breakdowns(&mut self) -> Result<()> {
        self.storage
            .save_breakdowns(self.store.breakdowns())
            .await?;
        Ok(())
    }
}

/// Start a timer.
///
/// A silent no-op when the entity is missing, its task is complete, or the
/// timer is already running. Otherwise the registry replaces any prior
/// dispatch source, keeping the at-most-one-source invariant.
pub async fn start_timer(engine: &SharedEngine, key: TimerKey) {
    let mut guard = engine.lock().await;
    if !guard.can_start(key) {
        return;
    }
    let ticker = clock::spawn_ticker(Arc::downgrade(engine), key);
    guard.registry.begin_running(key, Some(ticker));
}

/// Pause a timer. Idempotent.
pub async fn pause_timer(engine: &SharedEngine, key: TimerKey) {
    engine.lock().await.pause(key);
}
