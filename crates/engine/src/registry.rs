//! The timer registry: one slot per live countdown.
//!
//! Slots cache timer state derived from store membership; they must never
//! outlive the entity they refer to. The central invariant is that at most one
//! tick-dispatch source exists per key at any instant - starting an
//! already-running timer first cancels the prior source, so a double start can
//! never double-decrement.

use std::collections::HashMap;

use focusboard_core::{TimerKey, TimerState};
use tokio::task::JoinHandle;

#[derive(Debug)]
struct TimerSlot {
    state: TimerState,
    ticker: Option<JoinHandle<()>>,
}

/// Owns the mapping from entity id to its live ticking handle.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    slots: HashMap<TimerKey, TimerSlot>,
}

impl TimerRegistry {
    /// Create a paused slot for a newly created entity. Idempotent.
    pub fn register(&mut self, key: TimerKey) {
        self.slots.entry(key).or_insert(TimerSlot {
            state: TimerState::Paused,
            ticker: None,
        });
    }

    /// Cancel any pending tick dispatch and drop the slot.
    ///
    /// Called on entity deletion and on task completion. A no-op for keys
    /// that were never registered.
    pub fn unregister(&mut self, key: TimerKey) {
        if let Some(slot) = self.slots.remove(&key) {
            if let Some(ticker) = slot.ticker {
                ticker.abort();
            }
        }
    }

    /// Transition a slot to running, replacing (and cancelling) any prior
    /// dispatch source.
    pub fn begin_running(&mut self, key: TimerKey, ticker: Option<JoinHandle<()>>) {
        let slot = self.slots.entry(key).or_insert(TimerSlot {
            state: TimerState::Paused,
            ticker: None,
        });
        if let Some(prior) = slot.ticker.take() {
            prior.abort();
        }
        slot.state = TimerState::Running;
        slot.ticker = ticker;
    }

    /// Transition running → paused, cancelling the dispatch source. Idempotent;
    /// pausing an absent or already-paused timer is a no-op.
    pub fn pause(&mut self, key: TimerKey) {
        if let Some(slot) = self.slots.get_mut(&key) {
            if let Some(ticker) = slot.ticker.take() {
                ticker.abort();
            }
            slot.state = TimerState::Paused;
        }
    }

    /// Mark a slot paused from within its own tick dispatch.
    ///
    /// The exiting ticker stops on its own, so its handle is dropped rather
    /// than aborted.
    pub fn finish(&mut self, key: TimerKey) {
        if let Some(slot) = self.slots.get_mut(&key) {
            slot.ticker = None;
            slot.state = TimerState::Paused;
        }
    }

    /// Current state, or `None` when no timer was ever registered.
    pub fn state(&self, key: TimerKey) -> Option<TimerState> {
        self.slots.get(&key).map(|s| s.state)
    }

    /// Whether the key currently receives ticks.
    pub fn is_running(&self, key: TimerKey) -> bool {
        self.state(key) == Some(TimerState::Running)
    }

    /// Whether a slot exists for the key.
    pub fn contains(&self, key: TimerKey) -> bool {
        self.slots.contains_key(&key)
    }

    /// Cancel every dispatch source and drop all slots.
    pub fn clear(&mut self) {
        for (_, slot) in self.slots.drain() {
            if let Some(ticker) = slot.ticker {
                ticker.abort();
            }
        }
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.clear();
    }
}
