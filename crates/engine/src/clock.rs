//! One-second tick dispatch.
//!
//! Each running timer gets its own scheduled task keyed in the registry; the
//! registry aborts it on pause, unregister, or restart. The loop holds only a
//! weak engine handle and re-reads entity state through the engine on every
//! tick, so a tick that lands after its entity disappeared self-cancels
//! instead of mutating a stale record.

use std::sync::Weak;

use focusboard_core::TimerKey;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::engine::{Engine, TickOutcome};

/// Spawn the recurring one-second dispatch source for one timer.
pub(crate) fn spawn_ticker(engine: Weak<Mutex<Engine>>, key: TimerKey) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval(Duration::from_secs(1));
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick completes immediately; consume it so the
        // first decrement lands a full second after start.
        ticks.tick().await;

        loop {
            ticks.tick().await;
            let Some(engine) = engine.upgrade() else {
                break;
            };
            let mut engine = engine.lock().await;
            if matches!(engine.tick(key).await, TickOutcome::Stop) {
                break;
            }
        }
    })
}
