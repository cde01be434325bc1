//! Unique identifiers for Focusboard entities.
//!
//! Ids are opaque integers ordered by creation time. The persisted layout
//! stores them as plain JSON integers, so they stay numeric rather than using
//! a textual id scheme.

use serde::{Deserialize, Serialize};

/// Raw id value: epoch milliseconds at creation, bumped on collision.
pub type EntityId = i64;

/// Unique identifier for a Task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub EntityId);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Unique identifier for a Step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub EntityId);

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for StepId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Creation-ordered id source.
///
/// Ids are derived from the wall clock; two entities created within the same
/// millisecond get strictly increasing values.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: EntityId,
}

impl IdGenerator {
    /// Create a generator that will never reuse ids at or below `floor`.
    ///
    /// Pass the highest id found in a loaded snapshot so new entities stay
    /// creation-ordered across restarts.
    pub fn starting_after(floor: EntityId) -> Self {
        Self { last: floor }
    }

    /// Produce the next id.
    pub fn next_id(&mut self) -> EntityId {
        let now = crate::now_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let mut gen = IdGenerator::default();
        let a = gen.next_id();
        let b = gen.next_id();
        let c = gen.next_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn generator_respects_loaded_floor() {
        let far_future = crate::now_millis() + 1_000_000;
        let mut gen = IdGenerator::starting_after(far_future);
        assert_eq!(gen.next_id(), far_future + 1);
    }

    #[test]
    fn task_id_round_trips_as_integer_json() {
        let id = TaskId(1_700_000_000_000);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "1700000000000");
        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
