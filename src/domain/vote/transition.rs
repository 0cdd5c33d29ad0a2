//! The vote tally rule as a pure function.
//!
//! The persisted state of one `(user, place_tag)` pair is fully described by the
//! direction of its single vote row, or its absence. Given that state and the
//! requested direction, [`transition`] yields the next state and the exact counter
//! delta to apply to the pair's `up_votes` / `down_votes` in the same transaction.

use super::entity::VoteDirection;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Signed change to apply to a place/tag's denormalized counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct CounterDelta {
    pub up: i32,
    pub down: i32,
}

impl CounterDelta {
    fn for_direction(direction: VoteDirection, amount: i32) -> Self {
        match direction {
            VoteDirection::Up => Self { up: amount, down: 0 },
            VoteDirection::Down => Self { up: 0, down: amount },
        }
    }

    fn plus(self, other: Self) -> Self {
        Self {
            up: self.up + other.up,
            down: self.down + other.down,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum VoteOutcome {
    /// No prior vote; one was created.
    Created,
    /// Same direction re-submitted; the vote was removed.
    Removed,
    /// Opposite direction submitted; the vote was flipped.
    Switched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub next: Option<VoteDirection>,
    pub delta: CounterDelta,
    pub outcome: VoteOutcome,
}

pub fn transition(current: Option<VoteDirection>, requested: VoteDirection) -> VoteTransition {
    match current {
        None => VoteTransition {
            next: Some(requested),
            delta: CounterDelta::for_direction(requested, 1),
            outcome: VoteOutcome::Created,
        },
        Some(existing) if existing == requested => VoteTransition {
            next: None,
            delta: CounterDelta::for_direction(requested, -1),
            outcome: VoteOutcome::Removed,
        },
        Some(existing) => VoteTransition {
            next: Some(requested),
            delta: CounterDelta::for_direction(requested, 1)
                .plus(CounterDelta::for_direction(existing, -1)),
            outcome: VoteOutcome::Switched,
        },
    }
}
