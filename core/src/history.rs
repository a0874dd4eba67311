//! Per-battle action history

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::character::CharacterId;
use crate::moves::{MoveId, MoveUse};

/// What has happened over the course of a battle.
///
/// Mutated only by the phase state machine, at well-defined points: the
/// turn counter ticks at turn start, and each applied move use updates the
/// consecutive-success count for its `(move, user)` pair. Success
/// calculators read it. Never rolled back.
pub trait ActionHistory {
    /// Begins a new turn, incrementing the turn counter
    fn start_turn(&mut self);

    /// Number of turns started so far
    fn turn_counter(&self) -> u32;

    /// Consecutive successful uses of `(move, user)` since its last failure
    fn consecutive_success_count(&self, move_id: &MoveId, user: CharacterId) -> u32;

    /// Records an applied move use: a success increments the pair's count,
    /// any failure resets it to zero. Uses without a result are ignored.
    fn record_move_use(&mut self, move_use: &MoveUse);
}

/// Shared handle to a battle's action history
pub type SharedHistory = Rc<RefCell<dyn ActionHistory>>;

/// In-memory [`ActionHistory`] keyed by `(move, user)`
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    turn_counter: u32,
    success_counts: HashMap<(MoveId, CharacterId), u32>,
}

impl InMemoryHistory {
    /// Creates an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a fresh history in a shared handle
    pub fn shared() -> SharedHistory {
        Rc::new(RefCell::new(Self::new()))
    }
}

impl ActionHistory for InMemoryHistory {
    fn start_turn(&mut self) {
        self.turn_counter += 1;
    }

    fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    fn consecutive_success_count(&self, move_id: &MoveId, user: CharacterId) -> u32 {
        self.success_counts
            .get(&(move_id.clone(), user))
            .copied()
            .unwrap_or(0)
    }

    fn record_move_use(&mut self, move_use: &MoveUse) {
        let Some(result) = move_use.result() else {
            return;
        };

        let key = (move_use.move_id().clone(), move_use.user());
        if result.is_success() {
            *self.success_counts.entry(key).or_insert(0) += 1;
        } else {
            self.success_counts.insert(key, 0);
        }
    }
}
