//! The pending-move queue and its drain step

use std::collections::VecDeque;

use crate::character::{Actor, CharacterId};
use crate::moves::MoveUse;
use crate::roster::Roster;

/// FIFO queue of chosen move uses and the machinery that applies them.
///
/// Owns move-effect execution: applying a use rolls the move's success
/// calculator and, on success, runs the move's effects against each living
/// target.
#[derive(Debug, Default)]
pub struct MoveProcessor {
    queue: VecDeque<MoveUse>,
}

impl MoveProcessor {
    /// Creates a processor with an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pending queue is empty
    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queues a resolved move use for execution
    pub fn push(&mut self, move_use: MoveUse) {
        debug_assert!(
            move_use.targets().is_some(),
            "move uses are queued with targets resolved"
        );
        self.queue.push_back(move_use);
    }

    /// Pops and applies the next queued use, returning it with its result
    /// attached. Returns `None` when the queue is empty.
    ///
    /// A use whose user has since been knocked out, which resolved no legal
    /// target, or which names a move its user does not know, is returned
    /// without a result: it never rolled.
    pub fn apply_next(&mut self, roster: &mut Roster) -> Option<MoveUse> {
        let mut move_use = self.queue.pop_front()?;

        let targets: Vec<CharacterId> = match move_use.targets() {
            Some(targets) if !targets.is_empty() => targets.to_vec(),
            _ => return Some(move_use),
        };

        let result = {
            let Some(user) = roster.get(move_use.user()) else {
                return Some(move_use);
            };
            if user.is_dead() {
                return Some(move_use);
            }
            let Some(mv) = user.move_by_id(move_use.move_id()) else {
                return Some(move_use);
            };
            mv.success_calculator().calculate(mv, user)
        };

        if result.is_success() {
            let user_id = move_use.user();
            for target_id in targets {
                let Some((user, target)) = roster.pair_mut(user_id, target_id) else {
                    continue;
                };
                if target.is_dead() {
                    continue;
                }

                let actor = Actor::of(user);
                if let Some(mv) = user.move_by_id(move_use.move_id()) {
                    for effect in mv.effects() {
                        move_use.add_effect_result(effect.apply(&actor, target));
                    }
                }
            }
        }

        move_use.set_result(result);
        Some(move_use)
    }
}
