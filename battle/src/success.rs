//! History-decayed success calculation

use fray_core::{Character, Move, MoveUseResult, SharedHistory, SharedRandom, SuccessCalculator};

/// Success rate that decreases linearly with consecutive successful uses.
///
/// The chance for a use is `max(minimum, base - factor * count)`, where
/// `count` is how often this `(move, user)` pair has succeeded since it
/// last failed. Each consecutive success makes the next use strictly
/// harder until the floor is hit; a failure resets the count (the action
/// history's job, not this calculator's). Rates are integer percentages.
pub struct LinearDecaySuccessCalculator {
    base: u32,
    factor: u32,
    minimum: u32,
    failure: MoveUseResult,
    random: SharedRandom,
    history: SharedHistory,
}

impl LinearDecaySuccessCalculator {
    /// Creates a calculator with its mandatory collaborators.
    ///
    /// `failure` is the result returned when the roll misses the chance;
    /// distinguishing failure causes is the caller's configuration choice.
    pub fn new(
        base: u32,
        factor: u32,
        minimum: u32,
        failure: MoveUseResult,
        random: SharedRandom,
        history: SharedHistory,
    ) -> Self {
        Self {
            base,
            factor,
            minimum,
            failure,
            random,
            history,
        }
    }

    fn chance(&self, count: u32) -> u32 {
        self.base
            .saturating_sub(self.factor.saturating_mul(count))
            .max(self.minimum)
    }
}

impl SuccessCalculator for LinearDecaySuccessCalculator {
    fn calculate(&self, mv: &Move, user: &dyn Character) -> MoveUseResult {
        let count = self
            .history
            .borrow()
            .consecutive_success_count(mv.id(), user.id());
        let chance = self.chance(count);
        let roll = self.random.borrow_mut().next(100) + 1;

        if roll <= chance {
            MoveUseResult::Success
        } else {
            self.failure
        }
    }
}
