//! The patient battle state machine

use fray_core::{
    BattlePhaseResult, CharacterId, GameOutput, MoveProcessor, MoveUse, Roster, SharedHistory,
    TargetResolution,
};

use crate::phase::BattlePhase;

/// A turn-based battle that waits to be advanced by an outside source.
///
/// Each [`advance`](Self::advance) call performs exactly one phase's work
/// and returns the phase the battle moved to; nothing runs between calls.
/// Within a phase, living characters act in descending current-speed
/// order, equal speeds keeping their roster order.
pub struct PatientBattle {
    roster: Roster,
    processor: MoveProcessor,
    history: SharedHistory,
    output: Box<dyn GameOutput>,
    phase: BattlePhase,
}

impl PatientBattle {
    /// Creates a battle in [`BattlePhase::BattleStart`]
    pub fn new(
        roster: Roster,
        processor: MoveProcessor,
        history: SharedHistory,
        output: Box<dyn GameOutput>,
    ) -> Self {
        Self {
            roster,
            processor,
            history,
            output,
            phase: BattlePhase::BattleStart,
        }
    }

    /// The current phase
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// The characters in the battle
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Mutable access to the characters, for action-execution collaborators
    /// living outside the phase machine
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Whether some team has every member dead.
    ///
    /// Recomputed on every call, so damage applied mid-turn is reflected
    /// immediately.
    pub fn is_over(&self) -> bool {
        self.roster.any_team_defeated()
    }

    /// The single team with a living member, if there is exactly one
    pub fn winning_team(&self) -> Option<String> {
        self.roster.winning_team()
    }

    /// Performs the current phase's work and advances to the next phase,
    /// returning the new phase
    pub fn advance(&mut self) -> BattlePhase {
        self.phase = match self.phase {
            BattlePhase::BattleStart => BattlePhase::TurnStart,
            BattlePhase::TurnStart => self.turn_start(),
            BattlePhase::TurnChoice => self.turn_choice(),
            BattlePhase::TurnExecute => self.turn_execute(),
            BattlePhase::TurnEnd => self.turn_end(),
            BattlePhase::BattleEnd => {
                self.show_battle_end();
                BattlePhase::BattleEnd
            }
        };
        self.phase
    }

    fn turn_start(&mut self) -> BattlePhase {
        self.history.borrow_mut().start_turn();
        let turn = self.history.borrow().turn_counter();
        self.output.show_turn_start(turn);

        for (team, members) in self.roster.teams() {
            self.output.show_team_summary(team, &members);
        }

        let order = self.roster.turn_order();
        for &id in &order {
            let others = excluding(&order, id);
            let reaction = self
                .roster
                .with_character_mut(id, &others, |me, candidates| me.on_start_turn(candidates));
            if let Some(result) = reaction {
                self.show_phase_result(&result);
            }
        }

        if self.is_over() {
            BattlePhase::BattleEnd
        } else {
            BattlePhase::TurnChoice
        }
    }

    fn turn_choice(&mut self) -> BattlePhase {
        let order = self.roster.turn_order();
        for &id in &order {
            let others = excluding(&order, id);
            let chosen = self
                .roster
                .with_character_mut(id, &others, |me, candidates| me.choose_move(candidates));
            let Some(mut move_use) = chosen else {
                continue;
            };

            let resolution = self.resolve_targets(&move_use, &others);
            move_use.set_targets(resolution.into_targets());
            self.processor.push(move_use);
        }

        // Proceeds regardless of how resolution went; no-target uses drain
        // as no-ops during TurnExecute.
        BattlePhase::TurnExecute
    }

    fn turn_execute(&mut self) -> BattlePhase {
        while !self.processor.queue_is_empty() {
            let Some(move_use) = self.processor.apply_next(&mut self.roster) else {
                break;
            };
            if move_use.has_result() {
                self.history.borrow_mut().record_move_use(&move_use);
                self.show_move_use(&move_use);
            }
        }

        if self.is_over() {
            BattlePhase::BattleEnd
        } else {
            BattlePhase::TurnEnd
        }
    }

    fn turn_end(&mut self) -> BattlePhase {
        let order = self.roster.turn_order();
        for &id in &order {
            let others = excluding(&order, id);
            let reaction = self
                .roster
                .with_character_mut(id, &others, |me, candidates| me.on_end_turn(candidates));
            if let Some(result) = reaction {
                self.show_phase_result(&result);
            }
        }

        // Deliberately no over-check here: a knockout from an end-of-turn
        // reaction is picked up by the next TurnStart.
        BattlePhase::TurnStart
    }

    fn resolve_targets(&self, move_use: &MoveUse, others: &[CharacterId]) -> TargetResolution {
        let Some(user) = self.roster.get(move_use.user()) else {
            return TargetResolution::NoneAvailable;
        };
        let Some(mv) = user.move_by_id(move_use.move_id()) else {
            return TargetResolution::NoneAvailable;
        };

        let candidates = self.roster.by_ids(others);
        mv.target_calculator().calculate(user, &candidates)
    }

    fn show_phase_result(&mut self, result: &BattlePhaseResult) {
        for action in &result.item_results {
            for r in &action.results {
                self.output.show_action_result(r);
            }
        }
    }

    fn show_move_use(&mut self, move_use: &MoveUse) {
        let Some(user) = self.roster.get(move_use.user()) else {
            return;
        };
        let Some(mv) = user.move_by_id(move_use.move_id()) else {
            return;
        };
        self.output.show_move_use(user, mv.name(), move_use);
    }

    fn show_battle_end(&mut self) {
        if let Some(team) = self.roster.winning_team() {
            self.output.show_battle_end(&team);
        }
    }
}

/// The phase-entry order snapshot minus one character, in snapshot order
fn excluding(order: &[CharacterId], id: CharacterId) -> Vec<CharacterId> {
    order.iter().copied().filter(|&other| other != id).collect()
}
