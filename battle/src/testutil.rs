//! Scripted collaborators shared by this crate's tests

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use fray_core::{
    ActionResult, AlwaysSucceeds, BasicCharacter, Character, CharacterId, DamageEffect, GameOutput,
    Move, MoveUse, MoveUseResult, Random, SharedInput, SharedRandom, UserInput, seeded_random,
};

use crate::targets::SingleOtherTargetCalculator;

/// Scripted interactive input that counts how often it was consulted
pub struct ScriptedInput {
    choices: VecDeque<CharacterId>,
    calls: usize,
}

impl ScriptedInput {
    /// Creates an input that answers with `choices` in order, falling back
    /// to the first candidate once exhausted
    pub fn shared(choices: Vec<CharacterId>) -> ScriptedInputHandle {
        ScriptedInputHandle(Rc::new(RefCell::new(ScriptedInput {
            choices: choices.into(),
            calls: 0,
        })))
    }
}

impl UserInput for ScriptedInput {
    fn select_target(&mut self, candidates: &[&dyn Character]) -> CharacterId {
        self.calls += 1;
        match self.choices.pop_front() {
            Some(id) => id,
            None => candidates[0].id(),
        }
    }
}

/// Owner's view of a [`ScriptedInput`], keeping the call count inspectable
/// after the handle is handed to a calculator
pub struct ScriptedInputHandle(Rc<RefCell<ScriptedInput>>);

impl ScriptedInputHandle {
    /// A shareable handle for calculators
    pub fn handle(&self) -> SharedInput {
        self.0.clone()
    }

    /// How often the input was consulted
    pub fn calls(&self) -> usize {
        self.0.borrow().calls
    }
}

/// Scripted random source.
///
/// Values are the percentile rolls (`1..=100`) a success calculator will
/// observe; `next` hands back `roll - 1` and falls back to 0 (the luckiest
/// draw) once exhausted.
pub struct FixedRandom {
    draws: VecDeque<u32>,
}

impl FixedRandom {
    /// Creates a shared source scripted with the given rolls
    pub fn shared(rolls: &[u32]) -> SharedRandom {
        Rc::new(RefCell::new(FixedRandom {
            draws: rolls.iter().map(|roll| roll.saturating_sub(1)).collect(),
        }))
    }
}

impl Random for FixedRandom {
    fn next(&mut self, max: u32) -> u32 {
        match self.draws.pop_front() {
            Some(value) => value.min(max - 1),
            None => 0,
        }
    }
}

/// Everything a [`RecordingOutput`] saw, in order
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    TurnStart(u32),
    TeamSummary(String),
    MoveUse {
        user: String,
        move_name: String,
        result: MoveUseResult,
    },
    ActionResult(ActionResult),
    BattleEnd(String),
}

/// Output sink that records every notification for later assertions
pub struct RecordingOutput {
    log: Rc<RefCell<Vec<OutputEvent>>>,
}

impl RecordingOutput {
    /// Creates a sink and the shared log it appends to
    pub fn new() -> (Box<dyn GameOutput>, Rc<RefCell<Vec<OutputEvent>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = RecordingOutput { log: log.clone() };
        (Box::new(sink), log)
    }
}

impl GameOutput for RecordingOutput {
    fn show_turn_start(&mut self, turn: u32) {
        self.log.borrow_mut().push(OutputEvent::TurnStart(turn));
    }

    fn show_team_summary(&mut self, team: &str, _members: &[&dyn Character]) {
        self.log
            .borrow_mut()
            .push(OutputEvent::TeamSummary(team.to_string()));
    }

    fn show_move_use(&mut self, user: &dyn Character, move_name: &str, move_use: &MoveUse) {
        let Some(result) = move_use.result() else {
            return;
        };
        self.log.borrow_mut().push(OutputEvent::MoveUse {
            user: user.name().to_string(),
            move_name: move_name.to_string(),
            result,
        });
    }

    fn show_action_result(&mut self, result: &ActionResult) {
        self.log
            .borrow_mut()
            .push(OutputEvent::ActionResult(result.clone()));
    }

    fn show_battle_end(&mut self, winning_team: &str) {
        self.log
            .borrow_mut()
            .push(OutputEvent::BattleEnd(winning_team.to_string()));
    }
}

/// A moveless character for exercising target and success calculators
pub fn fighter(id: u32, team: &str, speed: u32, health: i32) -> Box<dyn Character> {
    armed_fighter(id, team, speed, health, Vec::new())
}

/// A character with the given move list and a seeded private generator
pub fn armed_fighter(
    id: u32,
    team: &str,
    speed: u32,
    health: i32,
    moves: Vec<Move>,
) -> Box<dyn Character> {
    Box::new(BasicCharacter::new(
        CharacterId(id),
        format!("fighter-{id}"),
        team,
        health,
        speed,
        moves,
        seeded_random(id as u64),
    ))
}

/// An unconditional single-other damage move
pub fn strike(input: SharedInput, damage: i32) -> Move {
    Move::builder()
        .name("Strike")
        .with_targets(SingleOtherTargetCalculator::new(input))
        .with_success(AlwaysSucceeds)
        .with_effect(DamageEffect::new(damage))
        .build()
        .expect("strike move is fully configured")
}
