//! End-to-end battle flow tests

use std::cell::RefCell;
use std::rc::Rc;

use fray_core::{
    AlwaysSucceeds, CharacterId, DamageEffect, HealEffect, InMemoryHistory, Item, Move,
    MoveProcessor, MoveUseResult, Roster, SharedHistory, SharedInput,
};

use crate::battle::PatientBattle;
use crate::phase::BattlePhase;
use crate::targets::SingleAllyTargetCalculator;
use crate::testutil::{OutputEvent, RecordingOutput, ScriptedInput, armed_fighter, strike};

type EventLog = Rc<RefCell<Vec<OutputEvent>>>;

fn mend(input: SharedInput, amount: i32) -> Move {
    Move::builder()
        .name("Mend")
        .with_targets(SingleAllyTargetCalculator::new(input))
        .with_success(AlwaysSucceeds)
        .with_effect(HealEffect::new(amount))
        .build()
        .expect("mend move is fully configured")
}

/// One striker per team, the faster on team crimson
fn duel(damage: i32, health: i32) -> (PatientBattle, SharedHistory, EventLog) {
    let input = ScriptedInput::shared(Vec::new());
    let history = InMemoryHistory::shared();
    let (output, log) = RecordingOutput::new();

    let roster = Roster::new(vec![
        armed_fighter(1, "crimson", 50, health, vec![strike(input.handle(), damage)]),
        armed_fighter(2, "viridian", 10, health, vec![strike(input.handle(), damage)]),
    ])
    .expect("distinct ids");

    let battle = PatientBattle::new(roster, MoveProcessor::new(), history.clone(), output);
    (battle, history, log)
}

fn advance_times(battle: &mut PatientBattle, times: usize) -> BattlePhase {
    let mut phase = battle.phase();
    for _ in 0..times {
        phase = battle.advance();
    }
    phase
}

fn move_users(log: &EventLog) -> Vec<String> {
    log.borrow()
        .iter()
        .filter_map(|event| match event {
            OutputEvent::MoveUse { user, .. } => Some(user.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_phase_sequence_for_one_full_turn_cycle() {
    let (mut battle, history, _log) = duel(1, 50);

    assert_eq!(battle.phase(), BattlePhase::BattleStart);
    assert_eq!(battle.advance(), BattlePhase::TurnStart);
    assert_eq!(battle.advance(), BattlePhase::TurnChoice);
    assert_eq!(battle.advance(), BattlePhase::TurnExecute);
    assert_eq!(battle.advance(), BattlePhase::TurnEnd);
    assert_eq!(battle.advance(), BattlePhase::TurnStart);

    assert_eq!(history.borrow().turn_counter(), 1);
    assert!(battle.roster().iter().all(|c| !c.is_dead()));
}

#[test]
fn test_turn_counter_advances_once_per_cycle() {
    let (mut battle, history, _log) = duel(1, 50);

    // Two full cycles land back on TurnStart twice
    advance_times(&mut battle, 5);
    assert_eq!(history.borrow().turn_counter(), 1);
    advance_times(&mut battle, 4);
    assert_eq!(battle.phase(), BattlePhase::TurnStart);
    assert_eq!(history.borrow().turn_counter(), 2);
}

#[test]
fn test_turn_start_reports_turn_and_team_summaries() {
    let (mut battle, _history, log) = duel(1, 50);

    advance_times(&mut battle, 2);

    let events = log.borrow();
    assert_eq!(events[0], OutputEvent::TurnStart(1));
    assert_eq!(events[1], OutputEvent::TeamSummary("crimson".to_string()));
    assert_eq!(events[2], OutputEvent::TeamSummary("viridian".to_string()));
}

#[test]
fn test_battle_end_detected_at_turn_execute() {
    let (mut battle, _history, log) = duel(100, 30);

    // The faster striker knocks the slower one out before it can act
    assert_eq!(advance_times(&mut battle, 4), BattlePhase::BattleEnd);
    assert!(battle.is_over());
    assert_eq!(battle.winning_team(), Some("crimson".to_string()));

    // The loser's queued strike never rolled
    assert_eq!(move_users(&log), vec!["fighter-1".to_string()]);
}

#[test]
fn test_battle_end_reporting_is_idempotent() {
    let (mut battle, _history, log) = duel(100, 30);

    advance_times(&mut battle, 4);
    assert_eq!(battle.advance(), BattlePhase::BattleEnd);
    assert_eq!(battle.advance(), BattlePhase::BattleEnd);

    let conclusions: Vec<_> = log
        .borrow()
        .iter()
        .filter(|event| matches!(event, OutputEvent::BattleEnd(_)))
        .cloned()
        .collect();
    assert_eq!(
        conclusions,
        vec![
            OutputEvent::BattleEnd("crimson".to_string()),
            OutputEvent::BattleEnd("crimson".to_string()),
        ]
    );
}

#[test]
fn test_moves_apply_in_descending_speed_order() {
    let input = ScriptedInput::shared(Vec::new());
    let history = InMemoryHistory::shared();
    let (output, log) = RecordingOutput::new();

    let roster = Roster::new(vec![
        armed_fighter(1, "a", 10, 30, vec![strike(input.handle(), 1)]),
        armed_fighter(2, "a", 40, 30, vec![strike(input.handle(), 1)]),
        armed_fighter(3, "b", 20, 30, vec![strike(input.handle(), 1)]),
        armed_fighter(4, "b", 30, 30, vec![strike(input.handle(), 1)]),
    ])
    .expect("distinct ids");

    let mut battle = PatientBattle::new(roster, MoveProcessor::new(), history, output);
    advance_times(&mut battle, 4);

    assert_eq!(
        move_users(&log),
        vec![
            "fighter-2".to_string(),
            "fighter-4".to_string(),
            "fighter-3".to_string(),
            "fighter-1".to_string(),
        ]
    );
}

#[test]
fn test_ally_move_without_allies_is_a_noop() {
    let input = ScriptedInput::shared(Vec::new());
    let history = InMemoryHistory::shared();
    let (output, log) = RecordingOutput::new();

    let roster = Roster::new(vec![
        armed_fighter(1, "crimson", 50, 30, vec![mend(input.handle(), 5)]),
        armed_fighter(2, "viridian", 10, 30, vec![strike(input.handle(), 1)]),
    ])
    .expect("distinct ids");

    let mut battle = PatientBattle::new(roster, MoveProcessor::new(), history.clone(), output);
    advance_times(&mut battle, 4);

    // Only the striker's use produced a result or touched the history
    assert_eq!(move_users(&log), vec!["fighter-2".to_string()]);
    assert_eq!(
        history
            .borrow()
            .consecutive_success_count(&"Mend".into(), CharacterId(1)),
        0
    );
    assert_eq!(input.calls(), 0);
}

#[test]
fn test_end_turn_knockout_is_detected_at_next_turn_start() {
    let input = ScriptedInput::shared(Vec::new());
    let history = InMemoryHistory::shared();
    let (output, log) = RecordingOutput::new();

    let brand = Item::builder()
        .name("Cursed Brand")
        .with_end_turn_effect(DamageEffect::new(100))
        .build()
        .expect("brand is fully configured");

    let roster = Roster::new(vec![
        Box::new(
            fray_core::BasicCharacter::new(
                CharacterId(1),
                "fighter-1",
                "crimson",
                30,
                50,
                vec![strike(input.handle(), 1)],
                fray_core::seeded_random(1),
            )
            .with_item(brand),
        ),
        armed_fighter(2, "viridian", 10, 30, vec![strike(input.handle(), 1)]),
    ])
    .expect("distinct ids");

    let mut battle = PatientBattle::new(roster, MoveProcessor::new(), history.clone(), output);

    // The brand kills its bearer during TurnEnd, but the phase still loops
    // back to TurnStart; only the next TurnStart notices the knockout.
    assert_eq!(advance_times(&mut battle, 5), BattlePhase::TurnStart);
    assert!(battle.is_over());
    assert_eq!(battle.advance(), BattlePhase::BattleEnd);
    assert_eq!(history.borrow().turn_counter(), 2);

    battle.advance();
    assert_eq!(
        log.borrow().last(),
        Some(&OutputEvent::BattleEnd("viridian".to_string()))
    );
}

#[test]
fn test_is_over_reflects_health_mutation_without_a_phase_transition() {
    let (mut battle, _history, _log) = duel(1, 50);

    assert!(!battle.is_over());
    battle
        .roster_mut()
        .get_mut(CharacterId(2))
        .expect("fighter-2 exists")
        .take_damage(1000);
    assert!(battle.is_over());
    assert_eq!(battle.winning_team(), Some("crimson".to_string()));
}

#[test]
fn test_start_turn_item_reactions_are_reported() {
    let input = ScriptedInput::shared(Vec::new());
    let history = InMemoryHistory::shared();
    let (output, log) = RecordingOutput::new();

    let charm = Item::builder()
        .name("Healing Charm")
        .with_start_turn_effect(HealEffect::new(5))
        .build()
        .expect("charm is fully configured");

    let roster = Roster::new(vec![
        Box::new(
            fray_core::BasicCharacter::new(
                CharacterId(1),
                "fighter-1",
                "crimson",
                30,
                50,
                vec![strike(input.handle(), 1)],
                fray_core::seeded_random(1),
            )
            .with_item(charm),
        ),
        armed_fighter(2, "viridian", 10, 30, vec![strike(input.handle(), 1)]),
    ])
    .expect("distinct ids");

    let mut battle = PatientBattle::new(roster, MoveProcessor::new(), history, output);
    battle
        .roster_mut()
        .get_mut(CharacterId(1))
        .expect("fighter-1 exists")
        .take_damage(10);

    advance_times(&mut battle, 2);

    let healed = log.borrow().iter().any(|event| {
        matches!(
            event,
            OutputEvent::ActionResult(result)
                if result.target == "fighter-1"
                    && result.outcome == fray_core::EffectOutcome::Heal { amount: 5 }
        )
    });
    assert!(healed);
    assert_eq!(
        battle
            .roster()
            .get(CharacterId(1))
            .expect("fighter-1 exists")
            .current_health(),
        25
    );
}

#[test]
fn test_success_results_are_recorded_into_history() {
    let (mut battle, history, _log) = duel(1, 50);

    advance_times(&mut battle, 5);
    assert_eq!(
        history
            .borrow()
            .consecutive_success_count(&"Strike".into(), CharacterId(1)),
        1
    );
    assert_eq!(
        history
            .borrow()
            .consecutive_success_count(&"Strike".into(), CharacterId(2)),
        1
    );

    advance_times(&mut battle, 4);
    assert_eq!(
        history
            .borrow()
            .consecutive_success_count(&"Strike".into(), CharacterId(1)),
        2
    );
}

#[test]
fn test_failed_move_result_resets_history_and_is_reported() {
    let input = ScriptedInput::shared(Vec::new());
    let history = InMemoryHistory::shared();
    let (output, log) = RecordingOutput::new();

    // Chance 80 at count 0: the scripted rolls make fighter-1 hit then miss
    let rolls = crate::testutil::FixedRandom::shared(&[80, 81]);
    let risky = |history: SharedHistory, rolls: fray_core::SharedRandom| {
        Move::builder()
            .name("Gamble")
            .with_targets(crate::targets::SingleOtherTargetCalculator::new(
                input.handle(),
            ))
            .with_success(crate::success::LinearDecaySuccessCalculator::new(
                80,
                10,
                20,
                MoveUseResult::Miss,
                rolls,
                history,
            ))
            .with_effect(DamageEffect::new(1))
            .build()
            .expect("gamble move is fully configured")
    };

    let roster = Roster::new(vec![
        armed_fighter(
            1,
            "crimson",
            50,
            30,
            vec![risky(history.clone(), rolls.clone())],
        ),
        armed_fighter(2, "viridian", 10, 30, vec![strike(input.handle(), 1)]),
    ])
    .expect("distinct ids");

    let mut battle = PatientBattle::new(roster, MoveProcessor::new(), history.clone(), output);

    // First cycle: roll 80 against chance 80 succeeds
    advance_times(&mut battle, 5);
    assert_eq!(
        history
            .borrow()
            .consecutive_success_count(&"Gamble".into(), CharacterId(1)),
        1
    );

    // Second cycle: chance is now 70 and the roll of 81 misses, resetting
    advance_times(&mut battle, 4);
    assert_eq!(
        history
            .borrow()
            .consecutive_success_count(&"Gamble".into(), CharacterId(1)),
        0
    );

    let gamble_results: Vec<_> = log
        .borrow()
        .iter()
        .filter_map(|event| match event {
            OutputEvent::MoveUse {
                user,
                move_name,
                result,
            } if move_name == "Gamble" => Some((user.clone(), *result)),
            _ => None,
        })
        .collect();
    assert_eq!(
        gamble_results,
        vec![
            ("fighter-1".to_string(), MoveUseResult::Success),
            ("fighter-1".to_string(), MoveUseResult::Miss),
        ]
    );
}
