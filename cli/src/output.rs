//! Console rendering of battle notifications

use fray_core::{ActionResult, Character, EffectOutcome, GameOutput, MoveUse};

/// Renders battle notifications to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    fn print_outcome(result: &ActionResult) {
        match result.outcome {
            EffectOutcome::Damage {
                amount,
                knocked_out,
            } => {
                print!("  {} took {} damage", result.target, amount);
                if knocked_out {
                    print!(" and was knocked out");
                }
                println!("!");
            }
            EffectOutcome::Heal { amount } => {
                println!("  {} recovered {} health", result.target, amount);
            }
        }
    }
}

impl GameOutput for ConsoleOutput {
    fn show_turn_start(&mut self, turn: u32) {
        println!();
        println!("========== Turn {turn} ==========");
    }

    fn show_team_summary(&mut self, team: &str, members: &[&dyn Character]) {
        let summary: Vec<String> = members
            .iter()
            .map(|c| {
                if c.is_dead() {
                    format!("{} (down)", c.name())
                } else {
                    format!("{} ({} HP)", c.name(), c.current_health())
                }
            })
            .collect();
        println!("Team {}: {}", team, summary.join(", "));
    }

    fn show_move_use(&mut self, user: &dyn Character, move_name: &str, move_use: &MoveUse) {
        match move_use.result() {
            Some(result) if result.is_success() => {
                println!("{} used {}!", user.name(), move_name);
                for effect in move_use.effect_results() {
                    Self::print_outcome(effect);
                }
            }
            Some(result) => {
                println!("{} used {} - {}!", user.name(), move_name, result);
            }
            None => {}
        }
    }

    fn show_action_result(&mut self, result: &ActionResult) {
        Self::print_outcome(result);
    }

    fn show_battle_end(&mut self, winning_team: &str) {
        println!();
        println!("Team {winning_team} wins the battle!");
    }
}
