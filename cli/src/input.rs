//! Target selection for interactive and automated runs

use std::io::{self, BufRead, Write};

use fray_core::{Character, CharacterId, SharedRandom, UserInput};

/// Prompts on stdout and reads the choice from stdin.
///
/// Blocks until a valid choice arrives; on end of input it falls back to
/// the first candidate so a piped run cannot wedge the battle.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleInput;

impl UserInput for ConsoleInput {
    fn select_target(&mut self, candidates: &[&dyn Character]) -> CharacterId {
        let stdin = io::stdin();
        loop {
            println!("Choose a target:");
            for (index, candidate) in candidates.iter().enumerate() {
                println!(
                    "  {}. {} ({} HP)",
                    index + 1,
                    candidate.name(),
                    candidate.current_health()
                );
            }
            print!("> ");
            let _ = io::stdout().flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return candidates[0].id(),
                Ok(_) => {}
            }

            match line.trim().parse::<usize>() {
                Ok(choice) if (1..=candidates.len()).contains(&choice) => {
                    return candidates[choice - 1].id();
                }
                _ => println!("Enter a number between 1 and {}", candidates.len()),
            }
        }
    }
}

/// Picks a uniformly random candidate, for unattended runs
pub struct RandomInput {
    random: SharedRandom,
}

impl RandomInput {
    /// Creates an input drawing from the battle's random source
    pub fn new(random: SharedRandom) -> Self {
        Self { random }
    }
}

impl UserInput for RandomInput {
    fn select_target(&mut self, candidates: &[&dyn Character]) -> CharacterId {
        let index = self.random.borrow_mut().next(candidates.len() as u32) as usize;
        candidates[index].id()
    }
}
