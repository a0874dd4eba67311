//! Shipped target-selection strategies

use fray_core::{Character, SharedInput, TargetCalculator, TargetResolution};

/// Lets the user choose a single ally of the actor as the target.
///
/// Candidates are first filtered to the actor's team. A lone ally is
/// selected without prompting; no ally at all resolves as no legal target.
pub struct SingleAllyTargetCalculator {
    input: SharedInput,
}

impl SingleAllyTargetCalculator {
    /// Creates a calculator prompting through `input` when a real choice
    /// exists
    pub fn new(input: SharedInput) -> Self {
        Self { input }
    }
}

impl TargetCalculator for SingleAllyTargetCalculator {
    fn is_reactive(&self) -> bool {
        false
    }

    fn calculate(&self, user: &dyn Character, others: &[&dyn Character]) -> TargetResolution {
        let allies: Vec<&dyn Character> = others
            .iter()
            .copied()
            .filter(|c| c.team() == user.team())
            .collect();
        resolve_single(&self.input, &allies)
    }
}

/// Lets the user choose any single other character as the target.
pub struct SingleOtherTargetCalculator {
    input: SharedInput,
}

impl SingleOtherTargetCalculator {
    /// Creates a calculator prompting through `input` when a real choice
    /// exists
    pub fn new(input: SharedInput) -> Self {
        Self { input }
    }
}

impl TargetCalculator for SingleOtherTargetCalculator {
    fn is_reactive(&self) -> bool {
        false
    }

    fn calculate(&self, _user: &dyn Character, others: &[&dyn Character]) -> TargetResolution {
        resolve_single(&self.input, others)
    }
}

/// Auto-selects a lone candidate; prompts exactly once otherwise.
fn resolve_single(input: &SharedInput, candidates: &[&dyn Character]) -> TargetResolution {
    match candidates {
        [] => TargetResolution::NoneAvailable,
        [only] => TargetResolution::Chosen(vec![only.id()]),
        _ => {
            let choice = input.borrow_mut().select_target(candidates);
            TargetResolution::Chosen(vec![choice])
        }
    }
}
