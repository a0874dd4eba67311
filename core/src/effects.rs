//! The seam between moves/items and whatever executes their consequences.
//!
//! The engine deliberately knows nothing about damage formulas or status
//! rules; it only runs [`Effect`]s and reports the [`ActionResult`]s they
//! produce. The flat [`DamageEffect`] and [`HealEffect`] cover the common
//! cases; richer pipelines implement [`Effect`] themselves.

use crate::character::{Actor, Character};

/// The observable outcome of one effect application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectOutcome {
    /// Damage dealt, and whether it knocked the target out
    Damage { amount: i32, knocked_out: bool },
    /// Health restored
    Heal { amount: i32 },
}

/// What a single applied effect did to one target.
///
/// Display-oriented: carries names rather than ids, since phase results
/// are consumed for reporting and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    /// Name of the character the effect came from
    pub user: String,
    /// Name of the character it was applied to
    pub target: String,
    /// The observable outcome
    pub outcome: EffectOutcome,
}

/// A single consequence a move or item can apply to a target.
///
/// Implementations receive an identity snapshot of the acting character
/// rather than a borrow, so an effect can target its own user.
pub trait Effect {
    /// Applies the effect to `target` on behalf of `user`
    fn apply(&self, user: &Actor, target: &mut dyn Character) -> ActionResult;
}

/// Deals a flat amount of damage
#[derive(Debug, Clone, Copy)]
pub struct DamageEffect {
    amount: i32,
}

impl DamageEffect {
    /// Creates an effect dealing `amount` damage
    pub fn new(amount: i32) -> Self {
        Self { amount }
    }
}

impl Effect for DamageEffect {
    fn apply(&self, user: &Actor, target: &mut dyn Character) -> ActionResult {
        let dealt = target.take_damage(self.amount);
        ActionResult {
            user: user.name.clone(),
            target: target.name().to_string(),
            outcome: EffectOutcome::Damage {
                amount: dealt,
                knocked_out: target.is_dead(),
            },
        }
    }
}

/// Restores a flat amount of health
#[derive(Debug, Clone, Copy)]
pub struct HealEffect {
    amount: i32,
}

impl HealEffect {
    /// Creates an effect restoring `amount` health
    pub fn new(amount: i32) -> Self {
        Self { amount }
    }
}

impl Effect for HealEffect {
    fn apply(&self, user: &Actor, target: &mut dyn Character) -> ActionResult {
        let restored = target.heal(self.amount);
        ActionResult {
            user: user.name.clone(),
            target: target.name().to_string(),
            outcome: EffectOutcome::Heal { amount: restored },
        }
    }
}
