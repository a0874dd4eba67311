//! Domain types and collaborator contracts for the fray battle engine.
//!
//! # Overview
//!
//! `fray-core` is the base crate of the workspace: it defines the data the
//! battle engine works over and the seams it consumes its collaborators
//! through.
//!
//! ```text
//! fray-core (domain types + contracts) ← THIS CRATE
//!        │
//!        ▼
//! fray-battle (phase state machine + shipped strategies)
//!        │
//!        └─> fray-cli (console host driving the battle loop)
//! ```
//!
//! # Main Types
//!
//! ## Domain Types
//! - [`Character`] - The contract a battle participant fulfils, with
//!   [`BasicCharacter`] as a ready-made implementation
//! - [`Roster`] - The owned collection of a battle's characters
//! - [`Move`] / [`MoveUse`] - Reusable action definitions and their pending
//!   uses
//! - [`Item`] - Held items whose effects fire at turn boundaries
//! - [`InMemoryHistory`] - Per-battle action history keyed by `(move, user)`
//! - [`MoveProcessor`] - The pending-move queue and its drain step
//!
//! ## Collaborator Contracts
//! - [`TargetCalculator`] - Strategy deciding which characters an action
//!   affects
//! - [`SuccessCalculator`] - Strategy deciding whether a move use succeeds
//! - [`ActionHistory`] - What has happened so far this battle
//! - [`GameOutput`] - One-way, best-effort reporting sink
//! - [`UserInput`] - Blocking interactive target selection
//! - [`Random`] - Injected randomness, with [`RngRandom`] adapting any
//!   [`rand::Rng`]

pub mod character;
pub mod effects;
pub mod history;
pub mod input;
pub mod items;
pub mod moves;
pub mod output;
pub mod processor;
pub mod random;
pub mod roster;
pub mod success;
pub mod targets;

// Re-export main types at crate root for convenience
pub use character::{Actor, BasicCharacter, Character, CharacterId};
pub use effects::{ActionResult, DamageEffect, Effect, EffectOutcome, HealEffect};
pub use history::{ActionHistory, InMemoryHistory, SharedHistory};
pub use input::{SharedInput, UserInput};
pub use items::{
    ActionUseResult, BattlePhaseResult, Item, ItemBuilder, ItemBuilderError, ReactionTrigger,
};
pub use moves::{Move, MoveBuilder, MoveBuilderError, MoveId, MoveUse, MoveUseResult};
pub use output::{GameOutput, NullOutput};
pub use processor::MoveProcessor;
pub use random::{Random, RngRandom, SharedRandom, seeded_random};
pub use roster::{Roster, RosterError};
pub use success::{AlwaysSucceeds, SuccessCalculator};
pub use targets::{TargetCalculator, TargetResolution};
