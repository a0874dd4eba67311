//! Patient turn-based battle resolution.
//!
//! A *patient* battle differs from a regular one in that it waits to be
//! advanced by an outside source: each call to
//! [`PatientBattle::advance`] performs exactly one phase's work and
//! returns the phase the battle moved to, so a host (a UI loop, a bot, a
//! test) paces the fight however it likes.
//!
//! ```text
//! fray-core (domain types + contracts)
//!        │
//!        ▼
//! fray-battle (phase state machine + shipped strategies) ← THIS CRATE
//!        │
//!        └─> fray-cli (console host driving the battle loop)
//! ```
//!
//! # Main Types
//! - [`PatientBattle`] - The battle phase state machine
//! - [`BattlePhase`] - The six phases a battle steps through
//! - [`SingleAllyTargetCalculator`] / [`SingleOtherTargetCalculator`] -
//!   Shipped target-selection strategies
//! - [`LinearDecaySuccessCalculator`] - Success rate that decays with
//!   consecutive successful uses
//!
//! # Example Usage
//!
//! ```ignore
//! use fray_battle::{BattlePhase, PatientBattle};
//!
//! let mut battle = PatientBattle::new(roster, processor, history, output);
//! loop {
//!     if battle.advance() == BattlePhase::BattleEnd {
//!         battle.advance(); // report the conclusion
//!         break;
//!     }
//! }
//! ```

pub mod battle;
pub mod phase;
pub mod success;
pub mod targets;

#[cfg(test)]
mod testutil;

#[cfg(test)]
mod tests;

pub use battle::PatientBattle;
pub use phase::BattlePhase;
pub use success::LinearDecaySuccessCalculator;
pub use targets::{SingleAllyTargetCalculator, SingleOtherTargetCalculator};

// Re-export commonly used core types
pub use fray_core::{
    BattlePhaseResult, Character, CharacterId, MoveProcessor, MoveUse, MoveUseResult, Roster,
};
