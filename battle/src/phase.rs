//! Battle phase sequencing

use std::fmt;

/// The phases a patient battle steps through, one
/// [`advance`](crate::PatientBattle::advance) call each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    /// Before the first turn has begun
    BattleStart,
    /// The turn counter ticks, team summaries go out, and start-of-turn
    /// reactions fire in speed order
    TurnStart,
    /// Every living character chooses a move and its targets are resolved
    TurnChoice,
    /// The pending move queue is drained
    TurnExecute,
    /// End-of-turn reactions fire in speed order
    TurnEnd,
    /// Terminal: advancing again only repeats the conclusion report
    BattleEnd,
}

impl BattlePhase {
    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            BattlePhase::BattleStart => "BattleStart",
            BattlePhase::TurnStart => "TurnStart",
            BattlePhase::TurnChoice => "TurnChoice",
            BattlePhase::TurnExecute => "TurnExecute",
            BattlePhase::TurnEnd => "TurnEnd",
            BattlePhase::BattleEnd => "BattleEnd",
        }
    }

    /// Whether this is the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, BattlePhase::BattleEnd)
    }
}

impl fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
