//! Interactive target selection

use std::cell::RefCell;
use std::rc::Rc;

use crate::character::{Character, CharacterId};

/// Blocking source of interactive choices.
///
/// The underlying mechanism (a human at a terminal, a bot, a script) is the
/// host's concern; the engine only requires a synchronous, single-answer
/// interface.
pub trait UserInput {
    /// Picks exactly one target out of a non-empty candidate set.
    ///
    /// May block until an answer is available.
    fn select_target(&mut self, candidates: &[&dyn Character]) -> CharacterId;
}

/// Shared handle to the battle's input source
pub type SharedInput = Rc<RefCell<dyn UserInput>>;
