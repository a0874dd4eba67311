//! Characters and the contract the battle engine consumes them through

use std::fmt;

use crate::items::{ActionUseResult, BattlePhaseResult, Item, ReactionTrigger};
use crate::moves::{Move, MoveId, MoveUse};
use crate::random::SharedRandom;

/// Unique identifier of a character within a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity snapshot of the character applying an effect.
///
/// Effects receive this instead of a borrow of the acting character, so an
/// item effect can target its own bearer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The acting character's id
    pub id: CharacterId,
    /// The acting character's display name
    pub name: String,
}

impl Actor {
    /// Snapshots the identity of a character
    pub fn of(character: &dyn Character) -> Self {
        Self {
            id: character.id(),
            name: character.name().to_string(),
        }
    }
}

/// A participant in a battle.
///
/// The engine only ever observes characters through this trait: it orders
/// them by current speed, asks them to choose moves and react to turn
/// boundaries, and lets effects touch their health. Anything beyond this
/// surface (stat formulas, AI, equipment rules) belongs to the implementor.
pub trait Character {
    /// Unique id within the battle
    fn id(&self) -> CharacterId;

    /// Display name
    fn name(&self) -> &str;

    /// Team label. Characters never change team mid-battle.
    fn team(&self) -> &str;

    /// Current speed, which drives per-phase action order
    fn current_speed(&self) -> u32;

    /// Whether the character has been knocked out
    fn is_dead(&self) -> bool;

    /// Current health
    fn current_health(&self) -> i32;

    /// The moves this character knows
    fn moves(&self) -> &[Move];

    /// Looks up a known move by id
    fn move_by_id(&self, id: &MoveId) -> Option<&Move> {
        self.moves().iter().find(|m| m.id() == id)
    }

    /// Chooses a move to use against the given candidates, returning a
    /// pending use with its targets still unset
    fn choose_move(&mut self, others: &[&dyn Character]) -> MoveUse;

    /// Reacts to the start of a turn, with the other living characters as
    /// candidates
    fn on_start_turn(&mut self, others: &[&dyn Character]) -> BattlePhaseResult;

    /// Reacts to the end of a turn, with the other living characters as
    /// candidates
    fn on_end_turn(&mut self, others: &[&dyn Character]) -> BattlePhaseResult;

    /// Deals flat damage, returning the amount actually dealt
    fn take_damage(&mut self, amount: i32) -> i32;

    /// Restores health, returning the amount actually restored
    fn heal(&mut self, amount: i32) -> i32;
}

/// A ready-made character with a flat health pool, a move list, and held
/// items whose tagged effects fire at turn boundaries.
///
/// Move choice is uniformly random over the known moves. The character
/// must know at least one move.
pub struct BasicCharacter {
    id: CharacterId,
    name: String,
    team: String,
    max_health: i32,
    current_health: i32,
    speed: u32,
    moves: Vec<Move>,
    items: Vec<Item>,
    random: SharedRandom,
}

impl BasicCharacter {
    /// Creates a character at full health
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        team: impl Into<String>,
        max_health: i32,
        speed: u32,
        moves: Vec<Move>,
        random: SharedRandom,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            team: team.into(),
            max_health,
            current_health: max_health,
            speed,
            moves,
            items: Vec::new(),
            random,
        }
    }

    /// Gives the character a held item
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Maximum health
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// The items this character holds
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    fn react(&mut self, trigger: ReactionTrigger) -> BattlePhaseResult {
        let mut phase_result = BattlePhaseResult::new();
        if self.is_dead() {
            return phase_result;
        }

        let actor = Actor {
            id: self.id,
            name: self.name.clone(),
        };

        // Items are taken out for the duration so their effects can borrow
        // the bearer mutably.
        let items = std::mem::take(&mut self.items);
        for item in &items {
            let mut results = Vec::new();
            for effect in item.effects_for(trigger) {
                results.push(effect.apply(&actor, self));
            }
            if !results.is_empty() {
                phase_result.push(ActionUseResult {
                    source: item.name().to_string(),
                    results,
                });
            }
        }
        self.items = items;

        phase_result
    }
}

impl Character for BasicCharacter {
    fn id(&self) -> CharacterId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn team(&self) -> &str {
        &self.team
    }

    fn current_speed(&self) -> u32 {
        self.speed
    }

    fn is_dead(&self) -> bool {
        self.current_health <= 0
    }

    fn current_health(&self) -> i32 {
        self.current_health
    }

    fn moves(&self) -> &[Move] {
        &self.moves
    }

    fn choose_move(&mut self, _others: &[&dyn Character]) -> MoveUse {
        let index = self.random.borrow_mut().next(self.moves.len() as u32) as usize;
        MoveUse::new(self.moves[index].id().clone(), self.id)
    }

    fn on_start_turn(&mut self, _others: &[&dyn Character]) -> BattlePhaseResult {
        self.react(ReactionTrigger::StartTurn)
    }

    fn on_end_turn(&mut self, _others: &[&dyn Character]) -> BattlePhaseResult {
        self.react(ReactionTrigger::EndTurn)
    }

    fn take_damage(&mut self, amount: i32) -> i32 {
        let dealt = amount.clamp(0, self.current_health);
        self.current_health -= dealt;
        dealt
    }

    fn heal(&mut self, amount: i32) -> i32 {
        let restored = amount.clamp(0, self.max_health - self.current_health);
        self.current_health += restored;
        restored
    }
}

impl fmt::Debug for BasicCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCharacter")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("team", &self.team)
            .field("health", &self.current_health)
            .field("speed", &self.speed)
            .finish_non_exhaustive()
    }
}
