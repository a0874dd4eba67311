//! The characters taking part in a battle

use std::fmt;

use thiserror::Error;

use crate::character::{Character, CharacterId};

/// Errors from assembling a [`Roster`]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RosterError {
    #[error("duplicate character id {0}")]
    DuplicateId(CharacterId),
}

/// Owns the characters in a battle.
///
/// Team groupings, the over-condition, and the turn order are recomputed
/// on every query so they can never go stale after mid-turn damage.
pub struct Roster {
    characters: Vec<Box<dyn Character>>,
}

impl Roster {
    /// Builds a roster, failing fast on duplicate character ids
    pub fn new(characters: Vec<Box<dyn Character>>) -> Result<Self, RosterError> {
        for (index, character) in characters.iter().enumerate() {
            if characters[..index].iter().any(|c| c.id() == character.id()) {
                return Err(RosterError::DuplicateId(character.id()));
            }
        }
        Ok(Self { characters })
    }

    /// Number of characters, living or dead
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the roster has no characters at all
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// All characters in roster order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Character> {
        self.characters.iter().map(|c| c.as_ref())
    }

    /// Looks up a character by id
    pub fn get(&self, id: CharacterId) -> Option<&dyn Character> {
        self.characters
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    /// Looks up a character by id, mutably
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut (dyn Character + 'static)> {
        self.characters
            .iter_mut()
            .find(|c| c.id() == id)
            .map(|c| c.as_mut())
    }

    /// Characters grouped by team label, teams in first-seen order
    pub fn teams(&self) -> Vec<(&str, Vec<&dyn Character>)> {
        let mut teams: Vec<(&str, Vec<&dyn Character>)> = Vec::new();
        for character in self.iter() {
            match teams.iter_mut().find(|(label, _)| *label == character.team()) {
                Some((_, members)) => members.push(character),
                None => teams.push((character.team(), vec![character])),
            }
        }
        teams
    }

    /// Whether some team has every member dead
    pub fn any_team_defeated(&self) -> bool {
        self.teams()
            .iter()
            .any(|(_, members)| members.iter().all(|c| c.is_dead()))
    }

    /// The single team with a living member, if there is exactly one
    pub fn winning_team(&self) -> Option<String> {
        let mut alive = self
            .teams()
            .into_iter()
            .filter(|(_, members)| members.iter().any(|c| !c.is_dead()));
        let (winner, _) = alive.next()?;
        if alive.next().is_some() {
            return None;
        }
        Some(winner.to_string())
    }

    /// Living characters in action order: descending current speed, with
    /// equal speeds keeping their roster order
    pub fn turn_order(&self) -> Vec<CharacterId> {
        let mut living: Vec<&dyn Character> = self.iter().filter(|c| !c.is_dead()).collect();
        living.sort_by_key(|c| std::cmp::Reverse(c.current_speed()));
        living.iter().map(|c| c.id()).collect()
    }

    /// Immutable references in the order of `ids`, skipping unknown ids
    pub fn by_ids(&self, ids: &[CharacterId]) -> Vec<&dyn Character> {
        ids.iter().filter_map(|&id| self.get(id)).collect()
    }

    /// Borrows `id` mutably together with immutable borrows of `others`
    /// (in the order given), and runs `f` with both
    pub fn with_character_mut<R>(
        &mut self,
        id: CharacterId,
        others: &[CharacterId],
        f: impl FnOnce(&mut dyn Character, &[&dyn Character]) -> R,
    ) -> Option<R> {
        let index = self.index_of(id)?;
        let (left, rest) = self.characters.split_at_mut(index);
        let (me, right) = rest.split_first_mut()?;

        let pool: Vec<&dyn Character> = left
            .iter()
            .chain(right.iter())
            .map(|c| c.as_ref())
            .collect();
        let candidates: Vec<&dyn Character> = others
            .iter()
            .filter_map(|&other| pool.iter().copied().find(|c| c.id() == other))
            .collect();

        Some(f(me.as_mut(), &candidates))
    }

    /// Borrows two distinct characters at once, `a` immutably and `b`
    /// mutably. Returns `None` if either is missing or `a == b`.
    pub fn pair_mut(
        &mut self,
        a: CharacterId,
        b: CharacterId,
    ) -> Option<(&dyn Character, &mut dyn Character)> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        if ia == ib {
            return None;
        }

        if ia < ib {
            let (left, right) = self.characters.split_at_mut(ib);
            Some((left[ia].as_ref(), right[0].as_mut()))
        } else {
            let (left, right) = self.characters.split_at_mut(ia);
            Some((right[0].as_ref(), left[ib].as_mut()))
        }
    }

    fn index_of(&self, id: CharacterId) -> Option<usize> {
        self.characters.iter().position(|c| c.id() == id)
    }
}

impl fmt::Debug for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<CharacterId> = self.iter().map(|c| c.id()).collect();
        f.debug_struct("Roster").field("characters", &ids).finish()
    }
}
