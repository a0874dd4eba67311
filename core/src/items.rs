//! Held items and the results their actions produce at turn boundaries

use std::fmt;

use thiserror::Error;

use crate::effects::{ActionResult, Effect};

/// When an item's tagged effect fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReactionTrigger {
    /// Fires during the start-of-turn phase
    StartTurn,
    /// Fires during the end-of-turn phase
    EndTurn,
}

/// An item a character holds, carrying effects tagged with the turn
/// boundary they fire at
pub struct Item {
    name: String,
    actions: Vec<(ReactionTrigger, Box<dyn Effect>)>,
}

impl Item {
    /// Starts building an item
    pub fn builder() -> ItemBuilder {
        ItemBuilder::default()
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The effects tagged to fire at `trigger`, in insertion order
    pub fn effects_for(&self, trigger: ReactionTrigger) -> impl Iterator<Item = &dyn Effect> {
        self.actions
            .iter()
            .filter(move |(tag, _)| *tag == trigger)
            .map(|(_, effect)| effect.as_ref())
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("name", &self.name)
            .field("actions", &self.actions.len())
            .finish()
    }
}

/// Errors from building an [`Item`]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ItemBuilderError {
    #[error("item has no name")]
    MissingName,
}

/// Builder for [`Item`]
#[derive(Default)]
pub struct ItemBuilder {
    name: Option<String>,
    actions: Vec<(ReactionTrigger, Box<dyn Effect>)>,
}

impl ItemBuilder {
    /// Sets the display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds an effect that fires at the start of each turn
    pub fn with_start_turn_effect(self, effect: impl Effect + 'static) -> Self {
        self.with_tagged_effect(ReactionTrigger::StartTurn, effect)
    }

    /// Adds an effect that fires at the end of each turn
    pub fn with_end_turn_effect(self, effect: impl Effect + 'static) -> Self {
        self.with_tagged_effect(ReactionTrigger::EndTurn, effect)
    }

    /// Adds an effect that fires at `trigger`
    pub fn with_tagged_effect(
        mut self,
        trigger: ReactionTrigger,
        effect: impl Effect + 'static,
    ) -> Self {
        self.actions.push((trigger, Box::new(effect)));
        self
    }

    /// Builds the item, failing if the name is missing
    pub fn build(self) -> Result<Item, ItemBuilderError> {
        let name = self.name.ok_or(ItemBuilderError::MissingName)?;
        Ok(Item {
            name,
            actions: self.actions,
        })
    }
}

/// The results of one item's actions during a phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionUseResult {
    /// Name of the item the actions came from
    pub source: String,
    /// One result per affected target, in application order
    pub results: Vec<ActionResult>,
}

/// Everything item-triggered that happened during a start- or end-of-turn
/// phase. Consumed for display, then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattlePhaseResult {
    /// Item action outcomes in the order they occurred
    pub item_results: Vec<ActionUseResult>,
}

impl BattlePhaseResult {
    /// Creates an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one item's outcomes
    pub fn push(&mut self, result: ActionUseResult) {
        self.item_results.push(result);
    }

    /// Whether nothing happened during the phase
    pub fn is_empty(&self) -> bool {
        self.item_results.is_empty()
    }
}
