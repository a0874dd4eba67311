//! Move definitions and pending move uses

use std::fmt;

use thiserror::Error;

use crate::character::CharacterId;
use crate::effects::{ActionResult, Effect};
use crate::success::SuccessCalculator;
use crate::targets::TargetCalculator;

/// Identifier of a move definition.
///
/// Derived from the move's name by default, so the `(move, user)` history
/// key is stable across runs and survives replay; never compared by
/// reference identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveId(String);

impl MoveId {
    /// Creates an id from an explicit string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MoveId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Outcome of applying a single move use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveUseResult {
    /// The move went off
    Success,
    /// The move missed its targets
    Miss,
    /// The move fizzled before going off
    Failure,
}

impl MoveUseResult {
    /// Whether the move went off
    pub fn is_success(&self) -> bool {
        matches!(self, MoveUseResult::Success)
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveUseResult::Success => "success",
            MoveUseResult::Miss => "miss",
            MoveUseResult::Failure => "failure",
        }
    }
}

impl fmt::Display for MoveUseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reusable action definition a character can choose to perform.
///
/// A move owns its target-selection strategy, its success calculator, and
/// the effects it applies on success. Built through [`Move::builder`].
pub struct Move {
    id: MoveId,
    name: String,
    targets: Box<dyn TargetCalculator>,
    success: Box<dyn SuccessCalculator>,
    effects: Vec<Box<dyn Effect>>,
}

impl Move {
    /// Starts building a move
    pub fn builder() -> MoveBuilder {
        MoveBuilder::default()
    }

    /// The move's identifier
    pub fn id(&self) -> &MoveId {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The strategy resolving this move's targets
    pub fn target_calculator(&self) -> &dyn TargetCalculator {
        self.targets.as_ref()
    }

    /// The strategy deciding whether a use succeeds
    pub fn success_calculator(&self) -> &dyn SuccessCalculator {
        self.success.as_ref()
    }

    /// The effects applied to each target on success
    pub fn effects(&self) -> &[Box<dyn Effect>] {
        &self.effects
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Move")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("effects", &self.effects.len())
            .finish_non_exhaustive()
    }
}

/// Errors from building a [`Move`] with mandatory configuration missing
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveBuilderError {
    #[error("move has no name")]
    MissingName,

    #[error("move `{0}` has no target calculator")]
    MissingTargetCalculator(String),

    #[error("move `{0}` has no success calculator")]
    MissingSuccessCalculator(String),
}

/// Builder for [`Move`].
///
/// Building fails fast when a mandatory piece of configuration is missing,
/// so a half-configured move can never enter a battle.
#[derive(Default)]
pub struct MoveBuilder {
    id: Option<MoveId>,
    name: Option<String>,
    targets: Option<Box<dyn TargetCalculator>>,
    success: Option<Box<dyn SuccessCalculator>>,
    effects: Vec<Box<dyn Effect>>,
}

impl MoveBuilder {
    /// Sets the display name. Also derives the id unless one is set
    /// explicitly.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Overrides the id derived from the name
    pub fn id(mut self, id: impl Into<MoveId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the target-selection strategy
    pub fn with_targets(mut self, targets: impl TargetCalculator + 'static) -> Self {
        self.targets = Some(Box::new(targets));
        self
    }

    /// Sets the success calculator
    pub fn with_success(mut self, success: impl SuccessCalculator + 'static) -> Self {
        self.success = Some(Box::new(success));
        self
    }

    /// Adds an effect applied to each target on success
    pub fn with_effect(mut self, effect: impl Effect + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    /// Builds the move, failing if the name, target calculator, or success
    /// calculator is missing
    pub fn build(self) -> Result<Move, MoveBuilderError> {
        let name = self.name.ok_or(MoveBuilderError::MissingName)?;
        let targets = self
            .targets
            .ok_or_else(|| MoveBuilderError::MissingTargetCalculator(name.clone()))?;
        let success = self
            .success
            .ok_or_else(|| MoveBuilderError::MissingSuccessCalculator(name.clone()))?;
        let id = self.id.unwrap_or_else(|| MoveId::new(name.clone()));

        Ok(Move {
            id,
            name,
            targets,
            success,
            effects: self.effects,
        })
    }
}

/// One pending or applied instance of a character using a move.
///
/// Targets go from unset to set exactly once, before the use is queued for
/// execution. A result appears only if applying the use actually rolled
/// the move; a use whose user was knocked out first, or which had no legal
/// target, stays without one.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveUse {
    move_id: MoveId,
    user: CharacterId,
    targets: Option<Vec<CharacterId>>,
    result: Option<MoveUseResult>,
    effect_results: Vec<ActionResult>,
}

impl MoveUse {
    /// Creates a pending use with targets unset
    pub fn new(move_id: MoveId, user: CharacterId) -> Self {
        Self {
            move_id,
            user,
            targets: None,
            result: None,
            effect_results: Vec::new(),
        }
    }

    /// The move being used
    pub fn move_id(&self) -> &MoveId {
        &self.move_id
    }

    /// The character using the move
    pub fn user(&self) -> CharacterId {
        self.user
    }

    /// The resolved targets: `None` until resolution, empty when no legal
    /// target existed
    pub fn targets(&self) -> Option<&[CharacterId]> {
        self.targets.as_deref()
    }

    /// Records the resolved target set. Called at most once, before the
    /// use is queued.
    pub fn set_targets(&mut self, targets: Vec<CharacterId>) {
        debug_assert!(self.targets.is_none(), "targets are resolved exactly once");
        self.targets = Some(targets);
    }

    /// The outcome, if applying this use rolled the move
    pub fn result(&self) -> Option<MoveUseResult> {
        self.result
    }

    /// Whether applying this use produced a result
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// Attaches the outcome of applying this use. Recorded by the move
    /// processor.
    pub fn set_result(&mut self, result: MoveUseResult) {
        self.result = Some(result);
    }

    /// What the move's effects did to each target, in application order
    pub fn effect_results(&self) -> &[ActionResult] {
        &self.effect_results
    }

    /// Appends one effect outcome. Recorded by the move processor.
    pub fn add_effect_result(&mut self, result: ActionResult) {
        self.effect_results.push(result);
    }
}
