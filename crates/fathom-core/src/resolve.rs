//! Action resolution: first-match outcome selection.

use crate::error::{EngineError, EngineResult};
use crate::requirement::evaluate;
use crate::state::GameState;
use crate::story::{ActionKey, Outcome, Story};

/// Result of resolving an action key within a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// The first outcome whose requirements all hold. Later outcomes were
    /// not evaluated.
    Selected(&'a Outcome),
    /// The action key is defined but every outcome failed its requirements.
    /// A valid, silent turn: no narration, no mutation.
    NoEligibleOutcome,
    /// The scene does not define the action key. For player commands the
    /// engine retries with [`ActionKey::NoMatch`].
    UnknownAction,
}

impl Story {
    /// Resolve an action key in the given scene against the given state.
    ///
    /// The scene itself must exist; a missing scene is a content-integrity
    /// error, not a recoverable case.
    pub fn resolve(
        &self,
        scene_key: &str,
        action: &ActionKey,
        state: &GameState,
    ) -> EngineResult<Resolution<'_>> {
        let scene = self
            .scene(scene_key)
            .ok_or_else(|| EngineError::SceneNotFound(scene_key.to_string()))?;

        let Some(outcomes) = scene.action(action) else {
            return Ok(Resolution::UnknownAction);
        };

        Ok(outcomes
            .iter()
            .find(|outcome| evaluate(&outcome.requirements, state))
            .map_or(Resolution::NoEligibleOutcome, Resolution::Selected))
    }
}
