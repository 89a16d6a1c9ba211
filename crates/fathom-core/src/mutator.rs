//! State mutators applied when an outcome is selected.

use crate::state::GameState;

/// A state transformation carried by an outcome.
///
/// Mutators are applied in document order; later mutators see the effect of
/// earlier ones within the same outcome. Application cannot fail: every kind
/// is idempotent in effect, so re-adding a held item or re-clearing an unset
/// flag is a no-op rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutator {
    /// Put the named item in the player's inventory.
    AddItem(String),
    /// Remove the named item from the player's inventory.
    RemoveItem(String),
    /// Set the named flag.
    SetFlag(String),
    /// Clear the named flag.
    ClearFlag(String),
    /// Move the player to the named scene without marking an arrival.
    MoveTo(String),
    /// Move the player to the named scene and mark it visited. Used by
    /// `_arrive` outcomes so first-visit narration does not repeat.
    ArriveAt(String),
    /// End the story. Terminal; the engine accepts no input afterwards.
    EndGame,
}

impl Mutator {
    /// Apply this mutator to the given state.
    pub fn apply(&self, state: &mut GameState) {
        match self {
            Mutator::AddItem(item) => state.add_item(item.clone()),
            Mutator::RemoveItem(item) => state.remove_item(item),
            Mutator::SetFlag(flag) => state.set_flag(flag.clone()),
            Mutator::ClearFlag(flag) => state.clear_flag(flag),
            Mutator::MoveTo(scene) => state.current_scene = scene.clone(),
            Mutator::ArriveAt(scene) => {
                state.current_scene = scene.clone();
                state.mark_visited(scene.clone());
            }
            Mutator::EndGame => state.ended = true,
        }
    }
}

/// Apply a mutator list to the state, in order.
pub fn apply_all(mutators: &[Mutator], state: &mut GameState) {
    for mutator in mutators {
        mutator.apply(state);
    }
}
