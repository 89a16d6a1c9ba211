//! Per-playthrough game state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The mutable record of a single playthrough.
///
/// Created once at playthrough start and mutated exclusively through
/// [`Mutator`](crate::mutator::Mutator) application. The whole record is a
/// plain serializable value so a frontend can snapshot and restore it
/// between sessions. Ordered sets keep snapshots deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Key of the scene the player is currently in.
    pub current_scene: String,
    /// Items the player holds. Presence only, no quantities.
    pub inventory: BTreeSet<String>,
    /// Arbitrary per-playthrough flags. Flag names are globally unique
    /// strings; scoping them is the story author's responsibility.
    pub flags: BTreeSet<String>,
    /// Keys of scenes the player has formally arrived in.
    pub visited: BTreeSet<String>,
    /// Set once the story ends; the engine accepts no input afterwards.
    pub ended: bool,
}

impl GameState {
    /// Create a fresh state at the given starting scene.
    pub fn new(first_scene: impl Into<String>) -> Self {
        Self {
            current_scene: first_scene.into(),
            inventory: BTreeSet::new(),
            flags: BTreeSet::new(),
            visited: BTreeSet::new(),
            ended: false,
        }
    }

    /// Check whether the player holds an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.contains(item)
    }

    /// Add an item to the inventory. Re-adding a held item is a no-op.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.insert(item.into());
    }

    /// Remove an item from the inventory. Removing an absent item is a no-op.
    pub fn remove_item(&mut self, item: &str) {
        self.inventory.remove(item);
    }

    /// Check whether a flag is set.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Set a flag. Setting an already-set flag is a no-op.
    pub fn set_flag(&mut self, flag: impl Into<String>) {
        self.flags.insert(flag.into());
    }

    /// Clear a flag. Clearing an unset flag is a no-op.
    pub fn clear_flag(&mut self, flag: &str) {
        self.flags.remove(flag);
    }

    /// Check whether the player has formally arrived in a scene before.
    pub fn has_visited(&self, scene: &str) -> bool {
        self.visited.contains(scene)
    }

    /// Record a formal arrival in a scene.
    pub fn mark_visited(&mut self, scene: impl Into<String>) {
        self.visited.insert(scene.into());
    }
}
