//! The immutable story model: scenes, actions, and outcomes.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{EngineError, EngineResult};
use crate::mutator::Mutator;
use crate::requirement::Requirement;

/// Identifier of a player-triggerable or control action within a scene.
///
/// The two reserved control keys get their own variants so engine dispatch
/// is exhaustive rather than string-matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKey {
    /// Control action resolved automatically when the player enters a scene.
    Arrive,
    /// Control action resolved when player input matches no defined action.
    NoMatch,
    /// An ordinary player command, e.g. `"go north"`.
    Command(String),
}

impl ActionKey {
    /// Parse an action key as written in story content. `_arrive` and
    /// `_no_match` map to the control variants, anything else is a command.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "_arrive" => ActionKey::Arrive,
            "_no_match" => ActionKey::NoMatch,
            other => ActionKey::Command(other.to_string()),
        }
    }

    /// Build an ordinary command key.
    pub fn command(raw: impl Into<String>) -> Self {
        ActionKey::Command(raw.into())
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKey::Arrive => write!(f, "_arrive"),
            ActionKey::NoMatch => write!(f, "_no_match"),
            ActionKey::Command(cmd) => write!(f, "{cmd}"),
        }
    }
}

/// One candidate resolution for an action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// Requirements gating this outcome. Empty means always satisfied, so
    /// an unconditional outcome placed last acts as the fallback.
    pub requirements: Vec<Requirement>,
    /// State mutations applied when this outcome is selected.
    pub mutators: Vec<Mutator>,
    /// Narration paragraphs, rendered in order. May be empty.
    pub narration: Vec<String>,
}

/// A named node in the story graph.
///
/// Actions map keys to shared outcome sequences. Aliased keys point at the
/// same `Arc`, so editing content can never make aliases diverge.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Unique key of this scene within the story.
    pub key: String,
    actions: HashMap<ActionKey, Arc<[Outcome]>>,
}

impl Scene {
    /// Create an empty scene with the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            actions: HashMap::new(),
        }
    }

    /// Add an action with its ordered outcome list.
    ///
    /// Fails if the scene already defines the key; duplicates are an
    /// authoring bug the loader must surface, not silently overwrite.
    pub fn add_action(
        &mut self,
        key: ActionKey,
        outcomes: impl Into<Arc<[Outcome]>>,
    ) -> EngineResult<()> {
        if self.actions.contains_key(&key) {
            return Err(EngineError::DuplicateAction {
                scene: self.key.clone(),
                key,
            });
        }
        self.actions.insert(key, outcomes.into());
        Ok(())
    }

    /// Add an alias sharing the outcome list of an existing action.
    pub fn add_alias(&mut self, existing: &ActionKey, alias: ActionKey) -> EngineResult<()> {
        let outcomes = self
            .actions
            .get(existing)
            .cloned()
            .ok_or_else(|| EngineError::UnknownAliasTarget {
                scene: self.key.clone(),
                key: existing.clone(),
            })?;
        if self.actions.contains_key(&alias) {
            return Err(EngineError::DuplicateAction {
                scene: self.key.clone(),
                key: alias,
            });
        }
        self.actions.insert(alias, outcomes);
        Ok(())
    }

    /// Look up the outcome list for an action key.
    pub fn action(&self, key: &ActionKey) -> Option<&[Outcome]> {
        self.actions.get(key).map(|outcomes| &outcomes[..])
    }

    /// Iterate over the defined action keys, in no particular order.
    pub fn action_keys(&self) -> impl Iterator<Item = &ActionKey> {
        self.actions.keys()
    }

    /// Number of actions defined in this scene (aliases included).
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Total number of outcomes across all actions (aliases counted once
    /// per key, since each key is independently playable).
    pub fn outcome_count(&self) -> usize {
        self.actions.values().map(|o| o.len()).sum()
    }

    /// Whether this scene defines any ordinary command action.
    pub fn accepts_input(&self) -> bool {
        self.actions
            .keys()
            .any(|k| matches!(k, ActionKey::Command(_)))
    }
}

/// Story metadata: title and entry point.
#[derive(Debug, Clone)]
pub struct StoryMeta {
    /// Title shown to the player at playthrough start.
    pub title: String,
    /// Key of the scene the playthrough starts in.
    pub first_scene: String,
    /// Action resolved before any player input, conventionally `_arrive`.
    pub first_action: ActionKey,
}

impl StoryMeta {
    /// Create metadata with the conventional `_arrive` opening action.
    pub fn new(title: impl Into<String>, first_scene: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            first_scene: first_scene.into(),
            first_action: ActionKey::Arrive,
        }
    }
}

/// The complete, immutable story model.
///
/// Built once by the loader (or programmatically, in tests) and read-only
/// while a playthrough runs.
#[derive(Debug, Clone)]
pub struct Story {
    /// Story metadata.
    pub meta: StoryMeta,
    scenes: HashMap<String, Scene>,
}

impl Story {
    /// Create an empty story with the given metadata.
    pub fn new(meta: StoryMeta) -> Self {
        Self {
            meta,
            scenes: HashMap::new(),
        }
    }

    /// Add a scene. Fails on a duplicate key.
    pub fn add_scene(&mut self, scene: Scene) -> EngineResult<()> {
        if self.scenes.contains_key(&scene.key) {
            return Err(EngineError::DuplicateScene(scene.key));
        }
        self.scenes.insert(scene.key.clone(), scene);
        Ok(())
    }

    /// Look up a scene by key.
    pub fn scene(&self, key: &str) -> Option<&Scene> {
        self.scenes.get(key)
    }

    /// Iterate over all scenes, in no particular order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    /// Number of scenes in the story.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_key_parse() {
        assert_eq!(ActionKey::parse("_arrive"), ActionKey::Arrive);
        assert_eq!(ActionKey::parse("_no_match"), ActionKey::NoMatch);
        assert_eq!(
            ActionKey::parse("go north"),
            ActionKey::Command("go north".into())
        );
    }

    #[test]
    fn action_key_display() {
        assert_eq!(ActionKey::Arrive.to_string(), "_arrive");
        assert_eq!(ActionKey::NoMatch.to_string(), "_no_match");
        assert_eq!(ActionKey::command("look").to_string(), "look");
    }

    #[test]
    fn duplicate_action_rejected() {
        let mut scene = Scene::new("cove");
        scene
            .add_action(ActionKey::command("look"), vec![Outcome::default()])
            .unwrap();
        let err = scene
            .add_action(ActionKey::command("look"), vec![Outcome::default()])
            .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateAction { .. }));
    }

    #[test]
    fn alias_shares_outcomes() {
        let mut scene = Scene::new("beach_standing");
        let outcome = Outcome {
            narration: vec!["You head north.".into()],
            ..Outcome::default()
        };
        scene
            .add_action(ActionKey::command("go north"), vec![outcome])
            .unwrap();
        scene
            .add_alias(&ActionKey::command("go north"), ActionKey::command("go cove"))
            .unwrap();

        let original = scene.action(&ActionKey::command("go north")).unwrap();
        let aliased = scene.action(&ActionKey::command("go cove")).unwrap();
        assert_eq!(original, aliased);
        // Same allocation, not a copy
        assert!(std::ptr::eq(original.as_ptr(), aliased.as_ptr()));
    }

    #[test]
    fn alias_of_unknown_action_rejected() {
        let mut scene = Scene::new("cove");
        let err = scene
            .add_alias(&ActionKey::command("go north"), ActionKey::command("go cove"))
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownAliasTarget { .. }));
    }

    #[test]
    fn duplicate_scene_rejected() {
        let mut story = Story::new(StoryMeta::new("Test", "cove"));
        story.add_scene(Scene::new("cove")).unwrap();
        let err = story.add_scene(Scene::new("cove")).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateScene(_)));
    }

    #[test]
    fn accepts_input_ignores_control_keys() {
        let mut scene = Scene::new("finale");
        scene
            .add_action(ActionKey::Arrive, vec![Outcome::default()])
            .unwrap();
        assert!(!scene.accepts_input());

        scene
            .add_action(ActionKey::command("look"), vec![Outcome::default()])
            .unwrap();
        assert!(scene.accepts_input());
    }
}
