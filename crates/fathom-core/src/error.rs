use crate::story::ActionKey;

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while building a story model or driving the engine loop.
///
/// Apart from [`EngineError::StoryOver`], every variant indicates malformed
/// story content rather than a player-facing condition.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The current scene key does not exist in the story model.
    #[error("scene not found: \"{0}\"")]
    SceneNotFound(String),

    /// A scene with the same key was already added to the story.
    #[error("duplicate scene: \"{0}\"")]
    DuplicateScene(String),

    /// An action with the same key was already added to the scene.
    #[error("duplicate action \"{key}\" in scene \"{scene}\"")]
    DuplicateAction {
        /// The scene holding the clashing actions.
        scene: String,
        /// The action key that appears twice.
        key: ActionKey,
    },

    /// An alias referred to an action that is not defined in the scene.
    #[error("cannot alias \"{key}\" in scene \"{scene}\": no such action")]
    UnknownAliasTarget {
        /// The scene the alias was declared in.
        scene: String,
        /// The action key the alias points at.
        key: ActionKey,
    },

    /// Player input could not be resolved and the scene defines no
    /// `_no_match` fallback.
    #[error("scene \"{0}\" has no _no_match fallback")]
    MissingFallback(String),

    /// Arrival mutators kept moving the player past the chaining cap.
    #[error("arrival chain exceeded {depth} scenes at \"{scene}\"")]
    ArrivalOverflow {
        /// The scene the chain was entering when the cap was hit.
        scene: String,
        /// The depth cap that was exceeded.
        depth: usize,
    },

    /// The story has already ended; no further input is accepted.
    #[error("the story has ended")]
    StoryOver,
}
