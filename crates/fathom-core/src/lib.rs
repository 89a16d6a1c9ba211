//! Core types and resolution engine for Fathom branching text adventures.
//!
//! This crate defines the immutable story model that the DSL compiles into,
//! plus everything needed to play it: requirement evaluation, mutator
//! application, first-match action resolution, and the turn-based engine
//! loop. It is independent of the loader — you can construct a [`Story`]
//! programmatically or compile one from `.story` files with `fathom-dsl`.

/// The engine loop: turn orchestration and arrival chaining.
pub mod engine;
/// Error types used throughout the crate.
pub mod error;
/// State mutators applied when an outcome is selected.
pub mod mutator;
/// Requirement predicates gating outcomes.
pub mod requirement;
/// Action resolution: first-match outcome selection.
pub mod resolve;
/// Per-playthrough game state.
pub mod state;
/// The immutable story model: scenes, actions, and outcomes.
pub mod story;
/// Input vocabulary: turning raw player text into action keys.
pub mod vocab;

/// Re-export engine types.
pub use engine::{Engine, EngineStatus, MAX_ARRIVAL_DEPTH, Turn};
/// Re-export error types.
pub use error::{EngineError, EngineResult};
/// Re-export mutator types.
pub use mutator::Mutator;
/// Re-export requirement types.
pub use requirement::Requirement;
/// Re-export resolution types.
pub use resolve::Resolution;
/// Re-export game state.
pub use state::GameState;
/// Re-export story model types.
pub use story::{ActionKey, Outcome, Scene, Story, StoryMeta};
/// Re-export the input vocabulary.
pub use vocab::Vocabulary;
