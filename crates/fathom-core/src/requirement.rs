//! Requirement predicates gating outcomes.

use crate::state::GameState;

/// A predicate over [`GameState`] gating an outcome.
///
/// Each kind is a direct membership test. Unknown kinds are unrepresentable:
/// the loader rejects anything that does not map onto a variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// The player holds the named item.
    HasItem(String),
    /// The player does not hold the named item.
    LacksItem(String),
    /// The named flag is set.
    HasFlag(String),
    /// The named flag is not set.
    LacksFlag(String),
    /// The player has formally arrived in the named scene before.
    Visited(String),
    /// The player has never formally arrived in the named scene.
    NotVisited(String),
}

impl Requirement {
    /// Evaluate this predicate against the given state. Pure.
    pub fn holds(&self, state: &GameState) -> bool {
        match self {
            Requirement::HasItem(item) => state.has_item(item),
            Requirement::LacksItem(item) => !state.has_item(item),
            Requirement::HasFlag(flag) => state.has_flag(flag),
            Requirement::LacksFlag(flag) => !state.has_flag(flag),
            Requirement::Visited(scene) => state.has_visited(scene),
            Requirement::NotVisited(scene) => !state.has_visited(scene),
        }
    }
}

/// Evaluate a requirement list against the given state.
///
/// Requirements are ANDed; an empty list is vacuously satisfied. Pure: the
/// state is never mutated and identical inputs always yield identical
/// results.
pub fn evaluate(requirements: &[Requirement], state: &GameState) -> bool {
    requirements.iter().all(|r| r.holds(state))
}
