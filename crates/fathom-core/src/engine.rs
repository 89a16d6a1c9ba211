//! The engine loop: turn orchestration and arrival chaining.

use crate::error::{EngineError, EngineResult};
use crate::mutator::apply_all;
use crate::resolve::Resolution;
use crate::state::GameState;
use crate::story::{ActionKey, Story};

/// Cap on chained arrivals within a single turn. Well-formed content never
/// comes close; exceeding it means the story moves the player in a cycle.
pub const MAX_ARRIVAL_DEPTH: usize = 16;

/// Whether the engine still accepts input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// The playthrough is in progress.
    Running,
    /// The story has ended. Terminal.
    Ended,
}

/// Everything a frontend needs to render one resolved turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Turn {
    /// Narration paragraphs, in order. Empty for a silent turn.
    pub narration: Vec<String>,
    /// True if this turn ended the story.
    pub ended: bool,
}

/// Drives a single playthrough of a story.
///
/// Turn-based and single-threaded: for a fixed story and input sequence the
/// narration and final state are fully deterministic.
#[derive(Debug)]
pub struct Engine {
    story: Story,
    state: GameState,
}

impl Engine {
    /// Create an engine with a fresh game state at the story's first scene.
    pub fn new(story: Story) -> Self {
        let state = GameState::new(story.meta.first_scene.clone());
        Self { story, state }
    }

    /// Create an engine resuming from a previously snapshotted state.
    pub fn restore(story: Story, state: GameState) -> Self {
        Self { story, state }
    }

    /// The story being played.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// The current game state, e.g. for snapshotting.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Whether the engine still accepts input.
    pub fn status(&self) -> EngineStatus {
        if self.state.ended {
            EngineStatus::Ended
        } else {
            EngineStatus::Running
        }
    }

    /// Run the story's opening action, guaranteeing the opening narration
    /// plays before any player input is accepted.
    pub fn start(&mut self) -> EngineResult<Turn> {
        let opening = self.story.meta.first_action.clone();
        self.run(&opening)
    }

    /// Resolve one player-supplied action key and apply its effects.
    ///
    /// Once the story has ended every call fails with
    /// [`EngineError::StoryOver`]; termination is reported explicitly,
    /// never as a silent no-op.
    pub fn perform(&mut self, key: &ActionKey) -> EngineResult<Turn> {
        if self.state.ended {
            return Err(EngineError::StoryOver);
        }
        self.run(key)
    }

    /// Resolve an action, apply its mutators, and chase scene changes with
    /// `_arrive` resolutions until the scene settles or the story ends.
    ///
    /// Chaining is a bounded loop, not recursion: arrival outcomes may move
    /// the player again, and the cap turns a content cycle into an error
    /// instead of an endless turn.
    fn run(&mut self, key: &ActionKey) -> EngineResult<Turn> {
        let mut narration = Vec::new();
        let mut pending = key.clone();
        let mut chained = 0usize;

        loop {
            let scene_key = self.state.current_scene.clone();
            let mut resolution = self.story.resolve(&scene_key, &pending, &self.state)?;

            // Unknown player commands fall back to the scene's _no_match
            // action. Control keys never fall back: a scene without
            // _arrive simply produces a silent arrival.
            if matches!(resolution, Resolution::UnknownAction)
                && matches!(pending, ActionKey::Command(_))
            {
                resolution = self
                    .story
                    .resolve(&scene_key, &ActionKey::NoMatch, &self.state)?;
                if matches!(resolution, Resolution::UnknownAction) {
                    return Err(EngineError::MissingFallback(scene_key));
                }
            }

            if let Resolution::Selected(outcome) = resolution {
                narration.extend(outcome.narration.iter().cloned());
                apply_all(&outcome.mutators, &mut self.state);
            }

            if self.state.ended || self.state.current_scene == scene_key {
                break;
            }

            chained += 1;
            if chained > MAX_ARRIVAL_DEPTH {
                return Err(EngineError::ArrivalOverflow {
                    scene: self.state.current_scene.clone(),
                    depth: MAX_ARRIVAL_DEPTH,
                });
            }
            pending = ActionKey::Arrive;
        }

        Ok(Turn {
            narration,
            ended: self.state.ended,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutator::Mutator;
    use crate::requirement::Requirement;
    use crate::story::{Outcome, Scene, StoryMeta};

    fn text(paragraph: &str) -> Outcome {
        Outcome {
            narration: vec![paragraph.to_string()],
            ..Outcome::default()
        }
    }

    /// The beach story from the sample content, trimmed to what the engine
    /// tests exercise.
    fn beach_story() -> Story {
        let mut lying = Scene::new("beach_lying");
        lying
            .add_action(
                ActionKey::Arrive,
                vec![text("Lying on your back, you feel warm sand beneath you.")],
            )
            .unwrap();
        lying
            .add_action(
                ActionKey::command("stand"),
                vec![Outcome {
                    mutators: vec![Mutator::MoveTo("beach_standing".into())],
                    ..Outcome::default()
                }],
            )
            .unwrap();
        lying
            .add_action(
                ActionKey::NoMatch,
                vec![text("Perhaps you should stand up first...")],
            )
            .unwrap();

        let mut standing = Scene::new("beach_standing");
        standing
            .add_action(
                ActionKey::Arrive,
                vec![
                    Outcome {
                        requirements: vec![Requirement::NotVisited("beach_standing".into())],
                        mutators: vec![Mutator::ArriveAt("beach_standing".into())],
                        narration: vec![
                            "You clamber to your feet and take in the beach for the first time."
                                .into(),
                        ],
                    },
                    Outcome {
                        requirements: vec![Requirement::Visited("beach_standing".into())],
                        mutators: vec![],
                        narration: vec!["The beach stretches out before you.".into()],
                    },
                ],
            )
            .unwrap();
        standing
            .add_action(
                ActionKey::command("lie down"),
                vec![Outcome {
                    requirements: vec![],
                    mutators: vec![Mutator::MoveTo("beach_lying".into())],
                    narration: vec!["You settle back onto the sand.".into()],
                }],
            )
            .unwrap();
        standing
            .add_action(
                ActionKey::command("get crab"),
                vec![
                    Outcome {
                        requirements: vec![Requirement::HasItem("net".into())],
                        mutators: vec![Mutator::AddItem("crab".into())],
                        narration: vec!["You scoop up the crab with your net.".into()],
                    },
                    Outcome {
                        requirements: vec![],
                        mutators: vec![],
                        narration: vec!["The crab scuttles off between the rocks.".into()],
                    },
                ],
            )
            .unwrap();
        standing
            .add_action(
                ActionKey::command("use net"),
                vec![
                    Outcome {
                        requirements: vec![Requirement::HasItem("net".into())],
                        mutators: vec![],
                        narration: vec!["You sweep the net through the shallows.".into()],
                    },
                    Outcome {
                        requirements: vec![],
                        mutators: vec![],
                        narration: vec!["You don't have a net.".into()],
                    },
                ],
            )
            .unwrap();
        standing
            .add_action(
                ActionKey::command("dive"),
                vec![Outcome {
                    requirements: vec![],
                    mutators: vec![Mutator::EndGame],
                    narration: vec!["The undertow takes you. The story ends here.".into()],
                }],
            )
            .unwrap();
        standing
            .add_action(ActionKey::NoMatch, vec![text("Nothing happens.")])
            .unwrap();

        let mut story = Story::new(StoryMeta::new("Sandy Shores", "beach_lying"));
        story.add_scene(lying).unwrap();
        story.add_scene(standing).unwrap();
        story
    }

    #[test]
    fn opening_narration_plays_before_input() {
        let mut engine = Engine::new(beach_story());
        let turn = engine.start().unwrap();
        assert!(turn.narration[0].starts_with("Lying on your back"));
        assert!(!turn.ended);
        assert_eq!(engine.status(), EngineStatus::Running);
    }

    #[test]
    fn scene_change_chains_arrival() {
        let mut engine = Engine::new(beach_story());
        engine.start().unwrap();

        let turn = engine.perform(&ActionKey::command("stand")).unwrap();
        assert_eq!(engine.state().current_scene, "beach_standing");
        assert!(engine.state().has_visited("beach_standing"));
        assert!(turn.narration[0].contains("first time"));
    }

    #[test]
    fn second_arrival_uses_visited_variant() {
        let mut engine = Engine::new(beach_story());
        engine.start().unwrap();
        engine.perform(&ActionKey::command("stand")).unwrap();
        engine.perform(&ActionKey::command("lie down")).unwrap();

        let turn = engine.perform(&ActionKey::command("stand")).unwrap();
        assert!(
            turn.narration
                .iter()
                .any(|p| p.contains("stretches out before you"))
        );
    }

    #[test]
    fn first_match_blocks_later_outcomes() {
        let mut engine = Engine::new(beach_story());
        engine.start().unwrap();
        engine.perform(&ActionKey::command("stand")).unwrap();

        let turn = engine.perform(&ActionKey::command("get crab")).unwrap();
        assert!(turn.narration[0].contains("scuttles off"));
        assert!(!engine.state().has_item("crab"));
    }

    #[test]
    fn use_net_without_net() {
        let mut engine = Engine::new(beach_story());
        engine.start().unwrap();
        engine.perform(&ActionKey::command("stand")).unwrap();

        let turn = engine.perform(&ActionKey::command("use net")).unwrap();
        assert_eq!(turn.narration, vec!["You don't have a net.".to_string()]);
    }

    #[test]
    fn unknown_input_falls_back_to_no_match() {
        let mut engine = Engine::new(beach_story());
        engine.start().unwrap();

        let turn = engine.perform(&ActionKey::command("fly")).unwrap();
        assert_eq!(
            turn.narration,
            vec!["Perhaps you should stand up first...".to_string()]
        );
        assert_eq!(engine.state().current_scene, "beach_lying");
    }

    #[test]
    fn ended_story_rejects_input_explicitly() {
        let mut engine = Engine::new(beach_story());
        engine.start().unwrap();
        engine.perform(&ActionKey::command("stand")).unwrap();

        let turn = engine.perform(&ActionKey::command("dive")).unwrap();
        assert!(turn.ended);
        assert_eq!(engine.status(), EngineStatus::Ended);

        let err = engine.perform(&ActionKey::command("look")).unwrap_err();
        assert!(matches!(err, EngineError::StoryOver));
    }

    #[test]
    fn missing_no_match_is_a_content_error() {
        let mut scene = Scene::new("void");
        scene
            .add_action(ActionKey::command("wait"), vec![text("Time passes.")])
            .unwrap();
        let mut story = Story::new(StoryMeta::new("Void", "void"));
        story.add_scene(scene).unwrap();

        let mut engine = Engine::new(story);
        let err = engine.perform(&ActionKey::command("fly")).unwrap_err();
        assert!(matches!(err, EngineError::MissingFallback(s) if s == "void"));
    }

    #[test]
    fn silent_turn_leaves_state_untouched() {
        let mut scene = Scene::new("cove");
        scene
            .add_action(
                ActionKey::command("use net"),
                vec![Outcome {
                    requirements: vec![Requirement::HasItem("net".into())],
                    mutators: vec![Mutator::AddItem("fish".into())],
                    narration: vec!["A fish!".into()],
                }],
            )
            .unwrap();
        let mut story = Story::new(StoryMeta::new("Cove", "cove"));
        story.add_scene(scene).unwrap();

        let mut engine = Engine::new(story);
        let before = engine.state().clone();
        let turn = engine.perform(&ActionKey::command("use net")).unwrap();
        assert!(turn.narration.is_empty());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn arrival_cycle_hits_the_depth_cap() {
        let mut a = Scene::new("a");
        a.add_action(
            ActionKey::Arrive,
            vec![Outcome {
                mutators: vec![Mutator::MoveTo("b".into())],
                ..Outcome::default()
            }],
        )
        .unwrap();
        let mut b = Scene::new("b");
        b.add_action(
            ActionKey::Arrive,
            vec![Outcome {
                mutators: vec![Mutator::MoveTo("a".into())],
                ..Outcome::default()
            }],
        )
        .unwrap();

        let mut story = Story::new(StoryMeta::new("Loop", "a"));
        story.add_scene(a).unwrap();
        story.add_scene(b).unwrap();

        let mut engine = Engine::new(story);
        let err = engine.start().unwrap_err();
        assert!(matches!(err, EngineError::ArrivalOverflow { .. }));
    }

    #[test]
    fn arrival_without_arrive_action_is_silent() {
        let mut from = Scene::new("from");
        from.add_action(
            ActionKey::command("go"),
            vec![Outcome {
                requirements: vec![],
                mutators: vec![Mutator::MoveTo("bare".into())],
                narration: vec!["You go.".into()],
            }],
        )
        .unwrap();
        let bare = Scene::new("bare");

        let mut story = Story::new(StoryMeta::new("Bare", "from"));
        story.add_scene(from).unwrap();
        story.add_scene(bare).unwrap();

        let mut engine = Engine::new(story);
        let turn = engine.perform(&ActionKey::command("go")).unwrap();
        assert_eq!(turn.narration, vec!["You go.".to_string()]);
        assert_eq!(engine.state().current_scene, "bare");
    }

    #[test]
    fn restore_resumes_mid_playthrough() {
        let mut engine = Engine::new(beach_story());
        engine.start().unwrap();
        engine.perform(&ActionKey::command("stand")).unwrap();
        let snapshot = engine.state().clone();

        let mut resumed = Engine::restore(beach_story(), snapshot);
        let turn = resumed.perform(&ActionKey::command("get crab")).unwrap();
        assert!(turn.narration[0].contains("scuttles off"));
    }

    #[test]
    fn determinism_across_runs() {
        let script = ["stand", "get crab", "use net", "lie down", "stand"];
        let mut transcripts = Vec::new();
        for _ in 0..2 {
            let mut engine = Engine::new(beach_story());
            let mut lines = engine.start().unwrap().narration;
            for cmd in &script {
                lines.extend(engine.perform(&ActionKey::command(*cmd)).unwrap().narration);
            }
            transcripts.push((lines, engine.state().clone()));
        }
        assert_eq!(transcripts[0], transcripts[1]);
    }
}
