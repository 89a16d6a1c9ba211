use std::collections::HashSet;

use fathom_core::{
    ActionKey, Mutator, Outcome, Requirement, Scene, Story, StoryMeta, Vocabulary,
};

use crate::ast::*;
use crate::diagnostics::{Diagnostic, Severity};

/// Result of compiling DSL source into a playable story.
pub struct CompileResult {
    /// The compiled story (may be partial if errors occurred).
    pub story: Story,
    /// The input vocabulary declared in the story block.
    pub vocabulary: Vocabulary,
    /// Errors and warnings produced during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileResult {
    /// Returns `true` if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Compile a parsed AST into a story and vocabulary.
///
/// Compilation happens in two passes:
/// 1. **Build pass**: process story metadata and construct every scene
/// 2. **Check pass**: verify scene references and playability over the AST,
///    where source spans are still available
pub fn compile(ast: &StoryFile) -> CompileResult {
    let mut compiler = Compiler::new();
    compiler.compile(ast);
    CompileResult {
        story: compiler.story,
        vocabulary: compiler.vocabulary,
        diagnostics: compiler.diagnostics,
    }
}

struct Compiler {
    story: Story,
    vocabulary: Vocabulary,
    diagnostics: Vec<Diagnostic>,
    start: Option<Spanned<String>>,
    opening: ActionKey,
}

impl Compiler {
    fn new() -> Self {
        Self {
            story: Story::new(StoryMeta::new("Untitled", "")),
            vocabulary: Vocabulary::new(),
            diagnostics: Vec::new(),
            start: None,
            opening: ActionKey::Arrive,
        }
    }

    fn compile(&mut self, ast: &StoryFile) {
        // Pass 1: story metadata and scene construction
        let mut saw_story_block = false;
        for decl in &ast.declarations {
            match &decl.node {
                Declaration::Story(story) => {
                    if saw_story_block {
                        self.diagnostics.push(Diagnostic::error(
                            story.title.span.clone(),
                            "multiple story blocks; only one is allowed",
                        ));
                        continue;
                    }
                    saw_story_block = true;
                    self.compile_story_block(story);
                }
                Declaration::Scene(scene) => self.compile_scene(scene),
            }
        }

        if !saw_story_block {
            self.diagnostics.push(Diagnostic::error(
                0..0,
                "no story block found; expected `story \"Title\" { ... }`",
            ));
        }

        // Pass 2: reference and playability checks
        self.check_references(ast);
    }

    // -- Pass 1: story block --

    fn compile_story_block(&mut self, decl: &StoryDecl) {
        self.story.meta.title = decl.title.node.clone();

        for stmt in &decl.body {
            match &stmt.node {
                StoryStmt::Start(scene) => {
                    if self.start.is_some() {
                        self.diagnostics.push(Diagnostic::warning(
                            scene.span.clone(),
                            "start scene declared more than once; the last wins",
                        ));
                    }
                    self.story.meta.first_scene = scene.node.clone();
                    self.start = Some(scene.clone());
                }
                StoryStmt::Opening(action) => {
                    self.opening = ActionKey::parse(&action.node);
                    self.story.meta.first_action = self.opening.clone();
                }
                StoryStmt::StopWords(words) => {
                    for word in words {
                        self.vocabulary.add_stop_word(&word.node);
                    }
                }
                StoryStmt::Synonym { word, canonical } => {
                    self.vocabulary.add_synonym(&word.node, &canonical.node);
                }
            }
        }

        if self.start.is_none() {
            self.diagnostics.push(
                Diagnostic::error(
                    decl.title.span.clone(),
                    "story block does not declare a start scene",
                )
                .with_label("add `start <scene>` here"),
            );
        }
    }

    // -- Pass 1: scenes --

    fn compile_scene(&mut self, decl: &SceneDecl) {
        let mut scene = Scene::new(&decl.key.node);

        for action in &decl.actions {
            let key = ActionKey::parse(&action.node.key.node);

            if action.node.outcomes.is_empty() {
                self.diagnostics.push(Diagnostic::warning(
                    action.node.key.span.clone(),
                    format!("action \"{key}\" has no outcomes and can never do anything"),
                ));
            }

            let outcomes: Vec<Outcome> = action
                .node
                .outcomes
                .iter()
                .map(|o| self.compile_outcome(&o.node))
                .collect();

            if let Err(e) = scene.add_action(key.clone(), outcomes) {
                self.diagnostics
                    .push(Diagnostic::error(action.node.key.span.clone(), e.to_string()));
                continue;
            }

            for alias in &action.node.aliases {
                let alias_key = ActionKey::parse(&alias.node);
                if let Err(e) = scene.add_alias(&key, alias_key) {
                    self.diagnostics
                        .push(Diagnostic::error(alias.span.clone(), e.to_string()));
                }
            }
        }

        if let Err(e) = self.story.add_scene(scene) {
            self.diagnostics
                .push(Diagnostic::error(decl.key.span.clone(), e.to_string()));
        }
    }

    fn compile_outcome(&mut self, decl: &OutcomeDecl) -> Outcome {
        let mut outcome = Outcome::default();

        for stmt in &decl.statements {
            match &stmt.node {
                OutcomeStmt::Requires(predicates) => {
                    for predicate in predicates {
                        outcome
                            .requirements
                            .push(Self::compile_requirement(&predicate.node));
                    }
                }
                OutcomeStmt::Mutate(mutator) => {
                    outcome.mutators.push(Self::compile_mutator(mutator));
                }
                OutcomeStmt::Text(text) => {
                    outcome.narration.extend(paragraphs(text));
                }
            }
        }

        outcome
    }

    fn compile_requirement(expr: &RequirementExpr) -> Requirement {
        match expr {
            RequirementExpr::HasItem(item) => Requirement::HasItem(item.node.clone()),
            RequirementExpr::LacksItem(item) => Requirement::LacksItem(item.node.clone()),
            RequirementExpr::HasFlag(flag) => Requirement::HasFlag(flag.node.clone()),
            RequirementExpr::LacksFlag(flag) => Requirement::LacksFlag(flag.node.clone()),
            RequirementExpr::Visited(scene) => Requirement::Visited(scene.node.clone()),
            RequirementExpr::NotVisited(scene) => Requirement::NotVisited(scene.node.clone()),
        }
    }

    fn compile_mutator(expr: &MutatorExpr) -> Mutator {
        match expr {
            MutatorExpr::Give(item) => Mutator::AddItem(item.node.clone()),
            MutatorExpr::Take(item) => Mutator::RemoveItem(item.node.clone()),
            MutatorExpr::SetFlag(flag) => Mutator::SetFlag(flag.node.clone()),
            MutatorExpr::ClearFlag(flag) => Mutator::ClearFlag(flag.node.clone()),
            MutatorExpr::MoveTo(scene) => Mutator::MoveTo(scene.node.clone()),
            MutatorExpr::ArriveAt(scene) => Mutator::ArriveAt(scene.node.clone()),
            MutatorExpr::EndGame => Mutator::EndGame,
        }
    }

    // -- Pass 2: reference and playability checks --

    fn check_references(&mut self, ast: &StoryFile) {
        let declared: HashSet<&str> = ast
            .declarations
            .iter()
            .filter_map(|decl| match &decl.node {
                Declaration::Scene(scene) => Some(scene.key.node.as_str()),
                Declaration::Story(_) => None,
            })
            .collect();

        if let Some(start) = self.start.clone()
            && !declared.contains(start.node.as_str())
        {
            self.diagnostics.push(Diagnostic::error(
                start.span,
                format!("start scene \"{}\" is not declared", start.node),
            ));
        }

        for decl in &ast.declarations {
            let Declaration::Scene(scene) = &decl.node else {
                continue;
            };

            let mut has_no_match = false;
            let mut has_commands = false;

            for action in &scene.actions {
                match ActionKey::parse(&action.node.key.node) {
                    ActionKey::NoMatch => has_no_match = true,
                    ActionKey::Command(_) => has_commands = true,
                    ActionKey::Arrive => {}
                }

                for outcome in &action.node.outcomes {
                    for stmt in &outcome.node.statements {
                        self.check_statement(&stmt.node, &declared);
                    }
                }
            }

            if has_commands && !has_no_match {
                self.diagnostics.push(
                    Diagnostic::warning(
                        scene.key.span.clone(),
                        format!(
                            "scene \"{}\" accepts input but has no \"_no_match\" action",
                            scene.key.node
                        ),
                    )
                    .with_label("unrecognized input will fail at play time"),
                );
            }
        }

        // The opening action must exist in the start scene, or the
        // playthrough opens in silence.
        if let Some(start) = &self.start
            && let Some(scene) = self.story.scene(&start.node)
            && scene.action(&self.opening).is_none()
        {
            self.diagnostics.push(Diagnostic::warning(
                start.span.clone(),
                format!(
                    "start scene \"{}\" has no \"{}\" action; the playthrough opens silently",
                    start.node, self.opening
                ),
            ));
        }
    }

    fn check_statement(&mut self, stmt: &OutcomeStmt, declared: &HashSet<&str>) {
        match stmt {
            OutcomeStmt::Mutate(MutatorExpr::MoveTo(scene) | MutatorExpr::ArriveAt(scene)) => {
                if !declared.contains(scene.node.as_str()) {
                    self.diagnostics.push(Diagnostic::error(
                        scene.span.clone(),
                        format!("unknown scene: \"{}\"", scene.node),
                    ));
                }
            }
            OutcomeStmt::Requires(predicates) => {
                for predicate in predicates {
                    let (RequirementExpr::Visited(scene) | RequirementExpr::NotVisited(scene)) =
                        &predicate.node
                    else {
                        continue;
                    };
                    // A typo here silently changes which outcome fires, so
                    // it is worth flagging even though it is playable.
                    if !declared.contains(scene.node.as_str()) {
                        self.diagnostics.push(Diagnostic::warning(
                            scene.span.clone(),
                            format!("visited check references unknown scene: \"{}\"", scene.node),
                        ));
                    }
                }
            }
            OutcomeStmt::Mutate(_) | OutcomeStmt::Text(_) => {}
        }
    }
}

/// Split narration text into paragraphs.
///
/// Blank lines separate paragraphs; a single line break inside a paragraph
/// is a soft wrap and joins with a space.
fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                out.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current.join(" "));
    }

    out
}
