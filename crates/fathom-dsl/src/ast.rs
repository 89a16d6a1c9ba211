/// Source span as a byte range.
pub type Span = std::ops::Range<usize>;

/// An AST node with source location.
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    /// The wrapped AST node.
    pub node: T,
    /// The byte range of this node in the source text.
    pub span: Span,
}

/// A parsed story source file.
#[derive(Debug, Clone)]
pub struct StoryFile {
    /// Top-level declarations in source order.
    pub declarations: Vec<Spanned<Declaration>>,
}

/// A top-level declaration in the DSL.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// The `story` block carrying metadata and vocabulary.
    Story(StoryDecl),
    /// A `scene` block.
    Scene(SceneDecl),
}

/// A story declaration, e.g. `story "Sandy Shores" { ... }`.
#[derive(Debug, Clone)]
pub struct StoryDecl {
    /// The story title.
    pub title: Spanned<String>,
    /// The statements in the story body.
    pub body: Vec<Spanned<StoryStmt>>,
}

/// A statement inside a `story` block.
#[derive(Debug, Clone)]
pub enum StoryStmt {
    /// `start <scene>` — the scene the playthrough begins in.
    Start(Spanned<String>),
    /// `opening "<action>"` — the action resolved before any input.
    Opening(Spanned<String>),
    /// `stop words [a, an, the]` — words dropped during input normalization.
    StopWords(Vec<Spanned<String>>),
    /// `synonym grab means get` — canonicalized during input normalization.
    Synonym {
        /// The synonym as the player may type it.
        word: Spanned<String>,
        /// The canonical word it maps to.
        canonical: Spanned<String>,
    },
}

/// A scene declaration, e.g. `scene beach_lying { ... }`.
#[derive(Debug, Clone)]
pub struct SceneDecl {
    /// The scene key.
    pub key: Spanned<String>,
    /// The actions declared in the scene.
    pub actions: Vec<Spanned<ActionDecl>>,
}

/// An action declaration, e.g. `on "go north" alias "go cove" { ... }`.
#[derive(Debug, Clone)]
pub struct ActionDecl {
    /// The primary action key.
    pub key: Spanned<String>,
    /// Additional keys sharing the same outcome list.
    pub aliases: Vec<Spanned<String>>,
    /// Candidate outcomes, in document order.
    pub outcomes: Vec<Spanned<OutcomeDecl>>,
}

/// An outcome declaration, e.g. `outcome { ... }`.
#[derive(Debug, Clone)]
pub struct OutcomeDecl {
    /// The statements in the outcome body, in document order.
    pub statements: Vec<Spanned<OutcomeStmt>>,
}

/// A statement inside an `outcome` block.
#[derive(Debug, Clone)]
pub enum OutcomeStmt {
    /// A `requires` line carrying one or more predicates.
    Requires(Vec<Spanned<RequirementExpr>>),
    /// A state mutation.
    Mutate(MutatorExpr),
    /// A narration paragraph or block.
    Text(String),
}

/// A requirement predicate as written in the DSL.
#[derive(Debug, Clone)]
pub enum RequirementExpr {
    /// `has item W`
    HasItem(Spanned<String>),
    /// `lacks item W`
    LacksItem(Spanned<String>),
    /// `has flag W`
    HasFlag(Spanned<String>),
    /// `lacks flag W`
    LacksFlag(Spanned<String>),
    /// `visited W`
    Visited(Spanned<String>),
    /// `not visited W`
    NotVisited(Spanned<String>),
}

/// A mutator as written in the DSL.
#[derive(Debug, Clone)]
pub enum MutatorExpr {
    /// `give W`
    Give(Spanned<String>),
    /// `take W`
    Take(Spanned<String>),
    /// `set flag W`
    SetFlag(Spanned<String>),
    /// `clear flag W`
    ClearFlag(Spanned<String>),
    /// `move to W`
    MoveTo(Spanned<String>),
    /// `arrive at W`
    ArriveAt(Spanned<String>),
    /// `end game`
    EndGame,
}
