use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::ast::*;
use crate::lexer::Token;

type Span = SimpleSpan;

/// Parse error with source span.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Byte range of the erroneous input in the source.
    pub span: std::ops::Range<usize>,
    /// Human-readable description of the parse error.
    pub message: String,
}

fn spanned<T>(node: T, span: Span) -> Spanned<T> {
    Spanned {
        node,
        span: span.into_range(),
    }
}

/// Build the full story-file parser.
///
/// All sub-parsers are defined inline so chumsky can infer the generic
/// input type.
fn story_file_parser<'a, I>() -> impl Parser<'a, I, StoryFile, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = Span>,
{
    // -- Helpers --

    let kw = |k: &'static str| select! { Token::Word(ref w) if w.as_str() == k => () }.labelled(k);
    let word = select! { Token::Word(w) => w }.labelled("word");
    let string_lit = select! { Token::Str(s) => s }.labelled("string");
    let text_block = select! { Token::TextBlock(s) => s }.labelled("narration block");

    // Zero or more newlines
    let nl = just(Token::Newline).repeated().to(());
    // One or more newlines
    let nl1 = just(Token::Newline).repeated().at_least(1).to(());

    let word_sp = word.map_with(|w, e| spanned(w, e.span()));
    let string_sp = string_lit.map_with(|s, e| spanned(s, e.span()));

    // Action keys may be quoted ("go north", "_arrive") or a bare word.
    let key_name = choice((string_sp.clone(), word_sp.clone())).labelled("action key");

    // -- Requirements --

    let has_req = kw("has").ignore_then(choice((
        kw("item")
            .ignore_then(word_sp.clone())
            .map(RequirementExpr::HasItem),
        kw("flag")
            .ignore_then(word_sp.clone())
            .map(RequirementExpr::HasFlag),
    )));
    let lacks_req = kw("lacks").ignore_then(choice((
        kw("item")
            .ignore_then(word_sp.clone())
            .map(RequirementExpr::LacksItem),
        kw("flag")
            .ignore_then(word_sp.clone())
            .map(RequirementExpr::LacksFlag),
    )));
    let not_visited_req = kw("not")
        .ignore_then(kw("visited"))
        .ignore_then(word_sp.clone())
        .map(RequirementExpr::NotVisited);
    let visited_req = kw("visited")
        .ignore_then(word_sp.clone())
        .map(RequirementExpr::Visited);

    let requirement = choice((has_req, lacks_req, not_visited_req, visited_req))
        .map_with(|req, e| spanned(req, e.span()))
        .labelled("requirement");

    let requires_stmt = kw("requires")
        .ignore_then(
            requirement
                .separated_by(just(Token::Comma).then(nl.clone()))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .map(OutcomeStmt::Requires);

    // -- Mutators --

    let mutator = choice((
        kw("give").ignore_then(word_sp.clone()).map(MutatorExpr::Give),
        kw("take").ignore_then(word_sp.clone()).map(MutatorExpr::Take),
        kw("set")
            .ignore_then(kw("flag"))
            .ignore_then(word_sp.clone())
            .map(MutatorExpr::SetFlag),
        kw("clear")
            .ignore_then(kw("flag"))
            .ignore_then(word_sp.clone())
            .map(MutatorExpr::ClearFlag),
        kw("move")
            .ignore_then(kw("to"))
            .ignore_then(word_sp.clone())
            .map(MutatorExpr::MoveTo),
        kw("arrive")
            .ignore_then(kw("at"))
            .ignore_then(word_sp.clone())
            .map(MutatorExpr::ArriveAt),
        kw("end").then(kw("game")).to(MutatorExpr::EndGame),
    ))
    .labelled("mutator");

    let mutate_stmt = mutator.map(OutcomeStmt::Mutate);

    // -- Narration --

    let text_stmt = choice((kw("text").ignore_then(string_lit.clone()), text_block))
        .map(OutcomeStmt::Text)
        .labelled("narration");

    let outcome_stmt =
        choice((requires_stmt, mutate_stmt, text_stmt)).map_with(|stmt, e| spanned(stmt, e.span()));

    // -- Outcomes --

    let outcome_decl = kw("outcome")
        .ignore_then(
            outcome_stmt
                .separated_by(nl1.clone())
                .allow_trailing()
                .collect::<Vec<_>>()
                .delimited_by(
                    just(Token::LBrace).then(nl.clone()),
                    nl.clone().then(just(Token::RBrace)),
                ),
        )
        .map(|statements| OutcomeDecl { statements })
        .map_with(|decl, e| spanned(decl, e.span()))
        .labelled("outcome");

    // -- Actions --

    let alias_list = kw("alias")
        .ignore_then(
            key_name
                .clone()
                .separated_by(just(Token::Comma).then(nl.clone()))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .or_not()
        .map(Option::unwrap_or_default);

    let action_decl = kw("on")
        .ignore_then(key_name.clone())
        .then(alias_list)
        .then(
            outcome_decl
                .separated_by(nl1.clone())
                .allow_trailing()
                .collect::<Vec<_>>()
                .delimited_by(
                    just(Token::LBrace).then(nl.clone()),
                    nl.clone().then(just(Token::RBrace)),
                ),
        )
        .map(|((key, aliases), outcomes)| ActionDecl {
            key,
            aliases,
            outcomes,
        })
        .map_with(|decl, e| spanned(decl, e.span()))
        .labelled("action");

    // -- Scenes --

    let scene_decl = kw("scene")
        .ignore_then(word_sp.clone())
        .then(
            action_decl
                .separated_by(nl1.clone())
                .allow_trailing()
                .collect::<Vec<_>>()
                .delimited_by(
                    just(Token::LBrace).then(nl.clone()),
                    nl.clone().then(just(Token::RBrace)),
                ),
        )
        .map(|(key, actions)| Declaration::Scene(SceneDecl { key, actions }))
        .labelled("scene declaration");

    // -- Story block --

    let start_stmt = kw("start").ignore_then(word_sp.clone()).map(StoryStmt::Start);
    let opening_stmt = kw("opening")
        .ignore_then(choice((string_sp.clone(), word_sp.clone())))
        .map(StoryStmt::Opening);
    let stop_words_stmt = kw("stop")
        .ignore_then(kw("words"))
        .ignore_then(
            word_sp
                .clone()
                .separated_by(just(Token::Comma).then(nl.clone()))
                .allow_trailing()
                .collect::<Vec<_>>()
                .delimited_by(
                    just(Token::LBracket).then(nl.clone()),
                    nl.clone().then(just(Token::RBracket)),
                ),
        )
        .map(StoryStmt::StopWords);
    let synonym_stmt = kw("synonym")
        .ignore_then(word_sp.clone())
        .then_ignore(kw("means"))
        .then(word_sp.clone())
        .map(|(word, canonical)| StoryStmt::Synonym { word, canonical });

    let story_stmt = choice((start_stmt, opening_stmt, stop_words_stmt, synonym_stmt))
        .map_with(|stmt, e| spanned(stmt, e.span()))
        .labelled("story statement");

    let story_decl = kw("story")
        .ignore_then(string_sp.clone())
        .then(
            story_stmt
                .separated_by(nl1.clone())
                .allow_trailing()
                .collect::<Vec<_>>()
                .delimited_by(
                    just(Token::LBrace).then(nl.clone()),
                    nl.clone().then(just(Token::RBrace)),
                ),
        )
        .map(|(title, body)| Declaration::Story(StoryDecl { title, body }))
        .labelled("story declaration");

    // -- File --

    let declaration = choice((story_decl, scene_decl)).map_with(|decl, e| spanned(decl, e.span()));

    declaration
        .separated_by(nl1.clone())
        .allow_trailing()
        .collect::<Vec<_>>()
        .padded_by(nl.clone())
        .then_ignore(end())
        .map(|declarations| StoryFile { declarations })
}

/// Parse a token stream into an AST.
pub fn parse(tokens: &[(Token, std::ops::Range<usize>)]) -> Result<StoryFile, Vec<ParseError>> {
    let token_iter = tokens
        .iter()
        .map(|(tok, span)| (tok.clone(), Span::from(span.clone())));

    let len = tokens.last().map_or(0, |(_, s)| s.end);
    let eoi: Span = (len..len).into();
    let stream = Stream::from_iter(token_iter).map(eoi, |(t, s): (_, _)| (t, s));

    let (output, errors) = story_file_parser().parse(stream).into_output_errors();

    if let Some(ast) = output
        && errors.is_empty()
    {
        return Ok(ast);
    }

    Err(errors
        .into_iter()
        .map(|e| {
            let span = e.span();
            ParseError {
                span: span.into_range(),
                message: e.to_string(),
            }
        })
        .collect())
}
