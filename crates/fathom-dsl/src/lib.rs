//! Lexer, parser, and compiler for Fathom `.story` files.
//!
//! The pipeline is `lex` → `parse` → `compile`: source text becomes a token
//! stream, the tokens become an AST, and the AST becomes a
//! [`fathom_core::Story`] plus its input [`fathom_core::Vocabulary`].
//! Problems at every stage are collected as [`Diagnostic`]s rather than
//! aborting, so authors see as many of them at once as possible.

/// The abstract syntax tree produced by the parser.
pub mod ast;
/// AST-to-story compilation and consistency checks.
pub mod compiler;
/// Diagnostics with severity, spans, and terminal rendering.
pub mod diagnostics;
/// The logos-based lexer.
pub mod lexer;
/// The chumsky-based parser.
pub mod parser;

use std::path::Path;

/// Re-export the compilation result.
pub use compiler::CompileResult;
/// Re-export the diagnostic type.
pub use diagnostics::Diagnostic;

use fathom_core::{Story, StoryMeta, Vocabulary};

fn error_result(diagnostics: Vec<Diagnostic>) -> CompileResult {
    CompileResult {
        story: Story::new(StoryMeta::new("Error", "")),
        vocabulary: Vocabulary::new(),
        diagnostics,
    }
}

/// Compile a single source string into a story.
pub fn compile_source(source: &str) -> CompileResult {
    let (tokens, lex_errors) = lexer::lex(source);

    // Convert lex errors to diagnostics
    let mut diagnostics: Vec<Diagnostic> = lex_errors
        .into_iter()
        .map(|e| Diagnostic::error(e.span, e.message))
        .collect();

    let ast = match parser::parse(&tokens) {
        Ok(ast) => ast,
        Err(parse_errors) => {
            diagnostics.extend(
                parse_errors
                    .into_iter()
                    .map(|e| Diagnostic::error(e.span, e.message)),
            );
            return error_result(diagnostics);
        }
    };

    let mut result = compiler::compile(&ast);
    result.diagnostics.extend(diagnostics);
    result
}

/// Compile a `.story` file, or every `.story` file in a directory, into a
/// single story.
///
/// Directory entries are concatenated in path order so compilation is
/// deterministic regardless of filesystem iteration order.
pub fn compile_path(path: &Path) -> CompileResult {
    if path.is_file() {
        return match std::fs::read_to_string(path) {
            Ok(source) => compile_source(&source),
            Err(e) => error_result(vec![Diagnostic::error(
                0..0,
                format!("cannot read {}: {e}", path.display()),
            )]),
        };
    }

    let mut entries: Vec<_> = match std::fs::read_dir(path) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "story"))
            .collect(),
        Err(e) => {
            return error_result(vec![Diagnostic::error(
                0..0,
                format!("cannot read directory: {e}"),
            )]);
        }
    };

    // Sort for deterministic ordering
    entries.sort_by_key(|e| e.path());

    let mut sources = String::new();
    for entry in entries {
        match std::fs::read_to_string(entry.path()) {
            Ok(content) => {
                if !sources.is_empty() {
                    sources.push('\n');
                }
                sources.push_str(&content);
            }
            Err(e) => {
                return error_result(vec![Diagnostic::error(
                    0..0,
                    format!("cannot read {}: {e}", entry.path().display()),
                )]);
            }
        }
    }

    if sources.is_empty() {
        return error_result(vec![Diagnostic::error(
            0..0,
            format!("no .story files found in {}", path.display()),
        )]);
    }

    compile_source(&sources)
}
