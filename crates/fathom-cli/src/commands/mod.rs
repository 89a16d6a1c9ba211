pub mod check;
pub mod info;
pub mod init;
pub mod play;

use std::path::Path;

use fathom_core::{Story, Vocabulary};
use fathom_dsl::CompileResult;
use fathom_dsl::diagnostics::{Severity, render_diagnostics};

/// Compile a story path and print diagnostics.
/// Returns the story and its vocabulary if there are no errors.
fn load_story(path: &Path) -> Result<(Story, Vocabulary), String> {
    let result = fathom_dsl::compile_path(path);
    print_diagnostics(&result, path);

    if result.has_errors() {
        Err("compilation failed with errors".into())
    } else {
        Ok((result.story, result.vocabulary))
    }
}

/// Print diagnostics to stderr using ariadne.
fn print_diagnostics(result: &CompileResult, path: &Path) {
    if result.diagnostics.is_empty() {
        return;
    }

    // Read the sources back to provide context for diagnostics
    let source = read_all_sources(path);
    let filename = path.display().to_string();

    let rendered = render_diagnostics(&source, &filename, &result.diagnostics);
    eprint!("{rendered}");

    let errors = result
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = result
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();

    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    } else if warnings > 0 {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }
}

/// Read and concatenate the .story sources, matching the concatenation
/// order the compiler used (for diagnostic rendering).
fn read_all_sources(path: &Path) -> String {
    if path.is_file() {
        return std::fs::read_to_string(path).unwrap_or_default();
    }

    let mut sources = String::new();
    if let Ok(entries) = std::fs::read_dir(path) {
        let mut files: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "story"))
            .collect();
        files.sort_by_key(|e| e.path());
        for entry in files {
            if let Ok(content) = std::fs::read_to_string(entry.path()) {
                if !sources.is_empty() {
                    sources.push('\n');
                }
                sources.push_str(&content);
            }
        }
    }
    sources
}
