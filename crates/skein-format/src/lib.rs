//! Scene file parsing and project index construction for Skein.
//!
//! The pipeline is lexer → parser → loader → builder: raw text becomes a
//! generic field document, the loader extracts the typed declarations the
//! index cares about, and the builder resolves cross-file references into the
//! [`skein_scene::ProjectIndex`]. Every stage is error-tolerant and reports
//! problems as span-carrying [`Diagnostic`]s instead of failing, because the
//! main consumer is an editor session holding half-written files.

/// Generic parsed shape of a scene file.
pub mod ast;
/// Index construction from a set of scene files.
pub mod builder;
/// Diagnostic types and terminal rendering.
pub mod diagnostics;
/// Logos lexer for the scene file format.
pub mod lexer;
/// Typed extraction of game object and collection declarations.
pub mod loader;
/// Recursive-descent parser over the token stream.
pub mod parser;
/// Filesystem discovery of scene files.
pub mod workspace;

/// Re-export builder entry points.
pub use builder::{FileKind, IndexResult, SourceFile, build_index};
/// Re-export the diagnostic type.
pub use diagnostics::Diagnostic;

/// Lex and parse one scene file into a document plus diagnostics.
pub fn parse_source(source: &str) -> (ast::Document, Vec<Diagnostic>) {
    let (tokens, lex_errors) = lexer::lex(source);

    let mut diagnostics: Vec<Diagnostic> = lex_errors
        .into_iter()
        .map(|e| Diagnostic::error(e.span, e.message))
        .collect();

    let (document, parse_diagnostics) = parser::parse(&tokens);
    diagnostics.extend(parse_diagnostics);
    (document, diagnostics)
}
