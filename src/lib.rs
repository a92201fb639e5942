//! Larch - a static type checker for a small S-expression language.
//!
//! This library parses a source program into a uniform atom/list tree and
//! runs Hindley-Milner-style inference over it: explicit annotations,
//! let-polymorphism through `'` markers, unification with an occurs check.
//! The checker reports every violation it finds as a structured
//! [`types::Diagnostic`] and never aborts early.

pub mod ast;
pub mod parser;
pub mod report;
pub mod types;

use parser::{ParseError, Parser};
use types::Diagnostic;

/// Parse and type check a source string.
///
/// Returns the checker's diagnostics (empty means the program is
/// well-typed), or a [`ParseError`] when the source is not syntactically
/// an S-expression sequence.
pub fn check_source(source: &str) -> Result<Vec<Diagnostic>, ParseError> {
    let program = Parser::new(source).parse_program()?;
    Ok(types::check_program(&program))
}
