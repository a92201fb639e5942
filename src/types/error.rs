//! # Diagnostics
//!
//! The checker never aborts: every violation becomes a [`Diagnostic`]
//! appended to the walker's list, and traversal continues. A diagnostic
//! carries:
//!
//! - a [`DiagnosticKind`] and its short kind-level message,
//! - the source span of the offending form,
//! - an optional type rendering (for type-level errors),
//! - a free-form hint (for unification failures, the unifier's message).
//!
//! The offending source line itself is not stored; the renderer recovers
//! it from the source text via [`Diagnostic::context_line`].
//!
//! ## Example output
//!
//! ```text
//! error: type error in let binding
//!   @ line 3, col 1
//!   |
//!   | (let x : int "hello")
//!   | ^
//!   hint: type mismatch: expected int, found string
//! ```

use std::fmt;

use crate::ast::Span;

use super::ty::Type;
use super::unify::UnifyError;

/// Every kind of violation the checker can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A reserved form has the wrong number or shape of children.
    MalformedForm,
    /// A name lookup reached the root scope without a hit.
    UnboundVariable,
    /// Unification failed on two incompatible concrete types.
    TypeMismatch,
    /// The occurs check rejected an infinite type.
    RecursiveUnification,
    /// A `let` value does not match its declared type.
    TypeErrorInLet,
    /// A `def` body does not match its declared return type.
    ReturnTypeMismatch,
    /// A `set` value does not match the binding's type.
    TypeErrorInAssignment,
    /// An `if` condition is not `bool`.
    ConditionNotBoolean,
    /// An `if`'s branches have incompatible types.
    BranchesMismatched,
    /// Unification against a function's curried shape failed.
    TypeErrorInCall,
    /// The head of a call form was not an atom.
    ExpectedFunctionName,
    /// A call head spelled like an operator is not in the builtin table.
    UnknownOperator,
}

/// A structured error with source location and hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
    pub ty: Option<Type>,
    pub hint: String,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        span: Span,
        hint: impl Into<String>,
    ) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            span,
            ty: None,
            hint: hint.into(),
        }
    }

    /// Attach a type rendering (chainable).
    pub fn with_type(mut self, ty: Type) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Convert a unification error into a standalone diagnostic.
    ///
    /// The walker usually wraps unification failures in a more specific
    /// kind (`TypeErrorInLet`, `TypeErrorInCall`, …); this mapping is for
    /// failures with no richer context.
    pub fn from_unify(err: UnifyError, span: Span) -> Self {
        match err {
            UnifyError::Mismatch { .. } => {
                let hint = err.to_string();
                Diagnostic::new(DiagnosticKind::TypeMismatch, "type mismatch", span, hint)
            }
            UnifyError::Recursive { ref ty, .. } => {
                let rendered = ty.clone();
                let hint = err.to_string();
                Diagnostic::new(
                    DiagnosticKind::RecursiveUnification,
                    "recursive unification",
                    span,
                    hint,
                )
                .with_type(rendered)
            }
        }
    }

    /// 1-based source line of the offending form; 0 for synthetic spans.
    pub fn line(&self) -> usize {
        self.span.start.0
    }

    /// 1-based source column of the offending form.
    pub fn column(&self) -> usize {
        self.span.start.1
    }

    /// The text of the offending line within `source`.
    pub fn context_line<'a>(&self, source: &'a str) -> Option<&'a str> {
        let line = self.line();
        if line == 0 {
            return None;
        }
        source.lines().nth(line - 1)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.line() == 0 {
            write!(f, "error: {}: {}", self.message, self.hint)
        } else {
            write!(
                f,
                "error: {} (line {}, col {}): {}",
                self.message,
                self.line(),
                self.column(),
                self.hint
            )
        }
    }
}

impl std::error::Error for Diagnostic {}
