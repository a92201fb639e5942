pub mod builtins;
pub mod error;
pub mod infer;
pub mod scope;
pub mod subst;
pub mod ty;
pub mod unify;

pub use error::{Diagnostic, DiagnosticKind};
pub use infer::{check_program, Checker};
pub use ty::{Type, TypeScheme, TypeVar};
