//! # Lexical Scope
//!
//! The type environment is a stack of scopes. Each scope maps names to
//! [`TypeScheme`]s; lookups search the innermost scope first and walk
//! outward, so inner bindings shadow outer ones:
//!
//! ```text
//! // Global scope:   { x: int }
//! // Function scope: { x: bool }   (entered for a def body)
//!
//! // lookup("x") inside the function -> bool
//! // lookup("x") after exit          -> int
//! ```
//!
//! `def` bodies are the only construct that opens a new scope: the walker
//! calls [`TypeEnv::enter`] before defining the parameters and
//! [`TypeEnv::exit`] once the body is inferred. Defining a name that
//! already exists in the innermost scope overwrites it; ancestor scopes
//! are never mutated through a child.

use std::collections::HashMap;

use super::ty::TypeScheme;

/// A stack of name-to-scheme maps forming the lexical environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEnv {
    bindings: HashMap<String, TypeScheme>,
    parent: Option<Box<TypeEnv>>,
}

impl TypeEnv {
    /// Create an empty root environment.
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
            parent: None,
        }
    }

    /// Bind `name` in the innermost scope, overwriting any previous binding
    /// of the same name in that scope. Bindings in outer scopes are
    /// shadowed, not touched.
    pub fn define(&mut self, name: impl Into<String>, scheme: TypeScheme) {
        self.bindings.insert(name.into(), scheme);
    }

    /// Look up a name, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&TypeScheme> {
        self.bindings
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.lookup(name)))
    }

    /// Push a fresh innermost scope.
    pub fn enter(&mut self) {
        let parent = std::mem::replace(self, TypeEnv::empty());
        self.parent = Some(Box::new(parent));
    }

    /// Pop the innermost scope, discarding its bindings. At the root this
    /// is a no-op.
    pub fn exit(&mut self) {
        if let Some(parent) = self.parent.take() {
            *self = *parent;
        }
    }

    /// Number of scopes on the stack (the root counts as one).
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map_or(0, |p| p.depth())
    }
}

impl Default for TypeEnv {
    fn default() -> Self {
        Self::empty()
    }
}
