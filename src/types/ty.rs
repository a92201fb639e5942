//! # Core Type System Definitions
//!
//! This module defines the foundational types of the inference engine:
//! types, type variables, and type schemes.
//!
//! ## Overview
//!
//! The type system is built from three main components:
//!
//! - **Type** - A monomorphic type: primitive, variable, or function
//! - **TypeVar** - A type variable identified by a unique integer id
//! - **TypeScheme** - A type together with the variables generalized at its
//!   binding (e.g., the binding for `(def id : 'a (x : 'a) x)` carries the
//!   variable allocated for `'a`)
//!
//! ## Types
//!
//! Primitives are nominal: two primitive types are equal exactly when their
//! names are equal. The well-known names are `int`, `bool`, `string`,
//! `float`, `double`, and `char`, but any annotation lexeme that does not
//! start with `'` denotes a primitive of that name.
//!
//! Function types are unary; multi-argument functions are encoded by
//! right-nesting, so `(def f : int (x : int y : int) …)` gives `f` the type
//! `(int -> (int -> int))`.
//!
//! ## Type Schemes
//!
//! A scheme pairs a type with the list of variables that are *generalized*
//! at the binding. Lookup instantiates those variables with fresh ones, so
//! each use site of a polymorphic binding gets its own copies:
//!
//! ```text
//! id : (t0 -> t0), generalized [t0]
//!
//! // First lookup:  (t7 -> t7)
//! // Second lookup: (t8 -> t8)
//! ```
//!
//! A scheme with an empty variable list is monomorphic: lookup returns the
//! type unchanged.

use std::collections::HashSet;
use std::fmt;

/// Type variable for polymorphism, identified by a globally unique id.
///
/// Ids are allocated by [`crate::types::unify::Unifier::fresh_var`] and
/// increase monotonically over one inference pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeVar {
    pub id: usize,
}

impl TypeVar {
    pub fn new(id: usize) -> Self {
        Self { id }
    }
}

/// A monomorphic type.
///
/// # Variants
///
/// * `Prim` - A nominal atomic type; equality is by name
/// * `Var` - A type variable
/// * `Func` - A unary function type `argument -> result`
///
/// # Examples
///
/// ```text
/// Type::prim("int")                                  // int
/// Type::Var(TypeVar::new(0))                         // t0
/// Type::func(Type::prim("int"), Type::prim("bool"))  // (int -> bool)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Prim(String),
    Var(TypeVar),
    Func(Box<Type>, Box<Type>),
}

impl Type {
    /// Create a primitive type from its name.
    pub fn prim(name: impl Into<String>) -> Self {
        Type::Prim(name.into())
    }

    /// Create a function type from argument and result types.
    pub fn func(arg: Type, ret: Type) -> Self {
        Type::Func(Box::new(arg), Box::new(ret))
    }

    /// Get the set of type variables occurring in this type.
    ///
    /// Primitives contribute nothing; a variable contributes itself;
    /// function types contribute the union of both sides.
    ///
    /// # Examples
    ///
    /// ```text
    /// prim("int").free_vars()            // {}
    /// Var(t0).free_vars()                // {t0}
    /// func(Var(t0), Var(t1)).free_vars() // {t0, t1}
    /// func(Var(t0), Var(t0)).free_vars() // {t0}
    /// ```
    pub fn free_vars(&self) -> HashSet<TypeVar> {
        match self {
            Type::Prim(_) => HashSet::new(),
            Type::Var(v) => {
                let mut set = HashSet::new();
                set.insert(*v);
                set
            }
            Type::Func(arg, ret) => {
                let mut set = arg.free_vars();
                set.extend(ret.free_vars());
                set
            }
        }
    }

    /// Canonical rendering: primitive names verbatim, variables as `t<id>`,
    /// functions as `(A -> B)`.
    ///
    /// # Examples
    ///
    /// ```text
    /// prim("int").pretty()                       // "int"
    /// Var(t3).pretty()                           // "t3"
    /// func(prim("int"), Var(t0)).pretty()        // "(int -> t0)"
    /// func(prim("int"),
    ///      func(prim("int"), prim("int"))).pretty()
    ///                                            // "(int -> (int -> int))"
    /// ```
    pub fn pretty(&self) -> String {
        match self {
            Type::Prim(name) => name.clone(),
            Type::Var(v) => format!("t{}", v.id),
            Type::Func(arg, ret) => format!("({} -> {})", arg.pretty(), ret.pretty()),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// A type together with its generalized variables.
///
/// The `vars` list records which variables were introduced by `'` markers
/// at the binding site. They are renamed to fresh variables on every
/// lookup; variables not in the list are shared across uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScheme {
    pub vars: Vec<TypeVar>,
    pub ty: Type,
}

impl TypeScheme {
    /// A scheme with no generalized variables.
    pub fn monomorphic(ty: Type) -> Self {
        TypeScheme {
            vars: Vec::new(),
            ty,
        }
    }

    /// A scheme generalizing the given variables.
    pub fn polymorphic(vars: Vec<TypeVar>, ty: Type) -> Self {
        TypeScheme { vars, ty }
    }

    pub fn is_polymorphic(&self) -> bool {
        !self.vars.is_empty()
    }
}
