//! # Type Substitutions
//!
//! A substitution maps type variables to types and represents everything
//! the engine has learned so far. One substitution lives for the whole
//! inference pass, owned by the unifier and updated in place; composition
//! is implicit in the order bindings are inserted.
//!
//! ## Application
//!
//! Applying a substitution replaces every variable that has a binding with
//! its bound type, in a single structural pass:
//!
//! ```text
//! // Substitution: {t0 := int}
//!
//! apply(t0)          = int
//! apply((t0 -> t0))  = (int -> int)
//! apply((t0 -> t1))  = (int -> t1)
//! ```
//!
//! Application does **not** chase chains: with `{t0 := t1, t1 := int}`,
//! one application of `t0` yields `t1`. Full normalization is the
//! unifier's job (see [`crate::types::unify::Unifier::resolve`]).

use std::collections::HashMap;

use super::ty::{Type, TypeVar};

/// A substitution mapping type variables to types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution(HashMap<TypeVar, Type>);

impl Substitution {
    /// Create an empty substitution.
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    /// Create a substitution with a single binding.
    ///
    /// # Example
    ///
    /// ```text
    /// let subst = Substitution::singleton(TypeVar::new(0), Type::prim("int"));
    /// assert_eq!(subst.apply(&Type::Var(TypeVar::new(0))), Type::prim("int"));
    /// ```
    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        let mut map = HashMap::new();
        map.insert(var, ty);
        Substitution(map)
    }

    /// Bind `var` to `ty`, replacing any previous binding.
    pub fn insert(&mut self, var: TypeVar, ty: Type) {
        self.0.insert(var, ty);
    }

    /// The type bound to `var`, if any.
    pub fn get(&self, var: &TypeVar) -> Option<&Type> {
        self.0.get(var)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Apply this substitution to a type.
    ///
    /// Structural and non-destructive: primitives are returned unchanged,
    /// bound variables are replaced by their bound type (verbatim, without
    /// chasing), and function types recurse on both sides.
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Prim(_) => ty.clone(),
            Type::Var(v) => self.0.get(v).cloned().unwrap_or_else(|| ty.clone()),
            Type::Func(arg, ret) => Type::func(self.apply(arg), self.apply(ret)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_substitution() {
        let subst = Substitution::empty();
        let ty = Type::prim("int");
        assert_eq!(subst.apply(&ty), ty);
    }

    #[test]
    fn test_singleton_substitution() {
        let var = TypeVar::new(0);
        let subst = Substitution::singleton(var, Type::prim("int"));
        assert_eq!(subst.apply(&Type::Var(var)), Type::prim("int"));
    }

    #[test]
    fn test_apply_to_function() {
        let var = TypeVar::new(0);
        let subst = Substitution::singleton(var, Type::prim("int"));
        let ty = Type::func(Type::Var(var), Type::prim("string"));
        assert_eq!(
            subst.apply(&ty),
            Type::func(Type::prim("int"), Type::prim("string"))
        );
    }

    #[test]
    fn test_apply_preserves_unbound_vars() {
        let bound = TypeVar::new(0);
        let unbound = TypeVar::new(1);
        let subst = Substitution::singleton(bound, Type::prim("int"));
        assert_eq!(subst.apply(&Type::Var(unbound)), Type::Var(unbound));
    }

    #[test]
    fn test_apply_does_not_chase_chains() {
        let var0 = TypeVar::new(0);
        let var1 = TypeVar::new(1);
        let mut subst = Substitution::empty();
        subst.insert(var0, Type::Var(var1));
        subst.insert(var1, Type::prim("int"));

        // One application resolves one link only.
        assert_eq!(subst.apply(&Type::Var(var0)), Type::Var(var1));
    }

    #[test]
    fn test_insert_overwrites() {
        let var = TypeVar::new(0);
        let mut subst = Substitution::empty();
        subst.insert(var, Type::prim("int"));
        subst.insert(var, Type::prim("string"));
        assert_eq!(subst.apply(&Type::Var(var)), Type::prim("string"));
        assert_eq!(subst.len(), 1);
    }
}
