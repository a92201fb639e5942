use std::fmt;

use super::subst::Substitution;
use super::ty::{Type, TypeScheme, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    Mismatch { expected: Type, found: Type },
    Recursive { var: TypeVar, ty: Type },
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnifyError::Mismatch { expected, found } => {
                write!(
                    f,
                    "type mismatch: expected {}, found {}",
                    expected.pretty(),
                    found.pretty()
                )
            }
            UnifyError::Recursive { var, ty } => {
                write!(
                    f,
                    "recursive unification: cannot construct infinite type {} = {}",
                    Type::Var(*var).pretty(),
                    ty.pretty()
                )
            }
        }
    }
}

impl std::error::Error for UnifyError {}

fn occurs_in(var: TypeVar, ty: &Type) -> bool {
    match ty {
        Type::Prim(_) => false,
        Type::Var(v) => *v == var,
        Type::Func(arg, ret) => occurs_in(var, arg) || occurs_in(var, ret),
    }
}

/// The unification context for one inference pass: the current substitution
/// and the fresh-variable counter. Exactly one `Unifier` exists per pass and
/// is threaded through the walker by `&mut`.
pub struct Unifier {
    subst: Substitution,
    next_var: usize,
}

impl Unifier {
    pub fn new() -> Self {
        Unifier {
            subst: Substitution::empty(),
            next_var: 0,
        }
    }

    /// Allocate the next type variable. Ids increase monotonically for the
    /// lifetime of this unifier.
    pub fn fresh_var(&mut self) -> TypeVar {
        let id = self.next_var;
        self.next_var += 1;
        TypeVar::new(id)
    }

    pub fn substitution(&self) -> &Substitution {
        &self.subst
    }

    /// Apply the substitution until a fixpoint is reached.
    ///
    /// Terminates because the substitution is kept acyclic: variables are
    /// only ever bound to fully resolved types that pass the occurs check.
    pub fn resolve(&self, ty: &Type) -> Type {
        let mut current = self.subst.apply(ty);
        loop {
            let next = self.subst.apply(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// Instantiate a scheme: rename every generalized variable to a fresh
    /// one. Monomorphic schemes come back unchanged.
    pub fn instantiate(&mut self, scheme: &TypeScheme) -> Type {
        if scheme.vars.is_empty() {
            return scheme.ty.clone();
        }
        let mut renaming = Substitution::empty();
        for var in &scheme.vars {
            let fresh = self.fresh_var();
            renaming.insert(*var, Type::Var(fresh));
        }
        renaming.apply(&scheme.ty)
    }

    /// Make two types equal under the substitution, extending it as needed.
    ///
    /// On failure the substitution keeps any bindings made by the successful
    /// prefix; the walker treats the failure as local and recovers with a
    /// fresh variable where a result type is needed.
    pub fn unify(&mut self, t1: &Type, t2: &Type) -> Result<(), UnifyError> {
        let a = self.resolve(t1);
        let b = self.resolve(t2);

        match (a, b) {
            (Type::Var(v1), b) => {
                if let Type::Var(v2) = &b {
                    if v1 == *v2 {
                        return Ok(());
                    }
                }
                self.bind(v1, b)
            }
            (a, Type::Var(v2)) => self.bind(v2, a),
            (Type::Func(arg1, ret1), Type::Func(arg2, ret2)) => {
                self.unify(&arg1, &arg2)?;
                self.unify(&ret1, &ret2)
            }
            (Type::Prim(n1), Type::Prim(n2)) if n1 == n2 => Ok(()),
            (a, b) => Err(UnifyError::Mismatch {
                expected: a,
                found: b,
            }),
        }
    }

    /// Bind a variable to a fully resolved type, occurs check first.
    fn bind(&mut self, var: TypeVar, ty: Type) -> Result<(), UnifyError> {
        if occurs_in(var, &ty) {
            return Err(UnifyError::Recursive { var, ty });
        }
        self.subst.insert(var, ty);
        Ok(())
    }
}

impl Default for Unifier {
    fn default() -> Self {
        Self::new()
    }
}
