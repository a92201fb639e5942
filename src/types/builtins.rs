//! Builtin bindings seeded into the global scope before the walk.
//!
//! Arithmetic works over `int` and comparisons produce `bool`; both are
//! registered as curried function types, so `(+ 1 2)` checks the same way
//! any two-argument call does.

use super::scope::TypeEnv;
use super::ty::{Type, TypeScheme};

/// Operators that take two ints and produce an int.
pub const ARITHMETIC_OPS: &[&str] = &["+", "-", "*", "/"];

/// Operators that take two ints and produce a bool.
pub const COMPARISON_OPS: &[&str] = &["=", "<", ">"];

/// Install the builtin operators into `env` (normally the global scope).
pub fn install(env: &mut TypeEnv) {
    for op in ARITHMETIC_OPS {
        env.define(*op, TypeScheme::monomorphic(binary_op(Type::prim("int"))));
    }
    for op in COMPARISON_OPS {
        env.define(*op, TypeScheme::monomorphic(binary_op(Type::prim("bool"))));
    }
}

/// `(int -> (int -> ret))`
fn binary_op(ret: Type) -> Type {
    Type::func(Type::prim("int"), Type::func(Type::prim("int"), ret))
}

/// True when a lexeme is spelled entirely from operator characters.
/// Unbound call heads of this shape report as unknown operators rather
/// than unbound variables.
pub fn is_operator_lexeme(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| "+-*/=<>!".contains(c))
}
