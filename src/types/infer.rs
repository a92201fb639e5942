use std::collections::HashMap;

use crate::ast::{Atom, List, Node, Span};

use super::builtins;
use super::error::{Diagnostic, DiagnosticKind};
use super::scope::TypeEnv;
use super::ty::{Type, TypeScheme, TypeVar};
use super::unify::Unifier;

/// The inference walker.
///
/// One `Checker` covers one program: it owns the unifier (substitution and
/// fresh-variable counter), the scope stack, and the diagnostic list.
/// Violations never abort the walk; they are recorded and traversal
/// continues with a fresh variable standing in for the broken part.
pub struct Checker {
    unifier: Unifier,
    env: TypeEnv,
    diagnostics: Vec<Diagnostic>,
}

impl Checker {
    pub fn new() -> Self {
        let mut env = TypeEnv::empty();
        builtins::install(&mut env);
        Checker {
            unifier: Unifier::new(),
            env,
            diagnostics: Vec::new(),
        }
    }

    /// Infer the type of one top-level node, accumulating diagnostics.
    pub fn check(&mut self, node: &Node) -> Type {
        self.infer_node(node)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Fully resolve a type under the current substitution.
    pub fn resolve(&self, ty: &Type) -> Type {
        self.unifier.resolve(ty)
    }

    fn fresh_type(&mut self) -> Type {
        Type::Var(self.unifier.fresh_var())
    }

    fn infer_node(&mut self, node: &Node) -> Type {
        match node {
            Node::Atom(atom) => self.infer_atom(atom),
            Node::List(list) => self.infer_form(list),
        }
    }

    /// Literal inference for a bare atom.
    fn infer_atom(&mut self, atom: &Atom) -> Type {
        let value = atom.value.as_str();
        if value == "true" || value == "false" {
            return Type::prim("bool");
        }
        if value.parse::<i64>().is_ok() {
            return Type::prim("int");
        }
        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            return Type::prim("string");
        }
        if value.starts_with('\'') {
            // Inline polymorphic marker: stands for any type.
            return self.fresh_type();
        }
        match self.env.lookup(value) {
            Some(scheme) => self.unifier.instantiate(scheme),
            None => {
                self.report_unbound(value, atom.position);
                self.fresh_type()
            }
        }
    }

    fn infer_form(&mut self, list: &List) -> Type {
        let Some(head) = list.children.first() else {
            // An empty list constrains nothing.
            return self.fresh_type();
        };
        match head.as_atom().map(|atom| atom.value.as_str()) {
            Some("let") => self.check_let(list),
            Some("def") => self.check_def(list),
            Some("set") => self.check_set(list),
            Some("if") => self.check_if(list),
            _ => self.infer_call(list),
        }
    }

    /// `(let NAME : TYPE VALUE)`
    fn check_let(&mut self, list: &List) -> Type {
        const HINT: &str = "expected (let name : type value)";
        let span = &list.position;
        if list.children.len() != 5 {
            self.report_malformed("malformed let expression", *span, HINT);
            return self.fresh_type();
        }
        let shape = (
            list.children[1].as_atom(),
            list.children[2].is_atom(":"),
            list.children[3].as_atom(),
        );
        let (name, annot) = match shape {
            (Some(name), true, Some(annot)) => (name, annot),
            _ => {
                self.report_malformed("malformed let expression", *span, HINT);
                return self.fresh_type();
            }
        };

        let mut table = HashMap::new();
        let mut generalized = Vec::new();
        let declared = self.annotation_type(&annot.value, &mut table, &mut generalized);

        let value_ty = self.infer_node(&list.children[4]);

        if let Err(err) = self.unifier.unify(&declared, &value_ty) {
            let rendered = self.unifier.resolve(&declared);
            self.report(
                Diagnostic::new(
                    DiagnosticKind::TypeErrorInLet,
                    "type error in let binding",
                    *span,
                    err.to_string(),
                )
                .with_type(rendered),
            );
        }

        // Bind even on failure so later uses of the name do not cascade
        // into unbound-variable errors.
        self.env.define(
            name.value.clone(),
            TypeScheme::polymorphic(generalized, declared.clone()),
        );
        declared
    }

    /// `(def NAME : RET_TYPE (P1 : T1 P2 : T2 …) BODY)`
    fn check_def(&mut self, list: &List) -> Type {
        const HINT: &str = "expected (def name : return_type (params) body)";
        let span = &list.position;
        if list.children.len() < 6 {
            self.report_malformed("malformed def expression", *span, HINT);
            return self.fresh_type();
        }
        let shape = (
            list.children[1].as_atom(),
            list.children[2].is_atom(":"),
            list.children[3].as_atom(),
            list.children[4].as_list(),
        );
        let (name, ret_annot, params) = match shape {
            (Some(name), true, Some(ret_annot), Some(params)) => (name, ret_annot, params),
            _ => {
                self.report_malformed("malformed def expression", *span, HINT);
                return self.fresh_type();
            }
        };

        // Pre-bind the name so the body can refer to it; the placeholder is
        // unified with the finished function type below.
        let rec_var = self.unifier.fresh_var();
        self.env.define(
            name.value.clone(),
            TypeScheme::monomorphic(Type::Var(rec_var)),
        );

        self.env.enter();
        let mut table = HashMap::new();
        let mut generalized = Vec::new();
        let mut param_types = Vec::new();

        let mut i = 0;
        while i < params.children.len() {
            if i + 2 >= params.children.len() {
                self.report_malformed(
                    "malformed parameter list",
                    params.position,
                    "parameters come in name : type triples",
                );
                break;
            }
            let triple = (
                params.children[i].as_atom(),
                params.children[i + 1].is_atom(":"),
                params.children[i + 2].as_atom(),
            );
            match triple {
                (Some(param_name), true, Some(param_annot)) => {
                    let param_ty =
                        self.annotation_type(&param_annot.value, &mut table, &mut generalized);
                    // Monomorphic inside the body; fresh copies appear
                    // across calls, not across uses within the body.
                    self.env.define(
                        param_name.value.clone(),
                        TypeScheme::monomorphic(param_ty.clone()),
                    );
                    param_types.push(param_ty);
                }
                _ => {
                    self.report_malformed(
                        "malformed parameter",
                        params.children[i].position(),
                        "expected name : type",
                    );
                }
            }
            i += 3;
        }

        let ret_ty = self.annotation_type(&ret_annot.value, &mut table, &mut generalized);

        let body_ty = self.infer_node(&list.children[5]);
        if let Err(err) = self.unifier.unify(&ret_ty, &body_ty) {
            let rendered = self.unifier.resolve(&ret_ty);
            self.report(
                Diagnostic::new(
                    DiagnosticKind::ReturnTypeMismatch,
                    "return type mismatch",
                    *span,
                    err.to_string(),
                )
                .with_type(rendered),
            );
        }
        self.env.exit();

        let mut fn_ty = ret_ty;
        for param in param_types.into_iter().rev() {
            fn_ty = Type::func(param, fn_ty);
        }

        if let Err(err) = self.unifier.unify(&Type::Var(rec_var), &fn_ty) {
            self.report(Diagnostic::from_unify(err, *span));
        }

        self.env.define(
            name.value.clone(),
            TypeScheme::polymorphic(generalized, fn_ty.clone()),
        );
        fn_ty
    }

    /// `(set NAME VALUE)`
    fn check_set(&mut self, list: &List) -> Type {
        const HINT: &str = "expected (set name value)";
        let span = &list.position;
        if list.children.len() != 3 {
            self.report_malformed("malformed set expression", *span, HINT);
            return self.fresh_type();
        }
        let Some(name) = list.children[1].as_atom() else {
            self.report_malformed("malformed set expression", *span, HINT);
            return self.fresh_type();
        };

        let target = self.env.lookup(&name.value).cloned();
        let value_ty = self.infer_node(&list.children[2]);

        match target {
            None => {
                self.report_unbound(&name.value, name.position);
                self.fresh_type()
            }
            Some(scheme) if scheme.is_polymorphic() => {
                self.report(
                    Diagnostic::new(
                        DiagnosticKind::TypeErrorInAssignment,
                        "type error in assignment",
                        *span,
                        format!("cannot assign to polymorphic binding `{}`", name.value),
                    )
                    .with_type(scheme.ty.clone()),
                );
                self.fresh_type()
            }
            Some(scheme) => {
                if let Err(err) = self.unifier.unify(&scheme.ty, &value_ty) {
                    let rendered = self.unifier.resolve(&scheme.ty);
                    self.report(
                        Diagnostic::new(
                            DiagnosticKind::TypeErrorInAssignment,
                            "type error in assignment",
                            *span,
                            err.to_string(),
                        )
                        .with_type(rendered),
                    );
                }
                scheme.ty
            }
        }
    }

    /// `(if COND THEN ELSE)`
    fn check_if(&mut self, list: &List) -> Type {
        const HINT: &str = "expected (if cond then else)";
        let span = &list.position;
        if list.children.len() != 4 {
            self.report_malformed("malformed if expression", *span, HINT);
            return self.fresh_type();
        }

        let cond_ty = self.infer_node(&list.children[1]);
        if let Err(err) = self.unifier.unify(&cond_ty, &Type::prim("bool")) {
            let rendered = self.unifier.resolve(&cond_ty);
            self.report(
                Diagnostic::new(
                    DiagnosticKind::ConditionNotBoolean,
                    "condition must be boolean",
                    list.children[1].position(),
                    err.to_string(),
                )
                .with_type(rendered),
            );
        }

        let then_ty = self.infer_node(&list.children[2]);
        let else_ty = self.infer_node(&list.children[3]);
        match self.unifier.unify(&then_ty, &else_ty) {
            Ok(()) => then_ty,
            Err(err) => {
                self.report(Diagnostic::new(
                    DiagnosticKind::BranchesMismatched,
                    "branches have different types",
                    *span,
                    err.to_string(),
                ));
                self.fresh_type()
            }
        }
    }

    /// `(F A1 … An)`
    fn infer_call(&mut self, list: &List) -> Type {
        let head = &list.children[0];
        let Some(callee) = head.as_atom() else {
            self.report(Diagnostic::new(
                DiagnosticKind::ExpectedFunctionName,
                "expected function name",
                head.position(),
                "the first element of a call form must be an atom",
            ));
            return self.fresh_type();
        };

        let arg_types: Vec<Type> = list.children[1..]
            .iter()
            .map(|child| self.infer_node(child))
            .collect();

        let fn_ty = match self.env.lookup(&callee.value) {
            Some(scheme) => self.unifier.instantiate(scheme),
            None => {
                if builtins::is_operator_lexeme(&callee.value) {
                    self.report(Diagnostic::new(
                        DiagnosticKind::UnknownOperator,
                        format!("unknown operator: {}", callee.value),
                        callee.position,
                        "known operators are + - * / = < >",
                    ));
                } else {
                    self.report_unbound(&callee.value, callee.position);
                }
                return self.fresh_type();
            }
        };

        let result = self.unifier.fresh_var();
        let mut expected = Type::Var(result);
        for arg in arg_types.into_iter().rev() {
            expected = Type::func(arg, expected);
        }

        if let Err(err) = self.unifier.unify(&fn_ty, &expected) {
            let rendered = self.unifier.resolve(&fn_ty);
            self.report(
                Diagnostic::new(
                    DiagnosticKind::TypeErrorInCall,
                    "type error in function call",
                    list.position,
                    err.to_string(),
                )
                .with_type(rendered),
            );
        }

        Type::Var(result)
    }

    /// Resolve a type annotation lexeme. `'`-markers are linked through
    /// `table` for the duration of one form; the first occurrence of a
    /// spelling allocates a fresh variable and records it as generalized.
    /// Anything else names a primitive.
    fn annotation_type(
        &mut self,
        lexeme: &str,
        table: &mut HashMap<String, TypeVar>,
        generalized: &mut Vec<TypeVar>,
    ) -> Type {
        if lexeme.starts_with('\'') {
            if let Some(var) = table.get(lexeme) {
                return Type::Var(*var);
            }
            let var = self.unifier.fresh_var();
            table.insert(lexeme.to_string(), var);
            generalized.push(var);
            Type::Var(var)
        } else {
            Type::prim(lexeme)
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn report_unbound(&mut self, name: &str, span: Span) {
        self.report(Diagnostic::new(
            DiagnosticKind::UnboundVariable,
            format!("unbound variable: {}", name),
            span,
            format!("no binding named `{}` is in scope", name),
        ));
    }

    fn report_malformed(&mut self, message: impl Into<String>, span: Span, hint: impl Into<String>) {
        self.report(Diagnostic::new(
            DiagnosticKind::MalformedForm,
            message,
            span,
            hint,
        ));
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a whole program and return its diagnostics (empty means
/// well-typed).
pub fn check_program(nodes: &[Node]) -> Vec<Diagnostic> {
    let mut checker = Checker::new();
    for node in nodes {
        checker.check(node);
    }
    checker.finish()
}
