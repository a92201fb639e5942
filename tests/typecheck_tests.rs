//! End-to-end type checking scenarios driven through the public API.

use larch::parser::Parser;
use larch::types::{Checker, Diagnostic, DiagnosticKind, Type};

/// Check a program and return the kinds of the reported diagnostics.
fn kinds(input: &str) -> Vec<DiagnosticKind> {
    larch::check_source(input)
        .expect("parsing failed")
        .iter()
        .map(|d| d.kind)
        .collect()
}

/// Check a program and return its diagnostics plus the resolved type of
/// the last top-level form.
fn check_last_type(input: &str) -> (Vec<Diagnostic>, Type) {
    let nodes = Parser::new(input).parse_program().expect("parsing failed");
    assert!(!nodes.is_empty(), "test input has no forms");

    let mut checker = Checker::new();
    let mut last = Type::prim("int");
    for node in &nodes {
        last = checker.check(node);
    }
    let resolved = checker.resolve(&last);
    (checker.finish(), resolved)
}

#[test]
fn well_typed_let() {
    assert_eq!(kinds("(let x : int 42)"), vec![]);
}

#[test]
fn let_value_mismatch() {
    assert_eq!(
        kinds("(let x : int \"hello\")"),
        vec![DiagnosticKind::TypeErrorInLet]
    );
}

#[test]
fn well_typed_assignment() {
    assert_eq!(kinds("(let x : int 1) (set x 2)"), vec![]);
}

#[test]
fn assignment_mismatch() {
    assert_eq!(
        kinds("(let x : int 1) (set x \"two\")"),
        vec![DiagnosticKind::TypeErrorInAssignment]
    );
}

#[test]
fn well_typed_if_has_branch_type() {
    let (diagnostics, ty) = check_last_type("(if true 1 2)");
    assert!(diagnostics.is_empty());
    assert_eq!(ty, Type::prim("int"));
}

#[test]
fn if_condition_not_boolean() {
    assert_eq!(
        kinds("(if 1 2 3)"),
        vec![DiagnosticKind::ConditionNotBoolean]
    );
}

#[test]
fn if_branches_mismatched() {
    assert_eq!(
        kinds("(if true 1 \"x\")"),
        vec![DiagnosticKind::BranchesMismatched]
    );
}

#[test]
fn polymorphic_identity_call_resolves() {
    let (diagnostics, ty) = check_last_type("(def id : 'a (x : 'a) x) (id 5)");
    assert!(diagnostics.is_empty());
    assert_eq!(ty, Type::prim("int"));
}

#[test]
fn two_parameter_function_call() {
    let (diagnostics, ty) =
        check_last_type("(def f : int (x : int y : int) (+ x y)) (f 1 2)");
    assert!(diagnostics.is_empty());
    assert_eq!(ty, Type::prim("int"));
}

#[test]
fn bad_operand_reports_only_the_call() {
    // The failed inner call recovers with an unconstrained result, which
    // then satisfies the declared return type: no cascade.
    assert_eq!(
        kinds("(def f : int (x : int) (+ x \"s\"))"),
        vec![DiagnosticKind::TypeErrorInCall]
    );
}

#[test]
fn polymorphic_function_used_at_two_types() {
    let program = r#"
        (def id : 'a (x : 'a) x)
        (let a : int (id 5))
        (let b : string (id "s"))
    "#;
    assert_eq!(kinds(program), vec![]);
}

#[test]
fn consecutive_lookups_instantiate_fresh_variables() {
    let nodes = Parser::new("(def id : 'a (x : 'a) x) id id")
        .parse_program()
        .expect("parsing failed");

    let mut checker = Checker::new();
    checker.check(&nodes[0]);
    let first = checker.check(&nodes[1]);
    let second = checker.check(&nodes[2]);
    assert!(checker.diagnostics().is_empty());

    let first_vars = first.free_vars();
    let second_vars = second.free_vars();
    assert!(!first_vars.is_empty());
    assert!(first_vars.is_disjoint(&second_vars));
}

#[test]
fn recursion_through_the_defined_name() {
    let program = "(def fact : int (n : int) (if (= n 0) 1 (* n (fact (- n 1)))))";
    assert_eq!(kinds(program), vec![]);
}

#[test]
fn self_application_is_recursive_unification() {
    let diagnostics = larch::check_source("(def f : 'a (x : 'a) (f f))").expect("parsing failed");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::TypeErrorInCall);
    assert!(diagnostics[0].hint.contains("recursive unification"));
}

#[test]
fn set_on_polymorphic_binding_is_rejected() {
    assert_eq!(
        kinds("(let p : 'a 1) (set p 2)"),
        vec![DiagnosticKind::TypeErrorInAssignment]
    );
}

#[test]
fn set_on_unbound_name() {
    assert_eq!(kinds("(set x 1)"), vec![DiagnosticKind::UnboundVariable]);
}

#[test]
fn unbound_variable_in_call() {
    assert_eq!(kinds("(foo 1)"), vec![DiagnosticKind::UnboundVariable]);
}

#[test]
fn unknown_operator_in_call() {
    assert_eq!(kinds("(!= 1 2)"), vec![DiagnosticKind::UnknownOperator]);
}

#[test]
fn call_head_must_be_an_atom() {
    assert_eq!(
        kinds("((f) 1)"),
        vec![DiagnosticKind::ExpectedFunctionName]
    );
}

#[test]
fn comparison_operators_produce_bool() {
    assert_eq!(kinds("(if (< 1 2) 1 2)"), vec![]);
}

#[test]
fn malformed_let_shapes() {
    assert_eq!(kinds("(let x int 5)"), vec![DiagnosticKind::MalformedForm]);
    assert_eq!(
        kinds("(let x : int 5 6)"),
        vec![DiagnosticKind::MalformedForm]
    );
    assert_eq!(
        kinds("(let (x) : int 5)"),
        vec![DiagnosticKind::MalformedForm]
    );
}

#[test]
fn malformed_set_and_if_shapes() {
    assert_eq!(kinds("(set x)"), vec![DiagnosticKind::MalformedForm]);
    assert_eq!(kinds("(if true 1)"), vec![DiagnosticKind::MalformedForm]);
}

#[test]
fn malformed_def_shapes() {
    assert_eq!(
        kinds("(def f : int (x : int))"),
        vec![DiagnosticKind::MalformedForm]
    );
    assert_eq!(
        kinds("(def f int : (x : int) x)"),
        vec![DiagnosticKind::MalformedForm]
    );
}

#[test]
fn malformed_parameter_triple() {
    let program = "(def f : int (x int) 1)";
    assert_eq!(kinds(program), vec![DiagnosticKind::MalformedForm]);
}

#[test]
fn diagnostics_accumulate_across_forms() {
    let program = "(let x : int \"a\") (let y : bool 3)";
    assert_eq!(
        kinds(program),
        vec![
            DiagnosticKind::TypeErrorInLet,
            DiagnosticKind::TypeErrorInLet
        ]
    );
}

#[test]
fn shadowed_parameter_does_not_leak() {
    let program = r#"
        (let x : int 1)
        (def f : bool (x : bool) x)
        (set x 2)
    "#;
    assert_eq!(kinds(program), vec![]);
}

#[test]
fn string_literals_with_spaces_check() {
    assert_eq!(kinds("(let s : string \"hello world\")"), vec![]);
}

#[test]
fn diagnostics_carry_source_location() {
    let source = "(let a : int 1)\n(let b : int \"x\")";
    let diagnostics = larch::check_source(source).expect("parsing failed");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].line(), 2);
    assert_eq!(diagnostics[0].column(), 1);
    assert_eq!(
        diagnostics[0].context_line(source),
        Some("(let b : int \"x\")")
    );
}

#[test]
fn nested_function_calls_resolve() {
    let (diagnostics, ty) = check_last_type("(+ (* 2 3) (- 10 4))");
    assert!(diagnostics.is_empty());
    assert_eq!(ty, Type::prim("int"));
}

#[test]
fn if_result_feeds_outer_call() {
    let (diagnostics, ty) = check_last_type("(+ 1 (if true 2 3))");
    assert!(diagnostics.is_empty());
    assert_eq!(ty, Type::prim("int"));
}
