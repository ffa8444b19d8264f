//! Tests for port connections

use verilite_compiler_diagnostics::DiagnosticCode;
use verilite_compiler_tree::BinaryOp;

use super::{instantiate_child, named, ordered};
use crate::*;

#[test]
fn test_ordered_connections() {
    let (design, inst) = instantiate_child(|tree| (Vec::new(), ordered(tree, &["p", "q", "r"])));
    assert_check_ok!(pre_check(&design, inst));
}

#[test]
fn test_named_connections() {
    let (design, inst) = instantiate_child(|tree| {
        let ports = named(tree, &[("y", "r"), ("a", "p"), ("b", "q")]);
        (Vec::new(), ports)
    });
    assert_check_ok!(pre_check(&design, inst));
}

#[test]
fn test_too_many_connections() {
    let (design, inst) =
        instantiate_child(|tree| (Vec::new(), ordered(tree, &["p", "q", "r", "p"])));

    let diagnostics = pre_check(&design, inst);
    assert_check_err!(diagnostics, DiagnosticCode::OverrideArity);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.all()[0].message,
        "Instantiation contains more connections than appear in module declaration"
    );
}

#[test]
fn test_duplicate_named_connection() {
    let (design, inst) = instantiate_child(|tree| {
        let ports = named(tree, &[("a", "p"), ("a", "q")]);
        (Vec::new(), ports)
    });

    let diagnostics = pre_check(&design, inst);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.all()[0].message,
        "Instantiation contains duplicate named connections"
    );
}

#[test]
fn test_unknown_named_connection() {
    let (design, inst) = instantiate_child(|tree| {
        let ports = named(tree, &[("z", "p")]);
        (Vec::new(), ports)
    });

    let diagnostics = pre_check(&design, inst);
    assert_check_err!(diagnostics, DiagnosticCode::UnknownNamedArgument);
    assert_eq!(
        diagnostics.all()[0].message,
        "Instantiation contains a reference to an unresolvable explicit port"
    );
}

#[test]
fn test_expression_connected_to_named_output() {
    let (design, inst) = instantiate_child(|tree| {
        let p = tree.ident("p");
        let q = tree.ident("q");
        let both = tree.binary(BinaryOp::BitwiseAnd, p, q);
        let y = tree.named_arg("y", Some(both));
        let mut ports = named(tree, &[("a", "p"), ("b", "q")]);
        ports.push(y);
        (Vec::new(), ports)
    });

    let diagnostics = pre_check(&design, inst);
    assert_check_err!(diagnostics, DiagnosticCode::OutputExpressionConnection);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.all()[0].message,
        "Instantiation contains a connection between an expression and a named output port"
    );
}

#[test]
fn test_expression_connected_to_ordered_ports() {
    let (design, inst) = instantiate_child(|tree| {
        let p = tree.ident("p");
        let q = tree.ident("q");
        let both = tree.binary(BinaryOp::BitwiseAnd, p, q);
        let input = tree.arg(both);
        let mut ports = vec![input];
        ports.extend(ordered(tree, &["q", "r"]));
        (Vec::new(), ports)
    });
    assert_check_ok!(pre_check(&design, inst));

    let (design, inst) = instantiate_child(|tree| {
        let mut ports = ordered(tree, &["p", "q"]);
        let one = tree.number(1);
        ports.push(tree.arg(one));
        (Vec::new(), ports)
    });
    let diagnostics = pre_check(&design, inst);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.all()[0].message,
        "Instantiation contains a connection between an expression and an ordered output port"
    );
}

#[test]
fn test_unresolvable_argument_stops_instantiation_checks() {
    let (design, inst) =
        instantiate_child(|tree| (Vec::new(), ordered(tree, &["p", "missing", "r", "q"])));

    let diagnostics = pre_check(&design, inst);
    assert_check_err!(diagnostics, DiagnosticCode::UnresolvedIdentifier);
    assert_eq!(diagnostics.len(), 1);
}
