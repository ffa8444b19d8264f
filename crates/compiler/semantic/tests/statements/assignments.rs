//! Tests for continuous and procedural assignments

use verilite_compiler_diagnostics::{DiagnosticCode, DiagnosticSeverity};
use verilite_compiler_tree::{BinaryOp, EdgeKind, Node};

use crate::*;

#[test]
fn test_scalar_wire_assigned_to_itself() {
    let (design, (module, assign)) = design(|tree| {
        let x = tree.net("x", None, Vec::new());
        let target = tree.ident("x");
        let read = tree.ident("x");
        let assign = tree.continuous_assign(target, read);
        (tree.module("m", &[], vec![x, assign]), assign)
    });

    let diagnostics = check_instance(&design, module);
    assert_check_err!(diagnostics, DiagnosticCode::SelfReference);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.all()[0].node, assign);
    assert_eq!(
        diagnostics.all()[0].message,
        "Cannot assign a wire to itself"
    );
}

#[test]
fn test_vector_bits_assigned_from_each_other() {
    let (design, module) = design(|tree| {
        let dim = tree.literal_range(1, 0);
        let v = tree.net("v", Some(dim), Vec::new());
        let zero = tree.number(0);
        let target = tree.ident_with("v", vec![zero]);
        let one = tree.number(1);
        let read = tree.ident_with("v", vec![one]);
        let assign = tree.continuous_assign(target, read);
        tree.module("m", &[], vec![v, assign])
    });

    let diagnostics = check_instance(&design, module);
    assert_check_warn!(diagnostics, DiagnosticCode::SelfReference);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.all()[0].message,
        "Found a potentially zero-time assignment from a variable to itself"
    );
}

#[test]
fn test_wire_read_inside_expression() {
    let (design, module) = design(|tree| {
        let x = tree.net("x", None, Vec::new());
        let y = tree.net("y", None, Vec::new());
        let target = tree.ident("x");
        let read_x = tree.ident("x");
        let read_y = tree.ident("y");
        let both = tree.binary(BinaryOp::BitwiseAnd, read_x, read_y);
        let assign = tree.continuous_assign(target, both);
        tree.module("m", &[], vec![x, y, assign])
    });

    let diagnostics = check_instance(&design, module);
    assert_eq!(count(&diagnostics, DiagnosticCode::SelfReference), 1);
    assert_eq!(diagnostics.all()[0].severity, DiagnosticSeverity::Error);
}

#[test]
fn test_continuous_assignment_to_register() {
    let (design, module) = design(|tree| {
        let r = tree.reg("r", None, Vec::new(), None);
        let target = tree.ident("r");
        let one = tree.number(1);
        let assign = tree.continuous_assign(target, one);
        tree.module("m", &[], vec![r, assign])
    });

    let diagnostics = check_instance(&design, module);
    assert_check_err!(diagnostics, DiagnosticCode::StorageClassMismatch);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.all()[0].message,
        "Continuous assignments are only permitted for variables with type wire"
    );
}

#[test]
fn test_procedural_assignment_to_wire() {
    let (design, module) = design(|tree| {
        let w = tree.net("w", None, Vec::new());
        let clk = tree.net("clk", None, Vec::new());
        let target = tree.ident("w");
        let one = tree.number(1);
        let blocking = tree.blocking_assign(target, one);
        let target = tree.ident("w");
        let zero = tree.number(0);
        let nonblocking = tree.nonblocking_assign(target, zero);
        let body = tree.seq_block(None, Vec::new(), vec![blocking, nonblocking]);
        let clock = tree.ident("clk");
        let stmt = tree.at(EdgeKind::Posedge, clock, body);
        let always = tree.always(stmt);
        tree.module("m", &[], vec![w, clk, always])
    });

    let diagnostics = check_instance(&design, module);
    let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Found a blocking assignment to a variable with type other than reg",
            "Found a non-blocking assignment to a variable with type other than reg",
        ]
    );
}

#[test]
fn test_procedural_assignment_to_register() {
    let (design, module) = design(|tree| {
        let dim = tree.literal_range(7, 0);
        let r = tree.reg("r", Some(dim), Vec::new(), None);
        let target = tree.ident("r");
        let read = tree.ident("r");
        let one = tree.number(1);
        let next = tree.binary(BinaryOp::Add, read, one);
        let assign = tree.nonblocking_assign(target, next);
        let delay = tree.number(5);
        let stmt = tree.delay(delay, assign);
        let always = tree.always(stmt);
        tree.module("m", &[], vec![r, always])
    });

    assert_check_ok!(check_instance(&design, module));
}

#[test]
fn test_assignment_to_concatenation() {
    let (design, module) = design(|tree| {
        let a = tree.reg("a", None, Vec::new(), None);
        let b = tree.reg("b", None, Vec::new(), None);
        let target_a = tree.ident("a");
        let target_b = tree.ident("b");
        let three = tree.number(3);
        let assign = tree.push(Node::VariableAssign {
            lhs: vec![target_a, target_b],
            rhs: three,
        });
        let stmt = tree.push(Node::BlockingAssign { ctrl: None, assign });
        let initial = tree.initial(stmt);
        tree.module("m", &[], vec![a, b, initial])
    });

    let diagnostics = check_instance(&design, module);
    assert_check_err!(diagnostics, DiagnosticCode::UnsupportedFeature);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.all()[0].message,
        "Assignments to concatenations are not supported"
    );
}

#[test]
fn test_get_target_must_be_register() {
    let (design, module) = design(|tree| {
        let r = tree.reg("r", None, Vec::new(), None);
        let w = tree.net("w", None, Vec::new());
        let fd = tree.number(1);
        let into_reg = tree.ident("r");
        let good = tree.get_statement(fd, Some(into_reg));
        let fd = tree.number(1);
        let into_wire = tree.ident("w");
        let bad = tree.get_statement(fd, Some(into_wire));
        let body = tree.seq_block(None, Vec::new(), vec![good, bad]);
        let initial = tree.initial(body);
        tree.module("m", &[], vec![r, w, initial])
    });

    let diagnostics = check_instance(&design, module);
    assert_check_err!(diagnostics, DiagnosticCode::StorageClassMismatch);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.all()[0].message,
        "The target of a $get() statement must be a variable of type reg"
    );
}
