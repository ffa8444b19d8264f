//! Tests for loop generate constructs

use verilite_compiler_diagnostics::DiagnosticCode;
use verilite_compiler_tree::{BinaryOp, Node};

use crate::*;

#[test]
fn test_well_formed_loop() {
    let (design, construct) = design(|tree| {
        let i = tree.genvar("i");
        let x = tree.net("x", None, Vec::new());
        let block = tree.generate_block(Some("gen"), vec![x]);
        let four = tree.number(4);
        let construct = counting_loop(tree, "i", four, block);
        tree.module("m", &[], vec![i, construct]);
        construct
    });

    assert_check_ok!(pre_check(&design, construct));
}

#[test]
fn test_guard_bounded_by_parameter() {
    let (design, construct) = design(|tree| {
        let i = tree.genvar("i");
        let eight = tree.number(8);
        let n = tree.parameter("N", None, eight);
        let block = tree.generate_block(Some("gen"), Vec::new());
        let bound = tree.ident("N");
        let construct = counting_loop(tree, "i", bound, block);
        tree.module("m", &[], vec![i, n, construct]);
        construct
    });

    assert_check_ok!(pre_check(&design, construct));
}

#[test]
fn test_guard_bounded_by_variable() {
    let (design, (construct, guard)) = design(|tree| {
        let i = tree.genvar("i");
        let n = tree.reg("n", None, Vec::new(), None);
        let block = tree.generate_block(Some("gen"), Vec::new());
        let bound = tree.ident("n");
        let construct = counting_loop(tree, "i", bound, block);
        tree.module("m", &[], vec![i, n, construct]);
        let Node::LoopGenerateConstruct { cond, .. } = tree.node(construct) else {
            unreachable!()
        };
        (construct, *cond)
    });

    let diagnostics = pre_check(&design, construct);
    assert_check_err!(diagnostics, DiagnosticCode::NonConstantExpression);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.all()[0].node, guard);
    assert_eq!(
        diagnostics.all()[0].message,
        "Non-constant expression appears in the guard for a loop generate construct"
    );
}

#[test]
fn test_update_assigns_a_different_genvar() {
    let (design, (construct, update)) = design(|tree| {
        let i = tree.genvar("i");
        let j = tree.genvar("j");
        let target = tree.ident("i");
        let zero = tree.number(0);
        let init = tree.variable_assign(target, zero);
        let read = tree.ident("i");
        let four = tree.number(4);
        let cond = tree.binary(BinaryOp::Lt, read, four);
        let target = tree.ident("j");
        let read = tree.ident("i");
        let one = tree.number(1);
        let next = tree.binary(BinaryOp::Add, read, one);
        let update = tree.variable_assign(target, next);
        let block = tree.generate_block(Some("gen"), Vec::new());
        let construct = tree.loop_generate(init, cond, update, block);
        tree.module("m", &[], vec![i, j, construct]);
        (construct, update)
    });

    let diagnostics = pre_check(&design, construct);
    assert_check_err!(diagnostics, DiagnosticCode::LoopVariableMismatch);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.all()[0].node, update);
    assert_eq!(
        diagnostics.all()[0].message,
        "Initialization and update statements refer to different variables in loop generate construct"
    );
}

#[test]
fn test_block_named_like_variable() {
    let (design, construct) = design(|tree| {
        let i = tree.genvar("i");
        let wire = tree.net("gen", None, Vec::new());
        let block = tree.generate_block(Some("gen"), Vec::new());
        let four = tree.number(4);
        let construct = counting_loop(tree, "i", four, block);
        tree.module("m", &[], vec![i, wire, construct]);
        construct
    });

    let diagnostics = pre_check(&design, construct);
    assert_check_err!(diagnostics, DiagnosticCode::DuplicateDefinition);
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_block_named_like_nested_scope() {
    let (design, construct) = design(|tree| {
        let i = tree.genvar("i");
        let other = tree.generate_block(Some("gen"), Vec::new());
        let block = tree.generate_block(Some("gen"), Vec::new());
        let four = tree.number(4);
        let construct = counting_loop(tree, "i", four, block);
        tree.module("m", &[], vec![i, other, construct]);
        construct
    });

    let diagnostics = pre_check(&design, construct);
    assert_check_err!(diagnostics, DiagnosticCode::NestedScopeConflict);
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_own_expansion_does_not_conflict() {
    let (mut design, construct) = design(|tree| {
        let i = tree.genvar("i");
        let block = tree.generate_block(Some("gen"), Vec::new());
        let four = tree.number(4);
        let construct = counting_loop(tree, "i", four, block);
        tree.module("m", &[], vec![i, construct]);
        construct
    });
    expand(&mut design, construct, |tree| {
        (0..4)
            .map(|index| indexed_block(tree, "gen", index, Vec::new()))
            .collect()
    });

    assert_check_ok!(pre_check(&design, construct));
}

#[test]
fn test_nested_loop_templates() {
    let (design, (inner, assign)) = design(|tree| {
        let i = tree.genvar("i");
        let j = tree.genvar("j");
        let x = tree.net("x", None, Vec::new());
        let target = tree.ident("x");
        let read_i = tree.ident("i");
        let read_j = tree.ident("j");
        let sum = tree.binary(BinaryOp::Add, read_i, read_j);
        let assign = tree.continuous_assign(target, sum);
        let inner_block = tree.generate_block(Some("inner"), vec![x, assign]);
        let bound = tree.ident("i");
        let inner = counting_loop(tree, "j", bound, inner_block);
        let outer_block = tree.generate_block(Some("outer"), vec![inner]);
        let four = tree.number(4);
        let outer = counting_loop(tree, "i", four, outer_block);
        tree.module("m", &[], vec![i, j, outer]);
        (inner, assign)
    });

    assert_check_ok!(pre_check(&design, inner));
    assert_check_ok!(check_instance(&design, assign));
}
