//! Tests for `if` and `case` generate constructs

use verilite_compiler_diagnostics::{DiagnosticCode, DiagnosticContext};
use verilite_compiler_tree::BinaryOp;

use crate::*;

#[test]
fn test_parameter_guards() {
    let (design, (if_generate, case_generate)) = design(|tree| {
        let one = tree.number(1);
        let p = tree.parameter("P", None, one);
        let guard = tree.ident("P");
        let block = tree.generate_block(Some("g"), Vec::new());
        let if_generate = tree.if_generate(vec![(guard, block)], None);

        let guard = tree.ident("P");
        let two = tree.number(2);
        let sum = tree.binary(BinaryOp::Add, guard, two);
        let label = tree.number(3);
        let block = tree.generate_block(Some("h"), Vec::new());
        let case_generate = tree.case_generate(sum, vec![(vec![label], Some(block)), (Vec::new(), None)]);
        tree.module("m", &[], vec![p, if_generate, case_generate]);
        (if_generate, case_generate)
    });

    assert_check_ok!(pre_check(&design, if_generate));
    assert_check_ok!(pre_check(&design, case_generate));
}

#[test]
fn test_variable_in_if_guard() {
    let (design, (construct, second_guard)) = design(|tree| {
        let one = tree.number(1);
        let p = tree.parameter("P", None, one);
        let r = tree.reg("r", None, Vec::new(), None);
        let first_guard = tree.ident("P");
        let first = tree.generate_block(Some("a"), Vec::new());
        let second_guard = tree.ident("r");
        let second = tree.generate_block(Some("b"), Vec::new());
        let otherwise = tree.generate_block(Some("c"), Vec::new());
        let construct = tree.if_generate(
            vec![(first_guard, first), (second_guard, second)],
            Some(otherwise),
        );
        tree.module("m", &[], vec![p, r, construct]);
        (construct, second_guard)
    });

    let diagnostics = pre_check(&design, construct);
    assert_check_err!(diagnostics, DiagnosticCode::NonConstantExpression);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.all()[0].node, second_guard);
    assert_eq!(
        diagnostics.all()[0].message,
        "Non-constant expression appears in the guard for a if generate construct"
    );
}

#[test]
fn test_variable_in_case_guard() {
    let (design, construct) = design(|tree| {
        let w = tree.net("w", None, Vec::new());
        let guard = tree.ident("w");
        let label = tree.number(0);
        let block = tree.generate_block(None, Vec::new());
        let construct = tree.case_generate(guard, vec![(vec![label], Some(block))]);
        tree.module("m", &[], vec![w, construct]);
        construct
    });

    let diagnostics = pre_check(&design, construct);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.all()[0].message,
        "Non-constant expression appears in the guard for a case generate construct"
    );
}

#[test]
fn test_expansion_is_checked_after_elaboration() {
    let (mut design, (module, construct)) = design(|tree| {
        let one = tree.number(1);
        let p = tree.parameter("P", None, one);
        let guard = tree.ident("P");
        let block = tree.generate_block(Some("g"), Vec::new());
        let construct = tree.if_generate(vec![(guard, block)], None);
        (tree.module("m", &[], vec![p, construct]), construct)
    });
    assert_check_ok!(check_instance(&design, module));

    expand(&mut design, construct, |tree| {
        let r = tree.reg("r", None, Vec::new(), None);
        let again = tree.reg("r", None, Vec::new(), None);
        vec![tree.generate_block(Some("g"), vec![r, again])]
    });

    let diagnostics = check_instance(&design, module);
    assert_check_err!(diagnostics, DiagnosticCode::DuplicateDefinition);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.all()[0].context, DiagnosticContext::ModuleItem);

    assert_check_ok!(check_declaration(&design, module));
}

#[test]
fn test_unnamed_expansion_joins_enclosing_scope() {
    let (mut design, (module, construct)) = design(|tree| {
        let w = tree.net("w", None, Vec::new());
        let one = tree.number(1);
        let block = tree.generate_block(None, Vec::new());
        let construct = tree.if_generate(vec![(one, block)], None);
        (tree.module("m", &[], vec![w, construct]), construct)
    });
    expand(&mut design, construct, |tree| {
        let w = tree.net("w", None, Vec::new());
        vec![tree.generate_block(None, vec![w])]
    });

    let diagnostics = check_instance(&design, module);
    assert_check_err!(diagnostics, DiagnosticCode::DuplicateDefinition);
    assert_eq!(diagnostics.len(), 1);
}
