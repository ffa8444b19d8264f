//! # Constant Classification Tests
//!
//! An expression is a compile-time constant when every identifier it mentions
//! resolves to a parameter or localparam, and it contains no `$eof` query.
//! Genvars only count inside loop generate guards.

use verilite_compiler_semantic::{
    classify, is_genvar_constant, is_static_constant, ConstantMode, Constness, SemanticDb,
};
use verilite_compiler_tree::{BinaryOp, PortDirection};

use crate::*;

#[test]
fn test_literals_and_parameters_are_static() {
    let (design, (literal, params, string)) = design(|tree| {
        let three = tree.number(3);
        let p = tree.parameter("p", None, three);
        let two = tree.number(2);
        let p_ref = tree.ident("p");
        let double = tree.binary(BinaryOp::Mul, p_ref, two);
        let l = tree.localparam("l", None, double);

        let seven = tree.number(7);
        let p_ref = tree.ident("p");
        let l_ref = tree.ident("l");
        let sum = tree.binary(BinaryOp::Add, p_ref, l_ref);
        let params = tree.binary(BinaryOp::Sub, sum, seven);
        let a = tree.localparam("a", None, params);

        let string = tree.string("hello");
        let b = tree.localparam("b", None, string);

        let literal = tree.number(42);
        let c = tree.localparam("c", None, literal);
        tree.module("m", &[], vec![p, l, a, b, c]);
        (literal, params, string)
    });

    for expr in [literal, params, string] {
        assert_eq!(
            classify(&design, expr, ConstantMode::StrictStatic),
            Constness::StaticConstant
        );
        assert!(is_static_constant(&design, expr));
        assert!(is_genvar_constant(&design, expr));
    }
    assert_eq!(design.value_of(params), Ok(2));
}

#[test]
fn test_variables_are_not_constant() {
    let (design, (reg_read, net_read, port_read)) = design(|tree| {
        let r = tree.reg("r", None, Vec::new(), None);
        let w = tree.net("w", None, Vec::new());
        let input = tree.net("clk", None, Vec::new());
        let port = tree.port(PortDirection::Input, input);

        let r_ref = tree.ident("r");
        let one = tree.number(1);
        let reg_read = tree.binary(BinaryOp::Add, r_ref, one);
        let a = tree.localparam("a", None, reg_read);

        let net_read = tree.ident("w");
        let b = tree.localparam("b", None, net_read);

        let port_read = tree.ident("clk");
        let c = tree.localparam("c", None, port_read);
        tree.module("m", &["clk"], vec![port, r, w, a, b, c]);
        (reg_read, net_read, port_read)
    });

    for expr in [reg_read, net_read, port_read] {
        assert_eq!(
            classify(&design, expr, ConstantMode::StrictStatic),
            Constness::NotConstant
        );
        assert!(!is_genvar_constant(&design, expr));
    }
}

#[test]
fn test_eof_query_is_never_constant() {
    let (design, query) = design(|tree| {
        let fd = tree.number(3);
        let query = tree.feof(fd);
        let a = tree.localparam("a", None, query);
        tree.module("m", &[], vec![a]);
        query
    });

    assert!(!is_static_constant(&design, query));
    assert!(!is_genvar_constant(&design, query));
}

#[test]
fn test_unresolved_identifier_is_not_constant() {
    let (design, expr) = design(|tree| {
        let missing = tree.ident("missing");
        let one = tree.number(1);
        let expr = tree.binary(BinaryOp::Add, one, missing);
        let a = tree.localparam("a", None, expr);
        tree.module("m", &[], vec![a]);
        expr
    });

    assert!(!is_static_constant(&design, expr));
}

#[test]
fn test_genvars_are_constant_only_when_allowed() {
    let (design, guard) = design(|tree| {
        let i = tree.genvar("i");
        let i_ref = tree.ident("i");
        let four = tree.number(4);
        let guard = tree.binary(BinaryOp::Lt, i_ref, four);
        let a = tree.localparam("a", None, guard);
        tree.module("m", &[], vec![i, a]);
        guard
    });

    assert_eq!(
        classify(&design, guard, ConstantMode::StrictStatic),
        Constness::NotConstant
    );
    assert_eq!(
        classify(&design, guard, ConstantMode::GenvarAllowed),
        Constness::StaticConstant
    );
}

#[test]
fn test_statements_are_not_constant() {
    let (design, stmt) = design(|tree| {
        let r = tree.reg("r", None, Vec::new(), None);
        let r_ref = tree.ident("r");
        let one = tree.number(1);
        let stmt = tree.blocking_assign(r_ref, one);
        let initial = tree.initial(stmt);
        tree.module("m", &[], vec![r, initial]);
        stmt
    });

    assert!(!is_static_constant(&design, stmt));
}

#[test]
fn test_parameter_select_is_constant() {
    let (design, select) = design(|tree| {
        let value = tree.number(0b1010);
        let dim = tree.literal_range(7, 0);
        let p = tree.parameter("p", Some(dim), value);
        let bits = tree.literal_range(3, 1);
        let select = tree.ident_with("p", vec![bits]);
        let a = tree.localparam("a", None, select);
        tree.module("m", &[], vec![p, a]);
        select
    });

    assert!(is_static_constant(&design, select));
    assert_eq!(design.value_of(select), Ok(0b101));
}
