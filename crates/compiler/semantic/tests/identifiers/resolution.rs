//! Tests for name resolution and genvar placement

use verilite_compiler_diagnostics::{DiagnosticCode, DiagnosticSeverity};
use verilite_compiler_semantic::SemanticDb;
use verilite_compiler_tree::{IdSegment, NodeId, Tree};

use crate::*;

/// `for (i = 0; i < 4; i = i + 1)` over the genvar `i`
fn loop_over_i(tree: &mut Tree, block: NodeId) -> NodeId {
    let four = tree.number(4);
    counting_loop(tree, "i", four, block)
}

#[test]
fn test_unresolvable_identifier_severity_follows_mode() {
    let (design, module) = design(|tree| {
        let w = tree.net("w", None, Vec::new());
        let target = tree.ident("w");
        let missing = tree.ident("missing");
        let assign = tree.continuous_assign(target, missing);
        tree.module("m", &[], vec![w, assign])
    });

    let diagnostics = check_declaration(&design, module);
    assert_check_warn!(diagnostics, DiagnosticCode::UnresolvedIdentifier);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.all()[0].message,
        "Found reference to unresolvable identifier, this may result in an error during instantiation"
    );

    let diagnostics = check_instance(&design, module);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.all()[0].severity, DiagnosticSeverity::Error);
    assert_eq!(
        diagnostics.all()[0].message,
        "Found reference to an unresolvable identifier"
    );
}

#[test]
fn test_unresolvable_subscript_skips_dependent_checks() {
    let (design, module) = design(|tree| {
        let dim = tree.literal_range(7, 0);
        let w = tree.net("w", Some(dim), Vec::new());
        let t = tree.net("t", None, Vec::new());
        let target = tree.ident("t");
        let missing = tree.ident("missing");
        let upper = tree.number(3);
        let select = tree.range(upper, missing);
        let read = tree.ident_with("w", vec![select]);
        let assign = tree.continuous_assign(target, read);
        tree.module("m", &[], vec![w, t, assign])
    });

    let diagnostics = check_instance(&design, module);
    assert_check_err!(diagnostics, DiagnosticCode::UnresolvedIdentifier);
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_inner_declarations_hide_outer_ones() {
    let (design, (outer, inner, read)) = design(|tree| {
        let outer = tree.reg("x", None, Vec::new(), None);
        let inner = tree.reg("x", None, Vec::new(), None);
        let y = tree.reg("y", None, Vec::new(), None);
        let target = tree.ident("y");
        let read = tree.ident("x");
        let assign = tree.blocking_assign(target, read);
        let block = tree.seq_block(Some("b"), vec![inner], vec![assign]);
        let initial = tree.initial(block);
        tree.module("m", &[], vec![outer, y, initial]);
        (outer, inner, read)
    });

    let name_of = |decl: NodeId| design.tree().node(decl).as_declaration().unwrap().id;
    assert_eq!(design.resolution_of(read), Some(name_of(inner)));
    assert_ne!(design.resolution_of(read), Some(name_of(outer)));
}

#[test]
fn test_hierarchical_reference_into_named_block() {
    let (design, (module, good, bad)) = design(|tree| {
        let x = tree.net("x", None, Vec::new());
        let block = tree.generate_block(Some("g"), vec![x]);
        let y = tree.net("y", None, Vec::new());
        let z = tree.net("z", None, Vec::new());

        let target = tree.ident("y");
        let good = tree.hierarchical_ident(vec![IdSegment::new("g"), IdSegment::new("x")], Vec::new());
        let first = tree.continuous_assign(target, good);
        let target = tree.ident("z");
        let bad = tree.hierarchical_ident(vec![IdSegment::new("g"), IdSegment::new("w")], Vec::new());
        let second = tree.continuous_assign(target, bad);
        (tree.module("m", &[], vec![block, y, z, first, second]), good, bad)
    });

    assert!(design.resolution_of(good).is_some());
    assert_eq!(design.resolution_of(bad), None);

    let diagnostics = check_instance(&design, module);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.all()[0].node, bad);
    assert_eq!(diagnostics.all()[0].subject, "g.w");
}

#[test]
fn test_instance_select_picks_loop_expansion_block() {
    let (mut design, (module, construct, read)) = design(|tree| {
        let i = tree.genvar("i");
        let template = tree.generate_block(Some("gen"), Vec::new());
        let construct = loop_over_i(tree, template);
        let y = tree.net("y", None, Vec::new());
        let target = tree.ident("y");
        let one = tree.number(1);
        let mut segment = IdSegment::new("gen");
        segment.isel = Some(one);
        let read = tree.hierarchical_ident(vec![segment, IdSegment::new("x")], Vec::new());
        let assign = tree.continuous_assign(target, read);
        (tree.module("m", &[], vec![i, construct, y, assign]), construct, read)
    });

    let blocks = expand(&mut design, construct, |tree| {
        (0..2)
            .map(|index| {
                let x = tree.net("x", None, Vec::new());
                indexed_block(tree, "gen", index, vec![x])
            })
            .collect()
    });

    let resolved = design.resolution_of(read).expect("gen[1].x resolves");
    assert!(design.tree().is_within(resolved, blocks[1]));
    assert_check_ok!(check_instance(&design, module));
}

#[test]
fn test_genvar_outside_loop_generate() {
    let (design, (module, read)) = design(|tree| {
        let i = tree.genvar("i");
        let w = tree.net("w", None, Vec::new());
        let target = tree.ident("w");
        let read = tree.ident("i");
        let assign = tree.continuous_assign(target, read);
        (tree.module("m", &[], vec![i, w, assign]), read)
    });

    let diagnostics = check_instance(&design, module);
    assert_check_err!(diagnostics, DiagnosticCode::GenvarOutsideLoop);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.all()[0].node, read);
    assert_eq!(
        diagnostics.all()[0].message,
        "Found reference to a genvar outside of a loop generate construct"
    );
}

#[test]
fn test_genvar_inside_loop_generate() {
    let (design, (construct, assign)) = design(|tree| {
        let i = tree.genvar("i");
        let x = tree.net("x", None, Vec::new());
        let target = tree.ident("x");
        let read = tree.ident("i");
        let assign = tree.continuous_assign(target, read);
        let template = tree.generate_block(Some("gen"), vec![x, assign]);
        let construct = loop_over_i(tree, template);
        tree.module("m", &[], vec![i, construct]);
        (construct, assign)
    });

    assert_check_ok!(pre_check(&design, construct));
    assert_check_ok!(check_instance(&design, assign));
}

#[test]
fn test_genvar_in_loop_expansion() {
    let (mut design, (module, construct)) = design(|tree| {
        let i = tree.genvar("i");
        let template = tree.generate_block(Some("gen"), Vec::new());
        let construct = loop_over_i(tree, template);
        (tree.module("m", &[], vec![i, construct]), construct)
    });
    expand(&mut design, construct, |tree| {
        let x = tree.net("x", None, Vec::new());
        let target = tree.ident("x");
        let read = tree.ident("i");
        let assign = tree.continuous_assign(target, read);
        vec![indexed_block(tree, "gen", 0, vec![x, assign])]
    });

    assert_check_ok!(check_instance(&design, module));
}
