//! Read sets: which identifier occurrences a node reads.

use verilite_compiler_tree::{Node, NodeId, Tree};

/// Every identifier occurrence read by `node`, in source order.
///
/// Assignment targets are written rather than read, but the expressions in
/// their subscripts are still reads.
pub fn reads_of(tree: &Tree, node: NodeId) -> Vec<NodeId> {
    let mut reads = Vec::new();
    collect(tree, node, &mut reads);
    reads
}

fn collect(tree: &Tree, node: NodeId, reads: &mut Vec<NodeId>) {
    match tree.node(node) {
        Node::Identifier(_) => {
            reads.push(node);
            subscripts(tree, node, reads);
        }
        Node::ContinuousAssign { lhs, rhs } | Node::VariableAssign { lhs, rhs } => {
            for target in lhs {
                subscripts(tree, *target, reads);
            }
            collect(tree, *rhs, reads);
        }
        Node::GetStatement { fd, var } => {
            collect(tree, *fd, reads);
            if let Some(var) = var {
                subscripts(tree, *var, reads);
            }
        }
        _ => {
            for child in tree.children(node) {
                collect(tree, child, reads);
            }
        }
    }
}

fn subscripts(tree: &Tree, target: NodeId, reads: &mut Vec<NodeId>) {
    for child in tree.children(target) {
        collect(tree, child, reads);
    }
}
