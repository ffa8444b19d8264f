//! # Verilite Design Tree
//!
//! The tree representation consumed by the semantic checker. Nodes are stored
//! in an arena ([`Tree`]) and referenced by [`NodeId`] handles; a node knows its
//! parent, so scope lookups can walk upwards, but only parents own children.
//!
//! The parser and the elaborator produce trees through the builder methods in
//! [`builder`]; nothing in the checker ever mutates one.

pub mod builder;
pub mod node;
pub mod print;
pub mod tree;

pub use node::{
    BinaryOp, CaseGenerateItem, CaseItem, Declaration, DeclarationKind, DeclarationType,
    EdgeKind, IdSegment, Identifier, IfGenerateClause, Node, PortDirection, RangeKind,
    SystemTaskKind, UnaryOp,
};
pub use tree::{NodeData, NodeId, SourceFile, SourceId, Span, Tree, TOP_SOURCE};
