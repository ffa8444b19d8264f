//! # Design Tree Arena
//!
//! All nodes of a design live in one [`Tree`], addressed by [`NodeId`]. Parents
//! own their children through handles; every node additionally records its
//! parent handle so that scope queries can walk upwards without the tree ever
//! forming an ownership cycle.

use chumsky::span::SimpleSpan;
use index_vec::IndexVec;
use smol_str::SmolStr;

use crate::node::{Identifier, Node};

index_vec::define_index_type! {
    /// A stable handle to a node in a [`Tree`]
    pub struct NodeId = usize;

    MAX_INDEX = usize::MAX;
}

index_vec::define_index_type! {
    /// A handle to a registered source text
    pub struct SourceId = usize;
}

/// The name under which interactive (REPL) input is registered
pub const TOP_SOURCE: &str = "<top>";

/// A registered source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: SmolStr,
    pub text: String,
}

impl SourceFile {
    /// 1-based line number of a byte offset
    pub fn line_of(&self, offset: usize) -> usize {
        let end = offset.min(self.text.len());
        self.text.as_bytes()[..end]
            .iter()
            .filter(|byte| **byte == b'\n')
            .count()
            + 1
    }
}

/// Where a node came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub source: SourceId,
    pub range: SimpleSpan<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub node: Node,
    pub parent: Option<NodeId>,
    pub span: Option<Span>,
}

/// Arena holding every node of a design
#[derive(Debug, Default, Clone)]
pub struct Tree {
    nodes: IndexVec<NodeId, NodeData>,
    sources: IndexVec<SourceId, SourceFile>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and adopt its children.
    ///
    /// Children must already be allocated; a child adopted twice keeps the
    /// most recent parent.
    pub fn push(&mut self, node: Node) -> NodeId {
        let children = node.children();
        let id = self.nodes.push(NodeData {
            node,
            parent: None,
            span: None,
        });
        for child in children {
            self.nodes[child].parent = Some(id);
        }
        id
    }

    /// Re-parent a detached subtree, e.g. an elaboration result
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child].parent = Some(parent);
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id].node
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).map(|data| &data.node)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id].node.children()
    }

    /// Strict ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// True if `ancestor` is `id` or one of its ancestors
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    pub fn identifier(&self, id: NodeId) -> Option<&Identifier> {
        self.node(id).as_identifier()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_source(&mut self, name: impl Into<SmolStr>, text: impl Into<String>) -> SourceId {
        self.sources.push(SourceFile {
            name: name.into(),
            text: text.into(),
        })
    }

    pub fn source(&self, id: SourceId) -> &SourceFile {
        &self.sources[id]
    }

    pub fn set_span(&mut self, id: NodeId, source: SourceId, range: std::ops::Range<usize>) {
        self.nodes[id].span = Some(Span {
            source,
            range: SimpleSpan::from(range),
        });
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.nodes[id].span
    }

    /// The source text a node was parsed from, if known
    pub fn source_text(&self, id: NodeId) -> Option<&str> {
        let span = self.span(id)?;
        self.sources[span.source]
            .text
            .get(span.range.start..span.range.end)
    }
}
