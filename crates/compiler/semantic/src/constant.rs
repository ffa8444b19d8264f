//! # Constant Classification
//!
//! Decides whether an expression is a compile-time constant. An expression is
//! constant when every identifier it mentions resolves to a parameter or a
//! localparam (or, where allowed, a genvar) and it contains no file-status
//! query. Statements are never constant.
//!
//! Classification stops at the first disqualifying node.

use verilite_compiler_tree::{DeclarationKind, Node, NodeId};

use crate::SemanticDb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constness {
    NotConstant,
    StaticConstant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantMode {
    /// Only parameters and localparams count as constant
    StrictStatic,
    /// Genvars count as constant too, as in loop generate guards
    GenvarAllowed,
}

pub fn classify(db: &dyn SemanticDb, expr: NodeId, mode: ConstantMode) -> Constness {
    let mut classifier = Classifier {
        db,
        mode,
        constant: true,
    };
    classifier.visit(expr);
    if classifier.constant {
        Constness::StaticConstant
    } else {
        Constness::NotConstant
    }
}

pub fn is_static_constant(db: &dyn SemanticDb, expr: NodeId) -> bool {
    classify(db, expr, ConstantMode::StrictStatic) == Constness::StaticConstant
}

pub fn is_genvar_constant(db: &dyn SemanticDb, expr: NodeId) -> bool {
    classify(db, expr, ConstantMode::GenvarAllowed) == Constness::StaticConstant
}

struct Classifier<'db> {
    db: &'db dyn SemanticDb,
    mode: ConstantMode,
    constant: bool,
}

impl Classifier<'_> {
    fn visit(&mut self, node: NodeId) {
        if !self.constant {
            return;
        }
        let tree = self.db.tree();
        match tree.node(node) {
            Node::Number(_) | Node::String(_) => {}
            Node::Feof { .. } => self.constant = false,
            Node::Identifier(_) => {
                for child in tree.children(node) {
                    self.visit(child);
                }
                self.identifier(node);
            }
            other if other.is_expression() => {
                for child in tree.children(node) {
                    self.visit(child);
                }
            }
            _ => self.constant = false,
        }
    }

    fn identifier(&mut self, node: NodeId) {
        if !self.constant {
            return;
        }
        let kind = self
            .db
            .resolution_of(node)
            .and_then(|name| self.db.declaration_of(name))
            .map(|decl| decl.kind);
        self.constant = match kind {
            Some(DeclarationKind::Parameter | DeclarationKind::Localparam) => true,
            Some(DeclarationKind::Genvar) => self.mode == ConstantMode::GenvarAllowed,
            _ => false,
        };
    }
}
