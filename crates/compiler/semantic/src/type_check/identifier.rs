//! Identifier occurrences: resolution, genvar placement and dereference
//! legality.

use verilite_compiler_diagnostics::DiagnosticCode;
use verilite_compiler_tree::{DeclarationKind, DeclarationType, Node, NodeId, RangeKind};

use super::{Context, TypeCheck};

impl TypeCheck<'_> {
    pub(super) fn visit_identifier(&mut self, node: NodeId, ctx: Context) {
        let db = self.db;
        let tree = self.tree();
        let Some(ident) = tree.identifier(node) else {
            return;
        };

        for segment in &ident.path {
            if let Some(isel) = segment.isel {
                if !self.is_static(isel) {
                    self.error(
                        DiagnosticCode::NonConstantExpression,
                        "Found non-constant expression in instance select",
                        node,
                        ctx,
                    );
                }
            }
        }

        let children = tree.children(node);
        if self.probe(|this| this.visit_all(&children, ctx)) {
            tracing::trace!(?node, "skipping identifier with unresolvable subscripts");
            return;
        }

        let Some(name) = db.resolution_of(node) else {
            self.exists_bad_identifier = true;
            if self.config.is_declaration_check() {
                self.warn(
                    DiagnosticCode::UnresolvedIdentifier,
                    "Found reference to unresolvable identifier, this may result in an error during instantiation",
                    node,
                    ctx,
                );
            } else {
                self.error(
                    DiagnosticCode::UnresolvedIdentifier,
                    "Found reference to an unresolvable identifier",
                    node,
                    ctx,
                );
            }
            return;
        };
        let Some(decl) = db.declaration_of(name).copied() else {
            return;
        };

        if decl.kind == DeclarationKind::Genvar && ctx.outermost_loop.is_none() {
            self.error(
                DiagnosticCode::GenvarOutsideLoop,
                "Found reference to a genvar outside of a loop generate construct",
                node,
                ctx,
            );
        }

        let Some(index) = self.check_deref(name, node, ctx) else {
            return;
        };
        let select = ident.dim[index];

        if db.width_of(name) == Ok(1) {
            self.error(
                DiagnosticCode::InvalidSelect,
                "Found bit- or part-select in dereference of variable which was declared scalar",
                node,
                ctx,
            );
            return;
        }
        if decl.ty == DeclarationType::Real {
            self.error(
                DiagnosticCode::InvalidSelect,
                "Found bit- or part-select in dereference of variable which was declared real",
                node,
                ctx,
            );
            return;
        }

        if let Node::Range { kind, lower, .. } = tree.node(select) {
            if *kind == RangeKind::Constant {
                if !self.is_static(select) {
                    self.error(
                        DiagnosticCode::NonConstantExpression,
                        "Found non-constant value in constant part-select",
                        node,
                        ctx,
                    );
                    return;
                }
                if let Ok((upper, lower)) = db.range_of(select) {
                    if upper < lower {
                        self.error(
                            DiagnosticCode::LittleEndianRange,
                            "Little-endian part-selects are not supported",
                            node,
                            ctx,
                        );
                        return;
                    }
                }
            } else if !self.is_static(*lower) {
                self.error(
                    DiagnosticCode::NonConstantExpression,
                    "Found non-constant width in indexed part-select",
                    node,
                    ctx,
                );
                return;
            }
        }

        if !self.is_static(select) {
            if ctx.net_lval {
                self.error(
                    DiagnosticCode::NonConstantExpression,
                    "Found non-constant bit- or part-select in target of continuous assignment",
                    select,
                    ctx,
                );
            }
        } else if !self.config.is_declaration_check() {
            if let (Ok((upper, lower)), Ok(msb), Ok(lsb)) =
                (db.range_of(select), db.msb_of(name), db.lsb_of(name))
            {
                if upper > msb || lower > msb {
                    self.warn(
                        DiagnosticCode::SubscriptOutOfBounds,
                        "Found bit- or part-select outside the upper-bound of the declared indices for this variable",
                        node,
                        ctx,
                    );
                }
                if upper < lsb || lower < lsb {
                    self.warn(
                        DiagnosticCode::SubscriptOutOfBounds,
                        "Found bit- or part-select outside the lower-bound of the declared indices for this variable",
                        node,
                        ctx,
                    );
                }
            }
        }
    }

    /// Check the subscripts of `node` against the array dimensions declared
    /// for `name`.
    ///
    /// Returns the index of the trailing bit- or part-select, if there is one.
    fn check_deref(&mut self, name: NodeId, node: NodeId, ctx: Context) -> Option<usize> {
        let db = self.db;
        let tree = self.tree();
        let declared = tree
            .identifier(name)
            .map(|ident| ident.dim.as_slice())
            .unwrap_or_default();
        let used = tree
            .identifier(node)
            .map(|ident| ident.dim.as_slice())
            .unwrap_or_default();

        if used.len() < declared.len() {
            self.error(
                DiagnosticCode::SubscriptArity,
                "Found an array dereference with fewer subscripts than appear in the declaration for this variable",
                node,
                ctx,
            );
            return None;
        }
        if used.len() > declared.len() + 1 {
            self.error(
                DiagnosticCode::SubscriptArity,
                "Found an array dereference with more subscripts than appear in the declaration for this variable",
                node,
                ctx,
            );
            return None;
        }
        if used.len() == declared.len() {
            let last = used.last()?;
            if matches!(tree.node(*last), Node::Range { .. }) {
                self.error(
                    DiagnosticCode::SubscriptArity,
                    "Found a range expression where a scalar subscript was expected",
                    node,
                    ctx,
                );
                return None;
            }
        }

        for (subscript, dimension) in used.iter().zip(declared) {
            if !self.is_static(*subscript) {
                if ctx.net_lval {
                    self.error(
                        DiagnosticCode::NonConstantExpression,
                        "Found non-constant array subscript in target of continuous assignment",
                        *subscript,
                        ctx,
                    );
                }
                continue;
            }
            if self.config.is_declaration_check() {
                continue;
            }
            if let (Ok(value), Ok((upper, lower))) =
                (db.value_of(*subscript), db.range_of(*dimension))
            {
                if value > upper {
                    self.warn(
                        DiagnosticCode::SubscriptOutOfBounds,
                        "Array subscript is outside the upper-bound of a declared dimension",
                        node,
                        ctx,
                    );
                }
                if value < lower {
                    self.warn(
                        DiagnosticCode::SubscriptOutOfBounds,
                        "Array subscript is outside the lower-bound of a declared dimension",
                        node,
                        ctx,
                    );
                }
            }
        }

        (used.len() > declared.len()).then_some(declared.len())
    }
}
