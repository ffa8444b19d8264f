//! # Verilite Semantic Analysis
//!
//! Static legality checking for the Verilite hardware description subset.
//! Checking is split around elaboration: generate constructs and module
//! instantiations are checked before they are expanded, and concrete
//! subtrees (including what the elaborator produced) are checked afterwards.
//!
//! ## Architecture
//!
//! 1. **Design database** ([`db`]): the [`SemanticDb`] trait the checker
//!    queries, and [`Design`], which owns the tree, the module table and the
//!    recorded expansions.
//! 2. **Analyses** ([`analyze`]): scope-aware name resolution, constant
//!    evaluation, duplicate and shadowing queries, module summaries and read
//!    sets.
//! 3. **Constant classification** ([`constant`]): whether an expression is a
//!    compile-time constant.
//! 4. **Checker** ([`type_check`]): the pre- and post-elaboration rules, which
//!    report through an injected [`DiagnosticSink`].
//!
//! ## Example
//!
//! ```
//! use verilite_compiler_diagnostics::CollectingSink;
//! use verilite_compiler_semantic::{Design, TypeCheck};
//! use verilite_compiler_tree::{BinaryOp, Tree};
//!
//! let mut tree = Tree::new();
//! let p = tree.ident("p");
//! let one = tree.number(1);
//! let sum = tree.binary(BinaryOp::Add, p, one);
//! let decl = tree.localparam("p", None, sum);
//! let module = tree.module("m", &[], vec![decl]);
//! let design = Design::new(tree);
//!
//! let sink = CollectingSink::new();
//! TypeCheck::new(&design, &sink).post_elaboration_check(module);
//! assert!(sink.has_errors());
//! ```

pub mod analyze;
pub mod constant;
pub mod db;
pub mod type_check;

pub use analyze::{EvalError, ModuleInfo};
pub use constant::{classify, is_genvar_constant, is_static_constant, ConstantMode, Constness};
pub use db::{Design, DesignError, SemanticDb};
pub use type_check::{CheckMode, CheckerConfig, TypeCheck, MAX_BLOCK_STATEMENTS};

#[doc(no_inline)]
pub use verilite_compiler_diagnostics::DiagnosticSink;
