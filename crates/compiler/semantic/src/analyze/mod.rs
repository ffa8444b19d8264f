//! # Reference Analyses
//!
//! Scope-aware answers to the queries of [`crate::SemanticDb`]. Each function
//! takes the database it is answering for, so derived queries (constant
//! evaluation needs resolution, resolution needs elaboration results) compose
//! through the trait rather than through shared mutable state.
//!
//! ## Scopes
//!
//! A module declaration, a named generate block and a named sequential or
//! parallel block each open a scope. Declarations in unnamed blocks, and in
//! the expansions of generate constructs, belong to the nearest enclosing
//! scope. A module instantiation introduces a nested scope named after its
//! instance; its contents are the expansion recorded for it.

mod evaluate;
mod module_info;
mod navigate;
mod read_set;
mod resolve;
mod scope;

pub use evaluate::{lsb_of, msb_of, range_of, value_of, width_of, EvalError};
pub use module_info::ModuleInfo;
pub use navigate::{
    find_in_enclosing_scope, has_duplicate_name, has_earlier_instance, has_shadowing_child,
};
pub use read_set::reads_of;
pub use resolve::{enclosing_module, location_of, resolve};
pub use scope::{scope_entries, scope_of, ScopeEntry};
