//! # Semantic Checking Tests
//!
//! Tests for the pre- and post-elaboration checks, organized by concern.
//! Designs are assembled with the tree builders rather than parsed, so each
//! test spells out exactly the constructs it exercises.
//!
//! ## Test Organization
//!
//! - `constant/` - Constant classification of expressions
//! - `declarations/` - Duplicate names, parameter initializers, ranges, ports
//! - `identifiers/` - Resolution, genvar placement, subscripts and selects
//! - `instantiation/` - Overrides, connections and instance expansions
//! - `generate/` - Generate guards, loop generate constructs and expansions
//! - `statements/` - Assignments, blocks, loops and timing controls
//! - `reporting/` - Attribution, contexts, locations and rendering
//!
//! ## Test Utilities
//!
//! - `assert_check_ok!(diagnostics)` - Assert a check reported nothing
//! - `assert_check_err!(diagnostics, code)` - Assert an error with `code` was reported
//! - `assert_check_warn!(diagnostics, code)` - Assert a warning with `code` was
//!   reported, and no errors

pub use common::*;

/// Macro to assert that a check produced no diagnostics at all
#[macro_export]
macro_rules! assert_check_ok {
    ($diagnostics:expr) => {{
        let function_name = stdext::function_name!();
        $crate::assert_check_ok_impl(&$diagnostics, function_name)
    }};
}

/// Macro to assert that a check produced an error with the given code
#[macro_export]
macro_rules! assert_check_err {
    ($diagnostics:expr, $code:expr) => {{
        let function_name = stdext::function_name!();
        $crate::assert_check_err_impl(&$diagnostics, $code, function_name)
    }};
}

/// Macro to assert that a check produced a warning with the given code and no
/// errors
#[macro_export]
macro_rules! assert_check_warn {
    ($diagnostics:expr, $code:expr) => {{
        let function_name = stdext::function_name!();
        $crate::assert_check_warn_impl(&$diagnostics, $code, function_name)
    }};
}

// Test modules organized by concern
pub mod constant;
pub mod statements;
