//! # Statement Tests
//!
//! Tests for continuous and procedural assignments, always constructs,
//! blocks, loop statements, timing controls and system tasks.

pub mod assignments;
