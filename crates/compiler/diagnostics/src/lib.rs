//! # Verilite Diagnostics
//!
//! Diagnostics produced by the semantic checker, the sinks that collect them,
//! and rendering helpers.

mod diagnostics;
mod reporting;
mod sink;

pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticCode, DiagnosticCollection, DiagnosticContext,
    DiagnosticSeverity, Location,
};
pub use reporting::build_diagnostic_message;
pub use sink::{CollectingSink, DiagnosticSink};
