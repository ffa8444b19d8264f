//! # Error Reporting Utilities
//!
//! Renders checker diagnostics against their source text with ariadne.

use crate::Diagnostic;
use ariadne::{Label, Report, Source};

/// Build a formatted message for a diagnostic whose location lies in `source`
pub fn build_diagnostic_message(source: &str, diagnostic: &Diagnostic, with_color: bool) -> String {
    let mut write_buffer = Vec::new();
    let code_u32: u32 = diagnostic.code.into();
    let range = diagnostic
        .location
        .as_ref()
        .map_or(0..0, |location| location.span.into_range());
    let written = Report::build(diagnostic.severity.into(), ((), range.clone()))
        .with_config(
            ariadne::Config::new()
                .with_index_type(ariadne::IndexType::Byte)
                .with_color(with_color),
        )
        .with_code(code_u32)
        .with_message(&diagnostic.message)
        .with_label(Label::new(((), range)).with_message(diagnostic.context.to_string()))
        .finish()
        .write(Source::from(source), &mut write_buffer);
    if written.is_err() {
        return diagnostic.to_string();
    }
    String::from_utf8_lossy(&write_buffer).to_string()
}
