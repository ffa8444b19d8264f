//! Diagnostic sinks.
//!
//! The checker reports through a [`DiagnosticSink`] it is handed by its caller
//! and never reads anything back; whether a pass failed is decided afterwards
//! by asking the sink.

use std::cell::RefCell;

use verilite_compiler_tree::NodeId;

use crate::{Diagnostic, DiagnosticCode, DiagnosticCollection};

/// Receiver of diagnostics. Pushing is fire-and-forget.
pub trait DiagnosticSink {
    fn push(&self, diagnostic: Diagnostic);

    fn error(&self, code: DiagnosticCode, message: impl Into<String>, node: NodeId)
    where
        Self: Sized,
    {
        self.push(Diagnostic::error(code, message, node));
    }

    fn warn(&self, code: DiagnosticCode, message: impl Into<String>, node: NodeId)
    where
        Self: Sized,
    {
        self.push(Diagnostic::warning(code, message, node));
    }
}

/// A sink that keeps every diagnostic in report order
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(Diagnostic::is_error)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    /// A copy of everything reported so far
    pub fn collection(&self) -> DiagnosticCollection {
        DiagnosticCollection::from(self.diagnostics.borrow().clone())
    }

    pub fn into_collection(self) -> DiagnosticCollection {
        DiagnosticCollection::from(self.diagnostics.into_inner())
    }

    /// Drop everything collected so far, e.g. between independent passes
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl DiagnosticSink for CollectingSink {
    fn push(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn push(&self, diagnostic: Diagnostic) {
        (**self).push(diagnostic);
    }
}
