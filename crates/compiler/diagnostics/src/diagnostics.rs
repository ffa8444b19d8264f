//! # Diagnostic System for Semantic Checking
//!
//! This module provides the diagnostic model used by the semantic checker:
//! severities, codes grouped into the checker's error taxonomy, and the
//! report text attributed to a module declaration, a module instantiation or
//! a plain module item.

use ariadne::ReportKind;
use chumsky::span::SimpleSpan;
use std::fmt;
use verilite_compiler_tree::{NodeId, TOP_SOURCE};

/// A diagnostic message from semantic checking
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: DiagnosticCode,
    pub message: String,
    /// Which kind of construct was being checked when this was raised
    pub context: DiagnosticContext,
    /// The node the problem was found on
    pub node: NodeId,
    /// The node the report is attributed to, when it differs from `node`
    pub attributed: Option<NodeId>,
    /// Rendered text of the reported node
    pub subject: String,
    /// Source location of the reported node, if the tree knows it
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub source: String,
    /// 1-based line number
    pub line: usize,
    pub span: SimpleSpan<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl From<DiagnosticSeverity> for ReportKind<'static> {
    fn from(severity: DiagnosticSeverity) -> Self {
        match severity {
            DiagnosticSeverity::Error => ReportKind::Error,
            DiagnosticSeverity::Warning => ReportKind::Warning,
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// The construct a diagnostic is reported against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticContext {
    /// A module template, checked before any instance exists
    ModuleDeclaration,
    /// The expansion of an instantiation
    ModuleInstantiation,
    ModuleItem,
}

impl fmt::Display for DiagnosticContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModuleDeclaration => write!(f, "In module declaration"),
            Self::ModuleInstantiation => write!(f, "In module instantiation"),
            Self::ModuleItem => write!(f, "In module item"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticCategory {
    Structural,
    UnsupportedFeature,
    UnresolvedReference,
    Constantness,
    RangeArity,
    StorageClass,
    SelfReference,
    Advisory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // Structural (1000-1999)
    DuplicateDefinition,
    NestedScopeConflict,
    MissingPort,
    LoopVariableMismatch,

    // Unsupported features (2000-2999)
    UnsupportedFeature,
    LittleEndianRange,

    // Unresolved references (3000-3999)
    UnresolvedIdentifier,
    UndeclaredModule,
    UnknownNamedArgument,
    GenvarOutsideLoop,

    // Constantness (4000-4999)
    NonConstantExpression,

    // Range and arity (5000-5999)
    SubscriptArity,
    SubscriptOutOfBounds,
    InvalidSelect,
    OverrideArity,
    DuplicateNamedArgument,

    // Storage class (6000-6999)
    StorageClassMismatch,
    OutputExpressionConnection,

    // Self reference (7000-7999)
    SelfReference,

    // Advisories (8000-8999)
    UnboundedLoop,
}

impl DiagnosticCode {
    pub const fn category(self) -> DiagnosticCategory {
        match self {
            Self::DuplicateDefinition
            | Self::NestedScopeConflict
            | Self::MissingPort
            | Self::LoopVariableMismatch => DiagnosticCategory::Structural,
            Self::UnsupportedFeature | Self::LittleEndianRange => {
                DiagnosticCategory::UnsupportedFeature
            }
            Self::UnresolvedIdentifier
            | Self::UndeclaredModule
            | Self::UnknownNamedArgument
            | Self::GenvarOutsideLoop => DiagnosticCategory::UnresolvedReference,
            Self::NonConstantExpression => DiagnosticCategory::Constantness,
            Self::SubscriptArity
            | Self::SubscriptOutOfBounds
            | Self::InvalidSelect
            | Self::OverrideArity
            | Self::DuplicateNamedArgument => DiagnosticCategory::RangeArity,
            Self::StorageClassMismatch | Self::OutputExpressionConnection => {
                DiagnosticCategory::StorageClass
            }
            Self::SelfReference => DiagnosticCategory::SelfReference,
            Self::UnboundedLoop => DiagnosticCategory::Advisory,
        }
    }
}

impl From<DiagnosticCode> for u32 {
    fn from(code: DiagnosticCode) -> Self {
        match code {
            DiagnosticCode::DuplicateDefinition => 1001,
            DiagnosticCode::NestedScopeConflict => 1002,
            DiagnosticCode::MissingPort => 1003,
            DiagnosticCode::LoopVariableMismatch => 1004,
            DiagnosticCode::UnsupportedFeature => 2001,
            DiagnosticCode::LittleEndianRange => 2002,
            DiagnosticCode::UnresolvedIdentifier => 3001,
            DiagnosticCode::UndeclaredModule => 3002,
            DiagnosticCode::UnknownNamedArgument => 3003,
            DiagnosticCode::GenvarOutsideLoop => 3004,
            DiagnosticCode::NonConstantExpression => 4001,
            DiagnosticCode::SubscriptArity => 5001,
            DiagnosticCode::SubscriptOutOfBounds => 5002,
            DiagnosticCode::InvalidSelect => 5003,
            DiagnosticCode::OverrideArity => 5004,
            DiagnosticCode::DuplicateNamedArgument => 5005,
            DiagnosticCode::StorageClassMismatch => 6001,
            DiagnosticCode::OutputExpressionConnection => 6002,
            DiagnosticCode::SelfReference => 7001,
            DiagnosticCode::UnboundedLoop => 8001,
        }
    }
}

impl Diagnostic {
    /// Create an error diagnostic against `node`, reported as a module item
    pub fn error(code: DiagnosticCode, message: impl Into<String>, node: NodeId) -> Self {
        Self::new(DiagnosticSeverity::Error, code, message.into(), node)
    }

    /// Create a warning diagnostic against `node`, reported as a module item
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, node: NodeId) -> Self {
        Self::new(DiagnosticSeverity::Warning, code, message.into(), node)
    }

    const fn new(
        severity: DiagnosticSeverity,
        code: DiagnosticCode,
        message: String,
        node: NodeId,
    ) -> Self {
        Self {
            severity,
            code,
            message,
            context: DiagnosticContext::ModuleItem,
            node,
            attributed: None,
            subject: String::new(),
            location: None,
        }
    }

    pub const fn with_context(mut self, context: DiagnosticContext) -> Self {
        self.context = context;
        self
    }

    /// Attribute this diagnostic to another node for location reporting
    pub const fn attributed_to(mut self, node: NodeId) -> Self {
        self.attributed = Some(node);
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }

    /// The node whose location and text the report shows
    pub fn reported_node(&self) -> NodeId {
        self.attributed.unwrap_or(self.node)
    }

    pub const fn is_error(&self) -> bool {
        matches!(self.severity, DiagnosticSeverity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.context)?;
        match &self.location {
            None => write!(f, "in <unable to access location --- contact developers>: ")?,
            Some(location) if location.source == TOP_SOURCE => {
                write!(f, "in final line of user input: ")?
            }
            Some(location) => write!(f, "in {} on line {}: ", location.source, location.line)?,
        }
        write!(f, "{}\n{}", self.subject, self.message)?;
        if self.attributed.is_some_and(|node| node != self.node) {
            write!(f, ", see previous warnings for more information")?;
        }
        Ok(())
    }
}

/// Collection of diagnostics from semantic checking
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic to the collection
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add multiple diagnostics
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// All diagnostics, in the order they were reported
    pub fn all(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get only error diagnostics
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .collect()
    }

    /// Get only warning diagnostics
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .collect()
    }

    /// Diagnostics carrying the given code
    pub fn with_code(&self, code: DiagnosticCode) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.code == code).collect()
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error)
    }

    /// Get the total number of diagnostics
    pub const fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if the collection is empty
    pub const fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort diagnostics by severity (errors first) and then by message
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by(|a, b| a.severity.cmp(&b.severity).then(a.message.cmp(&b.message)));
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let errors = self.errors().len();
        let warnings = self.warnings().len();

        if self.diagnostics.is_empty() {
            "No issues found".to_string()
        } else {
            format!("{errors} errors, {warnings} warnings")
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }
}

impl From<Vec<Diagnostic>> for DiagnosticCollection {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

impl IntoIterator for DiagnosticCollection {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}
