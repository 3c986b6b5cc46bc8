//! Diagnostics produced by the interop checker.
//!
//! A [`Diagnostic`] is a single user-facing error or warning. The checker's
//! passes each fill their own [`Diagnostics`] accumulator; the driver merges
//! them and sorts once at the end so the output is reproducible.

use std::fmt;

use crate::{MemberId, Span, TypeId};

/// A single error or warning about annotated code.
///
/// # Examples
///
/// ```
/// use jsinterop_core::{Diagnostic, DiagnosticCode, Span};
///
/// let diagnostic = Diagnostic::new(
///     DiagnosticCode::StructuralContract,
///     "Enum 'EntryPoint.Buggy' cannot be a native JsType.",
///     "test/EntryPoint.java",
///     Span::line(5),
/// );
///
/// assert_eq!(
///     diagnostic.to_string(),
///     "test/EntryPoint.java:5:1: error: Enum 'EntryPoint.Buggy' cannot be a native JsType."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity, derived from the code.
    pub kind: DiagnosticKind,
    /// Which rule produced it.
    pub code: DiagnosticCode,
    /// Exact message text.
    pub message: String,
    /// Source file of the reported location.
    pub file: String,
    /// Reported location.
    pub span: Span,
    /// The members and types the diagnostic is about.
    pub subjects: Vec<Subject>,
}

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Blocks code generation.
    Error,
    /// Advisory only.
    Warning,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Error => write!(f, "error"),
            DiagnosticKind::Warning => write!(f, "warning"),
        }
    }
}

/// The rule family a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// Two exposed members, or two global exports, share a JavaScript name.
    NamingCollision,
    /// An override picks a different explicit JavaScript name.
    InconsistentOverrideRename,
    /// A JsConstructor that other constructors do not delegate to.
    ConstructorDelegation,
    /// A property accessor with the wrong shape or name.
    PropertyShape,
    /// A getter and setter that disagree on the property type.
    PropertyConsistency,
    /// A property accessor called through `super`.
    PropertyAccess,
    /// A per-export-kind structural contract is broken.
    StructuralContract,
    /// A type crossing into JavaScript that JavaScript cannot use.
    UnusableByJs,
}

impl DiagnosticCode {
    /// Severity of diagnostics with this code.
    pub fn kind(self) -> DiagnosticKind {
        match self {
            DiagnosticCode::UnusableByJs => DiagnosticKind::Warning,
            _ => DiagnosticKind::Error,
        }
    }

    /// Tie-break order between diagnostics on the same line.
    pub fn rule_order(self) -> u8 {
        match self {
            DiagnosticCode::NamingCollision | DiagnosticCode::ConstructorDelegation => 0,
            DiagnosticCode::InconsistentOverrideRename => 1,
            DiagnosticCode::PropertyShape
            | DiagnosticCode::PropertyConsistency
            | DiagnosticCode::PropertyAccess => 2,
            DiagnosticCode::StructuralContract => 3,
            DiagnosticCode::UnusableByJs => 4,
        }
    }
}

/// Something a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Type(TypeId),
    Member(MemberId),
}

impl Diagnostic {
    /// Create a diagnostic; the kind follows from the code.
    pub fn new(
        code: DiagnosticCode,
        message: impl Into<String>,
        file: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind: code.kind(),
            code,
            message: message.into(),
            file: file.into(),
            span,
            subjects: Vec::new(),
        }
    }

    /// Attach a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    /// `Line N: message`, the form used in grouped reports.
    pub fn line_message(&self) -> String {
        format!("Line {}: {}", self.span.line, self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}: {}", self.file, self.span, self.kind, self.message)
    }
}

/// An append-only collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl Diagnostics {
    /// Creates a new, empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Moves every diagnostic of `other` into this collection.
    pub fn extend(&mut self, other: Diagnostics) {
        self.has_errors |= other.has_errors;
        self.diagnostics.extend(other.diagnostics);
    }

    /// Returns `true` if the collection contains any error.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Returns `true` if the collection contains any warning.
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::Warning)
    }

    pub fn count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Stable sort by file, then line, then rule order.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then(a.span.line.cmp(&b.span.line))
                .then(a.code.rule_order().cmp(&b.code.rule_order()))
        });
    }

    /// Writes one `file:line:col: kind: message` line per diagnostic.
    pub fn emit<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for diagnostic in &self.diagnostics {
            writeln!(writer, "{}", diagnostic)?;
        }
        Ok(())
    }

    /// Writes diagnostics grouped by file, errors before warnings:
    ///
    /// ```text
    /// Errors in test/EntryPoint.java
    ///   Line 7: ...
    /// Warnings in test/EntryPoint.java
    ///   Line 9: ...
    /// ```
    pub fn emit_grouped<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut files: Vec<&str> = self.diagnostics.iter().map(|d| d.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();

        for file in files {
            for (kind, header) in [
                (DiagnosticKind::Error, "Errors"),
                (DiagnosticKind::Warning, "Warnings"),
            ] {
                let mut group = self
                    .diagnostics
                    .iter()
                    .filter(|d| d.file == file && d.kind == kind)
                    .peekable();
                if group.peek().is_none() {
                    continue;
                }
                writeln!(writer, "{header} in {file}")?;
                for diagnostic in group {
                    writeln!(writer, "  {}", diagnostic.line_message())?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}
