//! JsInterop restriction checker
//!
//! Validates the JavaScript surface of a resolved [`Program`] and reports
//! every violation as a [`Diagnostic`](jsinterop_core::Diagnostic).
//!
//! ## Architecture
//!
//! - **Index**: resolve each member's JavaScript identity and the exposed
//!   surface of every type ([`CollisionIndex`])
//! - **Rules**: collision, property and structural passes read the index
//!   independently
//! - **Advice**: the usability pass adds warnings, never errors
//!
//! Diagnostics from all passes are merged and sorted by file, line and rule.
//!
//! ## Modules
//!
//! - [`config`]: Checker options
//! - [`context`]: Shared inputs and reporting for the passes
//! - [`index`]: JavaScript names and exposed surfaces
//! - [`naming`]: Bean accessor naming
//! - [`passes`]: The rule passes
//! - [`signature`]: Java-style rendering of members for messages
//! - [`violation`]: Rule violations and their message text

pub mod config;
pub mod context;
pub mod index;
pub mod naming;
pub mod passes;
pub mod signature;
pub mod violation;

pub use config::{CheckerConfig, UNUSABLE_BY_JS};
pub use context::CheckContext;
pub use index::{Accessor, CollisionIndex, ExposedMember, ExposedSet, JsMember, JsMemberKind};
pub use passes::{
    CollisionPass, PropertyValidator, StructuralKind, StructuralRuleEngine, UsabilityAnalyzer,
};
pub use violation::{Placement, Violation};

use jsinterop_core::{CheckError, Diagnostic, Diagnostics};
use jsinterop_registry::Program;

/// Result of checking a program.
#[derive(Debug, Clone, Default)]
pub struct CheckOutput {
    /// Every reported violation, sorted.
    pub diagnostics: Diagnostics,
    warnings_as_errors: bool,
}

impl CheckOutput {
    /// No errors, and no warnings either when warnings are treated as errors.
    pub fn is_success(&self) -> bool {
        !self.diagnostics.has_errors() && !(self.warnings_as_errors && self.diagnostics.has_warnings())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.errors()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.warnings()
    }
}

/// Runs every pass over a program.
pub struct JsInteropChecker<'p> {
    program: &'p Program,
    config: CheckerConfig,
}

impl<'p> JsInteropChecker<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            config: CheckerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CheckerConfig) -> Self {
        self.config = config;
        self
    }

    /// Check the program.
    ///
    /// Only broken program invariants fail; rule violations are reported in
    /// the output.
    pub fn run(self) -> Result<CheckOutput, CheckError> {
        let index = CollisionIndex::build(self.program)?;
        let ctx = CheckContext::new(self.program, &self.config, &index);

        let mut diagnostics = CollisionPass::new(&ctx).run()?;
        diagnostics.extend(PropertyValidator::new(&ctx).run()?);
        diagnostics.extend(StructuralRuleEngine::new(&ctx).run()?);
        diagnostics.extend(UsabilityAnalyzer::new(&ctx).run()?);
        diagnostics.sort();

        tracing::debug!(
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            "jsinterop check finished"
        );
        Ok(CheckOutput {
            diagnostics,
            warnings_as_errors: self.config.warnings_as_errors,
        })
    }
}
