//! Checker configuration.

/// The `@SuppressWarnings` key that silences usability warnings.
pub const UNUSABLE_BY_JS: &str = "unusable-by-js";

/// Options for a [`JsInteropChecker`](crate::JsInteropChecker) run.
///
/// # Example
///
/// ```
/// use jsinterop_checker::CheckerConfig;
///
/// let config = CheckerConfig::new()
///     .with_unusable_by_js(false)
///     .with_warnings_as_errors(true);
/// assert!(!config.report_unusable_by_js);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Run the advisory usability analysis.
    pub report_unusable_by_js: bool,
    /// Suppression key honoured by the usability analysis.
    pub unusable_suppression_key: String,
    /// Treat any warning as a failed outcome.
    pub warnings_as_errors: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            report_unusable_by_js: true,
            unusable_suppression_key: UNUSABLE_BY_JS.to_string(),
            warnings_as_errors: false,
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the usability analysis.
    pub fn with_unusable_by_js(mut self, enabled: bool) -> Self {
        self.report_unusable_by_js = enabled;
        self
    }

    /// Use a different suppression key.
    pub fn with_suppression_key(mut self, key: impl Into<String>) -> Self {
        self.unusable_suppression_key = key.into();
        self
    }

    /// Fail the outcome on warnings too.
    pub fn with_warnings_as_errors(mut self, enabled: bool) -> Self {
        self.warnings_as_errors = enabled;
        self
    }
}
