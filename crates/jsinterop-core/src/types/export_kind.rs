//! Per-member export tags.

use std::fmt;

/// Why, and how, the front end marked a member for JavaScript.
///
/// This is the tag as written on the member. Whether the member actually
/// ends up with a JavaScript name also depends on its type, visibility and
/// on what it overrides; that is resolved by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportKind {
    /// No member-level tag.
    #[default]
    NotExported,
    /// Exported through a type-level default export.
    ExportedType,
    /// `@JsMethod`
    ExportedMethod,
    /// `@JsProperty`
    ExportedProperty,
    /// `@JsOverlay`
    Overlay,
    /// `@JsConstructor`
    Constructor,
}

impl ExportKind {
    /// Whether the member carries an explicit export tag.
    pub fn is_explicit(self) -> bool {
        matches!(
            self,
            ExportKind::ExportedType
                | ExportKind::ExportedMethod
                | ExportKind::ExportedProperty
                | ExportKind::Constructor
        )
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportKind::NotExported => "not exported",
            ExportKind::ExportedType => "@JsType",
            ExportKind::ExportedMethod => "@JsMethod",
            ExportKind::ExportedProperty => "@JsProperty",
            ExportKind::Overlay => "@JsOverlay",
            ExportKind::Constructor => "@JsConstructor",
        };
        f.write_str(name)
    }
}
