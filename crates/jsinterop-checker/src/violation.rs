//! User-facing rule violations.
//!
//! The `Display` text of each variant is the exact diagnostic message.
//! Existing tooling matches on these strings, so they must not drift.

use jsinterop_core::{DiagnosticCode, MemberId, Span, Subject, TypeId};
use thiserror::Error;

/// A violated interop rule, before it is placed at a source location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    // === Collisions ===
    /// `first` and `second` are quoted signatures, see
    /// [`CheckContext::quoted_signature`](crate::CheckContext::quoted_signature).
    #[error("{first} and {second} cannot both use the same JavaScript name '{name}'.")]
    NameCollision {
        first: String,
        second: String,
        name: String,
    },

    #[error("'{member}' cannot be exported because the global name '{name}' is already taken.")]
    GlobalNameTaken { member: String, name: String },

    #[error("More than one JsConstructor exists for {type_name}.")]
    MultipleJsConstructors { type_name: String },

    #[error(
        "Constructor '{primary}' can be a JsConstructor only if all constructors in the class \
         are delegating to it."
    )]
    NonDelegatingConstructor { primary: String },

    // === Renames ===
    #[error("{member} cannot be assigned a different JavaScript name than the method it overrides.")]
    InconsistentRename { member: String },

    // === Properties ===
    #[error("There cannot be void return type or any parameters for the JsProperty getter '{member}'.")]
    GetterShape { member: String },

    #[error("There cannot be non-boolean return for the JsProperty 'is' getter '{member}'.")]
    IsGetterNotBoolean { member: String },

    #[error("There needs to be single parameter and void return type for the JsProperty setter '{member}'.")]
    SetterShape { member: String },

    #[error("JsProperty '{member}' doesn't follow Java Bean naming conventions.")]
    PropertyNaming { member: String },

    #[error(
        "The setter and getter for JsProperty '{property}' in type '{type_name}' must have \
         consistent types."
    )]
    InconsistentPropertyTypes { property: String, type_name: String },

    #[error("Cannot call property accessor '{member}' via super.")]
    SuperAccessorCall { member: String },

    // === JsFunction ===
    #[error("JsFunction '{type_name}' has to be a functional interface.")]
    JsFunctionNotFunctional { type_name: String },

    #[error("JsFunction '{type_name}' cannot extend other interfaces.")]
    JsFunctionExtends { type_name: String },

    #[error("JsFunction '{type_name}' cannot have static initializer.")]
    JsFunctionStaticInitializer { type_name: String },

    #[error("'{type_name}' cannot be both a JsFunction and a JsType at the same time.")]
    JsFunctionAndJsType { type_name: String },

    #[error("'{type_name}' cannot extend JsFunction '{function}'.")]
    ExtendsJsFunction { type_name: String, function: String },

    #[error("JsFunction implementation '{type_name}' cannot implement more than one interface.")]
    JsFunctionImplMultipleInterfaces { type_name: String },

    #[error("JsFunction implementation '{type_name}' cannot extend a class.")]
    JsFunctionImplExtendsClass { type_name: String },

    #[error("'{type_name}' cannot be both a JsFunction implementation and a JsType at the same time.")]
    JsFunctionImplAndJsType { type_name: String },

    #[error("'{type_name}' cannot extend JsFunction implementation '{implementation}'.")]
    ExtendsJsFunctionImpl {
        type_name: String,
        implementation: String,
    },

    // === Native types ===
    #[error("Native JsType member '{member}' is not public or has @JsIgnore.")]
    NativeMemberNotPublic { member: String },

    #[error("Enum '{type_name}' cannot be a native JsType.")]
    NativeEnum { type_name: String },

    #[error("Native JsType '{type_name}' cannot have static initializer.")]
    NativeStaticInitializer { type_name: String },

    #[error("Native JsType constructor '{member}' cannot have non-empty method body.")]
    NativeConstructorBody { member: String },

    #[error("Cannot do instanceof against native JsType interface '{type_name}'.")]
    InstanceOfNativeInterface { type_name: String },

    // === Overlays ===
    #[error("Method '{member}' in non-native type cannot be @JsOverlay.")]
    OverlayInNonNativeType { member: String },

    #[error("JsOverlay method '{member}' cannot override a supertype method.")]
    OverlayOverrides { member: String },

    #[error("JsOverlay method '{member}' cannot be non-final, static, nor native.")]
    OverlayModifiers { member: String },

    // === Usability ===
    #[error("[unusable-by-js] Return type of {member} is not usable by but exposed to JavaScript.")]
    UnusableReturn { member: String },

    #[error(
        "[unusable-by-js] Type of parameter '{param}' in method {member} is not usable by but \
         exposed to JavaScript."
    )]
    UnusableParameter { param: String, member: String },

    #[error(
        "[unusable-by-js] Type of field '{field}' in type '{type_name}' is not usable by but \
         exposed to JavaScript."
    )]
    UnusableField { field: String, type_name: String },
}

impl Violation {
    /// The rule family of this violation.
    pub fn code(&self) -> DiagnosticCode {
        use Violation::*;
        match self {
            NameCollision { .. } | GlobalNameTaken { .. } | MultipleJsConstructors { .. } => {
                DiagnosticCode::NamingCollision
            }
            NonDelegatingConstructor { .. } => DiagnosticCode::ConstructorDelegation,
            InconsistentRename { .. } => DiagnosticCode::InconsistentOverrideRename,
            GetterShape { .. }
            | IsGetterNotBoolean { .. }
            | SetterShape { .. }
            | PropertyNaming { .. } => DiagnosticCode::PropertyShape,
            InconsistentPropertyTypes { .. } => DiagnosticCode::PropertyConsistency,
            SuperAccessorCall { .. } => DiagnosticCode::PropertyAccess,
            UnusableReturn { .. } | UnusableParameter { .. } | UnusableField { .. } => {
                DiagnosticCode::UnusableByJs
            }
            _ => DiagnosticCode::StructuralContract,
        }
    }
}

/// Where a violation is reported and what it is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub file: String,
    pub span: Span,
    pub subjects: Vec<Subject>,
}

impl Placement {
    pub fn new(file: impl Into<String>, span: Span) -> Self {
        Self {
            file: file.into(),
            span,
            subjects: Vec::new(),
        }
    }

    pub fn about_member(mut self, member: MemberId) -> Self {
        self.subjects.push(Subject::Member(member));
        self
    }

    pub fn about_type(mut self, ty: TypeId) -> Self {
        self.subjects.push(Subject::Type(ty));
        self
    }
}
