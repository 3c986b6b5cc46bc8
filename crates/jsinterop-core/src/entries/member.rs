//! Member entries: methods, constructors and fields.

use crate::{DataType, ExportKind, MemberId, Span, TypeId, Visibility};

/// A method or field declared by a type.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberEntry {
    /// Simple name. Constructors carry the binary simple name of their
    /// class (`EntryPoint$Buggy`).
    pub name: String,
    /// Declaring type, assigned when the member is registered.
    pub owner: Option<TypeId>,
    pub kind: MemberKind,
    /// Member-level export tag.
    pub export: ExportKind,
    /// Explicit JavaScript name from the export tag.
    pub js_name: Option<String>,
    /// `@JsIgnore`
    pub is_ignored: bool,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub is_native: bool,
    /// `@SuppressWarnings` keys on the declaration.
    pub suppressions: Vec<String>,
    pub span: Span,
}

/// Method- or field-specific data.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    Method(MethodData),
    Field(FieldData),
}

/// Signature and body facts of a method or constructor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MethodData {
    pub params: Vec<Parameter>,
    pub return_type: DataType,
    pub is_constructor: bool,
    pub is_abstract: bool,
    pub body: MethodBody,
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: DataType,
    /// `@SuppressWarnings` keys on the parameter.
    pub suppressions: Vec<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: DataType) -> Self {
        Self {
            name: name.into(),
            ty,
            suppressions: Vec::new(),
        }
    }

    pub fn with_suppression(mut self, key: impl Into<String>) -> Self {
        self.suppressions.push(key.into());
        self
    }
}

/// The facts about a method body the checker needs.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodBody {
    /// No statements beyond an implicit or explicit `super(...)` call.
    pub is_empty: bool,
    /// Target of a `this(...)` call, for constructors.
    pub delegates_to: Option<MemberId>,
    /// `super.m(...)` / `Iface.super.m(...)` calls.
    pub super_calls: Vec<CallSite>,
    /// `x instanceof T` expressions.
    pub instance_of_checks: Vec<InstanceOfCheck>,
}

impl Default for MethodBody {
    fn default() -> Self {
        Self {
            is_empty: true,
            delegates_to: None,
            super_calls: Vec::new(),
            instance_of_checks: Vec::new(),
        }
    }
}

/// A call made through an explicit ancestor qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub target: MemberId,
    pub span: Span,
}

/// An `instanceof` test against a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceOfCheck {
    pub target: TypeId,
    pub span: Span,
}

/// The declared type and initializer of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldData {
    pub ty: DataType,
    pub initializer: FieldInitializer,
}

/// What a field declaration initializes itself with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldInitializer {
    #[default]
    None,
    /// A compile-time constant.
    Constant,
    /// Anything that must run code.
    NonConstant,
}

impl MemberEntry {
    fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            owner: None,
            kind,
            export: ExportKind::NotExported,
            js_name: None,
            is_ignored: false,
            visibility: Visibility::Public,
            is_static: false,
            is_final: false,
            is_native: false,
            suppressions: Vec::new(),
            span: Span::default(),
        }
    }

    /// Create a method entry.
    pub fn method(name: impl Into<String>, params: Vec<Parameter>, return_type: DataType) -> Self {
        Self::new(
            name,
            MemberKind::Method(MethodData {
                params,
                return_type,
                ..MethodData::default()
            }),
        )
    }

    /// Create a constructor entry.
    pub fn constructor(name: impl Into<String>, params: Vec<Parameter>) -> Self {
        Self::new(
            name,
            MemberKind::Method(MethodData {
                params,
                return_type: DataType::Void,
                is_constructor: true,
                ..MethodData::default()
            }),
        )
    }

    /// Create a field entry.
    pub fn field(name: impl Into<String>, ty: DataType) -> Self {
        Self::new(
            name,
            MemberKind::Field(FieldData {
                ty,
                initializer: FieldInitializer::None,
            }),
        )
    }

    // === Builder Methods ===

    pub fn with_export(mut self, export: ExportKind) -> Self {
        self.export = export;
        self
    }

    pub fn with_js_name(mut self, name: impl Into<String>) -> Self {
        self.js_name = Some(name.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_suppression(mut self, key: impl Into<String>) -> Self {
        self.suppressions.push(key.into());
        self
    }

    pub fn ignored(mut self) -> Self {
        self.is_ignored = true;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn as_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn as_native(mut self) -> Self {
        self.is_native = true;
        self
    }

    /// Mark a method abstract. No effect on fields.
    pub fn as_abstract(mut self) -> Self {
        if let MemberKind::Method(method) = &mut self.kind {
            method.is_abstract = true;
        }
        self
    }

    /// Replace a method's body facts. No effect on fields.
    pub fn with_body(mut self, body: MethodBody) -> Self {
        if let MemberKind::Method(method) = &mut self.kind {
            method.body = body;
        }
        self
    }

    /// Set a field's initializer. No effect on methods.
    pub fn with_initializer(mut self, initializer: FieldInitializer) -> Self {
        if let MemberKind::Field(field) = &mut self.kind {
            field.initializer = initializer;
        }
        self
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    // === Queries ===

    pub fn as_method(&self) -> Option<&MethodData> {
        match &self.kind {
            MemberKind::Method(method) => Some(method),
            MemberKind::Field(_) => None,
        }
    }

    pub fn as_method_mut(&mut self) -> Option<&mut MethodData> {
        match &mut self.kind {
            MemberKind::Method(method) => Some(method),
            MemberKind::Field(_) => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldData> {
        match &self.kind {
            MemberKind::Field(field) => Some(field),
            MemberKind::Method(_) => None,
        }
    }

    #[inline]
    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method(_))
    }

    #[inline]
    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field(_))
    }

    pub fn is_constructor(&self) -> bool {
        self.as_method().is_some_and(|m| m.is_constructor)
    }

    /// An instance method that takes part in overriding: not static, not a
    /// constructor, not private.
    pub fn is_overridable_method(&self) -> bool {
        !self.is_static
            && !self.visibility.is_private()
            && self.as_method().is_some_and(|m| !m.is_constructor)
    }

    /// Same name and overload-equivalent parameter types.
    pub fn same_signature(&self, other: &MemberEntry) -> bool {
        match (self.as_method(), other.as_method()) {
            (Some(a), Some(b)) => {
                self.name == other.name
                    && a.params.len() == b.params.len()
                    && a.params.iter().zip(&b.params).all(|(x, y)| x.ty == y.ty)
            }
            _ => false,
        }
    }

    /// Whether `@SuppressWarnings` on the member covers `key`.
    pub fn suppresses(&self, key: &str) -> bool {
        self.suppressions.iter().any(|s| s == key)
    }
}
