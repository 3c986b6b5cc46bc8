//! Type entry.
//!
//! This module provides [`TypeEntry`] for classes, interfaces and enums of
//! the checked program.

use crate::{JsTypeFlags, MemberId, Span, TypeId, TypeKind};

/// A class, interface or enum as resolved by the front end.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeEntry {
    /// Simple name (`Buggy`).
    pub name: String,
    /// Source-qualified name, including enclosing types (`EntryPoint.Buggy`).
    pub qualified_name: String,
    /// Java package (`test`), empty for the default package.
    pub package: String,
    /// Class, interface or enum.
    pub kind: TypeKind,
    /// Type-level interop annotations.
    pub js: JsTypeFlags,
    /// Explicit `namespace` of the type-level annotation.
    pub js_namespace: Option<String>,
    /// Explicit `name` of the type-level annotation.
    pub js_name: Option<String>,

    // === Inheritance ===
    /// Direct superclass; `None` means `java.lang.Object`.
    pub super_class: Option<TypeId>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    pub interfaces: Vec<TypeId>,

    // === Members ===
    /// Declared members, in declaration order.
    pub members: Vec<MemberId>,

    // === Modifiers ===
    pub is_final: bool,
    pub is_abstract: bool,
    /// Declares a `static { }` block with effects.
    pub has_static_initializer: bool,
    /// Declares an instance `{ }` initializer block.
    pub has_instance_initializer: bool,
    /// `@SuppressWarnings` keys on the declaration.
    pub suppressions: Vec<String>,

    // === Location ===
    pub file: String,
    pub span: Span,
}

impl TypeEntry {
    /// Create a new type entry.
    pub fn new(
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        package: impl Into<String>,
        kind: TypeKind,
    ) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            package: package.into(),
            kind,
            js: JsTypeFlags::empty(),
            js_namespace: None,
            js_name: None,
            super_class: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            is_final: false,
            is_abstract: false,
            has_static_initializer: false,
            has_instance_initializer: false,
            suppressions: Vec::new(),
            file: String::new(),
            span: Span::default(),
        }
    }

    /// Create a class entry.
    pub fn class(
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Self::new(name, qualified_name, package, TypeKind::Class)
    }

    /// Create an interface entry.
    pub fn interface(
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Self::new(name, qualified_name, package, TypeKind::Interface)
    }

    /// Create an enum entry.
    pub fn enumeration(
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Self::new(name, qualified_name, package, TypeKind::Enum)
    }

    // === Builder Methods ===

    /// Set the superclass.
    pub fn with_super_class(mut self, super_class: TypeId) -> Self {
        self.super_class = Some(super_class);
        self
    }

    /// Add an implemented or extended interface.
    pub fn with_interface(mut self, interface: TypeId) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add interop flags.
    pub fn with_js(mut self, flags: JsTypeFlags) -> Self {
        self.js |= flags;
        self
    }

    /// Set the explicit JavaScript namespace.
    pub fn with_js_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.js_namespace = Some(namespace.into());
        self
    }

    /// Set the explicit JavaScript name.
    pub fn with_js_name(mut self, name: impl Into<String>) -> Self {
        self.js_name = Some(name.into());
        self
    }

    /// Add a `@SuppressWarnings` key.
    pub fn with_suppression(mut self, key: impl Into<String>) -> Self {
        self.suppressions.push(key.into());
        self
    }

    /// Mark as final.
    pub fn as_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Mark as abstract.
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Mark as declaring a static initializer block.
    pub fn with_static_initializer(mut self) -> Self {
        self.has_static_initializer = true;
        self
    }

    /// Mark as declaring an instance initializer block.
    pub fn with_instance_initializer(mut self) -> Self {
        self.has_instance_initializer = true;
        self
    }

    /// Set the source location.
    pub fn at(mut self, file: impl Into<String>, span: Span) -> Self {
        self.file = file.into();
        self.span = span;
        self
    }

    // === Queries ===

    #[inline]
    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    #[inline]
    pub fn is_js_type(&self) -> bool {
        self.js.contains(JsTypeFlags::JS_TYPE)
    }

    #[inline]
    pub fn is_native(&self) -> bool {
        self.js.contains(JsTypeFlags::NATIVE)
    }

    #[inline]
    pub fn is_js_function(&self) -> bool {
        self.js.contains(JsTypeFlags::JS_FUNCTION)
    }

    /// Whether `@SuppressWarnings` on the type covers `key`.
    pub fn suppresses(&self, key: &str) -> bool {
        self.suppressions.iter().any(|s| s == key)
    }

    /// The name under which the type itself is exported to JavaScript:
    /// the namespace (or package) joined with the JS name (or qualified name).
    pub fn global_name(&self) -> String {
        let namespace = self.js_namespace.as_deref().unwrap_or(&self.package);
        let name = self.js_name.as_deref().unwrap_or(&self.qualified_name);
        if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{namespace}.{name}")
        }
    }
}
