//! Type-level classification and JavaScript interop flags.

use bitflags::bitflags;

/// The Java declaration form of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
}

impl TypeKind {
    #[inline]
    pub fn is_interface(self) -> bool {
        self == TypeKind::Interface
    }
}

bitflags! {
    /// Type-level JavaScript interop annotations.
    ///
    /// ```
    /// use jsinterop_core::JsTypeFlags;
    ///
    /// let native = JsTypeFlags::JS_TYPE | JsTypeFlags::NATIVE;
    /// assert!(native.contains(JsTypeFlags::NATIVE));
    /// assert!(native.is_js_usable());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct JsTypeFlags: u8 {
        /// `@JsType`: public members are exported by default.
        const JS_TYPE = 1 << 0;
        /// `@JsType(isNative = true)`: models an existing JavaScript object.
        const NATIVE = 1 << 1;
        /// `@JsFunction`: a functional interface backed by a JavaScript function.
        const JS_FUNCTION = 1 << 2;
    }
}

impl JsTypeFlags {
    /// Values of the type can cross into JavaScript unchanged.
    #[inline]
    pub fn is_js_usable(self) -> bool {
        self.intersects(JsTypeFlags::JS_TYPE | JsTypeFlags::NATIVE | JsTypeFlags::JS_FUNCTION)
    }

    /// Public members are exported without a member-level tag.
    #[inline]
    pub fn exports_members(self) -> bool {
        self.intersects(JsTypeFlags::JS_TYPE | JsTypeFlags::NATIVE)
    }
}
