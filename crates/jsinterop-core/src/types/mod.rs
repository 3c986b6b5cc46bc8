//! Type system definitions for the interop model.
//!
//! - [`Visibility`]: access modifiers for members
//! - [`ExportKind`]: member-level export tags
//! - [`TypeKind`]: class, interface or enum
//! - [`JsTypeFlags`]: type-level export annotations

mod export_kind;
mod type_kind;
mod visibility;

pub use export_kind::ExportKind;
pub use type_kind::{JsTypeFlags, TypeKind};
pub use visibility::Visibility;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_display() {
        assert_eq!(Visibility::Public.to_string(), "public");
        assert_eq!(Visibility::Package.to_string(), "package-private");
        assert!(Visibility::Private.is_private());
        assert!(!Visibility::Protected.is_public());
    }

    #[test]
    fn explicit_export_tags() {
        assert!(ExportKind::ExportedMethod.is_explicit());
        assert!(ExportKind::Constructor.is_explicit());
        assert!(!ExportKind::NotExported.is_explicit());
        assert!(!ExportKind::Overlay.is_explicit());
        assert_eq!(ExportKind::ExportedProperty.to_string(), "@JsProperty");
    }

    #[test]
    fn js_type_flags() {
        assert!(JsTypeFlags::JS_FUNCTION.is_js_usable());
        assert!(!JsTypeFlags::JS_FUNCTION.exports_members());
        assert!(JsTypeFlags::NATIVE.exports_members());
        assert!(!JsTypeFlags::empty().is_js_usable());
    }

    #[test]
    fn type_kind_default_is_class() {
        assert_eq!(TypeKind::default(), TypeKind::Class);
        assert!(TypeKind::Interface.is_interface());
    }
}
