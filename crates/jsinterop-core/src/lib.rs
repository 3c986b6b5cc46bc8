//! Core data model for the JsInterop restriction checker.
//!
//! This crate holds the read-only view of a compiled program that the
//! checker consumes, and the diagnostics it produces:
//!
//! - [`TypeEntry`] / [`MemberEntry`]: types and their members, with export tags
//! - [`DataType`]: erased parameter, return and field types
//! - [`Diagnostic`] / [`Diagnostics`]: user-facing errors and warnings
//! - [`ModelError`] / [`CheckError`]: fatal invariant breaks

mod data_type;
mod diagnostics;
mod entries;
mod error;
mod ids;
mod span;
mod types;

pub use data_type::{DataType, PrimitiveKind};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticKind, Diagnostics, Subject};
pub use entries::{
    CallSite, FieldData, FieldInitializer, InstanceOfCheck, MemberEntry, MemberKind, MethodBody,
    MethodData, Parameter, TypeEntry,
};
pub use error::{CheckError, ModelError};
pub use ids::{MemberId, TypeId};
pub use span::Span;
pub use types::{ExportKind, JsTypeFlags, TypeKind, Visibility};
