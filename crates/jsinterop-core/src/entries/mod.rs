//! Program entry types.
//!
//! - [`TypeEntry`] - classes, interfaces and enums
//! - [`MemberEntry`] - methods, constructors and fields, with
//!   [`MethodData`] and [`FieldData`] for the kind-specific parts

mod member;
mod type_entry;

pub use member::{
    CallSite, FieldData, FieldInitializer, InstanceOfCheck, MemberEntry, MemberKind, MethodBody,
    MethodData, Parameter,
};
pub use type_entry::TypeEntry;
