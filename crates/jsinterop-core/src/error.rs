//! Fatal error types.
//!
//! User-facing problems in annotated code are never errors in this sense;
//! they become [`Diagnostic`](crate::Diagnostic)s. The types here cover a
//! malformed program graph, which aborts the check.
//!
//! ```text
//! CheckError
//! ├── UnknownType / UnknownMember  - dangling id reached during the check
//! ├── OrphanMember                 - member never registered on a type
//! └── Model(ModelError)            - program graph failed validation
//! ```

use thiserror::Error;

use crate::{MemberId, TypeId};

/// Errors found while validating a program graph before it is frozen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A reference points at a type that was never added.
    #[error("{context} refers to unknown {id}")]
    UnknownType { id: TypeId, context: String },

    /// A reference points at a member that was never added.
    #[error("{context} refers to unknown {id}")]
    UnknownMember { id: MemberId, context: String },

    /// The superclass of a class is not itself a class.
    #[error("'{type_name}' extends '{super_name}', which is not a class")]
    SuperClassNotClass {
        type_name: String,
        super_name: String,
    },

    /// An interface or enum was given a superclass.
    #[error("'{type_name}' is not a class and cannot have a superclass")]
    UnexpectedSuperClass { type_name: String },

    /// An implemented interface is not an interface.
    #[error("'{type_name}' implements '{interface_name}', which is not an interface")]
    NotAnInterface {
        type_name: String,
        interface_name: String,
    },

    /// A member is not listed by the type it names as owner, or names none.
    #[error("member '{name}' ({member}) is not registered on its owning type")]
    OrphanMember { member: MemberId, name: String },

    /// A constructor delegates to something other than a constructor of its own type.
    #[error("constructor '{member}' of '{type_name}' delegates outside its own constructors")]
    InvalidDelegation { member: String, type_name: String },

    /// The ancestor relation has a cycle through this type.
    #[error("cyclic inheritance involving '{type_name}'")]
    CyclicHierarchy { type_name: String },
}

/// Unrecoverable invariant breaks that abort a check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("internal error: unknown {0}")]
    UnknownType(TypeId),

    #[error("internal error: unknown {0}")]
    UnknownMember(MemberId),

    /// A member has no owning type.
    #[error("internal error: member '{name}' ({member}) has no owning type")]
    OrphanMember { member: MemberId, name: String },

    #[error("malformed program: {0}")]
    Model(#[from] ModelError),
}
