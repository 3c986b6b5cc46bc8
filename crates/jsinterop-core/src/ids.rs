//! Identifier types for entries of a checked program.
//!
//! Types and members are stored in flat tables owned by the program; these
//! ids are indices into those tables and are only meaningful for the program
//! that issued them.

use std::fmt;

/// Identifies a type (class, interface or enum) in a program.
///
/// # Example
///
/// ```
/// use jsinterop_core::TypeId;
///
/// let ty = TypeId::new(0);
/// assert_eq!(ty.index(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// Create a new type ID with the given index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the underlying index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// The index as a table slot.
    #[inline]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type_{}", self.0)
    }
}

impl From<u32> for TypeId {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

impl From<TypeId> for u32 {
    fn from(id: TypeId) -> Self {
        id.0
    }
}

/// Identifies a member (method, constructor or field) in a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(u32);

impl MemberId {
    /// Create a new member ID with the given index.
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the underlying index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// The index as a table slot.
    #[inline]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member_{}", self.0)
    }
}

impl From<u32> for MemberId {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

impl From<MemberId> for u32 {
    fn from(id: MemberId) -> Self {
        id.0
    }
}
