//! The immutable program snapshot the checker reads.

use jsinterop_core::{CheckError, MemberEntry, MemberId, TypeEntry, TypeId};

use crate::{Hierarchy, ProgramBuilder};

/// A validated program: types, members and their inheritance hierarchy.
///
/// Built by [`ProgramBuilder::build`]; every id reachable from an entry is
/// known to resolve and the hierarchy is acyclic.
#[derive(Debug, Clone)]
pub struct Program {
    pub(crate) types: Vec<TypeEntry>,
    pub(crate) members: Vec<MemberEntry>,
    pub(crate) hierarchy: Hierarchy,
}

impl Program {
    /// Start building a program.
    pub fn builder() -> ProgramBuilder {
        ProgramBuilder::new()
    }

    // === Lookup ===

    pub fn get_type(&self, id: TypeId) -> Option<&TypeEntry> {
        self.types.get(id.slot())
    }

    pub fn get_member(&self, id: MemberId) -> Option<&MemberEntry> {
        self.members.get(id.slot())
    }

    /// Look up a type, treating a dangling id as an invariant break.
    pub fn type_entry(&self, id: TypeId) -> Result<&TypeEntry, CheckError> {
        self.get_type(id).ok_or(CheckError::UnknownType(id))
    }

    /// Look up a member, treating a dangling id as an invariant break.
    pub fn member(&self, id: MemberId) -> Result<&MemberEntry, CheckError> {
        self.get_member(id).ok_or(CheckError::UnknownMember(id))
    }

    /// The declaring type of a member.
    pub fn owner_of(&self, id: MemberId) -> Result<TypeId, CheckError> {
        let member = self.member(id)?;
        member.owner.ok_or_else(|| CheckError::OrphanMember {
            member: id,
            name: member.name.clone(),
        })
    }

    /// The declaring type entry of a member.
    pub fn owner_entry(&self, id: MemberId) -> Result<&TypeEntry, CheckError> {
        self.type_entry(self.owner_of(id)?)
    }

    /// Find a type by qualified name.
    pub fn find_type(&self, qualified_name: &str) -> Option<TypeId> {
        self.types
            .iter()
            .position(|t| t.qualified_name == qualified_name)
            .map(|slot| TypeId::new(slot as u32))
    }

    // === Iteration ===

    /// All types in program order.
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeEntry)> {
        self.types
            .iter()
            .enumerate()
            .map(|(slot, entry)| (TypeId::new(slot as u32), entry))
    }

    /// All members in registration order.
    pub fn members(&self) -> impl Iterator<Item = (MemberId, &MemberEntry)> {
        self.members
            .iter()
            .enumerate()
            .map(|(slot, entry)| (MemberId::new(slot as u32), entry))
    }

    /// The declared members of a type, in declaration order.
    pub fn members_of(&self, ty: TypeId) -> impl Iterator<Item = (MemberId, &MemberEntry)> {
        self.get_type(ty)
            .map(|entry| entry.members.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.get_member(*id).map(|member| (*id, member)))
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// The inheritance hierarchy.
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }
}
