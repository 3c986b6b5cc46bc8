//! Shared state for the rule passes.

use jsinterop_core::{CheckError, Diagnostic, Diagnostics, MemberId, TypeEntry, TypeId};
use jsinterop_registry::Program;

use crate::config::CheckerConfig;
use crate::index::{CollisionIndex, ExposedMember};
use crate::signature::render_member;
use crate::violation::{Placement, Violation};

/// Read-only inputs every pass works from.
pub struct CheckContext<'a> {
    pub program: &'a Program,
    pub config: &'a CheckerConfig,
    pub index: &'a CollisionIndex,
}

impl<'a> CheckContext<'a> {
    pub fn new(program: &'a Program, config: &'a CheckerConfig, index: &'a CollisionIndex) -> Self {
        Self {
            program,
            config,
            index,
        }
    }

    pub fn type_entry(&self, ty: TypeId) -> Result<&'a TypeEntry, CheckError> {
        self.program.type_entry(ty)
    }

    /// Qualified name of a type.
    pub fn type_name(&self, ty: TypeId) -> Result<String, CheckError> {
        Ok(self.type_entry(ty)?.qualified_name.clone())
    }

    /// Signature of a member.
    pub fn signature(&self, id: MemberId) -> Result<String, CheckError> {
        render_member(self.program, id)
    }

    /// Signature in quotes, followed by ` (exposed by 'T')` when the member
    /// is only exposed through `exposing`.
    pub fn quoted_signature(
        &self,
        id: MemberId,
        exposing: Option<TypeId>,
    ) -> Result<String, CheckError> {
        let signature = self.signature(id)?;
        Ok(match exposing {
            Some(ty) => format!("'{}' (exposed by '{}')", signature, self.type_name(ty)?),
            None => format!("'{signature}'"),
        })
    }

    /// Quoted signature of an exposed member, noting the exposing type of an
    /// accidental exposure.
    pub fn exposed_signature(&self, exposed: &ExposedMember) -> Result<String, CheckError> {
        self.quoted_signature(exposed.member, exposed.exposed_by)
    }

    /// Quoted signatures of two members colliding at `ty`. When neither is
    /// declared by `ty` and no ancestor of `ty` sees both, each is noted as
    /// exposed by `ty`.
    pub fn colliding_signatures(
        &self,
        ty: TypeId,
        first: &ExposedMember,
        second: &ExposedMember,
    ) -> Result<(String, String), CheckError> {
        let meets_here = self.meet_only_at(ty, first.member, second.member)?.then_some(ty);
        Ok((
            self.quoted_signature(first.member, first.exposed_by.or(meets_here))?,
            self.quoted_signature(second.member, second.exposed_by.or(meets_here))?,
        ))
    }

    fn meet_only_at(&self, ty: TypeId, a: MemberId, b: MemberId) -> Result<bool, CheckError> {
        let a_owner = self.program.owner_of(a)?;
        let b_owner = self.program.owner_of(b)?;
        if a_owner == ty || b_owner == ty {
            return Ok(false);
        }
        let hierarchy = self.program.hierarchy();
        Ok(!hierarchy.ancestry(ty).iter().any(|&ancestor| {
            ancestor != ty
                && hierarchy.is_ancestor_or_self(a_owner, ancestor)
                && hierarchy.is_ancestor_or_self(b_owner, ancestor)
        }))
    }

    /// Placement at a member's declaration.
    pub fn at_member(&self, id: MemberId) -> Result<Placement, CheckError> {
        let member = self.program.member(id)?;
        let owner = self.program.owner_entry(id)?;
        Ok(Placement::new(owner.file.clone(), member.span).about_member(id))
    }

    /// Placement at a type's declaration.
    pub fn at_type(&self, ty: TypeId) -> Result<Placement, CheckError> {
        let entry = self.type_entry(ty)?;
        Ok(Placement::new(entry.file.clone(), entry.span).about_type(ty))
    }

    /// Record a violation.
    pub fn report(&self, out: &mut Diagnostics, violation: Violation, placement: Placement) {
        tracing::trace!(line = placement.span.line, "{violation}");
        let mut diagnostic = Diagnostic::new(
            violation.code(),
            violation.to_string(),
            placement.file,
            placement.span,
        );
        diagnostic.subjects = placement.subjects;
        out.push(diagnostic);
    }
}
