//! Collision index - resolved JavaScript names and exposed surfaces.
//!
//! Built once per check, before any rule runs:
//!
//! 1. Walk types ancestors-first and resolve each member's own export
//!    ([`JsMember`]). Because ancestors come first, a method that merely
//!    overrides an exported method can inherit its kind.
//! 2. Compute the [`ExposedSet`] of every type from the ancestor closure.
//!
//! Everything here is derived from the immutable program and discarded
//! after the check.

mod exposure;

pub use exposure::{ExposedMember, ExposedSet};

use jsinterop_core::{CheckError, ExportKind, MemberEntry, MemberId, TypeEntry, TypeId};
use jsinterop_registry::Program;

use crate::naming::{AccessorPrefix, property_name, split_accessor};

/// What an exported member is to JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsMemberKind {
    Method,
    Field,
    Constructor,
    Property(Accessor),
}

impl JsMemberKind {
    #[inline]
    pub fn is_property(self) -> bool {
        matches!(self, JsMemberKind::Property(_))
    }
}

/// The accessor shape implied by a property method's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    Getter,
    Setter,
    /// No Java Bean prefix.
    Invalid,
}

impl Accessor {
    /// Classify a method name.
    pub fn of(method_name: &str) -> Self {
        match split_accessor(method_name) {
            Some((AccessorPrefix::Get | AccessorPrefix::Is, _)) => Accessor::Getter,
            Some((AccessorPrefix::Set, _)) => Accessor::Setter,
            None => Accessor::Invalid,
        }
    }
}

/// A member's resolved JavaScript identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsMember {
    pub kind: JsMemberKind,
    /// Resolved external name.
    pub name: String,
    /// The name came from an explicit override.
    pub explicit_name: bool,
}

impl JsMember {
    fn resolve(kind: JsMemberKind, member: &MemberEntry) -> Self {
        let name = match (&member.js_name, kind) {
            (Some(name), _) => name.clone(),
            (None, JsMemberKind::Property(_)) => property_name(&member.name),
            (None, _) => member.name.clone(),
        };
        Self {
            kind,
            name,
            explicit_name: member.js_name.is_some(),
        }
    }

    /// The identity `member` gets by overriding a member exported as `self`.
    pub(crate) fn inherited_by(&self, member: &MemberEntry) -> Option<JsMember> {
        let kind = match self.kind {
            JsMemberKind::Method => JsMemberKind::Method,
            JsMemberKind::Property(_) => JsMemberKind::Property(Accessor::of(&member.name)),
            JsMemberKind::Field | JsMemberKind::Constructor => return None,
        };
        Some(JsMember::resolve(kind, member))
    }
}

/// Resolved names and exposed surfaces for a whole program.
#[derive(Debug, Clone)]
pub struct CollisionIndex {
    js: Vec<Option<JsMember>>,
    exposed: Vec<ExposedSet>,
}

impl CollisionIndex {
    pub fn build(program: &Program) -> Result<Self, CheckError> {
        let mut js = vec![None; program.member_count()];
        for &ty in program.hierarchy().topological_order() {
            let owner = program.type_entry(ty)?;
            for (id, member) in program.members_of(ty) {
                let resolved = resolve_own(program, &js, ty, owner, member)?;
                if let Some(exported) = &resolved {
                    tracing::trace!(
                        member = %member.name,
                        export = %member.export,
                        visibility = %member.visibility,
                        js_name = %exported.name,
                        "resolved JavaScript name"
                    );
                }
                js[id.slot()] = resolved;
            }
        }

        let exposed = program
            .types()
            .map(|(ty, _)| ExposedSet::compute(program, &js, ty))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            types = program.type_count(),
            exported = js.iter().filter(|m| m.is_some()).count(),
            "built collision index"
        );
        Ok(Self { js, exposed })
    }

    /// The member's own export, as declared or inherited from what it overrides.
    pub fn js_member(&self, id: MemberId) -> Option<&JsMember> {
        self.js.get(id.slot()).and_then(Option::as_ref)
    }

    pub fn is_exported(&self, id: MemberId) -> bool {
        self.js_member(id).is_some()
    }

    /// The exposed surface of a type.
    pub fn exposed(&self, ty: TypeId) -> Result<&ExposedSet, CheckError> {
        self.exposed.get(ty.slot()).ok_or(CheckError::UnknownType(ty))
    }
}

/// Whether `member` refers to existing JavaScript rather than exporting
/// new code: declared `native`, or owned by a native type.
pub fn is_native_member(program: &Program, id: MemberId) -> Result<bool, CheckError> {
    let member = program.member(id)?;
    Ok(member.is_native || program.owner_entry(id)?.is_native())
}

/// Resolve the export of a member from its own tags, its type's default,
/// or the exported method it overrides.
fn resolve_own(
    program: &Program,
    resolved: &[Option<JsMember>],
    ty: TypeId,
    owner: &TypeEntry,
    member: &MemberEntry,
) -> Result<Option<JsMember>, CheckError> {
    if member.export == ExportKind::Overlay {
        return Ok(None);
    }
    if member.export.is_explicit() || (!member.is_ignored && exported_by_type(owner, member)) {
        return Ok(Some(JsMember::resolve(natural_kind(member), member)));
    }
    if member.is_ignored || !member.is_overridable_method() {
        return Ok(None);
    }

    for &ancestor in program.hierarchy().ancestry(ty).iter().skip(1) {
        for (id, candidate) in program.members_of(ancestor) {
            if !candidate.is_overridable_method() || !candidate.same_signature(member) {
                continue;
            }
            if let Some(js) = resolved.get(id.slot()).and_then(Option::as_ref) {
                return Ok(js.inherited_by(member));
            }
        }
    }
    Ok(None)
}

fn exported_by_type(owner: &TypeEntry, member: &MemberEntry) -> bool {
    if owner.js.exports_members() && member.visibility.is_public() {
        return true;
    }
    owner.is_js_function()
        && !member.is_static
        && member.as_method().is_some_and(|m| m.is_abstract)
}

fn natural_kind(member: &MemberEntry) -> JsMemberKind {
    if member.is_field() {
        JsMemberKind::Field
    } else if member.is_constructor() {
        JsMemberKind::Constructor
    } else if member.export == ExportKind::ExportedProperty {
        JsMemberKind::Property(Accessor::of(&member.name))
    } else {
        JsMemberKind::Method
    }
}
