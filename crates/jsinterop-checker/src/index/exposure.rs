//! Exposed surfaces.
//!
//! The exposed set of a type holds one entry per method slot (all methods
//! with the same name and parameter types, merged) and one entry per
//! inherited or declared instance field. Static members and constructors
//! are exported under global names and do not take part.

use std::collections::BTreeMap;

use jsinterop_core::{CheckError, DataType, MemberId, TypeId};
use jsinterop_registry::Program;
use rustc_hash::FxHashMap;

use super::JsMember;

/// One visible member of a type's surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposedMember {
    /// The closest declaration; class members win over interface members.
    pub member: MemberId,
    /// The JavaScript identity of the slot at this type.
    pub js: Option<JsMember>,
    /// Set when the slot only became what it is by merging unrelated
    /// declarations at this type.
    pub exposed_by: Option<TypeId>,
    /// The other declarations merged into the slot.
    pub overridden: Vec<MemberId>,
}

/// The members of a type visible for JavaScript naming.
#[derive(Debug, Clone, Default)]
pub struct ExposedSet {
    members: Vec<ExposedMember>,
}

type SignatureKey<'p> = (&'p str, Vec<&'p DataType>);

impl ExposedSet {
    pub(super) fn compute(
        program: &Program,
        resolved: &[Option<JsMember>],
        ty: TypeId,
    ) -> Result<Self, CheckError> {
        let hierarchy = program.hierarchy();
        let mut slots: Vec<Vec<(MemberId, TypeId)>> = Vec::new();
        let mut slot_of: FxHashMap<SignatureKey<'_>, usize> = FxHashMap::default();
        let mut fields = Vec::new();

        for &ancestor in hierarchy.ancestry(ty) {
            for (id, member) in program.members_of(ancestor) {
                if member.is_static
                    || member.is_constructor()
                    || (ancestor != ty && member.visibility.is_private())
                {
                    continue;
                }
                let Some(method) = member.as_method() else {
                    fields.push(ExposedMember {
                        member: id,
                        js: resolved.get(id.slot()).cloned().flatten(),
                        exposed_by: None,
                        overridden: Vec::new(),
                    });
                    continue;
                };
                let key = (
                    member.name.as_str(),
                    method.params.iter().map(|p| &p.ty).collect(),
                );
                let slot = *slot_of.entry(key).or_insert_with(|| {
                    slots.push(Vec::new());
                    slots.len() - 1
                });
                slots[slot].push((id, ancestor));
            }
        }

        let mut members = Vec::with_capacity(slots.len() + fields.len());
        for slot in slots {
            // Declarations not overridden by a closer one in the same slot.
            let visible: Vec<(MemberId, TypeId)> = slot
                .iter()
                .copied()
                .filter(|(_, owner)| {
                    !slot
                        .iter()
                        .any(|(_, other)| hierarchy.is_ancestor(*owner, *other))
                })
                .collect();
            let mut representative = None;
            for (id, owner) in &visible {
                if !program.type_entry(*owner)?.is_interface() {
                    representative = Some((*id, *owner));
                    break;
                }
            }
            let Some((member, owner)) = representative.or_else(|| visible.first().copied()) else {
                continue;
            };

            let overridden: Vec<(MemberId, TypeId)> =
                slot.into_iter().filter(|(id, _)| *id != member).collect();
            // Exposed by `ty` when an exported declaration from an unrelated
            // branch is only implemented through this inheritance.
            let accidental = owner != ty
                && overridden.iter().any(|(id, other)| {
                    !hierarchy.is_ancestor_or_self(*other, owner)
                        && resolved.get(id.slot()).is_some_and(Option::is_some)
                });

            let own = resolved.get(member.slot()).cloned().flatten();
            let js = match own {
                Some(js) => Some(js),
                None => {
                    let entry = program.member(member)?;
                    overridden
                        .iter()
                        .find_map(|(id, _)| resolved.get(id.slot()).and_then(Option::as_ref))
                        .and_then(|inherited| inherited.inherited_by(entry))
                }
            };

            members.push(ExposedMember {
                member,
                js,
                exposed_by: accidental.then_some(ty),
                overridden: overridden.into_iter().map(|(id, _)| id).collect(),
            });
        }
        members.extend(fields);

        Ok(Self { members })
    }

    /// Every visible slot and field, methods first.
    pub fn members(&self) -> &[ExposedMember] {
        &self.members
    }

    /// Members with a JavaScript identity.
    pub fn exported(&self) -> impl Iterator<Item = (&ExposedMember, &JsMember)> {
        self.members
            .iter()
            .filter_map(|m| m.js.as_ref().map(|js| (m, js)))
    }

    /// Exported members grouped by resolved name, in name order.
    pub fn by_js_name(&self) -> BTreeMap<&str, Vec<(&ExposedMember, &JsMember)>> {
        let mut groups: BTreeMap<&str, Vec<_>> = BTreeMap::new();
        for (member, js) in self.exported() {
            groups.entry(js.name.as_str()).or_default().push((member, js));
        }
        groups
    }

    /// The slot a declaration belongs to, whether as representative or merged.
    pub fn slot_of(&self, id: MemberId) -> Option<&ExposedMember> {
        self.members
            .iter()
            .find(|m| m.member == id || m.overridden.contains(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{CollisionIndex, JsMemberKind};
    use jsinterop_core::{
        DataType, ExportKind, JsTypeFlags, MemberEntry, Parameter, TypeEntry, TypeId, Visibility,
    };
    use jsinterop_registry::{Program, ProgramBuilder};

    fn do_it(param: TypeId) -> MemberEntry {
        MemberEntry::method(
            "doIt",
            vec![Parameter::new("x", DataType::Declared(param))],
            DataType::Void,
        )
    }

    /// `Foo`, `Bar` exported interfaces each declaring `doIt(self)`,
    /// `ParentBuggy` declaring both concretely, `Buggy extends ParentBuggy
    /// implements Foo, Bar`.
    fn accidental() -> (Program, TypeId, TypeId) {
        let mut builder = ProgramBuilder::new();
        let foo = builder.add_type(
            TypeEntry::interface("Foo", "EntryPoint.Foo", "test").with_js(JsTypeFlags::JS_TYPE),
        );
        let bar = builder.add_type(
            TypeEntry::interface("Bar", "EntryPoint.Bar", "test").with_js(JsTypeFlags::JS_TYPE),
        );
        let parent = builder.add_type(TypeEntry::class("ParentBuggy", "EntryPoint.ParentBuggy", "test"));
        let buggy = builder.add_type(
            TypeEntry::class("Buggy", "EntryPoint.Buggy", "test")
                .with_super_class(parent)
                .with_interface(foo)
                .with_interface(bar),
        );
        builder.add_member(foo, do_it(foo).as_abstract()).unwrap();
        builder.add_member(bar, do_it(bar).as_abstract()).unwrap();
        builder.add_member(parent, do_it(foo)).unwrap();
        builder.add_member(parent, do_it(bar)).unwrap();
        (builder.build().unwrap(), parent, buggy)
    }

    #[test]
    fn class_declaration_represents_merged_slot() {
        let (program, parent, buggy) = accidental();
        let index = CollisionIndex::build(&program).unwrap();
        let set = index.exposed(buggy).unwrap();

        assert_eq!(set.members().len(), 2);
        for exposed in set.members() {
            assert_eq!(program.owner_of(exposed.member).unwrap(), parent);
            assert_eq!(exposed.exposed_by, Some(buggy));
            assert_eq!(exposed.overridden.len(), 1);
            assert_eq!(exposed.js.as_ref().map(|js| js.kind), Some(JsMemberKind::Method));
        }
        assert_eq!(set.by_js_name()["doIt"].len(), 2);
    }

    #[test]
    fn declaring_type_sees_no_exports_without_merge() {
        let (program, parent, _) = accidental();
        let index = CollisionIndex::build(&program).unwrap();
        let set = index.exposed(parent).unwrap();
        assert_eq!(set.members().len(), 2);
        assert_eq!(set.exported().count(), 0);
    }

    #[test]
    fn closer_override_shadows_ancestor() {
        let mut builder = ProgramBuilder::new();
        let base = builder.add_type(TypeEntry::class("Base", "Base", "p"));
        let derived = builder.add_type(TypeEntry::class("Derived", "Derived", "p").with_super_class(base));
        let original = builder
            .add_member(
                base,
                MemberEntry::method("m", vec![], DataType::Void).with_export(ExportKind::ExportedMethod),
            )
            .unwrap();
        let overrider = builder
            .add_member(derived, MemberEntry::method("m", vec![], DataType::Void))
            .unwrap();
        builder
            .add_member(
                base,
                MemberEntry::method("hidden", vec![], DataType::Void)
                    .with_visibility(Visibility::Private),
            )
            .unwrap();
        let program = builder.build().unwrap();
        let index = CollisionIndex::build(&program).unwrap();
        let set = index.exposed(derived).unwrap();

        assert_eq!(set.members().len(), 1);
        let slot = &set.members()[0];
        assert_eq!(slot.member, overrider);
        assert_eq!(slot.overridden, vec![original]);
        assert_eq!(slot.exposed_by, None);
        assert_eq!(set.slot_of(original).map(|s| s.member), Some(overrider));
    }

    #[test]
    fn only_exported_unrelated_declarations_mark_exposure() {
        fn exposed_by(iface_flags: JsTypeFlags) -> (Option<TypeId>, TypeId) {
            let mut builder = ProgramBuilder::new();
            let base = builder.add_type(TypeEntry::class("Base", "Base", "p"));
            let iface = builder.add_type(TypeEntry::interface("Iface", "Iface", "p").with_js(iface_flags));
            let derived = builder.add_type(
                TypeEntry::class("Derived", "Derived", "p")
                    .with_super_class(base)
                    .with_interface(iface),
            );
            builder
                .add_member(base, MemberEntry::method("m", vec![], DataType::Void))
                .unwrap();
            builder
                .add_member(iface, MemberEntry::method("m", vec![], DataType::Void).as_abstract())
                .unwrap();
            let program = builder.build().unwrap();
            let index = CollisionIndex::build(&program).unwrap();
            let set = index.exposed(derived).unwrap();
            assert_eq!(set.members().len(), 1);
            (set.members()[0].exposed_by, derived)
        }

        assert_eq!(exposed_by(JsTypeFlags::empty()).0, None);
        let (tagged, derived) = exposed_by(JsTypeFlags::JS_TYPE);
        assert_eq!(tagged, Some(derived));
    }

    #[test]
    fn fields_are_separate_entries() {
        let mut builder = ProgramBuilder::new();
        let base = builder.add_type(TypeEntry::class("Base", "Base", "p").with_js(JsTypeFlags::JS_TYPE));
        let derived = builder.add_type(TypeEntry::class("Derived", "Derived", "p").with_super_class(base));
        builder.add_member(base, MemberEntry::field("x", DataType::INT)).unwrap();
        builder
            .add_member(derived, MemberEntry::field("x", DataType::INT))
            .unwrap();
        builder
            .add_member(derived, MemberEntry::field("s", DataType::INT).as_static())
            .unwrap();
        let program = builder.build().unwrap();
        let index = CollisionIndex::build(&program).unwrap();
        let set = index.exposed(derived).unwrap();

        assert_eq!(set.members().len(), 2);
        assert_eq!(set.exported().count(), 1);
    }
}
