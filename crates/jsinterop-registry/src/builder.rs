//! Incremental construction and validation of a [`Program`].

use jsinterop_core::{DataType, MemberEntry, MemberId, ModelError, TypeEntry, TypeId};

use crate::{Hierarchy, Program};

/// Collects types and members from the front end, then validates and
/// freezes them into a [`Program`].
///
/// # Example
///
/// ```
/// use jsinterop_core::{DataType, MemberEntry, TypeEntry};
/// use jsinterop_registry::ProgramBuilder;
///
/// let mut builder = ProgramBuilder::new();
/// let buggy = builder.add_type(TypeEntry::class("Buggy", "EntryPoint.Buggy", "test"));
/// builder.add_member(buggy, MemberEntry::field("x", DataType::INT)).unwrap();
///
/// let program = builder.build().unwrap();
/// assert_eq!(program.member_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    types: Vec<TypeEntry>,
    members: Vec<MemberEntry>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from tables produced elsewhere. Member lists and owners are
    /// taken as given and checked by [`build`](Self::build).
    pub fn from_parts(types: Vec<TypeEntry>, members: Vec<MemberEntry>) -> Self {
        Self { types, members }
    }

    /// Add a type; its id is its position in program order.
    pub fn add_type(&mut self, entry: TypeEntry) -> TypeId {
        let id = TypeId::new(self.types.len() as u32);
        self.types.push(entry);
        id
    }

    /// Add a member to the end of `owner`'s member list.
    pub fn add_member(
        &mut self,
        owner: TypeId,
        mut entry: MemberEntry,
    ) -> Result<MemberId, ModelError> {
        let id = MemberId::new(self.members.len() as u32);
        let ty = self
            .types
            .get_mut(owner.slot())
            .ok_or_else(|| ModelError::UnknownType {
                id: owner,
                context: format!("owner of '{}'", entry.name),
            })?;
        ty.members.push(id);
        entry.owner = Some(owner);
        self.members.push(entry);
        Ok(id)
    }

    pub fn type_mut(&mut self, id: TypeId) -> Option<&mut TypeEntry> {
        self.types.get_mut(id.slot())
    }

    pub fn member_mut(&mut self, id: MemberId) -> Option<&mut MemberEntry> {
        self.members.get_mut(id.slot())
    }

    /// Set the superclass of `ty`.
    pub fn set_super_class(&mut self, ty: TypeId, super_class: TypeId) -> Result<(), ModelError> {
        let entry = self.types.get_mut(ty.slot()).ok_or(ModelError::UnknownType {
            id: ty,
            context: "superclass assignment".to_string(),
        })?;
        entry.super_class = Some(super_class);
        Ok(())
    }

    /// Add an implemented (or extended) interface to `ty`.
    pub fn add_interface(&mut self, ty: TypeId, interface: TypeId) -> Result<(), ModelError> {
        let entry = self.types.get_mut(ty.slot()).ok_or(ModelError::UnknownType {
            id: ty,
            context: "interface assignment".to_string(),
        })?;
        entry.interfaces.push(interface);
        Ok(())
    }

    /// Record that constructor `ctor` starts with `this(...)` calling `target`.
    pub fn set_delegation(&mut self, ctor: MemberId, target: MemberId) -> Result<(), ModelError> {
        let entry = self.members.get_mut(ctor.slot()).ok_or(ModelError::UnknownMember {
            id: ctor,
            context: "delegation".to_string(),
        })?;
        if let Some(method) = entry.as_method_mut() {
            method.body.delegates_to = Some(target);
        }
        Ok(())
    }

    /// Validate every reference and freeze the program.
    pub fn build(self) -> Result<Program, ModelError> {
        self.validate_types()?;
        self.validate_members()?;
        let hierarchy = Hierarchy::build(&self.types)?;
        Ok(Program {
            types: self.types,
            members: self.members,
            hierarchy,
        })
    }

    fn type_ref(&self, id: TypeId, context: impl FnOnce() -> String) -> Result<&TypeEntry, ModelError> {
        self.types.get(id.slot()).ok_or_else(|| ModelError::UnknownType {
            id,
            context: context(),
        })
    }

    fn validate_types(&self) -> Result<(), ModelError> {
        for (slot, entry) in self.types.iter().enumerate() {
            if let Some(super_class) = entry.super_class {
                if entry.is_interface() || entry.is_enum() {
                    return Err(ModelError::UnexpectedSuperClass {
                        type_name: entry.qualified_name.clone(),
                    });
                }
                let parent = self.type_ref(super_class, || {
                    format!("superclass of '{}'", entry.qualified_name)
                })?;
                if parent.is_interface() || parent.is_enum() {
                    return Err(ModelError::SuperClassNotClass {
                        type_name: entry.qualified_name.clone(),
                        super_name: parent.qualified_name.clone(),
                    });
                }
            }

            for interface in &entry.interfaces {
                let parent = self.type_ref(*interface, || {
                    format!("interface list of '{}'", entry.qualified_name)
                })?;
                if !parent.is_interface() {
                    return Err(ModelError::NotAnInterface {
                        type_name: entry.qualified_name.clone(),
                        interface_name: parent.qualified_name.clone(),
                    });
                }
            }

            let owner = TypeId::new(slot as u32);
            for id in &entry.members {
                let member = self.members.get(id.slot()).ok_or_else(|| ModelError::UnknownMember {
                    id: *id,
                    context: format!("member list of '{}'", entry.qualified_name),
                })?;
                if member.owner != Some(owner) {
                    return Err(ModelError::OrphanMember {
                        member: *id,
                        name: member.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_members(&self) -> Result<(), ModelError> {
        for (slot, member) in self.members.iter().enumerate() {
            let id = MemberId::new(slot as u32);
            let owner = member
                .owner
                .filter(|owner| {
                    self.types
                        .get(owner.slot())
                        .is_some_and(|t| t.members.contains(&id))
                })
                .ok_or_else(|| ModelError::OrphanMember {
                    member: id,
                    name: member.name.clone(),
                })?;

            if let Some(field) = member.as_field() {
                self.validate_data_type(&field.ty, &member.name)?;
                continue;
            }
            let Some(method) = member.as_method() else {
                continue;
            };

            self.validate_data_type(&method.return_type, &member.name)?;
            for param in &method.params {
                self.validate_data_type(&param.ty, &member.name)?;
            }

            if let Some(target) = method.body.delegates_to {
                let valid = method.is_constructor
                    && self.members.get(target.slot()).is_some_and(|t| {
                        t.owner == Some(owner) && t.is_constructor() && target != id
                    });
                if !valid {
                    return Err(ModelError::InvalidDelegation {
                        member: member.name.clone(),
                        type_name: self.types[owner.slot()].qualified_name.clone(),
                    });
                }
            }
            for call in &method.body.super_calls {
                if self.members.get(call.target.slot()).is_none() {
                    return Err(ModelError::UnknownMember {
                        id: call.target,
                        context: format!("super call in '{}'", member.name),
                    });
                }
            }
            for check in &method.body.instance_of_checks {
                self.type_ref(check.target, || format!("instanceof in '{}'", member.name))?;
            }
        }
        Ok(())
    }

    fn validate_data_type(&self, ty: &DataType, member: &str) -> Result<(), ModelError> {
        if let Some(id) = ty.declared_type() {
            self.type_ref(id, || format!("signature of '{member}'"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsinterop_core::{MethodBody, Parameter};

    #[test]
    fn add_member_sets_owner() {
        let mut builder = ProgramBuilder::new();
        let ty = builder.add_type(TypeEntry::class("A", "A", "p"));
        let id = builder
            .add_member(ty, MemberEntry::method("m", vec![], DataType::Void))
            .unwrap();
        let program = builder.build().unwrap();
        assert_eq!(program.get_member(id).unwrap().owner, Some(ty));
    }

    #[test]
    fn add_member_to_unknown_type_fails() {
        let mut builder = ProgramBuilder::new();
        let err = builder
            .add_member(TypeId::new(3), MemberEntry::field("x", DataType::INT))
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownType { .. }));
    }

    #[test]
    fn interface_cannot_be_superclass() {
        let mut builder = ProgramBuilder::new();
        let i = builder.add_type(TypeEntry::interface("I", "I", "p"));
        builder.add_type(TypeEntry::class("C", "C", "p").with_super_class(i));
        assert_eq!(
            builder.build().unwrap_err(),
            ModelError::SuperClassNotClass {
                type_name: "C".to_string(),
                super_name: "I".to_string()
            }
        );
    }

    #[test]
    fn class_cannot_be_implemented() {
        let mut builder = ProgramBuilder::new();
        let c = builder.add_type(TypeEntry::class("C", "C", "p"));
        let i = builder.add_type(TypeEntry::interface("I", "I", "p"));
        builder.add_interface(i, c).unwrap();
        assert!(matches!(
            builder.build(),
            Err(ModelError::NotAnInterface { .. })
        ));
    }

    #[test]
    fn orphan_member_is_rejected() {
        let types = vec![TypeEntry::class("A", "A", "p")];
        let members = vec![MemberEntry::field("x", DataType::INT)];
        let err = ProgramBuilder::from_parts(types, members).build().unwrap_err();
        assert!(matches!(err, ModelError::OrphanMember { .. }));
    }

    #[test]
    fn delegation_must_target_same_type_constructor() {
        let mut builder = ProgramBuilder::new();
        let a = builder.add_type(TypeEntry::class("A", "A", "p"));
        let b = builder.add_type(TypeEntry::class("B", "B", "p"));
        let a_ctor = builder
            .add_member(a, MemberEntry::constructor("A", vec![]))
            .unwrap();
        let b_ctor = builder
            .add_member(
                b,
                MemberEntry::constructor("B", vec![Parameter::new("x", DataType::INT)]),
            )
            .unwrap();
        builder.set_delegation(b_ctor, a_ctor).unwrap();
        assert!(matches!(
            builder.build(),
            Err(ModelError::InvalidDelegation { .. })
        ));
    }

    #[test]
    fn valid_delegation_builds() {
        let mut builder = ProgramBuilder::new();
        let a = builder.add_type(TypeEntry::class("A", "A", "p"));
        let primary = builder
            .add_member(a, MemberEntry::constructor("A", vec![]))
            .unwrap();
        let secondary = builder
            .add_member(
                a,
                MemberEntry::constructor("A", vec![Parameter::new("x", DataType::INT)]),
            )
            .unwrap();
        builder.set_delegation(secondary, primary).unwrap();
        let program = builder.build().unwrap();
        let body: &MethodBody = &program.get_member(secondary).unwrap().as_method().unwrap().body;
        assert_eq!(body.delegates_to, Some(primary));
    }

    #[test]
    fn dangling_signature_type_is_rejected() {
        let mut builder = ProgramBuilder::new();
        let a = builder.add_type(TypeEntry::class("A", "A", "p"));
        builder
            .add_member(
                a,
                MemberEntry::method("m", vec![], DataType::Declared(TypeId::new(7))),
            )
            .unwrap();
        assert!(matches!(
            builder.build(),
            Err(ModelError::UnknownType { .. })
        ));
    }
}
