//! Property pass - accessor shape, pairing and access path.
//!
//! Accessors are exported methods whose JavaScript kind is a property. Each
//! accessor's shape is checked once at its declaration; pairing runs over
//! every exposed set, so a getter and setter inherited together are checked
//! at each type that sees them both.

use rustc_hash::FxHashSet;

use jsinterop_core::{CheckError, DataType, Diagnostics, MemberId, TypeId};

use crate::context::CheckContext;
use crate::index::{Accessor, ExposedMember, JsMemberKind};
use crate::naming::{AccessorPrefix, split_accessor};
use crate::violation::{Placement, Violation};

/// Validates exported property accessors.
pub struct PropertyValidator<'a> {
    ctx: &'a CheckContext<'a>,
}

impl<'a> PropertyValidator<'a> {
    pub fn new(ctx: &'a CheckContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn run(self) -> Result<Diagnostics, CheckError> {
        let mut out = Diagnostics::new();
        self.check_shapes(&mut out)?;
        self.check_pairs(&mut out)?;
        self.check_super_calls(&mut out)?;
        tracing::debug!(reported = out.count(), "property pass finished");
        Ok(out)
    }

    fn check_shapes(&self, out: &mut Diagnostics) -> Result<(), CheckError> {
        for (id, member) in self.ctx.program.members() {
            let is_accessor = self
                .ctx
                .index
                .js_member(id)
                .is_some_and(|js| js.kind.is_property());
            let Some(method) = member.as_method().filter(|_| is_accessor) else {
                continue;
            };

            let no_params = method.params.is_empty();
            let returns = &method.return_type;
            let signature = || self.ctx.signature(id);
            let violation = match split_accessor(&member.name) {
                Some((AccessorPrefix::Get | AccessorPrefix::Is, _))
                    if !no_params || returns.is_void() =>
                {
                    Some(Violation::GetterShape { member: signature()? })
                }
                Some((AccessorPrefix::Is, _)) if !returns.is_primitive_boolean() => {
                    Some(Violation::IsGetterNotBoolean { member: signature()? })
                }
                Some((AccessorPrefix::Set, _))
                    if method.params.len() != 1 || !returns.is_void() =>
                {
                    Some(Violation::SetterShape { member: signature()? })
                }
                Some(_) => None,
                None => Some(Violation::PropertyNaming { member: signature()? }),
            };
            if let Some(violation) = violation {
                self.ctx.report(out, violation, self.ctx.at_member(id)?);
            }
        }
        Ok(())
    }

    fn check_pairs(&self, out: &mut Diagnostics) -> Result<(), CheckError> {
        let mut reported = FxHashSet::default();

        for &ty in self.ctx.program.hierarchy().topological_order() {
            for (name, group) in self.ctx.index.exposed(ty)?.by_js_name() {
                let mut getters = Vec::new();
                let mut setters = Vec::new();
                for (exposed, js) in group {
                    match js.kind {
                        JsMemberKind::Property(Accessor::Getter) => {
                            getters.push((self.ctx.signature(exposed.member)?, exposed))
                        }
                        JsMemberKind::Property(Accessor::Setter) => {
                            setters.push((self.ctx.signature(exposed.member)?, exposed))
                        }
                        _ => {}
                    }
                }
                getters.sort_by(|a, b| a.0.cmp(&b.0));
                setters.sort_by(|a, b| a.0.cmp(&b.0));

                for accessors in [&getters, &setters] {
                    for (i, (_, first)) in accessors.iter().enumerate() {
                        for (_, second) in &accessors[i + 1..] {
                            let key = (first.member.min(second.member), first.member.max(second.member));
                            if !reported.insert(key) {
                                continue;
                            }
                            let (first_sig, second_sig) =
                                self.ctx.colliding_signatures(ty, first, second)?;
                            let violation = Violation::NameCollision {
                                first: first_sig,
                                second: second_sig,
                                name: name.to_string(),
                            };
                            let placement =
                                self.ctx.at_member(first.member)?.about_member(second.member);
                            self.ctx.report(out, violation, placement);
                        }
                    }
                }

                if let (Some((_, getter)), Some((_, setter))) = (getters.first(), setters.first()) {
                    self.check_consistency(out, ty, name, getter, setter)?;
                }
            }
        }
        Ok(())
    }

    fn check_consistency(
        &self,
        out: &mut Diagnostics,
        ty: TypeId,
        property: &str,
        getter: &ExposedMember,
        setter: &ExposedMember,
    ) -> Result<(), CheckError> {
        let program = self.ctx.program;
        let getter_type = return_type(self.ctx, getter.member)?;
        let setter_type = program
            .member(setter.member)?
            .as_method()
            .and_then(|m| m.params.first())
            .map(|p| &p.ty);
        let (Some(getter_type), Some(setter_type)) = (getter_type, setter_type) else {
            return Ok(());
        };
        if getter_type == setter_type {
            return Ok(());
        }

        let placement = if program.owner_of(setter.member)? == ty {
            self.ctx.at_member(setter.member)?
        } else if program.owner_of(getter.member)? == ty {
            self.ctx.at_member(getter.member)?
        } else {
            self.ctx.at_type(ty)?
        };
        let violation = Violation::InconsistentPropertyTypes {
            property: property.to_string(),
            type_name: self.ctx.type_name(ty)?,
        };
        self.ctx.report(
            out,
            violation,
            placement
                .about_member(getter.member)
                .about_member(setter.member),
        );
        Ok(())
    }

    fn check_super_calls(&self, out: &mut Diagnostics) -> Result<(), CheckError> {
        for (id, member) in self.ctx.program.members() {
            let Some(method) = member.as_method() else {
                continue;
            };
            for call in &method.body.super_calls {
                let is_accessor = self
                    .ctx
                    .index
                    .js_member(call.target)
                    .is_some_and(|js| js.kind.is_property());
                if !is_accessor {
                    continue;
                }
                let file = self.ctx.program.owner_entry(id)?.file.clone();
                let violation = Violation::SuperAccessorCall {
                    member: self.ctx.signature(call.target)?,
                };
                let placement = Placement::new(file, call.span)
                    .about_member(id)
                    .about_member(call.target);
                self.ctx.report(out, violation, placement);
            }
        }
        Ok(())
    }
}

fn return_type<'p>(ctx: &CheckContext<'p>, id: MemberId) -> Result<Option<&'p DataType>, CheckError> {
    Ok(ctx.program.member(id)?.as_method().map(|m| &m.return_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckerConfig;
    use crate::index::CollisionIndex;
    use jsinterop_core::{
        CallSite, ExportKind, JsTypeFlags, MemberEntry, MethodBody, Parameter, PrimitiveKind,
        Span, TypeEntry,
    };
    use jsinterop_registry::{Program, ProgramBuilder};

    fn run(program: &Program) -> Vec<String> {
        let config = CheckerConfig::default();
        let index = CollisionIndex::build(program).unwrap();
        let ctx = CheckContext::new(program, &config, &index);
        let mut out = PropertyValidator::new(&ctx).run().unwrap();
        out.sort();
        out.iter().map(|d| d.line_message()).collect()
    }

    fn property(name: &str, params: Vec<Parameter>, ret: DataType, line: u32) -> MemberEntry {
        MemberEntry::method(name, params, ret)
            .with_export(ExportKind::ExportedProperty)
            .at(Span::line(line))
    }

    fn buggy(builder: &mut ProgramBuilder) -> TypeId {
        builder.add_type(
            TypeEntry::class("Buggy", "EntryPoint.Buggy", "test")
                .with_js(JsTypeFlags::JS_TYPE)
                .at("test/EntryPoint.java", Span::line(5)),
        )
    }

    #[test]
    fn matching_getter_and_setter_pass() {
        let mut builder = ProgramBuilder::new();
        let ty = buggy(&mut builder);
        builder.add_member(ty, property("getX", vec![], DataType::INT, 6)).unwrap();
        builder
            .add_member(
                ty,
                property("setX", vec![Parameter::new("x", DataType::INT)], DataType::Void, 7),
            )
            .unwrap();
        let program = builder.build().unwrap();
        assert!(run(&program).is_empty());
    }

    #[test]
    fn shape_violations() {
        let mut builder = ProgramBuilder::new();
        let ty = buggy(&mut builder);
        builder
            .add_member(ty, property("getY", vec![Parameter::new("x", DataType::INT)], DataType::INT, 6))
            .unwrap();
        builder.add_member(ty, property("isX", vec![], DataType::INT, 7)).unwrap();
        builder
            .add_member(ty, property("isZ", vec![], DataType::Boxed(PrimitiveKind::Boolean), 8))
            .unwrap();
        builder
            .add_member(ty, property("setW", vec![], DataType::Void, 9))
            .unwrap();
        builder.add_member(ty, property("x", vec![], DataType::INT, 10)).unwrap();
        builder.add_member(ty, property("get", vec![], DataType::INT, 11)).unwrap();
        let program = builder.build().unwrap();

        assert_eq!(
            run(&program),
            vec![
                "Line 6: There cannot be void return type or any parameters for the JsProperty \
                 getter 'int EntryPoint.Buggy.getY(int)'.",
                "Line 7: There cannot be non-boolean return for the JsProperty 'is' getter \
                 'int EntryPoint.Buggy.isX()'.",
                "Line 8: There cannot be non-boolean return for the JsProperty 'is' getter \
                 'Boolean EntryPoint.Buggy.isZ()'.",
                "Line 9: There needs to be single parameter and void return type for the \
                 JsProperty setter 'void EntryPoint.Buggy.setW()'.",
                "Line 10: JsProperty 'int EntryPoint.Buggy.x()' doesn't follow Java Bean naming \
                 conventions.",
                "Line 11: JsProperty 'int EntryPoint.Buggy.get()' doesn't follow Java Bean naming \
                 conventions.",
            ]
        );
    }

    #[test]
    fn two_getters_for_one_property_collide() {
        let mut builder = ProgramBuilder::new();
        let ty = buggy(&mut builder);
        builder.add_member(ty, property("getX", vec![], DataType::INT, 6)).unwrap();
        builder
            .add_member(ty, property("isX", vec![], DataType::BOOLEAN, 7))
            .unwrap();
        let program = builder.build().unwrap();

        assert_eq!(
            run(&program),
            vec![
                "Line 7: 'boolean EntryPoint.Buggy.isX()' and 'int EntryPoint.Buggy.getX()' \
                 cannot both use the same JavaScript name 'x'."
            ]
        );
    }

    #[test]
    fn mismatch_reported_at_setter() {
        let mut builder = ProgramBuilder::new();
        let ty = buggy(&mut builder);
        builder.add_member(ty, property("getZ", vec![], DataType::Void, 6)).unwrap();
        builder
            .add_member(
                ty,
                property("setZ", vec![Parameter::new("z", DataType::INT)], DataType::Void, 7),
            )
            .unwrap();
        let program = builder.build().unwrap();

        assert_eq!(
            run(&program),
            vec![
                "Line 6: There cannot be void return type or any parameters for the JsProperty \
                 getter 'void EntryPoint.Buggy.getZ()'.",
                "Line 7: The setter and getter for JsProperty 'z' in type 'EntryPoint.Buggy' must \
                 have consistent types.",
            ]
        );
    }

    #[test]
    fn inherited_mismatch_is_reported_at_each_level() {
        let mut builder = ProgramBuilder::new();
        let parent = builder.add_type(
            TypeEntry::class("Parent", "EntryPoint.Parent", "test")
                .at("test/EntryPoint.java", Span::line(4)),
        );
        builder.add_type(
            TypeEntry::class("Child", "EntryPoint.Child", "test")
                .with_super_class(parent)
                .at("test/EntryPoint.java", Span::line(8)),
        );
        builder.add_member(parent, property("getA", vec![], DataType::INT, 5)).unwrap();
        builder
            .add_member(
                parent,
                property("setA", vec![Parameter::new("a", DataType::String)], DataType::Void, 6),
            )
            .unwrap();
        let program = builder.build().unwrap();

        assert_eq!(
            run(&program),
            vec![
                "Line 6: The setter and getter for JsProperty 'a' in type 'EntryPoint.Parent' \
                 must have consistent types.",
                "Line 8: The setter and getter for JsProperty 'a' in type 'EntryPoint.Child' \
                 must have consistent types.",
            ]
        );
    }

    #[test]
    fn accessor_via_super_is_rejected() {
        let mut builder = ProgramBuilder::new();
        let parent = buggy(&mut builder);
        let child = builder.add_type(
            TypeEntry::class("Sub", "EntryPoint.Sub", "test")
                .with_super_class(parent)
                .at("test/EntryPoint.java", Span::line(9)),
        );
        let getter = builder
            .add_member(parent, property("getX", vec![], DataType::INT, 6))
            .unwrap();
        builder
            .add_member(
                child,
                MemberEntry::method("m", vec![], DataType::INT).with_body(MethodBody {
                    is_empty: false,
                    super_calls: vec![CallSite {
                        target: getter,
                        span: Span::line(11),
                    }],
                    ..MethodBody::default()
                }),
            )
            .unwrap();
        let program = builder.build().unwrap();

        assert_eq!(
            run(&program),
            vec!["Line 11: Cannot call property accessor 'int EntryPoint.Buggy.getX()' via super."]
        );
    }
}
