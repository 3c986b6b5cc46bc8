//! Collision pass - JavaScript name clashes and rename consistency.
//!
//! ## Rules
//!
//! - Instance surface: within every exposed set, two exported members with
//!   the same resolved name collide unless both are accessors (left to the
//!   property pass) or both are native. Each unordered pair is reported once,
//!   at the first type in ancestors-first order where it is visible, on the
//!   member whose signature sorts first.
//! - Global names: static members and constructors are exported under a
//!   global name; the first claimant keeps it.
//! - Constructors: at most one exported constructor per type, and every
//!   other constructor must delegate to it. Each constructor that does not
//!   is reported at the exported constructor it fails to reach.
//! - Renames: a member in a slot must not resolve to a different name than
//!   a member it overrides when either name is explicit.

use rustc_hash::{FxHashMap, FxHashSet};

use jsinterop_core::{CheckError, Diagnostics, MemberId, TypeId};

use crate::context::CheckContext;
use crate::index::{JsMemberKind, is_native_member};
use crate::violation::Violation;

/// Runs every naming rule over the program.
pub struct CollisionPass<'a> {
    ctx: &'a CheckContext<'a>,
}

impl<'a> CollisionPass<'a> {
    pub fn new(ctx: &'a CheckContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn run(self) -> Result<Diagnostics, CheckError> {
        let mut out = Diagnostics::new();
        self.check_instance_names(&mut out)?;
        self.check_global_names(&mut out)?;
        self.check_constructors(&mut out)?;
        self.check_renames(&mut out)?;
        tracing::debug!(reported = out.count(), "collision pass finished");
        Ok(out)
    }

    fn check_instance_names(&self, out: &mut Diagnostics) -> Result<(), CheckError> {
        let program = self.ctx.program;
        let mut reported = FxHashSet::default();

        for &ty in program.hierarchy().topological_order() {
            for (name, group) in self.ctx.index.exposed(ty)?.by_js_name() {
                for (i, (a, a_js)) in group.iter().enumerate() {
                    for (b, b_js) in &group[i + 1..] {
                        if a_js.kind.is_property() && b_js.kind.is_property() {
                            continue;
                        }
                        if is_native_member(program, a.member)?
                            && is_native_member(program, b.member)?
                        {
                            continue;
                        }
                        if !reported.insert(ordered_pair(a.member, b.member)) {
                            continue;
                        }

                        let mut pair = [
                            (self.ctx.signature(a.member)?, *a),
                            (self.ctx.signature(b.member)?, *b),
                        ];
                        pair.sort_by(|x, y| x.0.cmp(&y.0));
                        let [(_, first), (_, second)] = pair;

                        let (first_sig, second_sig) =
                            self.ctx.colliding_signatures(ty, first, second)?;
                        let violation = Violation::NameCollision {
                            first: first_sig,
                            second: second_sig,
                            name: name.to_string(),
                        };
                        let placement = self.ctx.at_member(first.member)?.about_member(second.member);
                        self.ctx.report(out, violation, placement);
                    }
                }
            }
        }
        Ok(())
    }

    fn check_global_names(&self, out: &mut Diagnostics) -> Result<(), CheckError> {
        let program = self.ctx.program;
        let mut taken: FxHashMap<String, MemberId> = FxHashMap::default();

        for (ty, entry) in program.types() {
            if entry.is_native() {
                continue;
            }
            let type_name = entry.global_name();
            // Fields claim their names before methods.
            let fields = program.members_of(ty).filter(|(_, m)| m.is_field());
            let methods = program.members_of(ty).filter(|(_, m)| m.is_method());

            for (id, member) in fields.chain(methods) {
                let Some(js) = self.ctx.index.js_member(id) else {
                    continue;
                };
                if member.is_native {
                    continue;
                }
                let global = match js.kind {
                    JsMemberKind::Constructor => type_name.clone(),
                    _ if member.is_static => format!("{}.{}", type_name, js.name),
                    _ => continue,
                };
                if taken.contains_key(&global) {
                    let violation = Violation::GlobalNameTaken {
                        member: self.ctx.signature(id)?,
                        name: global,
                    };
                    self.ctx.report(out, violation, self.ctx.at_member(id)?);
                } else {
                    taken.insert(global, id);
                }
            }
        }
        Ok(())
    }

    fn check_constructors(&self, out: &mut Diagnostics) -> Result<(), CheckError> {
        let program = self.ctx.program;

        for (ty, entry) in program.types() {
            if entry.is_native() {
                continue;
            }
            let constructors: Vec<MemberId> = program
                .members_of(ty)
                .filter(|(_, m)| m.is_constructor())
                .map(|(id, _)| id)
                .collect();
            let exported: Vec<MemberId> = constructors
                .iter()
                .copied()
                .filter(|id| {
                    self.ctx
                        .index
                        .js_member(*id)
                        .is_some_and(|js| js.kind == JsMemberKind::Constructor)
                })
                .collect();

            match exported.as_slice() {
                [] => {}
                [primary] => {
                    for &ctor in &constructors {
                        if ctor != *primary && !self.delegates_to(ctor, *primary, ty)? {
                            let violation = Violation::NonDelegatingConstructor {
                                primary: self.ctx.signature(*primary)?,
                            };
                            let placement = self.ctx.at_member(*primary)?.about_member(ctor);
                            self.ctx.report(out, violation, placement);
                        }
                    }
                }
                _ => {
                    let violation = Violation::MultipleJsConstructors {
                        type_name: entry.qualified_name.clone(),
                    };
                    self.ctx.report(out, violation, self.ctx.at_type(ty)?);
                }
            }
        }
        Ok(())
    }

    /// Follow `this(...)` calls from `ctor` and see whether they reach `primary`.
    fn delegates_to(&self, ctor: MemberId, primary: MemberId, ty: TypeId) -> Result<bool, CheckError> {
        let mut visited = FxHashSet::default();
        let mut current = ctor;
        while visited.insert(current) {
            let member = self.ctx.program.member(current)?;
            let Some(next) = member.as_method().and_then(|m| m.body.delegates_to) else {
                return Ok(false);
            };
            if self.ctx.program.owner_of(next)? != ty {
                return Ok(false);
            }
            if next == primary {
                return Ok(true);
            }
            current = next;
        }
        Ok(false)
    }

    fn check_renames(&self, out: &mut Diagnostics) -> Result<(), CheckError> {
        let mut reported = FxHashSet::default();

        for &ty in self.ctx.program.hierarchy().topological_order() {
            for slot in self.ctx.index.exposed(ty)?.members() {
                let Some(js) = &slot.js else {
                    continue;
                };
                for &other in &slot.overridden {
                    let Some(other_js) = self.ctx.index.js_member(other) else {
                        continue;
                    };
                    if !(js.explicit_name || other_js.explicit_name) || js.name == other_js.name {
                        continue;
                    }
                    if !reported.insert((slot.member, other)) {
                        continue;
                    }
                    let violation = Violation::InconsistentRename {
                        member: self.ctx.exposed_signature(slot)?,
                    };
                    let placement = self.ctx.at_member(slot.member)?.about_member(other);
                    self.ctx.report(out, violation, placement);
                }
            }
        }
        Ok(())
    }
}

fn ordered_pair(a: MemberId, b: MemberId) -> (MemberId, MemberId) {
    if a <= b { (a, b) } else { (b, a) }
}
