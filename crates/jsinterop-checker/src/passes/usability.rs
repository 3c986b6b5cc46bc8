//! Usability pass - advisory warnings for exported signatures whose types
//! JavaScript cannot meaningfully hold.
//!
//! Checked members are every exported member at its declaring type, plus
//! members that are only exposed accidentally, once, at the first type that
//! exposes them. A warning is suppressed when the parameter, the member or
//! the member's owner carries the configured suppression key.

use rustc_hash::FxHashSet;

use jsinterop_core::{CheckError, DataType, Diagnostics, MemberEntry, MemberKind, MemberId};

use crate::context::CheckContext;
use crate::index::ExposedMember;
use crate::violation::Violation;

/// Flags exported types that are not usable from JavaScript.
pub struct UsabilityAnalyzer<'a> {
    ctx: &'a CheckContext<'a>,
}

impl<'a> UsabilityAnalyzer<'a> {
    pub fn new(ctx: &'a CheckContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn run(self) -> Result<Diagnostics, CheckError> {
        let mut out = Diagnostics::new();
        if !self.ctx.config.report_unusable_by_js {
            return Ok(out);
        }

        for (id, _) in self.ctx.program.members() {
            if self.ctx.index.is_exported(id) {
                self.check_member(id, self.ctx.quoted_signature(id, None)?, &mut out)?;
            }
        }

        let mut seen = FxHashSet::default();
        for &ty in self.ctx.program.hierarchy().topological_order() {
            for exposed in self.ctx.index.exposed(ty)?.members() {
                if !self.is_accidental(exposed) || !seen.insert(exposed.member) {
                    continue;
                }
                let signature = self.ctx.exposed_signature(exposed)?;
                self.check_member(exposed.member, signature, &mut out)?;
            }
        }

        tracing::debug!(reported = out.count(), "usability pass finished");
        Ok(out)
    }

    fn is_accidental(&self, exposed: &ExposedMember) -> bool {
        exposed.exposed_by.is_some()
            && exposed.js.is_some()
            && !self.ctx.index.is_exported(exposed.member)
    }

    fn check_member(
        &self,
        id: MemberId,
        signature: String,
        out: &mut Diagnostics,
    ) -> Result<(), CheckError> {
        let member = self.ctx.program.member(id)?;
        if self.suppressed(id, member)? {
            return Ok(());
        }

        match &member.kind {
            MemberKind::Field(field) => {
                if !self.is_usable(&field.ty)? {
                    let violation = Violation::UnusableField {
                        field: member.name.clone(),
                        type_name: self.ctx.program.owner_entry(id)?.qualified_name.clone(),
                    };
                    self.ctx.report(out, violation, self.ctx.at_member(id)?);
                }
            }
            MemberKind::Method(method) => {
                if !method.return_type.is_void() && !self.is_usable(&method.return_type)? {
                    let violation = Violation::UnusableReturn {
                        member: signature.clone(),
                    };
                    self.ctx.report(out, violation, self.ctx.at_member(id)?);
                }
                let key = &self.ctx.config.unusable_suppression_key;
                for param in &method.params {
                    if param.suppressions.iter().any(|s| s == key) || self.is_usable(&param.ty)? {
                        continue;
                    }
                    let violation = Violation::UnusableParameter {
                        param: param.name.clone(),
                        member: signature.clone(),
                    };
                    self.ctx.report(out, violation, self.ctx.at_member(id)?);
                }
            }
        }
        Ok(())
    }

    fn suppressed(&self, id: MemberId, member: &MemberEntry) -> Result<bool, CheckError> {
        let key = &self.ctx.config.unusable_suppression_key;
        Ok(member.suppresses(key) || self.ctx.program.owner_entry(id)?.suppresses(key))
    }

    /// Whether values of `ty` can cross into JavaScript.
    fn is_usable(&self, ty: &DataType) -> Result<bool, CheckError> {
        Ok(match ty {
            DataType::Void | DataType::String | DataType::Object => true,
            DataType::Primitive(kind) | DataType::Boxed(kind) => !kind.is_long(),
            DataType::Declared(id) => self.ctx.type_entry(*id)?.js.is_js_usable(),
            DataType::External(_) => false,
            DataType::Array { element, .. } => {
                !matches!(**element, DataType::Object) && self.is_usable(element)?
            }
        })
    }
}
