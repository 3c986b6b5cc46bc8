//! Structural pass - per-kind contracts for JsFunctions, native types and
//! overlays.
//!
//! Every type is classified into the [`StructuralKind`]s it has, and every
//! rule registered for one of those kinds runs against it. Rules are
//! independent of each other; adding a kind means adding rows to [`RULES`].

use jsinterop_core::{
    CheckError, Diagnostics, ExportKind, FieldInitializer, MemberEntry, TypeEntry, TypeId,
};

use crate::context::CheckContext;
use crate::violation::{Placement, Violation};

/// The structural roles a type can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralKind {
    /// Annotated `@JsFunction`.
    JsFunction,
    /// An interface directly extending a JsFunction.
    JsFunctionSubtype,
    /// A class directly implementing a JsFunction.
    JsFunctionImplementation,
    /// A class extending a JsFunction implementation.
    JsFunctionImplementationSubtype,
    /// A native JsType.
    NativeType,
    /// Declares at least one `@JsOverlay` member.
    OverlayHost,
    /// Every type.
    AnyType,
}

type RuleFn = fn(&CheckContext<'_>, TypeId, &mut Diagnostics) -> Result<(), CheckError>;

/// A contract checked for every type of a kind.
struct Rule {
    kind: StructuralKind,
    check: RuleFn,
}

const RULES: &[Rule] = &[
    Rule { kind: StructuralKind::JsFunction, check: js_function_is_functional },
    Rule { kind: StructuralKind::JsFunction, check: js_function_extends_nothing },
    Rule { kind: StructuralKind::JsFunction, check: js_function_has_no_static_initializer },
    Rule { kind: StructuralKind::JsFunction, check: js_function_is_not_js_type },
    Rule { kind: StructuralKind::JsFunctionSubtype, check: interface_extends_js_function },
    Rule { kind: StructuralKind::JsFunctionImplementation, check: implementation_has_one_interface },
    Rule { kind: StructuralKind::JsFunctionImplementation, check: implementation_extends_no_class },
    Rule { kind: StructuralKind::JsFunctionImplementation, check: implementation_is_not_js_type },
    Rule { kind: StructuralKind::JsFunctionImplementationSubtype, check: class_extends_implementation },
    Rule { kind: StructuralKind::NativeType, check: native_type_is_not_enum },
    Rule { kind: StructuralKind::NativeType, check: native_members_are_public },
    Rule { kind: StructuralKind::NativeType, check: native_type_has_no_static_initializer },
    Rule { kind: StructuralKind::NativeType, check: native_constructors_are_empty },
    Rule { kind: StructuralKind::OverlayHost, check: overlays_are_additive },
    Rule { kind: StructuralKind::AnyType, check: no_instanceof_native_interface },
];

/// Applies the structural rule table to every type.
pub struct StructuralRuleEngine<'a> {
    ctx: &'a CheckContext<'a>,
}

impl<'a> StructuralRuleEngine<'a> {
    pub fn new(ctx: &'a CheckContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn run(self) -> Result<Diagnostics, CheckError> {
        let mut out = Diagnostics::new();
        for (ty, _) in self.ctx.program.types() {
            let kinds = kinds_of(self.ctx, ty)?;
            for rule in RULES.iter().filter(|rule| kinds.contains(&rule.kind)) {
                (rule.check)(self.ctx, ty, &mut out)?;
            }
        }
        tracing::debug!(reported = out.count(), "structural pass finished");
        Ok(out)
    }
}

/// Classify a type into the kinds whose rules apply to it.
pub fn kinds_of(ctx: &CheckContext<'_>, ty: TypeId) -> Result<Vec<StructuralKind>, CheckError> {
    let entry = ctx.type_entry(ty)?;
    let mut kinds = Vec::new();

    if entry.is_js_function() {
        kinds.push(StructuralKind::JsFunction);
    }
    if implements_js_function(ctx, entry)? {
        kinds.push(if entry.is_interface() {
            StructuralKind::JsFunctionSubtype
        } else {
            StructuralKind::JsFunctionImplementation
        });
    }
    if closest_implementation(ctx, entry)?.is_some() {
        kinds.push(StructuralKind::JsFunctionImplementationSubtype);
    }
    if entry.is_native() {
        kinds.push(StructuralKind::NativeType);
    }
    if ctx
        .program
        .members_of(ty)
        .any(|(_, m)| m.export == ExportKind::Overlay)
    {
        kinds.push(StructuralKind::OverlayHost);
    }
    kinds.push(StructuralKind::AnyType);
    Ok(kinds)
}

fn implements_js_function(ctx: &CheckContext<'_>, entry: &TypeEntry) -> Result<bool, CheckError> {
    for interface in &entry.interfaces {
        if ctx.type_entry(*interface)?.is_js_function() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// The nearest superclass that directly implements a JsFunction.
fn closest_implementation(
    ctx: &CheckContext<'_>,
    entry: &TypeEntry,
) -> Result<Option<TypeId>, CheckError> {
    let mut current = entry.super_class;
    while let Some(ty) = current {
        let parent = ctx.type_entry(ty)?;
        if !parent.is_interface() && implements_js_function(ctx, parent)? {
            return Ok(Some(ty));
        }
        current = parent.super_class;
    }
    Ok(None)
}

fn has_static_initializer(ctx: &CheckContext<'_>, ty: TypeId, entry: &TypeEntry) -> bool {
    entry.has_static_initializer
        || ctx.program.members_of(ty).any(|(_, m)| {
            m.is_static
                && m.as_field()
                    .is_some_and(|f| f.initializer == FieldInitializer::NonConstant)
        })
}

fn report_type(
    ctx: &CheckContext<'_>,
    out: &mut Diagnostics,
    ty: TypeId,
    violation: Violation,
) -> Result<(), CheckError> {
    ctx.report(out, violation, ctx.at_type(ty)?);
    Ok(())
}

// === JsFunction ===

fn js_function_is_functional(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    let abstract_methods = ctx
        .program
        .members_of(ty)
        .filter(|(_, m)| !m.is_static && m.as_method().is_some_and(|m| m.is_abstract))
        .count();
    if !entry.is_interface() || abstract_methods != 1 {
        let type_name = entry.qualified_name.clone();
        report_type(ctx, out, ty, Violation::JsFunctionNotFunctional { type_name })?;
    }
    Ok(())
}

fn js_function_extends_nothing(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    if entry.is_interface() && !entry.interfaces.is_empty() {
        let type_name = entry.qualified_name.clone();
        report_type(ctx, out, ty, Violation::JsFunctionExtends { type_name })?;
    }
    Ok(())
}

fn js_function_has_no_static_initializer(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    if has_static_initializer(ctx, ty, entry) {
        let type_name = entry.qualified_name.clone();
        report_type(ctx, out, ty, Violation::JsFunctionStaticInitializer { type_name })?;
    }
    Ok(())
}

fn js_function_is_not_js_type(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    if entry.is_js_type() {
        let type_name = entry.qualified_name.clone();
        report_type(ctx, out, ty, Violation::JsFunctionAndJsType { type_name })?;
    }
    Ok(())
}

fn interface_extends_js_function(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    for interface in &entry.interfaces {
        let parent = ctx.type_entry(*interface)?;
        if parent.is_js_function() {
            let violation = Violation::ExtendsJsFunction {
                type_name: entry.qualified_name.clone(),
                function: parent.qualified_name.clone(),
            };
            report_type(ctx, out, ty, violation)?;
        }
    }
    Ok(())
}

// === JsFunction implementations ===

fn implementation_has_one_interface(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    if entry.interfaces.len() > 1 {
        let type_name = entry.qualified_name.clone();
        report_type(ctx, out, ty, Violation::JsFunctionImplMultipleInterfaces { type_name })?;
    }
    Ok(())
}

fn implementation_extends_no_class(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    if entry.super_class.is_some() {
        let type_name = entry.qualified_name.clone();
        report_type(ctx, out, ty, Violation::JsFunctionImplExtendsClass { type_name })?;
    }
    Ok(())
}

fn implementation_is_not_js_type(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    if entry.is_js_type() {
        let type_name = entry.qualified_name.clone();
        report_type(ctx, out, ty, Violation::JsFunctionImplAndJsType { type_name })?;
    }
    Ok(())
}

fn class_extends_implementation(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    if let Some(implementation) = closest_implementation(ctx, entry)? {
        let violation = Violation::ExtendsJsFunctionImpl {
            type_name: entry.qualified_name.clone(),
            implementation: ctx.type_name(implementation)?,
        };
        report_type(ctx, out, ty, violation)?;
    }
    Ok(())
}

// === Native types ===

fn native_type_is_not_enum(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    if entry.is_enum() {
        let type_name = entry.qualified_name.clone();
        report_type(ctx, out, ty, Violation::NativeEnum { type_name })?;
    }
    Ok(())
}

fn native_members_are_public(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    for (id, member) in ctx.program.members_of(ty) {
        if member.export == ExportKind::Overlay {
            continue;
        }
        let hidden = if member.is_constructor() {
            member.is_ignored
        } else {
            member.is_ignored || !member.visibility.is_public()
        };
        if hidden {
            let violation = Violation::NativeMemberNotPublic {
                member: ctx.signature(id)?,
            };
            ctx.report(out, violation, ctx.at_member(id)?);
        }
    }
    Ok(())
}

fn native_type_has_no_static_initializer(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    if has_static_initializer(ctx, ty, entry) {
        let type_name = entry.qualified_name.clone();
        report_type(ctx, out, ty, Violation::NativeStaticInitializer { type_name })?;
    }
    Ok(())
}

fn native_constructors_are_empty(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    // Instance initializers run as part of every constructor.
    let initializes_fields = entry.has_instance_initializer
        || ctx.program.members_of(ty).any(|(_, m)| {
            !m.is_static
                && m.as_field()
                    .is_some_and(|f| f.initializer != FieldInitializer::None)
        });

    for (id, member) in ctx.program.members_of(ty) {
        let Some(method) = member.as_method().filter(|m| m.is_constructor) else {
            continue;
        };
        if !method.body.is_empty || initializes_fields {
            let violation = Violation::NativeConstructorBody {
                member: ctx.signature(id)?,
            };
            ctx.report(out, violation, ctx.at_member(id)?);
        }
    }
    Ok(())
}

// === Overlays ===

fn overlays_are_additive(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let entry = ctx.type_entry(ty)?;
    let mut in_native_hierarchy = false;
    for ancestor in ctx.program.hierarchy().ancestry(ty) {
        if ctx.type_entry(*ancestor)?.is_native() {
            in_native_hierarchy = true;
            break;
        }
    }

    for (id, member) in ctx.program.members_of(ty) {
        if member.export != ExportKind::Overlay {
            continue;
        }
        let signature = ctx.signature(id)?;
        let violation = if !in_native_hierarchy {
            Violation::OverlayInNonNativeType { member: signature }
        } else if !member.is_method() {
            continue;
        } else if overrides_ancestor(ctx, ty, member) {
            Violation::OverlayOverrides { member: signature }
        } else if !is_effectively_final(entry, member) || member.is_static || member.is_native {
            Violation::OverlayModifiers { member: signature }
        } else {
            continue;
        };
        ctx.report(out, violation, ctx.at_member(id)?);
    }
    Ok(())
}

fn overrides_ancestor(ctx: &CheckContext<'_>, ty: TypeId, member: &MemberEntry) -> bool {
    ctx.program
        .hierarchy()
        .ancestry(ty)
        .iter()
        .skip(1)
        .flat_map(|ancestor| ctx.program.members_of(*ancestor))
        .any(|(_, candidate)| candidate.is_overridable_method() && candidate.same_signature(member))
}

fn is_effectively_final(owner: &TypeEntry, member: &MemberEntry) -> bool {
    member.is_final || owner.is_final || member.visibility.is_private()
}

// === Any type ===

fn no_instanceof_native_interface(
    ctx: &CheckContext<'_>,
    ty: TypeId,
    out: &mut Diagnostics,
) -> Result<(), CheckError> {
    let file = ctx.type_entry(ty)?.file.clone();
    for (id, member) in ctx.program.members_of(ty) {
        let Some(method) = member.as_method() else {
            continue;
        };
        for check in &method.body.instance_of_checks {
            let target = ctx.type_entry(check.target)?;
            if target.is_native() && target.is_interface() {
                let violation = Violation::InstanceOfNativeInterface {
                    type_name: target.qualified_name.clone(),
                };
                let placement = Placement::new(file.clone(), check.span)
                    .about_member(id)
                    .about_type(check.target);
                ctx.report(out, violation, placement);
            }
        }
    }
    Ok(())
}
