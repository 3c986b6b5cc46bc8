//! Rendering members and types the way diagnostics spell them.
//!
//! - methods: `void EntryPoint.Buggy.show(int, String)`
//! - constructors: `EntryPoint.Buggy.EntryPoint$Buggy(int)`
//! - fields: `int EntryPoint.Buggy.foo`

use jsinterop_core::{CheckError, DataType, MemberId, MemberKind};
use jsinterop_registry::Program;

/// Render a data type, naming declared types by qualified name.
pub fn render_type(program: &Program, ty: &DataType) -> String {
    ty.render(&|id| {
        program
            .get_type(id)
            .map(|entry| entry.qualified_name.clone())
            .unwrap_or_else(|| id.to_string())
    })
}

/// Render a member's signature.
pub fn render_member(program: &Program, id: MemberId) -> Result<String, CheckError> {
    let member = program.member(id)?;
    let owner = &program.owner_entry(id)?.qualified_name;
    Ok(match &member.kind {
        MemberKind::Field(field) => {
            format!("{} {}.{}", render_type(program, &field.ty), owner, member.name)
        }
        MemberKind::Method(method) => {
            let params = method
                .params
                .iter()
                .map(|p| render_type(program, &p.ty))
                .collect::<Vec<_>>()
                .join(", ");
            if method.is_constructor {
                format!("{}.{}({})", owner, member.name, params)
            } else {
                format!(
                    "{} {}.{}({})",
                    render_type(program, &method.return_type),
                    owner,
                    member.name,
                    params
                )
            }
        }
    })
}
