//! Construction entry points.

use crate::writer::CodeWriter;
use crate::{Declaration, DeclarationKind, GenCtx};
use gobridge_diagnostics::ProjectionError;
use gobridge_model::TypeKind;

/// The construction function for a class, if it declares a constructor.
///
/// Returns the capability interface type, obtained by invoking the
/// bridge's object-creation primitive with the class's stable identifier.
/// Classes without a declared constructor emit nothing and stay
/// unconstructible from generated code.
pub(crate) fn construction_function(
    ctx: &GenCtx<'_>,
) -> Result<Option<Declaration>, ProjectionError> {
    if ctx.node.kind != TypeKind::Class {
        return Ok(None);
    }
    let Some(constructor) = &ctx.node.constructor else {
        return Ok(None);
    };

    let type_name = ctx.type_name();
    let fn_name = format!("New{}", type_name);

    let mut params = Vec::with_capacity(constructor.parameters.len());
    let mut args = Vec::with_capacity(constructor.parameters.len());
    for p in &constructor.parameters {
        let name = ctx.registry.text(p.name).to_string();
        let ty = ctx.projector.type_spelling(&p.type_ref)?;
        params.push(format!("{} {}", name, ty));
        args.push(name);
    }

    let mut w = CodeWriter::new();
    w.open(&format!("func {}({}) {}", fn_name, params.join(", "), type_name));
    w.line(&format!("var returns {}", type_name));
    w.line(&format!(
        "rtbridge.Create(\"{}\", []interface{{}}{{{}}}, &returns)",
        ctx.fqn_text(),
        args.join(", ")
    ));
    w.line("return returns");
    w.close();

    Ok(Some(Declaration {
        kind: DeclarationKind::Constructor,
        name: fn_name,
        text: w.finish(),
    }))
}
