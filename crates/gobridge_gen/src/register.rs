//! Registration records.
//!
//! The registration is the dynamic-dispatch bootstrap: it binds the
//! class's stable identifier to the reflective descriptor of its proxy
//! structure and to a proxy-maker callback the runtime bridge uses to
//! materialize receivers for upcalls into generated overrides. Emitted
//! exactly once per node, last, because it references finalized names.

use crate::writer::CodeWriter;
use crate::{Declaration, DeclarationKind, GenCtx};
use gobridge_diagnostics::ProjectionError;
use gobridge_model::TypeKind;
use gobridge_project::{go_export, simple_name};

pub(crate) fn registration(ctx: &GenCtx<'_>) -> Result<Declaration, ProjectionError> {
    let type_name = ctx.type_name();
    let proxy_name = ctx.projector.proxy_name(ctx.id);
    let register_fn = match ctx.node.kind {
        TypeKind::Class => "RegisterClass",
        TypeKind::Interface => "RegisterInterface",
    };

    let mut w = CodeWriter::new();
    w.open("func init()");
    w.line(&format!("rtbridge.{}(", register_fn));
    w.indent();
    w.line(&format!("\"{}\",", ctx.fqn_text()));
    w.line(&format!("reflect.TypeOf((*{})(nil)).Elem(),", type_name));
    w.open("func() interface{}");
    w.line(&format!("p := {}{{}}", proxy_name));
    for ancestor in ctx.node.direct_ancestors() {
        let ancestor_id = ctx.resolve(ancestor)?;
        // The embedded field is the local proxy struct or, for foreign
        // ancestors, the interface's own field name.
        let field = if ctx.projector.is_local(ancestor_id) {
            ctx.projector.proxy_name(ancestor_id)
        } else {
            let fqn = ctx.registry.text(ctx.registry.get(ancestor_id).fqn);
            go_export(simple_name(fqn))
        };
        w.line(&format!("rtbridge.InitProxy(&p.{})", field));
    }
    w.line("return &p");
    w.close_with(",");
    w.dedent();
    w.line(")");
    w.close();

    Ok(Declaration {
        kind: DeclarationKind::Registration,
        name: format!("init:{}", ctx.fqn_text()),
        text: w.finish(),
    })
}

#[cfg(test)]
mod tests {
    use crate::{DeclarationKind, TypeGenerator};
    use gobridge_ancestry::{AncestorResolver, Flattener};
    use gobridge_model::{TypeNodeBuilder, TypeRegistry};

    #[test]
    fn test_registration_wires_ancestor_proxies() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        registry.add(TypeNodeBuilder::class(&interner, "acme.Base", "acme").build());
        registry.add(TypeNodeBuilder::interface(&interner, "modb.Mixin", "modb").build());
        let id = registry.add(
            TypeNodeBuilder::class(&interner, "acme.Widget", "acme")
                .base(&interner, "acme.Base")
                .implements(&interner, "modb.Mixin")
                .build(),
        );
        let resolver = AncestorResolver::new(&registry);
        let flattener = Flattener::new(&resolver);
        let generated = TypeGenerator::new(&registry, &resolver, &flattener)
            .generate(id)
            .unwrap();
        let reg = generated
            .declarations
            .iter()
            .find(|d| d.kind == DeclarationKind::Registration)
            .unwrap();
        assert!(reg.text.contains("rtbridge.RegisterClass("));
        assert!(reg.text.contains("\"acme.Widget\","));
        assert!(reg.text.contains("reflect.TypeOf((*Widget)(nil)).Elem(),"));
        assert!(reg.text.contains("rtbridge.InitProxy(&p.proxy_Base)"));
        assert!(reg.text.contains("rtbridge.InitProxy(&p.Mixin)"));
        // Registration comes after every member declaration.
        assert_eq!(generated.declarations.last().unwrap().kind, DeclarationKind::Registration);
    }

    #[test]
    fn test_interface_nodes_register_as_interfaces() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        let id = registry.add(TypeNodeBuilder::interface(&interner, "acme.Printable", "acme").build());
        let resolver = AncestorResolver::new(&registry);
        let flattener = Flattener::new(&resolver);
        let generated = TypeGenerator::new(&registry, &resolver, &flattener)
            .generate(id)
            .unwrap();
        let reg = generated.declarations.last().unwrap();
        assert!(reg.text.contains("rtbridge.RegisterInterface("));
    }
}
