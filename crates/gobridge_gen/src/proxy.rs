//! Capability interface and proxy structure emission.
//!
//! The interface is the public contract other generated code references;
//! the proxy structure is the concrete handle type behind it. Inherited
//! behavior arrives through embedding promotion unless the projection plan
//! flattened it, in which case explicit local stubs shadow the promotion.

use crate::writer::CodeWriter;
use crate::{Declaration, DeclarationKind, GenCtx};
use gobridge_ancestry::InheritedKind;
use gobridge_diagnostics::ProjectionError;
use gobridge_project::{ProjectedProperty, ProjectedSignature};

/// The public capability contract for one node.
pub(crate) fn capability_interface(ctx: &GenCtx<'_>) -> Result<Declaration, ProjectionError> {
    let name = ctx.type_name();
    let mut w = CodeWriter::new();
    emit_docs(&mut w, ctx.node.docs.as_deref());
    w.open(&format!("type {} interface", name));

    // Embedded ancestor contracts: base first, then interfaces in
    // declared order.
    for ancestor in ctx.node.direct_ancestors() {
        let ancestor_id = ctx.resolve(ancestor)?;
        w.line(&ctx.projector.capability_name(ancestor_id));
    }

    for method in ctx.node.methods.iter().filter(|m| !m.is_static) {
        let sig = ctx.projector.project_method(method)?;
        w.line(&method_line(&sig));
    }
    for property in ctx.node.properties.iter().filter(|p| !p.is_static) {
        let prop = ctx.projector.project_property(property)?;
        w.line(&format!("{}() {}", prop.getter, prop.value_ty));
        if let Some(setter) = &prop.setter {
            w.line(&format!("{}(value {})", setter, prop.value_ty));
        }
    }

    w.close();
    Ok(Declaration {
        kind: DeclarationKind::Interface,
        name,
        text: w.finish(),
    })
}

/// The concrete proxy structure plus its forwarding stubs.
pub(crate) fn proxy_struct(ctx: &GenCtx<'_>) -> Result<Declaration, ProjectionError> {
    let name = ctx.projector.proxy_name(ctx.id);
    let mut w = CodeWriter::new();

    w.open(&format!("type {} struct", name));
    let fields = embedded_fields(ctx)?;
    if fields.is_empty() {
        // A zero-ancestor proxy must stay non-zero-width so distinct
        // instances stay distinguishable in the target's type system.
        w.line("_ byte");
    } else {
        for field in &fields {
            w.line(field);
        }
    }
    w.close();

    // Own instance members always get local stubs; embedding only ever
    // supplies inherited behavior.
    for method in ctx.node.methods.iter().filter(|m| !m.is_static) {
        let sig = ctx.projector.project_method(method)?;
        w.blank();
        emit_method_stub(&mut w, &name, &sig);
    }
    for property in ctx.node.properties.iter().filter(|p| !p.is_static) {
        let prop = ctx.projector.project_property(property)?;
        w.blank();
        emit_property_stubs(&mut w, &name, &prop);
    }

    // Flattened inherited members: re-declared locally, shadowing the
    // ambiguous promotion, forwarding exactly like own members.
    for inherited in &ctx.plan.reimplemented {
        match &inherited.kind {
            InheritedKind::Method(method) => {
                let sig = ctx.projector.project_method(method)?;
                w.blank();
                emit_method_stub(&mut w, &name, &sig);
            }
            InheritedKind::Property(property) => {
                let prop = ctx.projector.project_property(property)?;
                w.blank();
                emit_property_stubs(&mut w, &name, &prop);
            }
        }
    }

    Ok(Declaration {
        kind: DeclarationKind::ProxyStruct,
        name,
        text: w.finish(),
    })
}

/// Free functions for the node's static members, one declaration per
/// member, scoped by the owning type's name.
pub(crate) fn static_functions(ctx: &GenCtx<'_>) -> Result<Vec<Declaration>, ProjectionError> {
    let mut declarations = Vec::new();
    let fqn = ctx.fqn_text().to_string();

    for method in ctx.node.methods.iter().filter(|m| m.is_static) {
        let sig = ctx.projector.project_method(method)?;
        let fn_name = ctx.projector.static_function_name(ctx.id, method.name);
        let mut w = CodeWriter::new();
        match &sig.returns {
            Some(ret) => {
                w.open(&format!("func {}({}) {}", fn_name, sig.params_text(), ret));
                w.line(&format!("var returns {}", ret));
                w.line(&format!(
                    "rtbridge.StaticInvoke(\"{}\", \"{}\", {}, &returns)",
                    fqn,
                    sig.source_name,
                    args_literal(&sig)
                ));
                w.line("return returns");
            }
            None => {
                w.open(&format!("func {}({})", fn_name, sig.params_text()));
                w.line(&format!(
                    "rtbridge.StaticInvokeVoid(\"{}\", \"{}\", {})",
                    fqn,
                    sig.source_name,
                    args_literal(&sig)
                ));
            }
        }
        w.close();
        declarations.push(Declaration {
            kind: DeclarationKind::StaticFunction,
            name: fn_name,
            text: w.finish(),
        });
    }

    for property in ctx.node.properties.iter().filter(|p| p.is_static) {
        let prop = ctx.projector.project_property(property)?;
        let fn_name = ctx.projector.static_function_name(ctx.id, property.name);
        let mut w = CodeWriter::new();
        w.open(&format!("func {}() {}", fn_name, prop.value_ty));
        w.line(&format!("var returns {}", prop.value_ty));
        w.line(&format!(
            "rtbridge.StaticGet(\"{}\", \"{}\", &returns)",
            fqn, prop.source_name
        ));
        w.line("return returns");
        w.close();
        if prop.setter.is_some() {
            let owner = ctx.type_name();
            w.blank();
            w.open(&format!(
                "func {}_Set{}(value {})",
                owner,
                gobridge_project::go_export(&prop.source_name),
                prop.value_ty
            ));
            w.line(&format!(
                "rtbridge.StaticSet(\"{}\", \"{}\", value)",
                fqn, prop.source_name
            ));
            w.close();
        }
        declarations.push(Declaration {
            kind: DeclarationKind::StaticFunction,
            name: fn_name,
            text: w.finish(),
        });
    }

    Ok(declarations)
}

/// The embedded field spellings of the proxy struct, in embedding order:
/// base first, then interfaces in declared order. Same-assembly ancestors
/// embed their proxy structure, foreign ones their capability interface.
pub(crate) fn embedded_fields(ctx: &GenCtx<'_>) -> Result<Vec<String>, ProjectionError> {
    let mut fields = Vec::new();
    for ancestor in ctx.node.direct_ancestors() {
        let ancestor_id = ctx.resolve(ancestor)?;
        if ctx.projector.is_local(ancestor_id) {
            fields.push(ctx.projector.proxy_name(ancestor_id));
        } else {
            fields.push(ctx.projector.capability_name(ancestor_id));
        }
    }
    Ok(fields)
}

fn method_line(sig: &ProjectedSignature) -> String {
    match &sig.returns {
        Some(ret) => format!("{}({}) {}", sig.go_name, sig.params_text(), ret),
        None => format!("{}({})", sig.go_name, sig.params_text()),
    }
}

/// A forwarding method body: delegate to the bridge, passing the receiver,
/// the member identity and the projected arguments.
fn emit_method_stub(w: &mut CodeWriter, proxy: &str, sig: &ProjectedSignature) {
    match &sig.returns {
        Some(ret) => {
            w.open(&format!(
                "func (p *{}) {}({}) {}",
                proxy,
                sig.go_name,
                sig.params_text(),
                ret
            ));
            w.line(&format!("var returns {}", ret));
            w.line(&format!(
                "rtbridge.Invoke(p, \"{}\", {}, &returns)",
                sig.source_name,
                args_literal(sig)
            ));
            w.line("return returns");
        }
        None => {
            w.open(&format!(
                "func (p *{}) {}({})",
                proxy,
                sig.go_name,
                sig.params_text()
            ));
            w.line(&format!(
                "rtbridge.InvokeVoid(p, \"{}\", {})",
                sig.source_name,
                args_literal(sig)
            ));
        }
    }
    w.close();
}

fn emit_property_stubs(w: &mut CodeWriter, proxy: &str, prop: &ProjectedProperty) {
    w.open(&format!("func (p *{}) {}() {}", proxy, prop.getter, prop.value_ty));
    w.line(&format!("var returns {}", prop.value_ty));
    w.line(&format!("rtbridge.Get(p, \"{}\", &returns)", prop.source_name));
    w.line("return returns");
    w.close();
    if let Some(setter) = &prop.setter {
        w.blank();
        w.open(&format!("func (p *{}) {}(value {})", proxy, setter, prop.value_ty));
        w.line(&format!("rtbridge.Set(p, \"{}\", value)", prop.source_name));
        w.close();
    }
}

fn args_literal(sig: &ProjectedSignature) -> String {
    let names: Vec<&str> = sig.parameters.iter().map(|p| p.name.as_str()).collect();
    format!("[]interface{{}}{{{}}}", names.join(", "))
}

fn emit_docs(w: &mut CodeWriter, docs: Option<&str>) {
    if let Some(docs) = docs {
        for line in docs.lines() {
            w.line(&format!("// {}", line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeGenerator;
    use gobridge_ancestry::{AncestorResolver, Flattener};
    use gobridge_core::ids::TypeId;
    use gobridge_model::{Method, Primitive, Property, TypeNodeBuilder, TypeRef, TypeRegistry};

    fn generate(registry: &TypeRegistry, id: TypeId) -> crate::GeneratedType {
        let resolver = AncestorResolver::new(registry);
        let flattener = Flattener::new(&resolver);
        TypeGenerator::new(registry, &resolver, &flattener)
            .generate(id)
            .unwrap()
    }

    fn find(generated: &crate::GeneratedType, kind: DeclarationKind) -> &Declaration {
        generated
            .declarations
            .iter()
            .find(|d| d.kind == kind)
            .expect("declaration kind missing")
    }

    #[test]
    fn test_zero_ancestor_proxy_has_placeholder() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        let id = registry.add(TypeNodeBuilder::class(&interner, "acme.Point", "acme").build());
        let generated = generate(&registry, id);
        let proxy = find(&generated, DeclarationKind::ProxyStruct);
        assert!(proxy.text.contains("type proxy_Point struct {\n\t_ byte\n}"));
    }

    #[test]
    fn test_interface_embeds_ancestors_base_first() {
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
        let generated = generate(&registry, id);
        let iface = find(&generated, DeclarationKind::Interface);
        let base_at = iface.text.find("\tBase\n").unwrap();
        let mixin_at = iface.text.find("\tmodb.Mixin\n").unwrap();
        assert!(base_at < mixin_at);
    }

    #[test]
    fn test_proxy_embeds_local_proxy_and_foreign_interface() {
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
        let generated = generate(&registry, id);
        let proxy = find(&generated, DeclarationKind::ProxyStruct);
        assert!(proxy.text.contains("\tproxy_Base\n"));
        assert!(proxy.text.contains("\tmodb.Mixin\n"));
    }

    #[test]
    fn test_flattened_members_get_local_stubs() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        registry.add(
            TypeNodeBuilder::class(&interner, "acme.Base", "acme")
                .method(Method {
                    name: interner.intern("greet"),
                    is_static: false,
                    parameters: vec![],
                    returns: Some(TypeRef::Primitive(Primitive::String)),
                })
                .build(),
        );
        registry.add(
            TypeNodeBuilder::interface(&interner, "modb.Mixin", "modb")
                .method(Method {
                    name: interner.intern("wave"),
                    is_static: false,
                    parameters: vec![],
                    returns: None,
                })
                .build(),
        );
        let id = registry.add(
            TypeNodeBuilder::class(&interner, "acme.Widget", "acme")
                .base(&interner, "acme.Base")
                .implements(&interner, "modb.Mixin")
                .build(),
        );
        let generated = generate(&registry, id);
        let proxy = find(&generated, DeclarationKind::ProxyStruct);
        // Both inherited members are re-implemented on the Widget proxy,
        // forwarding to the bridge as if declared locally.
        assert!(proxy.text.contains("func (p *proxy_Widget) Greet() string"));
        assert!(proxy.text.contains("rtbridge.Invoke(p, \"greet\", []interface{}{}, &returns)"));
        assert!(proxy.text.contains("func (p *proxy_Widget) Wave()"));
        assert!(proxy.text.contains("rtbridge.InvokeVoid(p, \"wave\", []interface{}{})"));
    }

    #[test]
    fn test_promoted_members_get_no_stubs() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        registry.add(
            TypeNodeBuilder::interface(&interner, "acme.Printable", "acme")
                .method(Method {
                    name: interner.intern("print"),
                    is_static: false,
                    parameters: vec![],
                    returns: None,
                })
                .build(),
        );
        let id = registry.add(
            TypeNodeBuilder::class(&interner, "acme.Point", "acme")
                .implements(&interner, "acme.Printable")
                .build(),
        );
        let generated = generate(&registry, id);
        let proxy = find(&generated, DeclarationKind::ProxyStruct);
        // Single same-module ancestor: promotion through embedding, no
        // local re-implementation.
        assert!(proxy.text.contains("\tproxy_Printable\n"));
        assert!(!proxy.text.contains("func (p *proxy_Point) Print()"));
    }

    #[test]
    fn test_static_member_emits_scoped_free_function() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        let id = registry.add(
            TypeNodeBuilder::class(&interner, "acme.Widget", "acme")
                .method(Method {
                    name: interner.intern("version"),
                    is_static: true,
                    parameters: vec![],
                    returns: Some(TypeRef::Primitive(Primitive::String)),
                })
                .build(),
        );
        let generated = generate(&registry, id);
        let stat = find(&generated, DeclarationKind::StaticFunction);
        assert_eq!(stat.name, "Widget_Version");
        assert!(stat.text.contains("rtbridge.StaticInvoke(\"acme.Widget\", \"version\""));
        // Statics never leak into the capability interface.
        let iface = find(&generated, DeclarationKind::Interface);
        assert!(!iface.text.contains("Version()"));
    }

    #[test]
    fn test_property_stubs_forward_get_and_set() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        let id = registry.add(
            TypeNodeBuilder::class(&interner, "acme.Widget", "acme")
                .property(Property {
                    name: interner.intern("label"),
                    is_static: false,
                    value: TypeRef::Primitive(Primitive::String),
                    immutable: false,
                })
                .build(),
        );
        let generated = generate(&registry, id);
        let proxy = find(&generated, DeclarationKind::ProxyStruct);
        assert!(proxy.text.contains("rtbridge.Get(p, \"label\", &returns)"));
        assert!(proxy.text.contains("func (p *proxy_Widget) SetLabel(value string)"));
        assert!(proxy.text.contains("rtbridge.Set(p, \"label\", value)"));
    }

    #[test]
    fn test_docs_pass_through_above_interface() {
        let mut registry = TypeRegistry::new();
        let interner = registry.interner().clone();
        let id = registry.add(
            TypeNodeBuilder::class(&interner, "acme.Widget", "acme")
                .docs("A widget.\nRendered remotely.")
                .build(),
        );
        let generated = generate(&registry, id);
        let iface = find(&generated, DeclarationKind::Interface);
        assert!(iface.text.starts_with("// A widget.\n// Rendered remotely.\n"));
    }
}
