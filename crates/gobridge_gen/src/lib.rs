//! gobridge_gen: declaration generation.
//!
//! Turns one resolved type node into its target-language representation:
//! the capability interface, the proxy structure with its forwarding
//! stubs, constructor and static free functions, and the registration
//! record binding the generated type back to the runtime bridge. The
//! output is pure data; writing files is the caller's concern.

pub mod ctor;
pub mod proxy;
pub mod register;
pub mod writer;

use gobridge_ancestry::{AncestorResolver, AncestorSet, Flattener, ProjectionPlan};
use gobridge_core::ids::TypeId;
use gobridge_core::intern::Name;
use gobridge_diagnostics::ProjectionError;
use gobridge_model::{TypeNode, TypeRegistry};
use gobridge_project::MemberProjector;
use serde::Serialize;
use std::sync::Arc;

/// What a generated declaration is, for the downstream emission layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum DeclarationKind {
    Interface,
    ProxyStruct,
    Constructor,
    StaticFunction,
    Registration,
}

/// One named, ordered piece of target-language text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub text: String,
}

/// Everything generated for one class or interface node. Created once per
/// node during a projection run, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedType {
    pub fqn: String,
    pub declarations: Vec<Declaration>,
}

/// Shared per-node generation context handed to the emitters.
pub(crate) struct GenCtx<'a> {
    pub registry: &'a TypeRegistry,
    pub id: TypeId,
    pub node: &'a TypeNode,
    pub projector: MemberProjector<'a>,
    pub ancestors: Arc<AncestorSet>,
    pub plan: Arc<ProjectionPlan>,
}

impl<'a> GenCtx<'a> {
    /// Resolve a direct ancestor reference. The ancestor resolver already
    /// walked these, so failure here means the graph changed under us.
    pub fn resolve(&self, name: Name) -> Result<TypeId, ProjectionError> {
        self.registry.resolve(name).ok_or_else(|| ProjectionError::UnresolvedReference {
            name: self.registry.text(name).to_string(),
            referenced_by: self.registry.text(self.node.fqn).to_string(),
        })
    }

    /// Exported simple name of the node, e.g. `Widget`.
    pub fn type_name(&self) -> String {
        self.projector.capability_name(self.id)
    }

    pub fn fqn_text(&self) -> &str {
        self.registry.text(self.node.fqn)
    }
}

/// Generates the full declaration set for single nodes.
pub struct TypeGenerator<'a> {
    registry: &'a TypeRegistry,
    resolver: &'a AncestorResolver<'a>,
    flattener: &'a Flattener<'a>,
}

impl<'a> TypeGenerator<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        resolver: &'a AncestorResolver<'a>,
        flattener: &'a Flattener<'a>,
    ) -> Self {
        Self {
            registry,
            resolver,
            flattener,
        }
    }

    /// Project one node into its generated declarations.
    ///
    /// Fails atomically: any error means no partial output for this node.
    /// The registration record is appended last, after every name it
    /// references has been finalized.
    pub fn generate(&self, id: TypeId) -> Result<GeneratedType, ProjectionError> {
        let node = self.registry.get(id);
        let ctx = GenCtx {
            registry: self.registry,
            id,
            node,
            projector: MemberProjector::for_node(self.registry, id),
            ancestors: self.resolver.ancestors(id)?,
            plan: self.flattener.plan(id)?,
        };

        let mut declarations = Vec::new();
        declarations.push(proxy::capability_interface(&ctx)?);
        declarations.push(proxy::proxy_struct(&ctx)?);
        if let Some(constructor) = ctor::construction_function(&ctx)? {
            declarations.push(constructor);
        }
        declarations.extend(proxy::static_functions(&ctx)?);
        declarations.push(register::registration(&ctx)?);

        Ok(GeneratedType {
            fqn: ctx.fqn_text().to_string(),
            declarations,
        })
    }
}
