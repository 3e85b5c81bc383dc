//! Conflict flattening.
//!
//! When a class has several direct ancestors and foreign assemblies are
//! involved, embedding alone cannot decide which promoted member satisfies
//! the capability interface. The flattener enumerates every inherited
//! non-static member so the generator can re-declare each one locally with
//! an explicit forwarding implementation.

use crate::ancestors::AncestorResolver;
use dashmap::DashMap;
use gobridge_core::ids::TypeId;
use gobridge_core::intern::Name;
use gobridge_diagnostics::ProjectionError;
use gobridge_model::{Method, Property, Signature};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// An inherited method or property, tagged with the node that originally
/// declared it.
#[derive(Debug, Clone)]
pub struct InheritedMember {
    pub defined_on: TypeId,
    pub kind: InheritedKind,
}

#[derive(Debug, Clone)]
pub enum InheritedKind {
    Method(Method),
    Property(Property),
}

impl InheritedMember {
    pub fn name(&self) -> Name {
        match &self.kind {
            InheritedKind::Method(m) => m.name,
            InheritedKind::Property(p) => p.name,
        }
    }

    pub fn signature(&self) -> Signature {
        match &self.kind {
            InheritedKind::Method(m) => m.signature(),
            InheritedKind::Property(p) => p.signature(),
        }
    }
}

/// The per-class decision: promote through embedding, or re-declare
/// inherited members locally.
#[derive(Debug, Clone, Default)]
pub struct ProjectionPlan {
    pub requires_flattening: bool,
    /// Members to re-declare and re-implement locally. Empty unless
    /// flattening is required. Ordered base-chain group first, then
    /// interface group, each sorted by member name.
    pub reimplemented: Vec<InheritedMember>,
}

/// Derives projection plans, memoized per class for the run.
pub struct Flattener<'a> {
    resolver: &'a AncestorResolver<'a>,
    cache: DashMap<TypeId, Arc<ProjectionPlan>>,
}

impl<'a> Flattener<'a> {
    pub fn new(resolver: &'a AncestorResolver<'a>) -> Self {
        Self {
            resolver,
            cache: DashMap::new(),
        }
    }

    /// The projection plan for `id`, computed on first request.
    pub fn plan(&self, id: TypeId) -> Result<Arc<ProjectionPlan>, ProjectionError> {
        if let Some(cached) = self.cache.get(&id) {
            return Ok(Arc::clone(&cached));
        }
        let plan = Arc::new(self.compute(id)?);
        self.cache.insert(id, Arc::clone(&plan));
        Ok(plan)
    }

    fn compute(&self, id: TypeId) -> Result<ProjectionPlan, ProjectionError> {
        let ancestors = self.resolver.ancestors(id)?;
        if !ancestors.requires_flattening() {
            return Ok(ProjectionPlan::default());
        }

        let registry = self.resolver.registry();
        let node = registry.get(id);

        // Members the class declares itself shadow anything inherited
        // under the same name; they are never re-implemented.
        let mut own_names: FxHashSet<Name> = FxHashSet::default();
        let mut seen: FxHashSet<Signature> = FxHashSet::default();
        for m in node.methods.iter().filter(|m| !m.is_static) {
            own_names.insert(m.name);
            seen.insert(m.signature());
        }
        for p in node.properties.iter().filter(|p| !p.is_static) {
            own_names.insert(p.name);
            seen.insert(p.signature());
        }

        // Same inherited name arriving with two different signatures means
        // the flattening logic could not pick a single implementation.
        let mut by_name: FxHashMap<Name, Signature> = FxHashMap::default();

        let collect_from = |from: TypeId,
                                seen: &mut FxHashSet<Signature>,
                                by_name: &mut FxHashMap<Name, Signature>,
                                out: &mut Vec<InheritedMember>|
         -> Result<(), ProjectionError> {
            let ancestor = registry.get(from);
            let members = ancestor
                .methods
                .iter()
                .filter(|m| !m.is_static)
                .map(|m| InheritedKind::Method(m.clone()))
                .chain(
                    ancestor
                        .properties
                        .iter()
                        .filter(|p| !p.is_static)
                        .map(|p| InheritedKind::Property(p.clone())),
                );
            for kind in members {
                let member = InheritedMember { defined_on: from, kind };
                let name = member.name();
                if own_names.contains(&name) {
                    continue;
                }
                let signature = member.signature();
                if seen.contains(&signature) {
                    continue;
                }
                if let Some(prior) = by_name.get(&name) {
                    if *prior != signature {
                        return Err(ProjectionError::AmbiguousPromotion {
                            class: registry.text(node.fqn).to_string(),
                            member: registry.text(name).to_string(),
                        });
                    }
                }
                seen.insert(signature.clone());
                by_name.insert(name, signature);
                out.push(member);
            }
            Ok(())
        };

        // Base-chain group, nearest declaration winning the defined_on tag.
        let mut base_group = Vec::new();
        for &base_id in ancestors.base_chain.iter().rev() {
            collect_from(base_id, &mut seen, &mut by_name, &mut base_group)?;
        }
        sort_by_name(registry, &mut base_group);

        let mut iface_group = Vec::new();
        for &iface_id in &ancestors.interfaces {
            collect_from(iface_id, &mut seen, &mut by_name, &mut iface_group)?;
        }
        sort_by_name(registry, &mut iface_group);

        let mut reimplemented = base_group;
        reimplemented.extend(iface_group);
        Ok(ProjectionPlan {
            requires_flattening: true,
            reimplemented,
        })
    }
}

fn sort_by_name(registry: &gobridge_model::TypeRegistry, group: &mut [InheritedMember]) {
    group.sort_by(|a, b| registry.text(a.name()).cmp(registry.text(b.name())));
}
