//! Ancestor resolution.

use dashmap::DashMap;
use gobridge_core::ids::TypeId;
use gobridge_core::intern::Name;
use gobridge_diagnostics::ProjectionError;
use gobridge_model::TypeRegistry;
use indexmap::IndexSet;
use std::sync::Arc;

/// The derived ancestry of one class: ordered base chain plus the full
/// transitive interface set.
#[derive(Debug, Clone)]
pub struct AncestorSet {
    /// Base classes, root-first. Empty for interfaces and base-less classes.
    pub base_chain: Vec<TypeId>,
    /// Every interface reachable from the class or its base chain,
    /// deduplicated, in first-discovery order.
    pub interfaces: Vec<TypeId>,
    /// Direct ancestor contributions: the base clause plus each
    /// directly-implemented interface.
    pub direct_count: usize,
    /// Whether any ancestor, transitive included, was defined in a
    /// different assembly than the class itself.
    pub has_foreign: bool,
}

impl AncestorSet {
    /// Single embedding cannot disambiguate promoted members when more than
    /// one direct ancestor exists and foreign assemblies are involved.
    pub fn requires_flattening(&self) -> bool {
        self.direct_count > 1 && self.has_foreign
    }

    /// Every ancestor id: base chain first (root-first), then interfaces.
    pub fn all(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.base_chain.iter().chain(self.interfaces.iter()).copied()
    }
}

/// Resolves ancestor sets against a registry, memoizing per class.
///
/// A pure function of the graph: the cache only ever stores the one result
/// a class can have, so concurrent computation of the same entry is
/// harmless.
pub struct AncestorResolver<'a> {
    registry: &'a TypeRegistry,
    cache: DashMap<TypeId, Arc<AncestorSet>>,
}

impl<'a> AncestorResolver<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            cache: DashMap::new(),
        }
    }

    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// The ancestor set for `id`, computed on first request.
    pub fn ancestors(&self, id: TypeId) -> Result<Arc<AncestorSet>, ProjectionError> {
        if let Some(cached) = self.cache.get(&id) {
            return Ok(Arc::clone(&cached));
        }
        let set = Arc::new(self.compute(id)?);
        self.cache.insert(id, Arc::clone(&set));
        Ok(set)
    }

    fn resolve(&self, name: Name, referenced_by: TypeId) -> Result<TypeId, ProjectionError> {
        self.registry.resolve(name).ok_or_else(|| ProjectionError::UnresolvedReference {
            name: self.registry.text(name).to_string(),
            referenced_by: self.registry.text(self.registry.get(referenced_by).fqn).to_string(),
        })
    }

    fn compute(&self, id: TypeId) -> Result<AncestorSet, ProjectionError> {
        let node = self.registry.get(id);

        // Walk the base chain to the root. The input invariant guarantees
        // an acyclic graph, so the walk terminates.
        let mut base_chain = Vec::new();
        let mut cursor = id;
        while let Some(base_name) = self.registry.get(cursor).base {
            let base_id = self.resolve(base_name, cursor)?;
            base_chain.push(base_id);
            cursor = base_id;
        }
        base_chain.reverse();

        // Union the interfaces of the class and of every base, transitively
        // through interface extension, keeping first-discovery order.
        let mut interfaces: IndexSet<TypeId> = IndexSet::new();
        self.collect_interfaces(id, &mut interfaces)?;
        for &base_id in &base_chain {
            self.collect_interfaces(base_id, &mut interfaces)?;
        }

        let own_assembly = node.assembly;
        let has_foreign = base_chain
            .iter()
            .chain(interfaces.iter())
            .any(|&a| self.registry.get(a).assembly != own_assembly);

        Ok(AncestorSet {
            base_chain,
            interfaces: interfaces.into_iter().collect(),
            direct_count: node.direct_ancestor_count(),
            has_foreign,
        })
    }

    fn collect_interfaces(
        &self,
        of: TypeId,
        out: &mut IndexSet<TypeId>,
    ) -> Result<(), ProjectionError> {
        let names: Vec<Name> = self.registry.get(of).interfaces.clone();
        for name in names {
            let iface_id = self.resolve(name, of)?;
            if out.insert(iface_id) {
                self.collect_interfaces(iface_id, out)?;
            }
        }
        Ok(())
    }
}
