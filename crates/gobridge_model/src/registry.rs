//! The append-only type registry.
//!
//! Holds every node of one projection run and resolves fully-qualified
//! names to ids. Nodes are appended during the build phase and never
//! removed or mutated afterwards; all cross-references stay name-based and
//! are resolved through the index on access, so the graph needs no shared
//! mutable back-pointers.

use crate::node::TypeNode;
use gobridge_core::ids::TypeId;
use gobridge_core::intern::{Interner, Name};
use rustc_hash::FxHashMap;

/// The shared, read-only view of a fully-loaded type graph.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    interner: Interner,
    nodes: Vec<TypeNode>,
    by_fqn: FxHashMap<Name, TypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The interner every name in this registry was interned with.
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Append a node. Duplicate fully-qualified names are the loader's
    /// responsibility to reject before the graph reaches the engine.
    pub fn add(&mut self, node: TypeNode) -> TypeId {
        let id = TypeId::new(self.nodes.len());
        self.by_fqn.insert(node.fqn, id);
        self.nodes.push(node);
        id
    }

    /// Resolve a fully-qualified name to its node id, if loaded.
    pub fn resolve(&self, fqn: Name) -> Option<TypeId> {
        self.by_fqn.get(&fqn).copied()
    }

    pub fn get(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.nodes.len()).map(TypeId::new)
    }

    /// Resolve a name back to text. Convenience over `interner().resolve`.
    pub fn text(&self, name: Name) -> &str {
        self.interner.resolve(name)
    }
}
