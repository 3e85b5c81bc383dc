//! Type nodes: one class or interface declaration each.

use crate::types::{Constructor, Method, Property};
use gobridge_core::intern::{Interner, Name};

/// Whether a node is a class or an interface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
}

/// A single class or interface in the resolved type graph.
///
/// Base and interface references are stored by fully-qualified name and
/// resolved through the registry on access. Member lists keep declaration
/// order; the projection pipeline applies its own ordering rules on top.
#[derive(Debug, Clone)]
pub struct TypeNode {
    pub kind: TypeKind,
    /// Fully-qualified name, e.g. `acme.Widget`.
    pub fqn: Name,
    /// The assembly (module) this node was defined in.
    pub assembly: Name,
    /// Documentation, opaque to the engine and passed through to output.
    pub docs: Option<String>,
    /// Base class reference. Classes only, at most one.
    pub base: Option<Name>,
    /// Implemented (class) or extended (interface) interface references,
    /// in declaration order.
    pub interfaces: Vec<Name>,
    pub methods: Vec<Method>,
    pub properties: Vec<Property>,
    /// Constructor, classes only. A class without one is not directly
    /// constructible from generated code.
    pub constructor: Option<Constructor>,
}

impl TypeNode {
    /// Count of direct ancestor contributions: the base clause (if any)
    /// plus every directly-implemented interface.
    pub fn direct_ancestor_count(&self) -> usize {
        self.interfaces.len() + usize::from(self.base.is_some())
    }

    /// Direct ancestors in embedding order: base first, then interfaces in
    /// declared order.
    pub fn direct_ancestors(&self) -> impl Iterator<Item = Name> + '_ {
        self.base.into_iter().chain(self.interfaces.iter().copied())
    }
}

/// Builder for type nodes.
///
/// The out-of-scope loader (and the test suites) assemble graphs through
/// this; raw struct literals stay private to the crate's callers.
pub struct TypeNodeBuilder {
    node: TypeNode,
}

impl TypeNodeBuilder {
    pub fn class(interner: &Interner, fqn: &str, assembly: &str) -> Self {
        Self::new(interner, TypeKind::Class, fqn, assembly)
    }

    pub fn interface(interner: &Interner, fqn: &str, assembly: &str) -> Self {
        Self::new(interner, TypeKind::Interface, fqn, assembly)
    }

    fn new(interner: &Interner, kind: TypeKind, fqn: &str, assembly: &str) -> Self {
        Self {
            node: TypeNode {
                kind,
                fqn: interner.intern(fqn),
                assembly: interner.intern(assembly),
                docs: None,
                base: None,
                interfaces: Vec::new(),
                methods: Vec::new(),
                properties: Vec::new(),
                constructor: None,
            },
        }
    }

    pub fn docs(mut self, docs: &str) -> Self {
        self.node.docs = Some(docs.to_string());
        self
    }

    pub fn base(mut self, interner: &Interner, fqn: &str) -> Self {
        self.node.base = Some(interner.intern(fqn));
        self
    }

    pub fn implements(mut self, interner: &Interner, fqn: &str) -> Self {
        self.node.interfaces.push(interner.intern(fqn));
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.node.methods.push(method);
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.node.properties.push(property);
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.node.constructor = Some(constructor);
        self
    }

    pub fn build(self) -> TypeNode {
        self.node
    }
}
