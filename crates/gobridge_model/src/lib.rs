//! gobridge_model: the resolved type graph.
//!
//! Defines the language-agnostic description of an object-oriented API
//! surface (classes, interfaces, members, type references) and the
//! append-only registry that holds one projection run's worth of nodes.
//! The graph is built once by the loader, then shared read-only with every
//! downstream component; nothing in this crate mutates after build.

pub mod node;
pub mod registry;
pub mod types;

pub use node::{TypeKind, TypeNode, TypeNodeBuilder};
pub use registry::TypeRegistry;
pub use types::{Constructor, Method, Parameter, Primitive, Property, Signature, TypeRef};
