//! gobridge_ancestry: ancestor resolution and conflict flattening.
//!
//! Computes, per class, the ordered base chain and transitive interface
//! set, decides whether the target language's single-embedding model can
//! express the inheritance graph directly, and when it cannot, enumerates
//! the inherited members that must be re-declared locally. Both results
//! are computed at most once per class and cached for the run.

pub mod ancestors;
pub mod flatten;

pub use ancestors::{AncestorResolver, AncestorSet};
pub use flatten::{Flattener, InheritedKind, InheritedMember, ProjectionPlan};
