//! gobridge_diagnostics: error taxonomy and per-class failure reporting.
//!
//! Projection errors are deterministic data, never retried. Two of the
//! three kinds abort the whole run (an unresolved reference means the input
//! graph is invalid; an ambiguous promotion means the engine itself broke
//! an invariant); an unprojectable type fails only the class containing it,
//! and sibling classes keep projecting.

use std::fmt;
use thiserror::Error;

/// Everything that can go wrong while projecting a type graph.
///
/// Errors carry resolved names as plain text so they stay meaningful after
/// the registry that produced them is gone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// A base, interface or member type reference names a type that is not
    /// in the registry. The input graph is invalid; the run is rejected.
    #[error("unresolved reference to '{name}' (referenced by '{referenced_by}')")]
    UnresolvedReference { name: String, referenced_by: String },

    /// A member's value type has no spelling in the target language. Fatal
    /// to the containing class only.
    #[error("type '{type_name}' has no target-language spelling (in class '{class}')")]
    UnprojectableType { type_name: String, class: String },

    /// Flattening decided a member is both promoted and locally
    /// re-implemented with conflicting signatures. Engine bug.
    #[error("ambiguous promotion of member '{member}' on class '{class}'")]
    AmbiguousPromotion { class: String, member: String },
}

impl ProjectionError {
    /// Whether this error invalidates the whole run, as opposed to the
    /// single class it was reported against.
    pub fn is_fatal(&self) -> bool {
        match self {
            ProjectionError::UnresolvedReference { .. } => true,
            ProjectionError::AmbiguousPromotion { .. } => true,
            ProjectionError::UnprojectableType { .. } => false,
        }
    }
}

/// One class's projection failure, reported against its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFailure {
    /// Fully-qualified name of the class that failed.
    pub fqn: String,
    pub error: ProjectionError,
}

impl fmt::Display for ClassFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.fqn, self.error)
    }
}

/// Per-class failures accumulated over one projection run.
///
/// A run with failures still completes for every other class; this set is
/// the precise list of who failed and why.
#[derive(Debug, Clone, Default)]
pub struct FailureSet {
    failures: Vec<ClassFailure>,
}

impl FailureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, fqn: impl Into<String>, error: ProjectionError) {
        self.failures.push(ClassFailure { fqn: fqn.into(), error });
    }

    pub fn extend(&mut self, other: FailureSet) {
        self.failures.extend(other.failures);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[ClassFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<ClassFailure> {
        self.failures
    }

    /// Sort by class name for reproducible reporting.
    pub fn sort(&mut self) {
        self.failures.sort_by(|a, b| a.fqn.cmp(&b.fqn));
    }
}
