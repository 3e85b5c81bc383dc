//! String interning.
//!
//! Fully-qualified type names and member names repeat constantly across the
//! graph (every inherited member carries its defining type's name, every
//! signature compares names). Interning turns those comparisons into O(1)
//! integer equality and lets signatures derive `Hash` cheaply.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// A handle to an interned string. Copyable, comparable and hashable in
/// O(1); resolving back to text requires the owning [`Interner`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Spur);

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.0)
    }
}

/// Thread-safe string interner shared across the whole projection run.
///
/// Cloning is cheap (Arc); the same interner instance is visible to every
/// rayon worker during the parallel projection phase.
#[derive(Clone, Default)]
pub struct Interner {
    rodeo: Arc<ThreadedRodeo>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning the existing handle if it was seen before.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        Name(self.rodeo.get_or_intern(s))
    }

    /// Look up a handle without interning on miss.
    #[inline]
    pub fn get(&self, s: &str) -> Option<Name> {
        self.rodeo.get(s).map(Name)
    }

    /// Resolve a handle back to its text.
    #[inline]
    pub fn resolve(&self, name: Name) -> &str {
        self.rodeo.resolve(&name.0)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner").field("len", &self.len()).finish()
    }
}
