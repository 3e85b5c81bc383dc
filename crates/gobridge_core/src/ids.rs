//! Typed index ids.
//!
//! The type registry is an append-only vector; ids are plain indices into
//! it. Newtypes keep class ids from being mixed up with ordinary integers.

use std::fmt;

/// Identifies a type node (class or interface) in the registry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
