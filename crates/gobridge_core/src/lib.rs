//! gobridge_core: shared primitives for the projection engine.
//!
//! Provides string interning (every type and member name is compared by
//! integer handle, never by string content) and the typed index ids used
//! to address nodes in the type registry.

pub mod ids;
pub mod intern;
