//! `fluvia`'s world types.
//!
//! The reactive engine never reclaims memory on its own: it only
//! decides whether its listeners are referenced strongly or weakly.
//! This crate provides the identity-keyed sets it keeps those
//! references in.

// Modules
pub mod alloc_id;
pub mod strong_set;
pub mod weak_set;

// Exports
pub use self::{alloc_id::AllocId, strong_set::StrongSet, weak_set::WeakSet};
