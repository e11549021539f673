//! Tree module - Path-addressable handles over a composite root.
//!
//! [`Tree`] owns its root, [`TreeView`] borrows it read-only and [`TreeMut`]
//! writes into a value owned elsewhere. Every derived operation is defined
//! in terms of leaf keys and path lookups.

mod tree;
mod walk;


pub use tree::*;
pub use walk::*;
