//! Path module - Parses paths and resolves them against a value.
//!
//! A path is either a dotted string (`"spec.containers.0.name"`) or an
//! explicit list of [`Segment`]s, some of which may be computed lazily.

mod path;
mod resolve;
mod segment;

pub use path::*;
pub use resolve::*;
pub use segment::*;
