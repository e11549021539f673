//! Value module - In-memory representation of JSON/YAML documents.
//!
//! Maps keep insertion order so that leaf enumeration follows document order.

mod value;

pub use value::*;
