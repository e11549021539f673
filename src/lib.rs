//! # pathtree
//!
//! Path-addressable trees over nested JSON/YAML values.
//!
//! A [`Tree`] wraps a list or map and lets callers read and write leaves by
//! dotted paths (`"spec.containers.0.image"`) or explicit segment lists,
//! enumerate every leaf path, compare two trees leaf by leaf, map every leaf
//! into a new tree, and check the tree against declarative rules.
//!
//! ```
//! use pathtree::{Rule, Tree, Value};
//!
//! let mut tree = Tree::from_json(r#"{"spec": {"replicas": 1}}"#).unwrap();
//! tree.set("spec.containers.0.image", "nginx").unwrap();
//!
//! assert_eq!(tree.keys(), vec!["spec.replicas", "spec.containers.0.image"]);
//! assert!(tree.validate(&[Rule::new("spec.replicas").check(Value::is_int)]).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of JSON/YAML documents
//! - [`path`] - Path parsing and resolution (get, set with auto-creation)
//! - [`tree`] - Tree handles, leaf enumeration and derived operations
//! - [`validate`] - Per-path rules with optional and wildcard paths
//! - [`error`] - Errors shared by all operations

pub mod error;
pub mod path;
pub mod tree;
pub mod validate;
pub mod value;

pub use error::TreeError;
pub use path::{Path, Segment};
pub use tree::{Tree, TreeMut, TreeView};
pub use validate::{Predicate, Rule, ValidationError, ValidationOption};
pub use value::{Map, Value};
