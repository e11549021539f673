//! Tree handles.

use super::walk::{leaf_entries, leaf_keys, prefixed_leaf_keys};
use crate::error::TreeError;
use crate::path::{self, Path};
use crate::value::{self, Map, Value};

/// Tree owns a composite root and addresses its leaves by path.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root: Value,
}

/// TreeView is a read-only borrow of a composite root.
///
/// Any number of views may share one root; none of them can write.
#[derive(Debug, Clone, Copy)]
pub struct TreeView<'a> {
    root: &'a Value,
}

/// TreeMut writes into a caller-owned composite root in place.
///
/// No copy is taken: after the handle is dropped the caller's value holds
/// every change made through it.
#[derive(Debug)]
pub struct TreeMut<'a> {
    root: &'a mut Value,
}

fn ensure_composite(root: &Value) -> Result<(), TreeError> {
    if root.is_composite() {
        Ok(())
    } else {
        Err(TreeError::not_composite(root))
    }
}

impl Tree {
    /// Wraps a list or map. Leaves are rejected.
    pub fn new(root: Value) -> Result<Self, TreeError> {
        ensure_composite(&root)?;
        Ok(Tree { root })
    }

    /// Parses a JSON document into a tree.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        Tree::new(value::from_json(json)?)
    }

    /// Parses a YAML document into a tree.
    pub fn from_yaml(yaml: &str) -> Result<Self, TreeError> {
        Tree::new(value::from_yaml(yaml)?)
    }

    /// Returns a reference to the root value.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Consumes the tree and returns the root value.
    pub fn into_value(self) -> Value {
        self.root
    }

    /// Borrows the tree read-only.
    pub fn view(&self) -> TreeView<'_> {
        TreeView { root: &self.root }
    }

    /// Borrows the tree for writing.
    pub fn view_mut(&mut self) -> TreeMut<'_> {
        TreeMut {
            root: &mut self.root,
        }
    }

    pub fn get(&self, path: impl Into<Path>) -> Option<&Value> {
        self.view().get(path)
    }

    pub fn set(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<(), TreeError> {
        self.view_mut().set(path, value)
    }

    pub fn keys(&self) -> Vec<String> {
        self.view().keys()
    }

    pub fn prefixed_keys(&self, prefix: &str) -> Vec<String> {
        self.view().prefixed_keys(prefix)
    }

    pub fn values(&self) -> Vec<Option<&Value>> {
        self.view().values()
    }

    pub fn resolve_keys<K: AsRef<str>>(&self, keys: &[K]) -> Vec<Option<&Value>> {
        self.view().resolve_keys(keys)
    }

    pub fn filter_keys(&self, predicate: impl FnMut(&Value) -> bool) -> Vec<String> {
        self.view().filter_keys(predicate)
    }

    pub fn flatten(&self) -> Map {
        self.view().flatten()
    }

    pub fn find_key(&self, predicate: impl FnMut(&Value) -> bool) -> Option<String> {
        self.view().find_key(predicate)
    }

    pub fn map(&self, mapper: impl FnMut(&Value) -> Value) -> Result<Tree, TreeError> {
        self.view().map(mapper)
    }

    pub fn equal(&self, other: &Value) -> bool {
        self.view().equal(other)
    }
}

impl TryFrom<Value> for Tree {
    type Error = TreeError;

    fn try_from(root: Value) -> Result<Self, Self::Error> {
        Tree::new(root)
    }
}

impl From<Tree> for Value {
    fn from(tree: Tree) -> Self {
        tree.root
    }
}

impl<'a> TreeView<'a> {
    /// Borrows a list or map. Leaves are rejected.
    pub fn new(root: &'a Value) -> Result<Self, TreeError> {
        ensure_composite(root)?;
        Ok(TreeView { root })
    }

    /// Returns the borrowed root.
    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// Returns the value at `path`; composites are returned as-is.
    pub fn get(&self, path: impl Into<Path>) -> Option<&'a Value> {
        path::get(self.root, &path.into())
    }

    /// Returns the full dotted path of every leaf.
    pub fn keys(&self) -> Vec<String> {
        leaf_keys(self.root).unwrap_or_default()
    }

    /// Returns every leaf path, each prefixed with `prefix.`.
    pub fn prefixed_keys(&self, prefix: &str) -> Vec<String> {
        prefixed_leaf_keys(self.root, prefix).unwrap_or_default()
    }

    /// Returns the value of every leaf, in [`keys`](Self::keys) order.
    ///
    /// An entry is `None` only when its key cannot be resolved again, which
    /// happens for map keys that themselves contain a `.`.
    pub fn values(&self) -> Vec<Option<&'a Value>> {
        self.resolve_keys(&self.keys())
    }

    /// Resolves each key.
    pub fn resolve_keys<K: AsRef<str>>(&self, keys: &[K]) -> Vec<Option<&'a Value>> {
        keys.iter().map(|k| self.get(k.as_ref())).collect()
    }

    /// Returns the keys whose value satisfies `predicate`.
    pub fn filter_keys(&self, mut predicate: impl FnMut(&Value) -> bool) -> Vec<String> {
        self.keys()
            .into_iter()
            .filter(|k| self.get(k.as_str()).is_some_and(&mut predicate))
            .collect()
    }

    /// Returns a single-level map from every leaf path to its value.
    pub fn flatten(&self) -> Map {
        self.keys()
            .into_iter()
            .filter_map(|k| {
                let v = self.get(k.as_str())?.clone();
                Some((k, v))
            })
            .collect()
    }

    /// Returns the first key, in [`keys`](Self::keys) order, whose value
    /// satisfies `predicate`.
    pub fn find_key(&self, mut predicate: impl FnMut(&Value) -> bool) -> Option<String> {
        self.keys()
            .into_iter()
            .find(|k| self.get(k.as_str()).is_some_and(&mut predicate))
    }

    /// Builds a new, detached tree with the same paths and mapped leaves.
    ///
    /// The new root is a list if this root is a list, a map otherwise.
    pub fn map(&self, mut mapper: impl FnMut(&Value) -> Value) -> Result<Tree, TreeError> {
        let mut out = Tree::new(match self.root {
            Value::List(_) => Value::List(Vec::new()),
            _ => Value::Map(Map::new()),
        })?;
        for key in self.keys() {
            if let Some(v) = self.get(key.as_str()) {
                out.set(key.as_str(), mapper(v))?;
            }
        }
        Ok(out)
    }

    /// Compares leaf paths and leaf values with another root.
    ///
    /// `other` only has to be composite to pass the shape gate, so a list
    /// and a map keyed `"0"`, `"1"`, ... with the same leaves are equal.
    /// Both trees must yield the same keys in the same order and `==`
    /// values at each key. Values are taken from the walk rather than
    /// looked up again, so leaves under keys containing a `.` still count.
    pub fn equal(&self, other: &Value) -> bool {
        let (Ok(ours), Ok(theirs)) = (leaf_entries(self.root), leaf_entries(other)) else {
            return false;
        };
        ours == theirs
    }
}

impl<'a> TreeMut<'a> {
    /// Borrows a caller-owned list or map for writing. Leaves are rejected.
    pub fn new(root: &'a mut Value) -> Result<Self, TreeError> {
        ensure_composite(root)?;
        Ok(TreeMut { root })
    }

    /// Reborrows read-only.
    pub fn view(&self) -> TreeView<'_> {
        TreeView { root: &*self.root }
    }

    /// Writes `value` at `path`, creating missing containers on the way.
    pub fn set(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<(), TreeError> {
        path::set(self.root, &path.into(), value.into())
    }
}
