//! Validation rules.

use crate::path::Path;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// Predicate is a check applied to the value found at a rule's path.
pub type Predicate = Rc<dyn Fn(&Value) -> bool>;

/// The path sentinel that expands to every current leaf path.
pub const WILDCARD: &str = "*";

/// Rule describes one path that must (or may) be present, and the
/// predicates its value must satisfy.
#[derive(Clone, Default)]
pub struct Rule {
    /// Path to check. A rule without one is a configuration error.
    pub path: Option<Path>,
    /// Absence is acceptable.
    pub optional: bool,
    /// Checks run in order against the value.
    pub rules: Vec<Predicate>,
}

impl Rule {
    /// Creates a required rule for `path`.
    pub fn new(path: impl Into<Path>) -> Self {
        Rule {
            path: Some(path.into()),
            optional: false,
            rules: Vec::new(),
        }
    }

    /// Creates a rule that applies to every leaf path of the tree.
    pub fn wildcard() -> Self {
        Rule::new(WILDCARD)
    }

    /// Marks the rule optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Appends a predicate.
    pub fn check<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + 'static,
    {
        self.rules.push(Rc::new(predicate));
        self
    }

    /// Returns true if the rule's path is the wildcard sentinel.
    pub fn is_wildcard(&self) -> bool {
        self.path
            .as_ref()
            .is_some_and(|p| p.raw() == Some(WILDCARD))
    }

    /// Copies `optional` and `rules` onto a concrete leaf path.
    pub(crate) fn for_path(&self, path: &str) -> Rule {
        Rule {
            path: Some(Path::parse(path)),
            optional: self.optional,
            rules: self.rules.clone(),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("path", &self.path.as_ref().map(ToString::to_string))
            .field("optional", &self.optional)
            .field("rules", &self.rules.len())
            .finish()
    }
}
