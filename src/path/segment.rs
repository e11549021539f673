//! Path segments.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Segment is one atomic step of a path: a map key or a list index.
///
/// `Deferred` wraps a closure that is called each time the path is resolved,
/// so a segment can follow a counter or other state captured by the closure.
#[derive(Clone)]
pub enum Segment {
    /// Property name. An all-digit literal also indexes lists.
    Literal(String),
    /// List index; against a map it addresses the key `"<n>"`.
    Index(usize),
    /// Segment computed at resolution time.
    Deferred(Rc<dyn Fn() -> Segment>),
}

impl Segment {
    /// Creates a literal segment.
    pub fn literal(name: impl Into<String>) -> Self {
        Segment::Literal(name.into())
    }

    /// Creates an index segment.
    pub fn index(i: usize) -> Self {
        Segment::Index(i)
    }

    /// Creates a deferred segment from a closure.
    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn() -> Segment + 'static,
    {
        Segment::Deferred(Rc::new(f))
    }

    /// Evaluates deferred segments until a `Literal` or `Index` remains.
    pub fn resolve(&self) -> Segment {
        let mut current = self.clone();
        loop {
            match current {
                Segment::Deferred(f) => current = f(),
                resolved => return resolved,
            }
        }
    }

    /// Returns the list index this segment denotes, if any.
    ///
    /// Literals count as indices only when made of ASCII digits alone, in
    /// canonical form: `"0"` is an index, `"01"` is a plain key.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            Segment::Literal(s) => {
                let canonical = s == "0" || !s.starts_with('0');
                if canonical && !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
                    s.parse().ok()
                } else {
                    None
                }
            }
            Segment::Deferred(_) => self.resolve().as_index(),
        }
    }

    /// Returns true if a container created for this segment should be a list.
    pub fn is_index_like(&self) -> bool {
        self.as_index().is_some()
    }

    /// Returns the map key this segment denotes.
    pub fn to_key(&self) -> Cow<'_, str> {
        match self {
            Segment::Literal(s) => Cow::Borrowed(s),
            Segment::Index(i) => Cow::Owned(i.to_string()),
            Segment::Deferred(_) => Cow::Owned(self.resolve().to_key().into_owned()),
        }
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Segment::Index(i) => f.debug_tuple("Index").field(i).finish(),
            Segment::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Segment::Literal(a), Segment::Literal(b)) => a == b,
            (Segment::Index(a), Segment::Index(b)) => a == b,
            (Segment::Deferred(a), Segment::Deferred(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(s) => write!(f, "{}", s),
            Segment::Index(i) => write!(f, "{}", i),
            Segment::Deferred(_) => write!(f, "{}", self.resolve()),
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Literal(s.to_string())
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Literal(s)
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}
