//! Path type and parsing.

use super::segment::Segment;
use std::fmt;

/// Path is an ordered sequence of segments identifying a tree position.
///
/// A path parsed from a dotted string keeps the raw string; lookups try it
/// as a literal root key before descending segment by segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    raw: Option<String>,
    segments: Vec<Segment>,
}

impl Path {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Path {
            raw: None,
            segments: Vec::new(),
        }
    }

    /// Parses a dotted path. The empty string has no segments.
    pub fn parse(s: &str) -> Self {
        let segments = if s.is_empty() {
            Vec::new()
        } else {
            s.split('.').map(Segment::literal).collect()
        };
        Path {
            raw: Some(s.to_string()),
            segments,
        }
    }

    /// Creates a path from explicit segments.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Path {
            raw: None,
            segments,
        }
    }

    /// Returns the dotted string this path was parsed from, if any.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Returns the number of segments in the path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the unresolved segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Appends a segment. The path stops being a raw string path.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.raw = None;
        self.segments.push(segment.into());
    }

    /// Evaluates every deferred segment, yielding only literals and indices.
    pub fn resolved(&self) -> Vec<Segment> {
        self.segments.iter().map(Segment::resolve).collect()
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::parse(&s)
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Path::parse(s)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path::from_segments(segments)
    }
}

impl From<&Path> for Path {
    fn from(p: &Path) -> Self {
        p.clone()
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Path::from_segments(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Construct a [`Path`] from segments.
///
/// ```
/// use pathtree::path;
///
/// let p = path!("users", 0, "name");
/// assert_eq!(p.to_string(), "users.0.name");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::new()
    };
    ($($seg:expr),+ $(,)?) => {{
        let mut p = $crate::Path::new();
        $(
            p.push($crate::Segment::from($seg));
        )+
        p
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted() {
        let p = Path::parse("a.0.b");
        assert_eq!(
            p.segments(),
            &[Segment::literal("a"), Segment::literal("0"), Segment::literal("b")]
        );
        assert_eq!(p.raw(), Some("a.0.b"));
    }

    #[test]
    fn test_parse_empty() {
        let p = Path::parse("");
        assert!(p.is_empty());
        assert_eq!(p.raw(), Some(""));
    }

    #[test]
    fn test_parse_keeps_empty_parts() {
        assert_eq!(Path::parse("a..b").len(), 3);
    }

    #[test]
    fn test_macro_and_display() {
        let p = crate::path!("users", 2, "name");
        assert_eq!(p.len(), 3);
        assert_eq!(p.raw(), None);
        assert_eq!(p.to_string(), "users.2.name");
    }

    #[test]
    fn test_push_drops_raw() {
        let mut p = Path::parse("a");
        p.push("b");
        assert_eq!(p.raw(), None);
        assert_eq!(p.to_string(), "a.b");
    }
}
