//! Error types shared by every tree operation.

use thiserror::Error;

/// Errors raised by tree construction, path writes and rule configuration.
///
/// A rule that simply does not hold is not an error; see
/// [`crate::validate::ValidationError`] for failure reports.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The root handed to a tree (or to a leaf walk) is not a list or map.
    #[error("expected a list or map, got {kind}")]
    NotComposite { kind: &'static str },

    /// A write had to go through, or into, a leaf value.
    #[error("{path}: cannot set property of atomic value")]
    WriteOnAtomic { path: String },

    /// A non-numeric literal segment addressed a list.
    #[error("{path}: segment {segment:?} is not a valid list index")]
    InvalidIndex { path: String, segment: String },

    /// A list write would need more `Null` padding than allowed.
    #[error("{path}: index {index} is too far past the end of a list of length {len}")]
    IndexOutOfRange { path: String, index: usize, len: usize },

    /// A validation rule was built without a path.
    #[error("rule #{index} has no path")]
    MissingRulePath { index: usize },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TreeError {
    /// Creates a not-composite error for the given value.
    pub fn not_composite(value: &crate::value::Value) -> Self {
        TreeError::NotComposite { kind: value.kind() }
    }

    /// Creates a write-on-atomic error.
    pub fn write_on_atomic(path: impl Into<String>) -> Self {
        TreeError::WriteOnAtomic { path: path.into() }
    }

    /// Creates an invalid-index error.
    pub fn invalid_index(path: impl Into<String>, segment: impl Into<String>) -> Self {
        TreeError::InvalidIndex {
            path: path.into(),
            segment: segment.into(),
        }
    }

    /// Creates an index-out-of-range error.
    pub fn index_out_of_range(path: impl Into<String>, index: usize, len: usize) -> Self {
        TreeError::IndexOutOfRange {
            path: path.into(),
            index,
            len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_error_display() {
        let err = TreeError::not_composite(&Value::Int(1));
        assert_eq!(err.to_string(), "expected a list or map, got int");

        let err = TreeError::write_on_atomic("a.b");
        assert_eq!(err.to_string(), "a.b: cannot set property of atomic value");

        let err = TreeError::MissingRulePath { index: 2 };
        assert!(err.to_string().contains("#2"));
    }
}
