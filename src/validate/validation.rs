//! Validation outcomes and options.

use thiserror::Error;

/// ValidationOption controls validation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOption {
    /// An absent optional path skips its rule instead of accepting the
    /// whole tree.
    SkipAbsentOptional,
}

/// ValidationError describes why a tree did not pass its rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{path}: required path is missing")]
    MissingPath { path: String },

    #[error("{path}: predicate #{index} rejected value {value}")]
    PredicateFailed {
        path: String,
        index: usize,
        value: String,
    },
}

impl ValidationError {
    /// Creates a missing path error.
    pub fn missing_path(path: impl Into<String>) -> Self {
        ValidationError::MissingPath { path: path.into() }
    }

    /// Creates a failed predicate error.
    pub fn predicate_failed(path: impl Into<String>, index: usize, value: impl Into<String>) -> Self {
        ValidationError::PredicateFailed {
            path: path.into(),
            index,
            value: value.into(),
        }
    }

    /// Returns the path the failure refers to.
    pub fn path(&self) -> &str {
        match self {
            ValidationError::MissingPath { path } => path,
            ValidationError::PredicateFailed { path, .. } => path,
        }
    }
}
