//! Validate module - Declarative per-path rules.
//!
//! Rules name a path, whether it may be absent, and predicates over its
//! value. The `"*"` path stands for every leaf path present at the time of
//! validation.

mod rule;
mod validation;
mod validator;

pub use rule::*;
pub use validation::*;
