//! Rule evaluation.

use super::rule::Rule;
use super::validation::{ValidationError, ValidationOption};
use crate::error::TreeError;
use crate::tree::{Tree, TreeView};
use crate::value::{self, Value};
use tracing::{debug, trace};

/// Replaces every wildcard rule by one rule per current leaf key.
///
/// Explicit rules keep their order; expansions follow them, grouped by
/// wildcard in the order the wildcards appear. Each rule carries the index
/// of the input rule it came from.
fn expand(view: &TreeView<'_>, rules: &[Rule]) -> Vec<(usize, Rule)> {
    let mut explicit = Vec::with_capacity(rules.len());
    let mut expanded = Vec::new();
    for (index, rule) in rules.iter().enumerate() {
        if rule.is_wildcard() {
            let keys = view.keys();
            trace!(rule = index, leaves = keys.len(), "expanding wildcard rule");
            expanded.extend(keys.iter().map(|k| (index, rule.for_path(k))));
        } else {
            explicit.push((index, rule.clone()));
        }
    }
    explicit.extend(expanded);
    explicit
}

fn describe(value: &Value) -> String {
    value::to_json(value).unwrap_or_else(|_| value.kind().to_string())
}

impl<'a> TreeView<'a> {
    /// Checks `rules` against the tree.
    ///
    /// Returns `Ok(false)` when a required path is missing or a predicate
    /// fails. An optional rule whose path is absent accepts the whole tree
    /// on the spot, without looking at the remaining rules; pass
    /// [`ValidationOption::SkipAbsentOptional`] to
    /// [`validate_with`](Self::validate_with) to skip such rules instead.
    pub fn validate(&self, rules: &[Rule]) -> Result<bool, TreeError> {
        self.validate_with(rules, &[])
    }

    /// Like [`validate`](Self::validate), with options.
    pub fn validate_with(&self, rules: &[Rule], opts: &[ValidationOption]) -> Result<bool, TreeError> {
        Ok(self.first_violation(rules, opts)?.is_none())
    }

    /// Returns the failure that stopped validation, or `None` if the tree
    /// was accepted.
    ///
    /// Fails with [`TreeError::MissingRulePath`] when a rule without a path
    /// is reached.
    pub fn first_violation(
        &self,
        rules: &[Rule],
        opts: &[ValidationOption],
    ) -> Result<Option<ValidationError>, TreeError> {
        let skip_absent = opts.contains(&ValidationOption::SkipAbsentOptional);

        for (index, rule) in expand(self, rules) {
            let path = rule
                .path
                .as_ref()
                .ok_or(TreeError::MissingRulePath { index })?;

            let Some(found) = self.get(path) else {
                if !rule.optional {
                    debug!(%path, "required path missing");
                    return Ok(Some(ValidationError::missing_path(path.to_string())));
                }
                if skip_absent {
                    trace!(%path, "optional path absent, skipping rule");
                    continue;
                }
                debug!(%path, "optional path absent, accepting tree");
                return Ok(None);
            };

            for (i, predicate) in rule.rules.iter().enumerate() {
                if !predicate(found) {
                    debug!(%path, predicate = i, "predicate rejected value");
                    return Ok(Some(ValidationError::predicate_failed(
                        path.to_string(),
                        i,
                        describe(found),
                    )));
                }
            }
        }

        Ok(None)
    }
}

impl Tree {
    pub fn validate(&self, rules: &[Rule]) -> Result<bool, TreeError> {
        self.view().validate(rules)
    }

    pub fn validate_with(&self, rules: &[Rule], opts: &[ValidationOption]) -> Result<bool, TreeError> {
        self.view().validate_with(rules, opts)
    }

    pub fn first_violation(
        &self,
        rules: &[Rule],
        opts: &[ValidationOption],
    ) -> Result<Option<ValidationError>, TreeError> {
        self.view().first_violation(rules, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn sample() -> Tree {
        Tree::from_json(r#"{"a": 1, "b": {"c": 2}}"#).unwrap()
    }

    #[test]
    fn test_predicate_holds() {
        let rules = [Rule::new("a").check(|v| v.as_int() == Some(1))];
        assert!(sample().validate(&rules).unwrap());
    }

    #[test]
    fn test_required_missing() {
        let rules = [Rule::new("z")];
        assert!(!sample().validate(&rules).unwrap());
        assert_eq!(
            sample().first_violation(&rules, &[]).unwrap(),
            Some(ValidationError::missing_path("z"))
        );
    }

    #[test]
    fn test_absent_optional_accepts_whole_tree() {
        let rules = [
            Rule::new("z").optional(),
            Rule::new("a").check(|v| v.as_int() == Some(99)),
        ];
        assert!(sample().validate(&rules).unwrap());
    }

    #[test]
    fn test_skip_absent_optional_option() {
        let rules = [
            Rule::new("z").optional(),
            Rule::new("a").check(|v| v.as_int() == Some(99)),
        ];
        let opts = [ValidationOption::SkipAbsentOptional];
        assert!(!sample().validate_with(&rules, &opts).unwrap());
        assert_eq!(
            sample().first_violation(&rules, &opts).unwrap(),
            Some(ValidationError::predicate_failed("a", 0, "1"))
        );
    }

    #[test]
    fn test_present_optional_still_checked() {
        let rules = [Rule::new("a").optional().check(Value::is_string)];
        assert!(!sample().validate(&rules).unwrap());
    }

    #[test]
    fn test_first_failing_predicate_wins() {
        let second_ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&second_ran);
        let rules = [Rule::new("b.c")
            .check(Value::is_int)
            .check(|v| v.as_int() == Some(3))
            .check(move |_| {
                flag.set(true);
                true
            })];
        assert_eq!(
            sample().first_violation(&rules, &[]).unwrap(),
            Some(ValidationError::predicate_failed("b.c", 1, "2"))
        );
        assert!(!second_ran.get());
    }

    #[test]
    fn test_wildcard_over_leaves() {
        let rules = [Rule::wildcard().check(Value::is_leaf)];
        assert!(Tree::from_json(r#"{"a": 1, "b": 2}"#).unwrap().validate(&rules).unwrap());
        assert!(sample().validate(&rules).unwrap());
    }

    #[test]
    fn test_wildcard_applies_predicates_to_every_leaf() {
        let rules = [Rule::wildcard().check(|v| v.as_int().is_some_and(|i| i < 2))];
        assert_eq!(
            sample().first_violation(&rules, &[]).unwrap(),
            Some(ValidationError::predicate_failed("b.c", 0, "2"))
        );
    }

    #[test]
    fn test_wildcard_runs_after_explicit_rules() {
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let seen_wild = Rc::clone(&order);
        let seen_explicit = Rc::clone(&order);
        let rules = [
            Rule::wildcard().check(move |v| {
                seen_wild.borrow_mut().push(format!("*{}", describe(v)));
                true
            }),
            Rule::new("b.c").check(move |v| {
                seen_explicit.borrow_mut().push(describe(v));
                true
            }),
        ];
        assert!(sample().validate(&rules).unwrap());
        assert_eq!(*order.borrow(), vec!["2", "*1", "*2"]);
    }

    #[test]
    fn test_rule_without_path_is_configuration_error() {
        let rules = [Rule::new("a"), Rule::default()];
        let err = sample().validate(&rules).unwrap_err();
        assert!(matches!(err, TreeError::MissingRulePath { index: 1 }));
    }

    #[test]
    fn test_rule_without_path_after_short_circuit_is_not_reached() {
        let rules = [Rule::new("z").optional(), Rule::default()];
        assert!(sample().validate(&rules).unwrap());
    }

    #[test]
    fn test_empty_rules_accept() {
        assert!(sample().validate(&[]).unwrap());
    }

    #[test]
    fn test_null_leaf_counts_as_present() {
        let tree = Tree::from_json(r#"{"n": null}"#).unwrap();
        assert!(tree.validate(&[Rule::new("n")]).unwrap());
        assert!(!tree.validate(&[Rule::new("n").check(|v| !v.is_null())]).unwrap());
    }
}
