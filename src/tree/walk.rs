//! Leaf enumeration.

use crate::error::TreeError;
use crate::value::Value;

/// Returns the full dotted path of every leaf under `root`.
///
/// Map entries are visited in insertion order and list items in index
/// order, depth first. Empty containers contribute no keys.
pub fn leaf_keys(root: &Value) -> Result<Vec<String>, TreeError> {
    Ok(prefixed(root, None)?.into_iter().map(|(k, _)| k).collect())
}

/// Like [`leaf_keys`], with every key prefixed by `prefix.`.
pub fn prefixed_leaf_keys(root: &Value, prefix: &str) -> Result<Vec<String>, TreeError> {
    Ok(prefixed(root, Some(prefix))?.into_iter().map(|(k, _)| k).collect())
}

/// Returns every leaf paired with its full dotted path, in [`leaf_keys`]
/// order.
///
/// Values come from the walk itself, so a leaf under a map key containing
/// a `.` is reported even though its path cannot be resolved again.
pub fn leaf_entries(root: &Value) -> Result<Vec<(String, &Value)>, TreeError> {
    prefixed(root, None)
}

fn prefixed<'v>(root: &'v Value, prefix: Option<&str>) -> Result<Vec<(String, &'v Value)>, TreeError> {
    if !root.is_composite() {
        return Err(TreeError::not_composite(root));
    }
    let mut entries = Vec::new();
    collect(root, prefix, &mut entries);
    Ok(entries)
}

fn collect<'v>(node: &'v Value, base: Option<&str>, out: &mut Vec<(String, &'v Value)>) {
    match node {
        Value::Map(map) => {
            for (name, child) in map.iter() {
                visit(join(base, name), child, out);
            }
        }
        Value::List(list) => {
            for (i, child) in list.iter().enumerate() {
                visit(join(base, &i.to_string()), child, out);
            }
        }
        _ => {}
    }
}

fn visit<'v>(key: String, child: &'v Value, out: &mut Vec<(String, &'v Value)>) {
    if child.is_composite() {
        collect(child, Some(&key), out);
    } else {
        out.push((key, child));
    }
}

fn join(base: Option<&str>, own: &str) -> String {
    match base {
        Some(base) => format!("{}.{}", base, own),
        None => own.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_leaf_keys_order() {
        let root = from_json(r#"{"z": 1, "a": {"y": [true, {"q": null}], "b": "s"}, "m": 2}"#).unwrap();
        assert_eq!(
            leaf_keys(&root).unwrap(),
            vec!["z", "a.y.0", "a.y.1.q", "a.b", "m"]
        );
    }

    #[test]
    fn test_leaf_keys_list_root() {
        let root = from_json(r#"[1, [2, 3], {"k": 4}]"#).unwrap();
        assert_eq!(leaf_keys(&root).unwrap(), vec!["0", "1.0", "1.1", "2.k"]);
    }

    #[test]
    fn test_empty_containers_have_no_keys() {
        let root = from_json(r#"{"a": {}, "b": [], "c": 1}"#).unwrap();
        assert_eq!(leaf_keys(&root).unwrap(), vec!["c"]);
        assert!(leaf_keys(&from_json("{}").unwrap()).unwrap().is_empty());
    }

    #[test]
    fn test_prefixed_leaf_keys() {
        let root = from_json(r#"{"a": 1, "b": {"c": 2}}"#).unwrap();
        assert_eq!(
            prefixed_leaf_keys(&root, "root").unwrap(),
            vec!["root.a", "root.b.c"]
        );
    }

    #[test]
    fn test_leaf_entries() {
        let root = from_json(r#"{"a": {"b.c": 1}, "d": [true]}"#).unwrap();
        let entries = leaf_entries(&root).unwrap();
        assert_eq!(
            entries,
            vec![
                ("a.b.c".to_string(), &Value::Int(1)),
                ("d.0".to_string(), &Value::Bool(true)),
            ]
        );
    }

    #[test]
    fn test_leaf_root_is_rejected() {
        let err = leaf_keys(&Value::Int(3)).unwrap_err();
        assert!(matches!(err, TreeError::NotComposite { kind: "int" }));
    }
}
