//! Core value types and operations.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Value represents a JSON/YAML value that can be any of the supported types.
///
/// `List` and `Map` are composites; every other variant is a leaf.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
}

/// Map is a string-keyed map that keeps its keys in insertion order.
///
/// Entries live in a `Vec` for ordering; `index` maps each key to its
/// position so lookups do not scan.
#[derive(Clone, Default)]
pub struct Map {
    fields: Vec<Field>,
    index: HashMap<String, usize>,
}

/// Field represents a single key-value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Field {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns true for containers (lists and maps), even when empty.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_))
    }

    /// Returns true for every non-composite value, `Null` included.
    pub fn is_leaf(&self) -> bool {
        !self.is_composite()
    }

    /// Short lowercase name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Map {
    pub fn new() -> Self {
        Map {
            fields: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builds a map from fields; later duplicates replace earlier ones.
    pub fn with_fields(fields: Vec<Field>) -> Self {
        let mut map = Map::new();
        for field in fields {
            map.set(field.name, field.value);
        }
        map
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&pos| &self.fields[pos].value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self.index.get(key) {
            Some(&pos) => Some(&mut self.fields[pos].value),
            None => None,
        }
    }

    /// Inserts or replaces a value. Replacing keeps the key's original position.
    pub fn set(&mut self, key: String, value: Value) {
        match self.index.get(&key) {
            Some(&pos) => self.fields[pos].value = value,
            None => {
                self.index.insert(key.clone(), self.fields.len());
                self.fields.push(Field { name: key, value });
            }
        }
    }

    /// Returns the value under `key`, inserting the result of `default` at the
    /// end of the map if the key is absent.
    pub fn entry_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> Value) -> &mut Value {
        let pos = match self.index.get(key) {
            Some(&pos) => pos,
            None => {
                let pos = self.fields.len();
                self.fields.push(Field {
                    name: key.to_string(),
                    value: default(),
                });
                self.index.insert(key.to_string(), pos);
                pos
            }
        };
        &mut self.fields[pos].value
    }

    pub fn has(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the entries in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter().map(|f| (&f.name, &f.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.iter().map(|f| &f.name)
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut map = Map::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}

impl Serialize for Map {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

struct MapVisitor;

impl<'de> Visitor<'de> for MapVisitor {
    type Value = Map;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Map, A::Error> {
        let mut map = Map::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.set(key, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for Map {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MapVisitor)
    }
}

/// Parse a value from JSON.
pub fn from_json(json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a value to JSON.
pub fn to_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serialize a value to indented JSON.
pub fn to_json_pretty(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Parse a value from YAML.
pub fn from_yaml(yaml: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Serialize a value to YAML.
pub fn to_yaml(value: &Value) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_types() {
        assert!(Value::Null.is_null());
        assert!(Value::Bool(true).is_bool());
        assert!(Value::Int(42).is_int());
        assert!(Value::Float(2.5).is_float());
        assert!(Value::String("hello".into()).is_string());
        assert!(Value::List(vec![]).is_list());
        assert!(Value::Map(Map::new()).is_map());
    }

    #[test]
    fn test_composite_and_leaf() {
        assert!(Value::List(vec![]).is_composite());
        assert!(Value::Map(Map::new()).is_composite());
        assert!(Value::Null.is_leaf());
        assert!(Value::String("x".into()).is_leaf());
        assert_eq!(Value::Map(Map::new()).kind(), "map");
        assert_eq!(Value::Float(1.0).kind(), "float");
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(Value::Null, Value::Null);
        assert_eq!(Value::Bool(true), Value::Bool(true));
        assert_ne!(Value::Bool(true), Value::Bool(false));
        assert_eq!(Value::Int(42), Value::Int(42));
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let mut map = Map::new();
        map.set("zeta".into(), Value::Int(1));
        map.set("alpha".into(), Value::Int(2));
        map.set("mid".into(), Value::Int(3));
        map.set("zeta".into(), Value::Int(4));

        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(map.get("zeta"), Some(&Value::Int(4)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_wide_map_lookups() {
        let map: Map = (0..20_000)
            .map(|i| (format!("k{}", i), Value::Int(i)))
            .collect();
        assert_eq!(map.len(), 20_000);
        assert_eq!(map.get("k19999"), Some(&Value::Int(19_999)));
        assert_eq!(map.fields()[0].name, "k0");
        assert_eq!(map.keys().last().map(String::as_str), Some("k19999"));
        assert!(!map.has("k20000"));
    }

    #[test]
    fn test_entry_or_insert_with() {
        let mut map = Map::new();
        *map.entry_or_insert_with("a", || Value::Int(0)) = Value::Int(7);
        map.entry_or_insert_with("a", || Value::Int(99));
        assert_eq!(map.get("a"), Some(&Value::Int(7)));
        assert!(map.has("a"));
        assert!(!map.has("b"));
    }

    #[test]
    fn test_json_preserves_key_order() {
        let value = from_json(r#"{"b": 1, "a": {"y": true, "x": null}, "c": [1.5, "s"]}"#).unwrap();
        assert_eq!(
            to_json(&value).unwrap(),
            r#"{"b":1,"a":{"y":true,"x":null},"c":[1.5,"s"]}"#
        );
    }

    #[test]
    fn test_yaml_parse() {
        let value = from_yaml("name: test\ncount: 42\ntags:\n- a\n- b\n").unwrap();
        let map = value.as_map().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "count", "tags"]);
        assert_eq!(map.get("count"), Some(&Value::Int(42)));
        assert_eq!(
            map.get("tags"),
            Some(&Value::List(vec![Value::from("a"), Value::from("b")]))
        );
    }
}
