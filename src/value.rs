//! Untyped value tree produced by the format decoders
//!
//! Every decoder (YAML, JSON, INI, TOML) lowers its document into this shape
//! so the mapper only has to understand one representation.

use indexmap::{Equivalent, IndexMap};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::hash::{Hash, Hasher};
use std::mem;

/// A decoded configuration node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Only used for integers that do not fit in an `i64`.
    UInt(u64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Integer scalars, widened so both signed and unsigned sources fit.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Int(i) => Some(i128::from(*i)),
            Value::UInt(u) => Some(i128::from(*u)),
            _ => None,
        }
    }

    /// Floating-point scalars only. Integers are deliberately not coerced.
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

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short name of the variant, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    /// Render a scalar mapping key as a string. Composite and null keys have
    /// no string form.
    pub fn key_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::UInt(u) => Some(u.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Sequence(value)
    }
}

impl From<Mapping> for Value {
    fn from(value: Mapping) -> Self {
        Value::Mapping(value)
    }
}

impl Eq for Value {}

// Must agree with `PartialEq`: equal values hash alike. Mappings compare
// regardless of order, so only their size feeds the hash.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::UInt(u) => u.hash(state),
            // 0.0 == -0.0
            Value::Float(f) => (if *f == 0.0 { 0.0f64 } else { *f }).to_bits().hash(state),
            Value::String(s) => s.hash(state),
            Value::Sequence(items) => items.hash(state),
            Value::Mapping(mapping) => mapping.len().hash(state),
        }
    }
}

/// Borrowed string key, hashed exactly like `Value::String` so lookups by
/// `&str` need no allocation.
struct StrKey<'a>(&'a str);

impl Hash for StrKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(&Value::String(String::new())).hash(state);
        self.0.hash(state);
    }
}

impl Equivalent<Value> for StrKey<'_> {
    fn equivalent(&self, key: &Value) -> bool {
        key.as_str() == Some(self.0)
    }
}

/// Key/value pairs of a decoded mapping.
///
/// Insertion order is kept for display only and is ignored by equality. Keys
/// may be any scalar, but field lookup goes through string keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: IndexMap<Value, Value>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair, returning the previous value stored under an equal key.
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&StrKey(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(&StrKey(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::UInt(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(mapping) => mapping.serialize(serializer),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in self.entries.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::{Mapping, Value};

    #[test]
    fn insert_replaces_equal_key() {
        let mut mapping = Mapping::new();
        assert!(mapping.insert("port", 80i64).is_none());
        assert_eq!(mapping.insert("port", 8080i64), Some(Value::Int(80)));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("port"), Some(&Value::Int(8080)));
    }

    #[test]
    fn equality_ignores_order() {
        let a: Mapping = [("x", 1i64), ("y", 2)].into_iter().collect();
        let b: Mapping = [("y", 2i64), ("x", 1)].into_iter().collect();
        assert_eq!(a, b);
        let c: Mapping = [("x", 1i64)].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn lookup_ignores_non_string_keys() {
        let mut mapping = Mapping::new();
        mapping.insert(Value::Int(1), "one");
        assert!(mapping.get("1").is_none());
        assert_eq!(mapping.iter().count(), 1);
    }

    #[test]
    fn string_and_integer_keys_stay_distinct() {
        let mut mapping = Mapping::new();
        mapping.insert(Value::Int(1), "int");
        mapping.insert("1", "string");
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("1"), Some(&Value::String("string".into())));
    }

    #[test]
    fn insertion_order_is_kept() {
        let mapping: Mapping = [("z", 1i64), ("a", 2), ("m", 3)].into_iter().collect();
        let keys: Vec<_> = mapping.iter().filter_map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn signed_zero_keys_are_one_entry() {
        let mut mapping = Mapping::new();
        mapping.insert(Value::Float(0.0), "pos");
        mapping.insert(Value::Float(-0.0), "neg");
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn integers_are_not_floats() {
        assert_eq!(Value::Int(1).as_float(), None);
        assert_eq!(Value::Float(1.0).as_integer(), None);
        assert_eq!(Value::UInt(u64::MAX).as_integer(), Some(i128::from(u64::MAX)));
    }

    #[test]
    fn scalar_keys_render_as_strings() {
        assert_eq!(Value::Int(7).key_string().as_deref(), Some("7"));
        assert_eq!(Value::Bool(true).key_string().as_deref(), Some("true"));
        assert_eq!(Value::Null.key_string(), None);
        assert_eq!(Value::Sequence(vec![]).key_string(), None);
    }

    #[test]
    fn serializes_to_json() {
        let mut inner = Mapping::new();
        inner.insert("enabled", true);
        let mut root = Mapping::new();
        root.insert("name", "api");
        root.insert("ports", vec![Value::Int(80), Value::Int(443)]);
        root.insert("tls", inner);

        let json = serde_json::to_string(&Value::Mapping(root)).expect("serialize");
        assert_eq!(json, r#"{"name":"api","ports":[80,443],"tls":{"enabled":true}}"#);
    }
}
