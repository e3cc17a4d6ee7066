//! Context Value Object
//!
//! The key-value configuration templates are rendered against. A `Context`
//! is never mutated in place: every `with_*` method returns a new value.

use serde::Serialize;
use serde_json::{Map, Value};

/// Immutable rendering context
///
/// Keys are addressable with dotted paths (`db.name`) both for lookup and for
/// building nested values.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Context {
    values: Map<String, Value>,
}

impl Context {
    /// Empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a JSON object map
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Build a context from a TOML table (e.g. the `[context]` config section)
    pub fn from_toml(table: &toml::Table) -> Self {
        let values = table
            .iter()
            .map(|(k, v)| (k.clone(), toml_to_json(v)))
            .collect();
        Self { values }
    }

    /// Look up a dotted key
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.values.get(first)?;
        for part in parts {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Look up a dotted key holding a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Return a copy with `key` (dotted) set to `value`
    ///
    /// Intermediate segments that are missing or not objects are replaced by
    /// empty objects.
    pub fn with(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut values = self.values.clone();
        insert_dotted(&mut values, key, value.into());
        Self { values }
    }

    /// Return a copy with `key` set only when it is not already present
    pub fn with_default(&self, key: &str, value: impl Into<Value>) -> Self {
        if self.contains(key) {
            self.clone()
        } else {
            self.with(key, value)
        }
    }

    /// Apply a `key=value` assignment, as given on the command line
    ///
    /// Integers, booleans, `null`, arrays and objects are parsed as JSON
    /// (`8080`, `true`, `["a","b"]`). Anything else, floats included, is
    /// taken as a plain string.
    pub fn with_assignment(&self, assignment: &str) -> Result<Self, String> {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| "expected key=value".to_string())?;
        let key = key.trim();
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return Err(format!("invalid key '{}'", key));
        }
        Ok(self.with(key, parse_value(raw)))
    }
}

/// Booleans, `null`, integers, arrays and objects are taken as JSON; anything
/// else, including floats such as `1.10`, stays the literal text.
fn parse_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if is_lossless(&value) => value,
        _ => Value::String(raw.to_string()),
    }
}

fn is_lossless(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::Array(items) => items.iter().all(is_lossless),
        Value::Object(map) => map.values().all(is_lossless),
        _ => true,
    }
}

fn insert_dotted(values: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            values.insert(key.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = values
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(child) = entry {
                insert_dotted(child, rest, value);
            }
        }
    }
}

fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::from(*i),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
    }
}
