//! Dynamically typed context values.
//!
//! Expressions are evaluated against a mapping of string keys to arbitrary
//! values. `ContextValue` is the tagged representation of those values and is
//! responsible for numeric fidelity: a JSON `1` must stay an integer and must
//! not be widened to `1.0`, because CEL distinguishes `int` from `double` and
//! `1 == 1.0` is not `true` there.

use std::collections::HashMap;
use std::sync::Arc;

use cel_interpreter::objects::{Key, Map, Value};
use serde::{Deserialize, Serialize};

/// A dynamically typed value inside an evaluation context.
///
/// Deserialization is untagged, so plain JSON maps onto the variants directly.
/// Variant order matters: integers are tried before floats so that integral
/// numerals keep their type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// JSON `null`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integral number.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    String(String),
    /// Sequence of values.
    Seq(Vec<ContextValue>),
    /// Nested mapping.
    Map(HashMap<String, ContextValue>),
}

impl ContextValue {
    /// Returns `true` for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, ContextValue::Null)
    }
}

/// Normalizes an arbitrary JSON value into a `ContextValue`.
///
/// Numbers are coerced to integer when integral, else to float; a numeral that
/// fits neither (arbitrary precision input) degrades to its string form.
/// Nested objects and arrays are normalized recursively.
impl From<serde_json::Value> for ContextValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ContextValue::Null,
            serde_json::Value::Bool(b) => ContextValue::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(ContextValue::Int)
                .or_else(|| n.as_f64().map(ContextValue::Float))
                .unwrap_or_else(|| ContextValue::String(n.to_string())),
            serde_json::Value::String(s) => ContextValue::String(s),
            serde_json::Value::Array(items) => {
                ContextValue::Seq(items.into_iter().map(ContextValue::from).collect())
            }
            serde_json::Value::Object(entries) => ContextValue::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, ContextValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<ContextValue> for Value {
    fn from(value: ContextValue) -> Self {
        match value {
            ContextValue::Null => Value::Null,
            ContextValue::Bool(b) => Value::Bool(b),
            ContextValue::Int(i) => Value::Int(i),
            ContextValue::Float(f) => Value::Float(f),
            ContextValue::String(s) => Value::String(Arc::new(s)),
            ContextValue::Seq(items) => {
                Value::List(Arc::new(items.into_iter().map(Value::from).collect()))
            }
            ContextValue::Map(entries) => {
                let map: HashMap<Key, Value> = entries
                    .into_iter()
                    .map(|(k, v)| (Key::String(Arc::new(k)), Value::from(v)))
                    .collect();
                Value::Map(Map { map: Arc::new(map) })
            }
        }
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Int(value)
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        ContextValue::Float(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<Vec<ContextValue>> for ContextValue {
    fn from(value: Vec<ContextValue>) -> Self {
        ContextValue::Seq(value)
    }
}

impl From<HashMap<String, ContextValue>> for ContextValue {
    fn from(value: HashMap<String, ContextValue>) -> Self {
        ContextValue::Map(value)
    }
}
