use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::ValueKind;

/// A runtime value produced by resolving a tag chain.
///
/// Values are fresh, independently owned results: they never alias the
/// argument tree that produced them. The textual form (via `Display`) is
/// what mixed text/chain fields concatenate; a single-chain field returns
/// the value itself, unconverted.
///
/// # Example
///
/// ```
/// use tagex::Value;
///
/// let v: Value = 42.into();
/// assert_eq!(v.as_int(), Some(42));
/// assert_eq!(v.to_string(), "42");
/// assert_eq!(Value::Null.to_string(), "null");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// Plain text.
    Text(String),

    /// A signed integer.
    Int(i64),

    /// A boolean.
    Bool(bool),

    /// An ordered list of values.
    List(Vec<Value>),

    /// A string-keyed map of values. BTreeMap keeps rendering deterministic.
    Map(BTreeMap<String, Value>),

    /// The null value. Renders as the literal text `null`.
    Null,

    /// A point in time, in milliseconds since the Unix epoch.
    Time(i64),

    /// An opaque value carried through for the embedder.
    Dynamic(String),
}

impl Value {
    /// The kind of this value, used for member-operation dispatch.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Text(_) => ValueKind::Text,
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
            Value::List(_) => ValueKind::List,
            Value::Map(_) => ValueKind::Map,
            Value::Null => ValueKind::Null,
            Value::Time(_) => ValueKind::Time,
            Value::Dynamic(_) => ValueKind::Dynamic,
        }
    }

    /// Get this value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get this value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get this value as a map, if it is one.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Check whether this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(items) => {
                // Dotted rendering mirrors the list literal syntax.
                let mut first = true;
                for item in items {
                    if !first {
                        write!(f, ".")?;
                    }
                    first = false;
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Map(entries) => {
                let mut first = true;
                for (key, value) in entries {
                    if !first {
                        write!(f, ".")?;
                    }
                    first = false;
                    write!(f, "{key}.{value}")?;
                }
                Ok(())
            }
            Value::Null => write!(f, "null"),
            Value::Time(millis) => write!(f, "{millis}"),
            Value::Dynamic(s) => write!(f, "{s}"),
        }
    }
}

// From implementations for common types

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}
