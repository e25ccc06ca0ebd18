use std::fmt;

use serde::Serialize;

/// The runtime category of a resolved value.
///
/// Each kind owns its own set of member operations in the handler registry.
/// The set is closed: embedders extend behavior by registering operations on
/// an existing kind, not by adding kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ValueKind {
    /// Plain text.
    Text,
    /// A signed integer.
    Int,
    /// A boolean.
    Bool,
    /// An ordered list of values.
    List,
    /// A string-keyed map of values.
    Map,
    /// The null value.
    Null,
    /// A point in time (milliseconds since the Unix epoch).
    Time,
    /// An opaque value owned by the embedder.
    Dynamic,
}

impl ValueKind {
    /// The lowercase name of this kind, as reported by the `type` operation.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Int => "int",
            ValueKind::Bool => "bool",
            ValueKind::List => "list",
            ValueKind::Map => "map",
            ValueKind::Null => "null",
            ValueKind::Time => "time",
            ValueKind::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
