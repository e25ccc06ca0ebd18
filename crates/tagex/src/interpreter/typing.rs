//! Static result-kind propagation.
//!
//! Determines the result kind of an argument without executing it, by
//! chasing declared return kinds through the registry. Typing is an
//! optimization and validation aid, not a gate: an unregistered key
//! propagates the generic `Text` kind rather than failing.

use crate::interpreter::HandlerRegistry;
use crate::parser::{Argument, ArgumentBit, Link};
use crate::types::{Value, ValueKind};

/// The static result kind of an argument.
///
/// Single-bit arguments keep their native kind (a literal's inferred kind,
/// or a chain's propagated kind); anything mixed renders to text.
pub fn propagate(argument: &Argument, registry: &HandlerRegistry) -> ValueKind {
    match argument.bits.as_slice() {
        [ArgumentBit::Text(text)] => literal_kind(text),
        [ArgumentBit::Chain { links, .. }] => chain_kind(links, registry),
        _ => ValueKind::Text,
    }
}

/// Infer a literal's kind directly, with no registry lookup.
pub fn literal_kind(text: &str) -> ValueKind {
    if parse_numeral(text).is_some() {
        ValueKind::Int
    } else if text == "true" || text == "false" {
        ValueKind::Bool
    } else {
        ValueKind::Text
    }
}

/// Pre-parse a literal into its native value, so evaluation never re-parses.
pub(crate) fn literal_value(text: &str) -> Value {
    if let Some(n) = parse_numeral(text) {
        Value::Int(n)
    } else if text == "true" {
        Value::Bool(true)
    } else if text == "false" {
        Value::Bool(false)
    } else {
        Value::Text(text.to_string())
    }
}

/// Parse a canonical integer numeral. Forms that would not render back to
/// the same text (`05`, `+5`) stay literal text, preserving the round-trip
/// invariant for literal-only fields.
fn parse_numeral(text: &str) -> Option<i64> {
    let n = text.parse::<i64>().ok()?;
    (n.to_string() == text).then_some(n)
}

/// Follow a chain's declared return kinds link by link.
fn chain_kind(links: &[Link], registry: &HandlerRegistry) -> ValueKind {
    let mut links = links.iter();
    let Some(base) = links.next() else {
        return ValueKind::Text;
    };
    let Some(mut kind) = registry.base_return_kind(&base.key) else {
        return ValueKind::Text;
    };
    for link in links {
        let Some(next) = registry.member_return_kind(kind, &link.key) else {
            return ValueKind::Text;
        };
        kind = next;
    }
    kind
}
