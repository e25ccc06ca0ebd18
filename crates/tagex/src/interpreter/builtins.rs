//! Built-in base and member operations.
//!
//! The core ships a deliberately small set; embedders register their own
//! domain operations through the same surface. All handlers are plain fn
//! pointers with the registry's signatures.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::interpreter::EvalContext;
use crate::interpreter::error::{HandlerError, RegistryError};
use crate::interpreter::registry::HandlerRegistry;
use crate::interpreter::typing::literal_value;
use crate::types::{Value, ValueKind};

/// Register every built-in operation into `registry`.
pub fn install(registry: &mut HandlerRegistry) -> Result<(), RegistryError> {
    registry.register_base("text", ValueKind::Text, base_text)?;
    registry.register_base("bool", ValueKind::Bool, base_bool)?;
    registry.register_base("int", ValueKind::Int, base_int)?;
    registry.register_base("list", ValueKind::List, base_list)?;
    registry.register_base("map", ValueKind::Map, base_map)?;
    registry.register_base("null", ValueKind::Null, base_null)?;
    registry.register_base("time", ValueKind::Time, base_time)?;
    registry.register_base("var", ValueKind::Dynamic, base_var)?;
    registry.register_base("cvar", ValueKind::Map, base_cvar)?;

    // Every kind reports its own name through `type`.
    for kind in [
        ValueKind::Text,
        ValueKind::Int,
        ValueKind::Bool,
        ValueKind::List,
        ValueKind::Map,
        ValueKind::Null,
        ValueKind::Time,
        ValueKind::Dynamic,
    ] {
        registry.register_member(kind, "type", ValueKind::Text, member_type)?;
    }

    registry.register_member(ValueKind::Text, "upper", ValueKind::Text, text_upper)?;
    registry.register_member(ValueKind::Text, "lower", ValueKind::Text, text_lower)?;
    registry.register_member(ValueKind::Text, "len", ValueKind::Int, text_len)?;

    registry.register_member(ValueKind::Int, "add", ValueKind::Int, int_add)?;
    registry.register_member(ValueKind::Int, "sub", ValueKind::Int, int_sub)?;

    registry.register_member(ValueKind::Bool, "not", ValueKind::Bool, bool_not)?;

    registry.register_member(ValueKind::List, "get", ValueKind::Dynamic, list_get)?;
    registry.register_member(ValueKind::List, "len", ValueKind::Int, list_len)?;
    registry.register_member(ValueKind::List, "join", ValueKind::Text, list_join)?;

    registry.register_member(ValueKind::Map, "get", ValueKind::Dynamic, map_get)?;
    registry.register_member(ValueKind::Map, "len", ValueKind::Int, map_len)?;

    registry.register_member(ValueKind::Time, "epoch", ValueKind::Int, time_epoch)?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Parameter helpers
// ---------------------------------------------------------------------------

fn required<'v>(name: &str, parameter: Option<&'v Value>) -> Result<&'v Value, HandlerError> {
    parameter.ok_or_else(|| HandlerError::MissingParameter {
        name: name.to_string(),
    })
}

fn int_parameter(name: &str, parameter: Option<&Value>) -> Result<i64, HandlerError> {
    let value = required(name, parameter)?;
    if let Value::Int(n) = value {
        return Ok(*n);
    }
    value
        .to_string()
        .parse::<i64>()
        .map_err(|_| HandlerError::BadParameter {
            name: name.to_string(),
            message: format!("expected an integer, got '{value}'"),
        })
}

// ---------------------------------------------------------------------------
// Bases
// ---------------------------------------------------------------------------

/// `text[x]`: echo the parameter as text. No parameter yields empty text.
fn base_text(_ctx: &EvalContext<'_>, parameter: Option<&Value>) -> Result<Value, HandlerError> {
    Ok(Value::Text(
        parameter.map(ToString::to_string).unwrap_or_default(),
    ))
}

/// `bool[true]`: a boolean literal, or a chain result coerced from its text.
fn base_bool(_ctx: &EvalContext<'_>, parameter: Option<&Value>) -> Result<Value, HandlerError> {
    let value = required("bool", parameter)?;
    if let Value::Bool(b) = value {
        return Ok(Value::Bool(*b));
    }
    match value.to_string().as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        other => Err(HandlerError::BadParameter {
            name: "bool".to_string(),
            message: format!("expected true or false, got '{other}'"),
        }),
    }
}

/// `int[5]`: an integer literal or coercion.
fn base_int(_ctx: &EvalContext<'_>, parameter: Option<&Value>) -> Result<Value, HandlerError> {
    int_parameter("int", parameter).map(Value::Int)
}

/// `list[a.b.c]`: a list of dot-separated items, each literal-parsed.
fn base_list(_ctx: &EvalContext<'_>, parameter: Option<&Value>) -> Result<Value, HandlerError> {
    let Some(value) = parameter else {
        return Ok(Value::List(Vec::new()));
    };
    if let Value::List(items) = value {
        return Ok(Value::List(items.clone()));
    }
    let text = value.to_string();
    if text.is_empty() {
        return Ok(Value::List(Vec::new()));
    }
    Ok(Value::List(text.split('.').map(literal_value).collect()))
}

/// `map[k.v.k.v]`: a map of dot-separated key/value pairs.
fn base_map(_ctx: &EvalContext<'_>, parameter: Option<&Value>) -> Result<Value, HandlerError> {
    let Some(value) = parameter else {
        return Ok(Value::Map(BTreeMap::new()));
    };
    if let Value::Map(entries) = value {
        return Ok(Value::Map(entries.clone()));
    }
    let text = value.to_string();
    if text.is_empty() {
        return Ok(Value::Map(BTreeMap::new()));
    }
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() % 2 != 0 {
        return Err(HandlerError::BadParameter {
            name: "map".to_string(),
            message: "expected dot-separated key.value pairs".to_string(),
        });
    }
    let mut entries = BTreeMap::new();
    for pair in parts.chunks(2) {
        entries.insert(pair[0].to_string(), literal_value(pair[1]));
    }
    Ok(Value::Map(entries))
}

/// `null`: the null value; renders as the literal text `null`.
fn base_null(_ctx: &EvalContext<'_>, _parameter: Option<&Value>) -> Result<Value, HandlerError> {
    Ok(Value::Null)
}

/// `time`: the current time in milliseconds since the Unix epoch.
fn base_time(_ctx: &EvalContext<'_>, _parameter: Option<&Value>) -> Result<Value, HandlerError> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64);
    Ok(Value::Time(millis))
}

/// `var[name]`: read a variable from the caller's scope.
fn base_var(ctx: &EvalContext<'_>, parameter: Option<&Value>) -> Result<Value, HandlerError> {
    let name = required("var", parameter)?.to_string();
    ctx.var(&name)
        .ok_or(HandlerError::UnknownVariable { name })
}

/// `cvar[name]`: a control variable's projections as a map with `text`,
/// `number`, and `boolean` entries.
fn base_cvar(ctx: &EvalContext<'_>, parameter: Option<&Value>) -> Result<Value, HandlerError> {
    let name = required("cvar", parameter)?.to_string();
    let Some(entry) = ctx.cvar(&name) else {
        return Err(HandlerError::UnknownVariable { name });
    };
    let mut entries = BTreeMap::new();
    entries.insert("text".to_string(), Value::Text(entry.text));
    entries.insert("number".to_string(), Value::Int(entry.number));
    entries.insert("boolean".to_string(), Value::Bool(entry.boolean));
    Ok(Value::Map(entries))
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

/// `.type`: the receiver's kind name, on every kind.
fn member_type(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    _parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    Ok(Value::Text(receiver.kind().name().to_string()))
}

fn text_upper(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    _parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    Ok(Value::Text(receiver.to_string().to_uppercase()))
}

fn text_lower(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    _parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    Ok(Value::Text(receiver.to_string().to_lowercase()))
}

fn text_len(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    _parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    Ok(Value::Int(receiver.to_string().chars().count() as i64))
}

fn int_add(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    let amount = int_parameter("add", parameter)?;
    receiver
        .as_int()
        .unwrap_or(0)
        .checked_add(amount)
        .map(Value::Int)
        .ok_or_else(|| HandlerError::BadParameter {
            name: "add".to_string(),
            message: format!("integer overflow adding {amount}"),
        })
}

fn int_sub(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    let amount = int_parameter("sub", parameter)?;
    receiver
        .as_int()
        .unwrap_or(0)
        .checked_sub(amount)
        .map(Value::Int)
        .ok_or_else(|| HandlerError::BadParameter {
            name: "sub".to_string(),
            message: format!("integer overflow subtracting {amount}"),
        })
}

fn bool_not(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    _parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    Ok(Value::Bool(!receiver.as_bool().unwrap_or(false)))
}

/// `.get[i]`: 0-based list index.
fn list_get(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    let index = int_parameter("get", parameter)?;
    let items = receiver.as_list().unwrap_or(&[]);
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .ok_or_else(|| HandlerError::BadParameter {
            name: "get".to_string(),
            message: format!("index {index} out of range for {} items", items.len()),
        })
}

fn list_len(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    _parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    Ok(Value::Int(
        receiver.as_list().map_or(0, |items| items.len()) as i64,
    ))
}

/// `.join[sep]`: items rendered and joined; empty separator by default.
fn list_join(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    let separator = parameter.map(ToString::to_string).unwrap_or_default();
    let rendered: Vec<String> = receiver
        .as_list()
        .unwrap_or(&[])
        .iter()
        .map(ToString::to_string)
        .collect();
    Ok(Value::Text(rendered.join(&separator)))
}

/// `.get[key]`: map lookup; a missing key yields null rather than a fault,
/// so projection chains stay composable.
fn map_get(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    let key = required("get", parameter)?.to_string();
    Ok(receiver
        .as_map()
        .and_then(|entries| entries.get(&key))
        .cloned()
        .unwrap_or(Value::Null))
}

fn map_len(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    _parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    Ok(Value::Int(
        receiver.as_map().map_or(0, |entries| entries.len()) as i64,
    ))
}

/// `.epoch`: the time value as a plain integer.
fn time_epoch(
    _ctx: &EvalContext<'_>,
    receiver: &Value,
    _parameter: Option<&Value>,
) -> Result<Value, HandlerError> {
    match receiver {
        Value::Time(millis) => Ok(Value::Int(*millis)),
        other => Ok(Value::Int(other.as_int().unwrap_or(0))),
    }
}
