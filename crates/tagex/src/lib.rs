pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    CollectingSink, CvarEntry, CvarLookup, DiagnosticsSink, EvalContext, HandlerError,
    HandlerRegistry, NullSink, RegistryError, ResolutionEvent, ResolvedArgument, Severity,
    VarLookup, Verbosity, compute_suggestions, eval_argument, evaluate, propagate, resolve,
};
pub use parser::{Argument, ArgumentBit, Link, ParseError, escape, parse_argument, unescape};
pub use types::{Value, ValueKind};

/// Creates a `HashMap<String, Value>` from key-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, booleans, or strings directly. The resulting map implements
/// the variable-lookup capability expected by [`EvalContext`].
///
/// # Example
///
/// ```
/// use tagex::{vars, Value};
///
/// let v = vars! { "count" => 3, "name" => "Alice" };
/// assert_eq!(v.len(), 2);
/// assert_eq!(v["count"], Value::Int(3));
/// assert_eq!(v["name"], Value::Text("Alice".to_string()));
/// ```
#[macro_export]
macro_rules! vars {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
