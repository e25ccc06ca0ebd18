mod kind;
mod value;

pub use kind::ValueKind;
pub use value::Value;
