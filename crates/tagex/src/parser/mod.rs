//! Tag expression parser.
//!
//! This module turns raw text fields into [`Argument`] trees: alternating
//! literal-text spans and `<{...}>` tag chains, with bracketed link
//! parameters recursively parsed as nested arguments. The produced tree is
//! immutable and can be resolved and evaluated any number of times.

pub mod ast;
mod chain;
mod escape;
pub mod error;
mod template;

pub use ast::{Argument, ArgumentBit, Link};
pub use error::ParseError;
pub use escape::{escape, unescape};
pub use template::parse_argument;
