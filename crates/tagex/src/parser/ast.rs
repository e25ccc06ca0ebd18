//! Public AST types for parsed tag arguments.
//!
//! These types are public to enable external tooling (linters, inspectors)
//! on top of the parser.

use std::fmt;

/// A fully parsed textual field: an ordered sequence of bits.
///
/// Invariant: concatenating each bit's `Display` form reproduces, modulo
/// escaping, the original source text. Arguments are built once at parse
/// time and evaluated many times against different contexts.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub bits: Vec<ArgumentBit>,
}

/// One bit of an argument: literal text or a tag chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentBit {
    /// Literal text, returned verbatim.
    Text(String),
    /// A tag chain: `<{key[param].key[param]...}>`, optionally with a
    /// fallback argument substituted when the chain fails to resolve.
    Chain {
        links: Vec<Link>,
        fallback: Option<Argument>,
    },
}

/// One link in a chain: a lowercase key plus an optional bracketed
/// parameter. The first link of a chain is the base lookup; later links are
/// member operations applied to the prior link's result.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub key: String,
    pub parameter: Option<Argument>,
}

impl Argument {
    /// An argument holding a single literal text bit.
    pub fn text(text: impl Into<String>) -> Argument {
        Argument {
            bits: vec![ArgumentBit::Text(text.into())],
        }
    }

    /// If this argument is a single literal text bit, return the text.
    pub fn single_text(&self) -> Option<&str> {
        match self.bits.as_slice() {
            [ArgumentBit::Text(text)] => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ArgumentBit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentBit::Text(text) => write!(f, "{text}"),
            ArgumentBit::Chain { links, fallback } => {
                write!(f, "<{{")?;
                let mut first = true;
                for link in links {
                    if !first {
                        write!(f, ".")?;
                    }
                    first = false;
                    write!(f, "{link}")?;
                }
                if let Some(fallback) = fallback {
                    write!(f, "|{fallback}")?;
                }
                write!(f, "}}>")
            }
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        if let Some(parameter) = &self.parameter {
            write!(f, "[{parameter}]")?;
        }
        Ok(())
    }
}
