//! Parse error types for tag expressions.

use thiserror::Error;

/// An error that occurred while building an argument tree.
///
/// Structural errors are parse-time conditions: they are surfaced to the
/// caller constructing the argument so a bad field fails to load, rather
/// than degrading at evaluation time.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A `<{` whose matching `}>` never arrives before end of input.
    #[error("unclosed tag at {line}:{column}")]
    UnclosedTag { line: usize, column: usize },
}
