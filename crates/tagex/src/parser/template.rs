//! Argument tree builder using winnow.
//!
//! Walks a whole text field once, alternating plain-text spans and tag
//! spans. Tag interiors are captured with a depth counter balancing nested
//! `<{`/`}>` pairs, then handed to the chain splitter. Unbalanced tag
//! delimiters are a hard parse error, surfaced to the caller constructing
//! the argument.

use winnow::combinator::{alt, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::any;

use super::ast::{Argument, ArgumentBit};
use super::chain::split_chain;
use super::error::ParseError;
use super::escape::{TAG_CLOSE, TAG_OPEN};

/// Parse a text field into an argument tree.
pub fn parse_argument(input: &str) -> Result<Argument, ParseError> {
    let mut remaining = input;
    match pieces(&mut remaining) {
        Ok(parsed) => {
            if remaining.is_empty() {
                assemble(parsed)
            } else {
                let (line, column) = calculate_position(input, remaining);
                Err(ParseError::Syntax {
                    line,
                    column,
                    message: format!(
                        "unexpected character: '{}'",
                        remaining.chars().next().unwrap_or('?')
                    ),
                })
            }
        }
        Err(ErrMode::Cut(_)) => {
            // The only cut site is an interior that ran out of input before
            // its matching close delimiter.
            let (line, column) = calculate_position(input, remaining);
            Err(ParseError::UnclosedTag { line, column })
        }
        Err(e) => {
            let (line, column) = calculate_position(input, remaining);
            Err(ParseError::Syntax {
                line,
                column,
                message: format!("parse error: {}", e),
            })
        }
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let last_newline = consumed_str.rfind('\n');
    let column = match last_newline {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

/// One raw piece of a field: a literal character or a captured tag
/// interior. Chain splitting happens after the scan so nested parse errors
/// carry their own positions.
enum RawPiece<'i> {
    Literal(char),
    Tag(&'i str),
}

/// Parse the whole field into raw pieces.
fn pieces<'i>(input: &mut &'i str) -> ModalResult<Vec<RawPiece<'i>>> {
    repeat(0.., piece).parse_next(input)
}

/// Parse a single piece (tag span or literal character).
fn piece<'i>(input: &mut &'i str) -> ModalResult<RawPiece<'i>> {
    alt((tag_piece, literal_char)).parse_next(input)
}

/// Parse one tag span, yielding its interior text.
fn tag_piece<'i>(input: &mut &'i str) -> ModalResult<RawPiece<'i>> {
    preceded(TAG_OPEN, tag_interior)
        .map(RawPiece::Tag)
        .parse_next(input)
}

/// Capture everything up to the matching `}>`, balancing nested tags.
///
/// Cuts (rather than backtracks) on end of input so an unclosed tag is an
/// error instead of silently re-scanning the text as literals.
fn tag_interior<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let source = *input;
    let mut depth = 1usize;
    let mut offset = 0usize;

    while offset < source.len() {
        let rest = &source[offset..];
        if rest.starts_with(TAG_OPEN) {
            depth += 1;
            offset += TAG_OPEN.len();
        } else if rest.starts_with(TAG_CLOSE) {
            depth -= 1;
            if depth == 0 {
                *input = &source[offset + TAG_CLOSE.len()..];
                return Ok(&source[..offset]);
            }
            offset += TAG_CLOSE.len();
        } else {
            let c = rest.chars().next().unwrap_or('\u{0}');
            offset += c.len_utf8();
        }
    }

    Err(ErrMode::Cut(ContextError::new()))
}

/// Parse a single literal character. Anything that does not start a tag
/// span is literal, including lone `<`, `{`, and a stray `}>` at depth 0.
fn literal_char<'i>(input: &mut &'i str) -> ModalResult<RawPiece<'i>> {
    if input.starts_with(TAG_OPEN) {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    any.map(RawPiece::Literal).parse_next(input)
}

/// Assemble raw pieces into an argument: adjacent literal characters merge
/// into text bits, tag interiors are split into chains.
fn assemble(parsed: Vec<RawPiece<'_>>) -> Result<Argument, ParseError> {
    let mut bits: Vec<ArgumentBit> = Vec::new();
    for raw in parsed {
        match raw {
            RawPiece::Literal(c) => {
                if let Some(ArgumentBit::Text(prev)) = bits.last_mut() {
                    prev.push(c);
                } else {
                    bits.push(ArgumentBit::Text(c.to_string()));
                }
            }
            RawPiece::Tag(interior) => bits.push(split_chain(interior)?),
        }
    }
    Ok(Argument { bits })
}
