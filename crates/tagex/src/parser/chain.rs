//! Chain splitter: turns one tag's interior text into an ordered sequence
//! of links.
//!
//! The interior is scanned once, left to right, tracking `[`/`]` depth and
//! nested `<{`/`}>` depth. A `.` at depth zero separates links; any other
//! `.` (and any `&`) is protected with the split sentinels so it survives
//! into the parameter text. A `|` at depth zero terminates the chain; the
//! remainder of the interior is the raw fallback argument.

use super::ast::{ArgumentBit, Link};
use super::error::ParseError;
use super::escape::{ESCAPED_AMP, ESCAPED_DOT, TAG_CLOSE, TAG_OPEN, unescape_splits};
use super::template::parse_argument;

/// Split a tag interior into a `Chain` argument bit.
pub(crate) fn split_chain(interior: &str) -> Result<ArgumentBit, ParseError> {
    let scan = scan_interior(interior);

    let mut links = Vec::with_capacity(scan.segments.len());
    for segment in &scan.segments {
        links.push(split_link(segment)?);
    }

    let fallback = match scan.fallback {
        Some(text) => Some(parse_argument(text)?),
        None => None,
    };

    Ok(ArgumentBit::Chain { links, fallback })
}

/// Result of the interior scan: protected link segments plus the raw
/// fallback text, if a top-level `|` was present.
struct InteriorScan<'i> {
    segments: Vec<String>,
    fallback: Option<&'i str>,
}

/// Scan the interior once, splitting on top-level dots and protecting
/// everything nested with the split sentinels.
fn scan_interior(interior: &str) -> InteriorScan<'_> {
    let mut segments = vec![String::new()];
    let mut bracket_depth = 0usize;
    let mut tag_depth = 0usize;

    let mut rest = interior;
    while let Some(c) = rest.chars().next() {
        // Nested tag delimiters are two-character tokens; consume them
        // whole so their characters are never split or escaped.
        if rest.starts_with(TAG_OPEN) {
            tag_depth += 1;
            push(&mut segments, TAG_OPEN);
            rest = &rest[TAG_OPEN.len()..];
            continue;
        }
        if tag_depth > 0 && rest.starts_with(TAG_CLOSE) {
            tag_depth -= 1;
            push(&mut segments, TAG_CLOSE);
            rest = &rest[TAG_CLOSE.len()..];
            continue;
        }

        let nested = bracket_depth > 0 || tag_depth > 0;
        match c {
            '[' if tag_depth == 0 => {
                bracket_depth += 1;
                push(&mut segments, "[");
            }
            ']' if tag_depth == 0 && bracket_depth > 0 => {
                bracket_depth -= 1;
                push(&mut segments, "]");
            }
            '.' if nested => push(&mut segments, ESCAPED_DOT),
            '&' if nested => push(&mut segments, ESCAPED_AMP),
            '.' => segments.push(String::new()),
            '|' if !nested => {
                // Everything after a top-level `|` is the fallback, kept
                // raw: it is re-parsed wholesale as its own argument.
                return InteriorScan {
                    segments,
                    fallback: Some(&rest[1..]),
                };
            }
            _ => {
                if let Some(last) = segments.last_mut() {
                    last.push(c);
                }
            }
        }
        rest = &rest[c.len_utf8()..];
    }

    InteriorScan {
        segments,
        fallback: None,
    }
}

fn push(segments: &mut [String], s: &str) {
    if let Some(last) = segments.last_mut() {
        last.push_str(s);
    }
}

/// Split one protected segment into a key and an optional parameter.
///
/// A segment carries a parameter only when it ends with `]` and an earlier
/// `[` opens it; otherwise the whole segment is the key. Keys are folded to
/// lowercase here, once, so lookups never case-fold again.
fn split_link(segment: &str) -> Result<Link, ParseError> {
    if segment.ends_with(']')
        && let Some(open) = segment.find('[')
    {
        let key = segment[..open].to_lowercase();
        let raw = &segment[open + 1..segment.len() - 1];
        let parameter = parse_argument(&unescape_splits(raw))?;
        return Ok(Link {
            key,
            parameter: Some(parameter),
        });
    }
    Ok(Link {
        key: unescape_splits(segment).to_lowercase(),
        parameter: None,
    })
}
