//! Escaping for structural delimiter sequences.
//!
//! Two independent passes exist:
//!
//! - [`escape`]/[`unescape`] protect the tag delimiters `<{` and `}>` with
//!   NUL-prefixed private sentinels, so literal delimiters surviving inside
//!   already-resolved output are not re-interpreted as new tag boundaries.
//!   These are public: embedders use them to inject untrusted text into a
//!   field before it is parsed.
//! - The `&dot`/`&amp` sentinels protect `.` and `&` while a tag interior
//!   is split into links, so a literal dot inside a bracketed parameter is
//!   not mistaken for a link separator. The splitter writes them during its
//!   scan; [`unescape_splits`] reverses them before parameter text is
//!   re-parsed.

/// Tag open delimiter.
pub const TAG_OPEN: &str = "<{";

/// Tag close delimiter.
pub const TAG_CLOSE: &str = "}>";

// NUL is reserved: it cannot occur in user text, so the sentinels never
// collide with field content.
const ESCAPED_OPEN: &str = "\u{0}{";
const ESCAPED_CLOSE: &str = "\u{0}}";

pub(crate) const ESCAPED_DOT: &str = "&dot";
pub(crate) const ESCAPED_AMP: &str = "&amp";

/// Replace the tag delimiters `<{` and `}>` with private sentinels.
///
/// Exact inverse of [`unescape`]: `unescape(&escape(text)) == text` for any
/// `text` free of the reserved NUL sentinel prefix.
pub fn escape(text: &str) -> String {
    text.replace(TAG_OPEN, ESCAPED_OPEN)
        .replace(TAG_CLOSE, ESCAPED_CLOSE)
}

/// Reverse [`escape`] exactly once.
pub fn unescape(text: &str) -> String {
    text.replace(ESCAPED_OPEN, TAG_OPEN)
        .replace(ESCAPED_CLOSE, TAG_CLOSE)
}

/// Reverse the split protection applied by the chain splitter's scan:
/// `&dot` back to `.` first, then `&amp` back to `&`. The ordering matters;
/// it is the exact inverse of the amp-first protection order.
pub(crate) fn unescape_splits(text: &str) -> String {
    text.replace(ESCAPED_DOT, ".").replace(ESCAPED_AMP, "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape_splits(text: &str) -> String {
        text.replace('&', ESCAPED_AMP).replace('.', ESCAPED_DOT)
    }

    #[test]
    fn split_sentinels_round_trip() {
        for text in ["a.b", "a&b", "&dot", "&amp", "a&dot.b&", ""] {
            assert_eq!(unescape_splits(&escape_splits(text)), text);
        }
    }
}
