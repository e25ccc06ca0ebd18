//! Integration tests for delimiter escaping.

use tagex::{ArgumentBit, escape, parse_argument, unescape};

#[test]
fn unescape_inverts_escape() {
    for text in [
        "",
        "plain",
        "<{tag}>",
        "open <{ close }> both",
        "<{<{nested}>}>",
        "dots.and&amps",
    ] {
        assert_eq!(unescape(&escape(text)), text);
    }
}

#[test]
fn escape_leaves_plain_text_alone() {
    assert_eq!(escape("no delimiters here"), "no delimiters here");
}

#[test]
fn escaped_delimiters_are_not_reparsed_as_tags() {
    let protected = escape("<{not.a.tag}>");
    let arg = parse_argument(&protected).unwrap();
    assert_eq!(arg.bits.len(), 1);
    assert!(matches!(&arg.bits[0], ArgumentBit::Text(_)));
    assert_eq!(unescape(&arg.to_string()), "<{not.a.tag}>");
}

#[test]
fn escaped_text_contains_no_delimiters() {
    let protected = escape("a <{ b }> c <{d.e}> f");
    assert!(!protected.contains("<{"));
    assert!(!protected.contains("}>"));
}
