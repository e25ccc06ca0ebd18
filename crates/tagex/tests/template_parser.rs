//! Integration tests for argument tree building and chain splitting.

use tagex::{Argument, ArgumentBit, ParseError, parse_argument};

fn chain_links(bit: &ArgumentBit) -> &[tagex::Link] {
    match bit {
        ArgumentBit::Chain { links, .. } => links,
        ArgumentBit::Text(_) => panic!("expected chain bit"),
    }
}

// =============================================================================
// Literal text
// =============================================================================

#[test]
fn pure_literal() {
    let arg = parse_argument("Hello, world!").unwrap();
    assert_eq!(arg.bits, vec![ArgumentBit::Text("Hello, world!".into())]);
}

#[test]
fn empty_string() {
    let arg = parse_argument("").unwrap();
    assert_eq!(arg.bits, vec![]);
}

#[test]
fn multiline_literal() {
    let arg = parse_argument("Line 1\nLine 2\nLine 3").unwrap();
    assert_eq!(
        arg.bits,
        vec![ArgumentBit::Text("Line 1\nLine 2\nLine 3".into())]
    );
}

#[test]
fn lone_angle_and_brace_are_literal() {
    let arg = parse_argument("a < b { c } d > e").unwrap();
    assert_eq!(arg.bits, vec![ArgumentBit::Text("a < b { c } d > e".into())]);
}

#[test]
fn stray_close_delimiter_is_literal() {
    let arg = parse_argument("a}>b").unwrap();
    assert_eq!(arg.bits, vec![ArgumentBit::Text("a}>b".into())]);
}

// =============================================================================
// Single tags
// =============================================================================

#[test]
fn single_link_no_parameter() {
    let arg = parse_argument("<{name}>").unwrap();
    assert_eq!(arg.bits.len(), 1);
    let links = chain_links(&arg.bits[0]);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].key, "name");
    assert!(links[0].parameter.is_none());
}

#[test]
fn keys_are_lowercased_at_parse_time() {
    let arg = parse_argument("<{NAME.Upper}>").unwrap();
    let links = chain_links(&arg.bits[0]);
    assert_eq!(links[0].key, "name");
    assert_eq!(links[1].key, "upper");
}

#[test]
fn link_with_parameter() {
    let arg = parse_argument("<{text[b]}>").unwrap();
    let links = chain_links(&arg.bits[0]);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].key, "text");
    let param = links[0].parameter.as_ref().unwrap();
    assert_eq!(param.bits, vec![ArgumentBit::Text("b".into())]);
}

#[test]
fn mixed_literal_and_tags() {
    let arg = parse_argument("a<{b}>c").unwrap();
    assert_eq!(arg.bits.len(), 3);
    assert_eq!(arg.bits[0], ArgumentBit::Text("a".into()));
    assert_eq!(arg.bits[2], ArgumentBit::Text("c".into()));
    assert_eq!(chain_links(&arg.bits[1])[0].key, "b");
}

// =============================================================================
// Nesting and bracket/dot scoping
// =============================================================================

#[test]
fn nested_tag_inside_parameter() {
    let arg = parse_argument("<{a.b[<{c}>]}>").unwrap();
    assert_eq!(arg.bits.len(), 1);
    let links = chain_links(&arg.bits[0]);
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].key, "a");
    assert_eq!(links[1].key, "b");

    let param = links[1].parameter.as_ref().unwrap();
    assert_eq!(param.bits.len(), 1);
    let inner = chain_links(&param.bits[0]);
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].key, "c");
}

#[test]
fn dots_inside_brackets_do_not_split_links() {
    let arg = parse_argument("<{list[1.2.3]}>").unwrap();
    let links = chain_links(&arg.bits[0]);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].key, "list");
    let param = links[0].parameter.as_ref().unwrap();
    assert_eq!(param.single_text(), Some("1.2.3"));
}

#[test]
fn dots_after_brackets_still_split() {
    let arg = parse_argument("<{list[1.2.3].get[2]}>").unwrap();
    let links = chain_links(&arg.bits[0]);
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].key, "list");
    assert_eq!(links[1].key, "get");
    assert_eq!(
        links[1].parameter.as_ref().unwrap().single_text(),
        Some("2")
    );
}

#[test]
fn nested_brackets_stay_in_parameter() {
    let arg = parse_argument("<{a[b[c]]}>").unwrap();
    let links = chain_links(&arg.bits[0]);
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].key, "a");
    assert_eq!(
        links[0].parameter.as_ref().unwrap().single_text(),
        Some("b[c]")
    );
}

#[test]
fn bracket_must_close_segment_to_count() {
    // A `]` that is not the final character leaves the segment as a key.
    let arg = parse_argument("<{a]b}>").unwrap();
    let links = chain_links(&arg.bits[0]);
    assert_eq!(links[0].key, "a]b");
    assert!(links[0].parameter.is_none());
}

#[test]
fn ampersand_in_parameter_survives() {
    let arg = parse_argument("<{text[a&b]}>").unwrap();
    let links = chain_links(&arg.bits[0]);
    assert_eq!(
        links[0].parameter.as_ref().unwrap().single_text(),
        Some("a&b")
    );
}

// =============================================================================
// Fallbacks
// =============================================================================

#[test]
fn fallback_after_pipe() {
    let arg = parse_argument("<{missing|backup}>").unwrap();
    match &arg.bits[0] {
        ArgumentBit::Chain { links, fallback } => {
            assert_eq!(links[0].key, "missing");
            let fallback = fallback.as_ref().unwrap();
            assert_eq!(fallback.single_text(), Some("backup"));
        }
        ArgumentBit::Text(_) => panic!("expected chain bit"),
    }
}

#[test]
fn fallback_may_contain_tags() {
    let arg = parse_argument("<{missing|<{text[b]}>}>").unwrap();
    match &arg.bits[0] {
        ArgumentBit::Chain { fallback, .. } => {
            let fallback = fallback.as_ref().unwrap();
            assert_eq!(chain_links(&fallback.bits[0])[0].key, "text");
        }
        ArgumentBit::Text(_) => panic!("expected chain bit"),
    }
}

#[test]
fn pipe_inside_brackets_is_not_a_fallback() {
    let arg = parse_argument("<{text[a|b]}>").unwrap();
    match &arg.bits[0] {
        ArgumentBit::Chain { links, fallback } => {
            assert!(fallback.is_none());
            assert_eq!(
                links[0].parameter.as_ref().unwrap().single_text(),
                Some("a|b")
            );
        }
        ArgumentBit::Text(_) => panic!("expected chain bit"),
    }
}

// =============================================================================
// Structural errors
// =============================================================================

#[test]
fn unclosed_tag_is_a_parse_error() {
    let err = parse_argument("before <{oops").unwrap_err();
    assert!(matches!(err, ParseError::UnclosedTag { line: 1, .. }));
}

#[test]
fn unclosed_nested_tag_is_a_parse_error() {
    let err = parse_argument("<{a[<{b}>").unwrap_err();
    assert!(matches!(err, ParseError::UnclosedTag { .. }));
}

// =============================================================================
// Source reconstruction
// =============================================================================

#[test]
fn display_reproduces_source() {
    for source in [
        "plain text",
        "<{name}>",
        "a<{list[1.2.3].get[2]}>b",
        "<{a.b[<{c}>]}>",
        "<{missing|backup}>",
    ] {
        let arg: Argument = parse_argument(source).unwrap();
        assert_eq!(arg.to_string(), source);
    }
}
