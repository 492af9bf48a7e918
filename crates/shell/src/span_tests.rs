// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn span_slice_and_merge() {
    let source = "echo hello";
    let a = Span::new(0, 4);
    let b = Span::new(5, 10);
    assert_eq!(a.slice(source), "echo");
    assert_eq!(b.slice(source), "hello");
    assert_eq!(a.merge(b), Span::new(0, 10));
    assert_eq!(a.len(), 4);
    assert!(Span::empty(3).is_empty());
}

#[test]
fn span_slice_out_of_bounds_is_empty() {
    assert_eq!(Span::new(4, 40).slice("echo"), "");
}

#[yare::parameterized(
    plain          = { "abc",       Position::new(1, 4) },
    line_feed      = { "ab\ncd",    Position::new(2, 3) },
    crlf_is_one    = { "ab\r\ncd",  Position::new(2, 3) },
    lone_cr        = { "ab\rcd",    Position::new(2, 3) },
    blank_lines    = { "\n\n\n",    Position::new(4, 1) },
    multibyte      = { "héllo",     Position::new(1, 6) },
    empty          = { "",          Position::new(1, 1) },
)]
fn position_advance(text: &str, expected: Position) {
    assert_eq!(Position::START.advance(text), expected);
}

#[test]
fn position_of_offset_counts_characters() {
    let source = "échо\nbad>";
    let offset = source.find('>').unwrap();
    assert_eq!(Position::of_offset(source, offset), Position::new(2, 4));
}

#[test]
fn position_of_offset_clamps_past_end() {
    assert_eq!(Position::of_offset("ab", 99), Position::new(1, 3));
}

#[test]
fn location_of_multiline_span() {
    let source = "echo  \n\nhi";
    let location = Location::of_span(source, Span::new(4, 8));
    assert_eq!(location.start, Position::new(1, 5));
    assert_eq!(location.end, Position::new(3, 1));
}

#[test]
fn locate_span_on_second_line() {
    let source = "echo hello\necho world";
    let (line, col, content) = locate_span(source, Span::new(11, 15));
    assert_eq!(line, 2);
    assert_eq!(col, 0);
    assert_eq!(content, "echo world");
}

#[test]
fn context_snippet_points_at_span() {
    let snippet = context_snippet("ls -la > >", Span::new(9, 10), 20);
    assert_eq!(snippet, "ls -la > >\n         ^");
}

#[test]
fn diagnostic_context_shows_line_and_column() {
    let source = "echo\nbad>";
    let diag = diagnostic_context(source, Span::new(8, 9), "expected IDENTIFIER");
    assert!(diag.contains("error: expected IDENTIFIER"));
    assert!(diag.contains("line 2, column 4"));
    assert!(diag.contains("  2 | bad>"));
    assert!(diag.ends_with("   |    ^"));
}
