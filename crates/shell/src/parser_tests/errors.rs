// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure paths of the public API.

use super::*;
use crate::diagnostic::{DiagnosticCode, DiagnosticKind};
use crate::span::Span;
use yare::parameterized;

// =============================================================================
// Lexical Errors
// =============================================================================

#[test]
fn unmatched_character_fails_before_the_grammar_runs() {
    // The grammar alone would reject `> x` too; only the lex error surfaces.
    let err = parse_err("> x \u{1}");
    let ParseError::Lex { diagnostics } = &err else {
        panic!("expected lex error, got {err:?}");
    };
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::Lex));
    assert_eq!(diagnostics[0].code, DiagnosticCode::UnexpectedCharacter);
    assert_eq!(diagnostics[0].span, Span::new(4, 5));
}

#[test]
fn every_lex_error_is_carried() {
    let err = parse_err("a < b : c");
    assert_eq!(err.diagnostics().len(), 2);
    assert_eq!(
        err.to_string(),
        "2 lexical error(s), first: unexpected character '<', skipped 1 character(s) at 1:3"
    );
    assert_eq!(err.span(), Some(Span::new(2, 3)));
}

#[parameterized(
    less_than = { "cat < in" },
    colon = { "a : b" },
    control = { "\u{7}" },
    non_ascii = { "echo héllo" },
    unterminated_string = { "echo \"oops" },
)]
fn inputs_with_lex_errors(source: &str) {
    assert!(matches!(parse_err(source), ParseError::Lex { .. }));
}

// =============================================================================
// Syntax Errors
// =============================================================================

#[test]
fn missing_redirect_target_is_located_after_the_word() {
    let err = parse_err("echo\nbad>");
    assert_eq!(err.to_string(), "expected IDENTIFIER, found end of input at 2:4");

    let ParseError::Syntax {
        message,
        line,
        column,
        diagnostic,
    } = &err
    else {
        panic!("expected syntax error, got {err:?}");
    };
    assert_eq!(message, "expected IDENTIFIER, found end of input");
    assert_eq!((*line, *column), (2, 4));
    assert_eq!(diagnostic.kind, DiagnosticKind::Parse);
    assert_eq!(diagnostic.code, DiagnosticCode::MismatchedToken);
    assert_eq!(err.diagnostics().len(), 1);
}

#[parameterized(
    pipe = { "ls | wc", "redundant input, expected end of input but found '|' at 1:4" },
    leading_redirect = { "> out", "redundant input, expected end of input but found '>' at 1:1" },
    redirect_then_separator = { "a >; b", "expected IDENTIFIER, found ';' at 1:4" },
    double_then_redirect = { "a >> > b", "expected IDENTIFIER, found '>' at 1:6" },
    comment = { "ls # list", "redundant input, expected end of input but found '# list' at 1:4" },
    string_argument = { "echo \"hi\"", r#"redundant input, expected end of input but found '\"hi\"' at 1:6"# },
    keyword = { "if true", "redundant input, expected end of input but found 'if' at 1:1" },
)]
fn syntax_error_messages(source: &str, expected: &str) {
    let err = parse_err(source);
    assert!(matches!(err, ParseError::Syntax { .. }), "{err:?}");
    assert_eq!(err.to_string(), expected);
}

#[test]
fn lone_equal_is_its_own_token() {
    let err = parse_err("echo a = b");
    assert_eq!(
        err.to_string(),
        "redundant input, expected end of input but found '=' at 1:8"
    );
    assert_eq!(err.span(), Some(Span::new(7, 8)));

    // Attached to a word it stays part of the identifier.
    let output = parse_ok("echo a=b");
    assert_eq!(commands(&output), vec![vec!["echo", "a=b"]]);
}

#[test]
fn syntax_error_renders_context() {
    let source = "ls >\n";
    let err = parse_err(source);
    assert_eq!(err.to_string(), "expected IDENTIFIER, found '\\n' at 1:5");

    let rendered = err.diagnostic(source).unwrap();
    assert!(rendered.starts_with("error: expected IDENTIFIER"));
    assert!(rendered.contains("line 1, column 5"));
    assert_eq!(err.context(source, 4).unwrap(), "ls >\n\n    ^");
}

// =============================================================================
// Invalid Input
// =============================================================================

#[test]
fn non_utf8_bytes_are_invalid_input() {
    let err = parse_bytes(b"echo \xff").unwrap_err();
    assert!(matches!(err, ParseError::InvalidInput { .. }));
    assert!(err.to_string().starts_with("invalid input: "));
    assert!(err.span().is_none());
    assert!(err.diagnostics().is_empty());
}

#[test]
fn utf8_bytes_parse_like_text() {
    let from_bytes = parse_bytes(b"ls > out").unwrap();
    assert_eq!(from_bytes, parse_ok("ls > out"));
}
