//! Error specs
//!
//! Lexical errors pre-empt the grammar; grammar errors surface the first
//! diagnostic as `"<message> at <line>:<column>"`.

use crate::prelude::*;

#[test]
fn control_character_is_a_lex_error() {
    script("echo \u{1}").fails().lex_errors(1).points_at("\u{1}");
}

#[test]
fn lex_error_wins_over_grammar_error() {
    // `| x` alone would be a grammar error.
    script("| x ^").fails().lex_errors(1);
}

#[test]
fn all_unmatched_runs_are_reported() {
    script("a < b\nc ^^ d").fails().lex_errors(2).points_at("<");
}

#[test]
fn missing_redirect_target_at_end_of_input() {
    script("echo\nbad>")
        .fails()
        .syntax_error()
        .says("expected IDENTIFIER, found end of input at 2:4")
        .points_at(">");
}

#[test]
fn missing_redirect_target_before_separator() {
    script("cat > ; ls")
        .fails()
        .syntax_error()
        .says("expected IDENTIFIER, found ';' at 1:7")
        .points_at(";");
}

#[test]
fn unsupported_operator_is_redundant_input() {
    script("ls && pwd")
        .fails()
        .syntax_error()
        .says("redundant input, expected end of input but found '&&' at 1:4");
}

#[test]
fn error_on_a_later_line() {
    script("a\nb\nc >> ")
        .fails()
        .says("expected IDENTIFIER, found end of input at 3:3");
}

#[test]
fn syntax_error_renders_a_caret_diagnostic() {
    let source = "ls\nwc >";
    let failed = script(source).fails();
    let rendered = failed.error().diagnostic(source).unwrap();
    assert!(rendered.contains("line 2, column 4"), "{rendered}");
    assert!(rendered.contains(" 2 | wc >"), "{rendered}");
}

#[test]
fn non_utf8_bytes_are_invalid_input() {
    let err = shgram_shell::parse_bytes(&[b'l', b's', 0xC0]).unwrap_err();
    assert!(matches!(err, ParseError::InvalidInput { .. }), "{err:?}");
}
