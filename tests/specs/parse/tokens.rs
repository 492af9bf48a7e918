//! Tokenizer specs
//!
//! Longest match, keyword fallback, skipped text and positions.

use crate::prelude::*;

#[test]
fn double_redirect_is_one_token_not_two() {
    script("a >> b").passes().kinds(&[
        TokenKind::Identifier,
        TokenKind::RedirectionForwardDouble,
        TokenKind::Identifier,
    ]);
}

#[test]
fn separated_redirects_stay_single() {
    script("a > b > c").passes().kinds(&[
        TokenKind::Identifier,
        TokenKind::RedirectionForwardSingle,
        TokenKind::Identifier,
        TokenKind::RedirectionForwardSingle,
        TokenKind::Identifier,
    ]);
}

#[test]
fn keyword_followed_by_word_characters_is_an_identifier() {
    script("iffy")
        .passes()
        .kinds(&[TokenKind::Identifier])
        .texts(&["iffy"]);
    script("echo fiction thenceforth elsewhere")
        .passes()
        .kinds(&[TokenKind::Identifier; 4]);
}

#[test]
fn whitespace_and_line_continuation_produce_no_tokens() {
    let passed = script("echo  \\\nhi")
        .passes()
        .kinds(&[TokenKind::Identifier, TokenKind::Identifier])
        .texts(&["echo", "hi"]);

    let hi = &passed.output().tokens[1];
    assert_eq!((hi.span.start, hi.span.end), (8, 10));
    assert_eq!((hi.location.start.line, hi.location.start.column), (2, 1));
}

#[test]
fn blank_lines_collapse_into_one_newline() {
    script("a\n\n   \n\nb")
        .passes()
        .kinds(&[TokenKind::Identifier, TokenKind::Newline, TokenKind::Identifier]);
}

#[test]
fn identifiers_take_path_and_flag_characters() {
    script("cp -r ./src/*.rs ~/backup/ --exclude=.git")
        .passes()
        .texts(&["cp", "-r", "./src/*.rs", "~/backup/", "--exclude=.git"]);
}

#[test]
fn dollar_is_part_of_a_word_unless_it_opens_a_substitution() {
    script("echo $HOME")
        .passes()
        .texts(&["echo", "$HOME"]);
    script("echo $(pwd)")
        .fails()
        .syntax_error()
        .points_at("$(");
}

#[test]
fn ranges_are_exclusive_and_match_the_source() {
    let source = "cat in >> out; ls";
    let passed = script(source).passes();
    for token in &passed.output().tokens {
        assert_eq!(&source[token.span.start..token.span.end], token.text);
    }
}

#[test]
fn columns_count_characters_not_bytes() {
    let lexed = shgram_shell::shared().unwrap().tokenize("'é' x");
    assert!(lexed.diagnostics.is_empty());
    let x = &lexed.tokens[1];
    assert_eq!(x.span.start, 5);
    assert_eq!(x.location.start.column, 5);
}
