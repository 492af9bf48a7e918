// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::span::Position;

#[test]
fn serialized_kind_matches_name() {
    for kind in TokenKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.name()), "{kind:?}");
    }
}

#[test]
fn kind_names_are_unique() {
    let mut names: Vec<_> = TokenKind::ALL.iter().map(|k| k.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), TokenKind::ALL.len());
}

#[test]
fn terminator_category_has_semicolon_and_newline() {
    let members: Vec<_> = Category::Terminator.members().collect();
    assert_eq!(members, vec![TokenKind::Newline, TokenKind::Semicolon]);
}

#[yare::parameterized(
    single = { TokenKind::RedirectionForwardSingle, true },
    double = { TokenKind::RedirectionForwardDouble, true },
    gt_substitution = { TokenKind::ProcessSubstitutionGtLeft, false },
    identifier = { TokenKind::Identifier, false },
)]
fn redirection_kinds(kind: TokenKind, expected: bool) {
    assert_eq!(kind.is_redirection(), expected);
}

#[test]
fn token_display_quotes_text() {
    let token = Token::new(
        TokenKind::Newline,
        "\n",
        Span::new(0, 1),
        Location::new(Position::START, Position::new(2, 1)),
    );
    assert_eq!(token.to_string(), "'\\n'");
    assert!(token.is(Category::Terminator));
}

#[test]
fn token_serializes_range_and_position() {
    let token = Token::new(
        TokenKind::Identifier,
        "ls",
        Span::new(0, 2),
        Location::new(Position::START, Position::new(1, 3)),
    );
    let value = serde_json::to_value(&token).unwrap();
    assert_eq!(value["kind"], "IDENTIFIER");
    assert_eq!(value["text"], "ls");
    assert_eq!(value["range"]["start"], 0);
    assert_eq!(value["range"]["end"], 2);
    assert_eq!(value["position"]["end"]["column"], 3);
}
