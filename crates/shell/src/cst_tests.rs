// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::span::{Location, Position};
use crate::token::TokenKind;

fn token(kind: TokenKind, text: &str, start: usize) -> Token {
    let end = start + text.len();
    Token::new(
        kind,
        text,
        Span::new(start, end),
        Location::new(Position::new(1, start + 1), Position::new(1, end + 1)),
    )
}

/// Tree for `ls > out`.
fn sample() -> SyntaxNode {
    let mut redirect = SyntaxNode::new(RuleName::SingleRedirect);
    redirect.push_token(token(TokenKind::RedirectionForwardSingle, ">", 3));
    redirect.push_token(token(TokenKind::Identifier, "out", 5));

    let mut redirection = SyntaxNode::new(RuleName::Redirection);
    redirection.push_node(redirect);

    let mut command = SyntaxNode::new(RuleName::Command);
    command.push_token(token(TokenKind::Identifier, "ls", 0));
    command.push_node(redirection);

    let mut script = SyntaxNode::new(RuleName::Script);
    script.push_node(command);
    script
}

#[test]
fn tokens_are_collected_in_order() {
    let tree = sample();
    let texts: Vec<_> = tree.tokens().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["ls", ">", "out"]);
}

#[test]
fn direct_children_are_separated_by_type() {
    let tree = sample();
    let command = tree.child_nodes().next().unwrap();
    assert_eq!(command.rule, RuleName::Command);
    assert_eq!(command.child_tokens().count(), 1);
    assert_eq!(command.child_nodes().count(), 1);
    assert_eq!(tree.child_tokens().count(), 0);
}

#[test]
fn nodes_finds_descendants_by_rule() {
    let tree = sample();
    assert_eq!(tree.nodes(RuleName::SingleRedirect).len(), 1);
    assert_eq!(tree.nodes(RuleName::DoubleRedirect).len(), 0);
    assert!(tree.nodes(RuleName::Script).is_empty());
}

#[test]
fn span_covers_first_to_last_token() {
    let tree = sample();
    assert_eq!(tree.span(), Some(Span::new(0, 8)));
    assert_eq!(SyntaxNode::new(RuleName::Script).span(), None);
    assert!(SyntaxNode::new(RuleName::Script).is_empty());
}

#[test]
fn visitor_can_skip_subtrees() {
    struct TopLevel(Vec<String>);

    impl<'a> CstVisitor<'a> for TopLevel {
        fn visit_node(&mut self, node: &'a SyntaxNode) {
            if node.rule != RuleName::Redirection {
                self.walk_node(node);
            }
        }

        fn visit_token(&mut self, token: &'a Token) {
            self.0.push(token.text.clone());
        }
    }

    let mut visitor = TopLevel(Vec::new());
    visitor.visit_node(&sample());
    assert_eq!(visitor.0, vec!["ls"]);
}

#[test]
fn display_outlines_the_tree() {
    similar_asserts::assert_eq!(
        sample().to_string(),
        "\
Script
  Command
    IDENTIFIER 'ls'
    Redirection
      SingleRedirect
        REDIRECTION_FORWARD_SINGLE '>'
        IDENTIFIER 'out'
"
    );
}

#[test]
fn serializes_children_as_tagged_variants() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["ruleName"], "Script");
    let command = &json["children"][0]["node"];
    assert_eq!(command["ruleName"], "Command");
    assert_eq!(command["children"][0]["token"]["kind"], "IDENTIFIER");
    assert_eq!(command["children"][0]["token"]["text"], "ls");
    assert_eq!(command["children"][0]["token"]["range"]["start"], 0);

    let back: SyntaxNode = serde_json::from_value(json).unwrap();
    assert_eq!(back, sample());
}
