// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rules declared but not reachable from `Script`, applied directly.

use super::*;
use yare::parameterized;

fn shape(node: &SyntaxNode) -> Vec<String> {
    node.children
        .iter()
        .map(|child| match child {
            Child::Node(node) => node.rule.to_string(),
            Child::Token(token) => token.text.clone(),
        })
        .collect()
}

#[test]
fn assignment() {
    let tree = parse_ok(RuleName::Assignment, "PATH = /bin");
    assert_eq!(shape(&tree), vec!["PATH", "=", "/bin"]);
    assert_eq!(tree.child_tokens().nth(1).map(|t| t.kind), Some(TokenKind::Equal));
}

#[test]
fn assignment_without_spaces_is_one_word() {
    // `=` is an identifier character, so the whole word is one token.
    let (_, diag) = parse_err(RuleName::Assignment, "PATH=/bin");
    assert_eq!(diag.message, "expected EQUAL, found end of input");
}

#[parameterized(
    empty = { "", &[] },
    name_only = { "cmd", &["cmd"] },
    prefix_assignment = { "A = 1 cmd", &["Assignment", "cmd"] },
    suffix_assignment = { "cmd B = 2", &["cmd", "Assignment"] },
    both = { "A = 1 cmd B = 2", &["Assignment", "cmd", "Assignment"] },
    assignment_only = { "A = 1", &["Assignment"] },
)]
fn simple_command(source: &str, expected: &[&str]) {
    let tree = parse_ok(RuleName::SimpleCommand, source);
    assert_eq!(shape(&tree), expected);
}

#[test]
fn simple_command_rejects_a_second_name() {
    let (tree, diag) = parse_err(RuleName::SimpleCommand, "cmd arg");
    assert_eq!(diag.message, "redundant input, expected end of input but found 'arg'");
    assert_eq!(shape(&tree), vec!["cmd"]);
}

#[parameterized(
    empty = { "", 0 },
    one = { "a", 1 },
    several = { "a b c d", 4 },
)]
fn word_list(source: &str, count: usize) {
    let tree = parse_ok(RuleName::WordList, source);
    assert_eq!(tree.child_tokens().count(), count);
    assert!(tree.child_nodes().next().is_none());
}

#[test]
fn word_list_stops_at_an_operator() {
    let (tree, diag) = parse_err(RuleName::WordList, "a b > c");
    assert_eq!(tree.child_tokens().count(), 2);
    assert_eq!(diag.span.slice("a b > c"), ">");
}

#[test]
fn simple_command_cannot_be_repeated_directly() {
    // SimpleCommand matches empty input, so wiring it into Script's loop as
    // is must be rejected at construction.
    let mut rules = shell_rules();
    rules[0] = (
        RuleName::Script,
        Expr::seq([
            Expr::many(Expr::choice([
                Expr::Rule(RuleName::SimpleCommand),
                Expr::Category(Category::Terminator),
            ])),
            Expr::optional(Expr::Eof),
        ]),
    );
    let err = Grammar::new(RuleName::Script, rules, 3).unwrap_err();
    assert_eq!(
        err,
        ConfigError::NullableRepetition {
            rule: RuleName::Script
        }
    );
}
