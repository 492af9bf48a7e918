// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime behavior of the shell grammar.

use super::*;
use crate::diagnostic::DiagnosticCode;
use crate::span::Position;
use yare::parameterized;

fn command_words(tree: &SyntaxNode) -> Vec<Vec<String>> {
    tree.nodes(RuleName::Command)
        .into_iter()
        .map(|command| command.child_tokens().map(|t| t.text.clone()).collect())
        .collect()
}

// =============================================================================
// Valid Scripts
// =============================================================================

#[test]
fn command_with_redirection() {
    let tree = parse_ok(RuleName::Script, "ls -la > out.txt");
    similar_asserts::assert_eq!(
        tree.to_string(),
        "\
Script
  Command
    IDENTIFIER 'ls'
    IDENTIFIER '-la'
    Redirection
      SingleRedirect
        REDIRECTION_FORWARD_SINGLE '>'
        IDENTIFIER 'out.txt'
"
    );
}

#[test]
fn terminators_separate_commands() {
    let tree = parse_ok(RuleName::Script, "echo hi; echo bye");
    let kinds: Vec<_> = tree
        .children
        .iter()
        .map(|child| match child {
            Child::Node(node) => node.rule.name(),
            Child::Token(token) => token.kind.name(),
        })
        .collect();
    assert_eq!(kinds, vec!["Command", "SEMICOLON", "Command"]);
    assert_eq!(
        command_words(&tree),
        vec![vec!["echo", "hi"], vec!["echo", "bye"]]
    );
}

#[test]
fn newline_is_a_terminator() {
    let tree = parse_ok(RuleName::Script, "a\n\nb\n");
    assert_eq!(tree.nodes(RuleName::Command).len(), 2);
    let newlines = tree
        .child_tokens()
        .filter(|t| t.is(Category::Terminator))
        .count();
    assert_eq!(newlines, 2);
}

#[parameterized(
    empty = { "" },
    blank = { "   " },
    only_terminators = { ";;\n;" },
)]
fn scripts_without_commands(source: &str) {
    let tree = parse_ok(RuleName::Script, source);
    assert!(tree.nodes(RuleName::Command).is_empty());
}

#[test]
fn double_redirect() {
    let tree = parse_ok(RuleName::Script, "date >> log");
    let redirects = tree.nodes(RuleName::DoubleRedirect);
    assert_eq!(redirects.len(), 1);
    let texts: Vec<_> = redirects[0].tokens().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec![">>", "log"]);
}

#[test]
fn command_takes_several_redirections() {
    let tree = parse_ok(RuleName::Script, "cmd > a >> b");
    let commands = tree.nodes(RuleName::Command);
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].nodes(RuleName::Redirection).len(), 2);
}

#[test]
fn word_after_redirection_starts_a_new_command() {
    let tree = parse_ok(RuleName::Script, "cmd > out arg");
    assert_eq!(command_words(&tree), vec![vec!["cmd"], vec!["arg"]]);
}

#[test]
fn tree_keeps_every_token_in_order() {
    let source = "a b > c\nd >> e; f";
    let tokens = lex(source);
    let output = shell().parse(&tokens);
    assert!(output.diagnostics.is_empty());
    let kept: Vec<&Token> = output.tree.tokens();
    assert_eq!(kept, tokens.iter().collect::<Vec<_>>());
}

#[test]
fn grammar_is_reusable_across_parses() {
    let grammar = shell();
    let tokens = lex("echo hi > x");
    let first = grammar.parse(&tokens);
    let second = grammar.parse(&tokens);
    assert_eq!(first, second);
}

// =============================================================================
// Grammar Errors
// =============================================================================

#[test]
fn missing_target_at_end_points_at_last_token() {
    let (tree, diag) = parse_err(RuleName::Script, "echo\nbad>");
    assert_eq!(diag.code, DiagnosticCode::MismatchedToken);
    assert_eq!(diag.message, "expected IDENTIFIER, found end of input");
    assert_eq!(diag.location.start, Position::new(2, 4));
    assert_eq!(diag.to_string(), "expected IDENTIFIER, found end of input at 2:4");
    assert_eq!(diag.token.as_ref().map(|t| t.text.as_str()), Some(">"));

    // The partial tree still holds everything consumed.
    similar_asserts::assert_eq!(
        tree.to_string(),
        "\
Script
  Command
    IDENTIFIER 'echo'
  NEWLINE '\\n'
  Command
    IDENTIFIER 'bad'
    Redirection
      SingleRedirect
        REDIRECTION_FORWARD_SINGLE '>'
"
    );
}

#[test]
fn wrong_token_is_reported_where_it_stands() {
    let (_, diag) = parse_err(RuleName::Script, "a > ; b");
    assert_eq!(diag.message, "expected IDENTIFIER, found ';'");
    assert_eq!((diag.line(), diag.column()), (1, 5));
}

#[test]
fn leading_operator_is_redundant_input() {
    let (tree, diag) = parse_err(RuleName::Script, "> out");
    assert_eq!(diag.code, DiagnosticCode::RedundantInput);
    assert_eq!(
        diag.message,
        "redundant input, expected end of input but found '>'"
    );
    assert_eq!((diag.line(), diag.column()), (1, 1));
    assert!(tree.children.is_empty());
}

#[test]
fn unparsed_tail_is_redundant_input() {
    let (tree, diag) = parse_err(RuleName::Script, "ls | wc");
    assert_eq!(diag.code, DiagnosticCode::RedundantInput);
    assert_eq!(diag.span.slice("ls | wc"), "|");
    assert_eq!(command_words(&tree), vec![vec!["ls"]]);
}

#[test]
fn no_viable_alternative_lists_expected_tokens() {
    let (tree, diag) = parse_err(RuleName::Redirection, "out");
    assert_eq!(diag.code, DiagnosticCode::NoViableAlternative);
    assert_eq!(
        diag.message,
        "expected one of REDIRECTION_FORWARD_SINGLE, REDIRECTION_FORWARD_DOUBLE, found 'out'"
    );
    assert_eq!(tree.rule, RuleName::Redirection);
    assert!(tree.children.is_empty());
}

#[test]
fn empty_input_error_points_at_start() {
    let (_, diag) = parse_err(RuleName::SingleRedirect, "");
    assert_eq!(
        diag.message,
        "expected REDIRECTION_FORWARD_SINGLE, found end of input"
    );
    assert_eq!((diag.line(), diag.column()), (1, 1));
    assert!(diag.token.is_none());
}

#[test]
fn parse_rule_reports_leftover_tokens() {
    let (tree, diag) = parse_err(RuleName::SingleRedirect, "> a b");
    assert_eq!(diag.code, DiagnosticCode::RedundantInput);
    assert_eq!(diag.token.as_ref().map(|t| t.text.as_str()), Some("b"));
    assert_eq!(tree.tokens().len(), 2);
}

#[test]
fn parse_rule_rejects_undeclared_rule() {
    let grammar = Grammar::new(
        RuleName::WordList,
        vec![(RuleName::WordList, Expr::many(ident()))],
        1,
    )
    .unwrap();
    assert!(grammar.parse_rule(RuleName::Script, &lex("a")).is_none());
}

#[test]
fn explicit_eof_rejects_trailing_tokens() {
    let grammar = Grammar::new(
        RuleName::Command,
        vec![(RuleName::Command, Expr::seq([ident(), Expr::Eof]))],
        1,
    )
    .unwrap();

    assert!(grammar.parse(&lex("a")).diagnostics.is_empty());

    let output = grammar.parse(&lex("a b"));
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].message, "expected end of input, found 'b'");
}

// =============================================================================
// Property Tests
// =============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parse_keeps_tokens_and_reports_at_most_one_error(
            input in "[a-z >;\n]{0,40}"
        ) {
            let tokens = lex(&input);
            let output = shell().parse(&tokens);
            prop_assert!(output.diagnostics.len() <= 1);

            // Consumed tokens form a prefix of the stream.
            let kept = output.tree.tokens();
            prop_assert!(kept.len() <= tokens.len());
            for (kept, token) in kept.iter().zip(&tokens) {
                prop_assert_eq!(*kept, token);
            }
            if output.diagnostics.is_empty() {
                prop_assert_eq!(kept.len(), tokens.len());
            }
        }
    }
}
