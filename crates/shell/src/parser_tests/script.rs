// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Successful parses through the public API.

use super::*;
use crate::cst::Child;
use crate::token::{Category, TokenKind};
use yare::parameterized;

#[test]
fn command_with_single_redirection() {
    let output = parse_ok("ls -la > out.txt");
    assert!(output.lex_diagnostics.is_empty());
    assert!(output.parse_diagnostics.is_empty());

    let tree = &output.syntax_tree;
    assert_eq!(tree.rule, RuleName::Script);
    let command = tree.child_nodes().next().unwrap();
    assert_eq!(command.rule, RuleName::Command);

    let words: Vec<_> = command.child_tokens().map(|t| t.text.as_str()).collect();
    assert_eq!(words, vec!["ls", "-la"]);

    let redirection = command.child_nodes().next().unwrap();
    assert_eq!(redirection.rule, RuleName::Redirection);
    let single = redirection.child_nodes().next().unwrap();
    assert_eq!(single.rule, RuleName::SingleRedirect);
    let target: Vec<_> = single.child_tokens().map(|t| (t.kind, t.text.as_str())).collect();
    assert_eq!(
        target,
        vec![
            (TokenKind::RedirectionForwardSingle, ">"),
            (TokenKind::Identifier, "out.txt")
        ]
    );
}

#[test]
fn statements_split_on_terminators() {
    let output = parse_ok("echo hi; echo bye");
    assert_eq!(commands(&output), vec![vec!["echo", "hi"], vec!["echo", "bye"]]);

    let separator = output.syntax_tree.children.get(1).and_then(Child::as_token).unwrap();
    assert!(separator.is(Category::Terminator));
}

#[test]
fn double_redirect_is_one_token() {
    let output = parse_ok("date >> log");
    let kinds: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::RedirectionForwardDouble,
            TokenKind::Identifier
        ]
    );
    assert_eq!(output.syntax_tree.nodes(RuleName::DoubleRedirect).len(), 1);
}

#[test]
fn keyword_prefixed_word_is_an_argument() {
    let output = parse_ok("echo iffy");
    assert_eq!(commands(&output), vec![vec!["echo", "iffy"]]);
}

#[test]
fn line_continuation_joins_arguments() {
    let output = parse_ok("echo  \\\nhi");
    assert_eq!(output.tokens.len(), 2);
    assert_eq!(commands(&output), vec![vec!["echo", "hi"]]);
}

#[parameterized(
    empty = { "" },
    blank = { "  \t " },
    blank_lines = { "\n\n\n" },
    separators = { ";\n;" },
)]
fn scripts_without_commands_succeed(source: &str) {
    let output = parse_ok(source);
    assert!(commands(&output).is_empty());
}

#[parameterized(
    trailing_newline = { "ls\n", 1 },
    trailing_semicolon = { "ls;", 1 },
    crlf = { "a\r\nb\r\n", 2 },
    several_lines = { "a x\n\n  b y > z\nc >> d", 3 },
)]
fn command_count(source: &str, count: usize) {
    assert_eq!(commands(&parse_ok(source)).len(), count);
}

#[test]
fn repeated_parses_are_identical() {
    let source = "echo hi > a\ncat a >> b; wc";
    let first = parse_ok(source);
    let second = parse_ok(source);
    assert_eq!(first, second);
}

#[test]
fn separate_parsers_agree() {
    let source = "a b > c";
    let own = Parser::new().unwrap().parse(source).unwrap();
    assert_eq!(own, parse_ok(source));
}

#[test]
fn tree_holds_every_token() {
    let output = parse_ok("a b > c; d >> e\nf");
    let in_tree: Vec<_> = output.syntax_tree.tokens().into_iter().cloned().collect();
    assert_eq!(in_tree, output.tokens);
}

#[test]
fn output_serializes_with_wire_names() {
    let output = parse_ok("ls > out");
    let json = serde_json::to_value(&output).unwrap();

    assert_eq!(json["tokens"][0]["kind"], "IDENTIFIER");
    assert_eq!(json["tokens"][0]["range"]["end"], 2);
    assert_eq!(json["tokens"][1]["position"]["start"]["column"], 4);
    assert_eq!(json["syntaxTree"]["ruleName"], "Script");
    assert_eq!(json["lexDiagnostics"], serde_json::json!([]));
    assert_eq!(json["parseDiagnostics"], serde_json::json!([]));
}

#[test]
fn shared_parser_is_one_instance() {
    let a = shared().unwrap();
    let b = shared().unwrap();
    assert!(std::ptr::eq(a, b));
}

#[test]
fn shared_parser_works_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| std::thread::spawn(move || parse(&format!("cmd{i} arg > out{i}"))))
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let output = handle.join().unwrap().unwrap();
        assert_eq!(output.tokens[0].text, format!("cmd{i}"));
    }
}
