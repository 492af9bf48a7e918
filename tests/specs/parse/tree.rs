//! Syntax tree specs
//!
//! Tree shape for commands, arguments, redirections and terminators.

use crate::prelude::*;

#[test]
fn command_with_arguments_and_redirection() {
    script("ls -la > out.txt").passes().outline(
        "\
Script
  Command
    IDENTIFIER 'ls'
    IDENTIFIER '-la'
    Redirection
      SingleRedirect
        REDIRECTION_FORWARD_SINGLE '>'
        IDENTIFIER 'out.txt'
",
    );
}

#[test]
fn append_redirection() {
    script("date >> log").passes().outline(
        "\
Script
  Command
    IDENTIFIER 'date'
    Redirection
      DoubleRedirect
        REDIRECTION_FORWARD_DOUBLE '>>'
        IDENTIFIER 'log'
",
    );
}

#[test]
fn semicolon_separates_statements() {
    script("echo hi; echo bye").passes().outline(
        "\
Script
  Command
    IDENTIFIER 'echo'
    IDENTIFIER 'hi'
  SEMICOLON ';'
  Command
    IDENTIFIER 'echo'
    IDENTIFIER 'bye'
",
    );
}

#[test]
fn newlines_separate_statements() {
    script("make\nmake test\n")
        .passes()
        .commands(&[&["make"], &["make", "test"]]);
}

#[test]
fn multiple_redirections_on_one_command() {
    let passed = script("cmd > out >> log").passes().commands(&[&["cmd"]]);
    assert_eq!(passed.tree().nodes(RuleName::Redirection).len(), 2);
}

#[test]
fn word_after_a_redirection_starts_another_command() {
    script("cmd > out more").passes().commands(&[&["cmd"], &["more"]]);
}

#[test]
fn empty_script_has_an_empty_root() {
    let passed = script("").passes();
    assert_eq!(passed.tree().rule, RuleName::Script);
    assert!(passed.tree().children.is_empty());
}

#[test]
fn dormant_rules_never_appear_in_a_script_tree() {
    let passed = script("A=1 cmd arg; B=2").passes();
    for rule in [RuleName::Assignment, RuleName::SimpleCommand, RuleName::WordList] {
        assert!(passed.tree().nodes(rule).is_empty(), "{rule}");
    }
}

#[test]
fn parsing_is_repeatable() {
    let source = "echo a > b\ncat b >> c; rm b";
    let first = script(source).passes();
    let second = script(source).passes();
    similar_asserts::assert_eq!(first.output(), second.output());
}
