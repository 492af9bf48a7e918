// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Integration tests for building and running grammars through the public API.
//!
//! Set `RUST_LOG=shgram_shell=trace` to see per-token and per-rule events.

use shgram_shell::{
    shell_rules, Category, ConfigError, CstVisitor, Expr, Grammar, Lexer, RuleName, SyntaxNode,
    Token, TokenCatalog, TokenKind,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn lex(source: &str) -> Vec<Token> {
    let catalog = TokenCatalog::shell().unwrap();
    let output = Lexer::new(&catalog).tokenize(source);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    output.tokens
}

/// Counts nodes per rule and terminator tokens.
#[derive(Default)]
struct Census {
    commands: usize,
    redirections: usize,
    terminators: usize,
}

impl<'a> CstVisitor<'a> for Census {
    fn visit_node(&mut self, node: &'a SyntaxNode) {
        match node.rule {
            RuleName::Command => self.commands += 1,
            RuleName::Redirection => self.redirections += 1,
            _ => {}
        }
        self.walk_node(node);
    }

    fn visit_token(&mut self, token: &'a Token) {
        if token.is(Category::Terminator) {
            self.terminators += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Shell Grammar
// ---------------------------------------------------------------------------

#[test]
fn census_of_a_multi_line_script() {
    init_tracing();
    let grammar = Grammar::shell(3).unwrap();
    let tokens = lex("make > build.log\nmake test >> build.log; echo done\n");
    let output = grammar.parse(&tokens);
    assert!(output.diagnostics.is_empty());

    let mut census = Census::default();
    census.visit_node(&output.tree);
    assert_eq!(census.commands, 3);
    assert_eq!(census.redirections, 2);
    assert_eq!(census.terminators, 3);
}

#[test]
fn shared_grammar_across_threads() {
    init_tracing();
    let grammar = std::sync::Arc::new(Grammar::shell(3).unwrap());
    let handles: Vec<_> = ["a > b", "c >> d; e", "f\ng h"]
        .into_iter()
        .map(|source| {
            let grammar = std::sync::Arc::clone(&grammar);
            let tokens = lex(source);
            std::thread::spawn(move || grammar.parse(&tokens))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().diagnostics.is_empty());
    }
}

// ---------------------------------------------------------------------------
// Extending the Rule Table
// ---------------------------------------------------------------------------

/// Script where a statement is either a plain command or `NAME = VALUE`.
fn script_with_assignments() -> Vec<(RuleName, Expr)> {
    let mut rules = shell_rules();
    rules[0] = (
        RuleName::Script,
        Expr::seq([
            Expr::many(Expr::choice([
                Expr::Rule(RuleName::Assignment),
                Expr::Rule(RuleName::Command),
                Expr::Category(Category::Terminator),
            ])),
            Expr::optional(Expr::Eof),
        ]),
    );
    rules
}

#[test]
fn assignment_statement_needs_two_tokens_of_lookahead() {
    init_tracing();
    let grammar = Grammar::new(RuleName::Script, script_with_assignments(), 3).unwrap();
    assert_eq!(grammar.decision_depth(RuleName::Script), Some(2));
    assert!(grammar.reachable().contains(&RuleName::Assignment));

    let output = grammar.parse(&lex("X = 1\necho x"));
    assert!(output.diagnostics.is_empty());
    assert_eq!(output.tree.nodes(RuleName::Assignment).len(), 1);
    assert_eq!(output.tree.nodes(RuleName::Command).len(), 1);
}

#[test]
fn assignment_statement_is_ambiguous_with_one_token() {
    let err = Grammar::new(RuleName::Script, script_with_assignments(), 1).unwrap_err();
    assert_eq!(
        err,
        ConfigError::AmbiguousAlternatives {
            rule: RuleName::Script,
            first: 0,
            second: 1,
            lookahead: 1,
            tokens: TokenKind::Identifier.to_string(),
        }
    );
}
