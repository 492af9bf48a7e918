// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Grammar engine tests, organized by concern.

mod analysis;
mod dormant;
mod engine;

use super::*;
use crate::catalog::TokenCatalog;
use crate::cst::Child;
use crate::lexer::Lexer;

/// Tokenize `source` with the shell catalog, asserting it lexes cleanly.
pub(super) fn lex(source: &str) -> Vec<Token> {
    let catalog = TokenCatalog::shell().unwrap();
    let output = Lexer::new(&catalog).tokenize(source);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    output.tokens
}

pub(super) fn shell() -> Grammar {
    Grammar::shell(DEFAULT_MAX_LOOKAHEAD).unwrap()
}

pub(super) fn ident() -> Expr {
    Expr::Token(TokenKind::Identifier)
}

pub(super) fn equal() -> Expr {
    Expr::Token(TokenKind::Equal)
}

/// Parse from `rule` with the shell grammar.
pub(super) fn parse_rule(rule: RuleName, source: &str) -> GrammarOutput {
    shell().parse_rule(rule, &lex(source)).unwrap()
}

/// Parse from `rule`, asserting no diagnostics.
pub(super) fn parse_ok(rule: RuleName, source: &str) -> SyntaxNode {
    let output = parse_rule(rule, source);
    assert!(
        output.diagnostics.is_empty(),
        "unexpected diagnostics for {source:?}: {:?}",
        output.diagnostics
    );
    output.tree
}

/// Parse from `rule`, asserting exactly one diagnostic and returning it.
pub(super) fn parse_err(rule: RuleName, source: &str) -> (SyntaxNode, Diagnostic) {
    let mut output = parse_rule(rule, source);
    assert_eq!(output.diagnostics.len(), 1, "{:?}", output.diagnostics);
    let diagnostic = output.diagnostics.remove(0);
    (output.tree, diagnostic)
}
