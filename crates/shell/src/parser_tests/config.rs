// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_config() {
    let config = ParserConfig::default();
    assert_eq!(config.max_lookahead, 3);
    assert_eq!(config.max_lex_errors, 0);
    assert_eq!(Parser::new().unwrap().config(), &config);
}

#[test]
fn zero_lookahead_fails_construction() {
    let err = Parser::with_config(ParserConfig {
        max_lookahead: 0,
        ..ParserConfig::default()
    })
    .unwrap_err();
    assert_eq!(err, ConfigError::InvalidLookahead { depth: 0 });
}

#[test]
fn single_token_lookahead_parses_the_shell_grammar() {
    let parser = Parser::with_config(ParserConfig {
        max_lookahead: 1,
        ..ParserConfig::default()
    })
    .unwrap();
    assert_eq!(parser.grammar().max_lookahead(), 1);
    let output = parser.parse("ls -la > out.txt; echo hi").unwrap();
    assert_eq!(commands(&output).len(), 2);
}

#[test]
fn lex_error_limit_caps_diagnostics() {
    let parser = Parser::with_config(ParserConfig {
        max_lex_errors: 1,
        ..ParserConfig::default()
    })
    .unwrap();
    let err = parser.parse("a < b : c ^ d").unwrap_err();
    assert_eq!(err.diagnostics().len(), 1);

    let unlimited = Parser::new().unwrap().parse("a < b : c ^ d").unwrap_err();
    assert_eq!(unlimited.diagnostics().len(), 3);
}

#[test]
fn tokenize_returns_diagnostics_without_failing() {
    let parser = Parser::new().unwrap();
    let output = parser.tokenize("a < b");
    assert_eq!(output.tokens.len(), 2);
    assert_eq!(output.diagnostics.len(), 1);
}

#[test]
fn catalog_and_grammar_are_exposed() {
    let parser = Parser::new().unwrap();
    assert_eq!(parser.catalog().rules().len(), 32);
    assert_eq!(parser.grammar().entry(), RuleName::Script);
}
