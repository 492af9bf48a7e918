// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Public parse API: tokenize, then run the grammar from `Script`.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::catalog::TokenCatalog;
use crate::cst::SyntaxNode;
use crate::diagnostic::Diagnostic;
use crate::error::ConfigError;
use crate::grammar::{Grammar, DEFAULT_MAX_LOOKAHEAD};
use crate::lexer::{LexOutput, Lexer};
use crate::parse_error::ParseError;
use crate::token::Token;

/// Configuration for building a [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Tokens of lookahead the grammar analysis may use per decision (at least 1).
    pub max_lookahead: usize,
    /// Stop scanning after this many lexical diagnostics (0 = unlimited).
    pub max_lex_errors: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_lookahead: DEFAULT_MAX_LOOKAHEAD,
            max_lex_errors: 0,
        }
    }
}

/// A successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutput {
    pub tokens: Vec<Token>,
    pub syntax_tree: SyntaxNode,
    /// Always empty on success.
    pub lex_diagnostics: Vec<Diagnostic>,
    /// Always empty on success.
    pub parse_diagnostics: Vec<Diagnostic>,
}

/// Token catalog and analysed shell grammar, built once.
///
/// `Parser` is immutable after construction. Each call allocates its own
/// scanning and grammar cursor, so a single instance can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct Parser {
    catalog: TokenCatalog,
    grammar: Grammar,
    config: ParserConfig,
}

impl Parser {
    /// Build a parser with default configuration.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Result<Self, ConfigError> {
        let catalog = TokenCatalog::shell()?;
        let grammar = Grammar::shell(config.max_lookahead)?;
        Ok(Self {
            catalog,
            grammar,
            config,
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TokenCatalog {
        &self.catalog
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Tokenize without parsing. Lexical diagnostics are returned, not raised.
    pub fn tokenize(&self, source: &str) -> LexOutput {
        Lexer::new(&self.catalog)
            .with_error_limit(self.config.max_lex_errors)
            .tokenize(source)
    }

    /// Parse `source` as a script.
    ///
    /// Fails with [`ParseError::Lex`] if any input matched no lexical rule
    /// (the grammar is not run), or [`ParseError::Syntax`] for the first
    /// grammar error.
    pub fn parse(&self, source: &str) -> Result<ParseOutput, ParseError> {
        let LexOutput {
            tokens,
            diagnostics,
        } = self.tokenize(source);

        if !diagnostics.is_empty() {
            tracing::debug!(errors = diagnostics.len(), "lexing failed");
            return Err(ParseError::Lex { diagnostics });
        }

        let output = self.grammar.parse(&tokens);
        tracing::debug!(
            tokens = tokens.len(),
            errors = output.diagnostics.len(),
            "parse finished"
        );
        if let Some(err) = ParseError::syntax(&output.diagnostics) {
            return Err(err);
        }

        Ok(ParseOutput {
            tokens,
            syntax_tree: output.tree,
            lex_diagnostics: Vec::new(),
            parse_diagnostics: Vec::new(),
        })
    }

    /// Parse raw bytes, which must be UTF-8.
    pub fn parse_bytes(&self, source: &[u8]) -> Result<ParseOutput, ParseError> {
        let text = std::str::from_utf8(source).map_err(|e| ParseError::InvalidInput {
            reason: e.to_string(),
        })?;
        self.parse(text)
    }
}

static SHARED: LazyLock<Result<Parser, ConfigError>> = LazyLock::new(Parser::new);

/// The process-wide default parser.
pub fn shared() -> Result<&'static Parser, ParseError> {
    SHARED.as_ref().map_err(|e| ParseError::Config(e.clone()))
}

/// Parse `source` with the process-wide default parser.
///
/// # Examples
///
/// ```ignore
/// use shgram_shell::{parse, RuleName};
///
/// let output = parse("ls -la > out.txt")?;
/// let commands = output.syntax_tree.nodes(RuleName::Command);
/// assert_eq!(commands.len(), 1);
/// # Ok::<(), shgram_shell::ParseError>(())
/// ```
pub fn parse(source: &str) -> Result<ParseOutput, ParseError> {
    shared()?.parse(source)
}

/// Parse raw bytes with the process-wide default parser.
pub fn parse_bytes(source: &[u8]) -> Result<ParseOutput, ParseError> {
    shared()?.parse_bytes(source)
}

#[cfg(test)]
#[path = "parser_tests/mod.rs"]
mod tests;
