// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Shell tokenizer and grammar engine producing a concrete syntax tree.
//!
//! Source text is scanned by a longest-match tokenizer driven by an ordered
//! [`TokenCatalog`], then parsed by a table-driven [`Grammar`] into a
//! [`SyntaxNode`] tree that keeps every consumed token.
//!
//! # Quick Start
//!
//! ```ignore
//! use shgram_shell::{parse, RuleName};
//!
//! let output = parse("echo hi; echo bye")?;
//! assert_eq!(output.syntax_tree.nodes(RuleName::Command).len(), 2);
//! # Ok::<(), shgram_shell::ParseError>(())
//! ```
//!
//! # Grammar
//!
//! ```text
//! Script         := ( Command | TERMINATOR )* EOF?
//! Command        := IDENTIFIER IDENTIFIER* Redirection*
//! Redirection    := SingleRedirect | DoubleRedirect
//! SingleRedirect := '>'  IDENTIFIER
//! DoubleRedirect := '>>' IDENTIFIER
//! ```
//!
//! `Assignment`, `SimpleCommand` and `WordList` are declared too but not
//! reachable from `Script`; [`Grammar::parse_rule`] can apply them directly.
//!
//! # Errors
//!
//! Lexical errors stop a parse before the grammar runs and are reported in
//! full. Grammar errors are fail-fast: the first one in source order becomes
//! a [`ParseError::Syntax`] rendered as `"<message> at <line>:<column>"`.
//! Catalog and grammar problems are [`ConfigError`]s raised at construction,
//! never while parsing.

mod catalog;
mod cst;
mod diagnostic;
mod error;
mod grammar;
mod lexer;
mod parse_error;
mod parser;
pub mod span;
mod token;

pub use catalog::{LexRule, Match, Pattern, TokenCatalog};
pub use cst::{Child, CstVisitor, SyntaxNode};
pub use diagnostic::{first_in_source_order, Diagnostic, DiagnosticCode, DiagnosticKind};
pub use error::ConfigError;
pub use grammar::{shell_rules, Expr, Grammar, GrammarOutput, RuleName, DEFAULT_MAX_LOOKAHEAD};
pub use lexer::{LexOutput, Lexer};
pub use parse_error::ParseError;
pub use parser::{parse, parse_bytes, shared, ParseOutput, Parser, ParserConfig};
pub use span::{context_snippet, diagnostic_context, locate_span, Location, Position, Span};
pub use token::{Category, Token, TokenKind};
