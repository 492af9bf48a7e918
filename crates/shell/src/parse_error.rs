// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Public parse errors.

use thiserror::Error;

use crate::diagnostic::{first_in_source_order, Diagnostic};
use crate::error::ConfigError;
use crate::span::{context_snippet, diagnostic_context, Span};

/// Errors from [`crate::parse`] and [`crate::Parser::parse`].
///
/// Exactly one of these is returned per failed call. Lexical errors pre-empt
/// grammar errors: if scanning produced any diagnostic the grammar never runs.
///
/// # Examples
///
/// ```ignore
/// use shgram_shell::{parse, ParseError};
///
/// let err = parse("echo\nbad>").unwrap_err();
/// assert_eq!(err.to_string(), "expected IDENTIFIER, found end of input at 2:4");
///
/// let err = parse("echo \u{1}").unwrap_err();
/// assert!(matches!(err, ParseError::Lex { .. }));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input is not text.
    ///
    /// Raised by [`crate::parse_bytes`] before any scanning.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Part of the input matches no lexical rule.
    ///
    /// Carries every diagnostic the tokenizer recorded.
    #[error("{} lexical error(s), first: {}", .diagnostics.len(), first_message(.diagnostics))]
    Lex { diagnostics: Vec<Diagnostic> },

    /// The token stream does not match the grammar.
    ///
    /// Built from the first grammar diagnostic in source order.
    #[error("{message} at {line}:{column}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        diagnostic: Box<Diagnostic>,
    },

    /// The built-in catalog or grammar failed its construction check.
    #[error("parser configuration: {0}")]
    Config(#[from] ConfigError),
}

fn first_message(diagnostics: &[Diagnostic]) -> String {
    first_in_source_order(diagnostics)
        .map(ToString::to_string)
        .unwrap_or_default()
}

impl ParseError {
    /// A syntax error from grammar diagnostics, or `None` if there are none.
    pub(crate) fn syntax(diagnostics: &[Diagnostic]) -> Option<Self> {
        let first = first_in_source_order(diagnostics)?;
        Some(ParseError::Syntax {
            message: first.message.clone(),
            line: first.line(),
            column: first.column(),
            diagnostic: Box::new(first.clone()),
        })
    }

    /// Every diagnostic carried by this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            ParseError::Lex { diagnostics } => diagnostics,
            ParseError::Syntax { diagnostic, .. } => std::slice::from_ref(diagnostic.as_ref()),
            ParseError::InvalidInput { .. } | ParseError::Config(_) => &[],
        }
    }

    /// The span of the first diagnostic, if any.
    pub fn span(&self) -> Option<Span> {
        first_in_source_order(self.diagnostics()).map(|d| d.span)
    }

    /// Short snippet of `input` with a caret under the error.
    ///
    /// ```text
    /// ls > ; echo
    ///      ^
    /// ```
    pub fn context(&self, input: &str, context_chars: usize) -> Option<String> {
        Some(context_snippet(input, self.span()?, context_chars))
    }

    /// Generate a rich diagnostic with line/column info, or `None` if no span.
    pub fn diagnostic(&self, input: &str) -> Option<String> {
        Some(diagnostic_context(input, self.span()?, &self.to_string()))
    }
}
