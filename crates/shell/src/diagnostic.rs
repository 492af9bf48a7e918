// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Located lexical and grammatical diagnostics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::{context_snippet, diagnostic_context, Location, Span};
use crate::token::Token;

/// Which phase produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    Lex,
    Parse,
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// Input no lexical rule matches.
    UnexpectedCharacter,
    /// A required token was missing or of the wrong kind.
    MismatchedToken,
    /// No alternative of an ordered choice matched the lookahead.
    NoViableAlternative,
    /// Tokens remained after the entry rule completed.
    RedundantInput,
}

impl DiagnosticCode {
    pub fn name(self) -> &'static str {
        match self {
            DiagnosticCode::UnexpectedCharacter => "UnexpectedCharacter",
            DiagnosticCode::MismatchedToken => "MismatchedToken",
            DiagnosticCode::NoViableAlternative => "NoViableAlternative",
            DiagnosticCode::RedundantInput => "RedundantInput",
        }
    }
}

/// A single error with enough location data to underline it in the source.
///
/// Created during scanning or parsing and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    #[serde(rename = "name")]
    pub code: DiagnosticCode,
    pub message: String,
    pub span: Span,
    pub location: Location,
    /// The offending token, for grammar diagnostics raised at a token.
    pub token: Option<Token>,
}

impl Diagnostic {
    pub(crate) fn lex(message: String, span: Span, location: Location) -> Self {
        Self {
            kind: DiagnosticKind::Lex,
            code: DiagnosticCode::UnexpectedCharacter,
            message,
            span,
            location,
            token: None,
        }
    }

    /// A grammar diagnostic located at `token`, or at the start of input
    /// when the token stream is empty.
    pub(crate) fn parse(code: DiagnosticCode, message: String, token: Option<&Token>) -> Self {
        let (span, location) = token
            .map(|t| (t.span, t.location))
            .unwrap_or((Span::empty(0), Location::default()));
        Self {
            kind: DiagnosticKind::Parse,
            code,
            message,
            span,
            location,
            token: token.cloned(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.code.name()
    }

    pub fn line(&self) -> usize {
        self.location.start.line
    }

    pub fn column(&self) -> usize {
        self.location.start.column
    }

    /// Render a rustc-style report with the offending span underlined.
    pub fn render(&self, source: &str) -> String {
        diagnostic_context(source, self.span, &self.message)
    }

    /// A short snippet of `source` around the diagnostic with a caret.
    pub fn context(&self, source: &str, context_chars: usize) -> String {
        context_snippet(source, self.span, context_chars)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.message, self.line(), self.column())
    }
}

/// The diagnostic that comes first in source order.
///
/// Ties keep the earliest-recorded diagnostic.
pub fn first_in_source_order(diagnostics: &[Diagnostic]) -> Option<&Diagnostic> {
    diagnostics
        .iter()
        .enumerate()
        .min_by_key(|(index, d)| (d.span.start, *index))
        .map(|(_, d)| d)
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
