// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tokenizer: turns source text into positioned tokens using a [`TokenCatalog`].

use crate::catalog::{Match, TokenCatalog};
use crate::diagnostic::Diagnostic;
use crate::span::{Location, Position, Span};
use crate::token::Token;

/// Tokens and lexical diagnostics produced from one source string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexOutput {
    /// Emitted tokens in source order. Skipped text has no token.
    pub tokens: Vec<Token>,
    /// One diagnostic per run of characters no rule matched.
    pub diagnostics: Vec<Diagnostic>,
}

/// Longest-match tokenizer over a shared catalog.
///
/// The lexer itself holds no per-call state, so one instance can serve any
/// number of callers.
///
/// # Examples
///
/// ```ignore
/// use shgram_shell::{Lexer, TokenCatalog, TokenKind};
///
/// let catalog = TokenCatalog::shell()?;
/// let output = Lexer::new(&catalog).tokenize("ls >> log");
/// let kinds: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::Identifier, TokenKind::RedirectionForwardDouble, TokenKind::Identifier]
/// );
/// # Ok::<(), shgram_shell::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'c> {
    catalog: &'c TokenCatalog,
    /// Stop after this many diagnostics (0 = unlimited).
    max_errors: usize,
}

impl<'c> Lexer<'c> {
    pub fn new(catalog: &'c TokenCatalog) -> Self {
        Self {
            catalog,
            max_errors: 0,
        }
    }

    /// Stop scanning once `max_errors` diagnostics are recorded (0 = unlimited).
    pub fn with_error_limit(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Tokenize `source`.
    ///
    /// Characters no rule matches are skipped; each consecutive run of them
    /// produces one diagnostic and scanning resumes at the next match.
    pub fn tokenize(&self, source: &str) -> LexOutput {
        let mut scan = Scan::new(source);

        while let Some(rest) = source.get(scan.offset..).filter(|r| !r.is_empty()) {
            match self.catalog.longest_match(rest) {
                Some(m) => {
                    if scan.flush_unmatched() && self.limit_reached(&scan.output) {
                        return scan.output;
                    }
                    scan.accept(rest, m);
                }
                None => scan.skip_char(rest),
            }
        }
        scan.flush_unmatched();
        scan.output
    }

    fn limit_reached(&self, output: &LexOutput) -> bool {
        self.max_errors != 0 && output.diagnostics.len() >= self.max_errors
    }
}

/// A run of characters no rule matched.
struct Unmatched {
    start: usize,
    position: Position,
    first: char,
    chars: usize,
}

/// Per-call scanning state.
struct Scan<'s> {
    source: &'s str,
    offset: usize,
    position: Position,
    unmatched: Option<Unmatched>,
    output: LexOutput,
}

impl<'s> Scan<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            position: Position::START,
            unmatched: None,
            output: LexOutput::default(),
        }
    }

    fn accept(&mut self, rest: &str, m: Match) {
        let text = &rest[..m.len];
        let start = self.position;
        let end = start.advance(text);
        let span = Span::new(self.offset, self.offset + m.len);

        if m.skip {
            tracing::trace!(kind = %m.kind, start = span.start, end = span.end, "skipped");
        } else {
            tracing::trace!(kind = %m.kind, start = span.start, end = span.end, text, "token");
            self.output
                .tokens
                .push(Token::new(m.kind, text, span, Location::new(start, end)));
        }

        self.offset = span.end;
        self.position = end;
    }

    fn skip_char(&mut self, rest: &str) {
        let Some(ch) = rest.chars().next() else {
            return;
        };
        let run = self.unmatched.get_or_insert(Unmatched {
            start: self.offset,
            position: self.position,
            first: ch,
            chars: 0,
        });
        run.chars += 1;

        let width = ch.len_utf8();
        self.position = self.position.advance(&rest[..width]);
        self.offset += width;
    }

    /// Record the pending unmatched run, if any. Returns true if one was recorded.
    fn flush_unmatched(&mut self) -> bool {
        let Some(run) = self.unmatched.take() else {
            return false;
        };
        let span = Span::new(run.start, self.offset);
        let message = format!(
            "unexpected character '{}', skipped {} character(s)",
            run.first.escape_debug(),
            run.chars
        );
        tracing::trace!(start = span.start, end = span.end, "unmatched input");
        self.output.diagnostics.push(Diagnostic::lex(
            message,
            span,
            Location::new(run.position, self.position),
        ));
        debug_assert_eq!(span.slice(self.source).chars().count(), run.chars);
        true
    }
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
