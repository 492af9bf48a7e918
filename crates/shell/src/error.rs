// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Construction-time configuration errors.

use thiserror::Error;

use crate::grammar::RuleName;
use crate::token::TokenKind;

/// Errors raised while building a token catalog or grammar.
///
/// These never occur while parsing: a catalog or grammar that builds
/// successfully is known to be unambiguous within its configured lookahead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("token kind {kind} is declared more than once")]
    DuplicateToken { kind: TokenKind },

    #[error("token kind {kind} falls back to {fallback}, which has no rule")]
    UnknownFallback {
        kind: TokenKind,
        fallback: TokenKind,
    },

    #[error("rule {rule} is declared more than once")]
    DuplicateRule { rule: RuleName },

    #[error("rule {referenced_by} references undeclared rule {rule}")]
    UnknownRule {
        rule: RuleName,
        referenced_by: RuleName,
    },

    #[error("left recursion: {}", format_path(.path))]
    LeftRecursion {
        /// The cycle, starting and ending at the same rule.
        path: Vec<RuleName>,
    },

    #[error("rule {rule} repeats an element that can match empty input")]
    NullableRepetition { rule: RuleName },

    #[error(
        "rule {rule}: alternative {second} is shadowed by alternative {first} \
         within {lookahead} token(s) of lookahead (on {tokens})"
    )]
    AmbiguousAlternatives {
        rule: RuleName,
        /// Zero-based index of the earlier alternative.
        first: usize,
        /// Zero-based index of the shadowed alternative.
        second: usize,
        lookahead: usize,
        /// The token sequence both alternatives accept.
        tokens: String,
    },

    #[error("lookahead must be at least 1, got {depth}")]
    InvalidLookahead { depth: usize },
}

fn format_path(path: &[RuleName]) -> String {
    path.iter()
        .map(RuleName::name)
        .collect::<Vec<_>>()
        .join(" -> ")
}
