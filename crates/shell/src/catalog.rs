// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The token catalog: an ordered list of lexical rules.
//!
//! Declaration order matters. The tokenizer picks the longest match at each
//! offset and breaks ties in favour of the rule declared first, so quoted
//! strings and comments are declared ahead of the catch-all identifier rule.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::token::TokenKind;

// Allow expect here as the regexes are compile-time verified to be valid
#[allow(clippy::expect_used)]
static NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[\n\r]+").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\S\r\n]+").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static LINE_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\\r?\n").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:"(?:(?:\\{2})*|.*?[^\\](?:\\{2})*)"|'(?:(?:\\{2})*|.*?[^\\](?:\\{2})*)')"#)
        .expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static BACKTICK_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^`(?:(?:\\{2})*|.*?[^\\](?:\\{2})*)`").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[^\n\r]*").expect("constant regex pattern is valid"));

/// How a lexical rule recognises text.
#[derive(Clone, Copy)]
pub enum Pattern {
    /// Exact text.
    Literal(&'static str),
    /// A regex anchored at the start of the remaining input.
    Regex(&'static Regex),
    /// A hand-written scanner returning the matched byte length.
    Scan(fn(&str) -> usize),
}

impl Pattern {
    /// Length in bytes of the match at the start of `rest`, or 0.
    pub fn match_len(&self, rest: &str) -> usize {
        match self {
            Pattern::Literal(text) => {
                if rest.starts_with(text) {
                    text.len()
                } else {
                    0
                }
            }
            Pattern::Regex(regex) => regex
                .find(rest)
                .filter(|m| m.start() == 0)
                .map(|m| m.end())
                .unwrap_or(0),
            Pattern::Scan(scan) => scan(rest),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(text) => write!(f, "Literal({text:?})"),
            Pattern::Regex(regex) => write!(f, "Regex({:?})", regex.as_str()),
            Pattern::Scan(_) => f.write_str("Scan(..)"),
        }
    }
}

/// One entry of the token catalog.
#[derive(Debug, Clone)]
pub struct LexRule {
    pub kind: TokenKind,
    pub pattern: Pattern,
    /// Matched text is consumed without emitting a token.
    pub skip: bool,
    /// Kind to reclassify as when that kind's rule would match further.
    /// A rule with a fallback is a keyword and beats equal-length matches.
    pub fallback: Option<TokenKind>,
}

impl LexRule {
    pub fn literal(kind: TokenKind, text: &'static str) -> Self {
        Self::new(kind, Pattern::Literal(text))
    }

    pub fn regex(kind: TokenKind, regex: &'static Regex) -> Self {
        Self::new(kind, Pattern::Regex(regex))
    }

    pub fn scan(kind: TokenKind, scan: fn(&str) -> usize) -> Self {
        Self::new(kind, Pattern::Scan(scan))
    }

    fn new(kind: TokenKind, pattern: Pattern) -> Self {
        Self {
            kind,
            pattern,
            skip: false,
            fallback: None,
        }
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn with_fallback(mut self, kind: TokenKind) -> Self {
        self.fallback = Some(kind);
        self
    }
}

/// The rule chosen at one offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub kind: TokenKind,
    /// Matched length in bytes, always > 0.
    pub len: usize,
    pub skip: bool,
}

/// Immutable, ordered set of lexical rules.
#[derive(Debug, Clone)]
pub struct TokenCatalog {
    rules: Vec<LexRule>,
}

impl TokenCatalog {
    /// Build a catalog, rejecting duplicate kinds and dangling fallbacks.
    pub fn new(rules: Vec<LexRule>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.kind) {
                return Err(ConfigError::DuplicateToken { kind: rule.kind });
            }
        }
        for rule in &rules {
            if let Some(fallback) = rule.fallback {
                if !seen.contains(&fallback) {
                    return Err(ConfigError::UnknownFallback {
                        kind: rule.kind,
                        fallback,
                    });
                }
            }
        }
        Ok(Self { rules })
    }

    /// The shell token catalog.
    pub fn shell() -> Result<Self, ConfigError> {
        use TokenKind::*;

        Self::new(vec![
            LexRule::regex(LineContinuation, &LINE_CONTINUATION).skipped(),
            LexRule::regex(Newline, &NEWLINE),
            LexRule::regex(Whitespace, &WHITESPACE).skipped(),
            LexRule::regex(String, &STRING),
            LexRule::regex(BacktickString, &BACKTICK_STRING),
            LexRule::regex(Comment, &COMMENT),
            LexRule::literal(CommandSubstitutionLeft, "$("),
            LexRule::literal(ProcessSubstitutionLtLeft, "<("),
            LexRule::literal(ProcessSubstitutionGtLeft, ">("),
            LexRule::literal(ParenthesesRight, ")"),
            LexRule::literal(CurlyBracketRight, "}"),
            LexRule::literal(And, "&&"),
            LexRule::literal(Or, "||"),
            LexRule::literal(Semicolon, ";"),
            LexRule::literal(RedirectionForwardDouble, ">>"),
            LexRule::literal(RedirectionForwardSingle, ">"),
            LexRule::literal(If, "if").with_fallback(Identifier),
            LexRule::literal(Pipe, "|"),
            LexRule::literal(Fi, "fi").with_fallback(Identifier),
            LexRule::literal(Then, "then").with_fallback(Identifier),
            LexRule::literal(Else, "else").with_fallback(Identifier),
            LexRule::literal(Elif, "elif").with_fallback(Identifier),
            LexRule::literal(SqBracket2Left, "[["),
            LexRule::literal(SqBracket2Right, "]]"),
            LexRule::literal(SqBracketLeft, "["),
            LexRule::literal(SqBracketRight, "]"),
            LexRule::literal(ParenthesesLeft, "("),
            LexRule::literal(CurlyBracketLeft, "{").with_fallback(Identifier),
            LexRule::literal(Backtick, "`"),
            LexRule::literal(Ampersand, "&"),
            LexRule::literal(Equal, "="),
            LexRule::scan(Identifier, scan_identifier),
        ])
    }

    pub fn rules(&self) -> &[LexRule] {
        &self.rules
    }

    pub fn rule(&self, kind: TokenKind) -> Option<&LexRule> {
        self.rules.iter().find(|rule| rule.kind == kind)
    }

    /// Pick the rule for the text at the start of `rest`.
    ///
    /// Rules without a fallback compete by length; on equal length the
    /// earlier rule wins. Rules with a fallback are keywords: the longest
    /// keyword match is reclassified as its fallback kind when the fallback
    /// rule matches more text from the same offset, and otherwise wins ties
    /// against the general match. Returns `None` when nothing matches.
    pub fn longest_match(&self, rest: &str) -> Option<Match> {
        let general = Self::longest(
            self.rules.iter().filter(|rule| rule.fallback.is_none()),
            rest,
        );
        let keyword = Self::longest(
            self.rules.iter().filter(|rule| rule.fallback.is_some()),
            rest,
        )
        .map(|(rule, len)| self.reclassify(rule, len, rest));

        let (rule, len) = match (general, keyword) {
            (Some(general), Some(keyword)) if general.1 > keyword.1 => general,
            (_, Some(keyword)) => keyword,
            (general, None) => general?,
        };

        Some(Match {
            kind: rule.kind,
            len,
            skip: rule.skip,
        })
    }

    /// Longest non-empty match among `rules`, earliest on ties.
    fn longest<'r>(
        rules: impl Iterator<Item = &'r LexRule>,
        rest: &str,
    ) -> Option<(&'r LexRule, usize)> {
        let mut best: Option<(&LexRule, usize)> = None;
        for rule in rules {
            let len = rule.pattern.match_len(rest);
            if len > best.map_or(0, |(_, best_len)| best_len) {
                best = Some((rule, len));
            }
        }
        best
    }

    /// Swap a keyword match for its fallback when the fallback runs further.
    fn reclassify<'r>(
        &'r self,
        rule: &'r LexRule,
        len: usize,
        rest: &str,
    ) -> (&'r LexRule, usize) {
        match rule.fallback.and_then(|kind| self.rule(kind)) {
            Some(fallback) => {
                let fallback_len = fallback.pattern.match_len(rest);
                if fallback_len > len {
                    tracing::trace!(
                        keyword = %rule.kind,
                        fallback = %fallback.kind,
                        "keyword reclassified"
                    );
                    (fallback, fallback_len)
                } else {
                    (rule, len)
                }
            }
            None => (rule, len),
        }
    }
}

/// Scan an identifier: word characters, or `$` when not opening `$(`.
fn scan_identifier(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut len = 0;
    while let Some(&byte) = bytes.get(len) {
        match byte {
            b'$' if bytes.get(len + 1) == Some(&b'(') => break,
            b'$' => len += 1,
            _ if is_identifier_byte(byte) => len += 1,
            _ => break,
        }
    }
    len
}

fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"_-{}=?+/.@~%!][#*".contains(&byte)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
