// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token kinds, categories and positioned tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::{Location, Span};

/// A classified slice of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The literal matched text.
    pub text: String,
    #[serde(rename = "range")]
    pub span: Span,
    #[serde(rename = "position")]
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, location: Location) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            location,
        }
    }

    /// Returns true if this token's kind belongs to `category`.
    pub fn is(&self, category: Category) -> bool {
        self.kind.category() == Some(category)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.text.escape_debug())
    }
}

/// Every kind of token the catalog can produce.
///
/// Several kinds (conditionals, substitutions, pipes, background `&`) are
/// recognised by the tokenizer but not yet used by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// Backslash followed by a line break.
    LineContinuation,
    /// One or more line breaks, with any blanks before them.
    Newline,
    /// Horizontal whitespace.
    Whitespace,
    /// `"..."` or `'...'`
    String,
    /// `` `...` ``
    BacktickString,
    /// `#` to end of line.
    Comment,
    /// `$(`
    CommandSubstitutionLeft,
    /// `<(`
    ProcessSubstitutionLtLeft,
    /// `>(`
    ProcessSubstitutionGtLeft,
    /// `)`
    ParenthesesRight,
    /// `}`
    CurlyBracketRight,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `;`
    Semicolon,
    /// `>>`
    RedirectionForwardDouble,
    /// `>`
    RedirectionForwardSingle,
    If,
    /// `|`
    Pipe,
    Fi,
    Then,
    Else,
    Elif,
    /// `[[`
    #[serde(rename = "SQ_BRACKET_2_LEFT")]
    SqBracket2Left,
    /// `]]`
    #[serde(rename = "SQ_BRACKET_2_RIGHT")]
    SqBracket2Right,
    /// `[`
    SqBracketLeft,
    /// `]`
    SqBracketRight,
    /// `(`
    ParenthesesLeft,
    /// `{`
    CurlyBracketLeft,
    /// A lone `` ` ``
    Backtick,
    /// `&`
    Ampersand,
    /// `=`
    Equal,
    /// A bare word: command name, argument or redirection target.
    Identifier,
}

impl TokenKind {
    /// All kinds, in catalog declaration order.
    pub const ALL: [TokenKind; 32] = [
        TokenKind::LineContinuation,
        TokenKind::Newline,
        TokenKind::Whitespace,
        TokenKind::String,
        TokenKind::BacktickString,
        TokenKind::Comment,
        TokenKind::CommandSubstitutionLeft,
        TokenKind::ProcessSubstitutionLtLeft,
        TokenKind::ProcessSubstitutionGtLeft,
        TokenKind::ParenthesesRight,
        TokenKind::CurlyBracketRight,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::Semicolon,
        TokenKind::RedirectionForwardDouble,
        TokenKind::RedirectionForwardSingle,
        TokenKind::If,
        TokenKind::Pipe,
        TokenKind::Fi,
        TokenKind::Then,
        TokenKind::Else,
        TokenKind::Elif,
        TokenKind::SqBracket2Left,
        TokenKind::SqBracket2Right,
        TokenKind::SqBracketLeft,
        TokenKind::SqBracketRight,
        TokenKind::ParenthesesLeft,
        TokenKind::CurlyBracketLeft,
        TokenKind::Backtick,
        TokenKind::Ampersand,
        TokenKind::Equal,
        TokenKind::Identifier,
    ];

    /// The unique kind tag, as it appears in diagnostics and serialized output.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LineContinuation => "LINE_CONTINUATION",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::String => "STRING",
            TokenKind::BacktickString => "BACKTICK_STRING",
            TokenKind::Comment => "COMMENT",
            TokenKind::CommandSubstitutionLeft => "COMMAND_SUBSTITUTION_LEFT",
            TokenKind::ProcessSubstitutionLtLeft => "PROCESS_SUBSTITUTION_LT_LEFT",
            TokenKind::ProcessSubstitutionGtLeft => "PROCESS_SUBSTITUTION_GT_LEFT",
            TokenKind::ParenthesesRight => "PARENTHESES_RIGHT",
            TokenKind::CurlyBracketRight => "CURLY_BRACKET_RIGHT",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::RedirectionForwardDouble => "REDIRECTION_FORWARD_DOUBLE",
            TokenKind::RedirectionForwardSingle => "REDIRECTION_FORWARD_SINGLE",
            TokenKind::If => "IF",
            TokenKind::Pipe => "PIPE",
            TokenKind::Fi => "FI",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::Elif => "ELIF",
            TokenKind::SqBracket2Left => "SQ_BRACKET_2_LEFT",
            TokenKind::SqBracket2Right => "SQ_BRACKET_2_RIGHT",
            TokenKind::SqBracketLeft => "SQ_BRACKET_LEFT",
            TokenKind::SqBracketRight => "SQ_BRACKET_RIGHT",
            TokenKind::ParenthesesLeft => "PARENTHESES_LEFT",
            TokenKind::CurlyBracketLeft => "CURLY_BRACKET_LEFT",
            TokenKind::Backtick => "BACKTICK",
            TokenKind::Ampersand => "AMPERSAND",
            TokenKind::Equal => "EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
        }
    }

    /// The category this kind belongs to, if any.
    pub fn category(self) -> Option<Category> {
        match self {
            TokenKind::Semicolon | TokenKind::Newline => Some(Category::Terminator),
            _ => None,
        }
    }

    pub fn is_redirection(self) -> bool {
        matches!(
            self,
            TokenKind::RedirectionForwardSingle | TokenKind::RedirectionForwardDouble
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A grouping of token kinds the grammar can match as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Statement separators: `;` and line breaks.
    Terminator,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Terminator => "TERMINATOR",
        }
    }

    /// Kinds in this category, in catalog declaration order.
    pub fn members(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::ALL
            .into_iter()
            .filter(move |kind| kind.category() == Some(self))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
