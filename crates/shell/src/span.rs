// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source location tracking for the tokenizer and grammar engine.

use serde::{Deserialize, Serialize};

/// A span representing a range in the source text.
///
/// Spans use byte offsets for efficient slicing and work with UTF-8 source.
///
/// # Examples
///
/// ```ignore
/// use shgram_shell::Span;
///
/// let source = "echo hello";
/// let span = Span::new(5, 10);
/// assert_eq!(span.slice(source), "hello");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span from start to end byte positions.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Returns the length of the span in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Extract the spanned text from source.
    ///
    /// Returns an empty string if the span is out of bounds or not on valid
    /// UTF-8 character boundaries.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// A line/column pair. Both are 1-based; columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl Position {
    /// Position of the first character of any source.
    pub const START: Position = Position { line: 1, column: 1 };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Returns the position reached after scanning `text` from `self`.
    ///
    /// `\n`, `\r\n` and a lone `\r` each count as one line break.
    pub fn advance(self, text: &str) -> Position {
        let mut line = self.line;
        let mut column = self.column;
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    line += 1;
                    column = 1;
                }
                '\n' => {
                    line += 1;
                    column = 1;
                }
                _ => column += 1,
            }
        }
        Position { line, column }
    }

    /// Locate a byte offset in source.
    ///
    /// Offsets past the end of the source are clamped to the end.
    pub fn of_offset(source: &str, offset: usize) -> Position {
        Position::START.advance(&source[..floor_char_boundary(source, offset)])
    }
}

/// Start and end positions of a token or diagnostic.
///
/// `end` is the position just past the last character, so a token that ends
/// in a line break ends at column 1 of the following line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Location of `span` within `source`.
    pub fn of_span(source: &str, span: Span) -> Location {
        let start = Position::of_offset(source, span.start);
        let end = start.advance(span.slice(source));
        Location { start, end }
    }
}

/// Clamp `offset` into `source` and round it down to a character boundary.
fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Generate a context snippet showing the error location in source text.
///
/// Returns a formatted string with the relevant portion of input and carets
/// pointing to the span location.
///
/// # Example
///
/// ```text
/// ls -la > >
///          ^
/// ```
pub fn context_snippet(input: &str, span: Span, context_chars: usize) -> String {
    let span_start = floor_char_boundary(input, span.start);

    // Find context boundaries, respecting UTF-8 character boundaries
    let start = input[..span_start]
        .char_indices()
        .rev()
        .take(context_chars)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(span_start);

    let end = input[span_start..]
        .char_indices()
        .take(context_chars + 1)
        .last()
        .map(|(i, c)| span_start + i + c.len_utf8())
        .unwrap_or(input.len());

    let snippet = &input[start..end];
    let caret_pos = input[start..span_start].chars().count();
    let caret_len = span.len().max(1);

    format!(
        "{}\n{}{}",
        snippet,
        " ".repeat(caret_pos),
        "^".repeat(caret_len)
    )
}

/// Locate a span in source, returning (line_number, column, line_content).
///
/// Line numbers are 1-indexed (first line is line 1).
/// Column is 0-indexed from line start (first char is column 0).
pub fn locate_span(source: &str, span: Span) -> (usize, usize, &str) {
    let start = floor_char_boundary(source, span.start);
    let position = Position::of_offset(source, start);

    let line_start = source[..start]
        .rfind(['\n', '\r'])
        .map(|i| i + 1)
        .unwrap_or(0);
    let line_end = source[line_start..]
        .find(['\n', '\r'])
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    (position.line, position.column - 1, &source[line_start..line_end])
}

/// Generate a rich diagnostic message with line/column info.
///
/// Produces output in a format similar to rustc/clippy errors:
///
/// ```text
/// error: expected IDENTIFIER, found end of input
///   --> line 2, column 4
///    |
///  2 | bad>
///    |    ^
/// ```
pub fn diagnostic_context(source: &str, span: Span, message: &str) -> String {
    let (line_num, col, line_content) = locate_span(source, span);
    let span_len = span.len().max(1);

    format!(
        "error: {}\n  --> line {}, column {}\n   |\n{:>3} | {}\n   | {}{}",
        message,
        line_num,
        col + 1, // 1-indexed for user display
        line_num,
        line_content,
        " ".repeat(col),
        "^".repeat(span_len)
    )
}

#[cfg(test)]
#[path = "span_tests.rs"]
mod tests;
