//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL over the public parse API:
//!
//! ```ignore
//! script("ls > out").passes().commands(&[&["ls"]]);
//! script("ls >").fails().says("expected IDENTIFIER, found end of input at 1:4");
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

pub use shgram_shell::{ParseError, ParseOutput, RuleName, SyntaxNode, TokenKind};

/// A source string about to be parsed.
pub struct Script {
    source: String,
}

pub fn script(source: &str) -> Script {
    Script {
        source: source.to_string(),
    }
}

impl Script {
    /// Parse and require success.
    pub fn passes(self) -> Passed {
        match shgram_shell::parse(&self.source) {
            Ok(output) => Passed {
                source: self.source,
                output,
            },
            Err(err) => panic!(
                "expected {:?} to parse, got: {err}\n{}",
                self.source,
                err.diagnostic(&self.source).unwrap_or_default()
            ),
        }
    }

    /// Parse and require failure.
    pub fn fails(self) -> Failed {
        match shgram_shell::parse(&self.source) {
            Ok(output) => panic!(
                "expected {:?} to fail, got tree:\n{}",
                self.source, output.syntax_tree
            ),
            Err(err) => Failed {
                source: self.source,
                err,
            },
        }
    }
}

pub struct Passed {
    source: String,
    output: ParseOutput,
}

impl Passed {
    pub fn output(&self) -> &ParseOutput {
        &self.output
    }

    pub fn tree(&self) -> &SyntaxNode {
        &self.output.syntax_tree
    }

    /// Assert the token kinds, in order.
    pub fn kinds(self, expected: &[TokenKind]) -> Self {
        let kinds: Vec<_> = self.output.tokens.iter().map(|t| t.kind).collect();
        similar_asserts::assert_eq!(kinds, expected.to_vec(), "source: {:?}", self.source);
        self
    }

    /// Assert the token texts, in order.
    pub fn texts(self, expected: &[&str]) -> Self {
        let texts: Vec<_> = self.output.tokens.iter().map(|t| t.text.as_str()).collect();
        similar_asserts::assert_eq!(texts, expected.to_vec(), "source: {:?}", self.source);
        self
    }

    /// Assert the direct words of each `Command`.
    pub fn commands(self, expected: &[&[&str]]) -> Self {
        let commands: Vec<Vec<&str>> = self
            .output
            .syntax_tree
            .nodes(RuleName::Command)
            .into_iter()
            .map(|c| c.child_tokens().map(|t| t.text.as_str()).collect())
            .collect();
        let expected: Vec<Vec<&str>> = expected.iter().map(|c| c.to_vec()).collect();
        similar_asserts::assert_eq!(commands, expected, "source: {:?}", self.source);
        self
    }

    /// Assert the tree's outline (see `SyntaxNode`'s `Display`).
    pub fn outline(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.output.syntax_tree.to_string(), expected);
        self
    }
}

pub struct Failed {
    source: String,
    err: ParseError,
}

impl Failed {
    pub fn error(&self) -> &ParseError {
        &self.err
    }

    /// Assert the rendered error message.
    pub fn says(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.err.to_string(), expected, "source: {:?}", self.source);
        self
    }

    /// Assert a lexical failure with `count` diagnostics.
    pub fn lex_errors(self, count: usize) -> Self {
        match &self.err {
            ParseError::Lex { diagnostics } => assert_eq!(
                diagnostics.len(),
                count,
                "source: {:?}, diagnostics: {diagnostics:#?}",
                self.source
            ),
            other => panic!("expected lex error for {:?}, got {other:?}", self.source),
        }
        self
    }

    /// Assert a grammar failure.
    pub fn syntax_error(self) -> Self {
        assert!(
            matches!(self.err, ParseError::Syntax { .. }),
            "expected syntax error for {:?}, got {:?}",
            self.source,
            self.err
        );
        self
    }

    /// Assert the text the error's span covers.
    pub fn points_at(self, expected: &str) -> Self {
        let span = self.err.span().unwrap();
        assert_eq!(span.slice(&self.source), expected, "source: {:?}", self.source);
        self
    }
}
