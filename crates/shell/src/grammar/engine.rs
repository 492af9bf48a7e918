// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime interpretation of compiled productions.

use super::{Grammar, GrammarOutput, Production, RuleName, Terminal};
use crate::cst::SyntaxNode;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::token::Token;

/// Raised once a diagnostic has been recorded; unwinds to the entry rule.
struct Halt;

type Step = Result<(), Halt>;

/// Per-parse state over a token slice.
pub(super) struct Cursor<'g, 't> {
    grammar: &'g Grammar,
    tokens: &'t [Token],
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'g, 't> Cursor<'g, 't> {
    pub(super) fn new(grammar: &'g Grammar, tokens: &'t [Token]) -> Self {
        Self {
            grammar,
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Apply `entry` to the whole token slice.
    pub(super) fn run(mut self, entry: RuleName) -> GrammarOutput {
        let mut tree = SyntaxNode::new(entry);
        let completed = self.body(entry, &mut tree).is_ok();

        if completed && self.pos < self.tokens.len() {
            let message = format!(
                "redundant input, expected end of input but found {}",
                self.found()
            );
            self.fail(DiagnosticCode::RedundantInput, message);
        }

        tracing::debug!(
            rule = %entry,
            tokens = self.tokens.len(),
            consumed = self.pos,
            errors = self.diagnostics.len(),
            "grammar run finished"
        );
        GrammarOutput {
            tree,
            diagnostics: self.diagnostics,
        }
    }

    fn peek(&self, ahead: usize) -> Terminal {
        self.tokens
            .get(self.pos + ahead)
            .map_or(Terminal::Eof, |t| Terminal::Kind(t.kind))
    }

    /// Describe the current token for a message.
    fn found(&self) -> String {
        match self.tokens.get(self.pos) {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    /// Record a diagnostic at the current token, or at the last token once
    /// input is exhausted.
    fn fail(&mut self, code: DiagnosticCode, message: String) -> Halt {
        let tokens = self.tokens;
        let at = tokens.get(self.pos).or_else(|| tokens.last());
        tracing::trace!(pos = self.pos, code = code.name(), %message, "grammar error");
        self.diagnostics.push(Diagnostic::parse(code, message, at));
        Halt
    }

    /// Run `rule`'s body, adding children to `node`.
    fn body(&mut self, rule: RuleName, node: &mut SyntaxNode) -> Step {
        let grammar = self.grammar;
        let Some(production) = grammar.production(rule) else {
            let message = format!("rule {rule} is not declared");
            return Err(self.fail(DiagnosticCode::NoViableAlternative, message));
        };
        tracing::trace!(rule = %rule, pos = self.pos, "enter rule");
        self.step(production, node)
    }

    /// Apply `rule` as a child of `parent`. The child is kept even when it
    /// fails part way.
    fn apply(&mut self, rule: RuleName, parent: &mut SyntaxNode) -> Step {
        let mut node = SyntaxNode::new(rule);
        let result = self.body(rule, &mut node);
        parent.push_node(node);
        result
    }

    fn step(&mut self, production: &'g Production, node: &mut SyntaxNode) -> Step {
        match production {
            Production::Expect { kinds, label } => {
                match self.tokens.get(self.pos) {
                    Some(token) if kinds.contains(&token.kind) => {
                        node.push_token(token.clone());
                        self.pos += 1;
                        Ok(())
                    }
                    _ => {
                        let message = format!("expected {label}, found {}", self.found());
                        Err(self.fail(DiagnosticCode::MismatchedToken, message))
                    }
                }
            }
            Production::Eof => {
                if self.pos >= self.tokens.len() {
                    Ok(())
                } else {
                    let message = format!("expected end of input, found {}", self.found());
                    Err(self.fail(DiagnosticCode::MismatchedToken, message))
                }
            }
            Production::Rule(rule) => self.apply(*rule, node),
            Production::Seq(items) => {
                for item in items {
                    self.step(item, node)?;
                }
                Ok(())
            }
            Production::Optional { lookahead, body } => {
                if lookahead.matches(|i| self.peek(i)) {
                    self.step(body, node)?;
                }
                Ok(())
            }
            Production::Many { lookahead, body } => {
                while lookahead.matches(|i| self.peek(i)) {
                    let before = self.pos;
                    self.step(body, node)?;
                    if self.pos == before {
                        break;
                    }
                }
                Ok(())
            }
            Production::Choice {
                alternatives,
                expected,
            } => {
                let chosen = alternatives
                    .iter()
                    .find(|(lookahead, _)| lookahead.matches(|i| self.peek(i)));
                match chosen {
                    Some((_, alternative)) => self.step(alternative, node),
                    None => {
                        let message = format!("expected one of {expected}, found {}", self.found());
                        Err(self.fail(DiagnosticCode::NoViableAlternative, message))
                    }
                }
            }
        }
    }
}
