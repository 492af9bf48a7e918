// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Grammar engine: named rules built from sequences, options, repetitions
//! and ordered choices, interpreted over a token slice to build a
//! concrete syntax tree.
//!
//! A [`Grammar`] is analysed once when it is built. Analysis rejects
//! undeclared rule references, left recursion, repetitions of elements that
//! can match nothing, and ordered choices whose alternatives cannot be told
//! apart within the configured lookahead. Each decision point gets the
//! smallest lookahead depth that separates its alternatives.
//!
//! Parsing never fails outright: it returns the (possibly partial) tree
//! together with any diagnostics. The first grammar error stops the parse;
//! there is no resynchronisation.

mod analysis;
mod engine;
mod rules;

use std::collections::HashSet;

use indexmap::IndexMap;

pub(crate) use analysis::{Production, Terminal};
pub use rules::{shell_rules, RuleName};

use crate::cst::SyntaxNode;
use crate::diagnostic::Diagnostic;
use crate::error::ConfigError;
use crate::token::{Category, Token, TokenKind};

/// Lookahead depth used when none is configured.
pub const DEFAULT_MAX_LOOKAHEAD: usize = 3;

/// A grammar rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Consume one token of this kind.
    Token(TokenKind),
    /// Consume one token of any kind in this category.
    Category(Category),
    /// Apply another rule, adding its node as a child.
    Rule(RuleName),
    /// Succeed only at end of input. Consumes nothing.
    Eof,
    /// Each element in order.
    Seq(Vec<Expr>),
    /// The element, if the lookahead selects it.
    Optional(Box<Expr>),
    /// The element zero or more times, while the lookahead selects it.
    Many(Box<Expr>),
    /// The first alternative whose lookahead matches.
    Choice(Vec<Expr>),
}

impl Expr {
    pub fn seq(items: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Seq(items.into_iter().collect())
    }

    pub fn optional(expr: Expr) -> Expr {
        Expr::Optional(Box::new(expr))
    }

    pub fn many(expr: Expr) -> Expr {
        Expr::Many(Box::new(expr))
    }

    pub fn choice(alternatives: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Choice(alternatives.into_iter().collect())
    }

    /// Rules this expression applies directly, in order of appearance.
    pub fn referenced_rules(&self) -> Vec<RuleName> {
        let mut out = Vec::new();
        self.collect_rules(&mut out);
        out
    }

    fn collect_rules(&self, out: &mut Vec<RuleName>) {
        match self {
            Expr::Rule(rule) => out.push(*rule),
            Expr::Seq(items) | Expr::Choice(items) => {
                for item in items {
                    item.collect_rules(out);
                }
            }
            Expr::Optional(body) | Expr::Many(body) => body.collect_rules(out),
            Expr::Token(_) | Expr::Category(_) | Expr::Eof => {}
        }
    }
}

/// The tree and diagnostics from one grammar run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarOutput {
    /// Root node for the entry rule. Partial if `diagnostics` is non-empty.
    pub tree: SyntaxNode,
    pub diagnostics: Vec<Diagnostic>,
}

/// An analysed, immutable rule table.
///
/// `Grammar` holds no per-parse state; every call to [`Grammar::parse`]
/// uses its own cursor, so one instance can be shared freely.
#[derive(Debug, Clone)]
pub struct Grammar {
    entry: RuleName,
    declared: IndexMap<RuleName, Expr>,
    productions: IndexMap<RuleName, Production>,
    depths: IndexMap<RuleName, usize>,
    max_lookahead: usize,
}

impl Grammar {
    /// Build and analyse a grammar.
    pub fn new(
        entry: RuleName,
        rules: Vec<(RuleName, Expr)>,
        max_lookahead: usize,
    ) -> Result<Self, ConfigError> {
        let mut declared = IndexMap::new();
        for (name, body) in rules {
            if declared.insert(name, body).is_some() {
                return Err(ConfigError::DuplicateRule { rule: name });
            }
        }
        if !declared.contains_key(&entry) {
            return Err(ConfigError::UnknownRule {
                rule: entry,
                referenced_by: entry,
            });
        }

        let compiled = analysis::analyse(&declared, max_lookahead)?;
        tracing::debug!(
            entry = %entry,
            rules = declared.len(),
            max_lookahead,
            "grammar analysed"
        );

        Ok(Self {
            entry,
            declared,
            productions: compiled.productions,
            depths: compiled.depths,
            max_lookahead,
        })
    }

    /// The shell grammar, entered at [`RuleName::Script`].
    pub fn shell(max_lookahead: usize) -> Result<Self, ConfigError> {
        Self::new(RuleName::Script, shell_rules(), max_lookahead)
    }

    pub fn entry(&self) -> RuleName {
        self.entry
    }

    pub fn max_lookahead(&self) -> usize {
        self.max_lookahead
    }

    /// Declared rule names, in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = RuleName> + '_ {
        self.declared.keys().copied()
    }

    pub fn contains(&self, rule: RuleName) -> bool {
        self.declared.contains_key(&rule)
    }

    /// The declared body of `rule`.
    pub fn expr(&self, rule: RuleName) -> Option<&Expr> {
        self.declared.get(&rule)
    }

    /// Rules reachable from the entry rule, in discovery order.
    pub fn reachable(&self) -> Vec<RuleName> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut pending = vec![self.entry];
        while let Some(rule) = pending.pop() {
            if !seen.insert(rule) {
                continue;
            }
            order.push(rule);
            if let Some(body) = self.declared.get(&rule) {
                pending.extend(body.referenced_rules().into_iter().rev());
            }
        }
        order
    }

    /// The deepest lookahead any decision inside `rule` needs, or `None`
    /// if the rule makes no decisions.
    pub fn decision_depth(&self, rule: RuleName) -> Option<usize> {
        self.depths.get(&rule).copied()
    }

    pub(crate) fn production(&self, rule: RuleName) -> Option<&Production> {
        self.productions.get(&rule)
    }

    /// Parse `tokens` from the entry rule.
    pub fn parse(&self, tokens: &[Token]) -> GrammarOutput {
        engine::Cursor::new(self, tokens).run(self.entry)
    }

    /// Parse `tokens` from any declared rule, or `None` if `rule` is not declared.
    ///
    /// Tokens left over once the rule completes are reported as redundant input.
    pub fn parse_rule(&self, rule: RuleName, tokens: &[Token]) -> Option<GrammarOutput> {
        self.contains(rule)
            .then(|| engine::Cursor::new(self, tokens).run(rule))
    }
}

#[cfg(test)]
#[path = "../grammar_tests/mod.rs"]
mod tests;
