// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Construction-time grammar analysis.
//!
//! Validates the rule table and compiles each rule body into a
//! [`Production`] whose decision points carry precomputed lookahead.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use indexmap::IndexMap;

use super::{Expr, RuleName};
use crate::error::ConfigError;
use crate::token::TokenKind;

/// One position of lookahead: a token kind, or end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum Terminal {
    Kind(TokenKind),
    Eof,
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Kind(kind) => write!(f, "{kind}"),
            Terminal::Eof => f.write_str("EOF"),
        }
    }
}

/// A sequence of terminals one decision path can start with.
///
/// Paths shorter than the decision depth end in end of input or at the end
/// of the rule being analysed; they match by prefix.
pub(crate) type Path = Vec<Terminal>;

/// Precomputed lookahead for entering one branch of a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lookahead {
    pub depth: usize,
    pub paths: Vec<Path>,
}

impl Lookahead {
    fn new(depth: usize, paths: BTreeSet<Path>) -> Self {
        Self {
            depth,
            paths: paths.into_iter().collect(),
        }
    }

    /// Returns true if the upcoming terminals start any path.
    /// `next(i)` yields the terminal `i` positions ahead.
    pub fn matches(&self, next: impl Fn(usize) -> Terminal) -> bool {
        self.paths.iter().any(|path| {
            path.iter()
                .take(self.depth)
                .enumerate()
                .all(|(i, terminal)| next(i) == *terminal)
        })
    }

    /// Distinct first terminals, in order.
    pub fn first(&self) -> impl Iterator<Item = Terminal> + '_ {
        let mut seen = HashSet::new();
        self.paths
            .iter()
            .filter_map(|path| path.first().copied())
            .filter(move |t| seen.insert(*t))
    }
}

/// A compiled rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Production {
    /// Consume one token of any of `kinds`; `label` names it in messages.
    Expect {
        kinds: Vec<TokenKind>,
        label: &'static str,
    },
    Eof,
    Rule(RuleName),
    Seq(Vec<Production>),
    Optional {
        lookahead: Lookahead,
        body: Box<Production>,
    },
    Many {
        lookahead: Lookahead,
        body: Box<Production>,
    },
    Choice {
        alternatives: Vec<(Lookahead, Production)>,
        /// Human-readable list of the terminals any alternative starts with.
        expected: String,
    },
}

pub(crate) struct Compiled {
    pub productions: IndexMap<RuleName, Production>,
    /// Deepest lookahead used by any decision in each rule.
    pub depths: IndexMap<RuleName, usize>,
}

/// Validate `rules` and compile them with at most `max_lookahead` tokens
/// of lookahead per decision.
pub(crate) fn analyse(
    rules: &IndexMap<RuleName, Expr>,
    max_lookahead: usize,
) -> Result<Compiled, ConfigError> {
    if max_lookahead == 0 {
        return Err(ConfigError::InvalidLookahead {
            depth: max_lookahead,
        });
    }

    check_references(rules)?;
    let nullable = nullable_rules(rules);
    check_left_recursion(rules, &nullable)?;
    check_repetitions(rules, &nullable)?;

    let mut compiler = Compiler {
        rules,
        max_lookahead,
        depths: IndexMap::new(),
    };
    let mut productions = IndexMap::new();
    for (&name, body) in rules {
        let production = compiler.compile(name, body, &[])?;
        tracing::trace!(
            rule = %name,
            depth = compiler.depths.get(&name).copied().unwrap_or(0),
            "rule compiled"
        );
        productions.insert(name, production);
    }

    Ok(Compiled {
        productions,
        depths: compiler.depths,
    })
}

// =============================================================================
// Validation
// =============================================================================

fn check_references(rules: &IndexMap<RuleName, Expr>) -> Result<(), ConfigError> {
    for (&name, body) in rules {
        if let Some(missing) = body
            .referenced_rules()
            .into_iter()
            .find(|r| !rules.contains_key(r))
        {
            return Err(ConfigError::UnknownRule {
                rule: missing,
                referenced_by: name,
            });
        }
    }
    Ok(())
}

/// Whether `expr` can succeed without consuming a token.
fn is_nullable(expr: &Expr, nullable: &HashSet<RuleName>) -> bool {
    match expr {
        Expr::Token(_) | Expr::Category(_) => false,
        Expr::Eof | Expr::Optional(_) | Expr::Many(_) => true,
        Expr::Rule(rule) => nullable.contains(rule),
        Expr::Seq(items) => items.iter().all(|e| is_nullable(e, nullable)),
        Expr::Choice(alternatives) => alternatives.iter().any(|e| is_nullable(e, nullable)),
    }
}

fn nullable_rules(rules: &IndexMap<RuleName, Expr>) -> HashSet<RuleName> {
    let mut nullable = HashSet::new();
    loop {
        let before = nullable.len();
        for (&name, body) in rules {
            if !nullable.contains(&name) && is_nullable(body, &nullable) {
                nullable.insert(name);
            }
        }
        if nullable.len() == before {
            return nullable;
        }
    }
}

/// Push the rules `expr` can apply before consuming any token.
/// Returns whether `expr` is nullable.
fn leading_rules(expr: &Expr, nullable: &HashSet<RuleName>, out: &mut Vec<RuleName>) -> bool {
    match expr {
        Expr::Token(_) | Expr::Category(_) => false,
        Expr::Eof => true,
        Expr::Rule(rule) => {
            out.push(*rule);
            nullable.contains(rule)
        }
        Expr::Seq(items) => items.iter().all(|e| leading_rules(e, nullable, out)),
        Expr::Optional(body) | Expr::Many(body) => {
            leading_rules(body, nullable, out);
            true
        }
        Expr::Choice(alternatives) => {
            let mut any = false;
            for alternative in alternatives {
                any |= leading_rules(alternative, nullable, out);
            }
            any
        }
    }
}

fn check_left_recursion(
    rules: &IndexMap<RuleName, Expr>,
    nullable: &HashSet<RuleName>,
) -> Result<(), ConfigError> {
    let graph: IndexMap<RuleName, Vec<RuleName>> = rules
        .iter()
        .map(|(&name, body)| {
            let mut leading = Vec::new();
            leading_rules(body, nullable, &mut leading);
            (name, leading)
        })
        .collect();

    let mut done = HashSet::new();
    for &start in graph.keys() {
        find_cycle(start, &graph, &mut Vec::new(), &mut done)?;
    }
    Ok(())
}

fn find_cycle(
    rule: RuleName,
    graph: &IndexMap<RuleName, Vec<RuleName>>,
    stack: &mut Vec<RuleName>,
    done: &mut HashSet<RuleName>,
) -> Result<(), ConfigError> {
    if let Some(at) = stack.iter().position(|r| *r == rule) {
        let mut path = stack[at..].to_vec();
        path.push(rule);
        return Err(ConfigError::LeftRecursion { path });
    }
    if done.contains(&rule) {
        return Ok(());
    }

    stack.push(rule);
    for &next in graph.get(&rule).into_iter().flatten() {
        find_cycle(next, graph, stack, done)?;
    }
    stack.pop();
    done.insert(rule);
    Ok(())
}

fn check_repetitions(
    rules: &IndexMap<RuleName, Expr>,
    nullable: &HashSet<RuleName>,
) -> Result<(), ConfigError> {
    fn walk(expr: &Expr, nullable: &HashSet<RuleName>) -> bool {
        match expr {
            Expr::Many(body) => !is_nullable(body, nullable) && walk(body, nullable),
            Expr::Optional(body) => walk(body, nullable),
            Expr::Seq(items) | Expr::Choice(items) => items.iter().all(|e| walk(e, nullable)),
            Expr::Token(_) | Expr::Category(_) | Expr::Rule(_) | Expr::Eof => true,
        }
    }

    match rules.iter().find(|(_, body)| !walk(body, nullable)) {
        Some((&rule, _)) => Err(ConfigError::NullableRepetition { rule }),
        None => Ok(()),
    }
}

// =============================================================================
// Lookahead
// =============================================================================

/// Does some path in `earlier` also start a path in `later`?
/// Returns the shadowed path of `later`.
fn shadowed<'p>(earlier: &BTreeSet<Path>, later: &'p BTreeSet<Path>) -> Option<&'p Path> {
    later
        .iter()
        .find(|q| earlier.iter().any(|p| q.starts_with(p)))
}

fn describe(path: &Path) -> String {
    if path.is_empty() {
        return "end of rule".to_string();
    }
    path.iter()
        .map(Terminal::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

struct Compiler<'g> {
    rules: &'g IndexMap<RuleName, Expr>,
    max_lookahead: usize,
    depths: IndexMap<RuleName, usize>,
}

impl<'g> Compiler<'g> {
    /// Terminal paths up to `depth` long that `seq` can start with.
    ///
    /// Paths stop at end of input and at the end of `seq`; what follows the
    /// enclosing rule is not considered.
    fn paths(&self, seq: &[&'g Expr], depth: usize) -> BTreeSet<Path> {
        let mut out = BTreeSet::new();
        let stack: Vec<&'g Expr> = seq.iter().rev().copied().collect();
        self.walk(stack, depth, Vec::new(), &mut out);
        out
    }

    /// `stack` holds the remaining elements, next on top.
    fn walk(&self, mut stack: Vec<&'g Expr>, depth: usize, mut prefix: Path, out: &mut BTreeSet<Path>) {
        if prefix.len() == depth {
            out.insert(prefix);
            return;
        }
        let Some(expr) = stack.pop() else {
            out.insert(prefix);
            return;
        };

        match expr {
            Expr::Token(kind) => {
                prefix.push(Terminal::Kind(*kind));
                self.walk(stack, depth, prefix, out);
            }
            Expr::Category(category) => {
                for kind in category.members() {
                    let mut path = prefix.clone();
                    path.push(Terminal::Kind(kind));
                    self.walk(stack.clone(), depth, path, out);
                }
            }
            Expr::Eof => {
                prefix.push(Terminal::Eof);
                out.insert(prefix);
            }
            Expr::Rule(rule) => {
                if let Some(body) = self.rules.get(rule) {
                    stack.push(body);
                }
                self.walk(stack, depth, prefix, out);
            }
            Expr::Seq(items) => {
                stack.extend(items.iter().rev());
                self.walk(stack, depth, prefix, out);
            }
            Expr::Optional(body) => {
                let mut entered = stack.clone();
                entered.push(body);
                self.walk(entered, depth, prefix.clone(), out);
                self.walk(stack, depth, prefix, out);
            }
            Expr::Many(body) => {
                let mut entered = stack.clone();
                entered.push(expr);
                entered.push(body);
                self.walk(entered, depth, prefix.clone(), out);
                self.walk(stack, depth, prefix, out);
            }
            Expr::Choice(alternatives) => {
                for alternative in alternatives {
                    let mut branch = stack.clone();
                    branch.push(alternative);
                    self.walk(branch, depth, prefix.clone(), out);
                }
            }
        }
    }

    fn note_depth(&mut self, rule: RuleName, depth: usize) {
        let entry = self.depths.entry(rule).or_insert(depth);
        *entry = (*entry).max(depth);
    }

    /// Lookahead for entering an optional branch versus skipping it.
    ///
    /// Uses the smallest depth that separates the two; if none does, the
    /// branch is entered greedily on the deepest lookahead.
    fn greedy(&mut self, rule: RuleName, enter: &[&'g Expr], skip: &[&'g Expr]) -> Lookahead {
        let mut depth = 1;
        let mut enter_paths = self.paths(enter, depth);
        while depth < self.max_lookahead {
            if shadowed(&enter_paths, &self.paths(skip, depth)).is_none() {
                break;
            }
            depth += 1;
            enter_paths = self.paths(enter, depth);
        }
        self.note_depth(rule, depth);
        Lookahead::new(depth, enter_paths)
    }

    fn compile(
        &mut self,
        rule: RuleName,
        expr: &'g Expr,
        rest: &[&'g Expr],
    ) -> Result<Production, ConfigError> {
        let production = match expr {
            Expr::Token(kind) => Production::Expect {
                kinds: vec![*kind],
                label: kind.name(),
            },
            Expr::Category(category) => Production::Expect {
                kinds: category.members().collect(),
                label: category.name(),
            },
            Expr::Eof => Production::Eof,
            Expr::Rule(name) => Production::Rule(*name),
            Expr::Seq(items) => {
                let mut compiled = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let tail: Vec<&'g Expr> =
                        items[i + 1..].iter().chain(rest.iter().copied()).collect();
                    compiled.push(self.compile(rule, item, &tail)?);
                }
                Production::Seq(compiled)
            }
            Expr::Optional(body) => {
                let enter: Vec<&'g Expr> = std::iter::once(body.as_ref())
                    .chain(rest.iter().copied())
                    .collect();
                let lookahead = self.greedy(rule, &enter, rest);
                Production::Optional {
                    lookahead,
                    body: Box::new(self.compile(rule, body, rest)?),
                }
            }
            Expr::Many(body) => {
                let after_body: Vec<&'g Expr> = std::iter::once(expr)
                    .chain(rest.iter().copied())
                    .collect();
                let enter: Vec<&'g Expr> = std::iter::once(body.as_ref())
                    .chain(after_body.iter().copied())
                    .collect();
                let lookahead = self.greedy(rule, &enter, rest);
                Production::Many {
                    lookahead,
                    body: Box::new(self.compile(rule, body, &after_body)?),
                }
            }
            Expr::Choice(alternatives) => self.compile_choice(rule, alternatives, rest)?,
        };
        Ok(production)
    }

    fn compile_choice(
        &mut self,
        rule: RuleName,
        alternatives: &'g [Expr],
        rest: &[&'g Expr],
    ) -> Result<Production, ConfigError> {
        let branches: Vec<Vec<&'g Expr>> = alternatives
            .iter()
            .map(|alt| std::iter::once(alt).chain(rest.iter().copied()).collect())
            .collect();

        let mut depth = 1;
        let paths = loop {
            let paths: Vec<BTreeSet<Path>> =
                branches.iter().map(|b| self.paths(b, depth)).collect();
            match first_conflict(&paths) {
                None => break paths,
                Some((first, second, path)) if depth == self.max_lookahead => {
                    return Err(ConfigError::AmbiguousAlternatives {
                        rule,
                        first,
                        second,
                        lookahead: depth,
                        tokens: describe(&path),
                    });
                }
                Some(_) => depth += 1,
            }
        };
        self.note_depth(rule, depth);

        let mut compiled = Vec::with_capacity(alternatives.len());
        for (alternative, paths) in alternatives.iter().zip(paths) {
            let lookahead = Lookahead::new(depth, paths);
            compiled.push((lookahead, self.compile(rule, alternative, rest)?));
        }

        let mut seen = HashSet::new();
        let expected = compiled
            .iter()
            .flat_map(|(lookahead, _)| lookahead.first().collect::<Vec<_>>())
            .filter(|t| seen.insert(*t))
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Production::Choice {
            alternatives: compiled,
            expected,
        })
    }
}

/// The first pair of alternatives `(i, j)`, `i < j`, where `i` shadows `j`,
/// with the shadowed path.
fn first_conflict(paths: &[BTreeSet<Path>]) -> Option<(usize, usize, Path)> {
    for j in 1..paths.len() {
        for i in 0..j {
            if let Some(path) = shadowed(&paths[i], &paths[j]) {
                return Some((i, j, path.clone()));
            }
        }
    }
    None
}
