// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete syntax tree.
//!
//! Every node records the rule that produced it and its children in source
//! order. Children are either consumed tokens or nested rule nodes; no token
//! is dropped, so the tokens of a tree read back in lexical order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grammar::RuleName;
use crate::span::Span;
use crate::token::Token;

/// A rule application and everything it consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    #[serde(rename = "ruleName")]
    pub rule: RuleName,
    pub children: Vec<Child>,
}

/// One child of a [`SyntaxNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Child {
    Token(Token),
    Node(SyntaxNode),
}

impl Child {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Child::Token(token) => Some(token),
            Child::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        }
    }
}

impl SyntaxNode {
    pub fn new(rule: RuleName) -> Self {
        Self {
            rule,
            children: Vec::new(),
        }
    }

    pub(crate) fn push_token(&mut self, token: Token) {
        self.children.push(Child::Token(token));
    }

    pub(crate) fn push_node(&mut self, node: SyntaxNode) {
        self.children.push(Child::Node(node));
    }

    /// Direct child tokens.
    pub fn child_tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(Child::as_token)
    }

    /// Direct child nodes.
    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(Child::as_node)
    }

    /// All tokens under this node, in source order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut collector = TokenCollector(Vec::new());
        collector.visit_node(self);
        collector.0
    }

    /// Descendant nodes produced by `rule`, outermost first. Excludes `self`.
    pub fn nodes(&self, rule: RuleName) -> Vec<&SyntaxNode> {
        let mut collector = NodeCollector {
            rule,
            found: Vec::new(),
        };
        collector.walk_node(self);
        collector.found
    }

    /// Source range covered by this node's tokens, if it has any.
    pub fn span(&self) -> Option<Span> {
        let tokens = self.tokens();
        let first = tokens.first()?;
        let last = tokens.last()?;
        Some(first.span.merge(last.span))
    }

    /// Returns true if no token was consumed under this node.
    pub fn is_empty(&self) -> bool {
        self.tokens().is_empty()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.rule, indent = depth * 2)?;
        for child in &self.children {
            match child {
                Child::Token(token) => {
                    writeln!(f, "{:indent$}{} {}", "", token.kind, token, indent = (depth + 1) * 2)?
                }
                Child::Node(node) => node.write_indented(f, depth + 1)?,
            }
        }
        Ok(())
    }
}

/// Indented outline, one node or token per line.
///
/// ```text
/// Script
///   Command
///     IDENTIFIER 'ls'
/// ```
impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Visitor for walking a [`SyntaxNode`] tree.
///
/// `visit_node` is called at each node and descends by calling `walk_node`.
/// Override `visit_node` without calling `walk_node` to skip a subtree.
///
/// # Example: Collect Command Names
///
/// ```ignore
/// use shgram_shell::{parse, Child, CstVisitor, RuleName, SyntaxNode};
///
/// struct Names(Vec<String>);
///
/// impl<'a> CstVisitor<'a> for Names {
///     fn visit_node(&mut self, node: &'a SyntaxNode) {
///         if node.rule == RuleName::Command {
///             if let Some(name) = node.child_tokens().next() {
///                 self.0.push(name.text.clone());
///             }
///         }
///         self.walk_node(node);
///     }
/// }
///
/// let output = parse("ls -la; echo hi")?;
/// let mut names = Names(Vec::new());
/// names.visit_node(&output.syntax_tree);
/// assert_eq!(names.0, vec!["ls", "echo"]);
/// # Ok::<(), shgram_shell::ParseError>(())
/// ```
pub trait CstVisitor<'a> {
    fn visit_node(&mut self, node: &'a SyntaxNode) {
        self.walk_node(node);
    }

    fn visit_token(&mut self, _token: &'a Token) {}

    fn walk_node(&mut self, node: &'a SyntaxNode) {
        for child in &node.children {
            match child {
                Child::Token(token) => self.visit_token(token),
                Child::Node(node) => self.visit_node(node),
            }
        }
    }
}

struct TokenCollector<'a>(Vec<&'a Token>);

impl<'a> CstVisitor<'a> for TokenCollector<'a> {
    fn visit_token(&mut self, token: &'a Token) {
        self.0.push(token);
    }
}

struct NodeCollector<'a> {
    rule: RuleName,
    found: Vec<&'a SyntaxNode>,
}

impl<'a> CstVisitor<'a> for NodeCollector<'a> {
    fn visit_node(&mut self, node: &'a SyntaxNode) {
        if node.rule == self.rule {
            self.found.push(node);
        }
        self.walk_node(node);
    }
}

#[cfg(test)]
#[path = "cst_tests.rs"]
mod tests;
