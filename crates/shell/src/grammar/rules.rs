// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shell grammar's rule table.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Expr;
use crate::token::{Category, TokenKind};

/// Names of every grammar rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleName {
    Script,
    Command,
    Redirection,
    SingleRedirect,
    DoubleRedirect,
    /// `NAME = VALUE`. Declared but not reachable from [`RuleName::Script`].
    Assignment,
    /// Assignment-prefixed command. Declared but not reachable from [`RuleName::Script`].
    SimpleCommand,
    /// Bare word list. Declared but not reachable from [`RuleName::Script`].
    WordList,
}

impl RuleName {
    pub const ALL: [RuleName; 8] = [
        RuleName::Script,
        RuleName::Command,
        RuleName::Redirection,
        RuleName::SingleRedirect,
        RuleName::DoubleRedirect,
        RuleName::Assignment,
        RuleName::SimpleCommand,
        RuleName::WordList,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RuleName::Script => "Script",
            RuleName::Command => "Command",
            RuleName::Redirection => "Redirection",
            RuleName::SingleRedirect => "SingleRedirect",
            RuleName::DoubleRedirect => "DoubleRedirect",
            RuleName::Assignment => "Assignment",
            RuleName::SimpleCommand => "SimpleCommand",
            RuleName::WordList => "WordList",
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The shell grammar.
///
/// ```text
/// Script         := ( Command | TERMINATOR )* EOF?
/// Command        := IDENTIFIER IDENTIFIER* Redirection*
/// Redirection    := SingleRedirect | DoubleRedirect
/// SingleRedirect := '>'  IDENTIFIER
/// DoubleRedirect := '>>' IDENTIFIER
///
/// Assignment     := IDENTIFIER '=' IDENTIFIER
/// SimpleCommand  := Assignment? IDENTIFIER? Assignment?
/// WordList       := IDENTIFIER*
/// ```
///
/// A command's arguments all come before its redirections, and a command may
/// carry any number of redirections.
pub fn shell_rules() -> Vec<(RuleName, Expr)> {
    use RuleName::*;

    let identifier = || Expr::Token(TokenKind::Identifier);

    vec![
        (
            Script,
            Expr::seq([
                Expr::many(Expr::choice([
                    Expr::Rule(Command),
                    Expr::Category(Category::Terminator),
                ])),
                Expr::optional(Expr::Eof),
            ]),
        ),
        (
            Command,
            Expr::seq([
                identifier(),
                Expr::many(identifier()),
                Expr::many(Expr::Rule(Redirection)),
            ]),
        ),
        (
            Redirection,
            Expr::choice([Expr::Rule(SingleRedirect), Expr::Rule(DoubleRedirect)]),
        ),
        (
            SingleRedirect,
            Expr::seq([
                Expr::Token(TokenKind::RedirectionForwardSingle),
                identifier(),
            ]),
        ),
        (
            DoubleRedirect,
            Expr::seq([
                Expr::Token(TokenKind::RedirectionForwardDouble),
                identifier(),
            ]),
        ),
        (
            Assignment,
            Expr::seq([identifier(), Expr::Token(TokenKind::Equal), identifier()]),
        ),
        (
            SimpleCommand,
            Expr::seq([
                Expr::optional(Expr::Rule(Assignment)),
                Expr::optional(identifier()),
                Expr::optional(Expr::Rule(Assignment)),
            ]),
        ),
        (WordList, Expr::many(identifier())),
    ]
}
