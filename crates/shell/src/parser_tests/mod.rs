// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Public parse API tests, organized by concern.

mod config;
mod errors;
mod script;

use super::*;
use crate::grammar::RuleName;

/// Parse with the shared parser, panicking on failure.
pub(super) fn parse_ok(source: &str) -> ParseOutput {
    match parse(source) {
        Ok(output) => output,
        Err(err) => panic!("failed to parse {source:?}: {err}"),
    }
}

/// Parse with the shared parser, panicking on success.
pub(super) fn parse_err(source: &str) -> ParseError {
    match parse(source) {
        Ok(output) => panic!("expected {source:?} to fail, got {:#?}", output.syntax_tree),
        Err(err) => err,
    }
}

/// Direct token texts of each `Command` node.
pub(super) fn commands(output: &ParseOutput) -> Vec<Vec<String>> {
    output
        .syntax_tree
        .nodes(RuleName::Command)
        .into_iter()
        .map(|node| node.child_tokens().map(|t| t.text.clone()).collect())
        .collect()
}
