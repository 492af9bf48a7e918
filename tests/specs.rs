//! Behavioral specifications for the shell parser.
//!
//! These tests are black-box: they go through the public parse API only and
//! verify tokens, tree shape, and error messages.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// parse/
#[path = "specs/parse/errors.rs"]
mod parse_errors;
#[path = "specs/parse/output.rs"]
mod parse_output;
#[path = "specs/parse/tokens.rs"]
mod parse_tokens;
#[path = "specs/parse/tree.rs"]
mod parse_tree;
