// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Construction-time checks and lookahead depths.

use super::*;
use yare::parameterized;

// =============================================================================
// Shell Grammar
// =============================================================================

#[test]
fn shell_grammar_builds_with_every_rule_declared() {
    let grammar = shell();
    assert_eq!(grammar.entry(), RuleName::Script);
    assert_eq!(grammar.rules().collect::<Vec<_>>(), RuleName::ALL.to_vec());
}

#[test]
fn dormant_rules_are_unreachable_from_script() {
    assert_eq!(
        shell().reachable(),
        vec![
            RuleName::Script,
            RuleName::Command,
            RuleName::Redirection,
            RuleName::SingleRedirect,
            RuleName::DoubleRedirect,
        ]
    );
}

#[parameterized(
    script = { RuleName::Script, Some(1) },
    command = { RuleName::Command, Some(1) },
    redirection = { RuleName::Redirection, Some(1) },
    single_redirect = { RuleName::SingleRedirect, None },
    double_redirect = { RuleName::DoubleRedirect, None },
    assignment = { RuleName::Assignment, None },
    simple_command = { RuleName::SimpleCommand, Some(3) },
    word_list = { RuleName::WordList, Some(1) },
)]
fn shell_decision_depths(rule: RuleName, depth: Option<usize>) {
    assert_eq!(shell().decision_depth(rule), depth);
}

#[test]
fn shell_grammar_builds_with_one_token_of_lookahead() {
    let grammar = Grammar::shell(1).unwrap();
    assert_eq!(grammar.decision_depth(RuleName::Command), Some(1));
    assert_eq!(grammar.decision_depth(RuleName::SimpleCommand), Some(1));
}

#[test]
fn zero_lookahead_is_rejected() {
    assert_eq!(
        Grammar::shell(0).unwrap_err(),
        ConfigError::InvalidLookahead { depth: 0 }
    );
}

// =============================================================================
// Rule Table Validation
// =============================================================================

#[test]
fn undeclared_reference_is_rejected() {
    let err = Grammar::new(
        RuleName::Script,
        vec![(RuleName::Script, Expr::Rule(RuleName::Command))],
        3,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnknownRule {
            rule: RuleName::Command,
            referenced_by: RuleName::Script,
        }
    );
    assert_eq!(
        err.to_string(),
        "rule Script references undeclared rule Command"
    );
}

#[test]
fn undeclared_entry_is_rejected() {
    let err = Grammar::new(RuleName::Command, vec![(RuleName::Script, Expr::Eof)], 3).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnknownRule {
            rule: RuleName::Command,
            ..
        }
    ));
}

#[test]
fn duplicate_rule_is_rejected() {
    let err = Grammar::new(
        RuleName::Script,
        vec![(RuleName::Script, ident()), (RuleName::Script, equal())],
        3,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateRule {
            rule: RuleName::Script
        }
    );
}

#[test]
fn direct_left_recursion_is_rejected() {
    let err = Grammar::new(
        RuleName::Command,
        vec![(
            RuleName::Command,
            Expr::choice([Expr::seq([Expr::Rule(RuleName::Command), ident()]), ident()]),
        )],
        3,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::LeftRecursion {
            path: vec![RuleName::Command, RuleName::Command]
        }
    );
}

#[test]
fn indirect_left_recursion_reports_the_cycle() {
    let err = Grammar::new(
        RuleName::Script,
        vec![
            (
                RuleName::Script,
                Expr::seq([Expr::Rule(RuleName::Command), ident()]),
            ),
            (
                RuleName::Command,
                Expr::seq([Expr::Rule(RuleName::Script), equal()]),
            ),
        ],
        3,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "left recursion: Script -> Command -> Script"
    );
}

#[test]
fn left_recursion_through_nullable_prefix_is_rejected() {
    let err = Grammar::new(
        RuleName::Script,
        vec![
            (
                RuleName::Script,
                Expr::seq([
                    Expr::Rule(RuleName::WordList),
                    Expr::Rule(RuleName::Script),
                    equal(),
                ]),
            ),
            (RuleName::WordList, Expr::many(ident())),
        ],
        3,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::LeftRecursion {
            path: vec![RuleName::Script, RuleName::Script]
        }
    );
}

#[test]
fn right_recursion_is_accepted() {
    let grammar = Grammar::new(
        RuleName::WordList,
        vec![(
            RuleName::WordList,
            Expr::seq([ident(), Expr::optional(Expr::Rule(RuleName::WordList))]),
        )],
        3,
    )
    .unwrap();

    let output = grammar.parse(&lex("a b c"));
    assert!(output.diagnostics.is_empty());
    assert_eq!(output.tree.tokens().len(), 3);
    assert_eq!(output.tree.nodes(RuleName::WordList).len(), 2);
}

#[parameterized(
    optional_body = { Expr::many(Expr::optional(ident())) },
    nested_many = { Expr::many(Expr::many(ident())) },
    only_eof = { Expr::many(Expr::Eof) },
    nullable_rule = { Expr::many(Expr::Rule(RuleName::WordList)) },
)]
fn repeating_a_nullable_element_is_rejected(body: Expr) {
    let err = Grammar::new(
        RuleName::Script,
        vec![
            (RuleName::Script, body),
            (RuleName::WordList, Expr::many(ident())),
        ],
        3,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::NullableRepetition {
            rule: RuleName::Script
        }
    );
}

// =============================================================================
// Ordered Choice Lookahead
// =============================================================================

#[test]
fn choice_uses_smallest_separating_depth() {
    let grammar = Grammar::new(
        RuleName::Script,
        vec![(
            RuleName::Script,
            Expr::choice([Expr::seq([ident(), equal()]), Expr::seq([ident(), ident()])]),
        )],
        3,
    )
    .unwrap();
    assert_eq!(grammar.decision_depth(RuleName::Script), Some(2));
}

#[test]
fn choice_beyond_lookahead_is_ambiguous() {
    let err = Grammar::new(
        RuleName::Script,
        vec![(
            RuleName::Script,
            Expr::choice([Expr::seq([ident(), equal()]), Expr::seq([ident(), ident()])]),
        )],
        1,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::AmbiguousAlternatives {
            rule: RuleName::Script,
            first: 0,
            second: 1,
            lookahead: 1,
            tokens: "IDENTIFIER".to_string(),
        }
    );
}

#[test]
fn identical_alternatives_are_ambiguous() {
    let err = Grammar::new(
        RuleName::Script,
        vec![(
            RuleName::Script,
            Expr::choice([Expr::seq([ident(), equal()]), Expr::seq([ident(), equal()])]),
        )],
        3,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "rule Script: alternative 1 is shadowed by alternative 0 within 3 token(s) \
         of lookahead (on IDENTIFIER EQUAL)"
    );
}

#[test]
fn shorter_alternative_first_shadows_longer() {
    let err = Grammar::new(
        RuleName::Script,
        vec![(
            RuleName::Script,
            Expr::choice([ident(), Expr::seq([ident(), equal()])]),
        )],
        3,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::AmbiguousAlternatives {
            first: 0,
            second: 1,
            ..
        }
    ));
}

#[test]
fn longer_alternative_first_is_accepted() {
    let grammar = Grammar::new(
        RuleName::Script,
        vec![(
            RuleName::Script,
            Expr::choice([Expr::seq([ident(), equal()]), ident()]),
        )],
        3,
    )
    .unwrap();
    assert_eq!(grammar.decision_depth(RuleName::Script), Some(2));

    let output = grammar.parse(&lex("a"));
    assert!(output.diagnostics.is_empty());
    assert_eq!(output.tree.tokens().len(), 1);
}

#[test]
fn ambiguity_through_a_rule_reference_is_detected() {
    let err = Grammar::new(
        RuleName::Script,
        vec![
            (
                RuleName::Script,
                Expr::choice([Expr::Rule(RuleName::WordList), Expr::Rule(RuleName::Command)]),
            ),
            (RuleName::WordList, Expr::seq([ident(), ident()])),
            (RuleName::Command, Expr::seq([ident(), ident()])),
        ],
        3,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::AmbiguousAlternatives {
            rule: RuleName::Script,
            ..
        }
    ));
}

#[test]
fn optional_ambiguity_is_resolved_greedily() {
    // Whether the first IDENTIFIER belongs to the option or what follows
    // cannot be decided; the option takes it.
    let grammar = Grammar::new(
        RuleName::Script,
        vec![(
            RuleName::Script,
            Expr::seq([Expr::optional(ident()), Expr::many(ident())]),
        )],
        2,
    )
    .unwrap();
    assert_eq!(grammar.decision_depth(RuleName::Script), Some(2));

    let output = grammar.parse(&lex("a b"));
    assert!(output.diagnostics.is_empty());
    assert_eq!(output.tree.tokens().len(), 2);
}
