//! Result shape specs
//!
//! The serialized result carries tokens, the tree and empty diagnostic lists.

use crate::prelude::*;

#[test]
fn serialized_result_fields() {
    let passed = script("ls > out").passes();
    let json = serde_json::to_value(passed.output()).unwrap();

    let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["lexDiagnostics", "parseDiagnostics", "syntaxTree", "tokens"]
    );
    assert_eq!(json["lexDiagnostics"], serde_json::json!([]));
    assert_eq!(json["parseDiagnostics"], serde_json::json!([]));
}

#[test]
fn serialized_token() {
    let passed = script("ls > out").passes();
    let json = serde_json::to_value(passed.output()).unwrap();

    similar_asserts::assert_eq!(
        json["tokens"][1],
        serde_json::json!({
            "kind": "REDIRECTION_FORWARD_SINGLE",
            "text": ">",
            "range": { "start": 3, "end": 4 },
            "position": {
                "start": { "line": 1, "column": 4 },
                "end": { "line": 1, "column": 5 }
            }
        })
    );
}

#[test]
fn serialized_tree_nests_rule_nodes() {
    let passed = script("ls").passes();
    let json = serde_json::to_value(passed.output()).unwrap();

    let tree = &json["syntaxTree"];
    assert_eq!(tree["ruleName"], "Script");
    let command = &tree["children"][0]["node"];
    assert_eq!(command["ruleName"], "Command");
    assert_eq!(command["children"][0]["token"]["text"], "ls");
}

#[test]
fn result_round_trips_through_json() {
    let passed = script("a b > c; d").passes();
    let json = serde_json::to_string(passed.output()).unwrap();
    let back: ParseOutput = serde_json::from_str(&json).unwrap();
    similar_asserts::assert_eq!(&back, passed.output());
}
