use kmatch::{MatchOptions, Pattern, PatternError, Value};
use serde_json::json;
use std::collections::HashMap;

fn obj(mapping: serde_json::Value) -> HashMap<String, Value> {
    match Value::from(mapping) {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

#[test]
fn test_pattern_round_trip() {
    let raw: Value = json!(["=~", "hi", "hi"]).into();
    let pattern = Pattern::new(raw.clone()).unwrap();
    assert_eq!(pattern.pattern(), &raw);
}

#[test]
fn test_pattern_round_trip_unaffected_by_compilation() {
    // The raw form keeps the regex literal as a plain string even after
    // the compiled tree has replaced it with a handle
    let raw: Value = json!(["&", [
        ["=~", "subject", "^Email"],
        ["!", ["=~", "subject", "draft$"]],
    ]])
    .into();
    let pattern = Pattern::new(raw.clone()).unwrap();
    assert!(pattern.matches(&obj(json!({"subject": "Email update"}))).unwrap());
    assert_eq!(pattern.pattern(), &raw);
}

#[test]
fn test_default_options_are_off() {
    let pattern = Pattern::new(json!(["<=", "f", 0]).into()).unwrap();
    assert_eq!(pattern.options(), MatchOptions::default());
    assert!(!pattern.options().suppress_missing_keys);
    assert!(!pattern.options().suppress_type_errors);
}

#[test]
fn test_empty_pattern_invalid() {
    assert!(matches!(
        Pattern::new(json!([]).into()),
        Err(PatternError::InvalidNode(_))
    ));
}

#[test]
fn test_null_regex_literal_invalid() {
    assert!(matches!(
        Pattern::new(json!(["=~", "f", null]).into()),
        Err(PatternError::BadRegex { .. })
    ));
}

#[test]
fn test_array_regex_literal_invalid() {
    assert!(matches!(
        Pattern::new(json!(["=~", "f", []]).into()),
        Err(PatternError::BadRegex { .. })
    ));
}

#[test]
fn test_malformed_regex_invalid() {
    let err = Pattern::new(json!(["=~", "f", "("]).into()).unwrap_err();
    match err {
        PatternError::BadRegex { literal, .. } => assert_eq!(literal, "("),
        other => panic!("expected BadRegex, got {:?}", other),
    }
}

#[test]
fn test_non_list_operand_invalid() {
    assert!(matches!(
        Pattern::new(json!(["&", {}]).into()),
        Err(PatternError::InvalidNode(_))
    ));
}

#[test]
fn test_invalid_operator_name() {
    let err = Pattern::new(json!(["INVALID", [["=~", "f", "r"]]]).into()).unwrap_err();
    match err {
        PatternError::InvalidNode(node) => assert!(node.contains("INVALID")),
        other => panic!("expected InvalidNode, got {:?}", other),
    }
}

#[test]
fn test_value_filter_without_literal_invalid() {
    assert!(matches!(
        Pattern::new(json!([">=", "r"]).into()),
        Err(PatternError::InvalidNode(_))
    ));
}

#[test]
fn test_unknown_filter_symbol_invalid() {
    assert!(matches!(
        Pattern::new(json!(["r", "invalid_filter", "r"]).into()),
        Err(PatternError::InvalidNode(_))
    ));
}

#[test]
fn test_too_many_elements_invalid() {
    assert!(matches!(
        Pattern::new(json!(["r", "=~", "r", ">=", "r"]).into()),
        Err(PatternError::InvalidNode(_))
    ));
}

#[test]
fn test_non_sequence_root_invalid() {
    assert!(matches!(
        Pattern::new(json!("aaa").into()),
        Err(PatternError::InvalidNode(_))
    ));
}

#[test]
fn test_non_string_key_invalid() {
    assert!(matches!(
        Pattern::new(json!(["==", 3, 0]).into()),
        Err(PatternError::InvalidNode(_))
    ));
    assert!(matches!(
        Pattern::new(json!(["?", 3]).into()),
        Err(PatternError::InvalidNode(_))
    ));
}

#[test]
fn test_xor_arity_three_invalid() {
    let err = Pattern::new(json!(["^", [["?", "a"], ["?", "b"], ["?", "c"]]]).into()).unwrap_err();
    assert_eq!(err, PatternError::XorArity(3));
}

#[test]
fn test_xor_arity_one_invalid() {
    assert_eq!(
        Pattern::new(json!(["^", [["?", "a"]]]).into()).unwrap_err(),
        PatternError::XorArity(1)
    );
}

#[test]
fn test_xor_invalid_child_reported_before_arity() {
    // Children are validated before the node's own arity check
    let err = Pattern::new(json!(["^", [["?", "a"], ["BAD", "b"], ["?", "c"]]]).into()).unwrap_err();
    assert!(matches!(err, PatternError::InvalidNode(_)));
}

#[test]
fn test_deeply_nested_invalid_node_reported() {
    let err = Pattern::new(json!(["&", [
        ["?", "ok"],
        ["|", [["invalid", "one", "one value"]]],
    ]])
    .into())
    .unwrap_err();
    match err {
        PatternError::InvalidNode(node) => assert!(node.contains("invalid")),
        other => panic!("expected InvalidNode, got {:?}", other),
    }
}

#[test]
fn test_nested_regexes_all_compiled() {
    // Every =~ literal at any depth compiles; a bad one anywhere fails
    // the whole construction
    let pattern = Pattern::new(json!(["&", [
        ["=~", "f", "hi"],
        ["=~", "f", "hello"],
        ["|", [
            ["=~", "f", "or_hi"],
            ["!", ["=~", "f", "not_hi"]],
        ]],
    ]])
    .into());
    assert!(pattern.is_ok());

    let bad = Pattern::new(json!(["&", [
        ["=~", "f", "hi"],
        ["|", [["=~", "f", "("]]],
    ]])
    .into());
    assert!(matches!(bad, Err(PatternError::BadRegex { .. })));
}

#[test]
fn test_error_display_carries_offending_node() {
    let err = Pattern::new(json!(["INVALID", [["=~", "f", "r"]]]).into()).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Not a valid operator or filter"));
    assert!(message.contains("INVALID"));
}

#[test]
fn test_xor_error_display_includes_count() {
    let err = Pattern::new(json!(["^", [["?", "a"]]]).into()).unwrap_err();
    assert!(err.to_string().contains('1'));
}
