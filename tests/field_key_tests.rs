use kmatch::{Pattern, PatternError, Value, field_keys};
use serde_json::json;
use std::collections::HashSet;

fn key_set(keys: &[&str]) -> HashSet<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[test]
fn test_get_field_keys() {
    // Keys are deduplicated across operators, filters, and nesting depth
    let pattern = Pattern::new(json!(["&", [
        ["?", "foo"],
        ["=~", "one", "one value"],
        ["=~", "two", "two value"],
        ["|", [
            ["=~", "three", "three value"],
            ["!", ["=~", "one", "other one value"]],
            ["^", [
                ["==", "five", "five value"],
                ["==", "five", "five value"],
            ]],
            ["&", [
                ["=~", "four", "four value"],
            ]],
        ]],
    ]])
    .into())
    .unwrap();

    assert_eq!(
        pattern.field_keys(),
        key_set(&["one", "two", "three", "four", "five", "foo"])
    );
}

#[test]
fn test_field_keys_singleton() {
    assert_eq!(
        Pattern::new(json!(["<=", "f", 0]).into()).unwrap().field_keys(),
        key_set(&["f"])
    );
    assert_eq!(
        Pattern::new(json!(["!?", "k"]).into()).unwrap().field_keys(),
        key_set(&["k"])
    );
}

#[test]
fn test_field_keys_duplicate_key_appears_once() {
    let pattern = Pattern::new(json!(["&", [
        [">=", "f", 3],
        ["<=", "f", 7],
    ]])
    .into())
    .unwrap();
    assert_eq!(pattern.field_keys(), key_set(&["f"]));
}

#[test]
fn test_free_field_keys_on_valid_structure() {
    let raw: Value = json!(["|", [["?", "a"], ["==", "b", 1]]]).into();
    assert_eq!(field_keys(&raw).unwrap(), key_set(&["a", "b"]));
}

#[test]
fn test_free_field_keys_validates_structure() {
    // The collector surfaces the same structural error the validator would
    let raw: Value = json!(["&", [["invalid", "one", "one value"]]]).into();
    assert!(matches!(field_keys(&raw), Err(PatternError::InvalidNode(_))));
}

#[test]
fn test_free_field_keys_rejects_non_sequence_root() {
    let raw: Value = json!({"not": "a pattern"}).into();
    assert!(field_keys(&raw).is_err());
}
