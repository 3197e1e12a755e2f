//! Assertion helpers for validating mappings against patterns in tests.
//!
//! Each helper builds the pattern, matches it, and panics with a readable
//! message when the result does not have the expected polarity. By
//! convention [`assert_not_matches`] suppresses missing keys (absence is
//! treated as a non-match), while [`assert_matches`] does not.

use std::collections::HashMap;

use crate::{
    evaluator::MatchOptions,
    pattern::Pattern,
    value::Value,
};

/// Asserts that the mapping matches the pattern.
///
/// Panics on an invalid pattern, on a match error (missing key,
/// incomparable types), or when the mapping does not match.
#[track_caller]
pub fn assert_matches(pattern: Value, mapping: &HashMap<String, Value>) {
    assert_matches_with(pattern, mapping, MatchOptions::default());
}

/// [`assert_matches`] with explicit suppress policies.
#[track_caller]
pub fn assert_matches_with(pattern: Value, mapping: &HashMap<String, Value>, options: MatchOptions) {
    let pattern = build(pattern, options);
    match pattern.matches(mapping) {
        Ok(true) => {}
        Ok(false) => panic!(
            "mapping does not match pattern {}",
            crate::output::to_json(pattern.pattern())
        ),
        Err(e) => panic!("match failed: {}", e),
    }
}

/// Asserts that the mapping does **not** match the pattern.
///
/// Missing keys are suppressed: a filter on an absent key counts as a
/// non-match rather than an error.
#[track_caller]
pub fn assert_not_matches(pattern: Value, mapping: &HashMap<String, Value>) {
    assert_not_matches_with(
        pattern,
        mapping,
        MatchOptions {
            suppress_missing_keys: true,
            ..MatchOptions::default()
        },
    );
}

/// [`assert_not_matches`] with explicit suppress policies.
#[track_caller]
pub fn assert_not_matches_with(
    pattern: Value,
    mapping: &HashMap<String, Value>,
    options: MatchOptions,
) {
    let pattern = build(pattern, options);
    match pattern.matches(mapping) {
        Ok(false) => {}
        Ok(true) => panic!(
            "mapping unexpectedly matches pattern {}",
            crate::output::to_json(pattern.pattern())
        ),
        Err(e) => panic!("match failed: {}", e),
    }
}

#[track_caller]
fn build(pattern: Value, options: MatchOptions) -> Pattern {
    match Pattern::with_options(pattern, options) {
        Ok(p) => p,
        Err(e) => panic!("invalid pattern: {}", e),
    }
}
