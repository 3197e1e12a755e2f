//! Match JSON input against kmatch patterns

use std::collections::HashMap;

use super::CliError;
use crate::{MatchOptions, Pattern, Value};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The kmatch pattern, as JSON
    pub pattern: String,
    /// JSON input string (must be an object)
    pub input: Option<String>,
    /// Missing keys count as a non-match instead of an error
    pub suppress_missing_keys: bool,
    /// Incomparable-type comparisons count as a non-match instead of an error
    pub suppress_type_errors: bool,
    /// Only validate the pattern, don't match
    pub pattern_only: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Pattern validation passed
    PatternValid,
    /// The input was matched against the pattern
    Matched(bool),
}

/// Execute a kmatch check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let raw: Value = serde_json::from_str::<serde_json::Value>(&options.pattern)?.into();

    let pattern = Pattern::with_options(
        raw,
        MatchOptions {
            suppress_missing_keys: options.suppress_missing_keys,
            suppress_type_errors: options.suppress_type_errors,
        },
    )?;

    if options.pattern_only {
        return Ok(CheckResult::PatternValid);
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let mapping = parse_mapping(json_str)?;

    let matched = pattern.matches(&mapping)?;
    Ok(CheckResult::Matched(matched))
}

/// List the field keys referenced by a pattern, sorted.
pub fn list_keys(pattern_json: &str) -> Result<Vec<String>, CliError> {
    let raw: Value = serde_json::from_str::<serde_json::Value>(pattern_json)?.into();
    let mut keys: Vec<String> = crate::field_keys(&raw)?.into_iter().collect();
    keys.sort();
    Ok(keys)
}

fn parse_mapping(json_str: &str) -> Result<HashMap<String, Value>, CliError> {
    let value: Value = serde_json::from_str::<serde_json::Value>(json_str)?.into();
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::NotAnObject),
    }
}
