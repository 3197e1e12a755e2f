//! The public pattern handle.
//!
//! A [`Pattern`] is built once from a caller-supplied nested structure,
//! validated and regex-compiled synchronously inside the constructor, and
//! is immutable afterwards. Construction fails atomically; a partially
//! compiled pattern is never observable. Matching and key collection are
//! read-only, so a pattern may be shared across threads freely.

use std::collections::{HashMap, HashSet};

use crate::{
    ast::Node,
    evaluator::{EvalError, Evaluator, MatchOptions},
    parser::{self, PatternError},
    value::Value,
};

/// A validated, compiled kmatch pattern.
///
/// # Examples
///
/// ```
/// use kmatch::{Pattern, Value};
/// use std::collections::HashMap;
///
/// let raw: Value = serde_json::json!(["&", [
///     ["?", "subject"],
///     ["=~", "subject", "^Email"],
/// ]]).into();
/// let pattern = Pattern::new(raw).unwrap();
///
/// let mut record = HashMap::new();
/// record.insert("subject".to_string(), Value::String("Email reminder".into()));
/// assert!(pattern.matches(&record).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: Value,
    compiled: Node,
    options: MatchOptions,
}

impl Pattern {
    /// Validates and compiles a pattern with default options.
    pub fn new(pattern: Value) -> Result<Self, PatternError> {
        Self::with_options(pattern, MatchOptions::default())
    }

    /// Validates and compiles a pattern with the given suppress policies.
    ///
    /// The input is taken by value; the original structure is retained
    /// unmodified for [`pattern()`](Self::pattern) while an independent
    /// compiled tree is built from it.
    pub fn with_options(pattern: Value, options: MatchOptions) -> Result<Self, PatternError> {
        let mut compiled = parser::parse(&pattern)?;
        parser::compile(&mut compiled)?;
        Ok(Pattern {
            raw: pattern,
            compiled,
            options,
        })
    }

    /// The pattern structure exactly as supplied at construction.
    pub fn pattern(&self) -> &Value {
        &self.raw
    }

    /// The suppress policies this pattern was constructed with.
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Matches the mapping against the pattern.
    ///
    /// Returns [`EvalError::MissingKey`] when a value filter's key is
    /// absent and [`EvalError::TypeError`] on incomparable operands,
    /// unless the corresponding suppress policy converts the failing
    /// subtree to `false`.
    pub fn matches(&self, mapping: &HashMap<String, Value>) -> Result<bool, EvalError> {
        Evaluator::new(self.options).eval(&self.compiled, mapping)
    }

    /// The set of distinct mapping keys this pattern dereferences.
    pub fn field_keys(&self) -> HashSet<String> {
        self.compiled.field_keys()
    }
}

/// Collects the field keys of an unvalidated pattern structure.
///
/// Validates the shape while recursing, surfacing the same error
/// [`Pattern::new`] would raise for a malformed structure.
pub fn field_keys(pattern: &Value) -> Result<HashSet<String>, PatternError> {
    parser::parse(pattern).map(|node| node.field_keys())
}
