//! Pattern evaluation against an input mapping.
//!
//! The evaluator applies a compiled [`Node`] tree to a mapping and produces
//! a boolean. All operations are side-effect-free, so `&` and `|` may
//! short-circuit. Lookup and comparison failures are explicit results
//! ([`EvalError`]); the [`MatchOptions`] suppress policies convert them
//! into a `false` subtree instead of propagating.

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::{Decimal, prelude::FromPrimitive};

use crate::{
    ast::{CompareOp, KeyOp, Literal, Node},
    value::Value,
};

/// Options controlling how evaluation-time failures are handled.
///
/// Both default to off, in which case the corresponding error aborts the
/// whole match call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// A missing mapping key makes the filter evaluate to `false` instead
    /// of raising [`EvalError::MissingKey`]
    pub suppress_missing_keys: bool,

    /// An ordering comparison between incomparable types makes the filter
    /// evaluate to `false` instead of raising [`EvalError::TypeError`]
    pub suppress_type_errors: bool,
}

/// Errors that can occur while matching a mapping against a pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A value filter's key is absent from the input mapping
    MissingKey(String),

    /// An ordering comparison between incomparable types
    TypeError(String),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::MissingKey(key) => write!(f, "Missing key: '{}'", key),
            EvalError::TypeError(msg) => write!(f, "Type error: {}", msg),
        }
    }
}

impl std::error::Error for EvalError {}

/// Returns a human-readable type name for a Value
fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Boolean(_) => "boolean",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Applies a compiled pattern tree to input mappings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    options: MatchOptions,
}

impl Evaluator {
    pub fn new(options: MatchOptions) -> Self {
        Evaluator { options }
    }

    /// Evaluates a node against a mapping, producing a boolean.
    pub fn eval(&self, node: &Node, mapping: &HashMap<String, Value>) -> Result<bool, EvalError> {
        match node {
            Node::And(children) => {
                for child in children {
                    if !self.eval(child, mapping)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Node::Or(children) => {
                for child in children {
                    if self.eval(child, mapping)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Node::Not(child) => Ok(!self.eval(child, mapping)?),
            Node::Xor(left, right) => {
                Ok(self.eval(left, mapping)? != self.eval(right, mapping)?)
            }
            Node::KeyFilter { op, key } => {
                // A presence test never raises, regardless of policy
                let present = mapping.contains_key(key);
                Ok(match op {
                    KeyOp::Exists => present,
                    KeyOp::NotExists => !present,
                })
            }
            Node::ValueFilter { op, key, literal } => {
                let Some(actual) = mapping.get(key) else {
                    if self.options.suppress_missing_keys {
                        return Ok(false);
                    }
                    return Err(EvalError::MissingKey(key.clone()));
                };
                match apply_filter(*op, actual, literal) {
                    Err(EvalError::TypeError(_)) if self.options.suppress_type_errors => Ok(false),
                    result => result,
                }
            }
        }
    }
}

fn apply_filter(op: CompareOp, actual: &Value, literal: &Literal) -> Result<bool, EvalError> {
    match (op, literal) {
        (CompareOp::Matches, Literal::Regex(regex)) => {
            // Prefix match; non-string lookups (including null) are a
            // non-match, never an error
            Ok(match actual {
                Value::String(s) => regex.find(s).is_some_and(|m| m.start() == 0),
                _ => false,
            })
        }
        (CompareOp::Matches, Literal::Value(_)) => Err(EvalError::TypeError(
            "regex literal was not compiled".to_string(),
        )),
        (CompareOp::Equal, Literal::Value(expected)) => Ok(values_equal(actual, expected)),
        (CompareOp::NotEqual, Literal::Value(expected)) => Ok(!values_equal(actual, expected)),
        (CompareOp::LessThan, Literal::Value(expected)) => {
            Ok(compare_values(actual, expected)? == Ordering::Less)
        }
        (CompareOp::GreaterThan, Literal::Value(expected)) => {
            Ok(compare_values(actual, expected)? == Ordering::Greater)
        }
        (CompareOp::LessEqual, Literal::Value(expected)) => {
            Ok(compare_values(actual, expected)? != Ordering::Greater)
        }
        (CompareOp::GreaterEqual, Literal::Value(expected)) => {
            Ok(compare_values(actual, expected)? != Ordering::Less)
        }
        (_, Literal::Regex(_)) => Err(EvalError::TypeError(format!(
            "operator {} cannot take a regex literal",
            op.symbol()
        ))),
    }
}

/// Structural equality, except numeric pairs compare numerically so that
/// an integer equals the float of the same magnitude.
fn values_equal(left: &Value, right: &Value) -> bool {
    if is_numeric(left) && is_numeric(right) {
        return compare_values(left, right) == Ok(Ordering::Equal);
    }
    left == right
}

fn is_numeric(v: &Value) -> bool {
    matches!(v, Value::Integer(_) | Value::Float(_))
}

/// Ordering comparison, defined for numeric and string pairs only.
fn compare_values(left: &Value, right: &Value) -> Result<Ordering, EvalError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => {
            a.partial_cmp(b).ok_or_else(|| nan_error(left, right))
        }
        (Value::Integer(a), Value::Float(b)) => compare_int_float(*a, *b, left, right),
        (Value::Float(a), Value::Integer(b)) => {
            compare_int_float(*b, *a, left, right).map(Ordering::reverse)
        }
        (a, b) => Err(EvalError::TypeError(format!(
            "Cannot compare {} and {} (comparison requires numeric or string types)",
            type_name(a),
            type_name(b)
        ))),
    }
}

/// Compares i64 against f64 exactly where possible. Large integers lose
/// precision under an f64 cast, so the comparison goes through Decimal
/// first and only falls back to floats when conversion fails.
fn compare_int_float(a: i64, b: f64, left: &Value, right: &Value) -> Result<Ordering, EvalError> {
    if let Some(ad) = Decimal::from_i64(a)
        && let Some(bd) = Decimal::from_f64(b)
    {
        return Ok(ad.cmp(&bd));
    }
    (a as f64)
        .partial_cmp(&b)
        .ok_or_else(|| nan_error(left, right))
}

fn nan_error(left: &Value, right: &Value) -> EvalError {
    EvalError::TypeError(format!(
        "Cannot compare {} and {} (NaN is unordered)",
        type_name(left),
        type_name(right)
    ))
}
