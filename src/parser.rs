//! Validation and regex precompilation of raw patterns.
//!
//! [`parse`] checks a caller-supplied nested sequence against the pattern
//! grammar and produces the typed [`Node`] tree; [`compile`] walks that
//! tree once and replaces every `=~` literal with a compiled regex handle.
//! Both run inside pattern construction, so every structural defect is
//! reported eagerly and no error of this kind can surface during matching.

use regex::Regex;

use crate::{
    ast::{CompareOp, KeyOp, Literal, Node},
    output::to_json,
    value::Value,
};

/// Errors raised while validating or compiling a pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternError {
    /// A node that is none of the recognized operator or filter shapes
    InvalidNode(String),

    /// The `^` operator was given a child count other than 2
    XorArity(usize),

    /// A `=~` literal that is not a string or does not compile
    BadRegex { literal: String, detail: String },
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::InvalidNode(node) => {
                write!(f, "Not a valid operator or filter - {}", node)
            }
            PatternError::XorArity(count) => {
                write!(f, "xor requires exactly 2 operands, got {}", count)
            }
            PatternError::BadRegex { literal, detail } => {
                write!(f, "Bad regex - {} ({})", literal, detail)
            }
        }
    }
}

impl std::error::Error for PatternError {}

fn invalid(node: &Value) -> PatternError {
    PatternError::InvalidNode(to_json(node))
}

/// Validates a raw pattern structure into a typed [`Node`] tree.
///
/// The grammar, with arity fixed per operator:
///
/// ```text
/// node         := ["&" | "|" | "^", [node, ...]]
///               | ["!", node]
///               | [compare-op, key, literal]     compare-op: == != < > <= >= =~
///               | [key-op, key]                  key-op: ? !?
/// ```
///
/// Children are validated before the node itself, so the first invalid
/// node anywhere in the tree is the one reported. `^` additionally
/// requires exactly two children.
pub fn parse(pattern: &Value) -> Result<Node, PatternError> {
    let Value::Array(items) = pattern else {
        return Err(invalid(pattern));
    };

    match items.as_slice() {
        [Value::String(symbol), operand] => match symbol.as_str() {
            "!" => Ok(Node::Not(Box::new(parse(operand)?))),
            "&" | "|" | "^" => {
                let Value::Array(children) = operand else {
                    return Err(invalid(pattern));
                };
                let mut nodes = children.iter().map(parse).collect::<Result<Vec<_>, _>>()?;
                match symbol.as_str() {
                    "&" => Ok(Node::And(nodes)),
                    "|" => Ok(Node::Or(nodes)),
                    _ => {
                        if nodes.len() != 2 {
                            return Err(PatternError::XorArity(nodes.len()));
                        }
                        let right = nodes.pop().unwrap();
                        let left = nodes.pop().unwrap();
                        Ok(Node::Xor(Box::new(left), Box::new(right)))
                    }
                }
            }
            _ => match (KeyOp::from_symbol(symbol), operand) {
                (Some(op), Value::String(key)) => Ok(Node::KeyFilter {
                    op,
                    key: key.clone(),
                }),
                _ => Err(invalid(pattern)),
            },
        },
        [Value::String(symbol), Value::String(key), literal] => {
            match CompareOp::from_symbol(symbol) {
                Some(op) => Ok(Node::ValueFilter {
                    op,
                    key: key.clone(),
                    literal: Literal::Value(literal.clone()),
                }),
                None => Err(invalid(pattern)),
            }
        }
        _ => Err(invalid(pattern)),
    }
}

/// Compiles every `=~` literal in a validated tree, in place.
///
/// This is the only point where the tree is mutated. Assumes [`parse`] has
/// already accepted the shape; only the literal of `=~` filters changes.
pub fn compile(node: &mut Node) -> Result<(), PatternError> {
    match node {
        Node::And(children) | Node::Or(children) => {
            for child in children {
                compile(child)?;
            }
            Ok(())
        }
        Node::Not(child) => compile(child),
        Node::Xor(left, right) => {
            compile(left)?;
            compile(right)
        }
        Node::ValueFilter {
            op: CompareOp::Matches,
            literal,
            ..
        } => {
            if let Literal::Value(raw) = literal {
                let Value::String(source) = raw else {
                    return Err(PatternError::BadRegex {
                        literal: to_json(raw),
                        detail: "regex literal must be a string".to_string(),
                    });
                };
                let regex = Regex::new(source).map_err(|e| PatternError::BadRegex {
                    literal: source.clone(),
                    detail: e.to_string(),
                })?;
                *literal = Literal::Regex(regex);
            }
            Ok(())
        }
        Node::ValueFilter { .. } | Node::KeyFilter { .. } => Ok(()),
    }
}
