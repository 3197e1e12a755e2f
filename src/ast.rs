//! Pattern tree for the kmatch language.
//!
//! A pattern is supplied by the caller as a nested sequence structure
//! ([`crate::Value`]) and validated into this closed set of node kinds:
//!
//! - **Operators** `&` (and), `|` (or), `!` (not), `^` (xor) combine child
//!   nodes.
//! - **Value filters** `==`, `!=`, `<`, `>`, `<=`, `>=`, `=~` compare the
//!   mapping's value at a key against a literal.
//! - **Key filters** `?`, `!?` test key presence only.
//!
//! ```text
//! ["&", [["?", "subject"], ["=~", "subject", "^Email"]]]
//! ```
//!
//! Every consumer of the tree (regex compilation, evaluation, key
//! collection) is an exhaustive match over [`Node`], so an operator added
//! here cannot be silently mishandled elsewhere.

use std::collections::HashSet;

use regex::Regex;

use crate::value::Value;

/// Comparison operators usable in a value filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Regex prefix match (`=~`)
    Matches,
}

impl CompareOp {
    /// Look up the operator for a grammar symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "==" => Some(CompareOp::Equal),
            "!=" => Some(CompareOp::NotEqual),
            "<" => Some(CompareOp::LessThan),
            ">" => Some(CompareOp::GreaterThan),
            "<=" => Some(CompareOp::LessEqual),
            ">=" => Some(CompareOp::GreaterEqual),
            "=~" => Some(CompareOp::Matches),
            _ => None,
        }
    }

    /// The grammar symbol for this operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Equal => "==",
            CompareOp::NotEqual => "!=",
            CompareOp::LessThan => "<",
            CompareOp::GreaterThan => ">",
            CompareOp::LessEqual => "<=",
            CompareOp::GreaterEqual => ">=",
            CompareOp::Matches => "=~",
        }
    }
}

/// Key-presence operators usable in a key filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOp {
    /// Key is present (`?`)
    Exists,
    /// Key is absent (`!?`)
    NotExists,
}

impl KeyOp {
    /// Look up the operator for a grammar symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "?" => Some(KeyOp::Exists),
            "!?" => Some(KeyOp::NotExists),
            _ => None,
        }
    }

    /// The grammar symbol for this operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            KeyOp::Exists => "?",
            KeyOp::NotExists => "!?",
        }
    }
}

/// The literal operand of a value filter.
///
/// Literals for the `=~` operator start out as raw string values and are
/// replaced by a compiled regex during pattern construction; every other
/// operator keeps its raw value. This transition happens exactly once.
#[derive(Debug, Clone)]
pub enum Literal {
    /// An uncompiled literal value
    Value(Value),
    /// A compiled regex handle (only ever behind `=~`)
    Regex(Regex),
}

// Regex has no PartialEq; compiled handles compare by source text.
impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Value(a), Literal::Value(b)) => a == b,
            (Literal::Regex(a), Literal::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// A validated pattern tree node.
///
/// Shape (tag and field count) is fixed at construction; a node is never
/// altered after validation and regex compilation.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// True iff every child is true; vacuously true when empty (`&`)
    And(Vec<Node>),
    /// True iff any child is true; vacuously false when empty (`|`)
    Or(Vec<Node>),
    /// Boolean negation of the single child (`!`)
    Not(Box<Node>),
    /// True iff exactly one of the two children is true (`^`)
    Xor(Box<Node>, Box<Node>),
    /// Compares the mapping's value at `key` against `literal`
    ValueFilter {
        op: CompareOp,
        key: String,
        literal: Literal,
    },
    /// Tests presence of `key`, ignoring its value
    KeyFilter { op: KeyOp, key: String },
}

impl Node {
    /// Returns the set of distinct mapping keys this pattern dereferences.
    pub fn field_keys(&self) -> HashSet<String> {
        let mut keys = HashSet::new();
        self.collect_field_keys(&mut keys);
        keys
    }

    fn collect_field_keys(&self, keys: &mut HashSet<String>) {
        match self {
            Node::And(children) | Node::Or(children) => {
                for child in children {
                    child.collect_field_keys(keys);
                }
            }
            Node::Not(child) => child.collect_field_keys(keys),
            Node::Xor(left, right) => {
                left.collect_field_keys(keys);
                right.collect_field_keys(keys);
            }
            Node::ValueFilter { key, .. } | Node::KeyFilter { key, .. } => {
                keys.insert(key.clone());
            }
        }
    }
}
