pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod evaluator;
pub mod output;
pub mod parser;
pub mod pattern;
pub mod testing;
pub mod value;

pub use ast::{CompareOp, KeyOp, Literal, Node};
pub use evaluator::{EvalError, Evaluator, MatchOptions};
pub use output::{to_json, to_json_pretty};
pub use parser::{PatternError, compile, parse};
pub use pattern::{Pattern, field_keys};
pub use value::Value;
