#![warn(missing_docs)]
//! Structural pattern matching over nested arrays.
//!
//! Patterns describe the shape of a [Value]: literals, kind checks,
//! alternatives, sequences, and greedy or lazy repetitions that may consume
//! any number of consecutive array elements. Named sub-patterns record the
//! part of the candidate they matched.
//!
//! ```
//! use seqmatch::{parse_pattern, parse_value};
//!
//! let pattern = parse_pattern("[call $f:#str ..$args]").unwrap();
//! let value = parse_value("[call print 1 2]").unwrap();
//! let bindings = pattern.apply(&value).unwrap();
//! assert_eq!(bindings.value("args"), Some(parse_value("[1 2]").unwrap()));
//! ```
pub mod dispatch;
pub mod error;
pub mod matcher;
pub mod parse;
pub mod pattern;
pub mod value;

pub use dispatch::{dispatch, Dispatcher, Entry};
pub use error::PatternError;
pub use matcher::gas::MatchOptions;
pub use matcher::state::{Bindings, Capture};
pub use parse::{parse_pattern, parse_value, ParseError};
pub use pattern::{
  alternation, array, boolean, capture, compile, greedy, lazy, literal, named, number, repeat,
  repeat_greedy, repeat_lazy, sequence, string, wildcard, Bounds, Mode, Pattern, Repeat, Spec,
};
pub use value::{Kind, Value};
