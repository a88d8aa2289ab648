//! Usage errors. These describe mistakes in how a pattern or dispatcher was
//! put together, or an exhausted match budget. A candidate that simply doesn't
//! match is never an error; it is reported as [None].

use std::error::Error;
use std::fmt;

/// Something the caller did wrong, as opposed to a failed match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
  /// Only one side of a repetition's bounds was provided
  HalfBounded {
    /// The lower bound, if given
    min: Option<usize>,
    /// The upper bound, if given
    max: Option<usize>,
  },
  /// The lower bound of a repetition exceeds the upper bound
  InvertedBounds {
    /// The lower bound
    min: usize,
    /// The upper bound
    max: usize,
  },
  /// A flat dispatch list doesn't consist of whole (pattern, handler) pairs
  OddArity {
    /// Length of the list
    len: usize,
  },
  /// A flat dispatch list has a pattern where a handler should be or the
  /// other way around
  Misplaced {
    /// Position of the offending entry
    index: usize,
    /// What should have been there
    expected: &'static str,
  },
  /// The match budget ran out before the search finished
  OutOfGas {
    /// The budget the search started with
    limit: usize,
  },
}

impl fmt::Display for PatternError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::HalfBounded { min, max } => write!(
        f,
        "Repetition bounds must be given together or not at all (min: {min:?}, max: {max:?})"
      ),
      Self::InvertedBounds { min, max } =>
        write!(f, "Repetition lower bound {min} exceeds upper bound {max}"),
      Self::OddArity { len } =>
        write!(f, "Dispatch list of length {len} doesn't split into pattern/handler pairs"),
      Self::Misplaced { index, expected } =>
        write!(f, "Dispatch entry #{index} should be a {expected}"),
      Self::OutOfGas { limit } => write!(f, "Match gave up after {limit} steps"),
    }
  }
}
impl Error for PatternError {}
