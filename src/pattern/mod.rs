//! The pattern data model and its constructors.
//!
//! A [Pattern] is built once and applied many times. Sequences are split into
//! chunks when they are constructed, so applying a pattern never repeats that
//! work.

mod compile;

use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;

use itertools::{Either, Itertools};

pub use self::compile::{compile, Spec};
use crate::error::PatternError;
use crate::matcher::gas::{Gas, MatchOptions};
use crate::matcher::scal_match::scal_match;
use crate::matcher::shared::Sequence;
use crate::matcher::state::Bindings;
use crate::value::{is_bare_word, write_quoted, Kind, Value};

/// Which end of its range a repetition tries first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
  /// Consume as many elements as possible, give them back only if the rest of
  /// the sequence fails
  Greedy,
  /// Consume as few elements as possible, take more only if the rest of the
  /// sequence fails
  Lazy,
}
impl Mode {
  /// Candidate lengths in order of preference
  pub(crate) fn walk(self, range: RangeInclusive<usize>) -> impl Iterator<Item = usize> {
    match self {
      Self::Greedy => Either::Left(range.rev()),
      Self::Lazy => Either::Right(range),
    }
  }
}

/// The permitted number of elements of a repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
  /// Lower bound, inclusive
  pub min: usize,
  /// Upper bound, inclusive. [None] means unbounded
  pub max: Option<usize>,
}
impl Bounds {
  /// Zero or more
  pub const ANY: Self = Self { min: 0, max: None };
  /// One or more
  pub const NONZERO: Self = Self { min: 1, max: None };

  /// Validate optional bounds. They must be given together, and `min` may not
  /// exceed `max`.
  pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self, PatternError> {
    match (min, max) {
      (None, None) => Ok(Self::ANY),
      (Some(min), Some(max)) if max < min => Err(PatternError::InvertedBounds { min, max }),
      (Some(min), Some(max)) => Ok(Self { min, max: Some(max) }),
      (min, max) => Err(PatternError::HalfBounded { min, max }),
    }
  }

  /// Whether a run of `len` elements is permitted
  #[must_use]
  pub fn contains(&self, len: usize) -> bool {
    self.min <= len && self.max.map_or(true, |max| len <= max)
  }
}

/// A run of elements that each match the same pattern
#[derive(Debug, Clone, PartialEq)]
pub struct Repeat {
  /// Pattern applied to every element
  pub inner: Box<Pattern>,
  /// Search order
  pub mode: Mode,
  /// Permitted length
  pub bounds: Bounds,
}

/// A compiled match expression
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
  /// Matches values equal to this one
  Literal(Value),
  /// Matches anything
  Wildcard,
  /// Matches any value of the given kind
  TypeCheck(Kind),
  /// Matches if any of the options matches, trying them in order
  Alternation(Vec<Pattern>),
  /// Matches arrays element by element
  Sequence(Sequence),
  /// Matches arrays whose elements all match the inner pattern. Inside a
  /// sequence it matches a run of elements instead.
  Repeat(Repeat),
  /// Matches like the inner pattern and records what it matched
  Named(Rc<str>, Box<Pattern>),
}
impl Pattern {
  /// Match a candidate without a step limit
  #[must_use]
  pub fn apply<'a>(&self, candidate: &'a Value) -> Option<Bindings<'a>> {
    scal_match(self, candidate, &Gas::new(&MatchOptions::default()))
  }

  /// Match a candidate with the given settings. Running out of gas is an
  /// error, a mismatch is `Ok(None)`.
  pub fn apply_with<'a>(
    &self,
    candidate: &'a Value,
    options: &MatchOptions,
  ) -> Result<Option<Bindings<'a>>, PatternError> {
    let gas = Gas::new(options);
    let result = scal_match(self, candidate, &gas);
    match (gas.ran_out(), options.gas) {
      (true, Some(limit)) => Err(PatternError::OutOfGas { limit }),
      _ => Ok(result),
    }
  }

  /// Whether the candidate matches
  #[must_use]
  pub fn matches(&self, candidate: &Value) -> bool { self.apply(candidate).is_some() }

  /// The repetition this pattern stands for in a sequence, looking through
  /// any number of [Pattern::Named] wrappers
  #[must_use]
  pub fn as_repeat(&self) -> Option<&Repeat> {
    match self {
      Self::Repeat(rep) => Some(rep),
      Self::Named(_, inner) => inner.as_repeat(),
      _ => None,
    }
  }

  /// Whether the sequence matcher treats this as a variable-length chunk
  #[must_use]
  pub fn is_repeat(&self) -> bool { self.as_repeat().is_some() }
}

/// Match exactly this value
#[must_use]
pub fn literal(v: impl Into<Value>) -> Pattern { Pattern::Literal(v.into()) }

/// Match any single value
#[must_use]
pub fn wildcard() -> Pattern { Pattern::Wildcard }

/// Match any number
#[must_use]
pub fn number() -> Pattern { Pattern::TypeCheck(Kind::Num) }

/// Match any string
#[must_use]
pub fn string() -> Pattern { Pattern::TypeCheck(Kind::Str) }

/// Match any boolean
#[must_use]
pub fn boolean() -> Pattern { Pattern::TypeCheck(Kind::Bool) }

/// Match any array
#[must_use]
pub fn array() -> Pattern { Pattern::TypeCheck(Kind::Array) }

/// Match the first of the options that matches
#[must_use]
pub fn alternation<S: Into<Spec>>(options: impl IntoIterator<Item = S>) -> Pattern {
  Pattern::Alternation(options.into_iter().map(compile).collect())
}

/// Match an array whose elements match the given patterns in order
#[must_use]
pub fn sequence<S: Into<Spec>>(elements: impl IntoIterator<Item = S>) -> Pattern {
  Pattern::Sequence(Sequence::new(elements.into_iter().map(compile).collect()))
}

/// Build a repetition. `min` and `max` must be given together, or neither for
/// an unbounded repetition.
pub fn repeat(
  mode: Mode,
  inner: impl Into<Spec>,
  min: Option<usize>,
  max: Option<usize>,
) -> Result<Pattern, PatternError> {
  let bounds = Bounds::new(min, max)?;
  Ok(Pattern::Repeat(Repeat { inner: Box::new(compile(inner)), mode, bounds }))
}

/// Greedy repetition, see [repeat]
pub fn repeat_greedy(
  inner: impl Into<Spec>,
  min: Option<usize>,
  max: Option<usize>,
) -> Result<Pattern, PatternError> {
  repeat(Mode::Greedy, inner, min, max)
}

/// Lazy repetition, see [repeat]
pub fn repeat_lazy(
  inner: impl Into<Spec>,
  min: Option<usize>,
  max: Option<usize>,
) -> Result<Pattern, PatternError> {
  repeat(Mode::Lazy, inner, min, max)
}

/// Unbounded greedy repetition
#[must_use]
pub fn greedy(inner: impl Into<Spec>) -> Pattern {
  let inner = Box::new(compile(inner));
  Pattern::Repeat(Repeat { inner, mode: Mode::Greedy, bounds: Bounds::ANY })
}

/// Unbounded lazy repetition
#[must_use]
pub fn lazy(inner: impl Into<Spec>) -> Pattern {
  Pattern::Repeat(Repeat { inner: Box::new(compile(inner)), mode: Mode::Lazy, bounds: Bounds::ANY })
}

/// Record whatever `inner` matches under `label`
#[must_use]
pub fn named(label: impl AsRef<str>, inner: impl Into<Spec>) -> Pattern {
  Pattern::Named(Rc::from(label.as_ref()), Box::new(compile(inner)))
}

/// Record any single value under `label`
#[must_use]
pub fn capture(label: impl AsRef<str>) -> Pattern { named(label, Pattern::Wildcard) }

// ################ Display ################

impl fmt::Display for Bounds {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (self.min, self.max) {
      (0, None) => write!(f, "*"),
      (1, None) => write!(f, "+"),
      (0, Some(1)) => write!(f, "?"),
      (min, None) => write!(f, "{{{min},}}"),
      (min, Some(max)) if min == max => write!(f, "{{{min}}}"),
      (min, Some(max)) => write!(f, "{{{min},{max}}}"),
    }
  }
}

impl fmt::Display for Repeat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &*self.inner {
      inner @ (Pattern::Repeat(_) | Pattern::Named(..)) => write!(f, "({inner})")?,
      inner => write!(f, "{inner}")?,
    }
    write!(f, "{}", self.bounds)?;
    match self.mode {
      Mode::Greedy => Ok(()),
      Mode::Lazy => write!(f, "?"),
    }
  }
}

impl fmt::Display for Pattern {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      // Brackets alone would read back as a sequence
      Self::Literal(v @ Value::Array(_)) => write!(f, "={v}"),
      Self::Literal(v) => write!(f, "{v}"),
      Self::Wildcard => write!(f, "_"),
      Self::TypeCheck(k) => write!(f, "{k}"),
      // Parentheses around a single pattern only group it
      Self::Alternation(options) if options.len() == 1 => write!(f, "({} |)", options[0]),
      Self::Alternation(options) => write!(f, "({})", options.iter().join(" | ")),
      Self::Sequence(seq) => write!(f, "[{}]", seq.elements().iter().join(" ")),
      Self::Repeat(rep) => write!(f, "{rep}"),
      Self::Named(label, inner) => {
        f.write_str("$")?;
        match is_bare_word(label) {
          true => f.write_str(label)?,
          false => write_quoted(f, label)?,
        }
        match &**inner {
          Self::Wildcard => Ok(()),
          inner => write!(f, ":{inner}"),
        }
      },
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn bounds_must_come_in_pairs() {
    assert_eq!(
      repeat_greedy(wildcard(), Some(1), None),
      Err(PatternError::HalfBounded { min: Some(1), max: None })
    );
    assert_eq!(
      repeat_lazy(wildcard(), None, Some(3)),
      Err(PatternError::HalfBounded { min: None, max: Some(3) })
    );
    assert_eq!(
      repeat_greedy(wildcard(), Some(3), Some(1)),
      Err(PatternError::InvertedBounds { min: 3, max: 1 })
    );
    assert!(repeat_greedy(wildcard(), None, None).is_ok());
  }

  #[test]
  fn walk_order() {
    assert_eq!(Mode::Greedy.walk(1..=3).collect_vec(), vec![3, 2, 1], "greedy starts long");
    assert_eq!(Mode::Lazy.walk(1..=3).collect_vec(), vec![1, 2, 3], "lazy starts short");
  }

  #[test]
  fn named_repeat_is_still_a_repeat() {
    assert!(named("xs", greedy(wildcard())).is_repeat());
    assert!(named("a", named("b", lazy(number()))).is_repeat());
    assert!(!named("x", wildcard()).is_repeat());
  }

  #[test]
  fn display() {
    let pat = sequence([
      literal("let"),
      named("name", string()),
      named("body", repeat_lazy(alternation([number(), boolean()]), Some(1), Some(2)).unwrap()),
      greedy(named("rest", wildcard())),
    ]);
    assert_eq!(pat.to_string(), "[let $name:#str $body:(#num | #bool){1,2}? ($rest)*]");
    assert_eq!(capture("weird label").to_string(), "$\"weird label\"");
    assert_eq!(alternation([literal(1)]).to_string(), "(1 |)");
    assert_eq!(literal(Value::from(vec![Value::from(1)])).to_string(), "=[1]");
  }
}
