use ordered_float::NotNan;

use super::Pattern;
use crate::matcher::shared::Sequence;
use crate::value::Value;

/// Anything that can be turned into a [Pattern] with [compile]
#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
  /// An already compiled pattern, used as-is
  Pattern(Pattern),
  /// Stands for [Pattern::Wildcard]
  Wildcard,
  /// A nested list, compiled to a sequence of its compiled elements
  List(Vec<Spec>),
  /// A plain value. Arrays are compiled like [Spec::List], everything else
  /// becomes a literal
  Value(Value),
}

impl From<Pattern> for Spec {
  fn from(value: Pattern) -> Self { Self::Pattern(value) }
}
impl From<Value> for Spec {
  fn from(value: Value) -> Self { Self::Value(value) }
}
impl From<Vec<Spec>> for Spec {
  fn from(value: Vec<Spec>) -> Self { Self::List(value) }
}
impl From<NotNan<f64>> for Spec {
  fn from(value: NotNan<f64>) -> Self { Self::Value(value.into()) }
}
impl From<i32> for Spec {
  fn from(value: i32) -> Self { Self::Value(value.into()) }
}
impl From<usize> for Spec {
  fn from(value: usize) -> Self { Self::Value(value.into()) }
}
impl From<&str> for Spec {
  fn from(value: &str) -> Self { Self::Value(value.into()) }
}
impl From<String> for Spec {
  fn from(value: String) -> Self { Self::Value(value.into()) }
}
impl From<bool> for Spec {
  fn from(value: bool) -> Self { Self::Value(value.into()) }
}

/// Normalize raw input into a pattern. This never fails; anything that isn't
/// a pattern, the wildcard marker or a list is matched by equality.
#[must_use]
pub fn compile(spec: impl Into<Spec>) -> Pattern {
  match spec.into() {
    Spec::Pattern(p) => p,
    Spec::Wildcard => Pattern::Wildcard,
    Spec::List(items) => Pattern::Sequence(Sequence::new(items.into_iter().map(compile).collect())),
    Spec::Value(Value::Array(items)) => {
      let elements = items.into_iter().map(|v| compile(Spec::Value(v))).collect();
      Pattern::Sequence(Sequence::new(elements))
    },
    Spec::Value(v) => Pattern::Literal(v),
  }
}
