//! Named captures collected by a successful match

use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;
use itertools::Itertools;

use crate::value::Value;

/// A part of the candidate recorded under a label
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Capture<'a> {
  /// A single value, including whole arrays
  Scalar(&'a Value),
  /// A run of consecutive elements consumed by a repetition inside a sequence
  Slice(&'a [Value]),
}
impl<'a> Capture<'a> {
  /// Copy the captured data out of the candidate. Slices become arrays.
  #[must_use]
  pub fn to_value(&self) -> Value {
    match self {
      Self::Scalar(v) => (*v).clone(),
      Self::Slice(s) => Value::Array(s.to_vec()),
    }
  }

  /// The captured elements, if the capture is a slice or an array
  #[must_use]
  pub fn as_slice(&self) -> Option<&'a [Value]> {
    match self {
      Self::Slice(s) => Some(s),
      Self::Scalar(v) => v.as_array(),
    }
  }
}
impl fmt::Display for Capture<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Scalar(v) => write!(f, "{v}"),
      Self::Slice(s) => write!(f, "[{}]", s.iter().join(" ")),
    }
  }
}

/// The result of a successful match.
///
/// Every matcher builds a fresh instance from the captures of its own
/// successful subtree, and partial results are only merged with
/// [Bindings::combine] once all parts of the enclosing pattern matched. A
/// branch of the search that is abandoned therefore never leaves anything
/// behind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bindings<'a> {
  captures: HashMap<Rc<str>, Capture<'a>>,
}
impl<'a> Bindings<'a> {
  /// A single capture
  #[must_use]
  pub fn from_capture(label: Rc<str>, capture: Capture<'a>) -> Self {
    let mut captures = HashMap::new();
    captures.insert(label, capture);
    Self { captures }
  }

  /// Merge two sets of captures. Where both contain a label, `other` wins.
  #[must_use]
  pub fn combine(mut self, other: Self) -> Self {
    self.captures.extend(other.captures);
    self
  }

  /// Look up a capture
  #[must_use]
  pub fn get(&self, label: &str) -> Option<Capture<'a>> { self.captures.get(label).copied() }

  /// Look up a capture and copy it out of the candidate
  #[must_use]
  pub fn value(&self, label: &str) -> Option<Value> { self.get(label).map(|c| c.to_value()) }

  /// Number of labels bound
  #[must_use]
  pub fn len(&self) -> usize { self.captures.len() }

  /// Whether nothing was captured
  #[must_use]
  pub fn is_empty(&self) -> bool { self.captures.is_empty() }

  /// Iterate over the captures in no particular order
  pub fn iter(&self) -> impl Iterator<Item = (&str, Capture<'a>)> + '_ {
    self.captures.iter().map(|(k, v)| (&**k, *v))
  }

  /// The bound labels in lexical order
  #[must_use]
  pub fn labels(&self) -> Vec<&str> {
    self.captures.keys().map(|k| &**k).sorted_unstable().collect()
  }

  /// Detach the captures from the lifetime of the candidate
  #[must_use]
  pub fn to_owned_map(&self) -> HashMap<Rc<str>, Value> {
    self.captures.iter().map(|(k, v)| (k.clone(), v.to_value())).collect()
  }
}

impl fmt::Display for Bindings<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lines = self.captures.iter().sorted_unstable_by(|a, b| a.0.cmp(b.0));
    write!(f, "{}", lines.map(|(k, v)| format!("{k} = {v}")).join("\n"))
  }
}

#[cfg(test)]
mod test {
  use super::{Bindings, Capture};
  use crate::value::Value;

  #[test]
  fn combine_prefers_right() {
    let (one, two) = (Value::from(1), Value::from(2));
    let left = Bindings::from_capture("a".into(), Capture::Scalar(&one));
    let right = Bindings::from_capture("a".into(), Capture::Scalar(&two));
    assert_eq!(left.combine(right).value("a"), Some(two.clone()), "the later write wins");
  }

  #[test]
  fn slices_become_arrays() {
    let items = [Value::from(1), Value::from(2)];
    let b = Bindings::from_capture("xs".into(), Capture::Slice(&items[..1]));
    assert_eq!(b.value("xs"), Some(Value::Array(vec![Value::from(1)])));
    assert_eq!(b.get("xs").and_then(|c| c.as_slice()).map(<[Value]>::len), Some(1));
    assert_eq!(b.to_string(), "xs = [1]");
  }
}
