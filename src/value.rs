//! The dynamically typed data that patterns are matched against

use std::fmt;
use std::rc::Rc;

use itertools::Itertools;
use ordered_float::NotNan;

/// The primitive kind of a [Value]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
  /// Any number, integral or not
  Num,
  /// A string or bare word
  Str,
  /// `true` or `false`
  Bool,
  /// An ordered sequence of values
  Array,
}
impl Kind {
  /// The name of the kind in the text notation, without the leading `#`
  #[must_use]
  pub fn name(self) -> &'static str {
    match self {
      Self::Num => "num",
      Self::Str => "str",
      Self::Bool => "bool",
      Self::Array => "arr",
    }
  }

  /// Inverse of [Kind::name]
  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    [Self::Num, Self::Str, Self::Bool, Self::Array].into_iter().find(|k| k.name() == name)
  }
}
impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.name()) }
}

/// A candidate for matching. Prefix-style ASTs are arrays whose first element
/// is usually a string naming the node.
///
/// Equality is strict: two values are equal only if they have the same kind
/// and the same content, so `1` and `"1"` are distinct, but `1` and `1.0` are
/// the same number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
  /// A number. NaN is not representable
  Num(NotNan<f64>),
  /// A string
  Str(Rc<str>),
  /// A boolean
  Bool(bool),
  /// An array of values
  Array(Vec<Value>),
}
impl Value {
  /// Build a number from a float, or [None] if it is NaN
  #[must_use]
  pub fn num(f: f64) -> Option<Self> { NotNan::new(f).ok().map(Self::Num) }

  /// Build a string value
  #[must_use]
  pub fn str(s: impl AsRef<str>) -> Self { Self::Str(Rc::from(s.as_ref())) }

  /// The empty array
  #[must_use]
  pub fn empty() -> Self { Self::Array(Vec::new()) }

  /// The primitive kind of this value
  #[must_use]
  pub fn kind(&self) -> Kind {
    match self {
      Self::Num(_) => Kind::Num,
      Self::Str(_) => Kind::Str,
      Self::Bool(_) => Kind::Bool,
      Self::Array(_) => Kind::Array,
    }
  }

  /// Borrow the elements if this is an array
  #[must_use]
  pub fn as_array(&self) -> Option<&[Value]> {
    match self {
      Self::Array(v) => Some(v),
      _ => None,
    }
  }

  /// Borrow the text if this is a string
  #[must_use]
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Str(s) => Some(s),
      _ => None,
    }
  }
}

impl From<NotNan<f64>> for Value {
  fn from(value: NotNan<f64>) -> Self { Self::Num(value) }
}
impl From<i32> for Value {
  fn from(value: i32) -> Self {
    Self::Num(NotNan::new(f64::from(value)).expect("ints cannot cast to NaN"))
  }
}
impl From<usize> for Value {
  fn from(value: usize) -> Self {
    Self::Num(NotNan::new(value as f64).expect("ints cannot cast to NaN"))
  }
}
impl From<&str> for Value {
  fn from(value: &str) -> Self { Self::str(value) }
}
impl From<String> for Value {
  fn from(value: String) -> Self { Self::Str(Rc::from(value)) }
}
impl From<bool> for Value {
  fn from(value: bool) -> Self { Self::Bool(value) }
}
impl From<Vec<Value>> for Value {
  fn from(value: Vec<Value>) -> Self { Self::Array(value) }
}
impl FromIterator<Value> for Value {
  fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
    Self::Array(iter.into_iter().collect())
  }
}

/// Whether a string can be printed without quotes and read back as the same
/// string
#[must_use]
pub(crate) fn is_bare_word(s: &str) -> bool {
  let mut chars = s.chars();
  let Some(head) = chars.next() else { return false };
  (head.is_ascii_alphabetic() || head == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    && !matches!(s, "_" | "true" | "false")
}

/// Print a string as a quoted literal of the text notation
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
  f.write_str("\"")?;
  for c in s.chars() {
    match c {
      '"' => f.write_str("\\\"")?,
      '\\' => f.write_str("\\\\")?,
      '\n' => f.write_str("\\n")?,
      '\t' => f.write_str("\\t")?,
      c => write!(f, "{c}")?,
    }
  }
  f.write_str("\"")
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Num(n) if n.is_infinite() => f.write_str(if **n > 0.0 { "#inf" } else { "-#inf" }),
      Self::Num(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", n.into_inner() as i64),
      Self::Num(n) => write!(f, "{n}"),
      Self::Str(s) if is_bare_word(s) => f.write_str(s),
      Self::Str(s) => write_quoted(f, s),
      Self::Bool(b) => write!(f, "{b}"),
      Self::Array(v) => write!(f, "[{}]", v.iter().join(" ")),
    }
  }
}

#[cfg(test)]
mod test {
  use super::{Kind, Value};

  #[test]
  fn equality_is_strict() {
    assert_ne!(Value::from(1), Value::from("1"), "numbers and strings never compare equal");
    assert_ne!(Value::from(true), Value::from(1), "booleans are not numbers");
    assert_eq!(Value::from(1), Value::num(1.0).unwrap(), "ints and floats share a kind");
    assert!(Value::num(f64::NAN).is_none());
  }

  #[test]
  fn kinds() {
    assert_eq!(Value::from("x").kind(), Kind::Str);
    assert_eq!(Value::empty().kind(), Kind::Array);
    assert_eq!(Kind::from_name("bool"), Some(Kind::Bool));
    assert_eq!(Kind::from_name("nope"), None);
  }

  #[test]
  fn display() {
    let items = [Value::from("add"), Value::from(1), Value::num(2.5).unwrap(), Value::from("a b")];
    let v: Value = items.into_iter().collect();
    assert_eq!(v.to_string(), r#"[add 1 2.5 "a b"]"#);
    assert_eq!(Value::from("true").to_string(), r#""true""#, "keywords must be quoted");
    assert_eq!(Value::from("q\"").to_string(), r#""q\"""#);
    assert_eq!(Value::num(f64::NEG_INFINITY).unwrap().to_string(), "-#inf", "not the word inf");
  }
}
