//! Pick a handler by the first pattern that matches a value

use trait_set::trait_set;

use crate::error::PatternError;
use crate::matcher::gas::MatchOptions;
use crate::matcher::state::Bindings;
use crate::pattern::Pattern;
use crate::value::Value;

trait_set! {
  /// Called with the captures of the pattern that matched
  pub trait Handler<R> = for<'a> Fn(Bindings<'a>) -> R;
  /// Called with the raw value if no pattern matched
  pub trait Fallback<R> = Fn(&Value) -> R;
}

type BoxedHandler<'h, R> = Box<dyn for<'a> Fn(Bindings<'a>) -> R + 'h>;
type BoxedFallback<'h, R> = Box<dyn Fn(&Value) -> R + 'h>;

/// An item of a flat dispatch list, which alternates between patterns and
/// handlers
pub enum Entry<'h, R> {
  /// The pattern of the next arm
  Pattern(Pattern),
  /// The handler of the previous pattern
  Handler(BoxedHandler<'h, R>),
}
impl<'h, R> Entry<'h, R> {
  /// Wrap a handler
  pub fn handler(h: impl Handler<R> + 'h) -> Self { Self::Handler(Box::new(h)) }
}
impl<'h, R> From<Pattern> for Entry<'h, R> {
  fn from(value: Pattern) -> Self { Self::Pattern(value) }
}

/// An ordered list of patterns with a handler for each
pub struct Dispatcher<'h, R> {
  arms: Vec<(Pattern, BoxedHandler<'h, R>)>,
  fallback: Option<BoxedFallback<'h, R>>,
  options: MatchOptions,
}
impl<'h, R> Dispatcher<'h, R> {
  /// A dispatcher with no arms
  #[must_use]
  pub fn new() -> Self {
    Self { arms: Vec::new(), fallback: None, options: MatchOptions::default() }
  }

  /// Build a dispatcher from a flat list of alternating patterns and handlers
  pub fn from_flat(entries: impl IntoIterator<Item = Entry<'h, R>>) -> Result<Self, PatternError> {
    let entries = entries.into_iter().collect::<Vec<_>>();
    if entries.len() % 2 != 0 {
      return Err(PatternError::OddArity { len: entries.len() });
    }
    let mut this = Self::new();
    let mut iter = entries.into_iter().enumerate();
    while let (Some((pi, pat)), Some((hi, handler))) = (iter.next(), iter.next()) {
      let Entry::Pattern(pat) = pat else {
        return Err(PatternError::Misplaced { index: pi, expected: "pattern" });
      };
      let Entry::Handler(handler) = handler else {
        return Err(PatternError::Misplaced { index: hi, expected: "handler" });
      };
      this.arms.push((pat, handler));
    }
    Ok(this)
  }

  /// Add an arm after the existing ones
  #[must_use]
  pub fn arm(mut self, pattern: Pattern, handler: impl Handler<R> + 'h) -> Self {
    self.arms.push((pattern, Box::new(handler)));
    self
  }

  /// Set the handler for values that match no arm
  #[must_use]
  pub fn fallback(mut self, fallback: impl Fallback<R> + 'h) -> Self {
    self.fallback = Some(Box::new(fallback));
    self
  }

  /// Set the match settings used for every arm
  #[must_use]
  pub fn options(mut self, options: MatchOptions) -> Self {
    self.options = options;
    self
  }

  /// Number of arms
  #[must_use]
  pub fn len(&self) -> usize { self.arms.len() }

  /// Whether there are no arms
  #[must_use]
  pub fn is_empty(&self) -> bool { self.arms.is_empty() }

  /// Run the handler of the first arm that matches, or the fallback. `Ok(None)`
  /// means that nothing matched and there is no fallback.
  pub fn run(&self, value: &Value) -> Result<Option<R>, PatternError> {
    for (i, (pattern, handler)) in self.arms.iter().enumerate() {
      if let Some(state) = pattern.apply_with(value, &self.options)? {
        tracing::debug!(arm = i, %pattern, "dispatch arm matched");
        return Ok(Some(handler(state)));
      }
    }
    tracing::debug!(fallback = self.fallback.is_some(), "no dispatch arm matched");
    Ok(self.fallback.as_ref().map(|f| f(value)))
  }
}
impl<'h, R> Default for Dispatcher<'h, R> {
  fn default() -> Self { Self::new() }
}

/// Build a dispatcher from a flat list and run it once
pub fn dispatch<'h, R>(
  value: &Value,
  entries: impl IntoIterator<Item = Entry<'h, R>>,
  fallback: Option<BoxedFallback<'h, R>>,
) -> Result<Option<R>, PatternError> {
  let mut dispatcher = Dispatcher::from_flat(entries)?;
  dispatcher.fallback = fallback;
  dispatcher.run(value)
}

#[cfg(test)]
mod test {
  use super::{dispatch, Dispatcher, Entry};
  use crate::error::PatternError;
  use crate::matcher::gas::MatchOptions;
  use crate::matcher::state::Bindings;
  use crate::pattern::{greedy, literal, named, number, sequence, string, wildcard};
  use crate::value::Value;

  fn describe() -> Dispatcher<'static, String> {
    Dispatcher::new()
      .arm(sequence([literal("neg"), named("x", number())]), |b: Bindings<'_>| {
        format!("-{}", b.value("x").unwrap())
      })
      .arm(sequence([named("op", string()), named("args", greedy(wildcard()))]), |b: Bindings<'_>| {
        format!("call {}", b.value("op").unwrap())
      })
      .arm(named("n", number()), |_: Bindings<'_>| "catch-all number".to_string())
  }

  #[test]
  fn first_match_wins() {
    let d = describe();
    let neg: Value = [Value::from("neg"), Value::from(3)].into_iter().collect();
    assert_eq!(d.run(&neg), Ok(Some("-3".to_string())), "the earlier arm shadows the generic call");
    let add: Value = [Value::from("add"), Value::from(1)].into_iter().collect();
    assert_eq!(d.run(&add), Ok(Some("call add".to_string())));
  }

  #[test]
  fn fallback_only_without_match() {
    let d = describe().fallback(|v: &Value| format!("unknown {v}"));
    assert_eq!(d.run(&Value::from(1)), Ok(Some("catch-all number".to_string())));
    assert_eq!(d.run(&Value::from(true)), Ok(Some("unknown true".to_string())));
    assert_eq!(describe().run(&Value::from(true)), Ok(None), "no fallback, no result");
  }

  #[test]
  fn flat_list_arity() {
    let entries: Vec<Entry<'static, u8>> =
      vec![literal(1).into(), Entry::handler(|_: Bindings<'_>| 1), literal(2).into()];
    assert_eq!(
      dispatch(&Value::from(1), entries, None).err(),
      Some(PatternError::OddArity { len: 3 }),
      "malformed lists are reported as such, not as a mismatch"
    );
    let entries: Vec<Entry<'static, u8>> =
      vec![Entry::handler(|_: Bindings<'_>| 1), literal(2).into()];
    assert_eq!(
      Dispatcher::from_flat(entries).err().map(|e| e.to_string()),
      Some(PatternError::Misplaced { index: 0, expected: "pattern" }.to_string())
    );
  }

  #[test]
  fn flat_list_dispatch() {
    let entries: Vec<Entry<'static, u8>> = vec![
      literal(1).into(),
      Entry::handler(|_: Bindings<'_>| 1),
      number().into(),
      Entry::handler(|_: Bindings<'_>| 2),
    ];
    let fallback = Some(Box::new(|_: &Value| 0u8) as Box<dyn Fn(&Value) -> u8>);
    assert_eq!(dispatch(&Value::from(5), entries, fallback), Ok(Some(2)));
  }

  #[test]
  fn gas_errors_propagate() {
    let pat = sequence([greedy(wildcard()), greedy(wildcard()), literal(0)]);
    let d =
      Dispatcher::new().arm(pat, |_: Bindings<'_>| ()).options(MatchOptions::new().with_gas(3));
    let v: Value = (0..20).map(Value::from).collect();
    assert_eq!(d.run(&v), Err(PatternError::OutOfGas { limit: 3 }));
  }
}
