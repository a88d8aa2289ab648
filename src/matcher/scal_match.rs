use super::gas::Gas;
use super::seq_match::seq_match;
use super::state::{Bindings, Capture};
use super::vec_match::repeat_match;
use crate::pattern::Pattern;
use crate::value::Value;

/// Match a pattern against one value
#[must_use]
pub fn scal_match<'a>(pattern: &Pattern, value: &'a Value, gas: &Gas) -> Option<Bindings<'a>> {
  gas.spend()?;
  match pattern {
    Pattern::Wildcard => Some(Bindings::default()),
    Pattern::Literal(lit) => (lit == value).then(Bindings::default),
    Pattern::TypeCheck(kind) => (value.kind() == *kind).then(Bindings::default),
    Pattern::Alternation(options) => options.iter().find_map(|p| scal_match(p, value, gas)),
    Pattern::Sequence(seq) => seq_match(seq, value.as_array()?, gas),
    Pattern::Repeat(rep) => repeat_match(rep, value.as_array()?, gas),
    Pattern::Named(label, inner) => {
      let state = scal_match(inner, value, gas)?;
      Some(state.combine(Bindings::from_capture(label.clone(), Capture::Scalar(value))))
    },
  }
}

/// Match a fixed run of patterns against a slice of the same length
#[must_use]
pub fn scalv_match<'a>(patterns: &[Pattern], seq: &'a [Value], gas: &Gas) -> Option<Bindings<'a>> {
  if seq.len() != patterns.len() {
    return None;
  }
  let mut state = Bindings::default();
  for (pattern, value) in patterns.iter().zip(seq.iter()) {
    state = state.combine(scal_match(pattern, value, gas)?);
  }
  Some(state)
}

#[cfg(test)]
mod test {
  use super::scal_match;
  use crate::matcher::gas::{Gas, MatchOptions};
  use crate::pattern::{alternation, boolean, literal, named, number, string, wildcard};
  use crate::value::Value;

  fn run(pattern: &crate::pattern::Pattern, value: &Value) -> bool {
    scal_match(pattern, value, &Gas::new(&MatchOptions::default())).is_some()
  }

  #[test]
  fn primitives() {
    assert!(run(&wildcard(), &Value::empty()));
    assert!(run(&literal(1), &Value::from(1)));
    assert!(!run(&literal(1), &Value::from("1")), "no coercion between kinds");
    assert!(run(&number(), &Value::from(3)));
    assert!(!run(&number(), &Value::from("3")));
    assert!(run(&string(), &Value::from("3")));
    assert!(run(&boolean(), &Value::from(false)));
    assert!(!run(&boolean(), &Value::from(0)));
  }

  #[test]
  fn alternation_takes_first_success() {
    let pat = alternation([named("first", number()), named("second", wildcard())]);
    let one = Value::from(1);
    let state = pat.apply(&one).unwrap();
    assert_eq!(state.labels(), vec!["first"], "the second option must not run");
    let x = Value::from("x");
    let state = pat.apply(&x).unwrap();
    assert_eq!(state.labels(), vec!["second"]);
    assert!(alternation(Vec::<crate::pattern::Pattern>::new()).apply(&one).is_none());
  }

  #[test]
  fn named_wraps_transparently() {
    let v = Value::from("x");
    assert!(named("n", number()).apply(&v).is_none());
    assert_eq!(named("n", string()).apply(&v).unwrap().value("n"), Some(v.clone()));
  }
}
