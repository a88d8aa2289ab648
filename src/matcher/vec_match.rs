use super::gas::Gas;
use super::scal_match::scal_match;
use super::state::{Bindings, Capture};
use crate::pattern::{Pattern, Repeat};
use crate::value::Value;

/// Validate a run of elements against a repetition. The length of the run is
/// decided by the caller.
#[must_use]
pub fn repeat_match<'a>(rep: &Repeat, seq: &'a [Value], gas: &Gas) -> Option<Bindings<'a>> {
  if !rep.bounds.contains(seq.len()) {
    return None;
  }
  let mut state = Bindings::default();
  for value in seq {
    state = state.combine(scal_match(&rep.inner, value, gas)?);
  }
  Some(state)
}

/// Match a repetition chunk of a sequence against a run of elements,
/// capturing the run as a slice for every name wrapped around it
#[must_use]
pub fn chunk_match<'a>(pattern: &Pattern, seq: &'a [Value], gas: &Gas) -> Option<Bindings<'a>> {
  match pattern {
    Pattern::Repeat(rep) => repeat_match(rep, seq, gas),
    Pattern::Named(label, inner) => {
      let state = chunk_match(inner, seq, gas)?;
      Some(state.combine(Bindings::from_capture(label.clone(), Capture::Slice(seq))))
    },
    _ => None,
  }
}
