use super::gas::Gas;
use super::scal_match::scalv_match;
use super::shared::{Chunk, Sequence};
use super::state::Bindings;
use super::vec_match::chunk_match;
use crate::value::Value;

/// Match the elements of an array against a sequence
#[must_use]
pub fn seq_match<'a>(seq: &Sequence, items: &'a [Value], gas: &Gas) -> Option<Bindings<'a>> {
  chunks_match(seq, 0, items, gas)
}

/// Match the chunks from `ci` onwards against the remaining elements. Both
/// must run out at the same time.
fn chunks_match<'a>(
  seq: &Sequence,
  ci: usize,
  items: &'a [Value],
  gas: &Gas,
) -> Option<Bindings<'a>> {
  let Some(chunk) = seq.chunks().get(ci) else {
    return items.is_empty().then(Bindings::default);
  };
  match chunk {
    Chunk::Fixed(range) => {
      if items.len() < range.len() {
        return None;
      }
      let (head, tail) = items.split_at(range.len());
      let state = scalv_match(&seq.elements()[range.clone()], head, gas)?;
      Some(state.combine(chunks_match(seq, ci + 1, tail, gas)?))
    },
    Chunk::Repeat(i) => {
      let pattern = &seq.elements()[*i];
      let rep = pattern.as_repeat()?;
      // Lengths outside the bounds or that starve the rest are bound to fail
      let reserve = seq.tail_min(ci);
      if rep.bounds.min.checked_add(reserve).map_or(true, |need| items.len() < need) {
        return None;
      }
      let longest = rep.bounds.max.unwrap_or(usize::MAX).min(items.len() - reserve);
      for len in rep.mode.walk(rep.bounds.min..=longest) {
        gas.spend()?;
        tracing::trace!(chunk = ci, len, "trying repetition length");
        let (head, tail) = items.split_at(len);
        let Some(state) = chunk_match(pattern, head, gas) else { continue };
        let Some(rest) = chunks_match(seq, ci + 1, tail, gas) else { continue };
        return Some(state.combine(rest));
      }
      None
    },
  }
}
