use super::shared::Chunk;
use crate::pattern::Pattern;

/// Number of leading patterns that match exactly one element each
#[must_use]
fn scal_cnt<'a>(iter: impl Iterator<Item = &'a Pattern>) -> usize {
  iter.take_while(|p| !p.is_repeat()).count()
}

/// Partition the elements of a sequence into maximal fixed runs and single
/// repetitions, left to right
#[must_use]
pub fn mk_chunks(elements: &[Pattern]) -> Vec<Chunk> {
  let mut chunks = Vec::new();
  let mut start = 0;
  while start < elements.len() {
    let fixed = scal_cnt(elements[start..].iter());
    if fixed == 0 {
      chunks.push(Chunk::Repeat(start));
      start += 1;
    } else {
      chunks.push(Chunk::Fixed(start..start + fixed));
      start += fixed;
    }
  }
  chunks
}

/// Minimum number of elements the chunks after each chunk need
#[must_use]
pub fn mk_tail_min(elements: &[Pattern], chunks: &[Chunk]) -> Vec<usize> {
  let min_len = |chunk: &Chunk| match chunk {
    Chunk::Fixed(range) => range.len(),
    Chunk::Repeat(i) => elements[*i].as_repeat().map_or(0, |rep| rep.bounds.min),
  };
  let mut tail_min = vec![0usize; chunks.len()];
  for ci in (1..chunks.len()).rev() {
    tail_min[ci - 1] = tail_min[ci].saturating_add(min_len(&chunks[ci]));
  }
  tail_min
}
