//! Datastructures for compiled sequences

use std::fmt;
use std::ops::Range;

use itertools::Itertools;

use super::build::{mk_chunks, mk_tail_min};
use crate::pattern::Pattern;

/// A part of a sequence, identified by element indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
  /// A run of patterns that each match exactly one element
  Fixed(Range<usize>),
  /// A single repetition, possibly wrapped in names
  Repeat(usize),
}

/// A sequence pattern along with its chunk layout
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
  elements: Vec<Pattern>,
  chunks: Vec<Chunk>,
  /// For each chunk, the minimum number of elements needed by the chunks
  /// after it
  tail_min: Vec<usize>,
}
impl Sequence {
  /// Split the elements into chunks
  #[must_use]
  pub fn new(elements: Vec<Pattern>) -> Self {
    let chunks = mk_chunks(&elements);
    let tail_min = mk_tail_min(&elements, &chunks);
    Self { elements, chunks, tail_min }
  }

  /// The element patterns in order
  #[must_use]
  pub fn elements(&self) -> &[Pattern] { &self.elements }

  /// The chunk layout
  #[must_use]
  pub fn chunks(&self) -> &[Chunk] { &self.chunks }

  pub(crate) fn tail_min(&self, ci: usize) -> usize { self.tail_min[ci] }

  /// A view of the chunk layout for debugging
  #[must_use]
  pub fn layout(&self) -> Layout<'_> { Layout(self) }
}

/// Prints the chunks of a sequence, see [Sequence::layout]
pub struct Layout<'a>(&'a Sequence);
impl fmt::Display for Layout<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Layout(seq) = self;
    let chunks = seq.chunks.iter().map(|c| match c {
      Chunk::Fixed(range) => format!("({})", seq.elements[range.clone()].iter().join(" ")),
      Chunk::Repeat(i) => format!("{{{}}}", seq.elements[*i]),
    });
    write!(f, "[{}]", chunks.format("|"))
  }
}
