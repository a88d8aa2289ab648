//! Bounding the backtracking search

use std::cell::Cell;

/// Settings for a match run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
  /// Maximum number of steps the search may take. [None] means unlimited.
  pub gas: Option<usize>,
}
impl MatchOptions {
  /// Unlimited search
  #[must_use]
  pub fn new() -> Self { Self::default() }

  /// Limit the search to `gas` steps
  #[must_use]
  pub fn with_gas(self, gas: usize) -> Self { Self { gas: Some(gas) } }
}

/// The remaining budget of one match run, shared by every matcher called
/// during it.
pub(crate) struct Gas {
  left: Cell<Option<usize>>,
  ran_out: Cell<bool>,
}
impl Gas {
  pub fn new(options: &MatchOptions) -> Self {
    Self { left: Cell::new(options.gas), ran_out: Cell::new(false) }
  }

  /// Take one step. Returns [None] if the budget is exhausted, which the
  /// matchers propagate like a mismatch.
  #[must_use]
  pub fn spend(&self) -> Option<()> {
    match self.left.get() {
      None => Some(()),
      Some(0) => {
        if !self.ran_out.replace(true) {
          tracing::debug!("match budget exhausted");
        }
        None
      },
      Some(n) => {
        self.left.set(Some(n - 1));
        Some(())
      },
    }
  }

  pub fn ran_out(&self) -> bool { self.ran_out.get() }
}

#[cfg(test)]
mod test {
  use super::{Gas, MatchOptions};

  #[test]
  fn counts_down() {
    let gas = Gas::new(&MatchOptions::new().with_gas(2));
    assert!(gas.spend().is_some());
    assert!(gas.spend().is_some());
    assert!(gas.spend().is_none(), "third step exceeds a budget of two");
    assert!(gas.ran_out());
  }

  #[test]
  fn unlimited_never_runs_out() {
    let gas = Gas::new(&MatchOptions::new());
    assert!((0..10_000).all(|_| gas.spend().is_some()));
    assert!(!gas.ran_out());
  }
}
