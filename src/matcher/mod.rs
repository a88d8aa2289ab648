//! Application of compiled patterns to values.
//!
//! # Construction
//!
//! A sequence is split into chunks once, when it is built:
//! - fixed: a maximal run of patterns that each consume one element
//! - repeat: a single repetition, which consumes a run of any permitted length
//!
//! # Application
//!
//! Fixed chunks consume their length deterministically. Repetition chunks walk
//! over every permitted length, longest first for greedy and shortest first
//! for lazy ones, and poll the chunks after them for each. Every matcher
//! returns its own captures and they are merged only along the path that
//! succeeds.

mod build;
pub mod gas;
pub(crate) mod scal_match;
mod seq_match;
pub mod shared;
pub mod state;
mod vec_match;
