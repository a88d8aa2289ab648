//! A compact text notation for values and patterns.
//!
//! Values are numbers, quoted strings, bare words (also strings), `true`,
//! `false` and bracketed arrays: `[add 1 [mul x 2.5] "two words"]`.
//! Infinities are written `#inf` and `-#inf`.
//!
//! Patterns extend the value notation:
//! - `_` matches anything, `#num` `#str` `#bool` `#arr` match a kind
//! - `[ ... ]` is a sequence, `(a | b)` an alternation, `(a)` only groups
//! - `*` `+` `?` `{n}` `{m,}` `{m,n}` after a pattern repeat it, and a
//!   further `?` makes the repetition lazy
//! - `$name` captures one value, `$name:pattern` names a pattern, labels that
//!   aren't words are quoted as in `$"a label"`
//! - `..` and `...` stand for `_*` and `_+`, `..$name` and `...$name` also
//!   capture the run. A number ends where a spread starts, as in `[1..]`
//! - `=value` matches a literal value, including arrays
//! - `--` starts a comment that lasts until the end of the line
//!
//! The [std::fmt::Display] output of every [crate::pattern::Pattern] reads
//! back as the same pattern.

mod errors;
mod lexer;
mod numeric;
mod parser;

pub use errors::{ParseError, ParseErrorKind};
pub use numeric::{parse_num, NumError, NumErrorKind};
pub use parser::{parse_pattern, parse_value};
