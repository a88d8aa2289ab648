use std::error::Error;
use std::fmt;
use std::ops::Range;

use super::numeric::NumErrorKind;
use crate::error::PatternError;

/// Reasons why the text notation may be rejected. See [ParseError].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
  /// A character that cannot start any token
  UnexpectedChar(char),
  /// The input ended inside a quoted string
  UnterminatedString,
  /// A backslash was followed by something other than `"`, `\`, `n` or `t`
  BadEscape(char),
  /// A malformed number literal
  BadNumber(NumErrorKind),
  /// A `#` followed by something other than `num`, `str`, `bool` or `arr`
  UnknownKind(String),
  /// A `$` not followed by a label
  MissingLabel,
  /// A token that doesn't fit the grammar at this point
  UnexpectedToken {
    /// What the parser was looking for
    expected: &'static str,
    /// The token it found
    found: String,
  },
  /// The input ended where more was required
  UnexpectedEnd {
    /// What the parser was looking for
    expected: &'static str,
  },
  /// A bracket or parenthesis that is never closed
  UnclosedBracket(char),
  /// Tokens after a complete value or pattern
  TrailingInput,
  /// A repetition count that the pattern constructors reject
  InvalidBounds(PatternError),
}
impl fmt::Display for ParseErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
      Self::UnterminatedString => write!(f, "unterminated string"),
      Self::BadEscape(c) => write!(f, "unknown escape sequence \\{c}"),
      Self::BadNumber(kind) => write!(f, "bad number: {kind}"),
      Self::UnknownKind(name) => {
        write!(f, "unknown kind #{name}, expected #num, #str, #bool or #arr")
      },
      Self::MissingLabel => write!(f, "expected a label after $"),
      Self::UnexpectedToken { expected, found } => write!(f, "expected {expected}, found {found}"),
      Self::UnexpectedEnd { expected } => write!(f, "expected {expected}, found end of input"),
      Self::UnclosedBracket(c) => write!(f, "unclosed {c}"),
      Self::TrailingInput => write!(f, "unexpected input after the end"),
      Self::InvalidBounds(e) => write!(f, "invalid bounds: {e}"),
    }
  }
}

/// Error produced by [super::parse_value] and [super::parse_pattern]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
  /// Byte range in the source
  pub range: Range<usize>,
  /// Reason
  pub kind: ParseErrorKind,
}
impl ParseError {
  pub(super) fn new(range: Range<usize>, kind: ParseErrorKind) -> Self { Self { range, kind } }
}
impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}: {}", self.range.start, self.range.end, self.kind)
  }
}
impl Error for ParseError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match &self.kind {
      ParseErrorKind::InvalidBounds(e) => Some(e),
      _ => None,
    }
  }
}
