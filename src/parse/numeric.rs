//! Parse number literals

use std::fmt;
use std::ops::Range;

use ordered_float::NotNan;

/// Reasons why [parse_num] might fail. See [NumError].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumErrorKind {
  /// A character that isn't a digit in the given base was found
  InvalidDigit,
  /// A prefix or a decimal point was not followed by any digits
  NoDigits,
  /// A prefixed integer doesn't fit in 64 bits, or a decimal is too large
  /// to be finite
  Overflow,
}
impl fmt::Display for NumErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidDigit => write!(f, "invalid digit"),
      Self::NoDigits => write!(f, "missing digits"),
      Self::Overflow => write!(f, "number too large"),
    }
  }
}

/// Error produced by [parse_num]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumError {
  /// Location within the literal
  pub range: Range<usize>,
  /// Reason
  pub kind: NumErrorKind,
}

/// Parse a number literal. Accepts an optional `-`, then either decimal
/// digits with an optional fraction, or an integer with one of the prefixes
/// `0x`, `0b` and `0o`. Underscores may separate digits. The result is
/// always finite.
pub fn parse_num(string: &str) -> Result<NotNan<f64>, NumError> {
  let (sign, unsigned) = string.strip_prefix('-').map_or((1.0, string), |s| (-1.0, s));
  let pos = string.len() - unsigned.len();
  let prefixed = (unsigned.strip_prefix("0x").map(|s| (16, s)))
    .or_else(|| unsigned.strip_prefix("0b").map(|s| (2, s)))
    .or_else(|| unsigned.strip_prefix("0o").map(|s| (8, s)));
  let magnitude = match prefixed {
    Some((radix, digits)) => int_parse(digits, radix, pos + 2)? as f64,
    None => dec_parse(unsigned, pos)?,
  };
  let range = pos..string.len();
  NotNan::new(sign * magnitude).map_err(|_| NumError { range, kind: NumErrorKind::Overflow })
}

fn check_digits(s: &str, radix: u32, start: usize) -> Result<(), NumError> {
  if let Some((i, c)) = s.char_indices().find(|(_, c)| *c != '_' && !c.is_digit(radix)) {
    let range = start + i..start + i + c.len_utf8();
    return Err(NumError { range, kind: NumErrorKind::InvalidDigit });
  }
  if s.chars().all(|c| c == '_') {
    return Err(NumError { range: start..start + s.len(), kind: NumErrorKind::NoDigits });
  }
  Ok(())
}

fn int_parse(s: &str, radix: u32, start: usize) -> Result<u64, NumError> {
  check_digits(s, radix, start)?;
  let digits = s.chars().filter(|c| *c != '_').collect::<String>();
  let range = start..start + s.len();
  u64::from_str_radix(&digits, radix).map_err(|_| NumError { range, kind: NumErrorKind::Overflow })
}

fn dec_parse(s: &str, start: usize) -> Result<f64, NumError> {
  match s.split_once('.') {
    None => check_digits(s, 10, start)?,
    Some((whole, frac)) => {
      check_digits(whole, 10, start)?;
      check_digits(frac, 10, start + whole.len() + 1)?;
    },
  }
  let digits = s.chars().filter(|c| *c != '_').collect::<String>();
  // Only digits and a single point are left, which always parse
  let range = start..start + s.len();
  match digits.parse::<f64>() {
    Ok(f) if f.is_finite() => Ok(f),
    Ok(_) => Err(NumError { range, kind: NumErrorKind::Overflow }),
    Err(_) => Err(NumError { range, kind: NumErrorKind::InvalidDigit }),
  }
}

/// Filter for characters that can appear in numbers
pub fn numchar(c: char) -> bool { c.is_ascii_alphanumeric() || "._".contains(c) }
