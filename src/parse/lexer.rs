use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use ordered_float::NotNan;

use super::errors::{ParseError, ParseErrorKind};
use super::numeric::{numchar, parse_num};
use crate::value::{write_quoted, Kind, Value};

/// A token of the text notation
#[derive(Clone, Debug, PartialEq)]
pub enum Lexeme {
  LBrack,
  RBrack,
  LParen,
  RParen,
  LBrace,
  RBrace,
  Bar,
  Comma,
  Colon,
  /// `=`, marks a literal value
  Eq,
  Under,
  Star,
  Plus,
  Question,
  Num(NotNan<f64>),
  /// Quoted string
  Str(Rc<str>),
  /// Bare word, also a string
  Word(Rc<str>),
  Bool(bool),
  Kind(Kind),
  /// `$label`
  Label(Rc<str>),
  /// `..`, `...`, optionally followed by a label
  Spread { nonzero: bool, label: Option<Rc<str>> },
}
impl fmt::Display for Lexeme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Num(n) => write!(f, "{}", Value::Num(*n)),
      Self::Str(s) => write_quoted(f, s),
      Self::Word(w) => write!(f, "{w}"),
      Self::Bool(b) => write!(f, "{b}"),
      Self::Under => f.write_str("_"),
      Self::Kind(k) => write!(f, "{k}"),
      Self::Label(l) => write!(f, "${l}"),
      Self::Spread { nonzero, label } => {
        f.write_str(if *nonzero { "..." } else { ".." })?;
        label.as_ref().map_or(Ok(()), |l| write!(f, "${l}"))
      },
      lit => {
        let entry = lit_table().into_iter().find(|(_, l)| l == lit);
        let (s, _) = entry.expect("all other tokens are literal");
        f.write_str(s)
      },
    }
  }
}

fn lit_table() -> impl IntoIterator<Item = (&'static str, Lexeme)> {
  [
    ("[", Lexeme::LBrack),
    ("]", Lexeme::RBrack),
    ("(", Lexeme::LParen),
    (")", Lexeme::RParen),
    ("{", Lexeme::LBrace),
    ("}", Lexeme::RBrace),
    ("|", Lexeme::Bar),
    (",", Lexeme::Comma),
    (":", Lexeme::Colon),
    ("=", Lexeme::Eq),
    ("*", Lexeme::Star),
    ("+", Lexeme::Plus),
    ("?", Lexeme::Question),
  ]
}

/// A token and its location
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
  pub lexeme: Lexeme,
  pub range: Range<usize>,
}

/// Filter for characters that can start a word
pub fn name_start(c: char) -> bool { c.is_ascii_alphabetic() || c == '_' }
/// Filter for characters that can appear in a word
pub fn name_char(c: char) -> bool { c.is_ascii_alphanumeric() || c == '_' }

struct LexCtx<'a> {
  source: &'a str,
  tail: &'a str,
}
impl<'a> LexCtx<'a> {
  fn get_pos(&self) -> usize { self.source.len() - self.tail.len() }
  fn strip_prefix(&mut self, tgt: &str) -> bool {
    if let Some(src) = self.tail.strip_prefix(tgt) {
      self.tail = src;
      return true;
    }
    false
  }
  fn get_start_matches(&mut self, filter: impl Fn(char) -> bool) -> &'a str {
    let rest = self.tail.trim_start_matches(filter);
    let matches = &self.tail[..self.tail.len() - rest.len()];
    self.tail = rest;
    matches
  }
  /// Skip whitespace and `--` comments
  fn trim_ws(&mut self) {
    loop {
      self.tail = self.tail.trim_start();
      if !self.tail.starts_with("--") {
        return;
      }
      self.tail = self.tail.split_once('\n').map_or("", |(_, rest)| rest);
    }
  }
  fn err(&self, start: usize, kind: ParseErrorKind) -> ParseError {
    ParseError::new(start..self.get_pos(), kind)
  }
}

/// Split the source into tokens
pub fn lex(source: &str) -> Result<Vec<Entry>, ParseError> {
  let mut ctx = LexCtx { source, tail: source };
  let mut tokens = Vec::new();
  loop {
    ctx.trim_ws();
    let Some(head) = ctx.tail.chars().next() else { return Ok(tokens) };
    let start = ctx.get_pos();
    let lexeme = lex_once(&mut ctx, head)?;
    tokens.push(Entry { lexeme, range: start..ctx.get_pos() });
  }
}

fn lex_once(ctx: &mut LexCtx, head: char) -> Result<Lexeme, ParseError> {
  let start = ctx.get_pos();
  if ctx.strip_prefix("...") {
    return Ok(Lexeme::Spread { nonzero: true, label: opt_label(ctx)? });
  }
  if ctx.strip_prefix("..") {
    return Ok(Lexeme::Spread { nonzero: false, label: opt_label(ctx)? });
  }
  if ctx.strip_prefix("$") {
    return lex_label(ctx, start).map(Lexeme::Label);
  }
  if ctx.strip_prefix("\"") {
    return lex_string(ctx, start).map(Lexeme::Str);
  }
  if ctx.strip_prefix("-#") || ctx.strip_prefix("#") {
    let negative = head == '-';
    let name = ctx.get_start_matches(name_char);
    let lexeme = match (negative, name) {
      (_, "inf") => {
        let sign = if negative { -1.0 } else { 1.0 };
        NotNan::new(sign * f64::INFINITY).ok().map(Lexeme::Num)
      },
      (false, name) => Kind::from_name(name).map(Lexeme::Kind),
      (true, _) => None,
    };
    return lexeme.ok_or_else(|| ctx.err(start, ParseErrorKind::UnknownKind(name.to_string())));
  }
  let digit_after_sign = head == '-' && ctx.tail[1..].starts_with(|c: char| c.is_ascii_digit());
  if head.is_ascii_digit() || digit_after_sign {
    ctx.strip_prefix("-");
    // A number ends where a spread begins, so `[1..]` is a literal and a spread
    let body = ctx.tail;
    let len = (body.char_indices())
      .find(|(i, c)| !numchar(*c) || body[*i..].starts_with(".."))
      .map_or(body.len(), |(i, _)| i);
    ctx.tail = &body[len..];
    let text = &ctx.source[start..ctx.get_pos()];
    return parse_num(text).map(Lexeme::Num).map_err(|e| {
      let range = start + e.range.start..start + e.range.end;
      ParseError::new(range, ParseErrorKind::BadNumber(e.kind))
    });
  }
  if name_start(head) {
    return Ok(match ctx.get_start_matches(name_char) {
      "_" => Lexeme::Under,
      "true" => Lexeme::Bool(true),
      "false" => Lexeme::Bool(false),
      word => Lexeme::Word(Rc::from(word)),
    });
  }
  for (s, lexeme) in lit_table() {
    if ctx.strip_prefix(s) {
      return Ok(lexeme);
    }
  }
  Err(ParseError::new(start..start + head.len_utf8(), ParseErrorKind::UnexpectedChar(head)))
}

/// A label after `$`, either a run of word characters or a quoted string
fn lex_label(ctx: &mut LexCtx, start: usize) -> Result<Rc<str>, ParseError> {
  let quote_start = ctx.get_pos();
  if ctx.strip_prefix("\"") {
    return lex_string(ctx, quote_start);
  }
  match ctx.get_start_matches(name_char) {
    "" => Err(ctx.err(start, ParseErrorKind::MissingLabel)),
    name => Ok(Rc::from(name)),
  }
}

fn opt_label(ctx: &mut LexCtx) -> Result<Option<Rc<str>>, ParseError> {
  let start = ctx.get_pos();
  match ctx.strip_prefix("$") {
    true => lex_label(ctx, start).map(Some),
    false => Ok(None),
  }
}

/// The body of a quoted string, after the opening quote
fn lex_string(ctx: &mut LexCtx, start: usize) -> Result<Rc<str>, ParseError> {
  let tail = ctx.tail;
  let mut text = String::new();
  let mut chars = tail.char_indices();
  while let Some((i, c)) = chars.next() {
    match c {
      '"' => {
        ctx.tail = &tail[i + 1..];
        return Ok(Rc::from(text));
      },
      '\\' => match chars.next() {
        Some((_, '"')) => text.push('"'),
        Some((_, '\\')) => text.push('\\'),
        Some((_, 'n')) => text.push('\n'),
        Some((_, 't')) => text.push('\t'),
        Some((j, e)) => {
          let at = ctx.get_pos();
          return Err(ParseError::new(at + i..at + j + e.len_utf8(), ParseErrorKind::BadEscape(e)));
        },
        None => break,
      },
      c => text.push(c),
    }
  }
  ctx.tail = "";
  Err(ctx.err(start, ParseErrorKind::UnterminatedString))
}
