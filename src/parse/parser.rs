use super::errors::{ParseError, ParseErrorKind};
use super::lexer::{lex, Entry, Lexeme};
use crate::matcher::shared::Sequence;
use crate::pattern::{Bounds, Mode, Pattern, Repeat};
use crate::value::Value;

/// Parse a value such as `[add 1 [mul x 2.5] "two words"]`
pub fn parse_value(source: &str) -> Result<Value, ParseError> {
  let tokens = lex(source)?;
  let mut parser = Parser { tokens: &tokens, pos: 0, end: source.len() };
  let value = parser.value()?;
  parser.finish()?;
  Ok(value)
}

/// Parse a pattern such as `[let $name:#str ..$body]`
pub fn parse_pattern(source: &str) -> Result<Pattern, ParseError> {
  let tokens = lex(source)?;
  let mut parser = Parser { tokens: &tokens, pos: 0, end: source.len() };
  let pattern = parser.element()?;
  parser.finish()?;
  Ok(pattern)
}

struct Parser<'a> {
  tokens: &'a [Entry],
  pos: usize,
  end: usize,
}
impl<'a> Parser<'a> {
  fn peek(&self) -> Option<&'a Entry> { self.tokens.get(self.pos) }
  fn peek_lexeme(&self) -> Option<&'a Lexeme> { self.peek().map(|e| &e.lexeme) }

  fn next(&mut self, expected: &'static str) -> Result<&'a Entry, ParseError> {
    let entry = self.peek().ok_or_else(|| self.eof(expected))?;
    self.pos += 1;
    Ok(entry)
  }

  fn eat(&mut self, lexeme: &Lexeme) -> bool {
    let found = self.peek_lexeme() == Some(lexeme);
    if found {
      self.pos += 1;
    }
    found
  }

  fn eof(&self, expected: &'static str) -> ParseError {
    ParseError::new(self.end..self.end, ParseErrorKind::UnexpectedEnd { expected })
  }

  fn finish(&self) -> Result<(), ParseError> {
    match self.peek() {
      Some(entry) => {
        Err(ParseError::new(entry.range.start..self.end, ParseErrorKind::TrailingInput))
      },
      None => Ok(()),
    }
  }

  /// Collect items until the closing token, which is consumed
  fn delimited<T>(
    &mut self,
    open: &Entry,
    close: &Lexeme,
    mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
  ) -> Result<Vec<T>, ParseError> {
    let mut items = Vec::new();
    loop {
      match self.peek_lexeme() {
        None => return Err(unclosed(open)),
        Some(l) if l == close => {
          self.pos += 1;
          return Ok(items);
        },
        Some(_) => items.push(item(self)?),
      }
    }
  }

  fn value(&mut self) -> Result<Value, ParseError> {
    let entry = self.next("a value")?;
    match &entry.lexeme {
      Lexeme::Num(n) => Ok(Value::Num(*n)),
      Lexeme::Str(s) | Lexeme::Word(s) => Ok(Value::Str(s.clone())),
      Lexeme::Bool(b) => Ok(Value::Bool(*b)),
      Lexeme::LBrack => Ok(Value::Array(self.delimited(entry, &Lexeme::RBrack, Self::value)?)),
      _ => Err(unexpected(entry, "a value")),
    }
  }

  /// A pattern with an optional quantifier, or a named pattern
  fn element(&mut self) -> Result<Pattern, ParseError> {
    if let Some(Lexeme::Label(label)) = self.peek_lexeme() {
      if self.tokens.get(self.pos + 1).map(|e| &e.lexeme) == Some(&Lexeme::Colon) {
        self.pos += 2;
        return Ok(Pattern::Named(label.clone(), Box::new(self.element()?)));
      }
    }
    let primary = self.primary()?;
    self.quantified(primary)
  }

  fn primary(&mut self) -> Result<Pattern, ParseError> {
    let entry = self.next("a pattern")?;
    Ok(match &entry.lexeme {
      Lexeme::Eq => Pattern::Literal(self.value()?),
      Lexeme::Num(n) => Pattern::Literal(Value::Num(*n)),
      Lexeme::Str(s) | Lexeme::Word(s) => Pattern::Literal(Value::Str(s.clone())),
      Lexeme::Bool(b) => Pattern::Literal(Value::Bool(*b)),
      Lexeme::Under => Pattern::Wildcard,
      Lexeme::Kind(k) => Pattern::TypeCheck(*k),
      Lexeme::Label(label) => Pattern::Named(label.clone(), Box::new(Pattern::Wildcard)),
      Lexeme::Spread { nonzero, label } => {
        let bounds = if *nonzero { Bounds::NONZERO } else { Bounds::ANY };
        let inner = Box::new(Pattern::Wildcard);
        let rep = Pattern::Repeat(Repeat { inner, mode: Mode::Greedy, bounds });
        match label {
          Some(label) => Pattern::Named(label.clone(), Box::new(rep)),
          None => rep,
        }
      },
      Lexeme::LBrack => {
        let elements = self.delimited(entry, &Lexeme::RBrack, Self::element)?;
        Pattern::Sequence(Sequence::new(elements))
      },
      Lexeme::LParen => self.group(entry)?,
      _ => return Err(unexpected(entry, "a pattern")),
    })
  }

  /// The inside of parentheses. A single pattern without bars is only
  /// grouped, anything else is an alternation.
  fn group(&mut self, open: &Entry) -> Result<Pattern, ParseError> {
    let mut options = Vec::new();
    let mut bars = false;
    loop {
      match self.peek_lexeme() {
        None => return Err(unclosed(open)),
        Some(Lexeme::RParen) => break,
        Some(_) => options.push(self.element()?),
      }
      match self.peek() {
        None => return Err(unclosed(open)),
        Some(Entry { lexeme: Lexeme::RParen, .. }) => break,
        Some(Entry { lexeme: Lexeme::Bar, .. }) => {
          self.pos += 1;
          bars = true;
        },
        Some(other) => return Err(unexpected(other, "`|` or `)`")),
      }
    }
    self.pos += 1;
    match (bars, options.pop()) {
      (false, Some(only)) if options.is_empty() => Ok(only),
      (_, last) => Ok(Pattern::Alternation(options.into_iter().chain(last).collect())),
    }
  }

  fn quantified(&mut self, inner: Pattern) -> Result<Pattern, ParseError> {
    let Some(entry) = self.peek() else { return Ok(inner) };
    let simple = match entry.lexeme {
      Lexeme::Star => Some(Bounds::ANY),
      Lexeme::Plus => Some(Bounds::NONZERO),
      Lexeme::Question => Some(Bounds { min: 0, max: Some(1) }),
      Lexeme::LBrace => None,
      _ => return Ok(inner),
    };
    self.pos += 1;
    let bounds = match simple {
      Some(bounds) => bounds,
      None => self.braces(entry)?,
    };
    let mode = if self.eat(&Lexeme::Question) { Mode::Lazy } else { Mode::Greedy };
    Ok(Pattern::Repeat(Repeat { inner: Box::new(inner), mode, bounds }))
  }

  /// `{n}`, `{m,}` or `{m,n}` after the opening brace
  fn braces(&mut self, open: &Entry) -> Result<Bounds, ParseError> {
    let min = self.count()?;
    let max = match self.eat(&Lexeme::Comma) {
      false => Some(min),
      true if self.peek_lexeme() == Some(&Lexeme::RBrace) => None,
      true => Some(self.count()?),
    };
    let close = self.next("`}`")?;
    if close.lexeme != Lexeme::RBrace {
      return Err(unexpected(close, "`}`"));
    }
    match max {
      None => Ok(Bounds { min, max: None }),
      Some(max) => Bounds::new(Some(min), Some(max)).map_err(|e| {
        ParseError::new(open.range.start..close.range.end, ParseErrorKind::InvalidBounds(e))
      }),
    }
  }

  fn count(&mut self) -> Result<usize, ParseError> {
    let entry = self.next("a repetition count")?;
    match &entry.lexeme {
      // `as` saturates, so a count that rounds up to 2^64 becomes usize::MAX
      Lexeme::Num(n) if n.fract() == 0.0 && (0.0..=usize::MAX as f64).contains(&**n) => {
        Ok(n.into_inner() as usize)
      },
      _ => Err(unexpected(entry, "a repetition count")),
    }
  }
}

fn unexpected(entry: &Entry, expected: &'static str) -> ParseError {
  let found = entry.lexeme.to_string();
  ParseError::new(entry.range.clone(), ParseErrorKind::UnexpectedToken { expected, found })
}

fn unclosed(open: &Entry) -> ParseError {
  let c = if open.lexeme == Lexeme::LParen { '(' } else { '[' };
  ParseError::new(open.range.clone(), ParseErrorKind::UnclosedBracket(c))
}

#[cfg(test)]
mod test {
  use std::ops::Range;

  use super::{parse_pattern, parse_value};
  use crate::error::PatternError;
  use crate::parse::errors::{ParseError, ParseErrorKind};
  use crate::pattern::{
    alternation, array, boolean, capture, greedy, lazy, literal, named, number, repeat_greedy,
    repeat_lazy, sequence, string, wildcard, Bounds, Mode, Pattern, Repeat,
  };
  use crate::value::Value;

  fn pat(s: &str) -> Pattern { parse_pattern(s).unwrap() }
  fn val(s: &str) -> Value { parse_value(s).unwrap() }
  fn err<T>(range: Range<usize>, kind: ParseErrorKind) -> Result<T, ParseError> {
    Err(ParseError { range, kind })
  }

  #[test]
  fn values() {
    let v = val("[add 1 [mul x -2.5] \"two words\" true]");
    let expected: Value = [
      Value::from("add"),
      Value::from(1),
      [Value::from("mul"), Value::from("x"), Value::num(-2.5).unwrap()].into_iter().collect(),
      Value::from("two words"),
      Value::from(true),
    ]
    .into_iter()
    .collect();
    assert_eq!(v, expected);
    assert_eq!(val("  -- leading comment\n[]"), Value::empty());
  }

  #[test]
  fn sugar() {
    assert_eq!(pat(".."), greedy(wildcard()));
    let nonzero = Pattern::Repeat(Repeat {
      inner: Box::new(wildcard()),
      mode: Mode::Greedy,
      bounds: Bounds::NONZERO,
    });
    assert_eq!(pat("..."), nonzero);
    assert_eq!(pat("_+"), nonzero);
    assert_eq!(pat("...$xs"), named("xs", nonzero));
    assert_eq!(pat("$x"), capture("x"));
    assert_eq!(pat("$x:_"), capture("x"));
    assert_eq!(pat("(#num)"), number(), "parentheses around one pattern only group");
    assert_eq!(pat("()"), alternation(Vec::<Pattern>::new()));
  }

  #[test]
  fn structure() {
    let expected = sequence([
      literal("let"),
      named("name", string()),
      named("body", repeat_lazy(alternation([number(), boolean()]), Some(1), Some(2)).unwrap()),
      greedy(capture("rest")),
      lazy(array()),
    ]);
    assert_eq!(pat("[let $name:#str $body:(#num | #bool){1,2}? $rest* #arr*?]"), expected);
    let Pattern::Repeat(Repeat { bounds, mode, .. }) = pat("_{2,}?") else {
      panic!("not a repetition")
    };
    assert_eq!((bounds, mode), (Bounds { min: 2, max: None }, Mode::Lazy));
    let Pattern::Repeat(Repeat { bounds, .. }) = pat("_{3}") else { panic!("not a repetition") };
    assert_eq!(bounds, Bounds { min: 3, max: Some(3) });
    assert_eq!(pat("=[1 x]"), literal(Value::from(vec![Value::from(1), Value::from("x")])));
  }

  #[test]
  fn display_reads_back() {
    let patterns = [
      sequence([literal("let"), named("name", string()), greedy(capture("rest"))]),
      named("body", repeat_lazy(alternation([number(), boolean()]), Some(1), Some(2)).unwrap()),
      greedy(greedy(literal(-3))),
      named("a", named("b", lazy(wildcard()))),
      alternation([literal(Value::num(0.1 + 0.2).unwrap())]),
      alternation(Vec::<Pattern>::new()),
      literal(Value::from(vec![Value::from("a b"), Value::from(true)])),
      sequence([literal("_"), literal("true"), capture("weird label"), capture("_")]),
      repeat_greedy(literal("x"), Some(0), Some(1)).unwrap(),
      Pattern::Repeat(Repeat {
        inner: Box::new(wildcard()),
        mode: Mode::Greedy,
        bounds: Bounds { min: 4, max: None },
      }),
    ];
    for p in patterns {
      assert_eq!(parse_pattern(&p.to_string()), Ok(p.clone()), "{p} did not read back");
    }
  }

  #[test]
  fn huge_counts() {
    let p = pat("[_{18446744073709551615} _{18446744073709551615} _]");
    let Pattern::Sequence(seq) = &p else { panic!("not a sequence") };
    let huge = repeat_greedy(wildcard(), Some(usize::MAX), Some(usize::MAX)).unwrap();
    assert_eq!(seq.elements()[0], huge);
    assert!(!p.matches(&val("[1 2 3]")), "no array is long enough");
    assert_eq!(parse_pattern(&p.to_string()), Ok(p.clone()));
    assert!(parse_pattern("_{100000000000000000000000000000}").is_err(), "beyond usize");
  }

  #[test]
  fn spreads_after_numbers() {
    assert_eq!(pat("[1..]"), sequence([literal(1), greedy(wildcard())]));
    let nonzero =
      Repeat { inner: Box::new(wildcard()), mode: Mode::Greedy, bounds: Bounds::NONZERO };
    assert_eq!(pat("[0...$xs]"), sequence([literal(0), named("xs", Pattern::Repeat(nonzero))]));
    assert!(pat("[1..]").matches(&val("[1 2 3]")));
  }

  #[test]
  fn infinities() {
    let inf = Value::num(f64::INFINITY).unwrap();
    let neg_inf = Value::num(f64::NEG_INFINITY).unwrap();
    assert_eq!(val("[#inf -#inf]"), Value::from(vec![inf.clone(), neg_inf]));
    assert_eq!(parse_value(&inf.to_string()), Ok(inf.clone()));
    assert_ne!(val("inf"), inf, "the bare word is a string");
    assert_eq!(pat("#inf"), literal(inf));
    assert!(parse_value(&"9".repeat(400)).is_err(), "too large to be finite");
  }

  #[test]
  fn errors() {
    assert_eq!(parse_value("[1 2"), err(0..1, ParseErrorKind::UnclosedBracket('[')));
    assert_eq!(parse_pattern("(a b)").map_err(|e| e.range), Err(3..4));
    assert_eq!(parse_value("1 2"), err(2..3, ParseErrorKind::TrailingInput));
    assert_eq!(parse_value("_").map_err(|e| e.kind), Err(ParseErrorKind::UnexpectedToken {
      expected: "a value",
      found: "_".to_string()
    }));
    assert_eq!(parse_pattern("[_"), err(0..1, ParseErrorKind::UnclosedBracket('[')));
    let end = ParseErrorKind::UnexpectedEnd { expected: "a pattern" };
    assert_eq!(parse_pattern("$x:").map_err(|e| e.kind), Err(end));
    assert_eq!(
      parse_pattern("_{3,1}"),
      err(1..6, ParseErrorKind::InvalidBounds(PatternError::InvertedBounds { min: 3, max: 1 }))
    );
    assert_eq!(parse_pattern("_{1.5}").map_err(|e| e.range), Err(2..5));
  }
}
