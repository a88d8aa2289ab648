use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;
use seqmatch::{parse_pattern, parse_value, MatchOptions, Pattern, Value};

/// Match values against a pattern and print what it captured
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// The pattern, for example `[call $f:#str ..$args]`
  pub pattern: String,
  /// Values to match. If none are given, every line of stdin is a value
  pub values: Vec<String>,
  /// Maximum number of steps the search may take per value
  #[arg(long)]
  pub gas: Option<usize>,
  /// Print the parsed pattern and the chunk layout of its sequences
  #[arg(long)]
  pub dump: bool,
}

fn init_tracing() {
  use tracing_subscriber::prelude::*;
  use tracing_subscriber::{fmt, EnvFilter};

  // Only initialize if RUST_LOG is set
  if std::env::var("RUST_LOG").is_ok() {
    tracing_subscriber::registry()
      .with(fmt::layer().with_target(true).with_level(true).with_writer(io::stderr))
      .with(EnvFilter::from_default_env())
      .init();
  }
}

fn dump(pattern: &Pattern, depth: usize) {
  match pattern {
    Pattern::Sequence(seq) => {
      println!("{}{}", "  ".repeat(depth), seq.layout());
      seq.elements().iter().for_each(|p| dump(p, depth + 1));
    },
    Pattern::Alternation(options) => options.iter().for_each(|p| dump(p, depth)),
    Pattern::Repeat(rep) => dump(&rep.inner, depth),
    Pattern::Named(_, inner) => dump(inner, depth),
    Pattern::Literal(_) | Pattern::Wildcard | Pattern::TypeCheck(_) => (),
  }
}

/// Whether the value matched. Errors are reported on stderr.
fn run_one(pattern: &Pattern, value: &Value, options: &MatchOptions) -> Result<bool, ()> {
  match pattern.apply_with(value, options) {
    Err(e) => {
      eprintln!("{value}: {e}");
      Err(())
    },
    Ok(None) => {
      println!("{value}: no match");
      Ok(false)
    },
    Ok(Some(bindings)) if bindings.is_empty() => {
      println!("{value}: match");
      Ok(true)
    },
    Ok(Some(bindings)) => {
      println!("{value}: match");
      for line in bindings.to_string().lines() {
        println!("  {line}");
      }
      Ok(true)
    },
  }
}

fn main() -> ExitCode {
  let args = Args::parse();
  init_tracing();
  let pattern = match parse_pattern(&args.pattern) {
    Ok(pattern) => pattern,
    Err(e) => {
      eprintln!("pattern {e}");
      return ExitCode::from(2);
    },
  };
  if args.dump {
    println!("{pattern}");
    dump(&pattern, 0);
  }
  let sources = match args.values.is_empty() {
    true => match io::stdin().lock().lines().collect::<Result<Vec<_>, _>>() {
      Ok(lines) => lines.into_iter().filter(|l| !l.trim().is_empty()).collect(),
      Err(e) => {
        eprintln!("cannot read stdin: {e}");
        return ExitCode::from(2);
      },
    },
    false => args.values,
  };
  let options = MatchOptions { gas: args.gas };
  let mut all_matched = true;
  for source in sources {
    let value = match parse_value(&source) {
      Ok(value) => value,
      Err(e) => {
        eprintln!("value {source:?} {e}");
        return ExitCode::from(2);
      },
    };
    match run_one(&pattern, &value, &options) {
      Ok(matched) => all_matched &= matched,
      Err(()) => return ExitCode::from(2),
    }
  }
  if all_matched { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
