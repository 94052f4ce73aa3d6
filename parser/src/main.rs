use std::process::ExitCode;

use clap::Parser as _;
use lingvo::{Diagnostic, Parser, tokenize};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[command(author, version, about = "Parse a lingvo program and dump its syntax tree", long_about = None)]
struct Cli {
  /// The input file.
  input: String,

  /// Use the input directly as source text instead of as a file path.
  #[arg(long, short, action)]
  source: bool,

  /// Print the token listing before the syntax tree.
  #[arg(long, short, action)]
  tokens: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error("{0}")]
  Syntax(String),
}

impl CliError {
  fn exit_code(&self) -> ExitCode {
    match self {
      CliError::Syntax(_) => ExitCode::from(1),
      CliError::Io(_) => ExitCode::from(2),
    }
  }
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  match run(Cli::parse()) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("{err}");
      err.exit_code()
    }
  }
}

fn run(cli: Cli) -> Result<(), CliError> {
  let (name, src) = if cli.source {
    ("<source>".to_owned(), cli.input)
  } else {
    let src = std::fs::read_to_string(&cli.input)?;
    (cli.input, src)
  };
  info!(%name, bytes = src.len(), "parsing");

  let tokens = tokenize(&src);
  if cli.tokens {
    for token in &tokens {
      println!("{token}");
    }
    println!();
  }

  let program = Parser::new(tokens).parse().map_err(|err| {
    let diag = Diagnostic::from(&err);
    let report = format!(
      "{}  = note: token #{}: {}",
      diag.render(&src),
      err.tok_pos(),
      err.token()
    );
    CliError::Syntax(report)
  })?;
  print!("{program}");
  Ok(())
}
