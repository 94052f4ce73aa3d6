use std::fmt;

use crate::internal::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub line: u32,
  pub col: u32,
  pub width: u32,
  pub msg: String,
}

impl From<&ParseError> for Diagnostic {
  fn from(err: &ParseError) -> Self {
    let token = err.token();
    Diagnostic {
      line: token.loc.line,
      col: token.loc.column,
      width: (token.text.chars().count() as u32).max(1),
      msg: err.to_string(),
    }
  }
}

impl Diagnostic {
  /// Message plus the offending source line with the token underlined.
  pub fn render<'a>(&'a self, src: &'a str) -> Rendered<'a> {
    Rendered { diag: self, src }
  }
}

/// A [`Diagnostic`] paired with the source it points into.
pub struct Rendered<'a> {
  diag: &'a Diagnostic,
  src: &'a str,
}

impl fmt::Display for Rendered<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Diagnostic { line, col, width, msg } = self.diag;
    let gutter = line.to_string().len();
    writeln!(f, "error: {msg}")?;
    writeln!(f, "{:gutter$}--> {line}:{col}", "")?;
    let Some(text) = self.src.lines().nth(line.saturating_sub(1) as usize) else {
      return Ok(());
    };
    writeln!(f, "{:gutter$} |", "")?;
    writeln!(f, "{line} | {text}")?;
    writeln!(
      f,
      "{:gutter$} | {}{}",
      "",
      " ".repeat(*col as usize),
      "^".repeat(*width as usize)
    )
  }
}
