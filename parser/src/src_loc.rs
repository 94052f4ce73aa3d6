/// Position of a token's first character. `line` is 1-based, `column` is
/// 0-based and counts chars, resetting on every newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SrcLoc {
  pub line: u32,
  pub column: u32,
}

impl SrcLoc {
  pub const fn new(line: u32, column: u32) -> Self {
    SrcLoc { line, column }
  }

  pub const fn start() -> Self {
    SrcLoc { line: 1, column: 0 }
  }
}

impl Default for SrcLoc {
  fn default() -> Self {
    Self::start()
  }
}

impl std::fmt::Display for SrcLoc {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}
