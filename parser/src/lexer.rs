use crate::internal::{TokenKind as T, *};

#[derive(Debug)]
pub struct Lexer {
  src: Vec<char>,
  pos: usize,
  line: u32,
  column: u32,
}

/// Scans the whole source. Never fails: unrecognized characters become
/// [`TokenKind::Unknown`] tokens and the sequence always ends with one
/// [`TokenKind::Eof`].
pub fn tokenize(src: &str) -> Vec<Token> {
  Lexer::new(src).lex()
}

impl Lexer {
  pub fn new(src: &str) -> Self {
    Lexer {
      src: src.chars().collect(),
      pos: 0,
      line: 1,
      column: 0,
    }
  }

  #[instrument(skip_all)]
  pub fn lex(mut self) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(64);
    loop {
      let token = self.next_token();
      let done = token.is(T::Eof);
      tokens.push(token);
      if done {
        break;
      }
    }
    debug!(count = tokens.len(), "lexed source");
    tokens
  }

  pub fn next_token(&mut self) -> Token {
    self.skip_trivia();
    let loc = self.loc();
    let Some(c) = self.current() else {
      return Token::eof(loc);
    };
    match c {
      '+' => self.simple_token(T::Plus, loc),
      '-' => self.simple_token(T::Minus, loc),
      '*' => self.simple_token(T::Star, loc),
      '/' => self.simple_token(T::Slash, loc),
      '(' => self.simple_token(T::LParen, loc),
      ')' => self.simple_token(T::RParen, loc),
      '{' => self.simple_token(T::LBrace, loc),
      '}' => self.simple_token(T::RBrace, loc),
      ';' => self.simple_token(T::Semicolon, loc),
      ',' => self.simple_token(T::Comma, loc),
      '@' => self.simple_token(T::At, loc),
      '.' => self.simple_token(T::Dot, loc),
      '=' => self.maybe_eq_suffixed(T::Assign, T::Eq, loc),
      '<' => self.maybe_eq_suffixed(T::Lt, T::LtEq, loc),
      '>' => self.maybe_eq_suffixed(T::Gt, T::GtEq, loc),
      // a lone `!` is not an operator
      '!' => self.maybe_eq_suffixed(T::Unknown, T::NotEq, loc),
      '"' => self.string_lit(loc),
      c if c.is_ascii_digit() => self.number_lit(loc),
      c if c.is_ascii_alphabetic() || c == '_' => self.ident(loc),
      _ => self.simple_token(T::Unknown, loc),
    }
  }

  fn simple_token(&mut self, kind: TokenKind, loc: SrcLoc) -> Token {
    let start = self.pos;
    self.advance();
    Token::new(kind, self.lexeme(start), loc)
  }

  fn maybe_eq_suffixed(&mut self, single: TokenKind, double: TokenKind, loc: SrcLoc) -> Token {
    if self.peek() == Some('=') {
      let start = self.pos;
      self.advance();
      self.advance();
      Token::new(double, self.lexeme(start), loc)
    } else {
      self.simple_token(single, loc)
    }
  }

  fn number_lit(&mut self, loc: SrcLoc) -> Token {
    let start = self.pos;
    let mut seen_dot = false;
    while let Some(c) = self.current() {
      if c == '.' {
        if seen_dot {
          break;
        }
        seen_dot = true;
      } else if !c.is_ascii_digit() {
        break;
      }
      self.advance();
    }
    Token::new(T::NumberLit, self.lexeme(start), loc)
  }

  fn string_lit(&mut self, loc: SrcLoc) -> Token {
    self.advance(); // "
    let mut value = String::new();
    loop {
      match self.current() {
        None => break, // unterminated, closed by end of input
        Some('"') => {
          self.advance();
          break;
        }
        Some('\\') => {
          self.advance();
          let Some(escaped) = self.current() else {
            break;
          };
          value.push(match escaped {
            'n' => '\n',
            't' => '\t',
            other => other,
          });
          self.advance();
        }
        Some(c) => {
          value.push(c);
          self.advance();
        }
      }
    }
    Token::new(T::StringLit, value, loc)
  }

  fn ident(&mut self, loc: SrcLoc) -> Token {
    let start = self.pos;
    while self
      .current()
      .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
    {
      self.advance();
    }
    let lexeme = self.lexeme(start);
    let kind = TokenKind::keyword(&lexeme).unwrap_or(T::Ident);
    Token::new(kind, lexeme, loc)
  }

  fn skip_trivia(&mut self) {
    loop {
      while self.current().is_some_and(is_space) {
        self.advance();
      }
      if self.current() == Some('/') && self.peek() == Some('/') {
        while self.current().is_some_and(|c| c != '\n') {
          self.advance();
        }
      } else {
        break;
      }
    }
  }

  fn advance(&mut self) {
    if self.current() == Some('\n') {
      self.line += 1;
      self.column = 0;
    } else {
      self.column += 1;
    }
    self.pos += 1;
  }

  fn lexeme(&self, start: usize) -> String {
    self.src[start..self.pos].iter().collect()
  }

  fn current(&self) -> Option<char> {
    self.src.get(self.pos).copied()
  }

  fn peek(&self) -> Option<char> {
    self.src.get(self.pos + 1).copied()
  }

  const fn loc(&self) -> SrcLoc {
    SrcLoc::new(self.line, self.column)
  }
}

// same set as C's isspace in the default locale
const fn is_space(c: char) -> bool {
  matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}
