use crate::internal::{TokenKind as T, *};
#[cfg(test)]
use std::sync::Once;
#[cfg(test)]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(test)]
use tracing_subscriber::{EnvFilter, fmt};
use ParseError as E;

mod expr;

pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Expressions and blocks nested deeper than this are rejected rather than
/// recursing until the stack runs out.
pub const MAX_NESTING: usize = 64;

/// Single-pass recursive descent parser with one token of lookahead. The
/// first syntax error aborts the parse; there is no recovery.
#[derive(Debug)]
pub struct Parser {
  tokens: Vec<Token>,
  tok_pos: usize,
  depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
  #[error("expected {expected} at line {}", .found.loc.line)]
  ExpectedToken {
    kind: TokenKind,
    expected: &'static str,
    found: Token,
    tok_pos: usize,
  },
  #[error("unexpected token {:?} in expression at line {}", .found.text, .found.loc.line)]
  ExpectedExpression { found: Token, tok_pos: usize },
  #[error("expected type, found {:?} at line {}", .found.text, .found.loc.line)]
  ExpectedType { found: Token, tok_pos: usize },
  #[error("expected field or method declaration, found {:?} at line {}", .found.text, .found.loc.line)]
  ExpectedClassMember { found: Token, tok_pos: usize },
  #[error("invalid number literal {:?} at line {}", .found.text, .found.loc.line)]
  InvalidNumberLit { found: Token, tok_pos: usize },
  #[error("nesting deeper than {} levels at line {}", MAX_NESTING, .found.loc.line)]
  TooDeep { found: Token, tok_pos: usize },
}

impl ParseError {
  /// The token the parser was looking at when it gave up.
  pub const fn token(&self) -> &Token {
    match self {
      E::ExpectedToken { found, .. }
      | E::ExpectedExpression { found, .. }
      | E::ExpectedType { found, .. }
      | E::ExpectedClassMember { found, .. }
      | E::InvalidNumberLit { found, .. }
      | E::TooDeep { found, .. } => found,
    }
  }

  /// Index of [`Self::token`] in the token sequence.
  pub const fn tok_pos(&self) -> usize {
    match self {
      E::ExpectedToken { tok_pos, .. }
      | E::ExpectedExpression { tok_pos, .. }
      | E::ExpectedType { tok_pos, .. }
      | E::ExpectedClassMember { tok_pos, .. }
      | E::InvalidNumberLit { tok_pos, .. }
      | E::TooDeep { tok_pos, .. } => *tok_pos,
    }
  }

  pub const fn line(&self) -> u32 {
    self.token().loc.line
  }
}

/// Scans and parses `src` in one go.
pub fn parse(src: &str) -> ParseResult<Program> {
  Parser::new_str(src).parse()
}

pub fn parse_tokens(tokens: Vec<Token>) -> ParseResult<Program> {
  Parser::new(tokens).parse()
}

impl Parser {
  pub fn new(mut tokens: Vec<Token>) -> Parser {
    #[cfg(test)]
    configure_test_tracing();

    // the cursor saturates on the final Eof, so there must be one
    if tokens.last().is_none_or(|token| !token.is(T::Eof)) {
      let loc = tokens.last().map(|token| token.loc).unwrap_or_default();
      tokens.push(Token::eof(loc));
    }
    Parser { tokens, tok_pos: 0, depth: 0 }
  }

  pub fn new_str(src: &str) -> Parser {
    Parser::new(tokenize(src))
  }

  #[instrument(skip_all)]
  pub fn parse(mut self) -> ParseResult<Program> {
    trace!("Parser::parse()");
    let mut program = Program::default();
    while !self.cur_token_is(T::Eof) {
      program.stmts.push(self.parse_stmt()?);
    }
    debug!(stmts = program.len(), "parsed program");
    Ok(program)
  }

  pub const fn tok_pos(&self) -> usize {
    self.tok_pos
  }

  #[instrument(skip_all)]
  fn parse_stmt(&mut self) -> ParseResult<Stmt> {
    let kind = self.cur_token().kind;
    trace!(?kind, tok_pos = self.tok_pos, "statement");
    match kind {
      kind if kind.is_type_keyword() => self.parse_var_decl().map(Stmt::VarDecl),
      T::Function => self.parse_fn_decl().map(Stmt::FnDecl),
      T::Return => self.parse_return_stmt(),
      T::If => self.parse_if_stmt(),
      T::While => self.parse_while_stmt(),
      T::Class => self.parse_class_decl(),
      _ => self.parse_expr_stmt(),
    }
  }

  /// `ty name (= expr)? ;`
  #[instrument(skip_all)]
  fn parse_var_decl(&mut self) -> ParseResult<VarDecl> {
    let ty = self.parse_type()?;
    let name = self.expect(T::Ident, "variable name")?.text;
    let init = if self.eat(T::Assign) {
      Some(self.parse_expr()?)
    } else {
      None
    };
    self.expect(T::Semicolon, "';'")?;
    Ok(VarDecl { name, ty, init })
  }

  /// `funkcio name(ty param) ret { stmt* }`
  #[instrument(skip_all)]
  fn parse_fn_decl(&mut self) -> ParseResult<FnDecl> {
    self.expect(T::Function, "'funkcio'")?;
    let name = self.expect(T::Ident, "function name")?.text;
    self.expect(T::LParen, "'(' after function name")?;
    let param = self.parse_param()?;
    self.expect(T::RParen, "')' after parameter")?;
    let ret = self.parse_type()?;
    let body = self.parse_block()?;
    Ok(FnDecl { name, param, ret, body })
  }

  #[instrument(skip_all)]
  fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
    self.advance(); // `reveni`
    let value = self.parse_expr()?;
    self.expect(T::Semicolon, "';'")?;
    Ok(Stmt::Return(Return { value }))
  }

  #[instrument(skip_all)]
  fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
    self.advance(); // `se`
    let cond = self.parse_condition()?;
    let then_body = self.parse_block()?;
    let else_body = if self.eat(T::Else) {
      self.parse_block()?
    } else {
      Vec::new()
    };
    Ok(Stmt::If(If { cond, then_body, else_body }))
  }

  #[instrument(skip_all)]
  fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
    self.advance(); // `dum`
    let cond = self.parse_condition()?;
    let body = self.parse_block()?;
    Ok(Stmt::While(While { cond, body }))
  }

  /// `klaso Name { (var_decl | fn_decl)* }`
  #[instrument(skip_all)]
  fn parse_class_decl(&mut self) -> ParseResult<Stmt> {
    self.advance(); // `klaso`
    let name = self.expect(T::Ident, "class name")?.text;
    self.expect(T::LBrace, "'{' after class name")?;
    let mut class = ClassDecl {
      name,
      fields: Vec::new(),
      methods: Vec::new(),
    };
    while !self.eat(T::RBrace) {
      match self.cur_token().kind {
        kind if kind.is_type_keyword() => class.fields.push(self.parse_var_decl()?),
        T::Function => class.methods.push(self.parse_fn_decl()?),
        T::Eof => return Err(self.expected(T::RBrace, "'}' to close class body")),
        _ => {
          return Err(E::ExpectedClassMember {
            found: self.cur_token().clone(),
            tok_pos: self.tok_pos,
          });
        }
      }
    }
    Ok(Stmt::ClassDecl(class))
  }

  /// An expression statement, or an assignment when the expression is a
  /// bare variable followed by `=`.
  #[instrument(skip_all)]
  fn parse_expr_stmt(&mut self) -> ParseResult<Stmt> {
    let expr = self.parse_expr()?;
    match expr.kind {
      ExprKind::Var(name) if self.cur_token_is(T::Assign) => {
        self.advance(); // `=`
        let value = self.parse_expr()?;
        self.expect(T::Semicolon, "';'")?;
        Ok(Stmt::Assign(Assign { name, value }))
      }
      kind => {
        self.expect(T::Semicolon, "';'")?;
        Ok(Stmt::Expr(Expr { kind, ty: expr.ty }))
      }
    }
  }

  /// `( expr )` after `se` / `dum`
  fn parse_condition(&mut self) -> ParseResult<Expr> {
    self.expect(T::LParen, "'(' before condition")?;
    let cond = self.parse_expr()?;
    self.expect(T::RParen, "')' after condition")?;
    Ok(cond)
  }

  /// `{ stmt* }`
  #[instrument(skip_all)]
  fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
    self.expect(T::LBrace, "'{'")?;
    self.nested(|parser| {
      let mut stmts = Vec::new();
      while !parser.eat(T::RBrace) {
        if parser.cur_token_is(T::Eof) {
          return Err(parser.expected(T::RBrace, "'}' to close block"));
        }
        stmts.push(parser.parse_stmt()?);
      }
      Ok(stmts)
    })
  }

  /// Runs `production` one nesting level deeper, failing once
  /// [`MAX_NESTING`] is reached.
  fn nested<R>(
    &mut self,
    production: impl FnOnce(&mut Self) -> ParseResult<R>,
  ) -> ParseResult<R> {
    if self.depth >= MAX_NESTING {
      return Err(E::TooDeep {
        found: self.cur_token().clone(),
        tok_pos: self.tok_pos,
      });
    }
    self.depth += 1;
    let result = production(self);
    self.depth -= 1;
    result
  }

  /// `ty name`
  fn parse_param(&mut self) -> ParseResult<Param> {
    let ty = self.parse_type()?;
    let name = self.expect(T::Ident, "parameter name")?.text;
    Ok(Param { name, ty })
  }

  fn parse_type(&mut self) -> ParseResult<Type> {
    let Some(ty) = Type::from_keyword(self.cur_token().kind) else {
      return Err(E::ExpectedType {
        found: self.cur_token().clone(),
        tok_pos: self.tok_pos,
      });
    };
    self.advance();
    Ok(ty)
  }

  fn cur_token(&self) -> &Token {
    &self.tokens[self.tok_pos]
  }

  fn cur_token_is(&self, kind: TokenKind) -> bool {
    self.cur_token().is(kind)
  }

  /// Moves to the next token, never past the final Eof.
  fn advance(&mut self) -> Token {
    let token = self.cur_token().clone();
    if self.tok_pos < self.tokens.len() - 1 {
      self.tok_pos += 1;
    }
    token
  }

  fn eat(&mut self, kind: TokenKind) -> bool {
    if self.cur_token_is(kind) {
      self.advance();
      true
    } else {
      false
    }
  }

  fn expect(&mut self, kind: TokenKind, expected: &'static str) -> ParseResult<Token> {
    if self.cur_token_is(kind) {
      Ok(self.advance())
    } else {
      Err(self.expected(kind, expected))
    }
  }

  fn expected(&self, kind: TokenKind, expected: &'static str) -> ParseError {
    E::ExpectedToken {
      kind,
      expected,
      found: self.cur_token().clone(),
      tok_pos: self.tok_pos,
    }
  }
}

#[cfg(test)]
static INIT: Once = Once::new();

#[cfg(test)]
fn configure_test_tracing() {
  INIT.call_once(|| {
    let subscriber = fmt::Subscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_test_writer()
      .with_span_events(FmtSpan::ACTIVE)
      .finish();
    tracing::subscriber::set_global_default(subscriber)
      .expect("setting default tracing subscriber failed");
  });
}
