use super::*;

type OperandFn = fn(&mut Parser) -> ParseResult<Expr>;
type OperatorFn = fn(TokenKind) -> Option<BinaryOp>;

impl Parser {
  /// Lowest binding level. Every binary level folds to the left.
  #[instrument(skip_all)]
  pub(super) fn parse_expr(&mut self) -> ParseResult<Expr> {
    self.nested(Self::parse_comparison)
  }

  fn parse_comparison(&mut self) -> ParseResult<Expr> {
    self.fold_left(Self::parse_additive, comparison_op)
  }

  fn parse_additive(&mut self) -> ParseResult<Expr> {
    self.fold_left(Self::parse_multiplicative, additive_op)
  }

  fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
    self.fold_left(Self::parse_postfix, multiplicative_op)
  }

  fn fold_left(&mut self, operand: OperandFn, operator: OperatorFn) -> ParseResult<Expr> {
    let mut lhs = operand(self)?;
    while let Some(op) = operator(self.cur_token().kind) {
      self.advance();
      let rhs = operand(self)?;
      lhs = Expr::binary(op, lhs, rhs);
    }
    Ok(lhs)
  }

  /// Calls `f(arg)` and member accesses `.name`, any number, left to right.
  #[instrument(skip_all)]
  fn parse_postfix(&mut self) -> ParseResult<Expr> {
    let mut expr = self.parse_primary()?;
    loop {
      if self.eat(T::LParen) {
        let arg = self.parse_expr()?;
        self.expect(T::RParen, "')' after argument")?;
        expr = Expr::call(expr, arg);
      } else if self.eat(T::Dot) {
        let member = self.expect(T::Ident, "member name")?.text;
        expr = Expr::member(expr, member);
      } else {
        return Ok(expr);
      }
    }
  }

  #[instrument(skip_all)]
  fn parse_primary(&mut self) -> ParseResult<Expr> {
    match self.cur_token().kind {
      T::NumberLit => self.parse_number_lit(),
      T::StringLit => Ok(Expr::new(ExprKind::Str(self.advance().text))),
      T::True => {
        self.advance();
        Ok(Expr::new(ExprKind::Bool(true)))
      }
      T::False => {
        self.advance();
        Ok(Expr::new(ExprKind::Bool(false)))
      }
      T::At => self.parse_at_fn(),
      T::LParen => {
        self.advance();
        let expr = self.parse_expr()?;
        self.expect(T::RParen, "')'")?;
        Ok(expr)
      }
      T::Ident | T::SelfRef => Ok(Expr::var(self.advance().text)),
      _ => Err(E::ExpectedExpression {
        found: self.cur_token().clone(),
        tok_pos: self.tok_pos,
      }),
    }
  }

  /// The integer flag tracks the lexeme, not the value: `3.0` is not an
  /// integer literal.
  fn parse_number_lit(&mut self) -> ParseResult<Expr> {
    let tok_pos = self.tok_pos;
    let token = self.advance();
    let Ok(value) = token.text.parse::<f64>() else {
      return Err(E::InvalidNumberLit { found: token, tok_pos });
    };
    let is_integer = !token.text.contains('.');
    Ok(Expr::new(ExprKind::Number { value, is_integer }))
  }

  /// `@(ty param) ret { stmt* }`
  #[instrument(skip_all)]
  fn parse_at_fn(&mut self) -> ParseResult<Expr> {
    self.advance(); // `@`
    self.expect(T::LParen, "'(' after '@'")?;
    let param = self.parse_param()?;
    self.expect(T::RParen, "')' after parameter")?;
    let ret = self.parse_type()?;
    let body = self.parse_block()?;
    Ok(Expr::new(ExprKind::AtFn(AtFn { param, ret, body })))
  }
}

const fn comparison_op(kind: TokenKind) -> Option<BinaryOp> {
  match kind {
    T::Eq => Some(BinaryOp::Eq),
    T::NotEq => Some(BinaryOp::NotEq),
    T::Lt => Some(BinaryOp::Lt),
    T::Gt => Some(BinaryOp::Gt),
    T::LtEq => Some(BinaryOp::LtEq),
    T::GtEq => Some(BinaryOp::GtEq),
    _ => None,
  }
}

const fn additive_op(kind: TokenKind) -> Option<BinaryOp> {
  match kind {
    T::Plus => Some(BinaryOp::Add),
    T::Minus => Some(BinaryOp::Sub),
    _ => None,
  }
}

const fn multiplicative_op(kind: TokenKind) -> Option<BinaryOp> {
  match kind {
    T::Star => Some(BinaryOp::Mul),
    T::Slash => Some(BinaryOp::Div),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use BinaryOp::{Add, Div, LtEq, Mul, NotEq, Sub};

  fn expr(src: &str) -> Expr {
    let mut parser = Parser::new_str(src);
    let expr = parser.parse_expr().unwrap();
    assert!(parser.cur_token_is(T::Eof), "trailing input in {src:?}");
    expr
  }

  fn num(value: f64, is_integer: bool) -> Expr {
    Expr::new(ExprKind::Number { value, is_integer })
  }

  fn int(value: f64) -> Expr {
    num(value, true)
  }

  #[test]
  fn subtraction_is_left_associative() {
    assert_eq!(
      expr("1 - 2 - 3"),
      Expr::binary(Sub, Expr::binary(Sub, int(1.0), int(2.0)), int(3.0))
    );
  }

  #[test]
  fn multiplication_binds_tighter() {
    assert_eq!(
      expr("1 + 2 * 3"),
      Expr::binary(Add, int(1.0), Expr::binary(Mul, int(2.0), int(3.0)))
    );
    assert_eq!(
      expr("1 * 2 + 3 / 4"),
      Expr::binary(
        Add,
        Expr::binary(Mul, int(1.0), int(2.0)),
        Expr::binary(Div, int(3.0), int(4.0))
      )
    );
  }

  #[test]
  fn comparison_binds_loosest() {
    assert_eq!(
      expr("a + 1 <= b * 2"),
      Expr::binary(
        LtEq,
        Expr::binary(Add, Expr::var("a"), int(1.0)),
        Expr::binary(Mul, Expr::var("b"), int(2.0))
      )
    );
    // comparisons chain to the left too
    assert_eq!(
      expr("a == b != c"),
      Expr::binary(
        NotEq,
        Expr::binary(BinaryOp::Eq, Expr::var("a"), Expr::var("b")),
        Expr::var("c")
      )
    );
  }

  #[test]
  fn parens_override_precedence() {
    assert_eq!(
      expr("(1 + 2) * 3"),
      Expr::binary(Mul, Expr::binary(Add, int(1.0), int(2.0)), int(3.0))
    );
    assert_eq!(
      expr("1 - (2 - 3)"),
      Expr::binary(Sub, int(1.0), Expr::binary(Sub, int(2.0), int(3.0)))
    );
  }

  #[test]
  fn number_literal_flag_follows_lexeme() {
    assert_eq!(expr("3"), int(3.0));
    assert_eq!(expr("3.5"), num(3.5, false));
    assert_eq!(expr("3.0"), num(3.0, false));
    assert_eq!(expr("3."), num(3.0, false));
  }

  #[test]
  fn literals() {
    assert_eq!(expr(r#""a\nb""#), Expr::new(ExprKind::Str("a\nb".into())));
    assert_eq!(expr("vero"), Expr::new(ExprKind::Bool(true)));
    assert_eq!(expr("malvero"), Expr::new(ExprKind::Bool(false)));
    assert_eq!(expr("tiu"), Expr::var("tiu"));
  }

  #[test]
  fn postfix_chains() {
    assert_eq!(
      expr("tiu.a.b(1)(x)"),
      Expr::call(
        Expr::call(
          Expr::member(Expr::member(Expr::var("tiu"), "a"), "b"),
          int(1.0)
        ),
        Expr::var("x")
      )
    );
    assert_eq!(
      expr("f(x).y * 2"),
      Expr::binary(Mul, Expr::member(Expr::call(Expr::var("f"), Expr::var("x")), "y"), int(2.0))
    );
  }

  #[test]
  fn call_takes_exactly_one_argument() {
    let err = Parser::new_str("f()").parse_expr().unwrap_err();
    assert!(matches!(err, E::ExpectedExpression { .. }));
    assert_eq!(err.token().kind, T::RParen);
    let err = Parser::new_str("f(a, b)").parse_expr().unwrap_err();
    assert!(matches!(err, E::ExpectedToken { kind: T::RParen, .. }));
    assert_eq!(err.token().kind, T::Comma);
  }

  #[test]
  fn member_needs_identifier() {
    let err = Parser::new_str("a.1").parse_expr().unwrap_err();
    assert!(matches!(err, E::ExpectedToken { kind: T::Ident, .. }));
  }

  #[test]
  fn at_function_literal() {
    let parsed = expr("@(entjera n) entjera { reveni n + 1; }(41)");
    let ExprKind::Call { callee, arg } = parsed.kind else {
      panic!("expected call");
    };
    assert_eq!(*arg, int(41.0));
    assert_eq!(
      callee.kind,
      ExprKind::AtFn(AtFn {
        param: Param { name: "n".into(), ty: Type::Int },
        ret: Type::Int,
        body: vec![Stmt::Return(Return {
          value: Expr::binary(Add, Expr::var("n"), int(1.0)),
        })],
      })
    );
  }

  #[test]
  fn at_function_errors() {
    let err = Parser::new_str("@ entjera").parse_expr().unwrap_err();
    assert!(matches!(err, E::ExpectedToken { kind: T::LParen, .. }));
    let err = Parser::new_str("@(entjera n) { }").parse_expr().unwrap_err();
    assert!(matches!(err, E::ExpectedType { .. }));
    assert_eq!(err.token().kind, T::LBrace);
  }

  #[test]
  fn no_primary_matches() {
    for src in ["", ")", "+ 1", "alie", "entjera"] {
      let err = Parser::new_str(src).parse_expr().unwrap_err();
      assert!(matches!(err, E::ExpectedExpression { .. }), "{src:?}");
    }
  }

  #[test]
  fn invalid_number_in_handmade_tokens() {
    let tokens = vec![Token::new(T::NumberLit, "1.2.3", SrcLoc::start())];
    let err = Parser::new(tokens).parse_expr().unwrap_err();
    assert!(matches!(err, E::InvalidNumberLit { tok_pos: 0, .. }));
  }
}
