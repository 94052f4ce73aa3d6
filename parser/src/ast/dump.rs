//! Indented debug rendering of the tree, two spaces per level.

use std::fmt::{self, Display, Formatter, Write};

use super::*;

struct Dumper<'a, 'b> {
  f: &'a mut Formatter<'b>,
  depth: usize,
}

impl Dumper<'_, '_> {
  fn line(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
    for _ in 0..self.depth {
      self.f.write_str("  ")?;
    }
    self.f.write_fmt(args)?;
    self.f.write_char('\n')
  }

  fn nested(&mut self, dump: impl FnOnce(&mut Self) -> fmt::Result) -> fmt::Result {
    self.depth += 1;
    let result = dump(self);
    self.depth -= 1;
    result
  }

  fn labeled_block(&mut self, label: &str, stmts: &[Stmt]) -> fmt::Result {
    self.line(format_args!("{label}:"))?;
    self.nested(|d| stmts.iter().try_for_each(|stmt| d.stmt(stmt)))
  }

  fn labeled_expr(&mut self, label: &str, expr: &Expr) -> fmt::Result {
    self.line(format_args!("{label}:"))?;
    self.nested(|d| d.expr(expr))
  }

  fn stmt(&mut self, stmt: &Stmt) -> fmt::Result {
    match stmt {
      Stmt::VarDecl(decl) => self.var_decl(decl),
      Stmt::Assign(Assign { name, value }) => {
        self.line(format_args!("Assign({name})"))?;
        self.nested(|d| d.expr(value))
      }
      Stmt::FnDecl(decl) => self.fn_decl(decl),
      Stmt::Return(Return { value }) => {
        self.line(format_args!("Return"))?;
        self.nested(|d| d.expr(value))
      }
      Stmt::If(If { cond, then_body, else_body }) => {
        self.line(format_args!("If"))?;
        self.nested(|d| {
          d.labeled_expr("condition", cond)?;
          d.labeled_block("then", then_body)?;
          if !else_body.is_empty() {
            d.labeled_block("else", else_body)?;
          }
          Ok(())
        })
      }
      Stmt::While(While { cond, body }) => {
        self.line(format_args!("While"))?;
        self.nested(|d| {
          d.labeled_expr("condition", cond)?;
          d.labeled_block("body", body)
        })
      }
      Stmt::ClassDecl(ClassDecl { name, fields, methods }) => {
        self.line(format_args!("ClassDecl({name})"))?;
        self.nested(|d| {
          if !fields.is_empty() {
            d.line(format_args!("fields:"))?;
            d.nested(|d| fields.iter().try_for_each(|field| d.var_decl(field)))?;
          }
          if !methods.is_empty() {
            d.line(format_args!("methods:"))?;
            d.nested(|d| methods.iter().try_for_each(|method| d.fn_decl(method)))?;
          }
          Ok(())
        })
      }
      Stmt::Expr(expr) => self.expr(expr),
    }
  }

  fn var_decl(&mut self, VarDecl { name, ty, init }: &VarDecl) -> fmt::Result {
    self.line(format_args!("VarDecl({ty} {name})"))?;
    match init {
      Some(init) => self.nested(|d| d.labeled_expr("initializer", init)),
      None => Ok(()),
    }
  }

  fn fn_decl(&mut self, FnDecl { name, param, ret, body }: &FnDecl) -> fmt::Result {
    self.line(format_args!("FunctionDecl({name}({} {}) {ret})", param.ty, param.name))?;
    self.nested(|d| d.labeled_block("body", body))
  }

  fn expr(&mut self, expr: &Expr) -> fmt::Result {
    match &expr.kind {
      ExprKind::Number { value, is_integer: true } => {
        self.line(format_args!("NumberLiteral({value:.0})"))
      }
      ExprKind::Number { value, is_integer: false } => {
        self.line(format_args!("NumberLiteral({value:?})"))
      }
      ExprKind::Str(value) => self.line(format_args!("StringLiteral({value:?})")),
      ExprKind::Bool(true) => self.line(format_args!("BoolLiteral(vero)")),
      ExprKind::Bool(false) => self.line(format_args!("BoolLiteral(malvero)")),
      ExprKind::Var(name) => self.line(format_args!("VarRef({name})")),
      ExprKind::Binary { op, lhs, rhs } => {
        self.line(format_args!("BinaryOp({})", op.symbol()))?;
        self.nested(|d| {
          d.expr(lhs)?;
          d.expr(rhs)
        })
      }
      ExprKind::Call { callee, arg } => {
        self.line(format_args!("Call"))?;
        self.nested(|d| {
          d.labeled_expr("function", callee)?;
          d.labeled_expr("argument", arg)
        })
      }
      ExprKind::AtFn(AtFn { param, ret, body }) => {
        self.line(format_args!("AtFunction(@({} {}) {ret})", param.ty, param.name))?;
        self.nested(|d| d.labeled_block("body", body))
      }
      ExprKind::Member { object, member } => {
        self.line(format_args!("MemberAccess(.{member})"))?;
        self.nested(|d| d.expr(object))
      }
    }
  }
}

impl Display for Program {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let mut dumper = Dumper { f, depth: 0 };
    dumper.line(format_args!("Program"))?;
    dumper.nested(|d| self.stmts.iter().try_for_each(|stmt| d.stmt(stmt)))
  }
}

impl Display for Stmt {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    Dumper { f, depth: 0 }.stmt(self)
  }
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    Dumper { f, depth: 0 }.expr(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn num(value: f64, is_integer: bool) -> Expr {
    Expr::new(ExprKind::Number { value, is_integer })
  }

  #[test]
  fn nested_expression() {
    let expr = Expr::binary(
      BinaryOp::Add,
      num(1.0, true),
      Expr::call(Expr::member(Expr::var("tiu"), "f"), num(3.0, false)),
    );
    assert_eq!(
      expr.to_string(),
      "\
BinaryOp(+)
  NumberLiteral(1)
  Call
    function:
      MemberAccess(.f)
        VarRef(tiu)
    argument:
      NumberLiteral(3.0)
"
    );
  }

  #[test]
  fn integer_literals_print_without_clamping() {
    assert_eq!(num(42.0, true).to_string(), "NumberLiteral(42)\n");
    assert_eq!(
      num(1e20, true).to_string(),
      "NumberLiteral(100000000000000000000)\n"
    );
  }

  #[test]
  fn program_with_blocks() {
    let program = Program {
      stmts: vec![
        Stmt::VarDecl(VarDecl { name: "n".into(), ty: Type::Int, init: None }),
        Stmt::If(If {
          cond: Expr::new(ExprKind::Bool(true)),
          then_body: vec![Stmt::Assign(Assign {
            name: "n".into(),
            value: Expr::new(ExprKind::Str("a\"b".into())),
          })],
          else_body: vec![],
        }),
        Stmt::ClassDecl(ClassDecl {
          name: "Punkto".into(),
          fields: vec![VarDecl {
            name: "x".into(),
            ty: Type::Real,
            init: Some(num(0.5, false)),
          }],
          methods: vec![FnDecl {
            name: "get".into(),
            param: Param { name: "i".into(), ty: Type::Int },
            ret: Type::Real,
            body: vec![Stmt::Return(Return { value: Expr::var("x") })],
          }],
        }),
      ],
    };
    assert_eq!(
      program.to_string(),
      r#"Program
  VarDecl(entjera n)
  If
    condition:
      BoolLiteral(vero)
    then:
      Assign(n)
        StringLiteral("a\"b")
  ClassDecl(Punkto)
    fields:
      VarDecl(reala x)
        initializer:
          NumberLiteral(0.5)
    methods:
      FunctionDecl(get(entjera i) reala)
        body:
          Return
            VarRef(x)
"#
    );
  }
}
