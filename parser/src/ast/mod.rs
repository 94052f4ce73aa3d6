mod dump;
mod types;
pub use types::Type;

/// Root of the tree: the top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
  pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
  VarDecl(VarDecl),
  Assign(Assign),
  FnDecl(FnDecl),
  Return(Return),
  If(If),
  While(While),
  ClassDecl(ClassDecl),
  Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
  pub name: String,
  pub ty: Type,
  pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
  pub name: String,
  pub value: Expr,
}

/// `funkcio name(ty param) ret { .. }`, exactly one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDecl {
  pub name: String,
  pub param: Param,
  pub ret: Type,
  pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
  pub name: String,
  pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
  pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
  pub cond: Expr,
  pub then_body: Vec<Stmt>,
  /// Empty when there is no `alie` branch.
  pub else_body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
  pub cond: Expr,
  pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
  pub name: String,
  pub fields: Vec<VarDecl>,
  pub methods: Vec<FnDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
  pub kind: ExprKind,
  /// Filled in by later passes; the parser always leaves it empty.
  pub ty: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
  Number { value: f64, is_integer: bool },
  Str(String),
  Bool(bool),
  Var(String),
  Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
  Call { callee: Box<Expr>, arg: Box<Expr> },
  AtFn(AtFn),
  Member { object: Box<Expr>, member: String },
}

/// Inline function literal, `@(ty param) ret { .. }`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtFn {
  pub param: Param,
  pub ret: Type,
  pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Eq,
  NotEq,
  Lt,
  Gt,
  LtEq,
  GtEq,
}

impl BinaryOp {
  pub const fn symbol(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Eq => "==",
      BinaryOp::NotEq => "!=",
      BinaryOp::Lt => "<",
      BinaryOp::Gt => ">",
      BinaryOp::LtEq => "<=",
      BinaryOp::GtEq => ">=",
    }
  }
}

impl Expr {
  pub const fn new(kind: ExprKind) -> Self {
    Expr { kind, ty: None }
  }

  pub fn var(name: impl Into<String>) -> Self {
    Expr::new(ExprKind::Var(name.into()))
  }

  pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
    Expr::new(ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) })
  }

  pub fn call(callee: Expr, arg: Expr) -> Self {
    Expr::new(ExprKind::Call { callee: Box::new(callee), arg: Box::new(arg) })
  }

  pub fn member(object: Expr, member: impl Into<String>) -> Self {
    Expr::new(ExprKind::Member { object: Box::new(object), member: member.into() })
  }
}

impl Program {
  pub fn len(&self) -> usize {
    self.stmts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stmts.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expressions_start_untyped() {
    let expr = Expr::binary(BinaryOp::Add, Expr::var("a"), Expr::var("b"));
    assert_eq!(expr.ty, None);
  }
}
