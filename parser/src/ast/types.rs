use crate::internal::*;

/// Language-level type. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
  Int,
  Real,
  Text,
  Bool,
  /// Bare `funkcia` with no signature attached yet.
  Fn,
  /// A class whose name is not known yet.
  AnyClass,
  Void,
  Signature { param: Box<Type>, ret: Box<Type> },
  Class(String),
}

impl Type {
  pub fn signature(param: Type, ret: Type) -> Self {
    Type::Signature { param: Box::new(param), ret: Box::new(ret) }
  }

  pub fn class(name: impl Into<String>) -> Self {
    Type::Class(name.into())
  }

  /// The type named by a type keyword token.
  pub const fn from_keyword(kind: TokenKind) -> Option<Type> {
    match kind {
      TokenKind::IntType => Some(Type::Int),
      TokenKind::RealType => Some(Type::Real),
      TokenKind::TextType => Some(Type::Text),
      TokenKind::BoolType => Some(Type::Bool),
      TokenKind::FnType => Some(Type::Fn),
      _ => None,
    }
  }

  pub const fn is_function(&self) -> bool {
    matches!(self, Type::Fn | Type::Signature { .. })
  }
}

impl std::fmt::Display for Type {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Type::Int => f.write_str("entjera"),
      Type::Real => f.write_str("reala"),
      Type::Text => f.write_str("teksta"),
      Type::Bool => f.write_str("bulea"),
      Type::Fn => f.write_str("funkcia"),
      Type::AnyClass => f.write_str("klaso"),
      Type::Void => f.write_str("void"),
      Type::Signature { param, ret } => write!(f, "({param} -> {ret})"),
      Type::Class(name) => f.write_str(name),
    }
  }
}
