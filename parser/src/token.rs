use crate::src_loc::SrcLoc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  // literals
  NumberLit,
  StringLit,
  Ident,
  // keywords
  Function,
  Class,
  If,
  Else,
  While,
  Return,
  SelfRef,
  True,
  False,
  // type keywords
  IntType,
  RealType,
  TextType,
  BoolType,
  FnType,
  // operators
  Plus,
  Minus,
  Star,
  Slash,
  Assign,
  Eq,
  NotEq,
  Lt,
  Gt,
  LtEq,
  GtEq,
  // punctuation
  LParen,
  RParen,
  LBrace,
  RBrace,
  Semicolon,
  Comma,
  At,
  Dot,
  Unknown,
  Eof,
}

impl TokenKind {
  pub fn keyword(text: &str) -> Option<TokenKind> {
    use TokenKind as T;
    let kind = match text {
      "funkcio" => T::Function,
      "klaso" => T::Class,
      "se" => T::If,
      "alie" => T::Else,
      "dum" => T::While,
      "reveni" => T::Return,
      "tiu" => T::SelfRef,
      "vero" => T::True,
      "malvero" => T::False,
      "entjera" => T::IntType,
      "reala" => T::RealType,
      "teksta" => T::TextType,
      "bulea" => T::BoolType,
      "funkcia" => T::FnType,
      _ => return None,
    };
    Some(kind)
  }

  pub const fn is_type_keyword(self) -> bool {
    matches!(
      self,
      TokenKind::IntType | TokenKind::RealType | TokenKind::TextType | TokenKind::BoolType | TokenKind::FnType
    )
  }

  pub const fn name(self) -> &'static str {
    match self {
      TokenKind::NumberLit => "Number",
      TokenKind::StringLit => "String",
      TokenKind::Ident => "Identifier",
      TokenKind::Function => "Funkcio",
      TokenKind::Class => "Klaso",
      TokenKind::If => "Se",
      TokenKind::Else => "Alie",
      TokenKind::While => "Dum",
      TokenKind::Return => "Reveni",
      TokenKind::SelfRef => "Tiu",
      TokenKind::True => "Vero",
      TokenKind::False => "Malvero",
      TokenKind::IntType => "Entjera",
      TokenKind::RealType => "Reala",
      TokenKind::TextType => "Teksta",
      TokenKind::BoolType => "Bulea",
      TokenKind::FnType => "Funkcia",
      TokenKind::Plus => "Plus",
      TokenKind::Minus => "Minus",
      TokenKind::Star => "Multiply",
      TokenKind::Slash => "Divide",
      TokenKind::Assign => "Assign",
      TokenKind::Eq => "Equal",
      TokenKind::NotEq => "NotEqual",
      TokenKind::Lt => "Less",
      TokenKind::Gt => "Greater",
      TokenKind::LtEq => "LessEqual",
      TokenKind::GtEq => "GreaterEqual",
      TokenKind::LParen => "LParen",
      TokenKind::RParen => "RParen",
      TokenKind::LBrace => "LBrace",
      TokenKind::RBrace => "RBrace",
      TokenKind::Semicolon => "Semicolon",
      TokenKind::Comma => "Comma",
      TokenKind::At => "At",
      TokenKind::Dot => "Dot",
      TokenKind::Unknown => "Unknown",
      TokenKind::Eof => "EndOfFile",
    }
  }
}

impl std::fmt::Display for TokenKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.pad(self.name())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  /// Exact lexeme, except string literals which hold the decoded value.
  pub text: String,
  pub loc: SrcLoc,
}

impl Token {
  pub fn new(kind: TokenKind, text: impl Into<String>, loc: SrcLoc) -> Self {
    Token { kind, text: text.into(), loc }
  }

  pub fn eof(loc: SrcLoc) -> Self {
    Token::new(TokenKind::Eof, "", loc)
  }

  pub fn is(&self, kind: TokenKind) -> bool {
    self.kind == kind
  }
}

// golden listing format, one token per line
impl std::fmt::Display for Token {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "Token(l:{:04}, c:{:04}, {:>12}, {:?})",
      self.loc.line, self.loc.column, self.kind, self.text
    )
  }
}
