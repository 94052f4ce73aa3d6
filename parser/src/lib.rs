pub mod ast;
pub mod diag;
pub mod lexer;
pub mod parser;
pub mod src_loc;
pub mod token;

pub use diag::Diagnostic;
pub use lexer::{Lexer, tokenize};
pub use parser::{ParseError, ParseResult, Parser, parse, parse_tokens};
pub use src_loc::SrcLoc;
pub use token::{Token, TokenKind};

pub mod internal {
  pub use crate::ast::*;
  pub use crate::diag::*;
  pub use crate::lexer::*;
  pub use crate::parser::*;
  pub use crate::src_loc::*;
  pub use crate::token::*;
  pub use tracing::{debug, instrument, trace};
}
