use crate::ast::node::Node;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxResult;
use crate::lex::Lexer;
use crate::parse::ParseOptions;
use crate::parse::Parser;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod num;
pub mod operator;
pub mod parse;
pub mod token;

/// Parses a program in lenient mode.
pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  parse_with_options(source, ParseOptions::default())
}

pub fn parse_with_options(source: &str, options: ParseOptions) -> SyntaxResult<Node<TopLevel>> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer, options)?;
  parser.parse_top_level()
}

/// Returns a scanner over `source`; call [`Lexer::next_token`] repeatedly
/// until it yields an end-of-input token.
pub fn tokenize(source: &str) -> Lexer {
  Lexer::new(source)
}
