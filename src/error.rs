use crate::operator::Operator;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Formatter;
use std::error::Error;
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxErrorType {
  ExpectedSyntax(&'static str),
  ExpectedUnicodeEscape,
  InvalidAssigmentTarget,
  InvalidCharacterEscape,
  InvalidIdentifierEscape,
  InvalidUnaryOperand(Operator),
  LabelNotFound(String),
  MalformedNumber(String),
  NotInsideLoop(&'static str),
  RequiredTokenNotFound(String),
  ReturnOutsideFunction,
  TryStatementHasNoCatchOrFinally,
  UnexpectedCharacter(char),
  UnexpectedToken { typ: &'static str, value: String },
  UnterminatedComment,
  UnterminatedRegex,
  UnterminatedString,
}

impl SyntaxErrorType {
  /// Human-readable message describing this syntax error.
  pub fn message(&self) -> String {
    match self {
      SyntaxErrorType::ExpectedSyntax(expected) => format!("Expected {}", expected),
      SyntaxErrorType::ExpectedUnicodeEscape => {
        "Expecting unicode escape sequence (\\uXXXX) in identifier".into()
      }
      SyntaxErrorType::InvalidAssigmentTarget => "Invalid assignment".into(),
      SyntaxErrorType::InvalidCharacterEscape => "Invalid hex-character pattern in string".into(),
      SyntaxErrorType::InvalidIdentifierEscape => "Unicode char is not valid in identifier".into(),
      SyntaxErrorType::InvalidUnaryOperand(op) => {
        format!("Invalid use of {} operator", op.as_str())
      }
      SyntaxErrorType::LabelNotFound(name) => {
        format!("Label {} without matching loop or statement", name)
      }
      SyntaxErrorType::MalformedNumber(raw) => format!("Invalid syntax: {}", raw),
      SyntaxErrorType::NotInsideLoop(what) => format!("{} not inside a loop or switch", what),
      SyntaxErrorType::RequiredTokenNotFound(expected) => format!("Expected token: {}", expected),
      SyntaxErrorType::ReturnOutsideFunction => "'return' outside of function".into(),
      SyntaxErrorType::TryStatementHasNoCatchOrFinally => "Missing catch/finally blocks".into(),
      SyntaxErrorType::UnexpectedCharacter(c) => format!("Unexpected character '{}'", c),
      SyntaxErrorType::UnexpectedToken { typ, value } => {
        format!("Unexpected token: {} ({})", typ, value)
      }
      SyntaxErrorType::UnterminatedComment => "Unterminated multiline comment".into(),
      SyntaxErrorType::UnterminatedRegex => "Unterminated regular expression".into(),
      SyntaxErrorType::UnterminatedString => "Unterminated string constant".into(),
    }
  }
}

/// The single error kind every scanning or parsing failure surfaces as.
///
/// `line` and `col` are 0-based and refer to the normalized source text; `pos`
/// is the 0-based absolute byte offset of the failure.
#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub line: usize,
  pub col: usize,
  pub pos: usize,
}

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, line: usize, col: usize, pos: usize) -> SyntaxError {
    SyntaxError {
      typ,
      line,
      col,
      pos,
    }
  }

  pub fn message(&self) -> String {
    self.typ.message()
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    Display::fmt(self, f)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} (line: {}, col: {}, pos: {})",
      self.message(),
      self.line,
      self.col,
      self.pos
    )
  }
}

impl Error for SyntaxError {}

impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}

pub type SyntaxResult<T> = Result<T, SyntaxError>;
