use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use crate::num::JsNumber;
use crate::operator::Operator;
use crate::operator::OPERATORS_MAPPING;
use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Keywords that are neither word operators nor atoms. `in`, `instanceof`,
/// `typeof`, `new`, `void`, and `delete` tokenize as [`Operator`]; `true`,
/// `false`, `null`, and `undefined` tokenize as [`Atom`]; `this` is an
/// ordinary name.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum Keyword {
  Break,
  Case,
  Catch,
  Const,
  Continue,
  Debugger,
  Default,
  Do,
  Else,
  Finally,
  For,
  Function,
  If,
  Return,
  Switch,
  Throw,
  Try,
  Var,
  While,
  With,
}

impl Keyword {
  pub fn as_str(&self) -> &'static str {
    match self {
      Keyword::Break => "break",
      Keyword::Case => "case",
      Keyword::Catch => "catch",
      Keyword::Const => "const",
      Keyword::Continue => "continue",
      Keyword::Debugger => "debugger",
      Keyword::Default => "default",
      Keyword::Do => "do",
      Keyword::Else => "else",
      Keyword::Finally => "finally",
      Keyword::For => "for",
      Keyword::Function => "function",
      Keyword::If => "if",
      Keyword::Return => "return",
      Keyword::Switch => "switch",
      Keyword::Throw => "throw",
      Keyword::Try => "try",
      Keyword::Var => "var",
      Keyword::While => "while",
      Keyword::With => "with",
    }
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Atom {
  False,
  Null,
  True,
  Undefined,
}

impl Atom {
  pub fn as_str(&self) -> &'static str {
    match self {
      Atom::False => "false",
      Atom::Null => "null",
      Atom::True => "true",
      Atom::Undefined => "undefined",
    }
  }
}

pub static KEYWORDS_MAPPING: Lazy<HashMap<&'static str, Keyword>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, Keyword>::new();
  map.insert("break", Keyword::Break);
  map.insert("case", Keyword::Case);
  map.insert("catch", Keyword::Catch);
  map.insert("const", Keyword::Const);
  map.insert("continue", Keyword::Continue);
  map.insert("debugger", Keyword::Debugger);
  map.insert("default", Keyword::Default);
  map.insert("do", Keyword::Do);
  map.insert("else", Keyword::Else);
  map.insert("finally", Keyword::Finally);
  map.insert("for", Keyword::For);
  map.insert("function", Keyword::Function);
  map.insert("if", Keyword::If);
  map.insert("return", Keyword::Return);
  map.insert("switch", Keyword::Switch);
  map.insert("throw", Keyword::Throw);
  map.insert("try", Keyword::Try);
  map.insert("var", Keyword::Var);
  map.insert("while", Keyword::While);
  map.insert("with", Keyword::With);
  map
});

pub static ATOMS_MAPPING: Lazy<HashMap<&'static str, Atom>> = Lazy::new(|| {
  let mut map = HashMap::<&'static str, Atom>::new();
  map.insert("false", Atom::False);
  map.insert("null", Atom::Null);
  map.insert("true", Atom::True);
  map.insert("undefined", Atom::Undefined);
  map
});

/// Keywords after which a `/` begins a regular expression literal. `new` and
/// `delete` also precede expressions but tokenize as operators, which are
/// covered by the operator rule.
pub static KEYWORDS_BEFORE_EXPRESSION: Lazy<HashSet<Keyword>> = Lazy::new(|| {
  let mut set = HashSet::<Keyword>::new();
  set.insert(Keyword::Return);
  set.insert(Keyword::Throw);
  set.insert(Keyword::Else);
  set.insert(Keyword::Case);
  set
});

#[derive(Clone, Debug, PartialEq)]
pub enum TokenData {
  Num(JsNumber),
  Str(String),
  Regex(String, String),
  Name(String),
  Keyword(Keyword),
  Atom(Atom),
  Operator(Operator),
  Punc(char),
  CommentLine(String),
  CommentBlock(String),
  Eof,
}

/// Classifies a scanned identifier-shaped word into its token kind.
pub fn classify_word(word: String) -> TokenData {
  if let Some(&op) = OPERATORS_MAPPING.get(word.as_str()) {
    return TokenData::Operator(op);
  }
  if let Some(&atom) = ATOMS_MAPPING.get(word.as_str()) {
    return TokenData::Atom(atom);
  }
  if let Some(&keyword) = KEYWORDS_MAPPING.get(word.as_str()) {
    return TokenData::Keyword(keyword);
  }
  TokenData::Name(word)
}

/// A single token. `line`/`col`/`pos` locate the first character of the token
/// in the normalized source; `endpos` is one past its last byte. `nlb` is set
/// iff at least one line terminator lies between the previous non-comment
/// token and this one. `comments_before` carries the trivia accumulated since
/// the previous non-comment token; it is always empty on comment tokens
/// themselves.
#[derive(Clone, Debug)]
pub struct Token {
  pub data: TokenData,
  pub line: usize,
  pub col: usize,
  pub pos: usize,
  pub endpos: usize,
  pub nlb: bool,
  pub comments_before: Vec<Token>,
}

impl Token {
  pub fn loc(&self) -> Loc {
    Loc(self.pos, self.endpos)
  }

  pub fn is_punc(&self, punc: char) -> bool {
    matches!(&self.data, TokenData::Punc(c) if *c == punc)
  }

  pub fn is_op(&self, operator: Operator) -> bool {
    matches!(&self.data, TokenData::Operator(op) if *op == operator)
  }

  pub fn is_keyword(&self, keyword: Keyword) -> bool {
    matches!(&self.data, TokenData::Keyword(kw) if *kw == keyword)
  }

  pub fn is_eof(&self) -> bool {
    matches!(&self.data, TokenData::Eof)
  }

  pub fn type_name(&self) -> &'static str {
    match &self.data {
      TokenData::Num(_) => "num",
      TokenData::Str(_) => "string",
      TokenData::Regex(..) => "regexp",
      TokenData::Name(_) => "name",
      TokenData::Keyword(_) => "keyword",
      TokenData::Atom(_) => "atom",
      TokenData::Operator(_) => "operator",
      TokenData::Punc(_) => "punc",
      TokenData::CommentLine(_) => "comment1",
      TokenData::CommentBlock(_) => "comment2",
      TokenData::Eof => "eof",
    }
  }

  pub fn value_desc(&self) -> String {
    match &self.data {
      TokenData::Num(n) => n.to_string(),
      TokenData::Str(s) => s.clone(),
      TokenData::Regex(pattern, flags) => format!("/{}/{}", pattern, flags),
      TokenData::Name(n) => n.clone(),
      TokenData::Keyword(kw) => kw.as_str().to_string(),
      TokenData::Atom(a) => a.as_str().to_string(),
      TokenData::Operator(op) => op.as_str().to_string(),
      TokenData::Punc(c) => c.to_string(),
      TokenData::CommentLine(text) | TokenData::CommentBlock(text) => text.clone(),
      TokenData::Eof => String::new(),
    }
  }

  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    SyntaxError::new(typ, self.line, self.col, self.pos)
  }

  pub fn unexpected(&self) -> SyntaxError {
    self.error(SyntaxErrorType::UnexpectedToken {
      typ: self.type_name(),
      value: self.value_desc(),
    })
  }
}
