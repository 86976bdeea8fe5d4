use crate::ast::node::Node;
use crate::ast::node::NodeTokens;
use crate::ast::stx::TopLevel;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::Keyword;
use crate::token::Token;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use std::mem;

pub mod expr;
pub mod stmt;

#[derive(Clone, Copy, Debug, Default)]
pub struct ParseOptions {
  /// Strict parsing: rejects trailing commas, validates label targets and
  /// assignment targets, and disables automatic semicolon insertion.
  pub exigent_mode: bool,
  /// Embeds the start and end tokens on every statement and function node.
  pub embed_tokens: bool,
}

/// A predictive recursive-descent parser with one-token lookahead.
pub struct Parser {
  lexer: Lexer,
  cur: Token,
  prev: Option<Token>,
  peeked: Option<Token>,
  in_function: u32,
  in_loop: u32,
  labels: Vec<String>,
  options: ParseOptions,
}

impl Parser {
  pub fn new(mut lexer: Lexer, options: ParseOptions) -> SyntaxResult<Parser> {
    let cur = lexer.next_token()?;
    Ok(Parser {
      lexer,
      cur,
      prev: None,
      peeked: None,
      in_function: 0,
      in_loop: 0,
      labels: Vec::new(),
      options,
    })
  }

  pub fn parse_top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let mut body = Vec::new();
    while !self.cur.is_eof() {
      body.push(self.stmt()?);
    }
    Ok(Node::new(Loc(0, self.cur.pos), TopLevel { body }))
  }

  pub(crate) fn advance(&mut self) -> SyntaxResult<()> {
    let next = match self.peeked.take() {
      Some(token) => token,
      None => self.lexer.next_token()?,
    };
    self.prev = Some(mem::replace(&mut self.cur, next));
    Ok(())
  }

  /// Consumes and returns the current token.
  pub(crate) fn consume(&mut self) -> SyntaxResult<Token> {
    let token = self.cur.clone();
    self.advance()?;
    Ok(token)
  }

  pub(crate) fn peek(&mut self) -> SyntaxResult<&Token> {
    if self.peeked.is_none() {
      self.peeked = Some(self.lexer.next_token()?);
    }
    Ok(self.peeked.as_ref().unwrap())
  }

  pub(crate) fn prev_endpos(&self) -> usize {
    self.prev.as_ref().map(|t| t.endpos).unwrap_or(0)
  }

  pub(crate) fn expect_punc(&mut self, punc: char) -> SyntaxResult<Token> {
    if self.cur.is_punc(punc) {
      self.consume()
    } else {
      Err(
        self
          .cur
          .error(SyntaxErrorType::RequiredTokenNotFound(format!(
            "punc ({})",
            punc
          ))),
      )
    }
  }

  pub(crate) fn consume_if_punc(&mut self, punc: char) -> SyntaxResult<bool> {
    if self.cur.is_punc(punc) {
      self.advance()?;
      Ok(true)
    } else {
      Ok(false)
    }
  }

  pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> SyntaxResult<Token> {
    if self.cur.is_keyword(keyword) {
      self.consume()
    } else {
      Err(
        self
          .cur
          .error(SyntaxErrorType::RequiredTokenNotFound(format!(
            "keyword ({})",
            keyword.as_str()
          ))),
      )
    }
  }

  /// Whether a missing `;` is tolerated at the current token.
  pub(crate) fn can_insert_semicolon(&self) -> bool {
    !self.options.exigent_mode && (self.cur.is_eof() || self.cur.is_punc('}') || self.cur.nlb)
  }

  pub(crate) fn semicolon(&mut self) -> SyntaxResult<()> {
    if self.cur.is_punc(';') {
      self.advance()?;
      Ok(())
    } else if self.can_insert_semicolon() {
      Ok(())
    } else {
      Err(self.cur.unexpected())
    }
  }

  pub(crate) fn in_loop_scope<T, F>(&mut self, f: F) -> SyntaxResult<T>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<T>,
  {
    self.in_loop += 1;
    let result = f(self);
    self.in_loop -= 1;
    result
  }

  /// Runs the closure and wraps its syntax in a node spanning the consumed
  /// range.
  pub(crate) fn with_loc<S: Drive + DriveMut, F>(&mut self, f: F) -> SyntaxResult<Node<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<S>,
  {
    let start = self.cur.pos;
    let stx = f(self)?;
    let end = self.prev.as_ref().map(|t| t.endpos).unwrap_or(start);
    Ok(Node::new(Loc(start, end), stx))
  }

  /// Attaches the start and end tokens to a freshly parsed node when token
  /// embedding is on. `start` must have been captured before parsing began.
  pub(crate) fn embed_node_tokens<S: Drive + DriveMut>(
    &self,
    start: Option<Token>,
    node: &mut Node<S>,
  ) {
    if let (Some(start), Some(end)) = (start, self.prev.clone()) {
      node.tokens = Some(Box::new(NodeTokens { start, end }));
    }
  }

  /// Captures the current token when token embedding is on.
  pub(crate) fn embed_start(&self) -> Option<Token> {
    if self.options.embed_tokens {
      Some(self.cur.clone())
    } else {
      None
    }
  }
}
