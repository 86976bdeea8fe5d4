use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForInLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForInit;
use crate::ast::stmt::ForStmt;
use crate::ast::stmt::FuncDecl;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::VarDecl;
use crate::ast::stmt::VarDeclMode;
use crate::ast::stmt::VarDeclarator;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::operator::Operator;
use crate::token::Keyword;
use crate::token::TokenData;
use std::mem;

/// Statement tags a label may target in exigent mode. `for (x in y)` bodies
/// are not in the set.
fn is_labelable(stmt: &Stmt) -> bool {
  matches!(
    stmt,
    Stmt::For(_) | Stmt::DoWhile(_) | Stmt::While(_) | Stmt::Switch(_)
  )
}

impl Parser {
  pub fn stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.embed_start();
    let mut node = self.stmt_inner()?;
    self.embed_node_tokens(start, &mut node);
    Ok(node)
  }

  fn stmt_inner(&mut self) -> SyntaxResult<Node<Stmt>> {
    // A statement cannot begin with a division operator; the `/` must start a
    // regular expression literal, so have the scanner reinterpret it.
    if self.cur.is_op(Operator::Division) || self.cur.is_op(Operator::AssignmentDivision) {
      debug_assert!(self.peeked.is_none());
      self.peeked = None;
      let mut token = self.lexer.reinterpret_as_regex()?;
      token.nlb = self.cur.nlb;
      token.comments_before = mem::take(&mut self.cur.comments_before);
      self.cur = token;
    }
    match self.cur.data.clone() {
      TokenData::Num(_)
      | TokenData::Str(_)
      | TokenData::Regex(..)
      | TokenData::Operator(_)
      | TokenData::Atom(_) => self.simple_stmt(),
      TokenData::Name(_) => {
        if self.peek()?.is_punc(':') {
          self.label_stmt()
        } else {
          self.simple_stmt()
        }
      }
      TokenData::Punc(c) => match c {
        '{' => Ok(self.block_stmt()?.into_wrapped()),
        '(' | '[' => self.simple_stmt(),
        // A bare `;` is an empty block.
        ';' => Ok(
          self
            .with_loc(|p| {
              p.advance()?;
              Ok(BlockStmt { body: Vec::new() })
            })?
            .into_wrapped(),
        ),
        _ => Err(self.cur.unexpected()),
      },
      TokenData::Keyword(keyword) => self.keyword_stmt(keyword),
      _ => Err(self.cur.unexpected()),
    }
  }

  fn keyword_stmt(&mut self, keyword: Keyword) -> SyntaxResult<Node<Stmt>> {
    match keyword {
      Keyword::Break => Ok(
        self
          .with_loc(|p| {
            p.advance()?;
            let label = p.break_cont_label("break")?;
            Ok(BreakStmt { label })
          })?
          .into_wrapped(),
      ),
      Keyword::Continue => Ok(
        self
          .with_loc(|p| {
            p.advance()?;
            let label = p.break_cont_label("continue")?;
            Ok(ContinueStmt { label })
          })?
          .into_wrapped(),
      ),
      Keyword::Debugger => Ok(
        self
          .with_loc(|p| {
            p.advance()?;
            p.semicolon()?;
            Ok(DebuggerStmt {})
          })?
          .into_wrapped(),
      ),
      Keyword::Do => Ok(
        self
          .with_loc(|p| {
            p.advance()?;
            let body = p.in_loop_scope(|p| p.stmt())?;
            p.expect_keyword(Keyword::While)?;
            let condition = p.parenthesised()?;
            p.semicolon()?;
            Ok(DoWhileStmt { condition, body })
          })?
          .into_wrapped(),
      ),
      Keyword::For => self.for_stmt(),
      Keyword::Function => Ok(
        self
          .with_loc(|p| {
            p.advance()?;
            // A function statement requires a name.
            let name = match p.cur.data.clone() {
              TokenData::Name(name) => {
                p.advance()?;
                name
              }
              _ => return Err(p.cur.unexpected()),
            };
            let func = p.function_()?;
            Ok(FuncDecl { name, func })
          })?
          .into_wrapped(),
      ),
      Keyword::If => Ok(
        self
          .with_loc(|p| {
            p.advance()?;
            let test = p.parenthesised()?;
            let consequent = p.stmt()?;
            let alternate = if p.cur.is_keyword(Keyword::Else) {
              p.advance()?;
              Some(p.stmt()?)
            } else {
              None
            };
            Ok(IfStmt {
              test,
              consequent,
              alternate,
            })
          })?
          .into_wrapped(),
      ),
      Keyword::Return => Ok(
        self
          .with_loc(|p| {
            if p.in_function == 0 {
              return Err(p.cur.error(SyntaxErrorType::ReturnOutsideFunction));
            }
            p.advance()?;
            let value = if p.cur.is_punc(';') {
              p.advance()?;
              None
            } else if p.can_insert_semicolon() {
              None
            } else {
              let value = p.expression(true, false)?;
              p.semicolon()?;
              Some(value)
            };
            Ok(ReturnStmt { value })
          })?
          .into_wrapped(),
      ),
      Keyword::Switch => self.switch_stmt(),
      Keyword::Throw => Ok(
        self
          .with_loc(|p| {
            p.advance()?;
            let value = p.expression(true, false)?;
            p.semicolon()?;
            Ok(ThrowStmt { value })
          })?
          .into_wrapped(),
      ),
      Keyword::Try => self.try_stmt(),
      Keyword::Var | Keyword::Const => {
        let node = self.var_decl(false)?;
        self.semicolon()?;
        Ok(node.into_wrapped())
      }
      Keyword::While => Ok(
        self
          .with_loc(|p| {
            p.advance()?;
            let condition = p.parenthesised()?;
            let body = p.in_loop_scope(|p| p.stmt())?;
            Ok(WhileStmt { condition, body })
          })?
          .into_wrapped(),
      ),
      Keyword::With => Ok(
        self
          .with_loc(|p| {
            p.advance()?;
            let object = p.parenthesised()?;
            let body = p.stmt()?;
            Ok(WithStmt { object, body })
          })?
          .into_wrapped(),
      ),
      _ => Err(self.cur.unexpected()),
    }
  }

  fn simple_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          let expr = p.expression(true, false)?;
          p.semicolon()?;
          Ok(ExprStmt { expr })
        })?
        .into_wrapped(),
    )
  }

  fn label_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          let name = match p.consume()?.data {
            TokenData::Name(name) => name,
            _ => unreachable!(),
          };
          // The colon.
          p.advance()?;
          p.labels.push(name.clone());
          let start = p.options.exigent_mode.then(|| p.cur.clone());
          let statement = p.stmt()?;
          p.labels.pop();
          if let Some(start) = start {
            if !is_labelable(&statement.stx) {
              return Err(start.unexpected());
            }
          }
          Ok(LabelStmt { name, statement })
        })?
        .into_wrapped(),
    )
  }

  fn break_cont_label(&mut self, what: &'static str) -> SyntaxResult<Option<String>> {
    let label = match &self.cur.data {
      TokenData::Name(name) => Some(name.clone()),
      _ => None,
    };
    if let Some(name) = &label {
      if !self.labels.contains(name) {
        return Err(self.cur.error(SyntaxErrorType::LabelNotFound(name.clone())));
      }
      self.advance()?;
    } else if self.in_loop == 0 {
      return Err(self.cur.error(SyntaxErrorType::NotInsideLoop(what)));
    }
    self.semicolon()?;
    Ok(label)
  }

  pub(crate) fn block_stmt(&mut self) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      p.expect_punc('{')?;
      let body = p.stmt_list('}')?;
      p.expect_punc('}')?;
      Ok(BlockStmt { body })
    })
  }

  pub(crate) fn stmt_list(&mut self, closing: char) -> SyntaxResult<Vec<Node<Stmt>>> {
    let mut body = Vec::new();
    while !self.cur.is_punc(closing) {
      if self.cur.is_eof() {
        return Err(self.cur.unexpected());
      }
      body.push(self.stmt()?);
    }
    Ok(body)
  }

  fn parenthesised(&mut self) -> SyntaxResult<Node<Expr>> {
    self.expect_punc('(')?;
    let expr = self.expression(true, false)?;
    self.expect_punc(')')?;
    Ok(expr)
  }

  /// Parses `var`/`const` declarations starting at the keyword; the trailing
  /// semicolon is the caller's concern so `for` heads can reuse this.
  fn var_decl(&mut self, no_in: bool) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let mode = match p.consume()?.data {
        TokenData::Keyword(Keyword::Const) => VarDeclMode::Const,
        _ => VarDeclMode::Var,
      };
      let mut declarations = Vec::new();
      loop {
        let declarator = p.with_loc(|p| {
          let name = match p.cur.data.clone() {
            TokenData::Name(name) => {
              p.advance()?;
              name
            }
            _ => return Err(p.cur.unexpected()),
          };
          let init = if p.cur.is_op(Operator::Assignment) {
            p.advance()?;
            Some(p.expression(false, no_in)?)
          } else {
            None
          };
          Ok(VarDeclarator { name, init })
        })?;
        declarations.push(declarator);
        if !p.consume_if_punc(',')? {
          break;
        }
      }
      Ok(VarDecl { mode, declarations })
    })
  }

  /// One of:
  /// - `for ( [<expr> | <var decls>]? ; <expr>? ; <expr>? ) <stmt>`
  /// - `for ( [<target> | <var decl>] in <expr> ) <stmt>`
  ///
  /// The head is parsed with `in` demoted so the two forms can be told apart
  /// once the init lands.
  fn for_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let start = self.cur.pos;
    self.advance()?;
    self.expect_punc('(')?;
    let init = if self.cur.is_punc(';') {
      ForInit::None
    } else if self.cur.is_keyword(Keyword::Var) {
      ForInit::Decl(self.var_decl(true)?)
    } else {
      ForInit::Expr(self.expression(true, true)?)
    };
    if !matches!(init, ForInit::None) && self.cur.is_op(Operator::In) {
      self.advance()?;
      let lhs = match init {
        ForInit::Decl(decl) => ForInLhs::Decl(decl),
        ForInit::Expr(expr) => ForInLhs::Target(expr),
        ForInit::None => unreachable!(),
      };
      let rhs = self.expression(true, false)?;
      self.expect_punc(')')?;
      let body = self.in_loop_scope(|p| p.stmt())?;
      let loc = Loc(start, body.loc.1);
      return Ok(Node::new(loc, ForInStmt { lhs, rhs, body }).into_wrapped());
    }
    self.expect_punc(';')?;
    let cond = if self.cur.is_punc(';') {
      None
    } else {
      Some(self.expression(true, false)?)
    };
    self.expect_punc(';')?;
    let post = if self.cur.is_punc(')') {
      None
    } else {
      Some(self.expression(true, false)?)
    };
    self.expect_punc(')')?;
    let body = self.in_loop_scope(|p| p.stmt())?;
    let loc = Loc(start, body.loc.1);
    Ok(
      Node::new(loc, ForStmt {
        init,
        cond,
        post,
        body,
      })
      .into_wrapped(),
    )
  }

  fn switch_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.advance()?;
          let test = p.parenthesised()?;
          p.expect_punc('{')?;
          // `break` is valid directly inside a switch body.
          let branches = p.in_loop_scope(|p| {
            let mut branches: Vec<Node<SwitchBranch>> = Vec::new();
            while !p.cur.is_punc('}') {
              if p.cur.is_eof() {
                return Err(p.cur.unexpected());
              }
              if p.cur.is_keyword(Keyword::Case) {
                let start = p.cur.pos;
                p.advance()?;
                let case = p.expression(true, false)?;
                p.expect_punc(':')?;
                branches.push(Node::new(Loc(start, p.prev_endpos()), SwitchBranch {
                  case: Some(case),
                  body: Vec::new(),
                }));
              } else if p.cur.is_keyword(Keyword::Default) {
                let start = p.cur.pos;
                p.advance()?;
                p.expect_punc(':')?;
                branches.push(Node::new(Loc(start, p.prev_endpos()), SwitchBranch {
                  case: None,
                  body: Vec::new(),
                }));
              } else {
                // Statements before the first case label have no bucket.
                let Some(branch) = branches.last_mut() else {
                  return Err(p.cur.unexpected());
                };
                let stmt = p.stmt()?;
                branch.loc.1 = stmt.loc.1;
                branch.stx.body.push(stmt);
              }
            }
            p.advance()?;
            Ok(branches)
          })?;
          Ok(SwitchStmt { test, branches })
        })?
        .into_wrapped(),
    )
  }

  fn try_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    Ok(
      self
        .with_loc(|p| {
          p.advance()?;
          let wrapped = p.block_stmt()?;
          let mut catch = None;
          if p.cur.is_keyword(Keyword::Catch) {
            catch = Some(p.with_loc(|p| {
              p.advance()?;
              p.expect_punc('(')?;
              let parameter = match p.cur.data.clone() {
                TokenData::Name(name) => {
                  p.advance()?;
                  name
                }
                _ => {
                  return Err(
                    p.cur
                      .error(SyntaxErrorType::ExpectedSyntax("exception variable name")),
                  )
                }
              };
              p.expect_punc(')')?;
              p.expect_punc('{')?;
              let body = p.stmt_list('}')?;
              p.expect_punc('}')?;
              Ok(CatchBlock { parameter, body })
            })?);
          }
          let mut finally = None;
          if p.cur.is_keyword(Keyword::Finally) {
            p.advance()?;
            finally = Some(p.block_stmt()?);
          }
          if catch.is_none() && finally.is_none() {
            return Err(p.cur.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
          }
          Ok(TryStmt {
            wrapped,
            catch,
            finally,
          })
        })?
        .into_wrapped(),
    )
  }
}
