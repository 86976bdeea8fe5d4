use super::Parser;
use crate::ast::expr::AssignExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::LitArrExpr;
use crate::ast::expr::LitAtomExpr;
use crate::ast::expr::LitNumExpr;
use crate::ast::expr::LitObjExpr;
use crate::ast::expr::LitRegexExpr;
use crate::ast::expr::LitStrExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::ObjMember;
use crate::ast::expr::ObjVal;
use crate::ast::expr::SeqExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::operator::Operator;
use crate::operator::ASSIGNMENT;
use crate::operator::PRECEDENCE;
use crate::operator::UNARY_PREFIX;
use crate::token::Atom;
use crate::token::Keyword;
use crate::token::TokenData;
use std::mem;

impl Parser {
  /// Parses an assignment expression, optionally folding `,` sequences. With
  /// `no_in` set the `in` operator is demoted (inside `for` heads).
  pub(crate) fn expression(&mut self, commas: bool, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let start = self.cur.pos;
    let expr = self.maybe_assign(no_in)?;
    if commas && self.cur.is_punc(',') {
      self.advance()?;
      let right = self.expression(true, no_in)?;
      let loc = Loc(start, right.loc.1);
      return Ok(Node::new(loc, SeqExpr { left: expr, right }).into_wrapped());
    }
    Ok(expr)
  }

  /// Lenient mode treats every expression as potentially assignable so that
  /// downstream tools can handle transformed inputs; exigent mode admits
  /// member accesses, `new`, calls, and names other than `this`.
  fn is_assignable(&self, expr: &Node<Expr>) -> bool {
    if !self.options.exigent_mode {
      return true;
    }
    match expr.stx.as_ref() {
      Expr::Member(_) | Expr::ComputedMember(_) | Expr::New(_) | Expr::Call(_) => true,
      Expr::Id(id) => id.stx.name != "this",
      _ => false,
    }
  }

  fn maybe_assign(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let left = self.maybe_conditional(no_in)?;
    if let TokenData::Operator(op) = self.cur.data {
      if let Some(&stripped) = ASSIGNMENT.get(&op) {
        if !self.is_assignable(&left) {
          return Err(self.cur.error(SyntaxErrorType::InvalidAssigmentTarget));
        }
        self.advance()?;
        // Right-associative.
        let value = self.maybe_assign(no_in)?;
        let loc = Loc(left.loc.0, value.loc.1);
        return Ok(
          Node::new(loc, AssignExpr {
            operator: stripped,
            target: left,
            value,
          })
          .into_wrapped(),
        );
      }
    }
    Ok(left)
  }

  fn maybe_conditional(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let expr = self.expr_ops(no_in)?;
    if self.cur.is_op(Operator::Conditional) {
      self.advance()?;
      let consequent = self.expression(false, false)?;
      self.expect_punc(':')?;
      let alternate = self.expression(false, no_in)?;
      let loc = Loc(expr.loc.0, alternate.loc.1);
      return Ok(
        Node::new(loc, CondExpr {
          test: expr,
          consequent,
          alternate,
        })
        .into_wrapped(),
      );
    }
    Ok(expr)
  }

  fn expr_ops(&mut self, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let left = self.maybe_unary(true)?;
    self.expr_op(left, 0, no_in)
  }

  /// Precedence climbing over the binary operator table; left-associative
  /// throughout.
  fn expr_op(&mut self, left: Node<Expr>, min_prec: u8, no_in: bool) -> SyntaxResult<Node<Expr>> {
    let op = match self.cur.data {
      TokenData::Operator(op) if !(no_in && op == Operator::In) => Some(op),
      _ => None,
    };
    if let Some(op) = op {
      if let Some(&prec) = PRECEDENCE.get(&op) {
        if prec > min_prec {
          self.advance()?;
          let operand = self.maybe_unary(true)?;
          let right = self.expr_op(operand, prec, no_in)?;
          let loc = Loc(left.loc.0, right.loc.1);
          let node = Node::new(loc, BinaryExpr {
            operator: op,
            left,
            right,
          })
          .into_wrapped();
          return self.expr_op(node, min_prec, no_in);
        }
      }
    }
    Ok(left)
  }

  fn maybe_unary(&mut self, allow_calls: bool) -> SyntaxResult<Node<Expr>> {
    if let TokenData::Operator(op) = self.cur.data {
      if UNARY_PREFIX.contains(&op) {
        let start = self.cur.pos;
        self.advance()?;
        let argument = self.maybe_unary(allow_calls)?;
        if (op == Operator::Increment || op == Operator::Decrement) && !self.is_assignable(&argument)
        {
          return Err(self.cur.error(SyntaxErrorType::InvalidUnaryOperand(op)));
        }
        let loc = Loc(start, argument.loc.1);
        return Ok(
          Node::new(loc, UnaryExpr {
            operator: op,
            argument,
          })
          .into_wrapped(),
        );
      }
    }
    self.expr_atom(allow_calls)
  }

  /// The left-associative chain of `.`, `[...]`, call, and postfix `++`/`--`
  /// subscripts appended to an atom.
  fn subscripts(&mut self, expr: Node<Expr>, allow_calls: bool) -> SyntaxResult<Node<Expr>> {
    let mut expr = expr;
    loop {
      if self.cur.is_punc('.') {
        self.advance()?;
        let property = self.as_name()?;
        let loc = Loc(expr.loc.0, self.prev_endpos());
        expr = Node::new(loc, MemberExpr {
          object: expr,
          property,
        })
        .into_wrapped();
      } else if self.cur.is_punc('[') {
        self.advance()?;
        let member = self.expression(true, false)?;
        self.expect_punc(']')?;
        let loc = Loc(expr.loc.0, self.prev_endpos());
        expr = Node::new(loc, ComputedMemberExpr {
          object: expr,
          member,
        })
        .into_wrapped();
      } else if allow_calls && self.cur.is_punc('(') {
        self.advance()?;
        let arguments = self.expr_list(')', false, false)?;
        let loc = Loc(expr.loc.0, self.prev_endpos());
        expr = Node::new(loc, CallExpr {
          callee: expr,
          arguments,
        })
        .into_wrapped();
      } else if allow_calls
        && (self.cur.is_op(Operator::Increment) || self.cur.is_op(Operator::Decrement))
      {
        let op = match self.cur.data {
          TokenData::Operator(op) => op,
          _ => unreachable!(),
        };
        if !self.is_assignable(&expr) {
          return Err(self.cur.error(SyntaxErrorType::InvalidUnaryOperand(op)));
        }
        let loc = Loc(expr.loc.0, self.cur.endpos);
        self.advance()?;
        // No further subscripts after a postfix operator.
        return Ok(
          Node::new(loc, UnaryPostfixExpr {
            operator: op,
            argument: expr,
          })
          .into_wrapped(),
        );
      } else {
        return Ok(expr);
      }
    }
  }

  /// Parses a comma list of expressions up to and including `closing`. Array
  /// literals tolerate a trailing comma in lenient mode and turn elisions into
  /// `undefined` atoms.
  fn expr_list(
    &mut self,
    closing: char,
    allow_trailing_comma: bool,
    allow_empty: bool,
  ) -> SyntaxResult<Vec<Node<Expr>>> {
    let mut first = true;
    let mut exprs = Vec::new();
    while !self.cur.is_punc(closing) {
      if first {
        first = false;
      } else {
        self.expect_punc(',')?;
      }
      if allow_trailing_comma && self.cur.is_punc(closing) {
        break;
      }
      if allow_empty && self.cur.is_punc(',') {
        let pos = self.cur.pos;
        exprs.push(Node::new(Loc(pos, pos), LitAtomExpr {
          value: Atom::Undefined,
        })
        .into_wrapped());
      } else {
        exprs.push(self.expression(false, false)?);
      }
    }
    self.advance()?;
    Ok(exprs)
  }

  /// Consumes a name, keyword, operator word, or atom as a plain identifier
  /// string (property names are never reserved).
  fn as_name(&mut self) -> SyntaxResult<String> {
    let name = match &self.cur.data {
      TokenData::Name(name) => name.clone(),
      TokenData::Operator(op) => op.as_str().to_string(),
      TokenData::Keyword(keyword) => keyword.as_str().to_string(),
      TokenData::Atom(atom) => atom.as_str().to_string(),
      _ => return Err(self.cur.unexpected()),
    };
    self.advance()?;
    Ok(name)
  }

  fn as_property_name(&mut self) -> SyntaxResult<String> {
    match self.cur.data.clone() {
      TokenData::Num(value) => {
        self.advance()?;
        Ok(value.to_string())
      }
      TokenData::Str(value) => {
        self.advance()?;
        Ok(value)
      }
      _ => self.as_name(),
    }
  }

  /// Parses the parameter list and body shared by function declarations,
  /// function expressions, and accessors. `in_loop` does not cross the
  /// function boundary.
  pub(crate) fn function_(&mut self) -> SyntaxResult<Node<Func>> {
    let start = self.embed_start();
    let mut node = self.with_loc(|p| {
      p.expect_punc('(')?;
      let mut parameters = Vec::new();
      let mut first = true;
      while !p.cur.is_punc(')') {
        if first {
          first = false;
        } else {
          p.expect_punc(',')?;
        }
        match p.cur.data.clone() {
          TokenData::Name(name) => {
            p.advance()?;
            parameters.push(name);
          }
          _ => return Err(p.cur.unexpected()),
        }
      }
      p.advance()?;
      p.expect_punc('{')?;
      p.in_function += 1;
      let loop_save = mem::replace(&mut p.in_loop, 0);
      let body = p.stmt_list('}')?;
      p.expect_punc('}')?;
      p.in_function -= 1;
      p.in_loop = loop_save;
      Ok(Func { parameters, body })
    })?;
    self.embed_node_tokens(start, &mut node);
    Ok(node)
  }

  fn new_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let start = self.cur.pos;
    self.advance()?;
    // Calls don't bind to the callee; `new a()` is the argument list.
    let callee = self.expr_atom(false)?;
    let mut arguments = Vec::new();
    if self.cur.is_punc('(') {
      self.advance()?;
      arguments = self.expr_list(')', false, false)?;
    }
    let loc = Loc(start, self.prev_endpos());
    let node = Node::new(loc, NewExpr { callee, arguments }).into_wrapped();
    self.subscripts(node, true)
  }

  fn object_lit(&mut self) -> SyntaxResult<Node<LitObjExpr>> {
    self.with_loc(|p| {
      p.advance()?;
      let mut first = true;
      let mut members = Vec::new();
      while !p.cur.is_punc('}') {
        if first {
          first = false;
        } else {
          p.expect_punc(',')?;
        }
        if !p.options.exigent_mode && p.cur.is_punc('}') {
          // Trailing comma.
          break;
        }
        let member = p.with_loc(|p| {
          let is_name_key = matches!(p.cur.data, TokenData::Name(_));
          let key = p.as_property_name()?;
          // `get`/`set` followed by anything but `:` begins an accessor.
          if is_name_key && (key == "get" || key == "set") && !p.cur.is_punc(':') {
            let accessor_key = p.as_name()?;
            let func = p.function_()?;
            let val = if key == "get" {
              ObjVal::Getter(func)
            } else {
              ObjVal::Setter(func)
            };
            return Ok(ObjMember {
              key: accessor_key,
              val,
            });
          }
          p.expect_punc(':')?;
          let value = p.expression(false, false)?;
          Ok(ObjMember {
            key,
            val: ObjVal::Prop(value),
          })
        })?;
        members.push(member);
      }
      p.advance()?;
      Ok(LitObjExpr { members })
    })
  }

  fn expr_atom(&mut self, allow_calls: bool) -> SyntaxResult<Node<Expr>> {
    if self.cur.is_op(Operator::New) {
      return self.new_expr();
    }
    match self.cur.data.clone() {
      TokenData::Punc('(') => {
        self.advance()?;
        let expr = self.expression(true, false)?;
        self.expect_punc(')')?;
        self.subscripts(expr, allow_calls)
      }
      TokenData::Punc('[') => {
        let node = self.with_loc(|p| {
          p.advance()?;
          let elements = p.expr_list(']', !p.options.exigent_mode, true)?;
          Ok(LitArrExpr { elements })
        })?;
        self.subscripts(node.into_wrapped(), allow_calls)
      }
      TokenData::Punc('{') => {
        let node = self.object_lit()?;
        self.subscripts(node.into_wrapped(), allow_calls)
      }
      TokenData::Keyword(Keyword::Function) => {
        let node = self.with_loc(|p| {
          p.advance()?;
          let name = match p.cur.data.clone() {
            TokenData::Name(name) => {
              p.advance()?;
              Some(name)
            }
            _ => None,
          };
          let func = p.function_()?;
          Ok(FuncExpr { name, func })
        })?;
        self.subscripts(node.into_wrapped(), allow_calls)
      }
      TokenData::Atom(value) => {
        let node = self.with_loc(|p| {
          p.advance()?;
          Ok(LitAtomExpr { value })
        })?;
        self.subscripts(node.into_wrapped(), allow_calls)
      }
      TokenData::Num(value) => {
        let node = self.with_loc(|p| {
          p.advance()?;
          Ok(LitNumExpr { value })
        })?;
        self.subscripts(node.into_wrapped(), allow_calls)
      }
      TokenData::Str(value) => {
        let node = self.with_loc(|p| {
          p.advance()?;
          Ok(LitStrExpr { value })
        })?;
        self.subscripts(node.into_wrapped(), allow_calls)
      }
      TokenData::Regex(pattern, flags) => {
        let node = self.with_loc(|p| {
          p.advance()?;
          Ok(LitRegexExpr { pattern, flags })
        })?;
        self.subscripts(node.into_wrapped(), allow_calls)
      }
      TokenData::Name(name) => {
        let node = self.with_loc(|p| {
          p.advance()?;
          Ok(IdExpr { name })
        })?;
        self.subscripts(node.into_wrapped(), allow_calls)
      }
      _ => Err(self.cur.unexpected()),
    }
  }
}
