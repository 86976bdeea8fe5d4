use super::func::Func;
use super::node::Node;
use crate::num::JsNumber;
use crate::operator::Operator;
use crate::token::Atom;
use derive_more::derive::From;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// Each variant wraps Node<T> so visitors see Node<T> rather than just T.
#[derive(Debug, Drive, DriveMut, From, Serialize)]
#[serde(tag = "$t")]
pub enum Expr {
  Assign(Node<AssignExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  LitArr(Node<LitArrExpr>),
  LitAtom(Node<LitAtomExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitRegex(Node<LitRegexExpr>),
  LitStr(Node<LitStrExpr>),
  Member(Node<MemberExpr>),
  New(Node<NewExpr>),
  Seq(Node<SeqExpr>),
  Unary(Node<UnaryExpr>),
  UnaryPostfix(Node<UnaryPostfixExpr>),
}

/// `None` is a plain `=`; a compound assignment carries its stripped binary
/// operator (`+=` stores `Addition`).
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct AssignExpr {
  #[drive(skip)]
  pub operator: Option<Operator>,
  pub target: Node<Expr>,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: Operator,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ComputedMemberExpr {
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncExpr {
  #[drive(skip)]
  pub name: Option<String>,
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

/// Array literal. Elisions appear as `undefined` atom elements.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitAtomExpr {
  #[drive(skip)]
  pub value: Atom,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub value: JsNumber,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub enum ObjVal {
  Prop(Node<Expr>),
  Getter(Node<Func>),
  Setter(Node<Func>),
}

/// Numeric keys are normalized to their rendered form, string keys to their
/// decoded value; the distinction is not preserved.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjMember {
  #[drive(skip)]
  pub key: String,
  pub val: ObjVal,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitRegexExpr {
  #[drive(skip)]
  pub pattern: String,
  #[drive(skip)]
  pub flags: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MemberExpr {
  pub object: Node<Expr>,
  #[drive(skip)]
  pub property: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct NewExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<Expr>>,
}

/// Comma expressions fold right-nested: `a, b, c` is `Seq(a, Seq(b, c))`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct SeqExpr {
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: Operator,
  pub argument: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryPostfixExpr {
  #[drive(skip)]
  pub operator: Operator,
  pub argument: Node<Expr>,
}
