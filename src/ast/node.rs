use crate::loc::Loc;
use crate::token::Token;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;

/// The start and end tokens of a node, embedded when the parser runs with
/// `embed_tokens` so downstream tooling keeps the exact source span and the
/// trivia attached to it.
#[derive(Clone, Debug)]
pub struct NodeTokens {
  pub start: Token,
  pub end: Token,
}

#[derive(Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  #[drive(skip)]
  pub loc: Loc,
  #[drive(skip)]
  pub tokens: Option<Box<NodeTokens>>,
  pub stx: Box<S>,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      tokens: None,
      stx: Box::new(stx),
    }
  }

  /// Moves Node<S> into Node<T> where T is an enum with a variant wrapping
  /// Node<S> (e.g. `BlockStmt => Stmt::Block(Node<BlockStmt>)`). The wrapper
  /// keeps the same location.
  pub fn into_wrapped<T: From<Node<S>> + Drive + DriveMut>(self) -> Node<T> {
    let loc = self.loc;
    Node {
      loc,
      tokens: None,
      stx: Box::new(T::from(self)),
    }
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

// A node serializes as its syntax alone; locations and embedded tokens are
// in-memory concerns.
impl<S: Serialize + Drive + DriveMut> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    self.stx.serialize(serializer)
  }
}
