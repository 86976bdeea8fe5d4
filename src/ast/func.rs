use super::node::Node;
use super::stmt::Stmt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// This common type exists so function declarations, function expressions, and
// object accessors are one shape to match on downstream.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub parameters: Vec<String>,
  pub body: Vec<Node<Stmt>>,
}
