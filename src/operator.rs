use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Every operator lexeme, covering both symbolic operators and the six word
/// operators. Whether an occurrence is unary, binary, or assignment is decided
/// by the parser, not the token.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum Operator {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentMultiplication,
  AssignmentRemainder,
  AssignmentSubtraction,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Conditional,
  Decrement,
  Delete,
  Division,
  Equality,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Increment,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  Multiplication,
  New,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  Void,
}

impl Operator {
  #[rustfmt::skip]
  pub const ALL: [Operator; 44] = [
    Operator::Addition, Operator::Assignment, Operator::AssignmentAddition,
    Operator::AssignmentBitwiseAnd, Operator::AssignmentBitwiseLeftShift,
    Operator::AssignmentBitwiseOr, Operator::AssignmentBitwiseRightShift,
    Operator::AssignmentBitwiseUnsignedRightShift, Operator::AssignmentBitwiseXor,
    Operator::AssignmentDivision, Operator::AssignmentMultiplication,
    Operator::AssignmentRemainder, Operator::AssignmentSubtraction,
    Operator::BitwiseAnd, Operator::BitwiseLeftShift, Operator::BitwiseNot,
    Operator::BitwiseOr, Operator::BitwiseRightShift, Operator::BitwiseUnsignedRightShift,
    Operator::BitwiseXor, Operator::Conditional, Operator::Decrement, Operator::Delete,
    Operator::Division, Operator::Equality, Operator::GreaterThan,
    Operator::GreaterThanOrEqual, Operator::In, Operator::Increment, Operator::Inequality,
    Operator::Instanceof, Operator::LessThan, Operator::LessThanOrEqual,
    Operator::LogicalAnd, Operator::LogicalNot, Operator::LogicalOr,
    Operator::Multiplication, Operator::New, Operator::Remainder, Operator::StrictEquality,
    Operator::StrictInequality, Operator::Subtraction, Operator::Typeof, Operator::Void,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Operator::Addition => "+",
      Operator::Assignment => "=",
      Operator::AssignmentAddition => "+=",
      Operator::AssignmentBitwiseAnd => "&=",
      Operator::AssignmentBitwiseLeftShift => "<<=",
      Operator::AssignmentBitwiseOr => "|=",
      Operator::AssignmentBitwiseRightShift => ">>=",
      Operator::AssignmentBitwiseUnsignedRightShift => ">>>=",
      Operator::AssignmentBitwiseXor => "^=",
      Operator::AssignmentDivision => "/=",
      Operator::AssignmentMultiplication => "*=",
      Operator::AssignmentRemainder => "%=",
      Operator::AssignmentSubtraction => "-=",
      Operator::BitwiseAnd => "&",
      Operator::BitwiseLeftShift => "<<",
      Operator::BitwiseNot => "~",
      Operator::BitwiseOr => "|",
      Operator::BitwiseRightShift => ">>",
      Operator::BitwiseUnsignedRightShift => ">>>",
      Operator::BitwiseXor => "^",
      Operator::Conditional => "?",
      Operator::Decrement => "--",
      Operator::Delete => "delete",
      Operator::Division => "/",
      Operator::Equality => "==",
      Operator::GreaterThan => ">",
      Operator::GreaterThanOrEqual => ">=",
      Operator::In => "in",
      Operator::Increment => "++",
      Operator::Inequality => "!=",
      Operator::Instanceof => "instanceof",
      Operator::LessThan => "<",
      Operator::LessThanOrEqual => "<=",
      Operator::LogicalAnd => "&&",
      Operator::LogicalNot => "!",
      Operator::LogicalOr => "||",
      Operator::Multiplication => "*",
      Operator::New => "new",
      Operator::Remainder => "%",
      Operator::StrictEquality => "===",
      Operator::StrictInequality => "!==",
      Operator::Subtraction => "-",
      Operator::Typeof => "typeof",
      Operator::Void => "void",
    }
  }
}

pub static OPERATORS_MAPPING: Lazy<HashMap<&'static str, Operator>> =
  Lazy::new(|| Operator::ALL.iter().map(|&op| (op.as_str(), op)).collect());

/// Binary operator precedence, lowest to highest. Operators absent from this
/// table never appear as binary operators.
#[rustfmt::skip]
pub static PRECEDENCE: Lazy<HashMap<Operator, u8>> = Lazy::new(|| {
  let mut map = HashMap::<Operator, u8>::new();
  map.insert(Operator::LogicalOr, 1);
  map.insert(Operator::LogicalAnd, 2);
  map.insert(Operator::BitwiseOr, 3);
  map.insert(Operator::BitwiseXor, 4);
  map.insert(Operator::BitwiseAnd, 5);
  map.insert(Operator::Equality, 6);
  map.insert(Operator::StrictEquality, 6);
  map.insert(Operator::Inequality, 6);
  map.insert(Operator::StrictInequality, 6);
  map.insert(Operator::LessThan, 7);
  map.insert(Operator::GreaterThan, 7);
  map.insert(Operator::LessThanOrEqual, 7);
  map.insert(Operator::GreaterThanOrEqual, 7);
  map.insert(Operator::In, 7);
  map.insert(Operator::Instanceof, 7);
  map.insert(Operator::BitwiseRightShift, 8);
  map.insert(Operator::BitwiseLeftShift, 8);
  map.insert(Operator::BitwiseUnsignedRightShift, 8);
  map.insert(Operator::Addition, 9);
  map.insert(Operator::Subtraction, 9);
  map.insert(Operator::Multiplication, 10);
  map.insert(Operator::Division, 10);
  map.insert(Operator::Remainder, 10);
  map
});

pub static UNARY_PREFIX: Lazy<HashSet<Operator>> = Lazy::new(|| {
  let mut set = HashSet::<Operator>::new();
  set.insert(Operator::Typeof);
  set.insert(Operator::Void);
  set.insert(Operator::Delete);
  set.insert(Operator::Decrement);
  set.insert(Operator::Increment);
  set.insert(Operator::LogicalNot);
  set.insert(Operator::BitwiseNot);
  set.insert(Operator::Subtraction);
  set.insert(Operator::Addition);
  set
});

pub static UNARY_POSTFIX: Lazy<HashSet<Operator>> = Lazy::new(|| {
  let mut set = HashSet::<Operator>::new();
  set.insert(Operator::Increment);
  set.insert(Operator::Decrement);
  set
});

/// Assignment operators mapped to their stripped binary operator; plain `=`
/// maps to `None`.
#[rustfmt::skip]
pub static ASSIGNMENT: Lazy<HashMap<Operator, Option<Operator>>> = Lazy::new(|| {
  let mut map = HashMap::<Operator, Option<Operator>>::new();
  map.insert(Operator::Assignment, None);
  map.insert(Operator::AssignmentAddition, Some(Operator::Addition));
  map.insert(Operator::AssignmentSubtraction, Some(Operator::Subtraction));
  map.insert(Operator::AssignmentMultiplication, Some(Operator::Multiplication));
  map.insert(Operator::AssignmentDivision, Some(Operator::Division));
  map.insert(Operator::AssignmentRemainder, Some(Operator::Remainder));
  map.insert(Operator::AssignmentBitwiseLeftShift, Some(Operator::BitwiseLeftShift));
  map.insert(Operator::AssignmentBitwiseRightShift, Some(Operator::BitwiseRightShift));
  map.insert(Operator::AssignmentBitwiseUnsignedRightShift, Some(Operator::BitwiseUnsignedRightShift));
  map.insert(Operator::AssignmentBitwiseAnd, Some(Operator::BitwiseAnd));
  map.insert(Operator::AssignmentBitwiseOr, Some(Operator::BitwiseOr));
  map.insert(Operator::AssignmentBitwiseXor, Some(Operator::BitwiseXor));
  map
});
