use crate::error::SyntaxErrorType;
use crate::lex::Lexer;
use crate::num::JsNumber;
use crate::operator::Operator;
use crate::token::Atom;
use crate::token::Keyword;
use crate::token::Token;
use crate::token::TokenData;
use crate::token::TokenData::*;
use std::cell::RefCell;
use std::rc::Rc;

fn lex_all(code: &str) -> Vec<Token> {
  let mut lexer = Lexer::new(code);
  let mut tokens = Vec::new();
  loop {
    let t = lexer.next_token().unwrap();
    let eof = t.is_eof();
    tokens.push(t);
    if eof {
      break;
    }
  }
  tokens
}

fn check<const N: usize>(code: &str, expected: [TokenData; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expected {
    let t = lexer.next_token().unwrap();
    assert_eq!(t.data, expected, "in {:?}", code);
  }
  let t = lexer.next_token().unwrap();
  assert_eq!(t.data, Eof, "in {:?}", code);
}

fn check_err(code: &str, expected: SyntaxErrorType) {
  let mut lexer = Lexer::new(code);
  loop {
    match lexer.next_token() {
      Ok(t) if t.is_eof() => panic!("no error in {:?}", code),
      Ok(_) => {}
      Err(err) => {
        assert_eq!(err.typ, expected, "in {:?}", code);
        return;
      }
    }
  }
}

#[test]
fn test_lex_keywords() {
  check("var", [Keyword(Keyword::Var)]);
  check("while", [Keyword(Keyword::While)]);
  check("debugger", [Keyword(Keyword::Debugger)]);
  // `instanceof` and friends are operators, `this` is a plain name, and
  // future reserved words are not reserved.
  check("instanceof", [Operator(Operator::Instanceof)]);
  check("typeof x", [Operator(Operator::Typeof), Name("x".into())]);
  check("this", [Name("this".into())]);
  check("class", [Name("class".into())]);
  check("true null undefined", [
    Atom(Atom::True),
    Atom(Atom::Null),
    Atom(Atom::Undefined),
  ]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Name("h929".into())]);
  check("$_a1", [Name("$_a1".into())]);
  check("привет", [Name("привет".into())]);
  check("名前", [Name("名前".into())]);
  // Keyword prefix does not make a keyword.
  check("varx", [Name("varx".into())]);
}

#[test]
fn test_lex_identifier_escapes() {
  check("\\u0061bc", [Name("abc".into())]);
  check("a\\u0062c", [Name("abc".into())]);
  check_err("\\x61", SyntaxErrorType::ExpectedUnicodeEscape);
  check_err("\\u0020", SyntaxErrorType::InvalidIdentifierEscape);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [Num(JsNumber(1.0))]);
  check("929", [Num(JsNumber(929.0))]);
  check(".5", [Num(JsNumber(0.5))]);
  check("5.", [Num(JsNumber(5.0))]);
  check("1e3", [Num(JsNumber(1000.0))]);
  check("1E+3", [Num(JsNumber(1000.0))]);
  check("25e-2", [Num(JsNumber(0.25))]);
  check("0xff", [Num(JsNumber(255.0))]);
  check("010", [Num(JsNumber(8.0))]);
  check("09", [Num(JsNumber(9.0))]);
  // A `.` not followed by a digit is punctuation.
  check(". 929", [Punc('.'), Num(JsNumber(929.0))]);
  check("1.2.3", [Num(JsNumber(1.2)), Num(JsNumber(0.3))]);
}

#[test]
fn test_lex_invalid_numbers() {
  check_err("0x", SyntaxErrorType::MalformedNumber("0x".into()));
  check_err("0xgg", SyntaxErrorType::MalformedNumber("0xgg".into()));
  check_err("1e", SyntaxErrorType::MalformedNumber("1e".into()));
  check_err("12abc", SyntaxErrorType::MalformedNumber("12abc".into()));
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [Str("hello world".into())]);
  check("\"hello world\"", [Str("hello world".into())]);
  check("'it\\'s'", [Str("it's".into())]);
  check("'a\\nb'", [Str("a\nb".into())]);
  check("'\\t\\b\\v\\f\\r\\0'", [Str("\t\x08\x0b\x0c\r\0".into())]);
  check("'\\x41'", [Str("A".into())]);
  check("'\\u0041'", [Str("A".into())]);
  // Any other escaped character yields itself.
  check("'\\q\\$'", [Str("q$".into())]);
}

#[test]
fn test_lex_unterminated_string_position() {
  let mut lexer = Lexer::new("var x =\n  \"abc");
  for _ in 0..3 {
    lexer.next_token().unwrap();
  }
  let err = lexer.next_token().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnterminatedString);
  // The error points at the opening quote.
  assert_eq!((err.line, err.col, err.pos), (1, 2, 10));
}

#[test]
fn test_lex_invalid_string_escapes() {
  check_err("'\\xgg'", SyntaxErrorType::InvalidCharacterEscape);
  check_err("'\\u12xy'", SyntaxErrorType::InvalidCharacterEscape);
}

#[test]
fn test_lex_operators_longest_match() {
  check(">>>=", [Operator(Operator::AssignmentBitwiseUnsignedRightShift)]);
  check(">>>", [Operator(Operator::BitwiseUnsignedRightShift)]);
  check(">>> =", [
    Operator(Operator::BitwiseUnsignedRightShift),
    Operator(Operator::Assignment),
  ]);
  check("===", [Operator(Operator::StrictEquality)]);
  check("== =", [Operator(Operator::Equality), Operator(Operator::Assignment)]);
  check("a+++b", [
    Name("a".into()),
    Operator(Operator::Increment),
    Operator(Operator::Addition),
    Name("b".into()),
  ]);
}

#[test]
fn test_lex_punctuation() {
  check("[]{}(),;:", [
    Punc('['),
    Punc(']'),
    Punc('{'),
    Punc('}'),
    Punc('('),
    Punc(')'),
    Punc(','),
    Punc(';'),
    Punc(':'),
  ]);
}

#[test]
fn test_lex_regex_vs_division() {
  // After a name, `/` is division.
  check("a / b / c", [
    Name("a".into()),
    Operator(Operator::Division),
    Name("b".into()),
    Operator(Operator::Division),
    Name("c".into()),
  ]);
  // After an operator or expression-position punctuation, `/` begins a regex.
  check("a = /foo/gi", [
    Name("a".into()),
    Operator(Operator::Assignment),
    Regex("foo".into(), "gi".into()),
  ]);
  check("; /ab/", [Punc(';'), Regex("ab".into(), String::new())]);
  check("(/a/)", [Punc('('), Regex("a".into(), String::new()), Punc(')')]);
  check("return /a/", [Keyword(Keyword::Return), Regex("a".into(), String::new())]);
  // A slash inside a character class does not terminate the literal, and
  // escapes pass through raw.
  check("[] / 2", [
    Punc('['),
    Punc(']'),
    Operator(Operator::Division),
    Num(JsNumber(2.0)),
  ]);
  check("= /a[/]b/", [
    Operator(Operator::Assignment),
    Regex("a[/]b".into(), String::new()),
  ]);
  check("= /a\\/b/", [
    Operator(Operator::Assignment),
    Regex("a\\/b".into(), String::new()),
  ]);
}

#[test]
fn test_lex_unterminated_regex() {
  let mut lexer = Lexer::new("= /abc");
  lexer.next_token().unwrap();
  let err = lexer.next_token().unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnterminatedRegex);
  assert_eq!(err.pos, 2);
}

#[test]
fn test_lex_reinterpret_as_regex() {
  let mut lexer = Lexer::new("a\n/re/g.test(s)");
  assert_eq!(lexer.next_token().unwrap().data, Name("a".into()));
  // After a name the slash scans as division.
  let slash = lexer.next_token().unwrap();
  assert_eq!(slash.data, Operator(Operator::Division));
  assert!(slash.nlb);
  // The parser discovers a statement boundary and forces a re-scan.
  let regex = lexer.reinterpret_as_regex().unwrap();
  assert_eq!(regex.data, Regex("re".into(), "g".into()));
  assert_eq!(regex.pos, slash.pos);
  assert_eq!(lexer.next_token().unwrap().data, Punc('.'));
}

#[test]
fn test_lex_comments_are_trivia() {
  let tokens = lex_all("a // one\n/* two\nthree */ b");
  assert_eq!(tokens[0].data, Name("a".into()));
  assert_eq!(tokens[1].data, Name("b".into()));
  let comments = &tokens[1].comments_before;
  assert_eq!(comments.len(), 2);
  assert_eq!(comments[0].data, CommentLine(" one".into()));
  assert_eq!(comments[1].data, CommentBlock(" two\nthree ".into()));
  // Comment tokens carry no trivia of their own.
  assert!(comments.iter().all(|c| c.comments_before.is_empty()));
}

#[test]
fn test_lex_comments_before_eof() {
  let tokens = lex_all("a // trailing");
  let eof = tokens.last().unwrap();
  assert!(eof.is_eof());
  assert_eq!(eof.comments_before.len(), 1);
}

#[test]
fn test_lex_nlb() {
  let tokens = lex_all("a b\nc");
  assert!(!tokens[0].nlb);
  assert!(!tokens[1].nlb);
  assert!(tokens[2].nlb);
}

#[test]
fn test_lex_nlb_through_comments() {
  // A line terminator inside a block comment still counts.
  let tokens = lex_all("a /*\n*/ b");
  assert!(tokens[1].nlb);
  // A single-line comment is terminated by a newline, which counts.
  let tokens = lex_all("a // c\nb");
  assert!(tokens[1].nlb);
  // No newline, no flag.
  let tokens = lex_all("a /* c */ b");
  assert!(!tokens[1].nlb);
}

#[test]
fn test_lex_unterminated_comment() {
  check_err("/* abc", SyntaxErrorType::UnterminatedComment);
}

#[test]
fn test_lex_positions() {
  let tokens = lex_all("var x;\n  x = 1;");
  let expected = [
    // (line, col, pos, endpos)
    (0, 0, 0, 3),
    (0, 4, 4, 5),
    (0, 5, 5, 6),
    (1, 2, 9, 10),
    (1, 4, 11, 12),
    (1, 6, 13, 14),
    (1, 7, 14, 15),
    // eof
    (1, 8, 15, 15),
  ];
  assert_eq!(tokens.len(), expected.len());
  let mut last_pos = 0;
  for (t, (line, col, pos, endpos)) in tokens.iter().zip(expected) {
    assert_eq!((t.line, t.col, t.pos, t.endpos), (line, col, pos, endpos));
    assert!(t.pos >= last_pos);
    last_pos = t.pos;
  }
}

#[test]
fn test_lex_line_ending_normalization() {
  // \r\n, \r, and U+2028/U+2029 all collapse to one \n before offsets are
  // assigned.
  let tokens = lex_all("a\r\nb\rc\u{2028}d");
  assert_eq!(tokens[1].data, Name("b".into()));
  assert_eq!((tokens[1].line, tokens[1].pos), (1, 2));
  assert_eq!((tokens[2].line, tokens[2].pos), (2, 4));
  assert_eq!((tokens[3].line, tokens[3].pos), (3, 6));
}

#[test]
fn test_lex_bom_stripped() {
  let tokens = lex_all("\u{feff}a");
  assert_eq!(tokens[0].data, Name("a".into()));
  assert_eq!(tokens[0].pos, 0);
}

#[test]
fn test_lex_zero_width_whitespace() {
  check("a\u{200b}b", [Name("a".into()), Name("b".into())]);
}

#[test]
fn test_lex_eof_is_sticky() {
  let mut lexer = Lexer::new("a");
  lexer.next_token().unwrap();
  assert!(lexer.next_token().unwrap().is_eof());
  assert!(lexer.next_token().unwrap().is_eof());
}

#[test]
fn test_lex_unexpected_character() {
  check_err("a # b", SyntaxErrorType::UnexpectedCharacter('#'));
}

#[test]
fn test_lex_conditional_comment_warning() {
  let warnings = Rc::new(RefCell::new(Vec::<String>::new()));
  let sink = Rc::clone(&warnings);
  let mut lexer = Lexer::new("/*@cc_on f() @*/ x");
  lexer.set_warnings(move |message| sink.borrow_mut().push(message.to_string()));
  while !lexer.next_token().unwrap().is_eof() {}
  assert_eq!(warnings.borrow().len(), 1);
  assert!(warnings.borrow()[0].contains("conditional comment"));
}

#[test]
fn test_lex_checkpoint_restores_state() {
  let mut lexer = Lexer::new("a = /x/");
  lexer.next_token().unwrap();
  let checkpoint = lexer.checkpoint();
  assert_eq!(lexer.next_token().unwrap().data, Operator(Operator::Assignment));
  assert_eq!(lexer.next_token().unwrap().data, Regex("x".into(), String::new()));
  lexer.apply_checkpoint(checkpoint);
  assert_eq!(lexer.next_token().unwrap().data, Operator(Operator::Assignment));
  assert_eq!(lexer.next_token().unwrap().data, Regex("x".into(), String::new()));
}
