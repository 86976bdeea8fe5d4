use crate::char::is_identifier_char;
use crate::char::is_identifier_start;
use crate::char::OPERATOR_CHARS;
use crate::char::PUNC_BEFORE_EXPRESSION;
use crate::char::PUNC_CHARS;
use crate::char::WHITESPACE;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::num::parse_number_literal;
use crate::num::JsNumber;
use crate::operator::Operator;
use crate::operator::OPERATORS_MAPPING;
use crate::operator::UNARY_POSTFIX;
use crate::token::classify_word;
use crate::token::Token;
use crate::token::TokenData;
use crate::token::KEYWORDS_BEFORE_EXPRESSION;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use once_cell::sync::Lazy;
use std::mem;

#[cfg(test)]
mod tests;

struct PatternMatcher {
  patterns: Vec<Operator>,
  matcher: AhoCorasick,
}

impl PatternMatcher {
  fn new(patterns: Vec<(Operator, &'static str)>) -> Self {
    let (ops, syns): (Vec<_>, Vec<_>) = patterns.into_iter().unzip();
    let matcher = AhoCorasickBuilder::new()
      .start_kind(StartKind::Anchored)
      .kind(Some(AhoCorasickKind::DFA))
      .match_kind(MatchKind::LeftmostLongest)
      .build(syns)
      .unwrap();
    PatternMatcher {
      patterns: ops,
      matcher,
    }
  }

  /// Greedy longest-match at the start of `haystack`.
  fn find(&self, haystack: &str) -> Option<(Operator, usize)> {
    self
      .matcher
      .find(Input::new(haystack).anchored(Anchored::Yes))
      .map(|m| (self.patterns[m.pattern().as_usize()], m.end()))
  }
}

static OPERATOR_MATCHER: Lazy<PatternMatcher> = Lazy::new(|| {
  PatternMatcher::new(
    OPERATORS_MAPPING
      .iter()
      .map(|(&syn, &op)| (op, syn))
      .collect(),
  )
});

type WarningSink = Box<dyn FnMut(&str)>;

/// A snapshot of the entire scanner state record. Restoring one permits
/// speculative lookahead without replaying already-consumed source.
#[derive(Clone)]
pub struct LexerCheckpoint {
  pos: usize,
  line: usize,
  col: usize,
  tokpos: usize,
  tokline: usize,
  tokcol: usize,
  newline_before: bool,
  regex_allowed: bool,
  comments_before: Vec<Token>,
}

/// A demand-driven scanner. Each `next_token` call returns the next token;
/// end of input yields an `Eof` token rather than an error.
pub struct Lexer {
  source: String,
  pos: usize,
  line: usize,
  col: usize,
  // Start-of-token snapshots, valid for the most recently emitted token.
  tokpos: usize,
  tokline: usize,
  tokcol: usize,
  newline_before: bool,
  regex_allowed: bool,
  comments_before: Vec<Token>,
  warnings: Option<WarningSink>,
}

impl Lexer {
  pub fn new(source: &str) -> Lexer {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut text = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
      match c {
        '\r' => {
          if chars.peek() == Some(&'\n') {
            chars.next();
          }
          text.push('\n');
        }
        '\u{2028}' | '\u{2029}' => text.push('\n'),
        c => text.push(c),
      }
    }
    Lexer {
      source: text,
      pos: 0,
      line: 0,
      col: 0,
      tokpos: 0,
      tokline: 0,
      tokcol: 0,
      newline_before: false,
      regex_allowed: false,
      comments_before: Vec::new(),
      warnings: None,
    }
  }

  /// Installs the callback invoked for conditional-compilation comments.
  pub fn set_warnings(&mut self, sink: impl FnMut(&str) + 'static) {
    self.warnings = Some(Box::new(sink));
  }

  pub fn checkpoint(&self) -> LexerCheckpoint {
    LexerCheckpoint {
      pos: self.pos,
      line: self.line,
      col: self.col,
      tokpos: self.tokpos,
      tokline: self.tokline,
      tokcol: self.tokcol,
      newline_before: self.newline_before,
      regex_allowed: self.regex_allowed,
      comments_before: self.comments_before.clone(),
    }
  }

  pub fn apply_checkpoint(&mut self, checkpoint: LexerCheckpoint) {
    self.pos = checkpoint.pos;
    self.line = checkpoint.line;
    self.col = checkpoint.col;
    self.tokpos = checkpoint.tokpos;
    self.tokline = checkpoint.tokline;
    self.tokcol = checkpoint.tokcol;
    self.newline_before = checkpoint.newline_before;
    self.regex_allowed = checkpoint.regex_allowed;
    self.comments_before = checkpoint.comments_before;
  }

  fn peek_ch(&self) -> Option<char> {
    self.source[self.pos..].chars().next()
  }

  fn peek_at(&self, n: usize) -> Option<char> {
    self.source[self.pos..].chars().nth(n)
  }

  /// Advances one character, maintaining line/col. Line terminators inside
  /// string literals bump the line counter without making the sticky
  /// newline-before flag observable to the next token.
  fn forward(&mut self, in_string: bool) -> Option<char> {
    let c = self.peek_ch()?;
    self.pos += c.len_utf8();
    if c == '\n' {
      if !in_string {
        self.newline_before = true;
      }
      self.line += 1;
      self.col = 0;
    } else {
      self.col += 1;
    }
    Some(c)
  }

  /// Bulk advance over a run known to be ASCII with no line terminators.
  fn advance_ascii(&mut self, n: usize) {
    self.pos += n;
    self.col += n;
  }

  fn start_token(&mut self) {
    self.tokpos = self.pos;
    self.tokline = self.line;
    self.tokcol = self.col;
  }

  /// Builds an error located at the start of the token being scanned.
  fn error_here(&self, typ: SyntaxErrorType) -> SyntaxError {
    SyntaxError::new(typ, self.tokline, self.tokcol, self.tokpos)
  }

  fn warn(&mut self, message: &str) {
    if let Some(sink) = &mut self.warnings {
      sink(message);
    }
  }

  /// Materializes a token from the current start snapshot. Non-comment tokens
  /// take ownership of the trivia buffer, clear the newline flag, and update
  /// the regex-allowed state; comment tokens leave all of that untouched.
  fn token(&mut self, data: TokenData) -> Token {
    let is_comment = matches!(
      data,
      TokenData::CommentLine(_) | TokenData::CommentBlock(_)
    );
    if !is_comment {
      self.regex_allowed = match &data {
        TokenData::Operator(op) => !UNARY_POSTFIX.contains(op),
        TokenData::Keyword(kw) => KEYWORDS_BEFORE_EXPRESSION.contains(kw),
        TokenData::Punc(c) => PUNC_BEFORE_EXPRESSION.has(*c),
        _ => false,
      };
    }
    let mut token = Token {
      data,
      line: self.tokline,
      col: self.tokcol,
      pos: self.tokpos,
      endpos: self.pos,
      nlb: self.newline_before,
      comments_before: Vec::new(),
    };
    if !is_comment {
      token.comments_before = mem::take(&mut self.comments_before);
      for comment in &token.comments_before {
        let text = match &comment.data {
          TokenData::CommentLine(text) | TokenData::CommentBlock(text) => text,
          _ => continue,
        };
        if text
          .get(..6)
          .is_some_and(|prefix| prefix.eq_ignore_ascii_case("@cc_on"))
        {
          let message = format!("Found conditional comment at line {}", comment.line);
          self.warn(&message);
        }
      }
      self.newline_before = false;
    }
    token
  }

  fn skip_whitespace(&mut self) {
    while let Some(c) = self.peek_ch() {
      if !WHITESPACE.has(c) {
        break;
      }
      self.forward(false);
    }
  }

  pub fn next_token(&mut self) -> SyntaxResult<Token> {
    loop {
      self.skip_whitespace();
      self.start_token();
      let Some(c) = self.peek_ch() else {
        return Ok(self.token(TokenData::Eof));
      };
      if c.is_ascii_digit() {
        return self.read_num(false);
      }
      if c == '"' || c == '\'' {
        return self.read_string();
      }
      if c == '.' {
        return self.handle_dot();
      }
      if c == '/' {
        match self.handle_slash()? {
          Some(token) => return Ok(token),
          // A comment was buffered; keep scanning for a significant token.
          None => continue,
        }
      }
      if OPERATOR_CHARS.has(c) {
        return self.read_operator();
      }
      if PUNC_CHARS.has(c) {
        self.forward(false);
        return Ok(self.token(TokenData::Punc(c)));
      }
      if c == '\\' || is_identifier_start(c) {
        return self.read_word();
      }
      return Err(self.error_here(SyntaxErrorType::UnexpectedCharacter(c)));
    }
  }

  /// Rewinds to the start of the most recently emitted token and scans a
  /// regular expression literal there. The parser calls this when it discovers
  /// that a `/` or `/=` operator token actually begins an expression-position
  /// statement.
  pub fn reinterpret_as_regex(&mut self) -> SyntaxResult<Token> {
    self.pos = self.tokpos;
    self.line = self.tokline;
    self.col = self.tokcol;
    self.read_regex()
  }

  fn handle_dot(&mut self) -> SyntaxResult<Token> {
    if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
      self.forward(false);
      return self.read_num(true);
    }
    self.forward(false);
    Ok(self.token(TokenData::Punc('.')))
  }

  /// A `/` begins a comment, a regular expression literal (when the previous
  /// token permits one), or a division operator.
  fn handle_slash(&mut self) -> SyntaxResult<Option<Token>> {
    match self.peek_at(1) {
      Some('/') => {
        let comment = self.read_line_comment();
        self.comments_before.push(comment);
        Ok(None)
      }
      Some('*') => {
        let comment = self.read_multiline_comment()?;
        self.comments_before.push(comment);
        Ok(None)
      }
      _ => {
        if self.regex_allowed {
          self.read_regex().map(Some)
        } else {
          self.read_operator().map(Some)
        }
      }
    }
  }

  fn read_line_comment(&mut self) -> Token {
    self.advance_ascii(2);
    let mut text = String::new();
    while let Some(c) = self.peek_ch() {
      if c == '\n' {
        break;
      }
      text.push(c);
      self.forward(false);
    }
    self.token(TokenData::CommentLine(text))
  }

  fn read_multiline_comment(&mut self) -> SyntaxResult<Token> {
    self.advance_ascii(2);
    let mut text = String::new();
    loop {
      if self.source[self.pos..].starts_with("*/") {
        self.advance_ascii(2);
        break;
      }
      match self.forward(false) {
        Some(c) => text.push(c),
        None => return Err(self.error_here(SyntaxErrorType::UnterminatedComment)),
      }
    }
    Ok(self.token(TokenData::CommentBlock(text)))
  }

  fn read_operator(&mut self) -> SyntaxResult<Token> {
    match OPERATOR_MATCHER.find(&self.source[self.pos..]) {
      Some((op, len)) => {
        self.advance_ascii(len);
        Ok(self.token(TokenData::Operator(op)))
      }
      None => {
        let c = self.peek_ch().unwrap_or('\0');
        Err(self.error_here(SyntaxErrorType::UnexpectedCharacter(c)))
      }
    }
  }

  fn read_num(&mut self, leading_dot: bool) -> SyntaxResult<Token> {
    // When `leading_dot` is set the `.` has already been consumed.
    let mut raw = String::new();
    if leading_dot {
      raw.push('.');
    }
    let mut has_e = false;
    let mut after_e = false;
    let mut has_x = false;
    let mut has_dot = leading_dot;
    while let Some(c) = self.peek_ch() {
      let take = if c == 'x' || c == 'X' {
        if has_x {
          false
        } else {
          has_x = true;
          true
        }
      } else if !has_x && (c == 'e' || c == 'E') {
        if has_e {
          false
        } else {
          has_e = true;
          after_e = true;
          true
        }
      } else if c == '+' || c == '-' {
        // A sign is absorbed only immediately after the exponent marker.
        after_e
      } else {
        after_e = false;
        if c == '.' {
          if !has_dot && !has_x && !has_e {
            has_dot = true;
            true
          } else {
            false
          }
        } else {
          is_identifier_char(c)
        }
      };
      if !take {
        break;
      }
      raw.push(c);
      self.forward(false);
    }
    match parse_number_literal(&raw) {
      Some(value) => Ok(self.token(TokenData::Num(JsNumber(value)))),
      None => Err(self.error_here(SyntaxErrorType::MalformedNumber(raw))),
    }
  }

  /// Reads exactly `digits` hex digits and decodes them to a character.
  /// Code points with no scalar value (lone surrogates) decode lossily.
  fn read_hex_char(&mut self, digits: usize) -> SyntaxResult<char> {
    let mut value = 0u32;
    for _ in 0..digits {
      let c = self
        .forward(true)
        .ok_or_else(|| self.error_here(SyntaxErrorType::UnterminatedString))?;
      let digit = c
        .to_digit(16)
        .ok_or_else(|| self.error_here(SyntaxErrorType::InvalidCharacterEscape))?;
      value = value * 16 + digit;
    }
    Ok(char::from_u32(value).unwrap_or('\u{fffd}'))
  }

  fn read_string(&mut self) -> SyntaxResult<Token> {
    let quote = match self.forward(false) {
      Some(c) => c,
      None => return Err(self.error_here(SyntaxErrorType::UnterminatedString)),
    };
    let mut value = String::new();
    loop {
      let c = self
        .forward(true)
        .ok_or_else(|| self.error_here(SyntaxErrorType::UnterminatedString))?;
      match c {
        '\\' => {
          let escaped = self
            .forward(true)
            .ok_or_else(|| self.error_here(SyntaxErrorType::UnterminatedString))?;
          match escaped {
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'b' => value.push('\x08'),
            'v' => value.push('\x0b'),
            'f' => value.push('\x0c'),
            '0' => value.push('\0'),
            'x' => value.push(self.read_hex_char(2)?),
            'u' => value.push(self.read_hex_char(4)?),
            c => value.push(c),
          }
        }
        c if c == quote => break,
        c => value.push(c),
      }
    }
    Ok(self.token(TokenData::Str(value)))
  }

  fn read_regex(&mut self) -> SyntaxResult<Token> {
    // Consume the opening slash.
    self.forward(false);
    let mut body = String::new();
    let mut in_class = false;
    loop {
      let c = self
        .forward(false)
        .ok_or_else(|| self.error_here(SyntaxErrorType::UnterminatedRegex))?;
      match c {
        '\\' => {
          let escaped = self
            .forward(false)
            .ok_or_else(|| self.error_here(SyntaxErrorType::UnterminatedRegex))?;
          body.push('\\');
          body.push(escaped);
        }
        '/' if !in_class => break,
        '[' => {
          in_class = true;
          body.push(c);
        }
        ']' if in_class => {
          in_class = false;
          body.push(c);
        }
        c => body.push(c),
      }
    }
    let mut flags = String::new();
    while let Some(c) = self.peek_ch() {
      if !is_identifier_char(c) {
        break;
      }
      flags.push(c);
      self.forward(false);
    }
    Ok(self.token(TokenData::Regex(body, flags)))
  }

  /// Reads an identifier-shaped word, resolving `\uHHHH` escapes.
  fn read_name(&mut self) -> SyntaxResult<String> {
    let mut name = String::new();
    loop {
      match self.peek_ch() {
        Some('\\') => {
          self.forward(false);
          if self.peek_ch() != Some('u') {
            return Err(self.error_here(SyntaxErrorType::ExpectedUnicodeEscape));
          }
          self.forward(false);
          let c = self.read_hex_char(4)?;
          if !is_identifier_char(c) {
            return Err(self.error_here(SyntaxErrorType::InvalidIdentifierEscape));
          }
          name.push(c);
        }
        Some(c) if is_identifier_char(c) => {
          name.push(c);
          self.forward(false);
        }
        _ => break,
      }
    }
    Ok(name)
  }

  fn read_word(&mut self) -> SyntaxResult<Token> {
    let word = self.read_name()?;
    Ok(self.token(classify_word(word)))
  }
}
