use ahash::HashSet;
use ahash::HashSetExt;
use once_cell::sync::Lazy;

#[derive(Clone)]
pub struct CharFilter {
  chars: HashSet<char>,
}

impl CharFilter {
  pub fn new() -> CharFilter {
    CharFilter {
      chars: HashSet::new(),
    }
  }

  pub fn add_char(&mut self, c: char) {
    self.chars.insert(c);
  }

  pub fn add_chars_from_slice(&mut self, chars: &str) {
    for c in chars.chars() {
      self.chars.insert(c);
    }
  }

  pub fn has(&self, c: char) -> bool {
    self.chars.contains(&c)
  }
}

impl Default for CharFilter {
  fn default() -> Self {
    CharFilter::new()
  }
}

/// Characters that can begin a symbolic operator.
pub static OPERATOR_CHARS: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars_from_slice("+-*&%=<>!?|~^");
  filter
});

/// Single-character punctuation tokens.
pub static PUNC_CHARS: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars_from_slice("[]{}(),;:");
  filter
});

/// Punctuation after which a `/` begins a regular expression literal rather
/// than a division operator.
pub static PUNC_BEFORE_EXPRESSION: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  filter.add_chars_from_slice("[{}(,.;:");
  filter
});

pub static WHITESPACE: Lazy<CharFilter> = Lazy::new(|| {
  let mut filter = CharFilter::new();
  // Horizontal tab.
  filter.add_char('\x09');
  // Line feed.
  filter.add_char('\x0a');
  // Vertical tab.
  filter.add_char('\x0b');
  // Form feed.
  filter.add_char('\x0c');
  // Carriage return. Normalized away before scanning, kept for completeness.
  filter.add_char('\x0d');
  // Space.
  filter.add_char('\x20');
  // Zero-width space.
  filter.add_char('\u{200b}');
  // Zero-width no-break space; a leading one (BOM) is stripped before scanning.
  filter.add_char('\u{feff}');
  filter
});

// WARNING: These approximate the identifier character classes: Unicode letters
// and digits are covered via char categories, but non-spacing marks and
// connector punctuation beyond `_` are not.
pub fn is_identifier_start(c: char) -> bool {
  c == '$' || c == '_' || c.is_alphabetic()
}

pub fn is_identifier_char(c: char) -> bool {
  c == '$' || c == '_' || c.is_alphanumeric() || c == '\u{200c}' || c == '\u{200d}'
}
