//! Text cursor for navigating XML input

use crate::error::Pos;

/// Cursor over the unconsumed part of the input with position tracking.
///
/// Every `eat*` method either consumes a full match and reports it, or
/// leaves the cursor where it was.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    /// Create cursor from a string slice
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Get current character without consuming
    pub fn current(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Check for `literal` at the current position
    pub fn starts_with(&self, literal: &str) -> bool {
        self.remaining().starts_with(literal)
    }

    /// Consume `literal` if it is next
    pub fn eat(&mut self, literal: &str) -> bool {
        if self.starts_with(literal) {
            self.bump(literal.len());
            true
        } else {
            false
        }
    }

    /// Consume the longest prefix whose characters satisfy `pred`
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.remaining();
        let len = rest
            .char_indices()
            .find(|&(_, ch)| !pred(ch))
            .map_or(rest.len(), |(idx, _)| idx);
        let matched = rest.get(..len).unwrap_or_default();
        self.bump(len);
        matched
    }

    /// Consume a span from `open` through the first following `close`.
    ///
    /// Returns the whole span, delimiters included. Nothing is consumed when
    /// either delimiter is missing.
    pub fn eat_delimited(&mut self, open: &str, close: &str) -> Option<&'a str> {
        let rest = self.remaining();
        let body = rest.strip_prefix(open)?;
        let end = body.find(close)?.saturating_add(open.len() + close.len());
        let matched = rest.get(..end)?;
        self.bump(end);
        Some(matched)
    }

    /// Skip whitespace
    pub fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    /// Get current position
    pub const fn position(&self) -> Pos {
        Pos::new(self.pos, self.line, self.col)
    }

    /// Check if at end of input
    pub const fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get the unconsumed input
    pub fn remaining(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    /// Line and column of byte `offset` in `input`
    pub fn locate(input: &'a str, offset: usize) -> Pos {
        let mut cursor = Self::new(input);
        cursor.bump(offset);
        cursor.position()
    }

    fn bump(&mut self, len: usize) {
        let end = self.pos.saturating_add(len).min(self.input.len());
        let Some(consumed) = self.input.get(self.pos..end) else {
            return;
        };
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.pos = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_basic() {
        let mut cursor = Cursor::new("hello");
        assert_eq!(cursor.current(), Some('h'));
        assert!(cursor.eat("h"));
        assert_eq!(cursor.current(), Some('e'));
    }

    #[test]
    fn test_cursor_whitespace() {
        let mut cursor = Cursor::new("  \t\nhello");
        cursor.skip_whitespace();
        assert_eq!(cursor.current(), Some('h'));
        assert_eq!(cursor.position().line, 2);
        assert_eq!(cursor.position().col, 1);
    }

    #[test]
    fn test_cursor_eat() {
        let mut cursor = Cursor::new("<?xml ?>");
        assert!(!cursor.eat("<!"));
        assert_eq!(cursor.position().offset, 0);
        assert!(cursor.eat("<?"));
        assert!(cursor.starts_with("xml"));
    }

    #[test]
    fn test_cursor_eat_while_multibyte() {
        let mut cursor = Cursor::new("tåg>");
        let name = cursor.eat_while(char::is_alphanumeric);
        assert_eq!(name, "tåg");
        assert_eq!(cursor.current(), Some('>'));
        assert_eq!(cursor.position().col, 4);
        assert_eq!(cursor.position().offset, 4);
    }

    #[test]
    fn test_cursor_eat_delimited() {
        let mut cursor = Cursor::new("<!-- a\nb --><x/>");
        assert_eq!(cursor.eat_delimited("<!--", "-->"), Some("<!-- a\nb -->"));
        assert_eq!(cursor.remaining(), "<x/>");
        assert_eq!(cursor.position().line, 2);
    }

    #[test]
    fn test_cursor_eat_delimited_unterminated() {
        let mut cursor = Cursor::new("<!-- open");
        assert_eq!(cursor.eat_delimited("<!--", "-->"), None);
        assert_eq!(cursor.position().offset, 0);
    }

    #[test]
    fn test_cursor_eof() {
        let cursor = Cursor::new("");
        assert!(cursor.is_eof());
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_cursor_eat_while_to_end() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.eat_while(|_| true), "ab");
        assert_eq!(cursor.eat_while(|_| true), "");
        assert!(cursor.is_eof());
        assert_eq!(cursor.position(), Pos::new(2, 1, 3));
    }

    #[test]
    fn test_cursor_locate() {
        let input = "<a>\n  <b/>\n</a>";
        assert_eq!(Cursor::locate(input, 0), Pos::new(0, 1, 1));
        assert_eq!(Cursor::locate(input, 6), Pos::new(6, 2, 3));
        assert_eq!(Cursor::locate(input, 99), Pos::new(15, 3, 5));
    }
}
