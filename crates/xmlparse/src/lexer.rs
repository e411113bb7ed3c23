//! Lexer primitives: cursor and character classes

pub mod chars;
pub mod cursor;

pub use cursor::Cursor;
