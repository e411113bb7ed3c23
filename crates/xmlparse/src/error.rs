//! Error types for xmlparse

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Span representing a range in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    pub const fn at(pos: Pos) -> Self {
        Self::new(pos, pos)
    }
}

/// Cause of a failed parse
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// No top-level element was found
    RootNotFound,
    /// A second top-level element followed the root
    MultipleRoots,
    /// Input remained that no production accepts
    NotWellFormed,
    /// An attribute inside a tag or instruction could not be read
    MalformedAttribute,
    /// Input ended inside a tag header or processing instruction
    UnterminatedTag { name: String },
    /// Elements nested deeper than the configured limit
    MaxDepthExceeded { max: usize },
    /// Byte input is not valid UTF-8
    InvalidUtf8,
}

impl ErrorKind {
    /// Whether the document shape was wrong, as opposed to the markup itself.
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::RootNotFound | Self::MultipleRoots)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound => write!(f, "Root Element not found"),
            Self::MultipleRoots => write!(f, "Found multiple root nodes"),
            Self::NotWellFormed => write!(f, "Not Well-Formed XML"),
            Self::MalformedAttribute => write!(f, "malformed attribute"),
            Self::UnterminatedTag { name } => write!(f, "unterminated tag <{name}"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::InvalidUtf8 => write!(f, "invalid utf-8"),
        }
    }
}

/// Main error type for xmlparse
#[derive(Error, Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    span: Span,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            span,
            message,
        }
    }

    pub fn with_message(kind: ErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Create error at a single position
    pub fn at(kind: ErrorKind, pos: Pos) -> Self {
        Self::new(kind, Span::at(pos))
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Rewrite both ends of the span, e.g. onto text the error was not
    /// detected in
    pub(crate) fn map_span(mut self, f: impl Fn(Pos) -> Pos) -> Self {
        self.span = Span::new(f(self.span.start), f(self.span.end));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to parse XML at {}: {}",
            self.span.start, self.message
        )
    }
}

/// Result type alias for xmlparse
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(42, 10, 5);
        assert_eq!(pos.to_string(), "10:5");
    }

    #[test]
    fn test_error_creation() {
        let err = Error::at(ErrorKind::NotWellFormed, Pos::new(3, 1, 4));
        assert_eq!(err.kind(), &ErrorKind::NotWellFormed);
        assert_eq!(err.span().start.offset, 3);
    }

    #[test]
    fn test_error_display() {
        let err = Error::at(ErrorKind::RootNotFound, Pos::new(0, 1, 1));
        let display = err.to_string();
        assert!(display.starts_with("Failed to parse XML"));
        assert!(display.contains("Root Element not found"));
    }

    #[test]
    fn test_custom_message() {
        let err = Error::with_message(
            ErrorKind::MalformedAttribute,
            Span::at(Pos::new(0, 1, 1)),
            "bad `me`",
        );
        assert_eq!(err.message(), "bad `me`");
        assert_eq!(err.kind().to_string(), "malformed attribute");
    }

    #[test]
    fn test_map_span() {
        let err = Error::new(
            ErrorKind::NotWellFormed,
            Span::new(Pos::new(1, 1, 2), Pos::new(3, 1, 4)),
        )
        .map_span(|pos| Pos::new(pos.offset + 10, 2, pos.col));
        assert_eq!(
            err.span(),
            Span::new(Pos::new(11, 2, 2), Pos::new(13, 2, 4))
        );
        assert_eq!(err.kind(), &ErrorKind::NotWellFormed);
    }

    #[test]
    fn test_structural_kinds() {
        assert!(ErrorKind::RootNotFound.is_structural());
        assert!(ErrorKind::MultipleRoots.is_structural());
        assert!(!ErrorKind::NotWellFormed.is_structural());
        assert!(!ErrorKind::UnterminatedTag {
            name: "a".to_string()
        }
        .is_structural());
    }
}
