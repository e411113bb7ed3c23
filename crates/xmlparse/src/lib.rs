//! xmlparse - recursive-descent XML parser
//!
//! Turns pragmatic, mostly well-formed XML into an owned tree. Entities are
//! not expanded, DTDs are not resolved, and namespace prefixes stay part of
//! the name.
//!
//! # Quick Start
//!
//! ```
//! use xmlparse::{parse, Node};
//! # fn main() -> Result<(), xmlparse::Error> {
//! let doc = parse(r#"<?xml version="1.0"?><a><b x="1"/>hi</a>"#)?;
//! assert_eq!(doc.root.name, "a");
//! assert!(matches!(doc.root.nodes().last(), Some(Node::Text { content }) if content == "hi"));
//! # Ok(())
//! # }
//! ```
//!
//! Nodes can be dropped from the result with a filter; they are still parsed.
//!
//! ```
//! use xmlparse::{parse_with_filter, Config, Node, NodeKind};
//! # fn main() -> Result<(), xmlparse::Error> {
//! let doc = parse_with_filter("<a><!-- c -->x</a>", Config::default(), |node: &Node| {
//!     node.kind() != NodeKind::Comment
//! })?;
//! assert_eq!(doc.root.text(), "x");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result, Span};

pub mod lexer;

pub mod xml;
pub use xml::{
    exclude_kinds, AcceptAll, Attributes, Config, Document, Element, ExcludeKinds, Filter, Node,
    NodeKind, Parser, ProcessingInstruction,
};

/// Parse XML with the default configuration
pub fn parse(xml: &str) -> Result<Document> {
    Parser::new(xml).parse()
}

/// Parse XML with custom configuration
pub fn parse_with_config(xml: &str, config: Config) -> Result<Document> {
    Parser::new(xml).with_config(config).parse()
}

/// Parse XML, keeping only the nodes `filter` accepts
pub fn parse_with_filter<F: Filter>(xml: &str, config: Config, filter: F) -> Result<Document> {
    Parser::new(xml)
        .with_config(config)
        .with_filter(filter)
        .parse()
}

/// Parse XML from UTF-8 bytes
pub fn parse_bytes(bytes: &[u8]) -> Result<Document> {
    let xml = std::str::from_utf8(bytes).map_err(|err| {
        let valid = bytes.get(..err.valid_up_to()).unwrap_or_default();
        Error::at(ErrorKind::InvalidUtf8, position_after(valid))
    })?;
    parse(xml)
}

/// Position just past `prefix`, which is known to be valid UTF-8
fn position_after(prefix: &[u8]) -> Pos {
    let text = String::from_utf8_lossy(prefix);
    lexer::Cursor::locate(&text, text.len())
}
