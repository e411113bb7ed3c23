//! XML parser module

pub mod filter;
pub mod model;
pub mod parser;
pub mod writer;

pub use filter::{exclude_kinds, AcceptAll, ExcludeKinds, Filter};
pub use model::{Attributes, Document, Element, Node, NodeKind, ProcessingInstruction};
pub use parser::{Config, Parser};
