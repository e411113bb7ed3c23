//! Serialize the tree back to XML text.
//!
//! Output is compact: no whitespace is added between nodes, so parsing the
//! result with an accept-all filter yields the same tree.

use std::fmt::{self, Display, Formatter, Write};

use crate::xml::model::{Attributes, Document, Element, Node, ProcessingInstruction};

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(declaration) = &self.declaration {
            declaration.fmt(f)?;
        }
        for child in &self.children {
            child.fmt(f)?;
        }
        Ok(())
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        write_attributes(f, &self.attributes)?;
        let Some(children) = &self.children else {
            return f.write_str("/>");
        };
        f.write_char('>')?;
        for child in children {
            child.fmt(f)?;
        }
        write!(f, "</{}>", self.name)
    }
}

impl Display for ProcessingInstruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<?{}", self.name)?;
        write_attributes(f, &self.attributes)?;
        f.write_str("?>")
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => element.fmt(f),
            Self::ProcessingInstruction(pi) => pi.fmt(f),
            Self::Text { content }
            | Self::Comment { content }
            | Self::CData { content }
            | Self::DocumentType { content } => f.write_str(content),
        }
    }
}

fn write_attributes(f: &mut Formatter<'_>, attributes: &Attributes) -> fmt::Result {
    for (name, value) in attributes {
        let quote = if value.contains('"') { '\'' } else { '"' };
        write!(f, " {name}={quote}{value}{quote}")?;
    }
    Ok(())
}
