//! XML data model

use std::fmt;

use indexmap::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Attribute map of an element or processing instruction
pub type Attributes = IndexMap<String, String>;

/// Parsed XML document
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    /// The leading `<?xml ...?>` declaration, if present
    pub declaration: Option<ProcessingInstruction>,
    /// The single top-level element
    pub root: Element,
    /// Every top-level node kept by the filter, root included, in source order
    pub children: Vec<Node>,
}

/// XML element
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    /// `None` for a self-closing tag, `Some` for an open/close pair
    pub children: Option<Vec<Node>>,
}

impl Element {
    /// Create an element written with open and close tags
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            children: Some(Vec::new()),
        }
    }

    /// Create a self-closing element
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            children: None,
        }
    }

    /// Look up an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub const fn is_self_closing(&self) -> bool {
        self.children.is_none()
    }

    /// Child nodes; empty for self-closing elements
    pub fn nodes(&self) -> &[Node] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.nodes().iter().filter_map(Node::as_element)
    }

    /// Concatenated direct text children
    pub fn text(&self) -> String {
        self.nodes()
            .iter()
            .filter_map(|node| match node {
                Node::Text { content } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Processing instruction such as `<?xml-stylesheet href="a.xsl"?>`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProcessingInstruction {
    pub name: String,
    pub attributes: Attributes,
}

impl ProcessingInstruction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }
}

/// XML node.
///
/// Inside an element only `Element`, `Text`, `Comment` and `CData` occur;
/// `DocumentType` and `ProcessingInstruction` appear at the top level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Node {
    Element(Element),
    Text {
        content: String,
    },
    /// Content keeps the `<!--` and `-->` delimiters
    Comment {
        content: String,
    },
    /// Content keeps the `<![CDATA[` and `]]>` delimiters
    #[cfg_attr(feature = "serde", serde(rename = "CDATA"))]
    CData {
        content: String,
    },
    /// Content is the whole `<!DOCTYPE ...>` span
    DocumentType {
        content: String,
    },
    ProcessingInstruction(ProcessingInstruction),
}

impl Node {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Element(_) => NodeKind::Element,
            Self::Text { .. } => NodeKind::Text,
            Self::Comment { .. } => NodeKind::Comment,
            Self::CData { .. } => NodeKind::CData,
            Self::DocumentType { .. } => NodeKind::DocumentType,
            Self::ProcessingInstruction(_) => NodeKind::ProcessingInstruction,
        }
    }

    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Raw content of text-like nodes
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Text { content }
            | Self::Comment { content }
            | Self::CData { content }
            | Self::DocumentType { content } => Some(content),
            Self::Element(_) | Self::ProcessingInstruction(_) => None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Self::Comment {
            content: content.into(),
        }
    }

    pub fn cdata(content: impl Into<String>) -> Self {
        Self::CData {
            content: content.into(),
        }
    }

    pub fn doctype(content: impl Into<String>) -> Self {
        Self::DocumentType {
            content: content.into(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<ProcessingInstruction> for Node {
    fn from(pi: ProcessingInstruction) -> Self {
        Self::ProcessingInstruction(pi)
    }
}

/// Discriminant of [`Node`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    #[cfg_attr(feature = "serde", serde(rename = "CDATA"))]
    CData,
    DocumentType,
    ProcessingInstruction,
}

impl NodeKind {
    pub const ALL: [Self; 6] = [
        Self::Element,
        Self::Text,
        Self::Comment,
        Self::CData,
        Self::DocumentType,
        Self::ProcessingInstruction,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Element => "Element",
            Self::Text => "Text",
            Self::Comment => "Comment",
            Self::CData => "CDATA",
            Self::DocumentType => "DocumentType",
            Self::ProcessingInstruction => "ProcessingInstruction",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_closing_marker() {
        assert!(Element::empty("a").is_self_closing());
        assert!(!Element::new("a").is_self_closing());
        assert!(Element::empty("a").nodes().is_empty());
    }

    #[test]
    fn test_element_helpers() {
        let mut el = Element::new("p");
        el.attributes.insert("id".to_string(), "x".to_string());
        el.children = Some(vec![
            Node::text("a "),
            Element::empty("br").into(),
            Node::comment("<!-- c -->"),
            Node::text("b"),
        ]);

        assert_eq!(el.attribute("id"), Some("x"));
        assert_eq!(el.attribute("missing"), None);
        assert_eq!(el.text(), "a b");
        let names: Vec<&str> = el.child_elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["br"]);
    }

    #[test]
    fn test_node_kind_names() {
        assert_eq!(Node::cdata("<![CDATA[x]]>").kind().to_string(), "CDATA");
        assert_eq!(
            Node::from(ProcessingInstruction::new("pi")).kind(),
            NodeKind::ProcessingInstruction
        );
        assert_eq!(Node::doctype("<!DOCTYPE a>").content(), Some("<!DOCTYPE a>"));
        assert_eq!(Node::from(Element::new("a")).content(), None);
    }
}
