//! Node filters
//!
//! A filter is asked once per candidate node, in source order, whether the
//! node belongs in its parent's child list. Excluded nodes are still fully
//! parsed, so filtering never moves sibling boundaries or splits text.

use crate::xml::model::{Node, NodeKind};

/// Predicate deciding whether a parsed node is kept
pub trait Filter {
    fn accept(&self, node: &Node) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&Node) -> bool,
{
    fn accept(&self, node: &Node) -> bool {
        self(node)
    }
}

/// Keeps every node
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl Filter for AcceptAll {
    fn accept(&self, _node: &Node) -> bool {
        true
    }
}

/// Drops every node of the listed kinds
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExcludeKinds {
    kinds: Vec<NodeKind>,
}

impl ExcludeKinds {
    pub fn new(kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }
}

impl Filter for ExcludeKinds {
    fn accept(&self, node: &Node) -> bool {
        !self.kinds.contains(&node.kind())
    }
}

/// Shorthand for [`ExcludeKinds::new`]
pub fn exclude_kinds(kinds: &[NodeKind]) -> ExcludeKinds {
    ExcludeKinds::new(kinds.iter().copied())
}
