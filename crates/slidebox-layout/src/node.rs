//! The content tree handed to the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::style::StyleSpec;

/// Identifier of a content node, unique within one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One block of document content with its resolved style.
///
/// A node with children is a container; a node without children is a leaf
/// whose `text` (possibly absent) is measured with the text estimator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Stable identifier, echoed on every emitted box.
    pub id: NodeId,
    /// Source tag or kind (`div`, `p`, `h2`, ...). Informational only.
    #[serde(default)]
    pub tag: String,
    /// Leaf text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Children in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
    /// Resolved style.
    #[serde(default)]
    pub style: StyleSpec,
}

impl ContentNode {
    /// A leaf carrying text.
    #[must_use]
    pub fn text(id: impl Into<NodeId>, tag: &str, text: impl Into<String>, style: StyleSpec) -> Self {
        Self {
            id: id.into(),
            tag: tag.to_string(),
            text: Some(text.into()),
            children: Vec::new(),
            style,
        }
    }

    /// A container with the given children.
    #[must_use]
    pub fn container(
        id: impl Into<NodeId>,
        tag: &str,
        style: StyleSpec,
        children: Vec<Self>,
    ) -> Self {
        Self {
            id: id.into(),
            tag: tag.to_string(),
            text: None,
            children,
            style,
        }
    }

    /// A leaf with no text, sized only by its padding and height constraints.
    #[must_use]
    pub fn spacer(id: impl Into<NodeId>, style: StyleSpec) -> Self {
        Self {
            id: id.into(),
            tag: "div".to_string(),
            text: None,
            children: Vec::new(),
            style,
        }
    }

    /// Whether the node is laid out as text rather than as a container.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The leaf text, or `""` when absent.
    #[must_use]
    pub fn text_content(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }

    /// Find a node by id in this subtree (pre-order).
    #[must_use]
    pub fn find(&self, id: &NodeId) -> Option<&Self> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtree_len_and_find() {
        let tree = ContentNode::container(
            "card",
            "div",
            StyleSpec::stack(),
            vec![
                ContentNode::text("title", "h3", "Risks", StyleSpec::default()),
                ContentNode::container(
                    "body",
                    "div",
                    StyleSpec::stack(),
                    vec![ContentNode::text("p1", "p", "one", StyleSpec::default())],
                ),
            ],
        );
        assert_eq!(tree.subtree_len(), 4);
        assert_eq!(tree.find(&NodeId::from("p1")).map(|n| n.tag.as_str()), Some("p"));
        assert!(tree.find(&NodeId::from("missing")).is_none());
        assert!(!tree.is_leaf());
    }

    #[test]
    fn test_deserialize_minimal_node() {
        let node: ContentNode =
            serde_json::from_str(r#"{"id": "n", "text": "hi", "style": {"display": "row"}}"#)
                .unwrap();
        assert_eq!(node.id, NodeId::from("n"));
        assert_eq!(node.text_content(), "hi");
        assert_eq!(node.style.display, crate::style::DisplayMode::Row);
        assert!(node.children.is_empty());
    }
}
