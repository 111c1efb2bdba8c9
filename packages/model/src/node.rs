use crate::error::{ModelError, ModelResult};
use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Style properties keyed by name.
///
/// A missing key means "inherit/default". A key mapped to `None` is an
/// explicit `null` ("use the theme default") and survives round-trips.
pub type Styles = BTreeMap<String, Option<String>>;

/// Deepest a node may sit below the root sequence.
///
/// Each level costs two levels of JSON nesting (the node object and its
/// `children` array), so this keeps persisted documents well inside the
/// JSON reader's recursion limit.
pub const MAX_DEPTH: usize = 32;

/// Closed set of component kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Heading,
    Button,
    Paragraph,
    Container,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Heading,
        NodeKind::Button,
        NodeKind::Paragraph,
        NodeKind::Container,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Heading => "heading",
            NodeKind::Button => "button",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Container => "container",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Container)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnknownKind(s.to_string()))
    }
}

/// A component instance and, for containers, its subtree.
///
/// This is the wire shape (`id`, `type`, `content`, `styles`, `children`).
/// The editor keeps nodes in an arena and only builds this form at the edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub styles: Styles,

    /// Present only for containers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Build a leaf node. Fails for the container kind.
    pub fn leaf(
        id: NodeId,
        kind: NodeKind,
        content: impl Into<String>,
        styles: Styles,
    ) -> ModelResult<Self> {
        if kind.is_container() {
            return Err(ModelError::LeafKindRequired(kind.to_string()));
        }

        Ok(Self {
            id,
            kind,
            content: content.into(),
            styles,
            children: None,
        })
    }

    /// Build a container node owning `children`
    pub fn container(
        id: NodeId,
        content: impl Into<String>,
        styles: Styles,
        children: Vec<Node>,
    ) -> Self {
        Self {
            id,
            kind: NodeKind::Container,
            content: content.into(),
            styles,
            children: Some(children),
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Children in order; empty for leaves
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Concrete value of a style property, if one is set
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).and_then(|value| value.as_deref())
    }

    /// Number of nodes in this subtree, including itself
    pub fn subtree_len(&self) -> usize {
        1 + self.children().iter().map(Node::subtree_len).sum::<usize>()
    }

    /// Container levels below this node; 0 for a leaf or an empty container
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 0)];

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.children().iter().map(|child| (child, depth + 1)));
        }

        height
    }

    /// Check the per-node shape rules and fill in a missing children list
    /// for containers
    pub fn normalize(&mut self) -> ModelResult<()> {
        match (self.kind.is_container(), &self.children) {
            (true, None) => {
                self.children = Some(Vec::new());
                Ok(())
            }
            (false, Some(_)) => Err(ModelError::LeafWithChildren(self.id.to_string())),
            _ => Ok(()),
        }
    }
}

/// Convenience for building style maps from literal pairs
pub fn styles<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Styles {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), Some(v.to_string())))
        .collect()
}
