//! # Document Arena
//!
//! A Document is the page being edited: an ordered list of root nodes under
//! the virtual canvas root.
//!
//! Nodes live in one flat table keyed by id. Containers store the ordered
//! ids of their children and every entry records its parent, so lookups
//! and relocations are table edits rather than whole-tree rebuilds.
//!
//! ## Lifecycle
//!
//! ```text
//! Blob → deserialize → Document → Mutations → Document → serialize → Blob
//!          (Node tree)    (arena)                 (arena)   (Node tree)
//! ```

use pagecraft_model::{
    deserialize, serialize, ModelResult, Node, NodeId, NodeKind, Styles, CANVAS_ID,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::warn;

use crate::{EditorError, MutationError};

/// Owner of a child sequence: the canvas root or a container node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parent {
    Root,
    Container(NodeId),
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parent::Root => f.write_str(CANVAS_ID),
            Parent::Container(id) => f.write_str(id),
        }
    }
}

/// One node in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct NodeEntry {
    pub id: NodeId,
    pub kind: NodeKind,
    pub content: String,
    pub styles: Styles,
    /// Ordered child ids; `Some` exactly when `kind` is container
    pub children: Option<Vec<NodeId>>,
    pub parent: Parent,
}

impl NodeEntry {
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn children(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Editable page document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub(crate) entries: HashMap<NodeId, NodeEntry>,
    pub(crate) roots: Vec<NodeId>,

    /// Increments on each successful mutation
    pub version: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from root nodes, checking every tree invariant
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, MutationError> {
        let mut doc = Self::new();
        for node in nodes {
            doc.insert_into(&Parent::Root, node, None)?;
        }
        doc.version = 0;
        Ok(doc)
    }

    /// Load from a persisted blob, failing on any malformation
    pub fn try_from_blob(blob: Value) -> Result<Self, EditorError> {
        let nodes = deserialize(blob)?;
        Ok(Self::from_nodes(nodes)?)
    }

    /// Load from a persisted blob. A malformed blob degrades to an empty
    /// document so the session can still start.
    pub fn from_blob(blob: Value) -> Self {
        match Self::try_from_blob(blob) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(error = %err, "Discarding malformed document blob");
                Self::new()
            }
        }
    }

    /// Serialize to the persisted blob shape
    pub fn to_blob(&self) -> ModelResult<Value> {
        serialize(&self.to_nodes())
    }

    /// Rebuild the nested node form of every root
    pub fn to_nodes(&self) -> Vec<Node> {
        self.roots.iter().filter_map(|id| self.node(id)).collect()
    }

    /// Nested node form of one subtree
    pub fn node(&self, id: &str) -> Option<Node> {
        let entry = self.entries.get(id)?;
        let children = entry
            .children
            .as_ref()
            .map(|ids| ids.iter().filter_map(|child| self.node(child)).collect());

        Some(Node {
            id: entry.id.clone(),
            kind: entry.kind,
            content: entry.content.clone(),
            styles: entry.styles.clone(),
            children,
        })
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Total number of nodes at every depth
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordered ids owned by `parent`, if it is a live sequence
    pub fn sequence(&self, parent: &Parent) -> Option<&[NodeId]> {
        match parent {
            Parent::Root => Some(&self.roots),
            Parent::Container(id) => self.entries.get(id)?.children.as_deref(),
        }
    }

    pub(crate) fn sequence_mut(&mut self, parent: &Parent) -> Option<&mut Vec<NodeId>> {
        match parent {
            Parent::Root => Some(&mut self.roots),
            Parent::Container(id) => self.entries.get_mut(id)?.children.as_mut(),
        }
    }

    pub(crate) fn entry_mut(&mut self, id: &str) -> Option<&mut NodeEntry> {
        self.entries.get_mut(id)
    }

    pub(crate) fn touch(&mut self) {
        self.version += 1;
    }

    /// Flatten `node` into the table and link it into `parent` at `index`.
    /// Callers validate first; this never fails half-way.
    pub(crate) fn attach(&mut self, node: Node, parent: Parent, index: usize) {
        let id = node.id.clone();
        self.link_subtree(node, parent.clone());
        if let Some(seq) = self.sequence_mut(&parent) {
            let index = index.min(seq.len());
            seq.insert(index, id);
        }
    }

    fn link_subtree(&mut self, node: Node, parent: Parent) {
        let Node {
            id,
            kind,
            content,
            styles,
            children,
        } = node;

        let child_ids: Option<Vec<NodeId>> = children
            .as_ref()
            .map(|c| c.iter().map(|n| n.id.clone()).collect());
        // Containers always own a sequence, even when the wire form omitted it
        let child_ids = match (kind.is_container(), child_ids) {
            (true, None) => Some(Vec::new()),
            (_, ids) => ids,
        };

        self.entries.insert(
            id.clone(),
            NodeEntry {
                id: id.clone(),
                kind,
                content,
                styles,
                children: child_ids,
                parent,
            },
        );

        for child in children.into_iter().flatten() {
            self.link_subtree(child, Parent::Container(id.clone()));
        }
    }

    /// Unlink `id` from its parent and drop its subtree from the table,
    /// returning the nested form
    pub(crate) fn detach(&mut self, id: &str) -> Option<Node> {
        let parent = self.entries.get(id)?.parent.clone();
        let node = self.node(id)?;

        if let Some(seq) = self.sequence_mut(&parent) {
            seq.retain(|child| child.as_str() != id);
        }

        let mut stack = vec![node.id.clone()];
        while let Some(next) = stack.pop() {
            if let Some(entry) = self.entries.remove(&next) {
                stack.extend(entry.children.into_iter().flatten());
            }
        }

        Some(node)
    }

    /// Verify every structural invariant of the arena
    pub fn check_integrity(&self) -> Result<(), MutationError> {
        let broken = |msg: String| Err(MutationError::InvalidStructure(msg));
        let mut seen = HashSet::new();
        let mut stack: Vec<(Parent, &NodeId)> =
            self.roots.iter().map(|id| (Parent::Root, id)).collect();

        while let Some((parent, id)) = stack.pop() {
            if !seen.insert(id) {
                return broken(format!("{} is reachable twice", id));
            }
            let Some(entry) = self.entries.get(id) else {
                return broken(format!("{} is linked but not stored", id));
            };
            if entry.parent != parent {
                return broken(format!("{} has a stale parent pointer", id));
            }
            if entry.is_container() != entry.children.is_some() {
                return broken(format!("{} has a children list that does not match its kind", id));
            }
            for child in entry.children() {
                stack.push((Parent::Container(id.clone()), child));
            }
        }

        if seen.len() != self.entries.len() {
            return broken(format!(
                "{} stored nodes are unreachable",
                self.entries.len() - seen.len()
            ));
        }

        Ok(())
    }
}
