//! # Tree Mutations
//!
//! Structural and property edits on a [`Document`].
//!
//! ## Design Principles
//!
//! 1. **All or nothing**: every edit is fully validated before the arena is
//!    touched, so a rejected edit leaves the document exactly as it was
//! 2. **Invariant-preserving**: ids stay unique, only containers own
//!    children, and no node ever ends up inside its own subtree
//! 3. **Intent-level**: `MoveNode` is one atomic relocation, not a
//!    remove followed by an insert the caller has to keep consistent
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - Destination indices refer to the tree *before* the source is lifted out
//! - Fails if the destination is the source itself or inside its subtree
//! - Fails if the destination container no longer exists
//! - Fails if the subtree would end up deeper than [`MAX_DEPTH`]
//!
//! ### Remove
//! - Removes the node and all descendants, returning the detached subtree
//!
//! ### SetStyle / ClearStyle
//! - `SetStyle` with `None` stores an explicit `null` (theme default)
//! - `ClearStyle` drops the key entirely (inherit)

use pagecraft_model::{Node, NodeId, MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::document::{Document, Parent};

/// Which side of a sibling an insert lands on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Before,
    #[default]
    After,
}

/// Where a moved node should land
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Destination {
    /// Into a sequence, appending when `index` is `None`
    Into { parent: Parent, index: Option<usize> },
    /// Next to an existing node, in that node's sequence
    Adjacent { sibling: NodeId, placement: Placement },
}

impl Destination {
    pub fn append_to(parent: Parent) -> Self {
        Destination::Into {
            parent,
            index: None,
        }
    }

    pub fn after(sibling: impl Into<NodeId>) -> Self {
        Destination::Adjacent {
            sibling: sibling.into(),
            placement: Placement::After,
        }
    }
}

/// Semantic edits on a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Insert a new node (and its subtree) into a sequence
    InsertNode {
        parent: Parent,
        index: Option<usize>,
        node: Node,
    },

    /// Insert a new node immediately before or after an existing one
    InsertAdjacent {
        sibling: NodeId,
        placement: Placement,
        node: Node,
    },

    /// Remove a node and its subtree
    RemoveNode { node_id: NodeId },

    /// Relocate a node and its subtree
    MoveNode {
        node_id: NodeId,
        destination: Destination,
    },

    /// Replace display text (atomic replacement)
    SetContent { node_id: NodeId, content: String },

    /// Set a style property; `None` is an explicit null
    SetStyle {
        node_id: NodeId,
        property: String,
        value: Option<String>,
    },

    /// Drop a style property so it falls back to the default
    ClearStyle { node_id: NodeId, property: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Node is not a container: {0}")]
    NotAContainer(String),

    #[error("Cannot place a node relative to itself")]
    SelfTarget,

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Node id is reserved: {0}")]
    ReservedId(String),

    #[error("Node {id} would be nested deeper than {max} levels")]
    TooDeep { id: String, max: usize },

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    /// Document version after the edit
    pub version: u64,
}

impl Mutation {
    /// Debug name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertNode { .. } => "insert_node",
            Mutation::InsertAdjacent { .. } => "insert_adjacent",
            Mutation::RemoveNode { .. } => "remove_node",
            Mutation::MoveNode { .. } => "move_node",
            Mutation::SetContent { .. } => "set_content",
            Mutation::SetStyle { .. } => "set_style",
            Mutation::ClearStyle { .. } => "clear_style",
        }
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::InsertNode { parent, node, .. } => {
                doc.check_sequence(parent)?;
                doc.check_new_subtree(node)?;
                doc.check_depth(&node.id, parent, node.height())
            }

            Mutation::InsertAdjacent {
                sibling,
                placement,
                node,
            } => {
                let (parent, _) = doc.adjacent_slot(sibling, *placement)?;
                doc.check_new_subtree(node)?;
                doc.check_depth(&node.id, &parent, node.height())
            }

            Mutation::MoveNode {
                node_id,
                destination,
            } => doc.plan_move(node_id, destination).map(|_| ()),

            Mutation::RemoveNode { node_id }
            | Mutation::SetContent { node_id, .. }
            | Mutation::SetStyle { node_id, .. }
            | Mutation::ClearStyle { node_id, .. } => doc
                .find(node_id)
                .map(|_| ())
                .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string())),
        }
    }

    /// Apply to the document with validation
    pub fn apply(&self, doc: &mut Document) -> Result<MutationResult, MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::InsertNode {
                parent,
                index,
                node,
            } => doc.insert_into(parent, node.clone(), *index)?,

            Mutation::InsertAdjacent {
                sibling,
                placement,
                node,
            } => doc.insert_adjacent_to(sibling, node.clone(), *placement)?,

            Mutation::RemoveNode { node_id } => {
                doc.remove(node_id)?;
            }

            Mutation::MoveNode {
                node_id,
                destination,
            } => doc.move_node(node_id, destination)?,

            Mutation::SetContent { node_id, content } => doc.set_content(node_id, content)?,

            Mutation::SetStyle {
                node_id,
                property,
                value,
            } => doc.set_style(node_id, property, value.clone())?,

            Mutation::ClearStyle { node_id, property } => doc.clear_style(node_id, property)?,
        }

        Ok(MutationResult {
            version: doc.version,
        })
    }

    /// Apply to a copy, leaving `doc` untouched
    pub fn applied_to(&self, doc: &Document) -> Result<Document, MutationError> {
        let mut next = doc.clone();
        self.apply(&mut next)?;
        Ok(next)
    }
}

impl Document {
    /// Remove `id` and its whole subtree, returning the detached subtree
    pub fn remove(&mut self, id: &str) -> Result<Node, MutationError> {
        let node = self
            .detach(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;
        self.touch();
        Ok(node)
    }

    /// Insert `node` into `parent`'s sequence, appending when `index` is
    /// `None` and clamping out-of-range indices
    pub fn insert_into(
        &mut self,
        parent: &Parent,
        node: Node,
        index: Option<usize>,
    ) -> Result<(), MutationError> {
        self.check_sequence(parent)?;
        self.check_new_subtree(&node)?;
        self.check_depth(&node.id, parent, node.height())?;

        let len = self.sequence(parent).map_or(0, |seq| seq.len());
        self.attach(node, parent.clone(), index.unwrap_or(len));
        self.touch();
        Ok(())
    }

    /// Insert `node` right before or after `sibling`
    pub fn insert_adjacent_to(
        &mut self,
        sibling: &str,
        node: Node,
        placement: Placement,
    ) -> Result<(), MutationError> {
        let (parent, index) = self.adjacent_slot(sibling, placement)?;
        self.insert_into(&parent, node, Some(index))
    }

    /// Relocate `source` and its subtree to `destination`
    pub fn move_node(&mut self, source: &str, destination: &Destination) -> Result<(), MutationError> {
        let (parent, mut index) = self.plan_move(source, destination)?;
        let (old_parent, old_index) = self
            .position(source)
            .ok_or_else(|| MutationError::NodeNotFound(source.to_string()))?;

        // Lifting the source out shifts later siblings in the same sequence
        if old_parent == parent && old_index < index {
            index -= 1;
        }

        let id = match self.sequence_mut(&old_parent) {
            Some(seq) => seq.remove(old_index),
            None => return Err(MutationError::ParentNotFound(source.to_string())),
        };
        if let Some(seq) = self.sequence_mut(&parent) {
            let index = index.min(seq.len());
            seq.insert(index, id);
        }
        if let Some(entry) = self.entry_mut(source) {
            entry.parent = parent;
        }

        self.touch();
        Ok(())
    }

    pub fn set_content(&mut self, id: &str, content: &str) -> Result<(), MutationError> {
        let entry = self
            .entry_mut(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;
        entry.content = content.to_string();
        self.touch();
        Ok(())
    }

    pub fn set_style(
        &mut self,
        id: &str,
        property: &str,
        value: Option<String>,
    ) -> Result<(), MutationError> {
        let entry = self
            .entry_mut(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;
        entry.styles.insert(property.to_string(), value);
        self.touch();
        Ok(())
    }

    pub fn clear_style(&mut self, id: &str, property: &str) -> Result<(), MutationError> {
        let entry = self
            .entry_mut(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;
        entry.styles.remove(property);
        self.touch();
        Ok(())
    }

    /// Resolve where a move would land, against the current tree
    pub(crate) fn plan_move(
        &self,
        source: &str,
        destination: &Destination,
    ) -> Result<(Parent, usize), MutationError> {
        if !self.contains(source) {
            return Err(MutationError::NodeNotFound(source.to_string()));
        }

        let (parent, index) = match destination {
            Destination::Into { parent, index } => {
                self.check_sequence(parent)?;
                let len = self.sequence(parent).map_or(0, |seq| seq.len());
                (parent.clone(), index.unwrap_or(len).min(len))
            }
            Destination::Adjacent { sibling, placement } => {
                if sibling.as_str() == source {
                    return Err(MutationError::SelfTarget);
                }
                self.adjacent_slot(sibling, *placement)?
            }
        };

        if let Parent::Container(target) = &parent {
            if target.as_str() == source {
                return Err(MutationError::SelfTarget);
            }
            if self.is_descendant_of(target, source) {
                return Err(MutationError::CycleDetected);
            }
        }
        self.check_depth(source, &parent, self.subtree_height(source))?;

        Ok((parent, index))
    }

    pub(crate) fn adjacent_slot(
        &self,
        sibling: &str,
        placement: Placement,
    ) -> Result<(Parent, usize), MutationError> {
        let (parent, index) = self
            .position(sibling)
            .ok_or_else(|| MutationError::NodeNotFound(sibling.to_string()))?;

        let index = match placement {
            Placement::Before => index,
            Placement::After => index + 1,
        };
        Ok((parent, index))
    }

    pub(crate) fn check_sequence(&self, parent: &Parent) -> Result<(), MutationError> {
        match parent {
            Parent::Root => Ok(()),
            Parent::Container(id) => {
                let entry = self
                    .find(id)
                    .ok_or_else(|| MutationError::ParentNotFound(id.to_string()))?;
                if entry.is_container() {
                    Ok(())
                } else {
                    Err(MutationError::NotAContainer(id.to_string()))
                }
            }
        }
    }

    /// Reject placing a subtree `height` levels tall as a child of `parent`
    /// when its deepest node would pass [`MAX_DEPTH`]
    pub(crate) fn check_depth(
        &self,
        id: &str,
        parent: &Parent,
        height: usize,
    ) -> Result<(), MutationError> {
        let depth = match parent {
            Parent::Root => 0,
            Parent::Container(container) => self.depth(container).map_or(0, |depth| depth + 1),
        };

        if depth + height > MAX_DEPTH {
            return Err(MutationError::TooDeep {
                id: id.to_string(),
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }

    pub(crate) fn check_new_subtree(&self, node: &Node) -> Result<(), MutationError> {
        let mut seen = HashSet::new();
        let mut stack = vec![node];

        while let Some(next) = stack.pop() {
            if next.id.is_reserved() {
                return Err(MutationError::ReservedId(next.id.to_string()));
            }
            if self.contains(&next.id) || !seen.insert(next.id.as_str()) {
                return Err(MutationError::DuplicateId(next.id.to_string()));
            }
            if !next.kind.is_container() && next.children.is_some() {
                return Err(MutationError::InvalidStructure(format!(
                    "leaf {} cannot own children",
                    next.id
                )));
            }
            stack.extend(next.children());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{NodeKind, Styles};

    fn leaf(id: &str) -> Node {
        Node::leaf(id.into(), NodeKind::Button, id, Styles::new()).unwrap()
    }

    fn container(id: &str, children: Vec<Node>) -> Node {
        Node::container(id.into(), "", Styles::new(), children)
    }

    fn root_ids(doc: &Document) -> Vec<String> {
        doc.roots().iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::MoveNode {
            node_id: "a".into(),
            destination: Destination::after("b"),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut doc = Document::from_nodes(vec![leaf("a")]).unwrap();
        doc.insert_into(&Parent::Root, leaf("b"), Some(99)).unwrap();
        doc.insert_into(&Parent::Root, leaf("c"), Some(0)).unwrap();
        assert_eq!(root_ids(&doc), vec!["c", "a", "b"]);
        assert_eq!(doc.version, 2);
    }

    #[test]
    fn test_insert_into_leaf_fails() {
        let mut doc = Document::from_nodes(vec![leaf("a")]).unwrap();
        let before = doc.clone();

        let err = doc
            .insert_into(&Parent::Container("a".into()), leaf("b"), None)
            .unwrap_err();

        assert_eq!(err, MutationError::NotAContainer("a".to_string()));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_insert_into_stale_container_is_noop() {
        let mut doc = Document::from_nodes(vec![container("a", vec![])]).unwrap();
        doc.remove("a").unwrap();
        let before = doc.clone();

        let err = doc
            .insert_into(&Parent::Container("a".into()), leaf("b"), None)
            .unwrap_err();

        assert_eq!(err, MutationError::ParentNotFound("a".to_string()));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_insert_adjacent_before_and_after() {
        let mut doc = Document::from_nodes(vec![leaf("a"), leaf("b")]).unwrap();
        doc.insert_adjacent_to("a", leaf("x"), Placement::After).unwrap();
        doc.insert_adjacent_to("a", leaf("y"), Placement::Before).unwrap();
        assert_eq!(root_ids(&doc), vec!["y", "a", "x", "b"]);
    }

    #[test]
    fn test_insert_rejects_duplicate_inside_subtree() {
        let mut doc = Document::from_nodes(vec![leaf("a")]).unwrap();
        let bad = container("c", vec![leaf("d"), leaf("d")]);
        assert_eq!(
            doc.insert_into(&Parent::Root, bad, None),
            Err(MutationError::DuplicateId("d".to_string()))
        );
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let mut doc = Document::from_nodes(vec![leaf("a")]).unwrap();
        let before = doc.clone();
        assert_eq!(
            doc.remove("zzz"),
            Err(MutationError::NodeNotFound("zzz".to_string()))
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn test_move_within_same_sequence() {
        let mut doc = Document::from_nodes(vec![leaf("x"), leaf("y"), leaf("z")]).unwrap();
        doc.move_node("x", &Destination::after("z")).unwrap();
        assert_eq!(root_ids(&doc), vec!["y", "z", "x"]);

        doc.move_node("x", &Destination::Adjacent {
            sibling: "y".into(),
            placement: Placement::Before,
        })
        .unwrap();
        assert_eq!(root_ids(&doc), vec!["x", "y", "z"]);

        doc.move_node("z", &Destination::after("x")).unwrap();
        assert_eq!(root_ids(&doc), vec!["x", "z", "y"]);
    }

    #[test]
    fn test_move_into_explicit_index() {
        let mut doc =
            Document::from_nodes(vec![container("c", vec![leaf("a"), leaf("b")]), leaf("x")]).unwrap();

        doc.move_node(
            "x",
            &Destination::Into {
                parent: Parent::Container("c".into()),
                index: Some(1),
            },
        )
        .unwrap();

        assert_eq!(
            doc.find("c").unwrap().children(),
            &[NodeId::from("a"), NodeId::from("x"), NodeId::from("b")]
        );
        assert_eq!(doc.find("x").unwrap().parent, Parent::Container("c".into()));
        doc.check_integrity().unwrap();
    }

    #[test]
    fn test_move_rejects_cycles() {
        let mut doc =
            Document::from_nodes(vec![container("a", vec![container("b", vec![leaf("c")])])]).unwrap();
        let before = doc.clone();

        assert_eq!(
            doc.move_node("a", &Destination::append_to(Parent::Container("b".into()))),
            Err(MutationError::CycleDetected)
        );
        assert_eq!(
            doc.move_node("a", &Destination::after("c")),
            Err(MutationError::CycleDetected)
        );
        assert_eq!(
            doc.move_node("a", &Destination::append_to(Parent::Container("a".into()))),
            Err(MutationError::SelfTarget)
        );
        assert_eq!(doc.move_node("a", &Destination::after("a")), Err(MutationError::SelfTarget));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_style_null_versus_clear() {
        let mut doc = Document::from_nodes(vec![leaf("a")]).unwrap();

        doc.set_style("a", "color", None).unwrap();
        assert_eq!(doc.find("a").unwrap().styles.get("color"), Some(&None));

        doc.set_style("a", "color", Some("#ff0000".to_string())).unwrap();
        assert_eq!(
            doc.find("a").unwrap().styles.get("color"),
            Some(&Some("#ff0000".to_string()))
        );

        doc.clear_style("a", "color").unwrap();
        assert!(!doc.find("a").unwrap().styles.contains_key("color"));
    }

    #[test]
    fn test_applied_to_leaves_input_untouched() {
        let doc = Document::from_nodes(vec![leaf("a"), leaf("b")]).unwrap();
        let mutation = Mutation::RemoveNode { node_id: "a".into() };

        let next = mutation.applied_to(&doc).unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(next.len(), 1);
        assert_eq!(next.version, doc.version + 1);
    }

    #[test]
    fn test_validation_rejects_unknown_ids() {
        let doc = Document::new();
        let mutation = Mutation::SetContent {
            node_id: "".into(),
            content: "test".to_string(),
        };
        assert!(mutation.validate(&doc).is_err());
    }
}
