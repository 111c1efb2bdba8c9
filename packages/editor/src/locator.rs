//! # Tree Locator
//!
//! Read-only queries: find a node, find who owns it, and decide which child
//! sequence a drop target accepts.

use pagecraft_model::{NodeId, CANVAS_ID, PALETTE_SURFACE_ID};
use std::fmt;

use crate::document::{Document, NodeEntry, Parent};
use crate::templates::Template;

/// What a pointer is hovering over, classified from its raw id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The virtual root
    Canvas,
    /// The palette itself; never accepts drops
    PaletteSurface,
    /// A palette entry; never accepts drops
    Template(Template),
    /// Anything else is looked up as a node id
    Node(NodeId),
}

impl DropTarget {
    pub fn parse(id: &str) -> Self {
        match id {
            CANVAS_ID => DropTarget::Canvas,
            PALETTE_SURFACE_ID => DropTarget::PaletteSurface,
            _ => match Template::from_id(id) {
                Some(template) => DropTarget::Template(template),
                None => DropTarget::Node(NodeId::from(id)),
            },
        }
    }

    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            DropTarget::Node(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropTarget::Canvas => f.write_str(CANVAS_ID),
            DropTarget::PaletteSurface => f.write_str(PALETTE_SURFACE_ID),
            DropTarget::Template(template) => f.write_str(template.id()),
            DropTarget::Node(id) => write!(f, "{}", id),
        }
    }
}

impl Document {
    /// Look up a node at any depth
    pub fn find(&self, id: &str) -> Option<&NodeEntry> {
        self.entries.get(id)
    }

    /// Owner of the sequence holding `id`; `None` if `id` does not exist
    pub fn find_parent_container(&self, id: &str) -> Option<&Parent> {
        self.find(id).map(|entry| &entry.parent)
    }

    /// Sequence a drop onto `target` would append to.
    ///
    /// `Root` for the canvas, the container itself for a container node,
    /// `None` for leaves, unknown ids and palette targets. Callers fall back
    /// to inserting next to the target.
    pub fn resolve_drop_container(&self, target: &DropTarget) -> Option<Parent> {
        match target {
            DropTarget::Canvas => Some(Parent::Root),
            DropTarget::Node(id) => self
                .find(id)
                .filter(|entry| entry.is_container())
                .map(|entry| Parent::Container(entry.id.clone())),
            DropTarget::PaletteSurface | DropTarget::Template(_) => None,
        }
    }

    /// Parent and index of `id` within its sequence
    pub fn position(&self, id: &str) -> Option<(Parent, usize)> {
        let parent = self.find_parent_container(id)?;
        let index = self
            .sequence(parent)?
            .iter()
            .position(|child| child.as_str() == id)?;
        Some((parent.clone(), index))
    }

    /// Container ids from the direct parent up to the outermost one
    pub fn ancestors(&self, id: &str) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.find_parent_container(id);

        while let Some(Parent::Container(parent_id)) = current {
            ancestors.push(parent_id.clone());
            current = self.find_parent_container(parent_id);
        }

        ancestors
    }

    /// Whether `id` lies strictly inside `ancestor`'s subtree
    pub fn is_descendant_of(&self, id: &str, ancestor: &str) -> bool {
        let mut current = self.find_parent_container(id);

        while let Some(Parent::Container(parent_id)) = current {
            if parent_id.as_str() == ancestor {
                return true;
            }
            current = self.find_parent_container(parent_id);
        }

        false
    }

    /// Ids inside `id`'s subtree in pre-order, excluding `id`
    pub fn descendants(&self, id: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        if let Some(entry) = self.find(id) {
            self.collect_pre_order(entry.children(), &mut out);
        }
        out
    }

    /// Every id in the document in pre-order
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len());
        self.collect_pre_order(&self.roots, &mut out);
        out
    }

    fn collect_pre_order(&self, ids: &[NodeId], out: &mut Vec<NodeId>) {
        for id in ids {
            out.push(id.clone());
            if let Some(entry) = self.find(id) {
                self.collect_pre_order(entry.children(), out);
            }
        }
    }

    /// Container levels below `id`; 0 for a leaf, an empty container or an
    /// unknown id
    pub fn subtree_height(&self, id: &str) -> usize {
        let mut height = 0;
        let mut stack = vec![(id, 0)];

        while let Some((next, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(entry) = self.find(next) {
                stack.extend(entry.children().iter().map(|child| (child.as_str(), depth + 1)));
            }
        }

        height
    }

    /// Nesting depth; root-level nodes are at 0
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.find(id)?;
        Some(self.ancestors(id).len())
    }
}
