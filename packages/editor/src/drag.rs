//! # Drag Resolver
//!
//! Turns drag-lifecycle events into structural edits.
//!
//! ```text
//!            drag_start              drag_end / cancel
//!   Idle ──────────────▶ Dragging ──────────────────────▶ Idle
//!                          │  ▲
//!                          └──┘ drag_over (updates drop indicator)
//! ```
//!
//! The live document is never touched until `drag_end`. A palette drag only
//! records which template is pending, so an aborted drag cannot leave a
//! half-built node behind. Every rejected drop is a silent no-op for the
//! interactive surface; the returned [`DropOutcome`] carries the reason for
//! tests and logs.

use pagecraft_model::{IdGenerator, NodeId};
use thiserror::Error;
use tracing::{debug, info};

use crate::document::{Document, Parent};
use crate::locator::DropTarget;
use crate::mutations::{Destination, Mutation, MutationError, Placement};
use crate::templates::Template;

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A palette entry, materialized only on drop
    Template(Template),
    /// An existing node, held for visual echo only
    Node(NodeId),
}

impl DragSource {
    /// Classify a raw drag id; `None` for ids that cannot be dragged
    pub fn resolve(id: &str, doc: &Document) -> Option<Self> {
        if let Some(template) = Template::from_id(id) {
            return Some(DragSource::Template(template));
        }
        doc.find(id).map(|entry| DragSource::Node(entry.id.clone()))
    }
}

/// Sibling a drop would land next to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIndicator {
    pub target: NodeId,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    pub source: DragSource,
    pub drop_indicator: Option<DropIndicator>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Why a drop left the document unchanged
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("Drag is disabled in preview mode")]
    PreviewMode,

    #[error("No drop target")]
    NoTarget,

    #[error("Dropped onto itself")]
    SelfDrop,

    #[error("Invalid drop target: {0}")]
    InvalidTarget(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Would place the node inside its own subtree")]
    CycleRejected,

    #[error("Would nest deeper than {0} levels")]
    TooDeep(usize),

    #[error("Mutation failed: {0}")]
    Mutation(MutationError),
}

impl From<MutationError> for Rejection {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::NodeNotFound(id) | MutationError::ParentNotFound(id) => {
                Rejection::NotFound(id)
            }
            MutationError::CycleDetected => Rejection::CycleRejected,
            MutationError::SelfTarget => Rejection::SelfDrop,
            MutationError::TooDeep { max, .. } => Rejection::TooDeep(max),
            other => Rejection::Mutation(other),
        }
    }
}

/// Result of a drag-end
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// A template was materialized into the document
    Inserted { node_id: NodeId, parent: Parent },
    /// An existing node was relocated
    Moved { node_id: NodeId, parent: Parent },
    /// Nothing changed
    Rejected(Rejection),
}

impl DropOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, DropOutcome::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            DropOutcome::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Drag-and-drop state machine
#[derive(Debug, Default)]
pub struct DragResolver {
    state: DragState,
    preview_mode: bool,
}

impl DragResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn is_preview_mode(&self) -> bool {
        self.preview_mode
    }

    /// Entering preview mode abandons any drag in progress
    pub fn set_preview_mode(&mut self, preview: bool) {
        self.preview_mode = preview;
        if preview {
            self.cancel();
        }
    }

    /// Existing node being dragged, if any
    pub fn dragging_node_id(&self) -> Option<&NodeId> {
        match &self.state {
            DragState::Dragging(ActiveDrag {
                source: DragSource::Node(id),
                ..
            }) => Some(id),
            _ => None,
        }
    }

    /// Template being dragged from the palette, if any
    pub fn dragging_template(&self) -> Option<Template> {
        match &self.state {
            DragState::Dragging(ActiveDrag {
                source: DragSource::Template(template),
                ..
            }) => Some(*template),
            _ => None,
        }
    }

    pub fn drop_indicator(&self) -> Option<&DropIndicator> {
        match &self.state {
            DragState::Dragging(active) => active.drop_indicator.as_ref(),
            DragState::Idle => None,
        }
    }

    pub fn drop_indicator_id(&self) -> Option<&NodeId> {
        self.drop_indicator().map(|indicator| &indicator.target)
    }

    /// Begin a drag. Returns whether the resolver entered `Dragging`.
    pub fn drag_start(&mut self, source: &str, doc: &Document) -> bool {
        if self.preview_mode {
            debug!(source = %source, "Ignoring drag start in preview mode");
            return false;
        }

        match DragSource::resolve(source, doc) {
            Some(source) => {
                debug!(source = ?source, "Drag started");
                self.state = DragState::Dragging(ActiveDrag {
                    source,
                    drop_indicator: None,
                });
                true
            }
            None => {
                debug!(source = %source, "Ignoring drag start from undraggable id");
                false
            }
        }
    }

    /// Track the hovered target. Advisory only; the document is not touched.
    pub fn drag_over(
        &mut self,
        source: &str,
        over: Option<&str>,
        placement: Placement,
        doc: &Document,
    ) {
        let DragState::Dragging(active) = &mut self.state else {
            return;
        };

        active.drop_indicator = match over {
            None => None,
            Some(over) if over == source => None,
            Some(over) => {
                let target = DropTarget::parse(over);
                if doc.resolve_drop_container(&target).is_some() {
                    // Hovering a container means nesting, not reordering
                    None
                } else {
                    target
                        .node_id()
                        .filter(|id| doc.contains(id))
                        .map(|id| DropIndicator {
                            target: id.clone(),
                            placement,
                        })
                }
            }
        };
    }

    /// Abandon the drag without touching the document
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Finish the drag, applying the resolved edit to `doc`.
    ///
    /// Always returns to `Idle`. Rejections leave `doc` unchanged.
    pub fn drag_end(
        &mut self,
        source: &str,
        over: Option<&str>,
        placement: Placement,
        doc: &mut Document,
        ids: &mut dyn IdGenerator,
    ) -> DropOutcome {
        self.state = DragState::Idle;

        match self.resolve_drop(source, over, placement, doc, ids) {
            Ok(outcome) => {
                info!(source = %source, target = ?over, outcome = ?outcome, "Drop applied");
                outcome
            }
            Err(reason) => {
                debug!(source = %source, target = ?over, reason = %reason, "Drop rejected");
                DropOutcome::Rejected(reason)
            }
        }
    }

    fn resolve_drop(
        &self,
        source: &str,
        over: Option<&str>,
        placement: Placement,
        doc: &mut Document,
        ids: &mut dyn IdGenerator,
    ) -> Result<DropOutcome, Rejection> {
        if self.preview_mode {
            return Err(Rejection::PreviewMode);
        }

        let over = over.ok_or(Rejection::NoTarget)?;
        let target = DropTarget::parse(over);
        if matches!(target, DropTarget::PaletteSurface | DropTarget::Template(_)) {
            return Err(Rejection::InvalidTarget(over.to_string()));
        }
        if source == over {
            return Err(Rejection::SelfDrop);
        }

        let drag_source = DragSource::resolve(source, doc)
            .ok_or_else(|| Rejection::NotFound(source.to_string()))?;
        let destination = destination_for(&target, placement, doc)?;

        match drag_source {
            DragSource::Template(template) => {
                let node = template.materialize(ids);
                let node_id = node.id.clone();
                let mutation = match destination {
                    Destination::Into { parent, index } => Mutation::InsertNode {
                        parent,
                        index,
                        node,
                    },
                    Destination::Adjacent { sibling, placement } => Mutation::InsertAdjacent {
                        sibling,
                        placement,
                        node,
                    },
                };
                mutation.apply(doc)?;

                let parent = doc
                    .find_parent_container(&node_id)
                    .cloned()
                    .unwrap_or(Parent::Root);
                Ok(DropOutcome::Inserted { node_id, parent })
            }
            DragSource::Node(node_id) => {
                Mutation::MoveNode {
                    node_id: node_id.clone(),
                    destination,
                }
                .apply(doc)?;

                let parent = doc
                    .find_parent_container(&node_id)
                    .cloned()
                    .unwrap_or(Parent::Root);
                Ok(DropOutcome::Moved { node_id, parent })
            }
        }
    }
}

/// Append into the target when it accepts children, otherwise land next to it
fn destination_for(
    target: &DropTarget,
    placement: Placement,
    doc: &Document,
) -> Result<Destination, Rejection> {
    if let Some(parent) = doc.resolve_drop_container(target) {
        return Ok(Destination::append_to(parent));
    }

    match target.node_id() {
        Some(id) if doc.contains(id) => Ok(Destination::Adjacent {
            sibling: id.clone(),
            placement,
        }),
        Some(id) => Err(Rejection::NotFound(id.to_string())),
        None => Err(Rejection::InvalidTarget(target.to_string())),
    }
}
