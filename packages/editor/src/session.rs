//! # Edit Session
//!
//! One user's editing state around a single document: the drag resolver,
//! the pointer sensor, selection, preview mode and the persistence sink.
//!
//! The session is what the rendering and property-editing collaborators talk
//! to. Rendering reads `dragging_node_id`, `drop_indicator_id` and
//! `is_preview_mode`; property editing calls `set_content` / `set_style`.
//! After every successful edit the serialized document is handed to the
//! sink, which must not block.

use pagecraft_model::{IdGenerator, NodeId, UuidGenerator};
use serde_json::Value;
use tracing::{debug, warn};

use crate::document::Document;
use crate::drag::{DragResolver, DropOutcome};
use crate::mutations::{Mutation, MutationError, MutationResult, Placement};
use crate::sensor::{ActivationConstraint, Point, PointerSensor, SensorEvent};

/// Receives a snapshot after each completed edit.
///
/// Implementations must return promptly and must never fail the caller:
/// the in-memory document stays the source of truth even if a write is lost.
pub trait PersistenceSink: Send {
    fn persist(&self, snapshot: Value);
}

/// Single-user edit session
pub struct EditSession {
    /// Session identifier, used in logs
    pub id: String,

    document: Document,
    resolver: DragResolver,
    sensor: PointerSensor,
    ids: Box<dyn IdGenerator + Send>,
    selected: Option<NodeId>,
    sink: Option<Box<dyn PersistenceSink>>,
}

impl EditSession {
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self {
            id: id.into(),
            document,
            resolver: DragResolver::new(),
            sensor: PointerSensor::default(),
            ids: Box::new(UuidGenerator),
            selected: None,
            sink: None,
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + Send + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_sink(mut self, sink: impl PersistenceSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn with_activation(mut self, constraint: ActivationConstraint) -> Self {
        self.sensor = PointerSensor::new(constraint);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn dragging_node_id(&self) -> Option<&NodeId> {
        self.resolver.dragging_node_id()
    }

    pub fn drop_indicator_id(&self) -> Option<&NodeId> {
        self.resolver.drop_indicator_id()
    }

    pub fn is_preview_mode(&self) -> bool {
        self.resolver.is_preview_mode()
    }

    pub fn resolver(&self) -> &DragResolver {
        &self.resolver
    }

    /// Selected node id; hidden while previewing
    pub fn selected(&self) -> Option<&NodeId> {
        if self.is_preview_mode() {
            return None;
        }
        self.selected.as_ref()
    }

    /// Select a node, or clear with `None`. Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<&str>) {
        if self.is_preview_mode() {
            return;
        }
        self.selected = id
            .and_then(|id| self.document.find(id))
            .map(|entry| entry.id.clone());
    }

    pub fn set_preview_mode(&mut self, preview: bool) {
        self.resolver.set_preview_mode(preview);
        self.sensor.reset();
    }

    /// Flip preview mode, returning the new state
    pub fn toggle_preview(&mut self) -> bool {
        let preview = !self.is_preview_mode();
        self.set_preview_mode(preview);
        preview
    }

    /// Apply any mutation, notifying the sink on success
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        let result = mutation.apply(&mut self.document);
        match &result {
            Ok(applied) => {
                debug!(session = %self.id, mutation = mutation.name(), version = applied.version, "Mutation applied");
                self.after_change();
            }
            Err(err) => {
                debug!(session = %self.id, mutation = mutation.name(), error = %err, "Mutation skipped");
            }
        }
        result
    }

    /// Replace a node's text. Unknown ids are a no-op; returns whether the
    /// document changed.
    pub fn set_content(&mut self, id: &str, content: &str) -> bool {
        self.apply(Mutation::SetContent {
            node_id: id.into(),
            content: content.to_string(),
        })
        .is_ok()
    }

    /// Set a style property, `None` storing an explicit null
    pub fn set_style(&mut self, id: &str, property: &str, value: Option<&str>) -> bool {
        self.apply(Mutation::SetStyle {
            node_id: id.into(),
            property: property.to_string(),
            value: value.map(str::to_string),
        })
        .is_ok()
    }

    pub fn clear_style(&mut self, id: &str, property: &str) -> bool {
        self.apply(Mutation::ClearStyle {
            node_id: id.into(),
            property: property.to_string(),
        })
        .is_ok()
    }

    /// Remove a node and its subtree; clears the selection if it was inside
    pub fn delete(&mut self, id: &str) -> bool {
        self.apply(Mutation::RemoveNode { node_id: id.into() }).is_ok()
    }

    pub fn drag_start(&mut self, source: &str) -> bool {
        self.resolver.drag_start(source, &self.document)
    }

    pub fn drag_over(&mut self, source: &str, over: Option<&str>, placement: Placement) {
        self.resolver
            .drag_over(source, over, placement, &self.document);
    }

    pub fn drag_end(&mut self, source: &str, over: Option<&str>, placement: Placement) -> DropOutcome {
        let outcome = self.resolver.drag_end(
            source,
            over,
            placement,
            &mut self.document,
            self.ids.as_mut(),
        );
        if outcome.is_applied() {
            self.after_change();
        }
        outcome
    }

    pub fn cancel_drag(&mut self) {
        self.resolver.cancel();
        self.sensor.reset();
    }

    /// Raw pointer press on `source` (a node or palette id)
    pub fn pointer_down(&mut self, source: &str, at: Point) {
        if self.is_preview_mode() {
            return;
        }
        self.sensor.press(source, at);
    }

    /// Raw pointer motion while hovering `over`
    pub fn pointer_move(&mut self, at: Point, over: Option<&str>, placement: Placement) {
        if let Some(SensorEvent::DragStart { source }) = self.sensor.motion(at) {
            if !self.drag_start(&source) {
                self.sensor.reset();
            }
        }

        if let Some(source) = self.sensor.active_source().map(str::to_string) {
            self.drag_over(&source, over, placement);
        }
    }

    /// Raw pointer release over `over`. Returns the drop outcome when the
    /// press had become a drag; a click selects instead.
    pub fn pointer_up(&mut self, over: Option<&str>, placement: Placement) -> Option<DropOutcome> {
        match self.sensor.release()? {
            SensorEvent::DragEnd { source } => Some(self.drag_end(&source, over, placement)),
            SensorEvent::Click { source } => {
                self.select(Some(&source));
                None
            }
            SensorEvent::DragStart { .. } => None,
        }
    }

    fn after_change(&mut self) {
        if let Some(selected) = &self.selected {
            if !self.document.contains(selected) {
                self.selected = None;
            }
        }

        let Some(sink) = &self.sink else {
            return;
        };
        match self.document.to_blob() {
            Ok(snapshot) => sink.persist(snapshot),
            Err(err) => warn!(session = %self.id, error = %err, "Could not serialize document"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{Node, NodeKind, SequentialIdGenerator, Styles};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<Value>>>);

    impl PersistenceSink for RecordingSink {
        fn persist(&self, snapshot: Value) {
            self.0.lock().unwrap().push(snapshot);
        }
    }

    fn session() -> EditSession {
        let doc = Document::from_nodes(vec![
            Node::leaf("a".into(), NodeKind::Heading, "A", Styles::new()).unwrap(),
            Node::container("c".into(), "", Styles::new(), vec![]),
        ])
        .unwrap();
        EditSession::new("test", doc).with_id_generator(SequentialIdGenerator::new("n"))
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.id, "test");
        assert!(session.selected().is_none());
        assert!(!session.is_preview_mode());
        assert!(session.dragging_node_id().is_none());
        assert!(session.drop_indicator_id().is_none());
    }

    #[test]
    fn test_property_edits() {
        let mut session = session();

        assert!(session.set_content("a", "Hello"));
        assert!(session.set_style("a", "color", None));
        assert!(!session.set_content("missing", "x"));

        let entry = session.document().find("a").unwrap();
        assert_eq!(entry.content, "Hello");
        assert_eq!(entry.styles.get("color"), Some(&None));
    }

    #[test]
    fn test_sink_sees_each_successful_change() {
        let sink = RecordingSink::default();
        let mut session = session().with_sink(sink.clone());

        session.set_content("a", "One");
        session.set_content("missing", "Two");
        session.drag_end("button", Some("c"), Placement::After);
        session.drag_end("a", Some("a"), Placement::After);

        let snapshots = sink.0.lock().unwrap();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1][1]["children"][0]["type"], "button");
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut session = session();
        session.select(Some("a"));
        assert_eq!(session.selected(), Some(&NodeId::from("a")));

        assert!(session.delete("a"));
        assert!(session.selected().is_none());
        assert!(!session.delete("a"));
    }

    #[test]
    fn test_select_unknown_clears() {
        let mut session = session();
        session.select(Some("a"));
        session.select(Some("nope"));
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_preview_hides_selection_and_blocks_drag() {
        let mut session = session();
        session.select(Some("a"));

        assert!(session.toggle_preview());
        assert!(session.selected().is_none());
        assert!(!session.drag_start("a"));

        assert!(!session.toggle_preview());
        assert_eq!(session.selected(), Some(&NodeId::from("a")));
    }

    #[test]
    fn test_pointer_click_selects() {
        let mut session = session();
        session.pointer_down("a", Point::new(0.0, 0.0));
        session.pointer_move(Point::new(2.0, 2.0), Some("a"), Placement::After);
        assert!(session.dragging_node_id().is_none());

        assert_eq!(session.pointer_up(Some("a"), Placement::After), None);
        assert_eq!(session.selected(), Some(&NodeId::from("a")));
    }

    #[test]
    fn test_pointer_drag_moves() {
        let mut session = session();
        session.pointer_down("a", Point::new(0.0, 0.0));
        session.pointer_move(Point::new(0.0, 30.0), Some("c"), Placement::After);
        assert_eq!(session.dragging_node_id(), Some(&NodeId::from("a")));

        let outcome = session.pointer_up(Some("c"), Placement::After).unwrap();

        assert!(outcome.is_applied());
        assert!(session.dragging_node_id().is_none());
        assert_eq!(session.document().find("c").unwrap().children(), &[NodeId::from("a")]);
    }
}
