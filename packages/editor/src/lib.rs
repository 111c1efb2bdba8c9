//! # Pagecraft Editor
//!
//! Core editing engine for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Node tree ⇄ persisted JSON blob      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document arena + edits              │
//! │  - Locate nodes and drop containers         │
//! │  - Apply mutations with validation          │
//! │  - Resolve drag gestures into mutations     │
//! │  - Materialize palette templates            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ persistence sink: snapshot after each edit  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is source of truth**: rendering only reads it
//! 2. **Edits are atomic**: a rejected edit leaves the document untouched
//! 3. **Rejections are silent**: invalid drops are no-ops for the user,
//!    with a typed reason for tests and logs
//! 4. **Persistence is fire-and-forget**: a failed write never undoes an edit
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Document, EditSession, Placement};
//!
//! let doc = Document::from_blob(blob);
//! let mut session = EditSession::new("local", doc);
//!
//! // Drop a heading from the palette onto the canvas
//! session.drag_start("heading");
//! session.drag_over("heading", Some("canvas"), Placement::After);
//! let outcome = session.drag_end("heading", Some("canvas"), Placement::After);
//! assert!(outcome.is_applied());
//! ```

mod document;
mod drag;
mod errors;
mod locator;
mod mutations;
mod sensor;
mod session;
mod templates;

pub use document::{Document, NodeEntry, Parent};
pub use drag::{
    ActiveDrag, DragResolver, DragSource, DragState, DropIndicator, DropOutcome, Rejection,
};
pub use errors::EditorError;
pub use locator::DropTarget;
pub use mutations::{Destination, Mutation, MutationError, MutationResult, Placement};
pub use sensor::{ActivationConstraint, Point, PointerSensor, SensorEvent};
pub use session::{EditSession, PersistenceSink};
pub use templates::{leaf_styles, materialize, Template};

// Re-export model types for convenience
pub use pagecraft_model::{
    IdGenerator, Node, NodeId, NodeKind, SequentialIdGenerator, Styles, MAX_DEPTH,
};
