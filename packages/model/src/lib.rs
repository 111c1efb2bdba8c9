//! # Pagecraft Model
//!
//! The component tree shape shared by every other crate: nodes, ids and the
//! JSON wire format the persistence layer stores.

pub mod error;
pub mod id;
pub mod node;
pub mod serializer;

pub use error::{ModelError, ModelResult};
pub use id::{IdGenerator, NodeId, SequentialIdGenerator, UuidGenerator, CANVAS_ID, PALETTE_SURFACE_ID};
pub use node::{styles, Node, NodeKind, Styles, MAX_DEPTH};
pub use serializer::{deserialize, deserialize_str, serialize, serialize_to_string};
