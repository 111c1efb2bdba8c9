//! # Pagecraft Workspace
//!
//! Where documents live between sessions.
//!
//! - [`BlobStore`]: where the serialized page is kept (a JSON file, or memory)
//! - [`load_document`]: start a session from whatever the store holds,
//!   degrading to an empty page when it is missing or malformed
//! - [`DebouncedWriter`]: background task that coalesces snapshots and
//!   writes the latest one once edits go quiet

pub mod error;
pub mod store;
pub mod writer;

pub use error::{WorkspaceError, WorkspaceResult};
pub use store::{load_document, BlobStore, FileStore, MemoryStore};
pub use writer::{DebouncedWriter, WriterHandle};
