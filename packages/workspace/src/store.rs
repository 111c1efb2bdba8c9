//! Blob stores for the persisted document

use pagecraft_editor::Document;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use crate::error::{WorkspaceError, WorkspaceResult};

/// Storage for one serialized document
pub trait BlobStore: Send + Sync {
    /// Read the stored blob; `None` when nothing has been saved yet
    fn read(&self) -> WorkspaceResult<Option<Value>>;

    fn write(&self, blob: &Value) -> WorkspaceResult<()>;
}

/// JSON file on disk, replaced atomically on every write
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl BlobStore for FileStore {
    fn read(&self) -> WorkspaceResult<Option<Value>> {
        let source = match fs::read_to_string(&self.path) {
            Ok(source) => source,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(WorkspaceError::io(&self.path, err)),
        };
        Ok(Some(serde_json::from_str(&source)?))
    }

    fn write(&self, blob: &Value) -> WorkspaceResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| WorkspaceError::io(parent, err))?;
        }

        let temp = self.temp_path();
        let contents = serde_json::to_string_pretty(blob)?;
        fs::write(&temp, contents).map_err(|err| WorkspaceError::io(&temp, err))?;
        fs::rename(&temp, &self.path).map_err(|err| WorkspaceError::io(&self.path, err))?;

        debug!(path = %self.path.display(), "Wrote document");
        Ok(())
    }
}

/// In-memory store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Arc<Mutex<Option<Value>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: Value) -> Self {
        let store = Self::default();
        *store.slot() = Some(blob);
        store
    }

    /// Latest written blob
    pub fn blob(&self) -> Option<Value> {
        self.slot().clone()
    }

    /// Number of completed writes
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Value>> {
        self.blob.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BlobStore for MemoryStore {
    fn read(&self) -> WorkspaceResult<Option<Value>> {
        Ok(self.blob())
    }

    fn write(&self, blob: &Value) -> WorkspaceResult<()> {
        *self.slot() = Some(blob.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Load the stored document. Missing, unreadable or malformed blobs all
/// yield an empty document so the session can start.
pub fn load_document(store: &dyn BlobStore) -> Document {
    match store.read() {
        Ok(Some(blob)) => Document::from_blob(blob),
        Ok(None) => {
            info!("No saved document, starting empty");
            Document::new()
        }
        Err(err) => {
            warn!(error = %err, "Could not read saved document, starting empty");
            Document::new()
        }
    }
}
