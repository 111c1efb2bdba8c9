//! Open the configured page as an edit session backed by the debounced writer

use anyhow::Result;
use pagecraft_editor::{ActivationConstraint, EditSession};
use pagecraft_workspace::{load_document, DebouncedWriter, FileStore};
use tracing::debug;

use crate::config::Config;

pub struct Project {
    pub session: EditSession,
    writer: DebouncedWriter,
}

impl Project {
    /// Must be called from within the tokio runtime
    pub fn open(cwd: &str) -> Result<Self> {
        let config = Config::load(cwd)?;
        let path = config.get_document_path(cwd);
        debug!(path = %path.display(), "Opening page");

        let store = FileStore::new(path);
        let document = load_document(&store);
        let writer = DebouncedWriter::spawn(store, config.debounce());
        let session = EditSession::new("cli", document)
            .with_activation(ActivationConstraint {
                distance: config.activation_distance,
            })
            .with_sink(writer.handle());

        Ok(Self { session, writer })
    }

    /// Flush pending writes and stop the writer
    pub async fn close(self) -> Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
