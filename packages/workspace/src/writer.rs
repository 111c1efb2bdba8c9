//! # Debounced Writer
//!
//! Fire-and-forget persistence for an edit session.
//!
//! ```text
//! EditSession ──persist(snapshot)──▶ WriterHandle ──channel──▶ writer task
//!                                                                  │
//!                           quiet period elapsed / flush / shutdown│
//!                                                                  ▼
//!                                                  spawn_blocking(store.write)
//! ```
//!
//! Only the newest snapshot matters: each one replaces the pending one and
//! restarts the quiet period. Write failures are logged and dropped; the
//! in-memory document stays authoritative.

use pagecraft_editor::PersistenceSink;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::store::BlobStore;

enum Command {
    Snapshot(Value),
    Flush(oneshot::Sender<()>),
    Shutdown,
}

/// Cheap, cloneable sender side of the writer
#[derive(Debug, Clone)]
pub struct WriterHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl WriterHandle {
    /// Write any pending snapshot now and wait for it
    pub async fn flush(&self) -> WorkspaceResult<()> {
        let (done, wait) = oneshot::channel();
        self.tx
            .send(Command::Flush(done))
            .map_err(|_| WorkspaceError::WriterStopped)?;
        wait.await.map_err(|_| WorkspaceError::WriterStopped)
    }
}

impl PersistenceSink for WriterHandle {
    fn persist(&self, snapshot: Value) {
        if self.tx.send(Command::Snapshot(snapshot)).is_err() {
            warn!("Persistence writer has stopped, dropping snapshot");
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Snapshot(_) => f.write_str("Snapshot"),
            Command::Flush(_) => f.write_str("Flush"),
            Command::Shutdown => f.write_str("Shutdown"),
        }
    }
}

/// Owner of the background writer task
pub struct DebouncedWriter {
    handle: WriterHandle,
    task: JoinHandle<()>,
}

impl DebouncedWriter {
    /// Start the writer on the current tokio runtime
    pub fn spawn<S>(store: S, quiet: Duration) -> Self
    where
        S: BlobStore + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(Arc::new(store), quiet, rx));
        info!(quiet_ms = quiet.as_millis() as u64, "Persistence writer started");

        Self {
            handle: WriterHandle { tx },
            task,
        }
    }

    /// Sender to hand to an [`EditSession`](pagecraft_editor::EditSession)
    pub fn handle(&self) -> WriterHandle {
        self.handle.clone()
    }

    pub async fn flush(&self) -> WorkspaceResult<()> {
        self.handle.flush().await
    }

    /// Write whatever is pending and stop the task
    pub async fn shutdown(self) -> WorkspaceResult<()> {
        // A closed channel means the task already ended; still join it
        let _ = self.handle.tx.send(Command::Shutdown);
        self.task.await.map_err(|err| {
            warn!(error = %err, "Persistence writer task failed");
            WorkspaceError::WriterStopped
        })
    }
}

async fn run<S>(store: Arc<S>, quiet: Duration, mut rx: mpsc::UnboundedReceiver<Command>)
where
    S: BlobStore + 'static,
{
    let mut pending: Option<Value> = None;

    loop {
        let command = if pending.is_some() {
            match tokio::time::timeout(quiet, rx.recv()).await {
                Ok(command) => command,
                Err(_elapsed) => {
                    write_pending(&store, &mut pending).await;
                    continue;
                }
            }
        } else {
            rx.recv().await
        };

        match command {
            Some(Command::Snapshot(snapshot)) => {
                if pending.replace(snapshot).is_some() {
                    debug!("Snapshot superseded before write");
                }
            }
            Some(Command::Flush(done)) => {
                write_pending(&store, &mut pending).await;
                let _ = done.send(());
            }
            Some(Command::Shutdown) | None => {
                write_pending(&store, &mut pending).await;
                break;
            }
        }
    }

    info!("Persistence writer stopped");
}

async fn write_pending<S>(store: &Arc<S>, pending: &mut Option<Value>)
where
    S: BlobStore + 'static,
{
    let Some(snapshot) = pending.take() else {
        return;
    };

    let store = Arc::clone(store);
    match tokio::task::spawn_blocking(move || store.write(&snapshot)).await {
        Ok(Ok(())) => debug!("Snapshot persisted"),
        Ok(Err(err)) => warn!(error = %err, "Failed to persist snapshot"),
        Err(err) => warn!(error = %err, "Persistence write panicked"),
    }
}
