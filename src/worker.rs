//! Worker offload: drive a [`DocumentIndex`] from a dedicated thread.
//!
//! All requests travel one channel to a single consumer thread that owns
//! the index, so call order is preserved and the single-writer rule holds
//! without locking shared memory. Each request carries its own bounded
//! reply channel; [`IndexHandle`] methods block until the reply arrives.
//! Operations are a closed [`IndexTask`] enum dispatched with `match`, so
//! adding an operation is a compile-time exhaustiveness check rather than a
//! runtime name lookup.

use crossbeam_channel::{Sender, bounded, unbounded};
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::data::{DocKey, Document};
use crate::error::{FindexError, Result};
use crate::index::DocumentIndex;
use crate::index::config::IndexConfig;
use crate::search::{SearchRequest, SearchResults};
use crate::snapshot::IndexSnapshot;

/// One request to the worker thread.
enum IndexTask {
    Add {
        doc: Document,
        reply: Sender<()>,
    },
    Update {
        doc: Document,
        reply: Sender<()>,
    },
    Remove {
        key: DocKey,
        reply: Sender<bool>,
    },
    Search {
        request: SearchRequest,
        reply: Sender<SearchResults>,
    },
    Export {
        reply: Sender<IndexSnapshot>,
    },
    Len {
        reply: Sender<usize>,
    },
    Shutdown,
}

/// Spawns and owns the worker thread for one logical index.
pub struct IndexWorker;

impl IndexWorker {
    /// Build an index from `config` and hand it to a new worker thread.
    ///
    /// Configuration errors surface here, before the thread starts.
    pub fn spawn(config: IndexConfig) -> Result<IndexHandle> {
        let mut index = DocumentIndex::new(config)?;
        let (sender, receiver) = unbounded::<IndexTask>();

        let thread = std::thread::Builder::new()
            .name("findex-worker".to_string())
            .spawn(move || {
                while let Ok(task) = receiver.recv() {
                    match task {
                        IndexTask::Add { doc, reply } => {
                            index.add(doc);
                            let _ = reply.send(());
                        }
                        IndexTask::Update { doc, reply } => {
                            index.update(doc);
                            let _ = reply.send(());
                        }
                        IndexTask::Remove { key, reply } => {
                            let _ = reply.send(index.remove(&key));
                        }
                        IndexTask::Search { request, reply } => {
                            let _ = reply.send(index.search(&request));
                        }
                        IndexTask::Export { reply } => {
                            let _ = reply.send(index.export());
                        }
                        IndexTask::Len { reply } => {
                            let _ = reply.send(index.len());
                        }
                        IndexTask::Shutdown => break,
                    }
                }
                debug!("index worker shut down");
            })
            .map_err(|e| FindexError::worker(format!("failed to spawn worker: {e}")))?;

        Ok(IndexHandle {
            inner: Arc::new(HandleInner {
                sender,
                thread: Mutex::new(Some(thread)),
            }),
        })
    }
}

/// Handle to a worker-owned index.
///
/// Methods mirror [`DocumentIndex`] and block until the worker replies.
/// The handle is cheap to clone and may be shared across threads; the
/// worker shuts down and joins when the last clone is dropped.
#[derive(Clone)]
pub struct IndexHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    sender: Sender<IndexTask>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl IndexHandle {
    fn request<T>(&self, build: impl FnOnce(Sender<T>) -> IndexTask) -> Result<T> {
        let (reply, response) = bounded(1);
        self.inner
            .sender
            .send(build(reply))
            .map_err(|_| FindexError::worker("worker thread is gone"))?;
        response
            .recv()
            .map_err(|_| FindexError::worker("worker dropped the request"))
    }

    /// Add a document.
    pub fn add(&self, doc: Document) -> Result<()> {
        self.request(|reply| IndexTask::Add { doc, reply })
    }

    /// Update a document (upsert).
    pub fn update(&self, doc: Document) -> Result<()> {
        self.request(|reply| IndexTask::Update { doc, reply })
    }

    /// Remove a document. Returns whether it was present.
    pub fn remove(&self, key: impl Into<DocKey>) -> Result<bool> {
        let key = key.into();
        self.request(|reply| IndexTask::Remove { key, reply })
    }

    /// Execute a search.
    pub fn search(&self, request: SearchRequest) -> Result<SearchResults> {
        self.request(|reply| IndexTask::Search { request, reply })
    }

    /// Export a snapshot of the worker's index.
    pub fn export(&self) -> Result<IndexSnapshot> {
        self.request(|reply| IndexTask::Export { reply })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> Result<usize> {
        self.request(|reply| IndexTask::Len { reply })
    }
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        let _ = self.sender.send(IndexTask::Shutdown);
        if let Some(thread) = self.thread.lock().take() {
            let _ = thread.join();
        }
    }
}
