use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch, RwLock};

use super::push_id::PushIdGenerator;
use super::tree::{get_at, merge_at, normalize, overlaps, set_at};
use super::{child_path, path_segments, ContentStore, StoreError, Subscription};

/// Buffered write notifications per subscriber before it must resync.
const CHANGE_BUFFER: usize = 256;

/// The content tree held in process.
///
/// Same semantics as the hosted store: nulls delete, pushes get sortable
/// ids, subscribers see a fresh snapshot after every write that touches
/// their path. Cloning shares the tree.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

struct Inner {
    tree: RwLock<Value>,
    changes: broadcast::Sender<Vec<String>>,
    ids: PushIdGenerator,
}

impl Inner {
    async fn read(&self, segments: &[String]) -> Value {
        let refs: Vec<&str> = segments.iter().map(String::as_str).collect();
        get_at(&*self.tree.read().await, &refs)
    }

    fn notify(&self, segments: &[&str]) {
        // No receivers is fine.
        let _ = self
            .changes
            .send(segments.iter().map(|s| s.to_string()).collect());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_data(Value::Null)
    }

    /// A store seeded with `data` as its root.
    pub fn with_data(data: Value) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self {
            inner: Arc::new(Inner {
                tree: RwLock::new(normalize(data)),
                changes,
                ids: PushIdGenerator::new(),
            }),
        }
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Value, StoreError> {
        let segments = path_segments(path)?;
        Ok(get_at(&*self.inner.tree.read().await, &segments))
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let segments = path_segments(path)?;
        set_at(&mut *self.inner.tree.write().await, &segments, value);
        self.inner.notify(&segments);
        Ok(())
    }

    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError> {
        path_segments(path)?;
        let id = self.inner.ids.next_id();
        self.set(&child_path(path, &id), value).await?;
        Ok(id)
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        let segments = path_segments(path)?;
        for key in fields.keys() {
            path_segments(key)?;
        }
        merge_at(&mut *self.inner.tree.write().await, &segments, fields);
        self.inner.notify(&segments);
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        self.set(path, Value::Null).await
    }

    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError> {
        let segments: Vec<String> = path_segments(path)?
            .into_iter()
            .map(str::to_string)
            .collect();

        // Listen before reading so no write slips between the two.
        let mut changes = self.inner.changes.subscribe();
        let (tx, rx) = watch::channel(self.inner.read(&segments).await);

        let inner = Arc::clone(&self.inner);
        let watched = segments.clone();
        let task = tokio::spawn(async move {
            let watched_refs: Vec<&str> = watched.iter().map(String::as_str).collect();
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    change = changes.recv() => match change {
                        Ok(written) => {
                            let written_refs: Vec<&str> = written.iter().map(String::as_str).collect();
                            if !overlaps(&watched_refs, &written_refs) {
                                continue;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::debug!(skipped, "Subscriber lagged, resyncing");
                        }
                        Err(RecvError::Closed) => break,
                    },
                }

                let snapshot = inner.read(&watched).await;
                tx.send_if_modified(|current| {
                    if *current == snapshot {
                        false
                    } else {
                        *current = snapshot;
                        true
                    }
                });
            }
        });

        Ok(Subscription::new(segments.join("/"), rx, task))
    }
}
