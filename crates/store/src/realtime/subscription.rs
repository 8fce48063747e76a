use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A live view of one store location.
///
/// Holds the most recent snapshot. The background task that keeps it
/// current is aborted when the subscription is dropped.
pub struct Subscription {
    path: String,
    receiver: watch::Receiver<Value>,
    task: JoinHandle<()>,
}

impl Subscription {
    pub(crate) fn new(path: String, receiver: watch::Receiver<Value>, task: JoinHandle<()>) -> Self {
        Self {
            path,
            receiver,
            task,
        }
    }

    /// The watched path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Latest snapshot.
    pub fn current(&self) -> Value {
        self.receiver.borrow().clone()
    }

    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the feeding task has stopped and no further
    /// snapshots will arrive.
    pub async fn changed(&mut self) -> Option<Value> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// A receiver sharing this subscription's channel. It stops receiving
    /// updates once the subscription is dropped.
    pub fn receiver(&self) -> watch::Receiver<Value> {
        self.receiver.clone()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
