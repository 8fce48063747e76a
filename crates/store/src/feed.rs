//! Live, ordered views of the four content collections.
//!
//! [`ContentFeed`] subscribes once to `admin/gallery`, `admin/projects`,
//! `admin/services` and `admin/profile`, translates every snapshot into
//! typed records and republishes them on `watch` channels. A snapshot
//! replaces the previous list wholesale.

use std::sync::Arc;

use serde_json::Value;
use studio_core::collection::{decode_collection, profile_from_snapshot, Collection};
use studio_core::content::{GalleryItem, Profile, Project, Service};
use studio_core::site::SiteContent;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::realtime::{ContentStore, StoreError, Subscription};

/// Receivers for every collection, for consumers that react to changes.
#[derive(Clone)]
pub struct FeedReceivers {
    pub gallery: watch::Receiver<Vec<GalleryItem>>,
    pub projects: watch::Receiver<Vec<Project>>,
    pub services: watch::Receiver<Vec<Service>>,
    pub profile: watch::Receiver<Profile>,
}

/// The site's live content.
///
/// Dropping the feed (or calling [`shutdown`](Self::shutdown)) stops the
/// translation tasks and releases their store subscriptions.
pub struct ContentFeed {
    receivers: FeedReceivers,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl ContentFeed {
    /// Subscribe to every collection and start translating snapshots.
    ///
    /// Whatever the store holds at subscription time is available from
    /// [`snapshot`](Self::snapshot) immediately.
    pub async fn start(store: Arc<dyn ContentStore>) -> Result<Self, StoreError> {
        let cancel = CancellationToken::new();

        let gallery_sub = store.subscribe(&Collection::Gallery.path()).await?;
        let projects_sub = store.subscribe(&Collection::Projects.path()).await?;
        let services_sub = store.subscribe(&Collection::Services.path()).await?;
        let profile_sub = store.subscribe(&Collection::Profile.path()).await?;

        let (gallery_tx, gallery) = watch::channel(list::<GalleryItem>(
            Collection::Gallery,
            &gallery_sub.current(),
        ));
        let (projects_tx, projects) =
            watch::channel(list::<Project>(Collection::Projects, &projects_sub.current()));
        let (services_tx, services) =
            watch::channel(list::<Service>(Collection::Services, &services_sub.current()));
        let (profile_tx, profile) = watch::channel(
            profile_from_snapshot(&profile_sub.current()).unwrap_or_default(),
        );

        let tasks = vec![
            spawn_translator(Collection::Gallery, gallery_sub, gallery_tx, cancel.clone(), |v| {
                Some(list(Collection::Gallery, v))
            }),
            spawn_translator(Collection::Projects, projects_sub, projects_tx, cancel.clone(), |v| {
                Some(list(Collection::Projects, v))
            }),
            spawn_translator(Collection::Services, services_sub, services_tx, cancel.clone(), |v| {
                Some(list(Collection::Services, v))
            }),
            spawn_translator(
                Collection::Profile,
                profile_sub,
                profile_tx,
                cancel.clone(),
                profile_from_snapshot,
            ),
        ];

        tracing::info!("Content feed started");
        Ok(Self {
            receivers: FeedReceivers {
                gallery,
                projects,
                services,
                profile,
            },
            cancel,
            tasks,
        })
    }

    /// Current content of every collection.
    pub fn snapshot(&self) -> SiteContent {
        SiteContent {
            gallery: self.receivers.gallery.borrow().clone(),
            projects: self.receivers.projects.borrow().clone(),
            services: self.receivers.services.borrow().clone(),
            profile: self.receivers.profile.borrow().clone(),
        }
    }

    pub fn watch(&self) -> FeedReceivers {
        self.receivers.clone()
    }

    /// Stop translating. Receivers keep their last value.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for ContentFeed {
    fn drop(&mut self) {
        self.cancel.cancel();
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn list<T: studio_core::collection::Keyed>(collection: Collection, snapshot: &Value) -> Vec<T> {
    decode_collection(snapshot, collection.ordering())
}

/// Forward decoded snapshots from `subscription` into `tx` until cancelled.
///
/// A snapshot that decodes to `None` leaves the published value as is.
fn spawn_translator<T, F>(
    collection: Collection,
    mut subscription: Subscription,
    tx: watch::Sender<T>,
    cancel: CancellationToken,
    decode: F,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
    F: Fn(&Value) -> Option<T> + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                next = subscription.changed() => match next {
                    Some(snapshot) => {
                        if let Some(value) = decode(&snapshot) {
                            tx.send_replace(value);
                            tracing::debug!(collection = collection.name(), "Content updated");
                        }
                    }
                    None => {
                        tracing::warn!(
                            collection = collection.name(),
                            "Content subscription ended, keeping last snapshot",
                        );
                        break;
                    }
                },
            }
        }
    })
}
