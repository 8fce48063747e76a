use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::watch;

use super::backoff::ReconnectConfig;
use super::sse::{SseDecoder, StreamEvent};
use super::{path_segments, ContentStore, StoreError, Subscription};

/// The hosted realtime database, spoken to over its REST interface.
///
/// Every location is addressable as `{base}/{path}.json`. Subscriptions
/// hold a streaming `GET` open and reconnect with backoff if it drops.
#[derive(Clone)]
pub struct RealtimeDbStore {
    client: reqwest::Client,
    base_url: String,
    auth: Option<String>,
    reconnect: ReconnectConfig,
}

/// Body returned by `POST`: the generated child id.
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

/// How one streaming connection ended.
enum StreamEnd {
    /// The server closed the connection; reopen it.
    Closed,
    /// The server revoked the stream; stop.
    Revoked(String),
}

impl RealtimeDbStore {
    /// * `base_url` - database root, e.g. `https://<project>.firebaseio.com`.
    /// * `auth`     - database secret or ID token sent as `?auth=`.
    pub fn new(base_url: impl Into<String>, auth: Option<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, auth)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        auth: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            reconnect: ReconnectConfig::default(),
        }
    }

    pub fn with_reconnect(mut self, reconnect: ReconnectConfig) -> Self {
        self.reconnect = reconnect;
        self
    }

    fn url(&self, path: &str) -> Result<String, StoreError> {
        let segments = path_segments(path)?;
        Ok(format!("{}/{}.json", self.base_url, segments.join("/")))
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, StoreError> {
        let mut builder = self.client.request(method, self.url(path)?);
        if let Some(auth) = &self.auth {
            builder = builder.query(&[("auth", auth)]);
        }
        Ok(builder)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send(builder: reqwest::RequestBuilder) -> Result<String, StoreError> {
        let response = Self::ensure_success(builder.send().await?).await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ContentStore for RealtimeDbStore {
    async fn get(&self, path: &str) -> Result<Value, StoreError> {
        let body = Self::send(self.request(Method::GET, path)?).await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        Self::send(self.request(Method::PUT, path)?.json(&value)).await?;
        Ok(())
    }

    async fn push(&self, path: &str, value: Value) -> Result<String, StoreError> {
        let body = Self::send(self.request(Method::POST, path)?.json(&value)).await?;
        let PushResponse { name } =
            serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(name)
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        Self::send(self.request(Method::PATCH, path)?.json(&fields)).await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        Self::send(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }

    /// The snapshot reads `Null` until the first `put` arrives.
    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError> {
        let watched = path_segments(path)?.join("/");
        let builder = self
            .request(Method::GET, path)?
            .header(ACCEPT, "text/event-stream");
        let (tx, rx) = watch::channel(Value::Null);

        let reconnect = self.reconnect.clone();
        let label = watched.clone();
        let task = tokio::spawn(async move {
            let mut delay = reconnect.initial_delay;
            loop {
                let Some(attempt) = builder.try_clone() else {
                    tracing::error!(path = %label, "Subscription request cannot be retried");
                    break;
                };
                match stream_once(attempt, &tx).await {
                    Ok(StreamEnd::Revoked(reason)) => {
                        tracing::warn!(path = %label, reason = %reason, "Subscription ended by store");
                        break;
                    }
                    Ok(StreamEnd::Closed) => {
                        tracing::debug!(path = %label, "Subscription stream closed, reopening");
                        delay = reconnect.initial_delay;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %label,
                            error = %e,
                            delay_ms = delay.as_millis() as u64,
                            "Subscription stream failed",
                        );
                    }
                }

                tokio::select! {
                    _ = tx.closed() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
                delay = reconnect.next_delay(delay);
            }
        });

        Ok(Subscription::new(watched, rx, task))
    }
}

/// Hold one streaming connection open, publishing a snapshot after every
/// data event.
async fn stream_once(
    builder: reqwest::RequestBuilder,
    tx: &watch::Sender<Value>,
) -> Result<StreamEnd, StoreError> {
    let response = RealtimeDbStore::ensure_success(builder.send().await?).await?;
    let mut body = response.bytes_stream();
    let mut decoder = SseDecoder::default();
    let mut tree = tx.borrow().clone();

    while let Some(chunk) = body.next().await {
        for raw in decoder.push(&chunk?) {
            let event = match StreamEvent::try_from(&raw) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed stream event");
                    continue;
                }
            };
            match event {
                StreamEvent::Revoked(reason) => return Ok(StreamEnd::Revoked(reason)),
                StreamEvent::KeepAlive => {}
                StreamEvent::Other(name) => tracing::debug!(event = %name, "Ignoring stream event"),
                data_event => match data_event.apply(&mut tree) {
                    Ok(false) => {}
                    Ok(true) => {
                        let snapshot = tree.clone();
                        tx.send_if_modified(|current| {
                            if *current == snapshot {
                                false
                            } else {
                                *current = snapshot;
                                true
                            }
                        });
                    }
                    Err(e) => tracing::warn!(error = %e, "Skipping unappliable stream event"),
                },
            }
        }
    }
    Ok(StreamEnd::Closed)
}
