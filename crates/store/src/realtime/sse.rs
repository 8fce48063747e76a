//! The realtime store's streaming protocol.
//!
//! A subscription is a long-lived `GET` answered as `text/event-stream`.
//! `put` replaces the value at a path relative to the watched location,
//! `patch` replaces named children of one, `keep-alive` carries nothing,
//! and `cancel` / `auth_revoked` end the stream.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::tree::{merge_at, set_at};
use super::{path_segments, StoreError};

/// One raw server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    pub event: String,
    pub data: String,
}

/// Splits a byte stream into [`SseEvent`]s.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Feed a chunk and return every event it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend(chunk.iter().copied().filter(|&b| b != b'\r'));

        let mut events = Vec::new();
        while let Some(end) = self.buffer.windows(2).position(|w| w == b"\n\n") {
            let block: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if let Some(event) = parse_block(&String::from_utf8_lossy(&block)) {
                events.push(event);
            }
        }
        events
    }
}

fn parse_block(block: &str) -> Option<SseEvent> {
    let mut event = String::new();
    let mut data: Vec<&str> = Vec::new();

    for line in block.lines() {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        let (field, value) = line.split_once(':').unwrap_or((line, ""));
        let value = value.strip_prefix(' ').unwrap_or(value);
        match field {
            "event" => event = value.to_string(),
            "data" => data.push(value),
            _ => {}
        }
    }

    if event.is_empty() && data.is_empty() {
        return None;
    }
    Some(SseEvent {
        event: if event.is_empty() { "message".into() } else { event },
        data: data.join("\n"),
    })
}

/// A decoded store stream event.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Map<String, Value> },
    KeepAlive,
    /// The store closed the stream: a rules denial or revoked credentials.
    Revoked(String),
    Other(String),
}

#[derive(Deserialize)]
struct Payload {
    path: String,
    data: Value,
}

impl TryFrom<&SseEvent> for StreamEvent {
    type Error = StoreError;

    fn try_from(raw: &SseEvent) -> Result<Self, Self::Error> {
        let payload = || {
            serde_json::from_str::<Payload>(&raw.data)
                .map_err(|e| StoreError::Decode(format!("{} event: {e}", raw.event)))
        };

        match raw.event.as_str() {
            "put" => {
                let Payload { path, data } = payload()?;
                Ok(Self::Put { path, data })
            }
            "patch" => {
                let Payload { path, data } = payload()?;
                match data {
                    Value::Object(map) => Ok(Self::Patch { path, data: map }),
                    other => Err(StoreError::Decode(format!(
                        "patch event data must be an object, got {other}"
                    ))),
                }
            }
            "keep-alive" => Ok(Self::KeepAlive),
            "cancel" | "auth_revoked" => Ok(Self::Revoked(format!(
                "{}: {}",
                raw.event,
                raw.data.trim_matches('"')
            ))),
            other => Ok(Self::Other(other.to_string())),
        }
    }
}

impl StreamEvent {
    /// Apply a data event to the local copy of the watched location.
    ///
    /// Returns whether the tree may have changed.
    pub fn apply(self, tree: &mut Value) -> Result<bool, StoreError> {
        match self {
            Self::Put { path, data } => {
                let segments = path_segments(&path)?;
                set_at(tree, &segments, data);
                Ok(true)
            }
            Self::Patch { path, data } => {
                let segments = path_segments(&path)?;
                merge_at(tree, &segments, data);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
