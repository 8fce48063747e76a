use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use studio_core::collection::Collection;
use studio_store::feed::FeedReceivers;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// One pushed frame: a collection's full current value.
#[derive(Serialize)]
struct LiveFrame<'a, T: Serialize> {
    collection: &'static str,
    data: &'a T,
}

fn frame<T: Serialize>(collection: Collection, data: &T) -> Option<Message> {
    let frame = LiveFrame {
        collection: collection.name(),
        data,
    };
    match serde_json::to_string(&frame) {
        Ok(text) => Some(Message::Text(text.into())),
        Err(e) => {
            tracing::error!(collection = collection.name(), error = %e, "Live frame not encoded");
            None
        }
    }
}

/// GET /api/v1/site/live
///
/// Upgrades to a WebSocket that receives every collection on connect and
/// again whenever it changes.
pub async fn live_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let receivers = state.feed.watch();
    let shutdown = state.shutdown.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, receivers, shutdown))
}

/// Serve one live connection until either side closes or the server stops.
///
/// The receivers are this connection's own clones; dropping them on return
/// releases the connection's hold on the feed.
async fn handle_socket(socket: WebSocket, mut feed: FeedReceivers, shutdown: CancellationToken) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "Live connection opened");

    let (mut sink, mut stream) = socket.split();

    let initial = [
        frame(Collection::Gallery, &*feed.gallery.borrow_and_update()),
        frame(Collection::Projects, &*feed.projects.borrow_and_update()),
        frame(Collection::Services, &*feed.services.borrow_and_update()),
        frame(Collection::Profile, &*feed.profile.borrow_and_update()),
    ];
    for message in initial.into_iter().flatten() {
        if sink.send(message).await.is_err() {
            tracing::debug!(conn_id = %conn_id, "Live connection closed during greeting");
            return;
        }
    }

    loop {
        let message = tokio::select! {
            _ = shutdown.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }
            changed = feed.gallery.changed() => match changed {
                Ok(()) => frame(Collection::Gallery, &*feed.gallery.borrow_and_update()),
                Err(_) => break,
            },
            changed = feed.projects.changed() => match changed {
                Ok(()) => frame(Collection::Projects, &*feed.projects.borrow_and_update()),
                Err(_) => break,
            },
            changed = feed.services.changed() => match changed {
                Ok(()) => frame(Collection::Services, &*feed.services.borrow_and_update()),
                Err(_) => break,
            },
            changed = feed.profile.changed() => match changed {
                Ok(()) => frame(Collection::Profile, &*feed.profile.borrow_and_update()),
                Err(_) => break,
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => None,
                Some(Err(e)) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Live receive error");
                    break;
                }
            },
        };

        if let Some(message) = message {
            if sink.send(message).await.is_err() {
                break;
            }
        }
    }

    tracing::info!(conn_id = %conn_id, "Live connection closed");
}
