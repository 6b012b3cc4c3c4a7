//! WebSocket upgrade handler.
//!
//! Sockets start anonymous. An `auth` message attaches the socket to an
//! identity in the registry; from then on pushes for that identity are
//! forwarded to it in order.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use crate::state::AppState;

/// How long the writer may take to flush and send its Close frame.
const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// GET /ws
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

/// Drives one socket until the peer leaves or the registry evicts it.
async fn handle_socket(state: AppState, socket: WebSocket) {
    let registry = Arc::clone(&state.registry);
    let (handle, mut outbound_rx) = registry.connect();
    let conn_id = handle.id;
    let (mut ws_tx, mut ws_rx) = socket.split();

    let mut forwarder = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_tx.close().await;
    });

    loop {
        tokio::select! {
            _ = handle.closed() => {
                info!(conn_id = %conn_id, "WebSocket closed by server");
                break;
            }
            frame = ws_rx.next() => match frame {
                Some(Ok(Message::Text(text))) => registry.handle_inbound(&handle, text.as_str()),
                Some(Ok(Message::Close(_))) | None => break,
                // ping/pong frames are answered by axum
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
            }
        }
    }

    registry.unregister(conn_id);
    handle.mark_dead();
    // Last sender gone: the writer drains, sends Close and exits.
    drop(handle);
    if tokio::time::timeout(CLOSE_GRACE, &mut forwarder).await.is_err() {
        forwarder.abort();
    }
    debug!(conn_id = %conn_id, "WebSocket connection finished");
}
