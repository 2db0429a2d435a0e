//! Host bridge over WebSocket.
//!
//! # Responsibilities
//! - Complete the upgrade and capture the browser-supplied `Origin`
//! - Ask the host for its context as soon as the bridge opens
//! - Feed every inbound frame through the message gateway
//! - Close when the host disconnects or shutdown is triggered
//!
//! # Data Flow
//! ```text
//! Host page ──── text frames ────→ Bridge → MessageGateway::handle
//! Host page ←─── fetch command ─── Bridge
//! ```
//!
//! # Design Decisions
//! - The upgrade is accepted for any origin; trust is decided per message
//!   by the gateway so untrusted senders are recorded as warnings
//! - Frames are handled one at a time per connection, to completion
//! - Frame size is capped by config before the gateway sees the payload

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, HeaderMap},
    response::Response,
};
use uuid::Uuid;

use crate::http::server::AppState;
use crate::observability::metrics;

/// Upgrade handler for `/host`.
pub async fn host_bridge_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Response {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    ws.max_message_size(state.host.max_message_bytes)
        .on_upgrade(move |socket| run_bridge(socket, origin, state))
}

async fn run_bridge(mut socket: WebSocket, origin: String, state: AppState) {
    let connection_id = Uuid::new_v4();
    let mut shutdown = state.shutdown.subscribe();
    metrics::record_host_connection();
    tracing::info!(connection_id = %connection_id, origin = %origin, "Host bridge connected");

    let fetch = Message::Text(state.host.fetch_command.clone().into());
    if let Err(e) = socket.send(fetch).await {
        tracing::warn!(connection_id = %connection_id, error = %e, "Failed to request host context");
        return;
    }

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                let _ = socket.send(Message::Close(None)).await;
                tracing::debug!(connection_id = %connection_id, "Host bridge revoked by shutdown");
                break;
            }
            frame = socket.recv() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let outcome = state.gateway.handle(&origin, text.as_str());
                    tracing::debug!(connection_id = %connection_id, outcome = outcome.label(), "Host message handled");
                }
                Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                    Ok(text) => {
                        let outcome = state.gateway.handle(&origin, text);
                        tracing::debug!(connection_id = %connection_id, outcome = outcome.label(), "Host message handled");
                    }
                    Err(_) => {
                        tracing::debug!(connection_id = %connection_id, "Dropping non-UTF-8 host frame");
                    }
                },
                Some(Ok(Message::Close(_))) | None => break,
                // Ping/pong are answered by the WebSocket layer
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(connection_id = %connection_id, error = %e, "Host bridge read error");
                    break;
                }
            }
        }
    }

    tracing::info!(connection_id = %connection_id, "Host bridge closed");
}
