//! Per-connection WebSocket session.
//!
//! Each upgraded `/ws` connection runs two loops:
//!
//! - **Writer task**: drains the user's `mpsc` channel, encodes each
//!   envelope to JSON and writes it as a text frame.  It ends when every
//!   sender has been dropped (the user left the pool) or a write fails.
//! - **Reader loop** (this task): decodes inbound text frames and hands them
//!   to [`ChatRelay::handle_inbound`].
//!
//! A malformed frame is logged and skipped; it does not end the session.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use chat_core::{decode_envelope, encode_envelope, Envelope};

use crate::application::ChatRelay;

/// Runs the complete lifecycle of one user connection.
pub async fn handle_socket(socket: WebSocket, relay: Arc<ChatRelay>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Envelope>();

    let user_id = relay.join(tx).await;

    // ── Writer task ───────────────────────────────────────────────────────────
    tokio::spawn(async move {
        while let Some(envelope) = rx.recv().await {
            let json = match encode_envelope(&envelope) {
                Ok(json) => json,
                Err(e) => {
                    error!("user #{user_id}: failed to encode envelope: {e}");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(json)).await.is_err() {
                debug!("user #{user_id}: WebSocket send failed (client gone)");
                break;
            }
        }
    });

    // ── Reader loop ───────────────────────────────────────────────────────────
    loop {
        match ws_rx.next().await {
            Some(Ok(Message::Text(json))) => {
                let envelope = match decode_envelope(&json) {
                    Ok(envelope) => envelope,
                    Err(e) => {
                        warn!("user #{user_id}: {e}");
                        continue;
                    }
                };
                if let Err(e) = relay.handle_inbound(user_id, &envelope).await {
                    warn!("{e}");
                }
            }
            Some(Ok(Message::Close(_))) | None => {
                debug!("user #{user_id}: connection closed");
                relay.announce_quit(user_id).await;
                break;
            }
            Some(Ok(Message::Binary(_))) => {
                warn!("user #{user_id}: unexpected binary frame (ignored)");
            }
            Some(Ok(_)) => {
                // Ping/Pong are answered by axum.
            }
            Some(Err(e)) => {
                warn!("user #{user_id}: WebSocket error: {e}");
                break;
            }
        }
    }

    // Dropping the pool's sender lets the writer task drain and exit.
    relay.leave(user_id).await;
}
