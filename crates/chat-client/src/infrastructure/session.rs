//! The client session loop.
//!
//! 1. Connect to `config.ws_url` and send the `populate` greeting.
//! 2. `tokio::select!` over two event sources until the session ends:
//!    - inbound WebSocket frames → [`ChatController::handle_envelope`]
//!    - typed lines → [`ChatController::submit`] → outbound `Text` frame
//! 3. On `close` from the server: close the socket, await the stop request,
//!    return [`SessionEnd::ServerClosed`].
//!
//! Frames that are not valid envelopes, and envelopes the controller cannot
//! parse, are logged and skipped.

use anyhow::Context;
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, Message},
};
use tracing::{debug, info, warn};

use chat_core::{decode_envelope, encode_envelope, Envelope};

use crate::application::{ChatController, ChatView, Flow};
use crate::domain::ClientConfig;
use crate::infrastructure::stop::StopRequester;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The server sent `close`; the stop request has been issued.
    ServerClosed,
    /// The socket closed or failed without a `close` command.
    ConnectionLost,
    /// The input stream ended (EOF on stdin).
    InputClosed,
}

/// Runs one chat session to completion.
///
/// # Errors
///
/// Returns an error if the connection cannot be established or a frame
/// cannot be written.  A session that ends for any of the reasons in
/// [`SessionEnd`] returns `Ok`.
pub async fn run_session<V: ChatView>(
    config: &ClientConfig,
    mut input: mpsc::Receiver<String>,
    view: &mut V,
    stopper: &dyn StopRequester,
) -> anyhow::Result<SessionEnd> {
    let (ws_stream, _response) = connect_async(config.ws_url.as_str())
        .await
        .with_context(|| format!("failed to connect to {}", config.ws_url))?;

    info!("connected to {}", config.ws_url);

    let (mut ws_tx, mut ws_rx) = ws_stream.split();
    let mut controller = ChatController::new();

    send_envelope(&mut ws_tx, &ChatController::greeting())
        .await
        .context("failed to send greeting")?;

    loop {
        tokio::select! {
            frame = ws_rx.next() => {
                let json = match frame {
                    Some(Ok(Message::Text(json))) => json,
                    Some(Ok(Message::Close(_))) | None => {
                        info!("server closed the connection");
                        return Ok(SessionEnd::ConnectionLost);
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        warn!("WebSocket error: {e}");
                        return Ok(SessionEnd::ConnectionLost);
                    }
                };

                let envelope = match decode_envelope(&json) {
                    Ok(envelope) => envelope,
                    Err(e) => {
                        warn!("ignoring frame: {e}");
                        continue;
                    }
                };

                match controller.handle_envelope(&envelope, view) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Disconnect) => {
                        if let Err(e) = ws_tx.close().await {
                            debug!("error closing WebSocket: {e}");
                        }
                        stopper.request_stop().await;
                        return Ok(SessionEnd::ServerClosed);
                    }
                    Err(e) => warn!("ignoring envelope: {e}"),
                }
            }

            line = input.recv() => {
                let Some(line) = line else {
                    debug!("input closed; leaving the chat");
                    if let Err(e) = ws_tx.close().await {
                        debug!("error closing WebSocket: {e}");
                    }
                    return Ok(SessionEnd::InputClosed);
                };

                if let Some(envelope) = controller.submit(&line, view) {
                    send_envelope(&mut ws_tx, &envelope)
                        .await
                        .context("failed to send message")?;
                }
            }
        }
    }
}

async fn send_envelope<S>(sink: &mut S, envelope: &Envelope) -> anyhow::Result<()>
where
    S: Sink<Message, Error = WsError> + Unpin,
{
    let json = encode_envelope(envelope)?;
    sink.send(Message::Text(json)).await?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
