//! HTTP routes and the server lifecycle.
//!
//! | Route   | Behavior                                                   |
//! |---------|------------------------------------------------------------|
//! | `/ws`   | WebSocket upgrade, then [`handle_socket`]                  |
//! | `/stop` | Returns `stop`.  Clients hit it after receiving `close`.   |
//! | `/quit` | Returns `quit ok` and starts a graceful shutdown           |
//! | other   | File from the static directory, falling back to `chat.html`|
//!
//! # Shutdown sequence
//!
//! 1. `/quit` (or Ctrl+C, wired up in `main.rs`) notifies [`AppState::quit`].
//! 2. The graceful-shutdown future broadcasts `close` to every user and
//!    axum stops accepting connections.
//! 3. [`serve`] waits up to `shutdown_grace` for users to disconnect.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

use crate::application::ChatRelay;
use crate::domain::ServerConfig;
use crate::infrastructure::ws_session::handle_socket;

/// Page served for any path the static directory does not contain.
const FALLBACK_PAGE: &str = "chat.html";

/// State shared by every route handler.
#[derive(Clone, Default)]
pub struct AppState {
    pub relay: Arc<ChatRelay>,
    /// Fired once to request a graceful shutdown.
    pub quit: Arc<Notify>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builds the axum router for the given state and static directory.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let files =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join(FALLBACK_PAGE)));

    Router::new()
        .route("/quit", get(quit))
        .route("/stop", get(stop))
        .route("/ws", get(ws_upgrade))
        .fallback_service(files)
        .with_state(state)
}

/// Binds `config.bind_addr` and serves until a shutdown is requested.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_server(config: ServerConfig, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind chat server on {}", config.bind_addr))?;

    info!("chat server listening on {}", config.bind_addr);

    serve(listener, &config, state).await
}

/// Serves on an already-bound listener until [`AppState::quit`] fires.
///
/// Split from [`run_server`] so tests can bind port 0 and learn the address.
///
/// # Errors
///
/// Returns an error if axum's accept loop fails.
pub async fn serve(
    listener: TcpListener,
    config: &ServerConfig,
    state: AppState,
) -> anyhow::Result<()> {
    let app = build_router(state.clone(), &config.static_dir);

    let relay = Arc::clone(&state.relay);
    let quit = Arc::clone(&state.quit);
    let shutdown = async move {
        quit.notified().await;
        info!("shutdown requested");
        relay.broadcast_close().await;
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("chat server failed")?;

    if !state.relay.wait_until_empty(config.shutdown_grace).await {
        warn!(
            "{} user(s) still connected after {:?}; exiting anyway",
            state.relay.len().await,
            config.shutdown_grace
        );
    }

    info!("chat server stopped");
    Ok(())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn quit(State(state): State<AppState>) -> &'static str {
    info!("quit requested over HTTP");
    state.quit.notify_one();
    "quit ok"
}

async fn stop() -> &'static str {
    "stop"
}

async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.relay))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
