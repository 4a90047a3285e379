//! chat-server library crate.
//!
//! The local relay server every chat client connects to.
//!
//! # Architecture
//!
//! ```text
//! Chat clients (JSON envelopes over WebSocket)
//!         ↕
//! [chat-server]
//!   ├── domain/           ServerConfig
//!   ├── application/      ChatRelay: user pool, join/leave, text relay
//!   └── infrastructure/
//!         ├── http/       axum router: /ws, /stop, /quit, static files
//!         └── ws_session/ per-connection read loop + writer task
//! ```
//!
//! # Clients
//!
//! Two kinds of client speak the same envelope protocol: the `chat-client`
//! terminal binary, and the browser page in `dist/` (`chat.html` +
//! `chat.js`), which the server itself hands out for every non-route path.
//!
//! # Shutdown
//!
//! `GET /quit` and Ctrl+C share one `Notify`.  When it fires, every user is
//! sent `close`, axum stops accepting connections, and the server waits up
//! to `shutdown_grace` for the pool to drain before returning.
//!
//! # Layer rules
//!
//! - `domain` has no I/O.
//! - `application` depends on `domain` and `chat-core`; it talks to users
//!   only through `mpsc` channels, never through sockets.
//! - `infrastructure` owns every socket and the shutdown signal.

/// Domain layer: configuration types.
pub mod domain;

/// Application layer: the chat relay.
pub mod application;

/// Infrastructure layer: HTTP routes and WebSocket sessions.
pub mod infrastructure;
