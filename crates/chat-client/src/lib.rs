//! chat-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the client do?
//!
//! 1. Opens one WebSocket connection to the chat server and immediately asks
//!    who else is online (`populate`).
//! 2. Turns every inbound envelope into a chat entry on a [`ChatView`]:
//!    welcome, join and leave notices, the list of other users, and text
//!    lines from other users.
//! 3. Sends every non-empty line the user types as a `Text` envelope.
//! 4. When the server says `close`, disconnects and pings the server's stop
//!    endpoint.
//!
//! # Architecture
//!
//! ```text
//! stdin ─► input ─► session ◄──► relay (JSON envelopes over WebSocket)
//!                     │
//!                     ▼
//!              ChatController ─► ChatView (TerminalView / TranscriptView)
//! ```
//!
//! # Layer rules
//!
//! - `domain` holds plain data (`ClientConfig`, `ChatEntry`) and no I/O.
//! - `application` decides what an envelope means and what a typed line
//!   becomes.  It sees the screen only through the [`ChatView`] trait and
//!   never touches a socket, so its tests feed it envelopes directly.
//! - `infrastructure` owns the WebSocket, stdin, stdout, the HTTP stop
//!   request and the config file.  The session loop is the only place these
//!   meet the controller.
//!
//! [`ChatView`]: application::ChatView

/// Domain layer: configuration and view entry types.
pub mod domain;

/// Application layer: the envelope dispatch controller.
pub mod application;

/// Infrastructure layer: socket loop, terminal view, stdin, stop request.
pub mod infrastructure;
