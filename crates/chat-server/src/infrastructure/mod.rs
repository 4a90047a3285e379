//! Infrastructure layer for chat-server.
//!
//! # Responsibilities
//!
//! - Binding the TCP listener and serving HTTP with axum
//! - Upgrading `/ws` requests and running one session task per user
//! - Serving the static directory
//! - Turning `/quit` (or Ctrl+C) into a graceful shutdown that first tells
//!   every user `close`
//!
//! # What does NOT belong here?
//!
//! - Deciding who receives which envelope (that is `application::relay`)

pub mod http;
pub mod ws_session;

pub use http::{build_router, run_server, serve, AppState};
