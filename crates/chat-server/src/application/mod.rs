//! Application layer for chat-server.
//!
//! # Responsibilities
//!
//! - Assigning user ids and tracking connected users
//! - Announcing joins and departures
//! - Relaying text lines to every other user
//! - Answering `populate` with the list of other users
//!
//! # What does NOT belong here?
//!
//! - WebSocket framing or JSON text (handled in `infrastructure::ws_session`)
//! - HTTP routing and shutdown signalling

pub mod relay;

pub use relay::{ChatRelay, RelayError, UserTx};
