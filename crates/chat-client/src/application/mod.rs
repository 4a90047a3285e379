//! Application layer for chat-client.
//!
//! # Responsibilities
//!
//! - Deciding what each inbound envelope shows on the [`ChatView`]
//! - Deciding whether a typed line is sent, and as what
//! - Signalling when the session must end
//!
//! # What does NOT belong here?
//!
//! - The WebSocket, stdin, the terminal, HTTP (infrastructure)

pub mod controller;

pub use controller::{ChatController, ChatView, ClientError, Flow};
