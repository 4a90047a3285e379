//! # chat-core
//!
//! Shared wire protocol for the local WebSocket chat.
//!
//! Both the client and the relay server exchange a single JSON shape, the
//! *envelope*:
//!
//! ```json
//! {"msg_type":"Command","content":"populate"}
//! {"msg_type":"Text","content":"hello"}
//! ```
//!
//! `Text` envelopes carry chat lines verbatim.  `Command` envelopes carry a
//! small string-encoded command language (`close`, `#3`, `add:4`, `quit:4`,
//! `pop:[2,5]`, `populate`) which this crate parses into the typed
//! [`Command`] enum.
//!
//! This crate has no dependencies on sockets, async runtimes, or terminals.
//! It is used by both `chat-client` and `chat-server`.

pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `chat_core::Envelope` instead of `chat_core::protocol::envelope::Envelope`.
pub use protocol::command::Command;
pub use protocol::envelope::{decode_envelope, encode_envelope, Envelope, MsgType};
pub use protocol::{ProtocolError, UserId};
