//! Domain layer for chat-client.
//!
//! Pure types with no I/O: the client configuration and the entries a chat
//! view displays.

pub mod config;
pub mod entry;

pub use config::ClientConfig;
pub use entry::{ChatEntry, EntryClass};
