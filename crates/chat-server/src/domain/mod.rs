//! Domain layer for chat-server.
//!
//! Holds plain configuration types with no I/O.  `main.rs` populates them
//! from CLI arguments and environment variables.

pub mod config;

pub use config::ServerConfig;
