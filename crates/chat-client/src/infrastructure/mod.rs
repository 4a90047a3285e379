//! Infrastructure layer for chat-client.
//!
//! # Responsibilities
//!
//! - Connecting the WebSocket and running the session loop
//! - Reading typed lines from stdin
//! - Rendering entries to the terminal
//! - Issuing the stop request after the server says `close`
//! - Loading the optional TOML config file
//!
//! # What does NOT belong here?
//!
//! - Deciding what an envelope means (that is `application::controller`)

pub mod config_file;
pub mod input;
pub mod session;
pub mod stop;
pub mod view;

pub use session::{run_session, SessionEnd};
pub use stop::{HttpStopRequester, StopRequester};
pub use view::{TerminalView, TranscriptView};
