//! Server configuration types.
//!
//! [`ServerConfig`] holds every runtime setting of the relay.  `main.rs`
//! fills it from CLI arguments and `CHAT_*` environment variables; nothing
//! in this module reads the environment, so integration tests build one
//! directly with an ephemeral port and a temporary static directory.
//!
//! # Static directory
//!
//! The browser UI (`chat.html` + `chat.js`) ships in `dist/` at the
//! workspace root.  The default `./dist` therefore resolves when the server
//! is started from the workspace root; start it elsewhere with
//! `--static-dir` pointing at that directory.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// All runtime configuration for the relay server.
///
/// # Example
///
/// ```rust
/// use chat_server::domain::ServerConfig;
///
/// let cfg = ServerConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 3030);
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP + WebSocket listener binds to.
    ///
    /// Defaults to loopback: the chat is meant for local use only.
    pub bind_addr: SocketAddr,

    /// Directory served for every path that is not a route.  Unknown files
    /// fall back to `chat.html` inside this directory, so a browser pointed
    /// at any URL on the server lands on the chat page.
    pub static_dir: PathBuf,

    /// After shutdown, how long to wait for connected users to disconnect
    /// before the process exits.  This gives every client time to receive
    /// the `close` command.
    pub shutdown_grace: Duration,
}

impl Default for ServerConfig {
    /// | Field          | Default          |
    /// |----------------|------------------|
    /// | bind_addr      | `127.0.0.1:3030` |
    /// | static_dir     | `./dist`         |
    /// | shutdown_grace | 2 seconds        |
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 3030)),
            static_dir: PathBuf::from("./dist"),
            shutdown_grace: Duration::from_secs(2),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
