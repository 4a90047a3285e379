//! Client configuration types.
//!
//! [`ClientConfig`] is populated in `main.rs` from, in order of precedence,
//! CLI arguments, environment variables, an optional TOML file, and the
//! defaults below.
//!
//! The defaults point at a relay on the same machine, which is how the chat
//! is normally run.  Connecting to a relay on another host means changing
//! both URLs; the stop URL is configured separately from the WebSocket URL.

use std::time::Duration;

/// All runtime configuration for the chat client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket endpoint of the chat server.  Must use `ws://` or `wss://`;
    /// `main.rs` rejects anything else before connecting.
    pub ws_url: String,

    /// URL fetched with GET after the server sends `close`.
    ///
    /// The request tells the relay this client has processed the shutdown.
    /// Its response body is ignored.
    pub stop_url: String,

    /// Upper bound on the stop request.  A slower or failed request is
    /// logged and ignored.
    pub stop_timeout: Duration,
}

impl Default for ClientConfig {
    /// | Field        | Default                      |
    /// |--------------|------------------------------|
    /// | ws_url       | `ws://localhost:3030/ws`     |
    /// | stop_url     | `http://localhost:3030/stop` |
    /// | stop_timeout | 5 seconds                    |
    fn default() -> Self {
        Self {
            ws_url: "ws://localhost:3030/ws".to_string(),
            stop_url: "http://localhost:3030/stop".to_string(),
            stop_timeout: Duration::from_secs(5),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ws_url() {
        // Arrange / Act
        let cfg = ClientConfig::default();
        // Assert
        assert_eq!(cfg.ws_url, "ws://localhost:3030/ws");
    }

    #[test]
    fn test_default_stop_url() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.stop_url, "http://localhost:3030/stop");
    }

    #[test]
    fn test_default_stop_timeout_is_5s() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.stop_timeout, Duration::from_secs(5));
    }
}
