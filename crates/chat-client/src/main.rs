//! Local chat terminal client: entry point.
//!
//! Connects to the relay server, prints the conversation to stdout and sends
//! each line typed on stdin as a chat message.  Logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! chat-client [OPTIONS]
//!
//! Options:
//!   --ws-url       <URL>   WebSocket endpoint [default: ws://localhost:3030/ws]
//!   --stop-url     <URL>   Fetched after the server sends `close`
//!                          [default: http://localhost:3030/stop]
//!   --stop-timeout <SECS>  Upper bound on the stop request [default: 5]
//!   --config       <FILE>  Optional TOML file with the same keys
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable            | Flag             |
//! |---------------------|------------------|
//! | `CHAT_WS_URL`       | `--ws-url`       |
//! | `CHAT_STOP_URL`     | `--stop-url`     |
//! | `CHAT_STOP_TIMEOUT` | `--stop-timeout` |
//! | `CHAT_CONFIG`       | `--config`       |
//!
//! Precedence: CLI args, then environment variables, then the config file,
//! then the built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chat_client::domain::ClientConfig;
use chat_client::infrastructure::config_file::load_config_file;
use chat_client::infrastructure::input::stdin_lines;
use chat_client::infrastructure::{run_session, HttpStopRequester, SessionEnd, TerminalView};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Terminal client for the local WebSocket chat.
#[derive(Debug, Parser)]
#[command(name = "chat-client", about = "Terminal client for the local WebSocket chat", version)]
struct Cli {
    /// WebSocket endpoint of the chat server.
    #[arg(long, env = "CHAT_WS_URL")]
    ws_url: Option<String>,

    /// URL fetched with GET after the server sends `close`.
    #[arg(long, env = "CHAT_STOP_URL")]
    stop_url: Option<String>,

    /// Seconds before the stop request is abandoned.
    #[arg(long, env = "CHAT_STOP_TIMEOUT")]
    stop_timeout: Option<u64>,

    /// TOML config file (`ws_url`, `stop_url`, `stop_timeout_secs`).
    #[arg(long, env = "CHAT_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Layers the config file and the CLI values over [`ClientConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the WebSocket
    /// URL does not use the `ws` or `wss` scheme.
    fn into_client_config(self) -> anyhow::Result<ClientConfig> {
        let mut config = ClientConfig::default();

        if let Some(path) = &self.config {
            load_config_file(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?
                .apply_to(&mut config);
        }

        if let Some(ws_url) = self.ws_url {
            config.ws_url = ws_url;
        }
        if let Some(stop_url) = self.stop_url {
            config.stop_url = stop_url;
        }
        if let Some(secs) = self.stop_timeout {
            config.stop_timeout = Duration::from_secs(secs);
        }

        if !(config.ws_url.starts_with("ws://") || config.ws_url.starts_with("wss://")) {
            bail!("WebSocket URL must start with ws:// or wss://, got '{}'", config.ws_url);
        }

        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the conversation, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_client_config()?;

    info!("chat client starting: ws_url={}, stop_url={}", config.ws_url, config.stop_url);

    let stopper = HttpStopRequester::new(config.stop_url.clone(), config.stop_timeout);
    let mut view = TerminalView::stdout();

    let end = run_session(&config, stdin_lines(), &mut view, &stopper).await?;

    match end {
        SessionEnd::ServerClosed => info!("server closed the chat"),
        SessionEnd::ConnectionLost => info!("connection to the server was lost"),
        SessionEnd::InputClosed => info!("input closed, left the chat"),
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
