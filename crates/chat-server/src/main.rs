//! Local chat relay server: entry point.
//!
//! Serves the chat WebSocket on `/ws`, the `/stop` and `/quit` endpoints,
//! and a static directory for everything else.
//!
//! # Usage
//!
//! ```text
//! chat-server [OPTIONS]
//!
//! Options:
//!   --bind           <IP>    Address to bind [default: 127.0.0.1]
//!   --port           <PORT>  Port to listen on [default: 3030]
//!   --static-dir     <DIR>   Static files directory [default: ./dist]
//!   --shutdown-grace <SECS>  Wait for users to disconnect on shutdown [default: 2]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable               | Default     |
//! |------------------------|-------------|
//! | `CHAT_BIND`            | `127.0.0.1` |
//! | `CHAT_PORT`            | `3030`      |
//! | `CHAT_STATIC_DIR`      | `./dist`    |
//! | `CHAT_SHUTDOWN_GRACE`  | `2`         |
//!
//! CLI args take precedence over environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chat_server::domain::ServerConfig;
use chat_server::infrastructure::{run_server, AppState};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Local relay server for the WebSocket chat.
#[derive(Debug, Parser)]
#[command(name = "chat-server", about = "Local relay server for the WebSocket chat", version)]
struct Cli {
    /// IP address to bind the server to.
    #[arg(long, default_value = "127.0.0.1", env = "CHAT_BIND")]
    bind: String,

    /// TCP port for HTTP and WebSocket traffic.
    #[arg(long, default_value_t = 3030, env = "CHAT_PORT")]
    port: u16,

    /// Directory served for every path that is not a route.
    #[arg(long, default_value = "./dist", env = "CHAT_STATIC_DIR")]
    static_dir: PathBuf,

    /// Seconds to wait for users to disconnect after `close` is broadcast.
    #[arg(long, default_value_t = 2, env = "CHAT_SHUTDOWN_GRACE")]
    shutdown_grace: u64,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--bind` is not a valid IP address.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let bind_addr: SocketAddr = format!("{}:{}", self.bind, self.port)
            .parse()
            .with_context(|| format!("invalid bind address: '{}:{}'", self.bind, self.port))?;

        Ok(ServerConfig {
            bind_addr,
            static_dir: self.static_dir,
            shutdown_grace: Duration::from_secs(self.shutdown_grace),
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_server_config()?;

    info!(
        "chat server starting: bind={}, static_dir={}",
        config.bind_addr,
        config.static_dir.display()
    );

    let state = AppState::new();

    // Ctrl+C takes the same path as GET /quit: users are told `close` first.
    let quit = state.quit.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, initiating graceful shutdown");
                quit.notify_one();
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    run_server(config, state).await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
