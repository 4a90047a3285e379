//! The stop request issued after the server says `close`.
//!
//! The session awaits the request to completion before it returns.  It is
//! the one guarded failure path in the client: a connection error, a
//! timeout, or an error status is logged and swallowed, because the server
//! may already be gone by the time the request is made.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

/// Notifies the server that this client has processed `close`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StopRequester: Send + Sync {
    /// Issues the request.  Never fails; problems are logged.
    async fn request_stop(&self);
}

/// [`StopRequester`] that fetches a URL with an HTTP GET.
pub struct HttpStopRequester {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpStopRequester {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StopRequester for HttpStopRequester {
    async fn request_stop(&self) {
        let result = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);

        match result {
            Ok(response) => info!("stop request to {} answered {}", self.url, response.status()),
            Err(e) => warn!("stop request to {} failed: {e}", self.url),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_unreachable_server_is_swallowed() {
        // Arrange: nothing listens on port 1
        let stopper = HttpStopRequester::new("http://127.0.0.1:1/stop", Duration::from_millis(500));

        // Act / Assert: returns normally instead of panicking or erroring
        tokio_test::block_on(stopper.request_stop());
    }

    #[test]
    fn test_invalid_url_is_swallowed() {
        let stopper = HttpStopRequester::new("not a url", Duration::from_millis(100));
        tokio_test::block_on(stopper.request_stop());
    }

    #[tokio::test]
    async fn test_request_is_a_get_to_the_configured_path() {
        // Arrange: a one-shot HTTP responder that captures the request line
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 1024];
            let n = stream.read(&mut buf).await.unwrap();
            stream
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 4\r\nconnection: close\r\n\r\nstop")
                .await
                .unwrap();
            String::from_utf8_lossy(&buf[..n]).into_owned()
        });
        let stopper = HttpStopRequester::new(format!("http://{addr}/stop"), Duration::from_secs(2));

        // Act
        stopper.request_stop().await;

        // Assert
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /stop HTTP/1.1"), "got: {request}");
    }

    #[test]
    fn test_url_accessor() {
        let stopper = HttpStopRequester::new("http://localhost:3030/stop", Duration::from_secs(1));
        assert_eq!(stopper.url(), "http://localhost:3030/stop");
    }
}
