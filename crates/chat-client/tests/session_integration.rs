//! End-to-end tests: a real client session against the real relay server.
//!
//! The session under test owns one [`TranscriptView`] clone while the test
//! polls another.  A second participant is driven directly with
//! `tokio-tungstenite` so the test controls exactly what it sends.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use chat_client::domain::{ChatEntry, ClientConfig, EntryClass};
use chat_client::infrastructure::{run_session, SessionEnd, StopRequester, TranscriptView};
use chat_core::{decode_envelope, encode_envelope, Envelope};
use chat_server::domain::ServerConfig;
use chat_server::infrastructure::{serve, AppState};

type RawClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

const WAIT: Duration = Duration::from_secs(3);

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Counts stop requests instead of making them.
#[derive(Default)]
struct CountingStopper {
    calls: AtomicUsize,
}

#[async_trait]
impl StopRequester for CountingStopper {
    async fn request_stop(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

struct TestServer {
    addr: SocketAddr,
    state: AppState,
    task: JoinHandle<anyhow::Result<()>>,
    _static_dir: tempfile::TempDir,
}

async fn start_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let static_dir = tempfile::tempdir().expect("tempdir");
    let config = ServerConfig {
        bind_addr: addr,
        static_dir: static_dir.path().to_path_buf(),
        shutdown_grace: Duration::from_millis(500),
    };
    let state = AppState::new();
    let task_state = state.clone();
    let task = tokio::spawn(async move { serve(listener, &config, task_state).await });
    TestServer {
        addr,
        state,
        task,
        _static_dir: static_dir,
    }
}

/// Polls `view` until it contains `text`, or panics after [`WAIT`].
async fn wait_for_text(view: &TranscriptView, text: &str) {
    let deadline = Instant::now() + WAIT;
    while !view.texts().iter().any(|t| t == text) {
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {text:?}; transcript: {:?}",
            view.texts()
        );
        sleep(Duration::from_millis(10)).await;
    }
}

async fn raw_recv(ws: &mut RawClient) -> Envelope {
    loop {
        let frame = timeout(WAIT, ws.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("WebSocket error");
        if let Message::Text(json) = frame {
            return decode_envelope(&json).expect("valid envelope");
        }
    }
}

async fn raw_send(ws: &mut RawClient, envelope: &Envelope) {
    let json = encode_envelope(envelope).expect("encode");
    ws.send(Message::Text(json)).await.expect("send");
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_full_conversation_until_server_close() {
    // Arrange: server plus a client session for user #1
    let server = start_server().await;
    let config = ClientConfig {
        ws_url: format!("ws://{}/ws", server.addr),
        ..ClientConfig::default()
    };
    let transcript = TranscriptView::new();
    let mut session_view = transcript.clone();
    let stopper = Arc::new(CountingStopper::default());
    let session_stopper = Arc::clone(&stopper);
    let (input_tx, input_rx) = mpsc::channel(8);
    let session = tokio::spawn(async move {
        run_session(&config, input_rx, &mut session_view, session_stopper.as_ref()).await
    });

    wait_for_text(&transcript, "You're alone here :(").await;

    // Act 1: a second user joins
    let (mut other, _) = connect_async(format!("ws://{}/ws", server.addr))
        .await
        .expect("second user connects");
    assert_eq!(raw_recv(&mut other).await, Envelope::command("#2"));
    wait_for_text(&transcript, "User #2 joined the chat").await;

    // Act 2: the second user talks
    raw_send(&mut other, &Envelope::text("hi there")).await;
    wait_for_text(&transcript, "User #2: hi there").await;

    // Act 3: user #1 types a line, plus an empty one that must not be sent
    input_tx.send(String::new()).await.unwrap();
    input_tx.send("hello".to_string()).await.unwrap();
    assert_eq!(raw_recv(&mut other).await, Envelope::text("User #1: hello"));

    // Act 4: the server shuts down
    server.state.quit.notify_one();
    assert_eq!(raw_recv(&mut other).await, Envelope::command("close"));
    drop(other);

    let end = timeout(WAIT, session)
        .await
        .expect("session ends after close")
        .expect("session task does not panic")
        .expect("session does not fail");

    // Assert
    assert_eq!(end, SessionEnd::ServerClosed);
    assert_eq!(stopper.calls.load(Ordering::SeqCst), 1);
    assert_eq!(transcript.user_id(), Some(1));
    assert_eq!(
        transcript.entries(),
        vec![
            ChatEntry::new(EntryClass::Cmd, "Welcome! You're user #1"),
            ChatEntry::new(EntryClass::Cmd, "You're alone here :("),
            ChatEntry::new(EntryClass::Cmd, "User #2 joined the chat"),
            ChatEntry::new(EntryClass::Plain, "User #2: hi there"),
            ChatEntry::new(EntryClass::Msg, "You: hello"),
            ChatEntry::new(EntryClass::End, "Server disconnected"),
        ]
    );

    let served = timeout(WAIT, server.task)
        .await
        .expect("server stops after quit")
        .expect("server task does not panic");
    assert!(served.is_ok());
}

#[tokio::test]
async fn test_client_sees_existing_users_and_departures() {
    // Arrange: two raw users are already online
    let server = start_server().await;
    let (mut first, _) = connect_async(format!("ws://{}/ws", server.addr))
        .await
        .expect("first user connects");
    assert_eq!(raw_recv(&mut first).await, Envelope::command("#1"));
    let (mut second, _) = connect_async(format!("ws://{}/ws", server.addr))
        .await
        .expect("second user connects");
    assert_eq!(raw_recv(&mut second).await, Envelope::command("#2"));

    let config = ClientConfig {
        ws_url: format!("ws://{}/ws", server.addr),
        ..ClientConfig::default()
    };
    let transcript = TranscriptView::new();
    let mut session_view = transcript.clone();
    let stopper = Arc::new(CountingStopper::default());
    let session_stopper = Arc::clone(&stopper);
    let (input_tx, input_rx) = mpsc::channel(8);

    // Act
    let session = tokio::spawn(async move {
        run_session(&config, input_rx, &mut session_view, session_stopper.as_ref()).await
    });
    wait_for_text(&transcript, "The other user are: user 1, user 2").await;
    second.close(None).await.expect("second user leaves");
    wait_for_text(&transcript, "User #2 leaved the chat").await;
    drop(input_tx);

    let end = timeout(WAIT, session)
        .await
        .expect("session ends on closed input")
        .expect("session task does not panic")
        .expect("session does not fail");

    // Assert
    assert_eq!(end, SessionEnd::InputClosed);
    assert_eq!(stopper.calls.load(Ordering::SeqCst), 0);
    assert_eq!(transcript.user_id(), Some(3));
    assert_eq!(
        transcript.texts(),
        vec![
            "Welcome! You're user #3",
            "The other user are: user 1, user 2",
            "User #2 leaved the chat",
        ]
    );

    server.state.quit.notify_one();
    drop(first);
}
