//! [`ChatView`] implementations.
//!
//! - [`TerminalView`] writes one line per entry to any `io::Write` (stdout in
//!   the binary).  Notices are marked with `* ` so they stand out from chat
//!   lines.
//! - [`TranscriptView`] records entries in memory.  Clones share the same
//!   transcript, so a test can keep one handle while the session owns
//!   another.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use chat_core::UserId;
use tracing::{error, info};

use crate::application::ChatView;
use crate::domain::{ChatEntry, EntryClass};

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Renders the conversation as plain lines on a terminal.
pub struct TerminalView<W: Write> {
    out: W,
    user_id: Option<UserId>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out, user_id: None }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Formats an entry as a single terminal line (without the newline).
pub fn render_line(entry: &ChatEntry) -> String {
    match entry.class {
        EntryClass::End | EntryClass::Cmd => format!("* {}", entry.text),
        EntryClass::Plain | EntryClass::Msg => entry.text.clone(),
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn append_entry(&mut self, entry: ChatEntry) {
        let result = writeln!(self.out, "{}", render_line(&entry)).and_then(|()| self.out.flush());
        if let Err(e) = result {
            error!("failed to write chat entry: {e}");
        }
    }

    fn set_user_id(&mut self, id: UserId) {
        self.user_id = Some(id);
        info!("connected as user #{id}");
    }
}

// ── In-memory ─────────────────────────────────────────────────────────────────

/// Records entries in memory instead of displaying them.
#[derive(Debug, Clone, Default)]
pub struct TranscriptView {
    entries: Arc<Mutex<Vec<ChatEntry>>>,
    user_id: Arc<Mutex<Option<UserId>>>,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry appended so far, in order.
    pub fn entries(&self) -> Vec<ChatEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot of the entry texts only.
    pub fn texts(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.text).collect()
    }

    pub fn user_id(&self) -> Option<UserId> {
        *self.user_id.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChatView for TranscriptView {
    fn append_entry(&mut self, entry: ChatEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    fn set_user_id(&mut self, id: UserId) {
        *self.user_id.lock().unwrap_or_else(PoisonError::into_inner) = Some(id);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
