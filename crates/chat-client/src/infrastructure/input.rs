//! Line input from stdin.
//!
//! Each line the user finishes with Enter becomes one `String` on an `mpsc`
//! channel.  The reader runs on a plain OS thread: a blocking stdin read
//! cannot be cancelled, and a thread (unlike a Tokio blocking task) does not
//! hold up runtime shutdown when the session ends.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// Lines buffered between the reader thread and the session loop.
const LINE_BUFFER: usize = 32;

/// Starts the stdin reader thread and returns the receiving end.
///
/// The channel closes when stdin reaches EOF.
pub fn stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    let spawned = thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || forward_lines(io::stdin().lock(), &tx));
    if let Err(e) = spawned {
        // `tx` was dropped with the closure, so the session sees closed input.
        error!("failed to start stdin reader: {e}");
    }
    rx
}

/// Sends every line of `reader` on `tx`, stopping at EOF, on a read error, or
/// when the receiver is gone.
///
/// Trailing `\n` and `\r\n` are stripped.  Must not be called from inside an
/// async context.
pub fn forward_lines<R: BufRead>(reader: R, tx: &mpsc::Sender<String>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                if tx.blocking_send(line).is_err() {
                    debug!("input receiver dropped; stopping reader");
                    return;
                }
            }
            Err(e) => {
                warn!("failed to read input: {e}");
                return;
            }
        }
    }
    debug!("input reached EOF");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_forward_lines_strips_line_endings() {
        // Arrange
        let (tx, mut rx) = mpsc::channel(8);

        // Act
        forward_lines(Cursor::new("hello\n\nworld\r\n"), &tx);
        drop(tx);

        // Assert: the blank line is forwarded too; the controller filters it
        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }
        assert_eq!(lines, vec!["hello", "", "world"]);
    }

    #[test]
    fn test_forward_lines_stops_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        // Must return instead of blocking or panicking.
        forward_lines(Cursor::new("a\nb\nc\n"), &tx);
    }

    #[test]
    fn test_forward_lines_last_line_without_newline() {
        let (tx, mut rx) = mpsc::channel(8);
        forward_lines(Cursor::new("only"), &tx);
        assert_eq!(rx.try_recv().unwrap(), "only");
    }
}
