//! Envelope dispatch: the heart of the client.
//!
//! [`ChatController`] owns no socket.  The session loop feeds it every
//! inbound envelope and every typed line; the controller mutates a
//! [`ChatView`] and tells the loop what to do next.
//!
//! # Inbound dispatch
//!
//! | Envelope            | Entry                                           |
//! |---------------------|-------------------------------------------------|
//! | `Command close`     | `end`: `Server disconnected`, then disconnect   |
//! | `Command #3`        | `cmd`: `Welcome! You're user #3` (+ user id)    |
//! | `Command add:4`     | `cmd`: `User #4 joined the chat`                |
//! | `Command quit:4`    | `cmd`: `User #4 leaved the chat`                |
//! | `Command pop:[2,5]` | `cmd`: `The other user are: user 2, user 5`     |
//! | `Command pop:[]`    | `cmd`: `You're alone here :(`                   |
//! | `Text s`            | plain: `s`                                      |

use chat_core::{Command, Envelope, ProtocolError, UserId};
use thiserror::Error;
use tracing::debug;

use crate::domain::{ChatEntry, EntryClass};

/// Where the controller renders the conversation.
pub trait ChatView {
    /// Appends one entry to the end of the transcript.
    fn append_entry(&mut self, entry: ChatEntry);

    /// Shows the local user's id.
    fn set_user_id(&mut self, id: UserId);
}

/// What the session loop should do after an envelope was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The server is closing: disconnect and issue the stop request.
    Disconnect,
}

/// Errors that can occur while handling an inbound envelope.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server sent command content this client cannot parse.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Tracks the session state needed to render the conversation.
#[derive(Debug, Default)]
pub struct ChatController {
    user_id: Option<UserId>,
}

impl ChatController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The envelope sent as soon as the socket opens.
    pub fn greeting() -> Envelope {
        Envelope::from_command(&Command::Populate)
    }

    /// The id the server assigned to us, once the welcome has arrived.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Renders one inbound envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Protocol`] if a `Command` envelope carries
    /// content that cannot be parsed.  Nothing is rendered in that case.
    pub fn handle_envelope(
        &mut self,
        envelope: &Envelope,
        view: &mut dyn ChatView,
    ) -> Result<Flow, ClientError> {
        match envelope.parse_command() {
            None => {
                view.append_entry(ChatEntry::new(EntryClass::Plain, envelope.content.as_str()));
                Ok(Flow::Continue)
            }
            Some(command) => Ok(self.handle_command(command?, view)),
        }
    }

    fn handle_command(&mut self, command: Command, view: &mut dyn ChatView) -> Flow {
        let notice = match command {
            Command::Close => {
                view.append_entry(ChatEntry::new(EntryClass::End, "Server disconnected"));
                return Flow::Disconnect;
            }
            Command::Welcome(id) => {
                self.user_id = Some(id);
                view.set_user_id(id);
                format!("Welcome! You're user #{id}")
            }
            Command::Joined(id) => format!("User #{id} joined the chat"),
            Command::Left(id) => format!("User #{id} leaved the chat"),
            Command::Population(ids) if ids.is_empty() => "You're alone here :(".to_string(),
            Command::Population(ids) => {
                let others: Vec<String> = ids.iter().map(|id| format!("user {id}")).collect();
                format!("The other user are: {}", others.join(", "))
            }
            Command::Populate => {
                debug!("server sent populate; ignoring");
                return Flow::Continue;
            }
        };
        view.append_entry(ChatEntry::new(EntryClass::Cmd, notice));
        Flow::Continue
    }

    /// Handles a line the user typed.
    ///
    /// Empty input is not sent and leaves the view untouched.  Anything else
    /// is echoed as `You: <input>` and returned as the `Text` envelope to
    /// send.
    pub fn submit(&self, input: &str, view: &mut dyn ChatView) -> Option<Envelope> {
        if input.is_empty() {
            return None;
        }
        view.append_entry(ChatEntry::new(EntryClass::Msg, format!("You: {input}")));
        Some(Envelope::text(input))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
