//! The command language carried in `Command` envelopes.
//!
//! | Content            | Variant                         | Sent by |
//! |--------------------|---------------------------------|---------|
//! | `populate`         | [`Command::Populate`]           | client  |
//! | `close`            | [`Command::Close`]              | server  |
//! | `#<id>`            | [`Command::Welcome`]            | server  |
//! | `add:<id>`         | [`Command::Joined`]             | server  |
//! | `quit:<id>`        | [`Command::Left`]               | server  |
//! | `pop:<json array>` | [`Command::Population`]         | server  |
//!
//! # Matching order
//!
//! Content is matched in this order: exact `populate`, exact `close`, then
//! the prefixes `#`, `add`, `quit`, `pop`.  `populate` must be checked before
//! the `pop` prefix.  For the `add`, `quit` and `pop` prefixes the argument
//! is the text between the first and second `:`.

use std::fmt;

use crate::protocol::{ProtocolError, UserId};

/// Typed form of the content of a `Command` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Client asks for the list of other connected users.
    Populate,
    /// Server is shutting down; the client should disconnect.
    Close,
    /// Tells a freshly connected client its own id.
    Welcome(UserId),
    /// Another user connected.
    Joined(UserId),
    /// Another user disconnected.
    Left(UserId),
    /// Reply to [`Command::Populate`]: the ids of the other connected users,
    /// sorted ascending.
    Population(Vec<UserId>),
}

impl Command {
    /// Parses command content.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::UnknownCommand`] if no prefix matches.
    /// - [`ProtocolError::InvalidUserId`] if an id is not a positive integer,
    ///   including any id inside a `pop:` array.
    /// - [`ProtocolError::InvalidPopulation`] if a `pop:` payload is not a
    ///   JSON array of ids.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chat_core::Command;
    ///
    /// assert_eq!(Command::parse("add:4").unwrap(), Command::Joined(4));
    /// assert_eq!(Command::parse("pop:[2,5]").unwrap(), Command::Population(vec![2, 5]));
    /// ```
    pub fn parse(content: &str) -> Result<Self, ProtocolError> {
        if content == "populate" {
            return Ok(Command::Populate);
        }
        if content == "close" {
            return Ok(Command::Close);
        }
        if let Some(id) = content.strip_prefix('#') {
            return parse_user_id(id).map(Command::Welcome);
        }
        if content.starts_with("add") {
            return parse_user_id(argument(content)).map(Command::Joined);
        }
        if content.starts_with("quit") {
            return parse_user_id(argument(content)).map(Command::Left);
        }
        if content.starts_with("pop") {
            let payload = argument(content);
            let ids = serde_json::from_str::<Vec<UserId>>(payload)
                .map_err(|_| ProtocolError::InvalidPopulation(payload.to_string()))?;
            if let Some(zero) = ids.iter().find(|id| **id == 0) {
                return Err(ProtocolError::InvalidUserId(zero.to_string()));
            }
            return Ok(Command::Population(ids));
        }
        Err(ProtocolError::UnknownCommand(content.to_string()))
    }
}

impl fmt::Display for Command {
    /// Writes the wire content of the command.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Populate => f.write_str("populate"),
            Command::Close => f.write_str("close"),
            Command::Welcome(id) => write!(f, "#{id}"),
            Command::Joined(id) => write!(f, "add:{id}"),
            Command::Left(id) => write!(f, "quit:{id}"),
            Command::Population(ids) => {
                // Same bytes serde_json produces for a Vec<u64>.
                f.write_str("pop:[")?;
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{id}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Returns the text between the first and second `:` of `content`, or an
/// empty string when there is no `:`.
fn argument(content: &str) -> &str {
    content.split(':').nth(1).unwrap_or("")
}

fn parse_user_id(raw: &str) -> Result<UserId, ProtocolError> {
    match raw.parse::<UserId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ProtocolError::InvalidUserId(raw.to_string())),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
