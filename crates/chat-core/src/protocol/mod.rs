//! Protocol module containing the envelope, the command language, and the
//! shared error type.

pub mod command;
pub mod envelope;

use thiserror::Error;

/// Identifier the server assigns to each connected user.
///
/// Ids start at 1 and increase monotonically for the lifetime of a server
/// process.  Zero is never assigned.
pub type UserId = u64;

/// Errors that can occur while encoding or decoding protocol messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The text frame is not a valid envelope (bad JSON, unknown `msg_type`,
    /// missing field).
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[from] serde_json::Error),

    /// The command content does not match any known command.
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    /// A command that carries a user id had an id that is not a positive
    /// integer.
    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),

    /// A `pop:` command whose payload is not a JSON array of user ids.
    #[error("invalid population payload: {0:?}")]
    InvalidPopulation(String),
}
