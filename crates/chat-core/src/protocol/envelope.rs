//! The JSON envelope exchanged over the WebSocket.
//!
//! # Wire format
//!
//! ```json
//! {"msg_type":"Command","content":"add:4"}
//! ```
//!
//! `msg_type` is serialized as the bare variant name (`"Command"` or
//! `"Text"`), which is serde's default representation for a unit-only enum.
//! Both fields are required when decoding; extra fields are ignored.

use serde::{Deserialize, Serialize};

use crate::protocol::command::Command;
use crate::protocol::ProtocolError;

/// The tag that tells the receiver how to interpret `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MsgType {
    /// `content` is a command string (see [`Command`]).
    Command,
    /// `content` is a chat line to display verbatim.
    Text,
}

/// A single message on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub msg_type: MsgType,
    pub content: String,
}

impl Envelope {
    /// Builds a `Command` envelope from raw content.
    pub fn command(content: impl Into<String>) -> Self {
        Self {
            msg_type: MsgType::Command,
            content: content.into(),
        }
    }

    /// Builds a `Text` envelope.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            msg_type: MsgType::Text,
            content: content.into(),
        }
    }

    /// Builds a `Command` envelope from typed command content.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chat_core::{Command, Envelope};
    ///
    /// let env = Envelope::from_command(&Command::Joined(4));
    /// assert_eq!(env.content, "add:4");
    /// ```
    pub fn from_command(command: &Command) -> Self {
        Self::command(command.to_string())
    }

    /// Parses the content of a `Command` envelope.
    ///
    /// Returns `None` for `Text` envelopes.
    pub fn parse_command(&self) -> Option<Result<Command, ProtocolError>> {
        match self.msg_type {
            MsgType::Command => Some(Command::parse(&self.content)),
            MsgType::Text => None,
        }
    }
}

/// Serializes an envelope to the JSON text sent in a WebSocket text frame.
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedEnvelope`] if serialization fails.
pub fn encode_envelope(envelope: &Envelope) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(envelope)?)
}

/// Parses the JSON text of a WebSocket text frame into an envelope.
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedEnvelope`] on invalid JSON, an unknown
/// `msg_type`, or a missing field.
pub fn decode_envelope(json: &str) -> Result<Envelope, ProtocolError> {
    Ok(serde_json::from_str(json)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populate_envelope_matches_wire_bytes() {
        // Arrange
        let env = Envelope::from_command(&Command::Populate);

        // Act
        let json = encode_envelope(&env).unwrap();

        // Assert: field order and tag spelling are part of the wire contract
        assert_eq!(json, r#"{"msg_type":"Command","content":"populate"}"#);
    }

    #[test]
    fn test_text_envelope_matches_wire_bytes() {
        let env = Envelope::text("hi there");
        let json = encode_envelope(&env).unwrap();
        assert_eq!(json, r#"{"msg_type":"Text","content":"hi there"}"#);
    }

    #[test]
    fn test_decode_accepts_fields_in_any_order() {
        // Arrange
        let json = r##"{"content":"#3","msg_type":"Command"}"##;

        // Act
        let env = decode_envelope(json).unwrap();

        // Assert
        assert_eq!(env, Envelope::command("#3"));
    }

    #[test]
    fn test_decode_rejects_unknown_msg_type() {
        let json = r#"{"msg_type":"Shout","content":"x"}"#;
        let err = decode_envelope(json).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_decode_rejects_missing_content() {
        let json = r#"{"msg_type":"Text"}"#;
        assert!(decode_envelope(json).is_err());
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(decode_envelope("not json").is_err());
    }

    #[test]
    fn test_parse_command_on_text_envelope_is_none() {
        let env = Envelope::text("close");
        assert!(env.parse_command().is_none());
    }

    #[test]
    fn test_parse_command_on_command_envelope() {
        let env = Envelope::command("quit:7");
        let cmd = env.parse_command().unwrap().unwrap();
        assert_eq!(cmd, Command::Left(7));
    }
}
