//! Entries shown in the chat transcript.

use std::fmt;

/// Visual category of a chat entry.
///
/// The string forms (`"end"`, `"cmd"`, `""`, `"msg"`) are the class names a
/// styled front end keys its rendering on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryClass {
    /// The server disconnected.
    End,
    /// A system notice produced by a server command.
    Cmd,
    /// A chat line from another user.
    Plain,
    /// A line the local user sent.
    Msg,
}

impl EntryClass {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryClass::End => "end",
            EntryClass::Cmd => "cmd",
            EntryClass::Plain => "",
            EntryClass::Msg => "msg",
        }
    }
}

impl fmt::Display for EntryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub class: EntryClass,
    pub text: String,
}

impl ChatEntry {
    pub fn new(class: EntryClass, text: impl Into<String>) -> Self {
        Self {
            class,
            text: text.into(),
        }
    }
}
