use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Id reserved for the greeting that opens every transcript.
pub const WELCOME_MESSAGE_ID: &str = "welcome";

/// Stable identifier for one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(String);

impl MessageId {
    /// Wraps an existing identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Allocates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn welcome() -> Self {
        Self::new(WELCOME_MESSAGE_ID)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    User,
    Bot,
}

/// One entry of the transcript. Fields are private so a message cannot change
/// after it is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    id: MessageId,
    text: String,
    speaker: Speaker,
    timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        speaker: Speaker,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            speaker,
            timestamp,
        }
    }

    /// Creates a user message stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageId::generate(), Speaker::User, text, Utc::now())
    }

    /// Creates a bot message stamped with the current time.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(MessageId::generate(), Speaker::Bot, text, Utc::now())
    }

    pub fn welcome(text: impl Into<String>) -> Self {
        Self::new(MessageId::welcome(), Speaker::Bot, text, Utc::now())
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
