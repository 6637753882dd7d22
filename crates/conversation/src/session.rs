use std::fmt;

use uuid::Uuid;

/// Correlation id sent with every request of one widget session.
///
/// Generated once when the conversation is created; never rotated or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationSession(String);

impl ConversationSession {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
