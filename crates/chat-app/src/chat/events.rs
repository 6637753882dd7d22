use nova_conversation::Notice;

/// Emitted when the user submits text from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub content: String,
}

impl Submit {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Emitted when a settled turn (or a refused submit) should surface as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeRaised {
    pub notice: Notice,
}
