/// Toast shown after a reply is appended.
pub const DELIVERED_NOTICE: &str = "Message delivered across the digital ocean!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Payload for the notification layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            text: text.into(),
        }
    }

    pub fn delivered() -> Self {
        Self::success(DELIVERED_NOTICE)
    }

    pub fn is_failure(&self) -> bool {
        self.kind == NoticeKind::Failure
    }
}
