use gpui::ScrollHandle;
use nova_conversation::{ScrollTracker, TranscriptView};

/// Keeps the transcript pinned to its newest element.
///
/// The handle must be tracked by the element whose direct children are the
/// transcript entries, since scroll indices address those children. Every
/// transcript change queues a scroll; it is applied on the next render once
/// the new child exists.
pub struct ScrollManager {
    scroll_handle: ScrollHandle,
    tracker: ScrollTracker,
    pending_scroll_to: Option<usize>,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self {
            scroll_handle: ScrollHandle::new(),
            tracker: ScrollTracker::new(),
            pending_scroll_to: None,
        }
    }

    pub fn handle(&self) -> &ScrollHandle {
        &self.scroll_handle
    }

    /// Records a new transcript snapshot and queues a scroll when it changed.
    pub fn observe(&mut self, view: &TranscriptView) {
        if self.tracker.observe(view) {
            self.pending_scroll_to = view.scroll_index();
        }
    }

    pub(crate) fn pending_scroll(&self) -> Option<usize> {
        self.pending_scroll_to
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
        self.pending_scroll_to = None;
    }

    /// Applies a queued scroll. Returns true when one was applied.
    pub fn apply_pending_scroll(&mut self) -> bool {
        let Some(index) = self.pending_scroll_to.take() else {
            return false;
        };

        self.scroll_handle.scroll_to_item(index);
        true
    }
}

impl Default for ScrollManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use nova_conversation::Conversation;

    use super::*;

    #[::core::prelude::v1::test]
    fn queues_one_scroll_per_transcript_change() {
        let mut conversation = Conversation::new("welcome aboard");
        let mut manager = ScrollManager::new();

        manager.observe(&TranscriptView::from_conversation(&conversation));
        assert_eq!(manager.pending_scroll(), Some(0));
        assert!(manager.apply_pending_scroll());
        assert!(!manager.apply_pending_scroll());

        manager.observe(&TranscriptView::from_conversation(&conversation));
        assert!(!manager.apply_pending_scroll());

        conversation.begin_turn("hello").unwrap();
        let view = TranscriptView::from_conversation(&conversation);
        manager.observe(&view);
        assert_eq!(manager.pending_scroll(), Some(view.element_count() - 1));
        assert!(manager.apply_pending_scroll());
    }

    #[::core::prelude::v1::test]
    fn reset_drops_queued_scroll() {
        let conversation = Conversation::new("welcome aboard");
        let mut manager = ScrollManager::new();

        manager.observe(&TranscriptView::from_conversation(&conversation));
        manager.reset();

        assert!(!manager.apply_pending_scroll());
    }
}
