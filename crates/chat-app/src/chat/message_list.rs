use std::time::Duration;

use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{ActiveTheme, h_flex, v_flex};
use nova_conversation::{MessageRow, RowAlignment, Speaker, TYPING_LABEL, TranscriptView};

use crate::chat::scroll_manager::ScrollManager;

const CONTENT_MAX_WIDTH: Pixels = px(896.);
const BUBBLE_MAX_WIDTH: Pixels = px(448.);
const BUBBLE_PADDING_X: Pixels = px(16.);
const BUBBLE_PADDING_Y: Pixels = px(12.);
const TYPING_DOT_SIZE: Pixels = px(8.);
const TYPING_DOT_COUNT: usize = 3;
const TYPING_DOT_BASE_PERIOD_MS: u64 = 600;
/// Offsets the dot periods so the bounce reads as a wave.
const TYPING_DOT_STAGGER_MS: u64 = 100;

/// One direct child of the scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListEntry {
    Row(usize),
    Typing,
}

/// Children of the scroll container, in render order. Scroll indices from
/// [`TranscriptView::scroll_index`] address this sequence.
fn list_entries(transcript: &TranscriptView) -> Vec<ListEntry> {
    (0..transcript.rows.len())
        .map(ListEntry::Row)
        .chain(transcript.typing.then_some(ListEntry::Typing))
        .collect()
}

/// Scrollable transcript plus the typing indicator.
///
/// Rendering is a function of the last [`TranscriptView`] handed in; the list
/// owns no chat state of its own.
pub struct MessageList {
    transcript: TranscriptView,
    scroll_manager: ScrollManager,
}

impl MessageList {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Self {
            transcript: TranscriptView {
                rows: Vec::new(),
                typing: false,
                revision: 0,
            },
            scroll_manager: ScrollManager::new(),
        }
    }

    pub fn set_transcript(&mut self, transcript: TranscriptView, cx: &mut Context<Self>) {
        self.scroll_manager.observe(&transcript);
        self.transcript = transcript;
        cx.notify();
    }

    fn render_row(&self, row: &MessageRow, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();
        let (background, foreground) = match row.speaker {
            Speaker::User => (theme.primary, theme.primary_foreground),
            Speaker::Bot => (theme.secondary, theme.secondary_foreground),
        };

        h_flex()
            .id(SharedString::from(format!("message-{}", row.id)))
            .w_full()
            .max_w(CONTENT_MAX_WIDTH)
            .mx_auto()
            .when(row.alignment == RowAlignment::End, |el| el.justify_end())
            .when(row.alignment == RowAlignment::Start, |el| el.justify_start())
            .child(
                v_flex()
                    .max_w(BUBBLE_MAX_WIDTH)
                    .px(BUBBLE_PADDING_X)
                    .py(BUBBLE_PADDING_Y)
                    .gap_1()
                    .rounded_2xl()
                    .border_1()
                    .border_color(theme.border)
                    .bg(background)
                    .text_color(foreground)
                    .child(div().text_sm().child(row.text.clone()))
                    .child(
                        div()
                            .text_xs()
                            .opacity(0.7)
                            .child(row.time_label.clone()),
                    ),
            )
            .into_any_element()
    }

    fn render_typing_indicator(&self, cx: &Context<Self>) -> AnyElement {
        let theme = cx.theme();

        let dots = (0..TYPING_DOT_COUNT).map(|index| {
            let period = TYPING_DOT_BASE_PERIOD_MS + TYPING_DOT_STAGGER_MS * index as u64;
            div()
                .size(TYPING_DOT_SIZE)
                .rounded_full()
                .bg(theme.accent)
                .with_animation(
                    ("typing-dot", index),
                    Animation::new(Duration::from_millis(period))
                        .repeat()
                        .with_easing(bounce(ease_in_out)),
                    |dot, delta| dot.opacity(0.3 + 0.7 * delta),
                )
        });

        h_flex()
            .id("typing-indicator")
            .w_full()
            .max_w(CONTENT_MAX_WIDTH)
            .mx_auto()
            .justify_start()
            .child(
                h_flex()
                    .max_w(BUBBLE_MAX_WIDTH)
                    .px(BUBBLE_PADDING_X)
                    .py(BUBBLE_PADDING_Y)
                    .gap_2()
                    .items_center()
                    .rounded_2xl()
                    .border_1()
                    .border_color(theme.border)
                    .bg(theme.secondary)
                    .text_color(theme.secondary_foreground)
                    .child(h_flex().gap_1().children(dots))
                    .child(div().text_xs().opacity(0.7).child(TYPING_LABEL)),
            )
            .into_any_element()
    }
}

impl Render for MessageList {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.scroll_manager.apply_pending_scroll();

        let entries = list_entries(&self.transcript)
            .into_iter()
            .filter_map(|entry| match entry {
                ListEntry::Row(index) => self
                    .transcript
                    .rows
                    .get(index)
                    .map(|row| self.render_row(row, cx)),
                ListEntry::Typing => Some(self.render_typing_indicator(cx)),
            })
            .collect::<Vec<_>>();

        // Entries must stay direct children of the tracked element.
        v_flex()
            .id("message-list")
            .size_full()
            .min_h_0()
            .overflow_y_scroll()
            .track_scroll(self.scroll_manager.handle())
            .px_6()
            .py_4()
            .gap_4()
            .children(entries)
    }
}

#[cfg(test)]
mod tests {
    use nova_conversation::{Conversation, ScrollTarget};

    use super::*;

    fn queued_entry(manager: &ScrollManager, view: &TranscriptView) -> Option<ListEntry> {
        manager
            .pending_scroll()
            .and_then(|index| list_entries(view).get(index).copied())
    }

    #[::core::prelude::v1::test]
    fn queued_scroll_addresses_a_rendered_child() {
        let mut conversation = Conversation::new("welcome aboard");
        let mut manager = ScrollManager::new();

        let view = TranscriptView::from_conversation(&conversation);
        manager.observe(&view);
        assert_eq!(queued_entry(&manager, &view), Some(ListEntry::Row(0)));

        let pending = conversation.begin_turn("hello").unwrap();
        let view = TranscriptView::from_conversation(&conversation);
        manager.observe(&view);
        assert_eq!(view.scroll_target(), Some(ScrollTarget::TypingIndicator));
        assert_eq!(queued_entry(&manager, &view), Some(ListEntry::Typing));

        conversation
            .complete_turn(pending.turn, Ok("hi there".to_string()))
            .unwrap();
        let view = TranscriptView::from_conversation(&conversation);
        manager.observe(&view);
        assert_eq!(list_entries(&view).len(), 3);
        assert_eq!(queued_entry(&manager, &view), Some(ListEntry::Row(2)));
    }
}
