use gpui::prelude::FluentBuilder;
use gpui::*;
use gpui_component::notification::{Notification, NotificationList};
use gpui_component::{ActiveTheme, Icon, IconName, h_flex, v_flex};
use nova_conversation::{Notice, NoticeKind, WidgetConfig};

use crate::chat::{ChatView, NoticeRaised};

gpui::actions!(shell, [Quit]);

const HEADER_HEIGHT: Pixels = px(64.);

/// Root layout: header, chat view and the toast layer.
pub struct ChatAppShell {
    notification_list: Entity<NotificationList>,
    chat_view: Entity<ChatView>,
    title: SharedString,
    tagline: SharedString,
}

impl ChatAppShell {
    pub fn new(
        config: &WidgetConfig,
        notification_list: Entity<NotificationList>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let chat_view = cx.new(|cx| ChatView::new(config, window, cx));

        cx.subscribe_in(
            &chat_view,
            window,
            |this, _, event: &NoticeRaised, window, cx| {
                this.push_notice(&event.notice, window, cx);
            },
        )
        .detach();

        Self {
            notification_list,
            chat_view,
            title: config.title.clone().into(),
            tagline: config.tagline.clone().into(),
        }
    }

    fn push_notice(&mut self, notice: &Notice, window: &mut Window, cx: &mut Context<Self>) {
        let notification = match notice.kind {
            NoticeKind::Success => Notification::success(notice.text.clone()),
            NoticeKind::Failure => Notification::error(notice.text.clone()),
        };

        self.notification_list.update(cx, |list, cx| {
            list.push(notification, window, cx);
        });
    }

    fn render_header(&self, cx: &Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        h_flex()
            .id("chat-header")
            .w_full()
            .h(HEADER_HEIGHT)
            .flex_shrink_0()
            .px_6()
            .gap_3()
            .items_center()
            .border_b_1()
            .border_color(theme.border)
            .bg(theme.secondary)
            .child(
                div()
                    .size(px(36.))
                    .flex()
                    .items_center()
                    .justify_center()
                    .rounded_full()
                    .bg(theme.primary)
                    .text_color(theme.primary_foreground)
                    .child(Icon::new(IconName::CircleUser)),
            )
            .child(
                v_flex()
                    .min_w_0()
                    .child(
                        div()
                            .text_lg()
                            .font_semibold()
                            .text_color(theme.foreground)
                            .child(self.title.clone()),
                    )
                    .when(!self.tagline.is_empty(), |el| {
                        el.child(
                            div()
                                .text_xs()
                                .text_color(theme.muted_foreground)
                                .child(self.tagline.clone()),
                        )
                    }),
            )
    }
}

impl Render for ChatAppShell {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        div()
            .size_full()
            .relative()
            .bg(theme.background)
            .child(
                v_flex()
                    .size_full()
                    .child(self.render_header(cx))
                    .child(
                        v_flex()
                            .id("main-content")
                            .flex_1()
                            .w_full()
                            .min_h_0()
                            .overflow_hidden()
                            .child(self.chat_view.clone()),
                    ),
            )
            .child(self.notification_list.clone())
    }
}
