use gpui::*;
use gpui_component::notification::NotificationList;
use gpui_component::{Root, ThemeRegistry};

use nova::app::{ChatAppShell, Quit};
use nova::theme::{apply_theme, default_themes_path};
use nova_conversation::WidgetConfig;

/// Boots the widget window.
///
/// Settings are read once at startup; the theme directory is watched so theme
/// edits apply live.
fn main() {
    tracing_subscriber::fmt::init();

    let config = WidgetConfig::load();
    tracing::info!(
        transport = ?config.transport,
        endpoint = %config.endpoint,
        "starting chat widget"
    );

    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(move |cx| {
        gpui_tokio_bridge::init(cx);

        // Must run before any Root is created.
        gpui_component::init(cx);

        let theme_config = config.clone();
        if let Err(err) = ThemeRegistry::watch_dir(default_themes_path(), cx, move |cx| {
            apply_theme(&theme_config, None, cx);
        }) {
            tracing::warn!("Failed to watch themes directory: {}. Using default themes.", err);
            apply_theme(&config, None, cx);
        }

        cx.on_action(|_: &Quit, cx| {
            cx.quit();
        });
        cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

        cx.spawn(async move |cx| {
            cx.update(|cx| {
                let options = WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                        None,
                        size(px(900.), px(760.)),
                        cx,
                    ))),
                    titlebar: Some(TitlebarOptions {
                        title: Some(config.title.clone().into()),
                        ..Default::default()
                    }),
                    ..Default::default()
                };

                let opened = cx.open_window(options, |window, cx| {
                    let notification_list = cx.new(|cx| NotificationList::new(window, cx));
                    let shell =
                        cx.new(|cx| ChatAppShell::new(&config, notification_list, window, cx));
                    cx.new(|cx| Root::new(shell, window, cx))
                });

                match opened {
                    Ok(_) => cx.activate(true),
                    Err(error) => {
                        tracing::error!(%error, "failed to open chat window");
                        cx.quit();
                    }
                }
            })
        })
        .detach();
    });
}
