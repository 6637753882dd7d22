use std::path::PathBuf;

use gpui::*;
use gpui_component::{Theme, ThemeMode, ThemeRegistry};
use nova_conversation::{ThemePreference, WidgetConfig};

pub const THEMES_DIRECTORY: &str = "./themes";

pub fn default_themes_path() -> PathBuf {
    PathBuf::from(THEMES_DIRECTORY)
}

pub fn theme_mode(preference: ThemePreference) -> ThemeMode {
    match preference {
        ThemePreference::Light => ThemeMode::Light,
        ThemePreference::Dark => ThemeMode::Dark,
    }
}

/// Registry names tried for a theme family, most specific first.
///
/// A family ships as `"<name>"` plus optional `"<name> Light"` / `"<name> Dark"`
/// variants; only an entry whose own mode matches the preference is used.
pub fn theme_candidates(name: &str, preference: ThemePreference) -> Vec<String> {
    let name = name.trim();
    if name.is_empty() {
        return Vec::new();
    }

    let variant = match preference {
        ThemePreference::Light => "Light",
        ThemePreference::Dark => "Dark",
    };
    vec![format!("{name} {variant}"), name.to_string()]
}

/// Installs the configured theme family for the configured mode, then switches
/// to that mode. Falls back to the built-in palette when no variant matches.
pub fn apply_theme(config: &WidgetConfig, window: Option<&mut Window>, cx: &mut App) {
    let mode = theme_mode(config.theme_mode);
    let matching = theme_candidates(&config.theme_name, config.theme_mode)
        .into_iter()
        .find_map(|candidate| {
            ThemeRegistry::global(cx)
                .themes()
                .get(&SharedString::from(candidate))
                .filter(|theme_config| theme_config.mode == mode)
                .cloned()
        });

    match matching {
        Some(theme_config) => {
            let theme = Theme::global_mut(cx);
            if mode.is_dark() {
                theme.dark_theme = theme_config;
            } else {
                theme.light_theme = theme_config;
            }
        }
        None => tracing::debug!(
            theme = %config.theme_name,
            mode = config.theme_mode.name(),
            "no registered theme for mode, using built-in palette"
        ),
    }

    Theme::change(mode, window, cx);
}
