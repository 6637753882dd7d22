use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use nova_transport::{DEFAULT_CHAT_ENDPOINT, TransportConfig, TransportMode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snafu::{ResultExt, Snafu};

pub const CONFIG_DIRECTORY_NAME: &str = "ocean-nova";
pub const CONFIG_FILE_NAME: &str = "settings.json";
/// Environment variables with this prefix override file values, e.g. `NOVA_ENDPOINT`.
pub const ENV_PREFIX: &str = "NOVA_";

pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome aboard! I'm your AI companion sailing through the digital seas. What adventures shall we embark on today?";
pub const DEFAULT_TITLE: &str = "Ocean Nova Ai";
pub const DEFAULT_TAGLINE: &str = "Navigate the depths of conversation";
pub const DEFAULT_THEME_NAME: &str = "Ocean Nova";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

impl ThemePreference {
    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Read-only widget settings. The widget never writes this file back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub transport: TransportMode,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_tagline")]
    pub tagline: String,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(
        default,
        serialize_with = "serialize_theme_preference",
        deserialize_with = "deserialize_theme_preference"
    )]
    pub theme_mode: ThemePreference,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            transport: TransportMode::default(),
            endpoint: default_endpoint(),
            welcome_message: default_welcome_message(),
            title: default_title(),
            tagline: default_tagline(),
            theme_name: default_theme_name(),
            theme_mode: ThemePreference::default(),
        }
    }
}

impl WidgetConfig {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(CONFIG_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".ocean-nova"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(CONFIG_FILE_NAME)
    }

    /// Layers defaults, the JSON file at `path` (if present) and `NOVA_*` variables.
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Json::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let config = Self::figment(path)
            .extract::<Self>()
            .context(ExtractSnafu {
                stage: "extract-widget-config",
                path: path.to_path_buf(),
            })?;

        Ok(config.normalized())
    }

    /// Loads from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = Self::default_config_path();
        if !path.exists() {
            tracing::info!("settings file not found at {:?}, using defaults", path);
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!("{error}. using defaults");
                Self::default()
            }
        }
    }

    pub fn normalized(mut self) -> Self {
        self.endpoint = non_blank_or(self.endpoint, default_endpoint);
        self.welcome_message = non_blank_or(self.welcome_message, default_welcome_message);
        self.title = non_blank_or(self.title, default_title);
        self.tagline = self.tagline.trim().to_string();
        self.theme_name = self.theme_name.trim().to_string();
        self
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::new(self.transport, &self.endpoint)
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to read settings from {path:?} on `{stage}`: {source}"))]
    Extract {
        stage: &'static str,
        path: PathBuf,
        source: figment::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn non_blank_or(value: String, fallback: fn() -> String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback()
    } else {
        trimmed.to_string()
    }
}

fn default_endpoint() -> String {
    DEFAULT_CHAT_ENDPOINT.to_string()
}

fn default_welcome_message() -> String {
    DEFAULT_WELCOME_MESSAGE.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_tagline() -> String {
    DEFAULT_TAGLINE.to_string()
}

fn default_theme_name() -> String {
    DEFAULT_THEME_NAME.to_string()
}

fn serialize_theme_preference<S>(value: &ThemePreference, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.name())
}

fn deserialize_theme_preference<'de, D>(deserializer: D) -> Result<ThemePreference, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(parse_theme_preference(&value))
}

fn parse_theme_preference(value: &str) -> ThemePreference {
    if value.trim().eq_ignore_ascii_case("light") {
        ThemePreference::Light
    } else {
        ThemePreference::Dark
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let config = WidgetConfig::load_from(Path::new("absent.json")).unwrap();
            assert_eq!(config, WidgetConfig::default());
            assert_eq!(config.endpoint, DEFAULT_CHAT_ENDPOINT);
            assert_eq!(config.transport, TransportMode::Http);
            Ok(())
        });
    }

    #[test]
    fn file_values_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"{
                    "transport": "offline",
                    "endpoint": "  http://10.0.0.2:9000/chat/  ",
                    "theme_mode": "LIGHT",
                    "title": ""
                }"#,
            )?;

            let config = WidgetConfig::load_from(Path::new(CONFIG_FILE_NAME)).unwrap();

            assert_eq!(config.transport, TransportMode::Offline);
            assert_eq!(config.endpoint, "http://10.0.0.2:9000/chat/");
            assert_eq!(config.theme_mode, ThemePreference::Light);
            assert_eq!(config.title, DEFAULT_TITLE);
            assert_eq!(config.welcome_message, DEFAULT_WELCOME_MESSAGE);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, r#"{ "endpoint": "http://file/chat/" }"#)?;
            jail.set_env("NOVA_ENDPOINT", "http://env:8000/chat/");

            let config = WidgetConfig::load_from(Path::new(CONFIG_FILE_NAME)).unwrap();
            assert_eq!(config.endpoint, "http://env:8000/chat/");
            assert_eq!(
                config.transport_config(),
                TransportConfig::http("http://env:8000/chat/")
            );
            Ok(())
        });
    }

    #[test]
    fn invalid_file_is_reported() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, r#"{ "transport": "carrier-pigeon" }"#)?;

            let error = WidgetConfig::load_from(Path::new(CONFIG_FILE_NAME)).unwrap_err();
            assert!(matches!(
                error,
                ConfigError::Extract {
                    stage: "extract-widget-config",
                    ..
                }
            ));
            Ok(())
        });
    }

    #[test]
    fn unknown_theme_mode_means_dark() {
        assert_eq!(parse_theme_preference("solarized"), ThemePreference::Dark);
        assert_eq!(parse_theme_preference(" Light "), ThemePreference::Light);
    }
}
