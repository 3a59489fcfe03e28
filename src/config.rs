use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::store::JsonFileStore;
use crate::ui::theme::{parse_hex_color, Theme};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub appearance: AppearanceConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Feedback file location; `~` is expanded. Defaults to the data dir.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Question shown above the rating selectors
    pub title: String,
    /// Placeholder in the empty review box
    pub placeholder: String,
    /// Theme preset: "rose", "darkwall", "nord", "gruvbox"
    pub theme: String,
    /// Hex color replacing the preset's accent, e.g. "#f472b6"
    pub accent: Option<String>,
    pub selected_prefix: String,
    pub unselected_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Store feedback text trimmed of surrounding whitespace
    pub trim_feedback: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            title: "How would you rate your service with us?".to_string(),
            placeholder: "Write a review".to_string(),
            theme: "rose".to_string(),
            accent: None,
            selected_prefix: "● ".to_string(),
            unselected_prefix: "  ".to_string(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            trim_feedback: true,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            Self::parse(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Where the feedback list lives, after `~` expansion
    pub fn store_path(&self) -> PathBuf {
        match self.storage.path {
            Some(ref p) => PathBuf::from(shellexpand::tilde(p).as_ref()),
            None => JsonFileStore::default_path(),
        }
    }

    /// Theme from the configured preset, falling back to the default
    pub fn resolve_theme(&self) -> Theme {
        let theme = Theme::from_preset(&self.appearance.theme).unwrap_or_else(|| {
            tracing::warn!("Unknown theme '{}', using default", self.appearance.theme);
            Theme::default()
        });

        match self.appearance.accent.as_deref().map(parse_hex_color) {
            Some(Ok(color)) => theme.with_accent(color),
            Some(Err(e)) => {
                tracing::warn!("Ignoring accent color: {}", e);
                theme
            }
            None => theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.behavior.trim_feedback);
        assert_eq!(config.appearance.placeholder, "Write a review");
        assert!(config.storage.path.is_none());
        assert!(config.store_path().ends_with("feedback-tui/feedbacks.json"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::parse(
            r#"
            [behavior]
            trim_feedback = false

            [storage]
            path = "/tmp/reviews.json"
            "#,
        )
        .unwrap();

        assert!(!config.behavior.trim_feedback);
        assert_eq!(config.store_path(), PathBuf::from("/tmp/reviews.json"));
        assert_eq!(config.appearance.theme, "rose");
    }

    #[test]
    fn test_accent_override() {
        use ratatui::style::Color;

        let mut config = Config::default();
        config.appearance.accent = Some("#00ff00".to_string());
        assert_eq!(config.resolve_theme().accent, Color::Rgb(0, 255, 0));

        config.appearance.accent = Some("nope".to_string());
        assert_eq!(config.resolve_theme().accent, Theme::rose().accent);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let mut config = Config::default();
        config.appearance.theme = "solarized".to_string();
        assert_eq!(config.resolve_theme().background, Theme::rose().background);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Config::parse("[behavior\ntrim_feedback = 1").is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert!(config.behavior.trim_feedback);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[appearance]\ntheme = \"nord\"\n").unwrap();
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.appearance.theme, "nord");
    }
}
