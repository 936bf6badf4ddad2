//! Page configuration.
//!
//! Loaded from `gallery.toml` in the content root. Stock defaults are the base
//! layer and the user file is merged on top, so a file only needs the keys it
//! wants to change:
//!
//! ```toml
//! [gallery]
//! swipe_threshold = 80.0
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::theme::Theme;

pub const CONFIG_FILE: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub gallery: GalleryConfig,
    pub slider: SliderConfig,
    pub cards: CardsConfig,
    pub theme: ThemeConfig,
    pub contact: ContactConfig,
}

impl PageConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gallery.swipe_threshold.is_finite() && self.gallery.swipe_threshold > 0.0) {
            return Err(ConfigError::Validation(
                "gallery.swipe_threshold must be a positive number".into(),
            ));
        }
        if self.slider.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "slider.interval_ms must be non-zero".into(),
            ));
        }
        if self.theme.state_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme.state_file must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// What a thumbnail click does while the gallery is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThumbnailPolicy {
    /// Clicks are dropped until the gallery is opened.
    #[default]
    Ignore,
    /// Open the gallery, then jump to the clicked item.
    Open,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Minimum horizontal travel, in device-independent pixels, for a swipe.
    pub swipe_threshold: f64,
    pub thumbnail_click: ThumbnailPolicy,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
            thumbnail_click: ThumbnailPolicy::Ignore,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderConfig {
    /// Autoplay period.
    pub interval_ms: u64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardsConfig {
    /// Pause between expanding a card and fading it in.
    pub reveal_delay_ms: u64,
    /// Fade-out time before a closed card collapses and the overlay lifts.
    pub collapse_delay_ms: u64,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 10,
            collapse_delay_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme used when no preference has been stored.
    pub default: Theme,
    /// Preference file, relative to the content root.
    pub state_file: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: Theme::Light,
            state_file: ".alumni-theme.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Simulated network delay for the contact form.
    pub submit_delay_ms: u64,
    /// Make every submission fail after the delay.
    pub simulate_failure: bool,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
            simulate_failure: false,
        }
    }
}

// =============================================================================
// Loading and merging
// =============================================================================

pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(PageConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Returns `Ok(None)` if the directory has no `gallery.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<PageConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: PageConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `gallery.toml` from `root`, falling back to stock defaults.
pub fn load_config(root: &Path) -> Result<PageConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// Fully commented stock `gallery.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Alumni Gallery Configuration
# ============================
# All settings are optional. Values shown are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Media gallery
# ---------------------------------------------------------------------------
[gallery]
# Minimum horizontal touch travel (device-independent pixels) that counts
# as a swipe. Right swipe shows the previous item, left swipe the next.
swipe_threshold = 50.0

# What a thumbnail click does while the gallery is closed:
#   "ignore" - nothing until the gallery is opened
#   "open"   - open the gallery and jump to that item
thumbnail_click = "ignore"

# ---------------------------------------------------------------------------
# Hero slider
# ---------------------------------------------------------------------------
[slider]
# Autoplay period in milliseconds. Manual navigation restarts the timer.
interval_ms = 5000

# ---------------------------------------------------------------------------
# Event cards
# ---------------------------------------------------------------------------
[cards]
# Delay between expanding a card and fading it in.
reveal_delay_ms = 10

# Fade-out time before a closed card collapses and page scrolling returns.
collapse_delay_ms = 400

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# "light" or "dark", used until the visitor toggles the theme.
default = "light"

# Where the stored preference lives, relative to the content root.
state_file = ".alumni-theme.json"

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Simulated submission delay in milliseconds.
submit_delay_ms = 2000

# Fail every submission after the delay (exercises the error notification).
simulate_failure = false
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = PageConfig::default();
        assert_eq!(config.gallery.swipe_threshold, 50.0);
        assert_eq!(config.gallery.thumbnail_click, ThumbnailPolicy::Ignore);
        assert_eq!(config.slider.interval_ms, 5000);
        assert_eq!(config.cards.reveal_delay_ms, 10);
        assert_eq!(config.cards.collapse_delay_ms, 400);
        assert_eq!(config.theme.default, Theme::Light);
        assert_eq!(config.contact.submit_delay_ms, 2000);
        assert!(!config.contact.simulate_failure);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[gallery]
thumbnail_click = "open"
"#;
        let config: PageConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.gallery.thumbnail_click, ThumbnailPolicy::Open);
        assert_eq!(config.gallery.swipe_threshold, 50.0);
        assert_eq!(config.slider.interval_ms, 5000);
    }

    #[test]
    fn unknown_keys_rejected() {
        let toml = r#"
[gallery]
swipe_treshold = 10.0
"#;
        assert!(toml::from_str::<PageConfig>(toml).is_err());
    }

    #[test]
    fn merge_overlays_nested_keys() {
        let base = stock_defaults_value().unwrap();
        let overlay: toml::Value = toml::from_str("[theme]\ndefault = \"dark\"").unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.theme.default, Theme::Dark);
        assert_eq!(config.theme.state_file, ".alumni-theme.json");
    }

    #[test]
    fn validation_rejects_zero_threshold() {
        let mut config = PageConfig::default();
        config.gallery.swipe_threshold = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validation_rejects_zero_interval() {
        let mut config = PageConfig::default();
        config.slider.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_without_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.gallery.swipe_threshold, 50.0);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[gallery]\nswipe_threshold = 75.5\n[slider]\ninterval_ms = 3000\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.gallery.swipe_threshold, 75.5);
        assert_eq!(config.slider.interval_ms, 3000);
    }

    #[test]
    fn invalid_file_value_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[slider]\ninterval_ms = 0\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: PageConfig = toml::from_str(stock_config_toml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.gallery.swipe_threshold, 50.0);
        assert_eq!(config.cards.collapse_delay_ms, 400);
        assert!(!config.contact.simulate_failure);
        assert_eq!(config.theme.state_file, ".alumni-theme.json");
    }
}
