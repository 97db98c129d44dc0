// SPDX-License-Identifier: MPL-2.0
//! Loading and saving toaster preferences in a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[layout]` - Stack position, gap, visible count, window offset, width
//! - `[appearance]` - Theme mode and default toast styling flags
//! - `[timing]` - Auto-close budget and exit transition length
//! - `[gestures]` - Swipe-to-dismiss thresholds
//! - `[keyboard]` - Stack shortcut
//! - `[icons]` - Per-kind glyph overrides
//!
//! Missing sections and fields fall back to [`defaults`]. Out-of-range
//! values are clamped by [`Config::sanitized`].
//!
//! # Examples
//!
//! ```no_run
//! use iced_toaster::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.layout.visible_toasts = 5;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::toast::hotkey::Hotkey;
use crate::toast::lifecycle::Tuning;
use crate::toast::record::{Position, ToastKind};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Stack geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Default anchor for toasts that do not choose one.
    pub position: Position,
    pub gap: f32,
    pub visible_toasts: usize,
    /// Distance from the window edge.
    pub offset: f32,
    pub width: f32,
    /// Always show every toast fully instead of a collapsed stack.
    pub expand: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            position: Position::default(),
            gap: GAP,
            visible_toasts: VISIBLE_TOASTS,
            offset: VIEWPORT_OFFSET,
            width: TOAST_WIDTH,
            expand: false,
        }
    }
}

/// Toast appearance defaults, overridable per toast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppearanceConfig {
    #[serde(deserialize_with = "deserialize_theme_mode")]
    pub theme: ThemeMode,
    pub invert: bool,
    pub rich_colors: bool,
    pub close_button: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub duration_ms: u64,
    pub unmount_delay_ms: u64,
    /// Pause timers while the window is unfocused.
    pub pause_when_hidden: bool,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration_ms: TOAST_LIFETIME_MS,
            unmount_delay_ms: UNMOUNT_DELAY_MS,
            pause_when_hidden: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    pub swipe_to_dismiss: bool,
    pub swipe_threshold: f32,
    /// px/ms
    pub velocity_threshold: f32,
    pub mouse_start_threshold: f32,
    pub touch_start_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_to_dismiss: true,
            swipe_threshold: SWIPE_THRESHOLD,
            velocity_threshold: VELOCITY_THRESHOLD,
            mouse_start_threshold: MOUSE_SWIPE_START_THRESHOLD,
            touch_start_threshold: TOUCH_SWIPE_START_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyboardConfig {
    pub hotkey: String,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            hotkey: HOTKEY.to_string(),
        }
    }
}

/// Glyph overrides for the kind icons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct IconConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading: Option<String>,
}

impl IconConfig {
    #[must_use]
    pub fn get(&self, kind: ToastKind) -> Option<&str> {
        match kind {
            ToastKind::Success => self.success.as_deref(),
            ToastKind::Info => self.info.as_deref(),
            ToastKind::Warning => self.warning.as_deref(),
            ToastKind::Error => self.error.as_deref(),
            ToastKind::Loading => self.loading.as_deref(),
            ToastKind::Default | ToastKind::Normal | ToastKind::Action => None,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub appearance: AppearanceConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub gestures: GestureConfig,

    #[serde(default)]
    pub keyboard: KeyboardConfig,

    #[serde(default)]
    pub icons: IconConfig,
}

impl Config {
    /// Copy with every numeric value forced into its supported range.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let layout = &mut self.layout;
        layout.visible_toasts = layout.visible_toasts.max(MIN_VISIBLE_TOASTS);
        layout.gap = clamp_px(layout.gap, GAP);
        layout.offset = clamp_px(layout.offset, VIEWPORT_OFFSET);
        layout.width = clamp_px(layout.width, TOAST_WIDTH).max(1.0);

        let gestures = &mut self.gestures;
        gestures.swipe_threshold = positive_or(gestures.swipe_threshold, SWIPE_THRESHOLD);
        gestures.velocity_threshold = positive_or(gestures.velocity_threshold, VELOCITY_THRESHOLD);
        gestures.mouse_start_threshold =
            positive_or(gestures.mouse_start_threshold, MOUSE_SWIPE_START_THRESHOLD);
        gestures.touch_start_threshold =
            positive_or(gestures.touch_start_threshold, TOUCH_SWIPE_START_THRESHOLD);
        self
    }

    /// Default auto-close budget for toasts without their own duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.timing.duration_ms)
    }

    #[must_use]
    pub fn tuning(&self) -> Tuning {
        Tuning {
            swipe_threshold: self.gestures.swipe_threshold,
            velocity_threshold: self.gestures.velocity_threshold,
            mouse_start_threshold: self.gestures.mouse_start_threshold,
            touch_start_threshold: self.gestures.touch_start_threshold,
            unmount_delay: Duration::from_millis(self.timing.unmount_delay_ms),
            swipe_enabled: self.gestures.swipe_to_dismiss,
        }
    }

    /// Parsed stack shortcut. An invalid entry falls back to the default.
    #[must_use]
    pub fn hotkey(&self) -> Hotkey {
        match self.keyboard.hotkey.parse() {
            Ok(hotkey) => hotkey,
            Err(err) => {
                tracing::warn!(hotkey = %self.keyboard.hotkey, error = %err, "invalid hotkey, using default");
                Hotkey::default()
            }
        }
    }
}

fn clamp_px(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, MAX_LAYOUT_PX)
    } else {
        fallback
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(D::Error::custom)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to load config");
                    return (
                        Config::default(),
                        Some(format!("Could not read {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config.sanitized())
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match get_config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Err(Error::Config("no config directory available".to_string())),
    }
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.layout.position, Position::BottomRight);
        assert_eq!(config.layout.visible_toasts, 3);
        assert_eq!(config.layout.gap, 14.0);
        assert_eq!(config.appearance.theme, ThemeMode::Light);
        assert_eq!(config.duration(), Duration::from_millis(4000));
        assert_eq!(config.hotkey().label(), "Alt+T");
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut config = Config::default();
        config.layout.position = Position::TopCenter;
        config.layout.expand = true;
        config.appearance.theme = ThemeMode::Dark;
        config.timing.pause_when_hidden = true;
        config.icons.success = Some("✓".to_string());

        save_with_override(&config, Some(base_dir.clone())).expect("save should succeed");
        assert!(base_dir.join("settings.toml").exists());

        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none());
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_some());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("settings.toml");
        fs::write(
            &path,
            "[layout]\nposition = \"top-left\"\n\n[appearance]\ntheme = \"SYSTEM\"\n",
        )
        .expect("write file");

        let config = load_from_path(&path).expect("load should succeed");
        assert_eq!(config.layout.position, Position::TopLeft);
        assert_eq!(config.layout.gap, GAP);
        assert_eq!(config.appearance.theme, ThemeMode::System);
        assert_eq!(config.gestures, GestureConfig::default());
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "[appearance]\ntheme = \"sepia\"\n").expect("write file");

        assert!(matches!(load_from_path(&path), Err(Error::Config(_))));
    }

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.layout.visible_toasts = 0;
        config.layout.gap = -5.0;
        config.gestures.swipe_threshold = 0.0;
        config.gestures.velocity_threshold = f32::NAN;

        let config = config.sanitized();
        assert_eq!(config.layout.visible_toasts, 1);
        assert_eq!(config.layout.gap, 0.0);
        assert_eq!(config.gestures.swipe_threshold, SWIPE_THRESHOLD);
        assert_eq!(config.gestures.velocity_threshold, VELOCITY_THRESHOLD);
    }

    #[test]
    fn invalid_hotkey_falls_back_to_default() {
        let mut config = Config::default();
        config.keyboard.hotkey = "Alt+".to_string();
        assert_eq!(config.hotkey(), Hotkey::default());
    }

    #[test]
    fn tuning_follows_gesture_section() {
        let mut config = Config::default();
        config.gestures.swipe_to_dismiss = false;
        config.timing.unmount_delay_ms = 500;

        let tuning = config.tuning();
        assert!(!tuning.swipe_enabled);
        assert_eq!(tuning.unmount_delay, Duration::from_millis(500));
    }

    #[test]
    fn save_with_override_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested = temp_dir.path().join("a").join("b");

        save_with_override(&Config::default(), Some(nested.clone())).expect("save");
        assert!(nested.join("settings.toml").exists());
    }
}
