// SPDX-License-Identifier: MPL-2.0
//! Light/dark theming for the toast stack.

use crate::config::THEME_POLL_INTERVAL_MS;
use crate::ui::design_tokens::{palette, with_alpha};
use iced::Color;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Colors of an un-tinted toast.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub background: Color,
    pub border: Color,
    pub text: Color,
    pub description: Color,

    // Action button (filled) and cancel button (muted)
    pub action_background: Color,
    pub action_text: Color,
    pub cancel_background: Color,
    pub cancel_text: Color,

    pub close_background: Color,
    pub close_border: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            background: palette::WHITE,
            border: palette::GRAY_100,
            text: palette::GRAY_950,
            description: palette::GRAY_400,

            action_background: palette::GRAY_950,
            action_text: palette::GRAY_50,
            cancel_background: with_alpha(palette::BLACK, 0.08),
            cancel_text: palette::GRAY_950,

            close_background: palette::WHITE,
            close_border: palette::GRAY_100,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: palette::BLACK,
            border: palette::GRAY_800,
            text: palette::GRAY_50,
            description: palette::GRAY_200,

            action_background: palette::GRAY_50,
            action_text: palette::GRAY_950,
            cancel_background: with_alpha(palette::WHITE, 0.3),
            cancel_text: palette::GRAY_50,

            close_background: palette::BLACK,
            close_border: palette::GRAY_800,
        }
    }

    /// Scheme of a toast; `invert` swaps light and dark.
    #[must_use]
    pub fn for_toast(theme: ResolvedTheme, invert: bool) -> Self {
        match (theme, invert) {
            (ResolvedTheme::Light, false) | (ResolvedTheme::Dark, true) => Self::light(),
            (ResolvedTheme::Dark, false) | (ResolvedTheme::Light, true) => Self::dark(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    /// Follow the operating system.
    System,
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(Error::Config(format!("unknown theme `{other}`"))),
        }
    }
}

/// Theme actually in use once `System` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    #[must_use]
    pub fn iced_theme(self) -> iced::Theme {
        match self {
            ResolvedTheme::Light => iced::Theme::Light,
            ResolvedTheme::Dark => iced::Theme::Dark,
        }
    }
}

/// Asks the OS for its color scheme. Light unless it reports dark.
#[must_use]
pub fn detect_system() -> ResolvedTheme {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => ResolvedTheme::Dark,
        Ok(_) => ResolvedTheme::Light,
        Err(err) => {
            tracing::debug!(error = ?err, "system theme detection failed");
            ResolvedTheme::Light
        }
    }
}

/// Resolves a [`ThemeMode`] and follows OS changes while in `System` mode.
#[derive(Debug, Clone)]
pub struct ThemeTracker {
    mode: ThemeMode,
    resolved: ResolvedTheme,
    last_detection: Option<Instant>,
    detect: fn() -> ResolvedTheme,
}

impl ThemeTracker {
    #[must_use]
    pub fn new(mode: ThemeMode) -> Self {
        Self::with_detector(mode, detect_system)
    }

    #[must_use]
    pub fn with_detector(mode: ThemeMode, detect: fn() -> ResolvedTheme) -> Self {
        let resolved = match mode {
            ThemeMode::Light => ResolvedTheme::Light,
            ThemeMode::Dark => ResolvedTheme::Dark,
            ThemeMode::System => detect(),
        };
        Self {
            mode,
            resolved,
            last_detection: None,
            detect,
        }
    }

    /// Asks the OS again at most once per poll interval. Returns whether the
    /// resolved theme changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.mode != ThemeMode::System {
            return false;
        }
        let interval = Duration::from_millis(THEME_POLL_INTERVAL_MS);
        if self
            .last_detection
            .is_some_and(|last| now.saturating_duration_since(last) < interval)
        {
            return false;
        }
        self.last_detection = Some(now);

        let detected = (self.detect)();
        if detected == self.resolved {
            return false;
        }
        tracing::debug!(theme = ?detected, "system theme changed");
        self.resolved = detected;
        true
    }

    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    #[must_use]
    pub fn resolved(&self) -> ResolvedTheme {
        self.resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[test]
    fn light_scheme_has_light_surface() {
        assert!(ColorScheme::light().background.r > 0.9);
        assert!(ColorScheme::dark().background.r < 0.1);
    }

    #[test]
    fn invert_swaps_schemes() {
        assert_eq!(
            ColorScheme::for_toast(ResolvedTheme::Light, true),
            ColorScheme::dark()
        );
        assert_eq!(
            ColorScheme::for_toast(ResolvedTheme::Dark, true),
            ColorScheme::light()
        );
    }

    #[test]
    fn theme_mode_parses_case_insensitively() {
        assert_eq!("Dark".parse::<ThemeMode>().ok(), Some(ThemeMode::Dark));
        assert_eq!(" system ".parse::<ThemeMode>().ok(), Some(ThemeMode::System));
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn fixed_modes_never_query_the_os() {
        fn panics() -> ResolvedTheme {
            panic!("must not query the OS")
        }
        let mut tracker = ThemeTracker::with_detector(ThemeMode::Dark, panics);
        assert!(!tracker.poll(Instant::now()));
        assert_eq!(tracker.resolved(), ResolvedTheme::Dark);
    }

    static DETECTIONS: AtomicUsize = AtomicUsize::new(0);
    static DARK: AtomicBool = AtomicBool::new(false);

    fn scripted() -> ResolvedTheme {
        DETECTIONS.fetch_add(1, Ordering::SeqCst);
        if DARK.load(Ordering::SeqCst) {
            ResolvedTheme::Dark
        } else {
            ResolvedTheme::Light
        }
    }

    #[test]
    fn system_mode_follows_changes_at_most_once_per_interval() {
        let t0 = Instant::now();
        let mut tracker = ThemeTracker::with_detector(ThemeMode::System, scripted);
        assert_eq!(tracker.resolved(), ResolvedTheme::Light);

        DARK.store(true, Ordering::SeqCst);
        assert!(tracker.poll(t0));
        assert_eq!(tracker.resolved(), ResolvedTheme::Dark);

        let detections = DETECTIONS.load(Ordering::SeqCst);
        assert!(!tracker.poll(t0 + Duration::from_millis(500)));
        assert_eq!(DETECTIONS.load(Ordering::SeqCst), detections);

        DARK.store(false, Ordering::SeqCst);
        assert!(tracker.poll(t0 + Duration::from_millis(1000)));
        assert_eq!(tracker.resolved(), ResolvedTheme::Light);
    }
}
