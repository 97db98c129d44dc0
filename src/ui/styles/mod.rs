// SPDX-License-Identifier: MPL-2.0
//! Centralized toast styles.
//!
//! A toast's colors are resolved once per render into [`ToastColors`]
//! (theme, inversion, rich colors, fading), optionally adjusted by the
//! owner's stylesheet from the toast's class names, and then handed to the
//! `container` and `button` style closures.

pub mod button;
pub mod classes;
pub mod container;

pub use classes::{classic, ClassJoiner, ClassList, Part, Stylesheet, ToasterClasses};

use crate::toast::ToastKind;
use crate::ui::design_tokens::palette;
use crate::ui::theming::{ColorScheme, ResolvedTheme};
use iced::Color;

/// Every color one toast is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToastColors {
    pub background: Color,
    pub border: Color,
    pub text: Color,
    pub description: Color,
    pub icon: Color,
    pub action_background: Color,
    pub action_text: Color,
    pub cancel_background: Color,
    pub cancel_text: Color,
    pub close_background: Color,
    pub close_border: Color,
    pub close_text: Color,
}

impl ToastColors {
    #[must_use]
    pub fn resolve(kind: ToastKind, theme: ResolvedTheme, invert: bool, rich: bool) -> Self {
        let scheme = ColorScheme::for_toast(theme, invert);
        let dark = scheme == ColorScheme::dark();

        let mut colors = Self {
            background: scheme.background,
            border: scheme.border,
            text: scheme.text,
            description: scheme.description,
            icon: accent(kind).unwrap_or(scheme.text),
            action_background: scheme.action_background,
            action_text: scheme.action_text,
            cancel_background: scheme.cancel_background,
            cancel_text: scheme.cancel_text,
            close_background: scheme.close_background,
            close_border: scheme.close_border,
            close_text: scheme.text,
        };

        if rich {
            if let Some((background, border, text)) = rich_colors(kind, dark) {
                colors.background = background;
                colors.border = border;
                colors.text = text;
                colors.description = text;
                colors.icon = text;
                colors.close_background = background;
                colors.close_border = border;
                colors.close_text = text;
            }
        }
        colors
    }

    /// Multiplies every alpha channel by `alpha`.
    #[must_use]
    pub fn faded(self, alpha: f32) -> Self {
        let fade = |c: Color| Color {
            a: c.a * alpha.clamp(0.0, 1.0),
            ..c
        };
        Self {
            background: fade(self.background),
            border: fade(self.border),
            text: fade(self.text),
            description: fade(self.description),
            icon: fade(self.icon),
            action_background: fade(self.action_background),
            action_text: fade(self.action_text),
            cancel_background: fade(self.cancel_background),
            cancel_text: fade(self.cancel_text),
            close_background: fade(self.close_background),
            close_border: fade(self.close_border),
            close_text: fade(self.close_text),
        }
    }
}

fn accent(kind: ToastKind) -> Option<Color> {
    match kind {
        ToastKind::Success => Some(palette::SUCCESS_500),
        ToastKind::Info => Some(palette::INFO_500),
        ToastKind::Warning => Some(palette::WARNING_500),
        ToastKind::Error => Some(palette::ERROR_500),
        ToastKind::Default | ToastKind::Normal | ToastKind::Action | ToastKind::Loading => None,
    }
}

/// Background, border and text of a rich-colored kind.
fn rich_colors(kind: ToastKind, dark: bool) -> Option<(Color, Color, Color)> {
    use palette::*;
    let colors = match (kind, dark) {
        (ToastKind::Success, false) => (SUCCESS_BG, SUCCESS_BORDER, SUCCESS_TEXT),
        (ToastKind::Success, true) => (SUCCESS_BG_DARK, SUCCESS_BORDER_DARK, SUCCESS_TEXT_DARK),
        (ToastKind::Info, false) => (INFO_BG, INFO_BORDER, INFO_TEXT),
        (ToastKind::Info, true) => (INFO_BG_DARK, INFO_BORDER_DARK, INFO_TEXT_DARK),
        (ToastKind::Warning, false) => (WARNING_BG, WARNING_BORDER, WARNING_TEXT),
        (ToastKind::Warning, true) => (WARNING_BG_DARK, WARNING_BORDER_DARK, WARNING_TEXT_DARK),
        (ToastKind::Error, false) => (ERROR_BG, ERROR_BORDER, ERROR_TEXT),
        (ToastKind::Error, true) => (ERROR_BG_DARK, ERROR_BORDER_DARK, ERROR_TEXT_DARK),
        _ => return None,
    };
    Some(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_colors_tint_only_semantic_kinds() {
        let plain = ToastColors::resolve(ToastKind::Default, ResolvedTheme::Light, false, true);
        assert_eq!(plain.background, palette::WHITE);

        let success = ToastColors::resolve(ToastKind::Success, ResolvedTheme::Light, false, true);
        assert_eq!(success.background, palette::SUCCESS_BG);
        assert_eq!(success.text, palette::SUCCESS_TEXT);
    }

    #[test]
    fn rich_colors_follow_inverted_scheme() {
        let error = ToastColors::resolve(ToastKind::Error, ResolvedTheme::Light, true, true);
        assert_eq!(error.background, palette::ERROR_BG_DARK);
    }

    #[test]
    fn without_rich_colors_only_the_icon_is_tinted() {
        let warning = ToastColors::resolve(ToastKind::Warning, ResolvedTheme::Dark, false, false);
        assert_eq!(warning.background, palette::BLACK);
        assert_eq!(warning.icon, palette::WARNING_500);
    }

    #[test]
    fn fading_scales_alpha() {
        let colors = ToastColors::resolve(ToastKind::Info, ResolvedTheme::Light, false, false);
        let faded = colors.faded(0.5);
        assert_eq!(faded.background.a, 0.5);
        assert_eq!(faded.background.r, colors.background.r);
        assert_eq!(colors.faded(0.0).text.a, 0.0);
    }
}
