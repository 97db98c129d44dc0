// SPDX-License-Identifier: MPL-2.0
//! Toast button styles.

use super::ToastColors;
use crate::ui::design_tokens::{border, opacity, radius, shadow, with_alpha};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Filled action button.
pub fn action(colors: ToastColors) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        filled(colors.action_background, colors.action_text, status)
    }
}

/// Muted cancel button.
pub fn cancel(colors: ToastColors) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        filled(colors.cancel_background, colors.cancel_text, status)
    }
}

/// Round close button sitting on the toast's corner.
pub fn close(colors: ToastColors) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => colors.close_border,
            button::Status::Active | button::Status::Disabled => colors.close_background,
        };
        let text_color = match status {
            button::Status::Disabled => fade(colors.close_text, opacity::OVERLAY_MEDIUM),
            _ => colors.close_text,
        };

        button::Style {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                color: colors.close_border,
                width: border::WIDTH_SM,
                radius: radius::FULL.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

fn filled(background: Color, text: Color, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Active => background,
        button::Status::Hovered => fade(background, opacity::OVERLAY_STRONG + 0.2),
        button::Status::Pressed => fade(background, opacity::OVERLAY_STRONG),
        button::Status::Disabled => fade(background, opacity::OVERLAY_MEDIUM),
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: text,
        border: Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

fn fade(color: Color, factor: f32) -> Color {
    with_alpha(color, color.a * factor)
}
