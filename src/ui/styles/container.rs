// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use super::ToastColors;
use crate::ui::design_tokens::{border, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Shadow, Theme};

/// Toast surface. The shadow fades along with the toast.
pub fn toast(colors: ToastColors) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        text_color: Some(colors.text),
        background: Some(Background::Color(colors.background)),
        border: Border {
            color: colors.border,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow: Shadow {
            color: Color {
                a: shadow::TOAST.color.a * colors.background.a,
                ..shadow::TOAST.color
            },
            ..shadow::TOAST
        },
        ..Default::default()
    }
}
