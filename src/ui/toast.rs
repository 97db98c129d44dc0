// SPDX-License-Identifier: MPL-2.0
//! View of a single toast.
//!
//! Layout (left to right): icon, title over description, cancel, action.
//! The close button sits on the top-left corner. Everything is wrapped in
//! a [`Measured`](crate::ui::widgets::Measured) so the surface learns the
//! natural height and receives swipe gestures.

use crate::config::Config;
use crate::toast::toaster::Message;
use crate::toast::{StackItem, ToastId, ToastInput, ToastRecord};
use crate::ui::design_tokens::{opacity, sizing, spacing, typography};
use crate::ui::icons::{self, Icon};
use crate::ui::styles::{self, ClassJoiner, ClassList, Stylesheet, ToastColors, ToasterClasses};
use crate::ui::theming::ResolvedTheme;
use crate::ui::widgets::{measured, Pointer, Spinner};
use iced::font::Weight;
use iced::widget::{button, column, container, text, Column, Row, Stack};
use iced::{alignment, Element, Font, Length};
use std::time::Duration;

/// Renders the content of toasts created with `ToastStore::custom`, given
/// the record and its content key.
pub type CustomRenderer<'a> = dyn Fn(&ToastRecord, &str) -> Element<'a, Message> + 'a;

/// Everything a toast view needs besides its own [`StackItem`].
///
/// `'a` is the lifetime of the produced elements.
pub struct ToastContext<'c, 'a> {
    pub config: &'c Config,
    pub theme: ResolvedTheme,
    pub classes: &'c ToasterClasses,
    pub cx: ClassJoiner,
    pub stylesheet: Option<&'c Stylesheet>,
    pub custom: Option<&'c CustomRenderer<'a>>,
    /// Height of the group's front toast.
    pub front_height: f32,
    pub elapsed: Duration,
}

/// Opacity of a toast given where it sits in the stack.
#[must_use]
pub fn alpha(item: &StackItem<'_>) -> f32 {
    if !item.mounted || !item.visible || item.removed || item.swipe_out {
        return opacity::TRANSPARENT;
    }
    if item.swiping {
        return (1.0 - item.swipe_amount.abs() / 100.0).clamp(opacity::OVERLAY_SUBTLE, 1.0);
    }
    if !item.expanded && !item.front {
        return opacity::BEHIND;
    }
    opacity::OPAQUE
}

/// Height limit of the toast: toasts behind a collapsed front toast take
/// its height.
#[must_use]
pub fn height_limit(item: &StackItem<'_>, front_height: f32) -> Option<f32> {
    (!item.expanded && !item.front && item.mounted && front_height > 0.0).then_some(front_height)
}

pub fn view<'a>(item: &StackItem<'_>, ctx: &ToastContext<'_, 'a>) -> Element<'a, Message> {
    let record = item.record;
    let id = record.id.clone();
    let classes = ClassList::build(record, ctx.classes, ctx.cx);

    let content: Element<'a, Message> = match (&record.custom, ctx.custom) {
        (Some(key), Some(render)) => render(record, key),
        _ => chrome(item, ctx, &classes),
    };

    let resize_id = id.clone();
    measured(container(content).width(Length::Fixed(ctx.config.layout.width)))
        .max_height(height_limit(item, ctx.front_height))
        .on_resize(move |height| Message::Toast {
            id: resize_id.clone(),
            input: ToastInput::Measured(height),
        })
        .on_pointer(move |pointer| Message::Toast {
            id: id.clone(),
            input: pointer_input(pointer),
        })
        .into()
}

fn pointer_input(pointer: Pointer) -> ToastInput {
    match pointer {
        Pointer::Pressed {
            position,
            on_control,
            kind,
        } => ToastInput::PointerDown {
            position,
            on_control,
            kind,
        },
        Pointer::Moved { position, kind } => ToastInput::PointerMoved { position, kind },
        Pointer::Released => ToastInput::PointerUp,
    }
}

/// The built-in toast chrome.
fn chrome<'a>(
    item: &StackItem<'_>,
    ctx: &ToastContext<'_, 'a>,
    classes: &ClassList,
) -> Element<'a, Message> {
    let record = item.record;
    let appearance = &ctx.config.appearance;

    let mut colors = ToastColors::resolve(
        record.kind,
        ctx.theme,
        record.invert.unwrap_or(appearance.invert),
        record.rich_colors.unwrap_or(appearance.rich_colors),
    );
    if let Some(stylesheet) = ctx.stylesheet {
        stylesheet(classes, &mut colors);
    }
    let colors = colors.faded(alpha(item));

    let mut row = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center);

    if let Some(icon) = icons::for_toast(record, &ctx.config.icons) {
        row = row.push(icon_view(icon, colors, ctx.elapsed));
    }

    let mut body = Column::new().spacing(spacing::XXS).width(Length::Fill);
    if let Some(title) = &record.title {
        body = body.push(
            text(title.clone())
                .size(typography::TITLE)
                .font(Font {
                    weight: Weight::Semibold,
                    ..Font::DEFAULT
                })
                .color(colors.text),
        );
    }
    if let Some(description) = &record.description {
        body = body.push(
            text(description.clone())
                .size(typography::CAPTION)
                .color(colors.description),
        );
    }
    row = row.push(body);

    if let Some(cancel) = &record.cancel {
        row = row.push(
            button(text(cancel.label.clone()).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::XS])
                .style(styles::button::cancel(colors))
                .on_press(toast_message(&record.id, ToastInput::Cancel)),
        );
    }
    if let Some(action) = &record.action {
        row = row.push(
            button(text(action.label.clone()).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::XS])
                .style(styles::button::action(colors))
                .on_press(toast_message(&record.id, ToastInput::Action)),
        );
    }

    let surface = container(row)
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::toast(colors));

    let close_button = record.close_button.unwrap_or(appearance.close_button);
    if !close_button || item.disabled {
        return surface.into();
    }

    let close = button(
        container(text(icons::CLOSE).size(typography::CAPTION - 2.0))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center),
    )
    .width(Length::Fixed(sizing::CLOSE_BUTTON))
    .height(Length::Fixed(sizing::CLOSE_BUTTON))
    .padding(0)
    .style(styles::button::close(colors))
    .on_press_maybe(
        record
            .dismissible
            .then(|| toast_message(&record.id, ToastInput::Close)),
    );

    Stack::new()
        .push(surface)
        .push(
            container(close)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(spacing::XXS)
                .align_x(alignment::Horizontal::Left)
                .align_y(alignment::Vertical::Top),
        )
        .into()
}

fn icon_view<'a>(icon: Icon, colors: ToastColors, elapsed: Duration) -> Element<'a, Message> {
    let slot = match icon {
        Icon::Spinner => Spinner::new(colors.icon, elapsed).into_element(),
        Icon::Glyph(glyph) => text(glyph)
            .size(sizing::ICON_MD)
            .color(colors.icon)
            .into(),
    };
    column![slot]
        .width(Length::Fixed(sizing::ICON_MD + spacing::XXS))
        .align_x(alignment::Horizontal::Center)
        .into()
}

fn toast_message(id: &ToastId, input: ToastInput) -> Message {
    Message::Toast {
        id: id.clone(),
        input,
    }
}
