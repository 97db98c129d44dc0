// SPDX-License-Identifier: MPL-2.0
//! Rendering and subscriptions of a [`Toaster`].
//!
//! The view is a full-window layer meant to be stacked on top of the
//! application content. Each position group is a fixed-size region in its
//! corner; toasts are layered inside it, front toast on top, and pushed
//! away from the anchored edge by their stack offset.

use crate::toast::toaster::Message;
use crate::toast::record::{HorizontalPlacement, VerticalEdge};
use crate::toast::{ClassNames, Position, StackItem, ToastFeed, ToastStore, Toaster};
use crate::ui::design_tokens::sizing;
use crate::ui::styles::{classic, ClassJoiner, Stylesheet, ToasterClasses};
use crate::ui::theming::ThemeMode;
use crate::ui::toast::{self, CustomRenderer, ToastContext};
use iced::futures::{SinkExt, Stream};
use iced::widget::{container, mouse_area, Stack};
use iced::{alignment, event, keyboard, stream, time, window, Element, Length, Padding, Subscription};
use std::hash::{Hash, Hasher};

/// Builder for the toaster layer.
pub struct ToasterView<'a> {
    toaster: &'a Toaster,
    classes: ToasterClasses,
    cx: ClassJoiner,
    stylesheet: Option<&'a Stylesheet>,
    custom: Option<&'a CustomRenderer<'a>>,
}

/// Starts building the layer of `toaster`.
#[must_use]
pub fn toaster(toaster: &Toaster) -> ToasterView<'_> {
    ToasterView {
        toaster,
        classes: ToasterClasses::default(),
        cx: classic,
        stylesheet: None,
        custom: None,
    }
}

impl<'a> ToasterView<'a> {
    /// Class applied to every toast.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.classes.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn description_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.classes.description_class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn class_names(mut self, class_names: ClassNames) -> Self {
        self.classes.class_names = class_names;
        self
    }

    /// Replaces the class-name joiner.
    #[must_use]
    pub fn cx(mut self, cx: ClassJoiner) -> Self {
        self.cx = cx;
        self
    }

    #[must_use]
    pub fn stylesheet(mut self, stylesheet: &'a Stylesheet) -> Self {
        self.stylesheet = Some(stylesheet);
        self
    }

    /// Renderer for toasts created with `ToastStore::custom`.
    #[must_use]
    pub fn custom(mut self, render: &'a CustomRenderer<'a>) -> Self {
        self.custom = Some(render);
        self
    }

    pub fn view(self) -> Element<'a, Message> {
        let toaster = self.toaster;
        let mut layer = Stack::new().width(Length::Fill).height(Length::Fill);

        for position in toaster.positions() {
            let items = toaster.stack(position);
            if items.is_empty() {
                continue;
            }
            let ctx = ToastContext {
                config: toaster.config(),
                theme: toaster.theme().resolved(),
                classes: &self.classes,
                cx: self.cx,
                stylesheet: self.stylesheet,
                custom: self.custom,
                front_height: toaster.front_toast_height(position),
                elapsed: toaster.elapsed(),
            };
            layer = layer.push(self.region(position, &items, &ctx));
        }

        layer.into()
    }

    /// The hoverable region of one position group, aligned in its corner.
    fn region(
        &self,
        position: Position,
        items: &[StackItem<'_>],
        ctx: &ToastContext<'_, 'a>,
    ) -> Element<'a, Message> {
        let layout = &self.toaster.config().layout;
        let edge = position.y();

        let heights: Vec<f32> = items.iter().map(|item| self.height_of(item)).collect();
        let expanded = items.iter().any(|item| item.expanded);
        let content_height = region_height(
            items,
            &heights,
            expanded,
            ctx.front_height,
            layout.gap,
            layout.visible_toasts,
        );

        // Back toasts first so the front toast is drawn on top.
        let mut layers = Stack::new()
            .width(Length::Fixed(layout.width))
            .height(Length::Fixed(content_height + layout.offset));
        for item in items.iter().rev() {
            let shift = (layout.offset
                + translation(item, layout.gap)
                + outward(edge, item.swipe_amount))
            .max(0.0);
            let padding = match edge {
                VerticalEdge::Top => Padding::ZERO.top(shift),
                VerticalEdge::Bottom => Padding::ZERO.bottom(shift),
            };
            layers = layers.push(
                container(toast::view(item, ctx))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .padding(padding)
                    .align_y(vertical(edge)),
            );
        }

        let dismissible = items.iter().any(|item| item.record.dismissible);
        let region = mouse_area(layers)
            .on_enter(Message::StackEntered)
            .on_move(|_| Message::StackMoved)
            .on_exit(Message::StackLeft)
            .on_press(Message::FocusEntered {
                previous: None,
                dismissible,
            });

        container(region)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(Padding::ZERO.left(layout.offset).right(layout.offset))
            .align_x(horizontal(position.x()))
            .align_y(vertical(edge))
            .into()
    }

    fn height_of(&self, item: &StackItem<'_>) -> f32 {
        self.toaster
            .heights()
            .height_of(&item.record.id)
            .filter(|height| *height > 0.0)
            .unwrap_or(if item.initial_height > 0.0 {
                item.initial_height
            } else {
                sizing::TOAST_MIN_HEIGHT
            })
    }
}

/// Distance of a toast from the anchored edge, before swiping.
#[allow(clippy::cast_precision_loss)]
fn translation(item: &StackItem<'_>, gap: f32) -> f32 {
    if item.expanded {
        item.offset
    } else {
        item.index as f32 * gap
    }
}

/// Swipe distance toward the anchored edge (negative) or away from it.
fn outward(edge: VerticalEdge, swipe_amount: f32) -> f32 {
    match edge {
        VerticalEdge::Top => swipe_amount,
        VerticalEdge::Bottom => -swipe_amount,
    }
}

/// Height the region needs to show its toasts.
fn region_height(
    items: &[StackItem<'_>],
    heights: &[f32],
    expanded: bool,
    front_height: f32,
    gap: f32,
    visible_toasts: usize,
) -> f32 {
    if expanded {
        return items
            .iter()
            .zip(heights)
            .filter(|(item, _)| item.visible)
            .map(|(item, height)| item.offset + height)
            .fold(0.0, f32::max);
    }
    let front = if front_height > 0.0 {
        front_height
    } else {
        heights.first().copied().unwrap_or(sizing::TOAST_MIN_HEIGHT)
    };
    let shown = items.len().min(visible_toasts).max(1);
    #[allow(clippy::cast_precision_loss)]
    let peek = (shown - 1) as f32 * gap;
    front + peek
}

fn vertical(edge: VerticalEdge) -> alignment::Vertical {
    match edge {
        VerticalEdge::Top => alignment::Vertical::Top,
        VerticalEdge::Bottom => alignment::Vertical::Bottom,
    }
}

fn horizontal(placement: HorizontalPlacement) -> alignment::Horizontal {
    match placement {
        HorizontalPlacement::Left => alignment::Horizontal::Left,
        HorizontalPlacement::Center => alignment::Horizontal::Center,
        HorizontalPlacement::Right => alignment::Horizontal::Right,
    }
}

// =============================================================================
// Subscriptions
// =============================================================================

/// Everything the surface listens to: the store, the clock and native
/// keyboard/window events.
pub fn subscription(toaster: &Toaster) -> Subscription<Message> {
    let clock = if toaster.needs_tick() || toaster.theme().mode() == ThemeMode::System {
        time::every(toaster.tick_interval()).map(Message::Tick)
    } else {
        Subscription::none()
    };

    Subscription::batch([feed(toaster.store().clone()), clock, native_events()])
}

/// Store handle identifying the feed subscription; one feed per store.
struct FeedSource(ToastStore);

impl Hash for FeedSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        "toast-feed".hash(state);
        self.0.key().hash(state);
    }
}

/// Delivers store events one message at a time.
pub fn feed(store: ToastStore) -> Subscription<Message> {
    Subscription::run_with(FeedSource(store), forward_events)
}

fn forward_events(source: &FeedSource) -> impl Stream<Item = Message> {
    let store = source.0.clone();
    stream::channel(100, move |mut output: iced::futures::channel::mpsc::Sender<Message>| async move {
        let mut feed = ToastFeed::connect(&store);
        while let Some(event) = feed.next().await {
            if output.send(Message::Store(event)).await.is_err() {
                tracing::debug!("toast feed receiver dropped");
                break;
            }
        }
    })
}

fn native_events() -> Subscription<Message> {
    event::listen_with(|event, _status, _window| match event {
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        event::Event::Window(window::Event::Focused) => {
            Some(Message::VisibilityChanged { hidden: false })
        }
        event::Event::Window(window::Event::Unfocused) => {
            Some(Message::VisibilityChanged { hidden: true })
        }
        _ => None,
    })
}
