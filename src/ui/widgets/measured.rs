// SPDX-License-Identifier: MPL-2.0
//! A wrapper widget that reports its content's natural height and the
//! pointer gestures made on it.
//!
//! The content is laid out with unbounded height so the reported value is
//! what the content needs, even when the wrapper itself is clamped to a
//! shorter height (collapsed toasts are clipped to the front toast).
//! Presses are tracked past the widget bounds until release, which keeps a
//! swipe alive when the pointer leaves the toast.

use crate::toast::PointerKind;
use iced::advanced::layout::{self, Layout};
use iced::advanced::mouse;
use iced::advanced::overlay;
use iced::advanced::renderer;
use iced::advanced::widget::{self, tree, Widget};
use iced::advanced::{Clipboard, Shell};
use iced::{touch, Element, Event, Length, Point, Rectangle, Size};

/// Pointer activity on a [`Measured`] widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pointer {
    Pressed {
        position: Point,
        /// The content (a button, usually) handled the press itself.
        on_control: bool,
        kind: PointerKind,
    },
    Moved {
        position: Point,
        kind: PointerKind,
    },
    Released,
}

#[derive(Debug, Default)]
struct State {
    natural_height: Option<f32>,
    reported_height: Option<f32>,
    pressed: Option<PointerKind>,
}

pub struct Measured<'a, Message, Theme, Renderer> {
    content: Element<'a, Message, Theme, Renderer>,
    max_height: Option<f32>,
    on_resize: Option<Box<dyn Fn(f32) -> Message + 'a>>,
    on_pointer: Option<Box<dyn Fn(Pointer) -> Message + 'a>>,
}

impl<'a, Message, Theme, Renderer> Measured<'a, Message, Theme, Renderer> {
    pub fn new(content: impl Into<Element<'a, Message, Theme, Renderer>>) -> Self {
        Self {
            content: content.into(),
            max_height: None,
            on_resize: None,
            on_pointer: None,
        }
    }

    /// Clips the content to at most `height`.
    #[must_use]
    pub fn max_height(mut self, height: Option<f32>) -> Self {
        self.max_height = height;
        self
    }

    #[must_use]
    pub fn on_resize(mut self, f: impl Fn(f32) -> Message + 'a) -> Self {
        self.on_resize = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_pointer(mut self, f: impl Fn(Pointer) -> Message + 'a) -> Self {
        self.on_pointer = Some(Box::new(f));
        self
    }

    fn publish_pointer(&self, shell: &mut Shell<'_, Message>, pointer: Pointer) {
        if let Some(on_pointer) = &self.on_pointer {
            shell.publish(on_pointer(pointer));
        }
    }
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for Measured<'_, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        Size::new(self.content.as_widget().size().width, Length::Shrink)
    }

    fn layout(
        &mut self,
        tree: &mut widget::Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let unbounded = layout::Limits::new(
            Size::new(limits.min().width, 0.0),
            Size::new(limits.max().width, f32::INFINITY),
        );
        let content = self
            .content
            .as_widget_mut()
            .layout(&mut tree.children[0], renderer, &unbounded);

        let natural = content.size();
        tree.state.downcast_mut::<State>().natural_height = Some(natural.height);

        let height = clamp_height(natural.height, self.max_height);
        layout::Node::with_children(Size::new(natural.width, height), vec![content])
    }

    fn children(&self) -> Vec<widget::Tree> {
        vec![widget::Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut widget::Tree) {
        tree.diff_children(&[&self.content]);
    }

    fn draw(
        &self,
        tree: &widget::Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        let Some(content_layout) = layout.children().next() else {
            return;
        };
        let Some(clip) = layout.bounds().intersection(viewport) else {
            return;
        };

        renderer.with_layer(clip, |renderer| {
            self.content.as_widget().draw(
                &tree.children[0],
                renderer,
                theme,
                style,
                content_layout,
                cursor,
                &clip,
            );
        });
    }

    fn update(
        &mut self,
        tree: &mut widget::Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        if let Some(content_layout) = layout.children().next() {
            self.content.as_widget_mut().update(
                &mut tree.children[0],
                event,
                content_layout,
                cursor,
                renderer,
                clipboard,
                shell,
                viewport,
            );
        }

        let state = tree.state.downcast_mut::<State>();

        if let Some(height) = state.natural_height {
            if state.reported_height != Some(height) {
                state.reported_height = Some(height);
                if let Some(on_resize) = &self.on_resize {
                    shell.publish(on_resize(height));
                }
            }
        }

        if self.on_pointer.is_none() {
            return;
        }

        let bounds = layout.bounds();
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_over(bounds) {
                    state.pressed = Some(PointerKind::Mouse);
                    let on_control = shell.is_event_captured();
                    self.publish_pointer(
                        shell,
                        Pointer::Pressed {
                            position,
                            on_control,
                            kind: PointerKind::Mouse,
                        },
                    );
                }
            }
            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                // A levitated cursor means a layer above took the press.
                if bounds.contains(*position) && cursor.is_over(bounds) {
                    state.pressed = Some(PointerKind::Touch);
                    let on_control = shell.is_event_captured();
                    self.publish_pointer(
                        shell,
                        Pointer::Pressed {
                            position: *position,
                            on_control,
                            kind: PointerKind::Touch,
                        },
                    );
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position })
            | Event::Touch(touch::Event::FingerMoved { position, .. }) => {
                if let Some(kind) = state.pressed {
                    self.publish_pointer(
                        shell,
                        Pointer::Moved {
                            position: *position,
                            kind,
                        },
                    );
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            | Event::Touch(touch::Event::FingerLifted { .. } | touch::Event::FingerLost { .. }) => {
                if state.pressed.take().is_some() {
                    self.publish_pointer(shell, Pointer::Released);
                }
            }
            _ => {}
        }
    }

    fn mouse_interaction(
        &self,
        tree: &widget::Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        if !cursor.is_over(layout.bounds()) {
            return mouse::Interaction::default();
        }
        let state = tree.state.downcast_ref::<State>();
        if state.pressed.is_some() {
            return mouse::Interaction::Grabbing;
        }
        let content = layout
            .children()
            .next()
            .map_or(mouse::Interaction::default(), |content_layout| {
                self.content.as_widget().mouse_interaction(
                    &tree.children[0],
                    content_layout,
                    cursor,
                    viewport,
                    renderer,
                )
            });

        // Stacked layers below only stop receiving the cursor when this
        // one reports an interaction.
        if content == mouse::Interaction::None && self.on_pointer.is_some() {
            mouse::Interaction::Grab
        } else {
            content
        }
    }

    fn operate(
        &mut self,
        tree: &mut widget::Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn widget::Operation,
    ) {
        if let Some(content_layout) = layout.children().next() {
            self.content.as_widget_mut().operate(
                &mut tree.children[0],
                content_layout,
                renderer,
                operation,
            );
        }
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut widget::Tree,
        layout: Layout<'b>,
        renderer: &Renderer,
        viewport: &Rectangle,
        translation: iced::Vector,
    ) -> Option<overlay::Element<'b, Message, Theme, Renderer>> {
        let content_layout = layout.children().next()?;
        self.content.as_widget_mut().overlay(
            &mut tree.children[0],
            content_layout,
            renderer,
            viewport,
            translation,
        )
    }
}

impl<'a, Message, Theme, Renderer> From<Measured<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: renderer::Renderer + 'a,
{
    fn from(wrapper: Measured<'a, Message, Theme, Renderer>) -> Self {
        Self::new(wrapper)
    }
}

/// Helper function to create a [`Measured`] wrapper.
pub fn measured<'a, Message, Theme, Renderer>(
    content: impl Into<Element<'a, Message, Theme, Renderer>>,
) -> Measured<'a, Message, Theme, Renderer>
where
    Renderer: renderer::Renderer,
{
    Measured::new(content)
}

fn clamp_height(natural: f32, max_height: Option<f32>) -> f32 {
    match max_height {
        Some(max) if max.is_finite() && max >= 0.0 => natural.min(max),
        _ => natural,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::advanced::clipboard;
    use iced::widget::{Space, Stack};
    use iced::Theme;

    /// Three same-size layers stacked on top of each other; every layer
    /// reports presses tagged with its index.
    fn overlapping_layers() -> Element<'static, usize, Theme, ()> {
        (0..3)
            .fold(Stack::new(), |stack, layer| {
                stack.push(
                    measured(Space::new().width(100.0).height(40.0)).on_pointer(
                        move |pointer| match pointer {
                            Pointer::Pressed { .. } => layer,
                            _ => usize::MAX,
                        },
                    ),
                )
            })
            .into()
    }

    fn pressed_layers(event: Event, at: Point) -> Vec<usize> {
        let mut element = overlapping_layers();
        let mut tree = widget::Tree::new(&element);
        let limits = layout::Limits::new(Size::ZERO, Size::new(400.0, 400.0));
        let node = element.as_widget_mut().layout(&mut tree, &(), &limits);
        let viewport = Rectangle::new(Point::ORIGIN, Size::new(400.0, 400.0));

        let mut messages = Vec::new();
        let mut shell = Shell::new(&mut messages);
        element.as_widget_mut().update(
            &mut tree,
            &event,
            Layout::new(&node),
            mouse::Cursor::Available(at),
            &(),
            &mut clipboard::Null,
            &mut shell,
            &viewport,
        );
        messages
    }

    #[test]
    fn touch_press_reaches_only_the_top_layer() {
        let at = Point::new(20.0, 20.0);
        let event = Event::Touch(touch::Event::FingerPressed {
            id: touch::Finger(0),
            position: at,
        });
        assert_eq!(pressed_layers(event, at), vec![2]);
    }

    #[test]
    fn mouse_press_reaches_only_the_top_layer() {
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        assert_eq!(pressed_layers(event, Point::new(20.0, 20.0)), vec![2]);
    }

    #[test]
    fn touch_outside_every_layer_is_ignored() {
        let at = Point::new(300.0, 300.0);
        let event = Event::Touch(touch::Event::FingerPressed {
            id: touch::Finger(0),
            position: at,
        });
        assert!(pressed_layers(event, at).is_empty());
    }

    #[test]
    fn height_is_clamped_only_when_limited() {
        assert_eq!(clamp_height(80.0, None), 80.0);
        assert_eq!(clamp_height(80.0, Some(52.0)), 52.0);
        assert_eq!(clamp_height(40.0, Some(52.0)), 40.0);
    }

    #[test]
    fn invalid_limits_are_ignored() {
        assert_eq!(clamp_height(80.0, Some(f32::NAN)), 80.0);
        assert_eq!(clamp_height(80.0, Some(-1.0)), 80.0);
    }
}
