// SPDX-License-Identifier: MPL-2.0
//! Loading indicator drawn on a Canvas: twelve bars fading around a circle.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::TAU;
use std::time::Duration;

const BARS: usize = 12;
/// Time for the bright bar to travel once around.
const PERIOD: Duration = Duration::from_millis(1200);

pub struct Spinner {
    cache: Cache,
    /// Index of the brightest bar.
    lead: usize,
    color: Color,
    size: f32,
}

impl Spinner {
    /// Spinner at the animation step reached after `elapsed`.
    #[must_use]
    pub fn new(color: Color, elapsed: Duration) -> Self {
        Self {
            cache: Cache::default(),
            lead: lead_bar(elapsed),
            color,
            size: sizing::ICON_MD,
        }
    }

    pub fn into_element<'a, Message: 'a>(self) -> iced::Element<'a, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

impl<Message> canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let outer = frame.width().min(frame.height()) / 2.0;
                let inner = outer * 0.45;

                for bar in 0..BARS {
                    #[allow(clippy::cast_precision_loss)]
                    let angle = TAU * bar as f32 / BARS as f32 - TAU / 4.0;
                    let (sin, cos) = angle.sin_cos();
                    let line = Path::line(
                        Point::new(center.x + inner * cos, center.y + inner * sin),
                        Point::new(center.x + outer * cos, center.y + outer * sin),
                    );
                    frame.stroke(
                        &line,
                        Stroke::default()
                            .with_width(1.5)
                            .with_color(Color {
                                a: self.color.a * bar_alpha(bar, self.lead),
                                ..self.color
                            })
                            .with_line_cap(canvas::LineCap::Round),
                    );
                }
            });

        vec![geometry]
    }
}

fn lead_bar(elapsed: Duration) -> usize {
    let step = PERIOD.as_millis() / BARS as u128;
    ((elapsed.as_millis() / step) % BARS as u128) as usize
}

/// Bars trail the lead bar, fading to 15%.
fn bar_alpha(bar: usize, lead: usize) -> f32 {
    let behind = (lead + BARS - bar) % BARS;
    #[allow(clippy::cast_precision_loss)]
    let fade = behind as f32 / BARS as f32;
    1.0 - fade * 0.85
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_bar_wraps_every_period() {
        assert_eq!(lead_bar(Duration::ZERO), 0);
        assert_eq!(lead_bar(Duration::from_millis(100)), 1);
        assert_eq!(lead_bar(Duration::from_millis(1150)), 11);
        assert_eq!(lead_bar(PERIOD), 0);
    }

    #[test]
    fn lead_bar_is_brightest() {
        assert_eq!(bar_alpha(3, 3), 1.0);
        assert!(bar_alpha(2, 3) < 1.0);
        assert!(bar_alpha(4, 3) < bar_alpha(2, 3));
    }
}
