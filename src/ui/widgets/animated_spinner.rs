// SPDX-License-Identifier: MPL-2.0
//! Busy indicator drawn on a canvas.
//!
//! The spinner holds no clock of its own: the owner advances the angle on
//! each tick (see [`advance`]) and rebuilds the widget.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Element, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

/// Radians added per animation tick.
pub const STEP: f32 = PI / 10.0;

/// Returns `rotation` advanced by one tick, wrapped to `[0, 2π)`.
#[must_use]
pub fn advance(rotation: f32) -> f32 {
    (rotation + STEP).rem_euclid(TAU)
}

pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size: sizing::ICON_LG,
        }
    }

    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn into_element<Message: 'static>(self) -> Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame: &mut Frame| {
            let center = frame.center();
            let radius = frame.width().min(frame.height()) / 2.0 - 3.0;
            let stroke_width = (self.size / 12.0).max(2.0);

            frame.stroke(
                &Path::circle(center, radius),
                Stroke::default()
                    .with_width(stroke_width)
                    .with_color(Color { a: 0.25, ..self.color }),
            );

            // Quarter-turn arc starting at twelve o'clock.
            let start = self.rotation - PI / 2.0;
            let sweep = PI / 2.0;
            let segments = 24_u16;
            let mut arc = canvas::path::Builder::new();
            arc.move_to(Point::new(
                center.x + radius * start.cos(),
                center.y + radius * start.sin(),
            ));
            for i in 1..=segments {
                let angle = start + sweep * f32::from(i) / f32::from(segments);
                arc.line_to(Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ));
            }

            frame.stroke(
                &arc.build(),
                Stroke::default()
                    .with_width(stroke_width)
                    .with_color(self.color)
                    .with_line_cap(canvas::LineCap::Round),
            );
        });

        vec![geometry]
    }
}
