/// Loading spinner drawn on a canvas
/// Advanced by `Message::Tick` while an analysis is in flight
use iced::widget::canvas::{self, path::Arc, Path, Stroke};
use iced::{Color, Point, Radians, Rectangle};
use std::f32::consts::{PI, TAU};

use crate::Message;

/// Radians advanced per tick (~60 ticks per second)
const STEP: f32 = TAU / 75.0;

/// Length of the moving arc
const SWEEP: f32 = PI * 1.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner {
    /// Start angle of the arc, always in [0, TAU)
    pub angle: f32,
}

impl Spinner {
    pub fn tick(&mut self) {
        self.angle = (self.angle + STEP) % TAU;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let width = 4.0;
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let radius = (bounds.width.min(bounds.height) / 2.0 - width).max(1.0);

        // Track
        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default()
                .with_color(Color::from_rgb8(0xDB, 0xEA, 0xFE))
                .with_width(width),
        );

        let arc = Path::new(|builder| {
            builder.arc(Arc {
                center,
                radius,
                start_angle: Radians(self.angle),
                end_angle: Radians(self.angle + SWEEP),
            });
        });

        frame.stroke(
            &arc,
            Stroke::default()
                .with_color(Color::from_rgb8(0x3B, 0x82, 0xF6))
                .with_width(width),
        );

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_wraps_around() {
        let mut spinner = Spinner::default();
        for _ in 0..200 {
            spinner.tick();
            assert!((0.0..TAU).contains(&spinner.angle));
        }
    }

    #[test]
    fn test_reset() {
        let mut spinner = Spinner::default();
        spinner.tick();
        spinner.reset();
        assert_eq!(spinner.angle, 0.0);
    }
}
