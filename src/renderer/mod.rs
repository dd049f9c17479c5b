//! Rendering module
//!
//! The simulation draws through the `Surface` trait; the browser backend
//! implements it on a 2D canvas context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod color;
pub mod label;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use color::{PALETTE, Rgb, palette_color};
pub use label::{line_origins, wrap_label};

use glam::Vec2;

use crate::consts::LABEL_WIDTH_FACTOR;
use crate::sim::Ball;

/// A 2D drawing target sized to its container
pub trait Surface {
    /// Current drawable size in pixels (may be zero while hidden)
    fn size(&self) -> (f32, f32);

    /// Wipe the whole surface
    fn clear(&mut self);

    /// Filled disc with highlight, shading toward `edge` and an `edge` border
    fn shaded_disc(&mut self, center: Vec2, radius: f32, fill: Rgb, edge: Rgb);

    /// Width of `text` in the label font
    fn text_width(&self, text: &str) -> f32;

    /// One line of label text centered on `at`
    fn label(&mut self, text: &str, at: Vec2);
}

impl Ball {
    /// Draw this ball with its wrapped label. Reads state only.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.shaded_disc(self.pos, self.radius, self.color, self.color.shade());

        let max_width = self.radius * LABEL_WIDTH_FACTOR;
        let lines = wrap_label(&self.label, max_width, |text| surface.text_width(text));
        for (line, at) in lines.iter().zip(line_origins(self.pos, lines.len())) {
            surface.label(line, at);
        }
    }
}

/// Surface that records calls, for tests
#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Clear,
        Disc { center: Vec2, radius: f32 },
        Label { text: String, at: Vec2 },
    }

    pub struct RecordingSurface {
        pub width: f32,
        pub height: f32,
        pub calls: Vec<Call>,
    }

    impl RecordingSurface {
        pub fn new(width: f32, height: f32) -> Self {
            Self {
                width,
                height,
                calls: Vec::new(),
            }
        }

        pub fn discs(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Disc { .. }))
                .count()
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (f32, f32) {
            (self.width, self.height)
        }

        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn shaded_disc(&mut self, center: Vec2, radius: f32, _fill: Rgb, _edge: Rgb) {
            self.calls.push(Call::Disc { center, radius });
        }

        fn text_width(&self, text: &str) -> f32 {
            text.chars().count() as f32 * 6.0
        }

        fn label(&mut self, text: &str, at: Vec2) {
            self.calls.push(Call::Label {
                text: text.to_string(),
                at,
            });
        }
    }
}
