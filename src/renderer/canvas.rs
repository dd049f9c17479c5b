//! Canvas 2D backend for `Surface`

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Rgb, Surface};

const LABEL_FONT: &str = "bold 10px Arial";

/// A `<canvas>` element and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context not available"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the parent element's client size
    pub fn fit_to_container(&self) {
        if let Some(parent) = self.canvas.parent_element() {
            let width = parent.client_width().max(0) as u32;
            let height = parent.client_height().max(0) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            log::info!("Canvas resized: {}x{}", width, height);
        }
    }

    fn set_shadow(&self, color: &str, blur: f64, offset: f64) {
        self.ctx.set_shadow_color(color);
        self.ctx.set_shadow_blur(blur);
        self.ctx.set_shadow_offset_x(offset);
        self.ctx.set_shadow_offset_y(offset);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn shaded_disc(&mut self, center: Vec2, radius: f32, fill: Rgb, edge: Rgb) {
        let (x, y, r) = (center.x as f64, center.y as f64, radius as f64);
        let ctx = &self.ctx;

        // Drop shadow
        ctx.save();
        ctx.begin_path();
        let _ = ctx.arc(x, y, r, 0.0, std::f64::consts::TAU);
        ctx.set_fill_style_str(&fill.css());
        self.set_shadow("rgba(0, 0, 0, 0.3)", 10.0, 3.0);
        ctx.fill();
        ctx.restore();

        // Highlight toward the upper left, shade toward the rim
        ctx.begin_path();
        let _ = ctx.arc(x, y, r, 0.0, std::f64::consts::TAU);
        match ctx.create_radial_gradient(x - r * 0.3, y - r * 0.3, 0.0, x, y, r) {
            Ok(gradient) => {
                let _ = gradient.add_color_stop(0.0, "rgba(255, 255, 255, 0.8)");
                let _ = gradient.add_color_stop(0.3, &fill.css());
                let _ = gradient.add_color_stop(1.0, &edge.css());
                ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Err(_) => ctx.set_fill_style_str(&fill.css()),
        }
        ctx.fill();

        ctx.set_stroke_style_str(&edge.css());
        ctx.set_line_width(2.0);
        ctx.stroke();
    }

    fn text_width(&self, text: &str) -> f32 {
        self.ctx.set_font(LABEL_FONT);
        self.ctx
            .measure_text(text)
            .map(|m| m.width() as f32)
            .unwrap_or(0.0)
    }

    fn label(&mut self, text: &str, at: Vec2) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_fill_style_str(&Rgb::WHITE.css());
        ctx.set_font(LABEL_FONT);
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        self.set_shadow("rgba(0, 0, 0, 0.5)", 2.0, 0.0);
        let _ = ctx.fill_text(text, at.x as f64, at.y as f64);
        ctx.restore();
    }
}
