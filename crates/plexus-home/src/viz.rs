use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use plexus_field::{Rgba, Surface};

use crate::dom;
use crate::error::{HomeError, Result};

/// Canvas2D surface. Drawing calls take CSS pixels; the backing store is
/// sized in physical pixels.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
    dpr: f64,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, width: f64, height: f64) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| HomeError::Dom(dom::js_err(e)))?
            .ok_or_else(|| HomeError::Dom("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| HomeError::Dom("not a 2d context".into()))?;

        let dpr = dom::device_pixel_ratio(&dom::window()?);
        let mut surface = CanvasSurface { ctx, canvas, dpr };
        surface.resize(width, height);

        log::info!("canvas2d surface: {width}x{height} @{dpr}x");
        Ok(surface)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU).ok();
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.stroke();
    }

    fn resize(&mut self, width: f64, height: f64) {
        if let Ok(window) = dom::window() {
            self.dpr = dom::device_pixel_ratio(&window);
        }
        // Setting the size resets the context state, so the transform and
        // line width are reapplied after it.
        self.canvas.set_width((width * self.dpr) as u32);
        self.canvas.set_height((height * self.dpr) as u32);
        self.ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
            .ok();
        self.ctx.set_line_width(1.0);
    }
}
