//! `CanvasRenderingContext2d` backend

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{FONT, RenderSurface};

/// Draws onto a 2D canvas context. Images are loaded once per source and
/// drawn whenever they have finished loading.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    images: HashMap<String, HtmlImageElement>,
}

impl CanvasSurface {
    /// Wrap the 2D context of `canvas`
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        ctx.set_font(FONT);
        ctx.set_text_align("center");
        Some(Self {
            ctx,
            images: HashMap::new(),
        })
    }

    fn image(&mut self, src: &str) -> Option<&HtmlImageElement> {
        if !self.images.contains_key(src) {
            let img = match HtmlImageElement::new() {
                Ok(img) => img,
                Err(e) => {
                    log::warn!("Failed to create image for {}: {:?}", src, e);
                    return None;
                }
            };
            img.set_src(src);
            self.images.insert(src.to_string(), img);
        }
        self.images.get(src)
    }
}

impl RenderSurface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(cx, cy, radius, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: &str) {
        self.ctx.set_font(FONT);
        self.ctx.set_text_align("center");
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn draw_image(&mut self, src: &str, x: f64, y: f64, w: f64, h: f64) {
        let ctx = self.ctx.clone();
        let Some(img) = self.image(src) else { return };
        if !img.complete() || img.natural_width() == 0 {
            return;
        }
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }
}
