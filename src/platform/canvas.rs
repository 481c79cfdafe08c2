//! Canvas 2D bindings (wasm32 only)

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::SandboxError;
use crate::renderer::{IconLoader, IconSlot, Paint, Surface, TextStyle};

/// [`Surface`] over an HTML canvas and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SandboxError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(SandboxError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    /// Look up a `<canvas>` by element id and acquire its context
    pub fn from_element_id(id: &str) -> Result<Self, SandboxError> {
        let not_found = || SandboxError::CanvasNotFound { id: id.to_string() };
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .ok_or_else(not_found)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| not_found())?;
        Self::new(canvas)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn screen_offset(&self) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(rect.left() as f32, rect.top() as f32)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: &str, width: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(color),
            Paint::Radial(g) => {
                let gradient = match self.ctx.create_radial_gradient(
                    g.inner_center.x as f64,
                    g.inner_center.y as f64,
                    g.inner_radius as f64,
                    g.outer_center.x as f64,
                    g.outer_center.y as f64,
                    g.outer_radius as f64,
                ) {
                    Ok(gradient) => gradient,
                    Err(e) => {
                        log::warn!("Gradient rejected: {:?}", e);
                        return;
                    }
                };
                for (offset, color) in &g.stops {
                    let _ = gradient.add_color_stop(*offset, color);
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, width: f32) {
        self.circle_path(center, radius);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, origin: Vec2, size: Vec2) {
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            origin.x as f64,
            origin.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle<'_>) {
        self.ctx.set_font(style.font);
        self.ctx.set_fill_style_str(style.color);
        self.ctx.set_text_align(style.align.as_str());
        self.ctx.set_text_baseline(style.baseline.as_str());
        let _ = self.ctx.fill_text(text, at.x as f64, at.y as f64);
    }
}

/// Loads icons as `<img>` elements in the background
#[derive(Debug, Default, Clone, Copy)]
pub struct WebIconLoader;

impl IconLoader for WebIconLoader {
    type Image = HtmlImageElement;

    fn load(&self, url: &str, slot: IconSlot<HtmlImageElement>) {
        let url = url.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_image(&url)
                .await
                .map_err(|e| SandboxError::IconLoad {
                    url: url.clone(),
                    reason: format!("{:?}", e),
                });
            slot.resolve(result);
        });
    }
}

/// Resolve once the browser has decoded the image at `url`
async fn fetch_image(url: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));

    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(url);
    JsFuture::from(loaded).await?;

    image.set_onload(None);
    image.set_onerror(None);
    Ok(image)
}
