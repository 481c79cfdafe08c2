//! Scene renderer
//!
//! Draws one frame from a snapshot: grid, bubbles, HUD. Also owns the
//! pointer-to-surface transform and the icon cache.

use glam::Vec2;

use super::icons::{IconCache, IconLoader, IconSlot};
use super::style::{RenderStyle, with_alpha};
use super::surface::{Paint, RadialGradient, Surface, TextAlign, TextBaseline, TextStyle};
use crate::sim::{Bubble, Snapshot};

/// Gradient stop alphas: translucent centre, opaque rim
const GRADIENT_STOPS: [(f32, u8); 3] = [(0.0, 0x40), (0.7, 0x80), (1.0, 0xFF)];
/// Highlight sits up-left of the centre by this fraction of the radius
const HIGHLIGHT_OFFSET: f32 = 0.3;
const HIGHLIGHT_RADIUS: f32 = 0.2;

/// HUD inputs supplied by the host each frame
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud<'a> {
    /// Externally measured frame rate
    pub fps: u32,
    pub instructions: Option<&'a str>,
    pub show_stats: bool,
    pub show_grid: bool,
}

/// Renders bubbles onto a [`Surface`]
pub struct SceneRenderer<S: Surface, L> {
    surface: S,
    loader: L,
    icons: IconCache<S::Image>,
    style: RenderStyle,
}

impl<S, L> SceneRenderer<S, L>
where
    S: Surface,
    L: IconLoader<Image = S::Image>,
{
    /// Wrap an acquired surface. Surface acquisition is where construction
    /// can fail; see `CanvasSurface::new`.
    pub fn new(surface: S, loader: L, style: RenderStyle) -> Self {
        Self {
            surface,
            loader,
            icons: IconCache::new(),
            style,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn icons(&self) -> &IconCache<S::Image> {
        &self.icons
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Set the surface's pixel size (host resize event)
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.set_size(width, height);
        log::info!("Surface resized to {}x{}", width, height);
    }

    pub fn dimensions(&self) -> Vec2 {
        self.surface.size()
    }

    /// Pointer (screen) coordinates to surface-local coordinates. Every
    /// pointer input goes through this before reaching the simulation.
    pub fn screen_to_canvas(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        Vec2::new(screen_x, screen_y) - self.surface.screen_offset()
    }

    /// Start (or retry) loading a set of icons
    pub fn preload_icons<'a>(
        &mut self,
        icon_refs: impl IntoIterator<Item = &'a str>,
    ) -> Vec<IconSlot<S::Image>> {
        icon_refs
            .into_iter()
            .map(|icon| self.icons.get_or_load(icon, &self.loader))
            .collect()
    }

    /// Full frame: clear, grid, bubbles, HUD
    pub fn render(&mut self, snapshot: &Snapshot, hud: &Hud<'_>) {
        self.clear();
        if hud.show_grid {
            self.draw_grid();
        }
        self.draw_bubbles(&snapshot.bubbles);
        if let Some(text) = hud.instructions {
            self.draw_instructions(text);
        }
        if hud.show_stats {
            self.draw_stats(hud.fps, snapshot.len());
        }
    }

    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Faint reference grid at every multiple of the grid size
    pub fn draw_grid(&mut self) {
        let step = self.style.grid_size;
        if step <= 0.0 {
            return;
        }
        let size = self.surface.size();
        let color = self.style.grid_color.as_str();

        self.surface.set_alpha(self.style.grid_alpha);

        let mut x = 0.0;
        while x <= size.x {
            self.surface
                .stroke_line(Vec2::new(x, 0.0), Vec2::new(x, size.y), color, 1.0);
            x += step;
        }

        let mut y = 0.0;
        while y <= size.y {
            self.surface
                .stroke_line(Vec2::new(0.0, y), Vec2::new(size.x, y), color, 1.0);
            y += step;
        }

        self.surface.set_alpha(1.0);
    }

    pub fn draw_bubbles(&mut self, bubbles: &[Bubble]) {
        for bubble in bubbles {
            self.draw_bubble(bubble);
        }
    }

    /// Layered bubble: shadow, gradient body, border, highlight, icon, label
    pub fn draw_bubble(&mut self, bubble: &Bubble) {
        let (pos, r) = (bubble.pos, bubble.radius);

        self.draw_shadow(pos + self.style.shadow_offset, r);
        self.draw_body(pos, r, &bubble.tech.color);
        self.draw_border(pos, r, &bubble.tech.color, bubble.is_dragging);
        self.draw_highlight(pos - Vec2::splat(r * HIGHLIGHT_OFFSET), r * HIGHLIGHT_RADIUS);
        self.draw_icon(pos, r, &bubble.tech.icon);
        self.draw_label(
            Vec2::new(pos.x, pos.y + r + self.style.label_gap),
            &bubble.tech.name,
        );
    }

    fn draw_shadow(&mut self, center: Vec2, radius: f32) {
        let paint = Paint::Solid(self.style.shadow_color.clone());
        self.surface.fill_circle(center, radius, &paint);
    }

    fn draw_body(&mut self, center: Vec2, radius: f32, color: &str) {
        let gradient = RadialGradient {
            inner_center: center - Vec2::splat(radius * HIGHLIGHT_OFFSET),
            inner_radius: 0.0,
            outer_center: center,
            outer_radius: radius,
            stops: GRADIENT_STOPS
                .iter()
                .map(|&(offset, alpha)| (offset, with_alpha(color, alpha)))
                .collect(),
        };
        self.surface
            .fill_circle(center, radius, &Paint::Radial(gradient));
    }

    fn draw_border(&mut self, center: Vec2, radius: f32, color: &str, dragging: bool) {
        let width = if dragging {
            self.style.drag_border_width
        } else {
            self.style.border_width
        };
        self.surface.stroke_circle(center, radius, color, width);
    }

    fn draw_highlight(&mut self, center: Vec2, radius: f32) {
        let paint = Paint::Solid(self.style.highlight_color.clone());
        self.surface.fill_circle(center, radius, &paint);
    }

    /// Blit the icon if it has finished loading; otherwise kick off the
    /// first load and skip this frame.
    fn draw_icon(&mut self, center: Vec2, radius: f32, icon_ref: &str) {
        if !self.icons.contains(icon_ref) {
            self.icons.get_or_load(icon_ref, &self.loader);
        }
        let Some(image) = self.icons.image(icon_ref) else {
            return;
        };
        let size = Vec2::splat(radius * self.style.icon_scale);
        self.surface.draw_image(&image, center - size * 0.5, size);
    }

    fn draw_label(&mut self, at: Vec2, text: &str) {
        let style = TextStyle {
            font: &self.style.label_font,
            color: &self.style.label_color,
            align: TextAlign::Center,
            baseline: TextBaseline::Top,
        };
        self.surface.fill_text(text, at, &style);
    }

    /// Usage hint panel, top-left
    pub fn draw_instructions(&mut self, text: &str) {
        self.surface.fill_rect(
            Vec2::new(16.0, 16.0),
            Vec2::new(280.0, 40.0),
            &self.style.hud_panel_color,
        );
        let style = TextStyle {
            font: &self.style.instructions_font,
            color: &self.style.hud_text_color,
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
        };
        self.surface.fill_text(text, Vec2::new(24.0, 36.0), &style);
    }

    /// Live stats panel, top-right
    pub fn draw_stats(&mut self, fps: u32, bubble_count: usize) {
        let width = self.surface.size().x;
        self.surface.fill_rect(
            Vec2::new(width - 120.0, 16.0),
            Vec2::new(100.0, 50.0),
            &self.style.hud_panel_color,
        );

        let lines = [format!("FPS: {fps}"), format!("Bubbles: {bubble_count}")];
        let style = TextStyle {
            font: &self.style.stats_font,
            color: &self.style.hud_text_color,
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
        };
        for (i, line) in lines.iter().enumerate() {
            let at = Vec2::new(width - 110.0, 26.0 + i as f32 * 16.0);
            self.surface.fill_text(line, at, &style);
        }
    }
}
