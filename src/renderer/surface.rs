//! Drawing surface abstraction
//!
//! The subset of a Canvas 2D context the scene needs. The browser build
//! implements it over `CanvasRenderingContext2d`; tests record the calls.

use glam::Vec2;

/// Fill for a circle
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(String),
    Radial(RadialGradient),
}

/// Two-circle radial gradient, as in `createRadialGradient`
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    /// `(offset in 0..=1, css color)`
    pub stops: Vec<(f32, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
}

impl TextBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub font: &'a str,
    pub color: &'a str,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// A 2D raster target with a host-settable pixel size
pub trait Surface {
    /// Decoded image that can be blitted
    type Image;

    /// Current pixel size. Re-read every frame; the host may resize at will.
    fn size(&self) -> Vec2;
    fn set_size(&mut self, width: u32, height: u32);
    /// Top-left of the surface in pointer (screen) coordinates
    fn screen_offset(&self) -> Vec2;

    fn clear(&mut self);
    fn set_alpha(&mut self, alpha: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: &str, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, width: f32);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str);
    fn draw_image(&mut self, image: &Self::Image, origin: Vec2, size: Vec2);
    fn fill_text(&mut self, text: &str, at: Vec2, style: &TextStyle<'_>);
}
