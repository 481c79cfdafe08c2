//! Scene colors, fonts and sizes

use glam::Vec2;
use serde::{Deserialize, Serialize};

const UI_FONT: &str = "Inter, -apple-system, BlinkMacSystemFont, sans-serif";

/// Visual tuning for the scene renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    // === Grid ===
    pub grid_size: f32,
    pub grid_color: String,
    pub grid_alpha: f32,

    // === Bubble layers ===
    pub shadow_offset: Vec2,
    pub shadow_color: String,
    pub highlight_color: String,
    pub border_width: f32,
    /// Border width while the pointer holds the bubble
    pub drag_border_width: f32,
    /// Icon edge length as a multiple of the radius
    pub icon_scale: f32,
    pub label_color: String,
    pub label_font: String,
    /// Label distance below the bubble's bottom edge
    pub label_gap: f32,

    // === HUD ===
    pub hud_panel_color: String,
    pub hud_text_color: String,
    pub instructions_font: String,
    pub stats_font: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            grid_size: 50.0,
            grid_color: "#f3f4f6".to_string(),
            grid_alpha: 0.3,

            shadow_offset: Vec2::new(3.0, 3.0),
            shadow_color: "rgba(0, 0, 0, 0.1)".to_string(),
            highlight_color: "rgba(255, 255, 255, 0.6)".to_string(),
            border_width: 2.0,
            drag_border_width: 4.0,
            icon_scale: 1.2,
            label_color: "#333".to_string(),
            label_font: format!("12px {UI_FONT}"),
            label_gap: 20.0,

            hud_panel_color: "rgba(0, 0, 0, 0.7)".to_string(),
            hud_text_color: "white".to_string(),
            instructions_font: format!("14px {UI_FONT}"),
            stats_font: "12px monospace".to_string(),
        }
    }
}

/// Append an alpha byte to a hex color (`#RRGGBB` -> `#RRGGBBAA`).
///
/// `#RGB` is expanded first. Anything else (named colors, `rgb()`) is
/// returned unchanged.
pub fn with_alpha(color: &str, alpha: u8) -> String {
    let Some(hex) = color.strip_prefix('#') else {
        return color.to_string();
    };
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return color.to_string();
    }
    match hex.len() {
        6 => format!("#{hex}{alpha:02X}"),
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            format!("#{expanded}{alpha:02X}")
        }
        _ => color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha() {
        assert_eq!(with_alpha("#61DAFB", 0x40), "#61DAFB40");
        assert_eq!(with_alpha("#61dafb", 0xFF), "#61dafbFF");
        assert_eq!(with_alpha("#abc", 0x80), "#aabbcc80");
        assert_eq!(with_alpha("red", 0x80), "red");
        assert_eq!(with_alpha("#12345", 0x80), "#12345");
        assert_eq!(with_alpha("#zzzzzz", 0x80), "#zzzzzz");
    }

    #[test]
    fn test_style_partial_json_keeps_defaults() {
        let style: RenderStyle = serde_json::from_str(r#"{"grid_size": 25.0}"#).unwrap();
        assert_eq!(style.grid_size, 25.0);
        assert_eq!(style.border_width, 2.0);
        assert_eq!(style.shadow_offset, Vec2::new(3.0, 3.0));
    }
}
