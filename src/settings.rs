//! Sandbox settings and preferences
//!
//! Persisted in LocalStorage on the web; defaults natively.

use serde::{Deserialize, Serialize};

use crate::error::SandboxError;
use crate::renderer::RenderStyle;
use crate::sim::{Pattern, PhysicsConfig};

const DEFAULT_INSTRUCTIONS: &str = "💡 Drag bubbles to fling them around!";

/// Sandbox settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics tuning (damping, speed cap, radius range)
    pub physics: PhysicsConfig,
    /// Colors, fonts and sizes
    pub style: RenderStyle,
    /// Initial layout pattern
    pub pattern: Pattern,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    // === HUD ===
    /// Draw the reference grid
    pub show_grid: bool,
    /// Show FPS and bubble count
    pub show_stats: bool,
    /// Hint text; empty hides the panel
    pub instructions: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            style: RenderStyle::default(),
            pattern: Pattern::default(),
            seed: None,

            show_grid: true,
            show_stats: true,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
        }
    }
}

impl Settings {
    /// Parse settings JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SandboxError> {
        serde_json::from_str(json).map_err(SandboxError::Settings)
    }

    pub fn to_json(&self) -> Result<String, SandboxError> {
        serde_json::to_string(self).map_err(SandboxError::Settings)
    }

    /// Instructions to draw, if any
    pub fn instructions(&self) -> Option<&str> {
        Some(self.instructions.as_str()).filter(|s| !s.is_empty())
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "bubble_sandbox_settings";

    /// Settings from a stored JSON value; absent or unreadable falls back to defaults
    pub fn from_stored(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded stored settings");
                settings
            }
            Some(Err(e)) => {
                log::warn!("{e}; falling back to defaults");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok())
            .flatten();

        Self::from_stored(stored.as_deref())
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("{e}"),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_stored(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        log::debug!("Settings not persisted natively ({})", Self::STORAGE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.pattern, Pattern::Circle);
        assert_eq!(settings.physics.max_velocity, 15.0);
        assert!(settings.show_grid);
        assert_eq!(settings.instructions(), Some(DEFAULT_INSTRUCTIONS));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{"pattern": "spiral", "physics": {"damping": 0.5}, "seed": 7}"#)
                .unwrap();
        assert_eq!(settings.pattern, Pattern::Spiral);
        assert_eq!(settings.physics.damping, 0.5);
        assert_eq!(settings.physics.air_resistance, 0.99);
        assert_eq!(settings.seed, Some(7));
        assert!(settings.show_stats);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.pattern = Pattern::Grid;
        settings.show_grid = false;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_saved_json_loads_back() {
        let mut settings = Settings::default();
        settings.show_grid = false;
        settings.show_stats = false;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_stored(Some(&json)), settings);
    }

    #[test]
    fn test_unreadable_stored_settings_fall_back() {
        assert_eq!(Settings::from_stored(Some("{oops")), Settings::default());
        assert_eq!(Settings::from_stored(None), Settings::default());
    }

    #[test]
    fn test_invalid_json_is_settings_error() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SandboxError::Settings(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"pattern": "hexagon"}"#),
            Err(SandboxError::Settings(_))
        ));
    }

    #[test]
    fn test_empty_instructions_hidden() {
        let settings = Settings::from_json(r#"{"instructions": ""}"#).unwrap();
        assert_eq!(settings.instructions(), None);
    }
}
