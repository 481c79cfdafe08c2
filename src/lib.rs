//! Bubble Sandbox - a tech stack physics playground
//!
//! Core modules:
//! - `catalog`: Drawable tech entities (name, icon, color, category)
//! - `sim`: Pure simulation (bubbles, physics, layout, snapshots, tick)
//! - `renderer`: Scene drawing onto a 2D surface, icon cache
//! - `platform`: Frame clock and browser surface bindings
//! - `settings`: Persisted preferences and physics tuning

pub mod catalog;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use catalog::{Catalog, TechCategory, TechEntity};
pub use error::SandboxError;
pub use settings::Settings;

/// Sandbox configuration constants
pub mod consts {
    /// Surface size used before the host reports a real one
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Physics defaults
    pub const DAMPING: f32 = 0.8;
    pub const AIR_RESISTANCE: f32 = 0.99;
    pub const MAX_VELOCITY: f32 = 15.0;
    pub const MIN_RADIUS: f32 = 40.0;
    pub const MAX_RADIUS: f32 = 60.0;
    pub const COLLISION_DAMPING: f32 = 0.8;

    /// Fling: displacement coefficient and cap on the 1000/elapsed multiplier
    pub const FLING_COEFFICIENT: f32 = 0.2;
    pub const MAX_FLING_MULTIPLIER: f32 = 5.0;

    /// Per-axis speed bound for freshly spawned bubbles
    pub const SPAWN_SPEED: f32 = 2.0;
    /// Per-axis speed bound for bubbles added at runtime
    pub const ADD_SPEED: f32 = 5.0;

    /// Circle pattern: ring radius as a fraction of the short side
    pub const CIRCLE_RING_FRACTION: f32 = 0.3;
    /// Circle pattern: positional jitter per axis (pixels)
    pub const CIRCLE_JITTER: f32 = 50.0;
    /// Spiral pattern
    pub const SPIRAL_RADIUS_STEP: f32 = 15.0;
    pub const SPIRAL_BASE_RADIUS: f32 = 50.0;
    pub const SPIRAL_ANGLE_STEP: f32 = 0.5;
    /// Random and grid patterns keep this margin from every edge
    pub const LAYOUT_INSET: f32 = 100.0;

    /// Reported frame rate before the first full second has elapsed
    pub const INITIAL_FPS: u32 = 60;
}
