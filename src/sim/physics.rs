//! Bubble kinematics
//!
//! Every operation is a pure function of its inputs and the immutable
//! [`PhysicsConfig`]. One `integrate` call is one animation frame; velocities
//! are in pixels per frame.

use std::sync::Arc;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bubble::Bubble;
use super::collision::{CollisionResult, circle_collision, exchange_velocities};
use crate::catalog::TechEntity;
use crate::consts::*;

/// Physics tuning. Fixed for the lifetime of a [`PhysicsEngine`].
///
/// `max_radius < min_radius` or negative values are a caller error and are
/// not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Velocity kept (and flipped) on a wall bounce
    pub damping: f32,
    /// Per-frame velocity decay
    pub air_resistance: f32,
    /// Speed cap, pixels per frame
    pub max_velocity: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Velocity kept on a bubble-bubble exchange
    pub collision_damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            air_resistance: AIR_RESISTANCE,
            max_velocity: MAX_VELOCITY,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            collision_damping: COLLISION_DAMPING,
        }
    }
}

/// Stateless physics over a fixed config
#[derive(Debug, Clone, Default)]
pub struct PhysicsEngine {
    config: PhysicsConfig,
}

impl PhysicsEngine {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Advance one frame inside a `width` x `height` box.
    ///
    /// Order matters: move, reflect and clamp per axis, decay, clamp speed.
    /// Dragged bubbles are returned unchanged.
    pub fn integrate(&self, bubble: &Bubble, width: f32, height: f32) -> Bubble {
        if bubble.is_dragging {
            return bubble.clone();
        }

        let r = bubble.radius;
        let mut pos = bubble.pos + bubble.vel;
        let mut vel = bubble.vel;

        if pos.x <= r || pos.x >= width - r {
            vel.x = -vel.x * self.config.damping;
            pos.x = pos.x.min(width - r).max(r);
        }
        if pos.y <= r || pos.y >= height - r {
            vel.y = -vel.y * self.config.damping;
            pos.y = pos.y.min(height - r).max(r);
        }

        vel *= self.config.air_resistance;

        let speed = vel.length();
        if speed > self.config.max_velocity {
            vel = vel / speed * self.config.max_velocity;
        }

        Bubble {
            pos,
            vel,
            ..bubble.clone()
        }
    }

    /// Overlap test; see [`circle_collision`] for the edge cases
    pub fn detect_collision(&self, a: &Bubble, b: &Bubble) -> CollisionResult {
        circle_collision(a, b)
    }

    /// Separate and exchange velocities. A miss returns the inputs unchanged.
    ///
    /// Callers skip pairs where either bubble is being dragged.
    pub fn resolve_collision(&self, result: &CollisionResult) -> (Bubble, Bubble) {
        exchange_velocities(result, self.config.collision_damping)
    }

    /// Release velocity from the pointer displacement over `elapsed_ms`.
    ///
    /// The `1000 / elapsed` multiplier is capped at 5; an unmeasurable
    /// interval (`<= 0`) uses 1. Each component is clamped to the speed cap.
    pub fn fling_velocity(&self, start: Vec2, end: Vec2, elapsed_ms: f32) -> Vec2 {
        let multiplier = if elapsed_ms > 0.0 {
            (1000.0 / elapsed_ms).min(MAX_FLING_MULTIPLIER)
        } else {
            1.0
        };
        let max = self.config.max_velocity;
        let fling = (end - start) * FLING_COEFFICIENT * multiplier;
        fling.clamp(Vec2::splat(-max), Vec2::splat(max))
    }

    /// Point-in-circle, boundary inclusive
    pub fn contains_point(&self, point: Vec2, bubble: &Bubble) -> bool {
        point.distance(bubble.pos) <= bubble.radius
    }

    /// Create a bubble at `pos`. Without an explicit velocity one is drawn
    /// uniformly from `[-2, 2]` per axis. Radius is uniform in the config's
    /// bounds.
    pub fn spawn<R: Rng>(
        &self,
        id: impl Into<String>,
        tech: Arc<TechEntity>,
        pos: Vec2,
        vel: Option<Vec2>,
        rng: &mut R,
    ) -> Bubble {
        let vel = vel.unwrap_or_else(|| {
            Vec2::new(
                (rng.random::<f32>() - 0.5) * 2.0 * SPAWN_SPEED,
                (rng.random::<f32>() - 0.5) * 2.0 * SPAWN_SPEED,
            )
        });
        let span = self.config.max_radius - self.config.min_radius;
        let radius = self.config.min_radius + rng.random::<f32>() * span;

        Bubble {
            id: id.into(),
            pos,
            vel,
            radius,
            tech,
            is_dragging: false,
        }
    }
}
