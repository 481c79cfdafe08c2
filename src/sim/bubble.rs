//! Bubble entity
//!
//! Plain value type. Every change goes through a `with_*` builder that
//! returns a new bubble, so a published snapshot is never edited in place.

use std::sync::Arc;

use glam::Vec2;

use crate::catalog::TechEntity;

/// A circular simulated body bound to a tech entity
#[derive(Debug, Clone)]
pub struct Bubble {
    /// Unique within the active set
    pub id: String,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Within `[min_radius, max_radius]` of the engine that spawned it
    pub radius: f32,
    pub tech: Arc<TechEntity>,
    /// Held by the pointer; physics skips the bubble while set
    pub is_dragging: bool,
}

impl Bubble {
    pub fn with_pos(&self, pos: Vec2) -> Self {
        Self {
            pos,
            ..self.clone()
        }
    }

    pub fn with_vel(&self, vel: Vec2) -> Self {
        Self {
            vel,
            ..self.clone()
        }
    }

    /// Grab: dragging starts with velocity zeroed
    pub fn grabbed(&self) -> Self {
        Self {
            vel: Vec2::ZERO,
            is_dragging: true,
            ..self.clone()
        }
    }

    /// Let go with a release velocity
    pub fn released(&self, vel: Vec2) -> Self {
        Self {
            vel,
            is_dragging: false,
            ..self.clone()
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

impl PartialEq for Bubble {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Bubble {}
