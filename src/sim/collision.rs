//! Pairwise circle collision
//!
//! Detection reports the per-body push needed to separate two overlapping
//! bubbles; resolution applies it and swaps their velocities.

use glam::Vec2;

use super::bubble::Bubble;

/// Result of a collision check between two bubbles
#[derive(Debug, Clone)]
pub struct CollisionResult {
    pub a: Bubble,
    pub b: Bubble,
    /// Whether the circles overlap
    pub hit: bool,
    /// Push applied to `b` (and negated for `a`), half the overlap along the
    /// centre-to-centre axis. Zero when there is no hit.
    pub separation: Vec2,
}

impl CollisionResult {
    pub fn miss(a: &Bubble, b: &Bubble) -> Self {
        Self {
            a: a.clone(),
            b: b.clone(),
            hit: false,
            separation: Vec2::ZERO,
        }
    }
}

/// Check two bubbles for overlap.
///
/// Coincident centres (`d == 0`) are reported as a miss: there is no axis to
/// separate along. Touching circles (`d == ra + rb`) are a miss too.
pub fn circle_collision(a: &Bubble, b: &Bubble) -> CollisionResult {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let min_distance = a.radius + b.radius;

    if distance > 0.0 && distance < min_distance {
        let separation = delta / distance * (min_distance - distance) * 0.5;
        return CollisionResult {
            a: a.clone(),
            b: b.clone(),
            hit: true,
            separation,
        };
    }

    CollisionResult::miss(a, b)
}

/// Push both bodies apart and exchange their velocities, scaled by
/// `collision_damping`. Equal-mass exchange, not momentum conservation.
pub fn exchange_velocities(result: &CollisionResult, collision_damping: f32) -> (Bubble, Bubble) {
    if !result.hit {
        return (result.a.clone(), result.b.clone());
    }

    let a = Bubble {
        pos: result.a.pos - result.separation,
        vel: result.b.vel * collision_damping,
        ..result.a.clone()
    };
    let b = Bubble {
        pos: result.b.pos + result.separation,
        vel: result.a.vel * collision_damping,
        ..result.b.clone()
    };
    (a, b)
}
